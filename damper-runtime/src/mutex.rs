// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::ops::{Deref, DerefMut};

/// Shared-lock abstraction over a wrapper's internal state.
///
/// Cloning yields another handle to the same state. Every state transition
/// of a combinator happens under this lock, inside either a wrapper call or
/// a timer task, which is what makes the timer callback atomic relative to
/// wrapper calls. The wrapped user function is never invoked while the lock
/// is held.
pub trait MutexLike<T: ?Sized>: Clone {
    /// The guard type returned by `lock()`
    type Guard<'a>: Deref<Target = T> + DerefMut
    where
        Self: 'a,
        T: 'a;

    /// Create a new mutex wrapping the given value
    fn new(value: T) -> Self
    where
        T: Sized;

    /// Lock the mutex and return a guard
    fn lock(&self) -> Self::Guard<'_>;
}
