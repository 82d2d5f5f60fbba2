// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Invocation gate that closes after enough calls have been made.

use parking_lot::Mutex;

struct BeforeState<R> {
    calls: u64,
    last: Option<R>,
}

/// Count-gated wrapper created by [`before`].
///
/// Invokes and caches while fewer than `n` calls have been made; from the
/// `n`-th call onward it stops invoking and replays the last cached result
/// forever. Purely synchronous, no timers involved.
pub struct Before<R, F> {
    limit: u64,
    func: F,
    state: Mutex<BeforeState<R>>,
}

impl<R, F> Before<R, F>
where
    R: Clone,
{
    /// Invoke the wrapper.
    ///
    /// Returns the function's result while the gate is open, the cached
    /// last result once it has closed, and `None` when the gate was created
    /// with `n == 0` (the function is never invoked at all).
    pub fn call<A>(&self, arg: A) -> Option<R>
    where
        F: Fn(A) -> R,
    {
        let mut guard = self.state.lock();
        if guard.calls >= self.limit {
            return guard.last.clone();
        }
        guard.calls += 1;
        drop(guard);

        // User code runs outside the lock; a recursive call through the
        // wrapper counts like any other.
        let result = (self.func)(arg);
        self.state.lock().last = Some(result.clone());
        Some(result)
    }
}

/// Invoke `func` only for the first `n` calls; afterwards replay the last
/// result without invoking.
///
/// For `n == 0` the function is never invoked and every call returns
/// `None`.
///
/// # Example
///
/// ```
/// use damper::before;
/// use std::cell::Cell;
///
/// let counter = Cell::new(0u32);
/// let gate = before(3, move |()| {
///     counter.set(counter.get() + 1);
///     counter.get()
/// });
///
/// assert_eq!(gate.call(()), Some(1));
/// assert_eq!(gate.call(()), Some(2));
/// assert_eq!(gate.call(()), Some(3));
/// assert_eq!(gate.call(()), Some(3)); // gate closed: cached result
/// assert_eq!(gate.call(()), Some(3));
/// ```
pub fn before<R, F>(n: u64, func: F) -> Before<R, F> {
    Before {
        limit: n,
        func,
        state: Mutex::new(BeforeState {
            calls: 0,
            last: None,
        }),
    }
}
