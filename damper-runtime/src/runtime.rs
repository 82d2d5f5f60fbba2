// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{mutex::MutexLike, timer::Timer};
use core::cmp::Ord;
use core::fmt::Debug;
use core::marker::{Copy, Send, Sync};

/// Bundle of runtime facilities a combinator is generic over.
///
/// The `Send + Sync` bound on `Mutex` is what lets a wrapper's state travel
/// into the spawned timer future.
pub trait Runtime: 'static {
    type Mutex<T: Send + 'static>: MutexLike<T> + Send + Sync + 'static;
    type Timer: Timer<Instant = Self::Instant> + Default;
    type Instant: Copy + Ord + Send + Sync + Debug;
}
