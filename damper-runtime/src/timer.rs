// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::clone::Clone;
use core::cmp::Ord;
use core::fmt::Debug;
use core::future::Future;
use core::marker::{Copy, Send, Sync};
use core::time::Duration;

/// Wall-clock abstraction the combinators schedule against.
///
/// Wrapper logic is written against this trait rather than a concrete
/// runtime, so window and quiet-period timers run on tokio's paused test
/// clock exactly as they run in production.
pub trait Timer: Clone + Send + Sync + Debug + 'static {
    type Sleep: Future<Output = ()> + Send + 'static;

    type Instant: Copy + Debug + Ord + Send + Sync;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep;

    fn now(&self) -> Self::Instant;
}
