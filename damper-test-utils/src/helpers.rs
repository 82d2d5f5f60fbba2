// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

/// Yield to the scheduler until freshly spawned timer tasks have run far
/// enough to register their sleeps.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Advance tokio's paused test clock by `ms` milliseconds.
///
/// Settles before advancing, so timers armed by preceding wrapper calls are
/// registered against the pre-advance clock, and settles again afterwards
/// so fired timer callbacks have completed when this returns.
pub async fn advance_ms(ms: u64) {
    settle().await;
    tokio::time::advance(Duration::from_millis(ms)).await;
    settle().await;
}
