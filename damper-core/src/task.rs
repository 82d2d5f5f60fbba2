// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timer task handle with cooperative cancellation.
//!
//! A [`DamperTask`] is the opaque handle a combinator keeps for its armed
//! timer: spawning schedules the timer future on the configured runtime,
//! and cancelling (explicitly or on drop) signals the future's
//! `CancellationToken` so it exits without firing. At most one live handle
//! exists per wrapper at any time.

use crate::CancellationToken;
use core::future::Future;

/// Handle to a spawned timer future.
///
/// The spawned future receives a [`CancellationToken`] and is expected to
/// race its sleep against `token.cancelled()`. Dropping the handle cancels
/// the token, so a handle that is overwritten or discarded takes its timer
/// down with it.
///
/// # Runtime support
///
/// - **Tokio**: `tokio::spawn` (default, `runtime-tokio` feature)
/// - **smol**: `smol::spawn(..).detach()` (`runtime-smol` feature)
///
/// # Example
///
/// ```no_run
/// use damper_core::DamperTask;
/// use std::time::Duration;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let task = DamperTask::spawn(|token| async move {
///         tokio::time::sleep(Duration::from_millis(50)).await;
///         if !token.is_cancelled() {
///             println!("fired");
///         }
///     });
///
///     // Cancelled before the sleep elapses: never fires.
///     task.cancel();
/// }
/// ```
#[derive(Debug)]
pub struct DamperTask {
    cancel: CancellationToken,
}

impl DamperTask {
    /// Spawn a timer future on the configured runtime.
    ///
    /// The closure receives the token that this handle controls.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let _future = f(cancel.clone());

        #[cfg(feature = "runtime-tokio")]
        tokio::spawn(_future);

        #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
        smol::spawn(_future).detach();

        Self { cancel }
    }

    /// Signal cancellation without waiting for the future to observe it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for DamperTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn drop_signals_cancellation() {
        let observed = Arc::new(AtomicBool::new(false));
        let observed_clone = Arc::clone(&observed);

        let task = DamperTask::spawn(move |token| async move {
            token.cancelled().await;
            observed_clone.store(true, Ordering::SeqCst);
        });

        drop(task);
        tokio::task::yield_now().await;
        assert!(observed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cancel_is_visible_to_handle() {
        let task = DamperTask::spawn(|token| async move {
            token.cancelled().await;
        });

        assert!(!task.is_cancelled());
        task.cancel();
        assert!(task.is_cancelled());
    }
}
