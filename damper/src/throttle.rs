// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rate-limiting wrapper enforcing at most one invocation per window.
//!
//! The throttle wrapper invokes the wrapped function on the leading edge of
//! a `wait` window, suppresses every call made while the window is open and,
//! when enabled, flushes the latest suppressed arguments on the trailing
//! edge. A window that flushes re-arms itself, so a continuous stream of
//! calls produces one invocation per `wait` (contrast with debounce, which
//! collapses the whole burst).
//!
//! State machine per wrapper:
//! - **Idle**, call arrives: with `leading` the function runs immediately
//!   and its result becomes the wrapper's last result; without `leading` the
//!   arguments are parked for the trailing edge. Either way a window opens
//!   and its timer is armed.
//! - **Windowed**, call arrives: the arguments overwrite the parked ones,
//!   the call is suppressed, and the wrapper returns the last actual result.
//!   The running timer is never restarted (fixed-window semantics).
//! - Timer fires: a parked trailing call runs with the newest arguments and
//!   the window re-arms; otherwise the window closes to Idle.
//!
//! With both edges disabled the wrapper never invokes the function at all
//! (degenerate, but well-defined).

use crate::logging::deferred::report_deferred_panic;
use crate::runtimes::DefaultRuntime;
use crate::ErrorHandler;
use damper_core::{DamperError, DamperTask};
use damper_runtime::mutex::MutexLike;
use damper_runtime::runtime::Runtime;
use damper_runtime::timer::Timer;
use futures::future::{select, Either};
use futures::pin_mut;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

/// Edge configuration for [`Throttle`].
///
/// Defaults to both edges enabled, the conventional throttle behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleOptions {
    /// Invoke on the leading edge of a window.
    pub leading: bool,
    /// Flush the latest suppressed call on the trailing edge.
    pub trailing: bool,
}

impl ThrottleOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }

    #[must_use]
    pub const fn leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    #[must_use]
    pub const fn trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self::new()
    }
}

struct ThrottleState<A, R> {
    windowed: bool,
    trailing_pending: bool,
    pending: Option<A>,
    last_result: Option<R>,
    window_task: Option<DamperTask>,
}

impl<A, R> ThrottleState<A, R> {
    fn new() -> Self {
        Self {
            windowed: false,
            trailing_pending: false,
            pending: None,
            last_result: None,
            window_task: None,
        }
    }
}

/// Rate-limited function wrapper.
///
/// Clones share state: calls through any clone count against the same
/// window. Created via [`throttle`] or [`Throttle::with_options`].
pub struct Throttle<A, R, F, RT = DefaultRuntime>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
    RT: Runtime,
{
    func: Arc<F>,
    wait: Duration,
    options: ThrottleOptions,
    on_error: Option<ErrorHandler>,
    state: RT::Mutex<ThrottleState<A, R>>,
}

impl<A, R, F, RT> Clone for Throttle<A, R, F, RT>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
    RT: Runtime,
{
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            wait: self.wait,
            options: self.options,
            on_error: self.on_error.clone(),
            state: self.state.clone(),
        }
    }
}

impl<A, R, F, RT> Throttle<A, R, F, RT>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
    RT: Runtime,
{
    /// Wrap `func` with default options (both edges enabled).
    pub fn new(func: F, wait: Duration) -> Self {
        Self::with_options(func, wait, ThrottleOptions::default())
    }

    /// Wrap `func` with explicit edge configuration.
    ///
    /// `wait` is the window length; `Duration::ZERO` is valid and closes
    /// each window on the next timer tick, effectively disabling
    /// suppression.
    pub fn with_options(func: F, wait: Duration, options: ThrottleOptions) -> Self {
        Self {
            func: Arc::new(func),
            wait,
            options,
            on_error: None,
            state: MutexLike::new(ThrottleState::new()),
        }
    }

    /// Install a handler for panics raised by deferred (trailing)
    /// invocations.
    ///
    /// Such panics cannot reach any caller; without a handler they are
    /// logged at error level. See [`DamperError::DeferredPanic`].
    #[must_use]
    pub fn with_error_handler(
        mut self,
        handler: impl Fn(DamperError) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(handler));
        self
    }

    /// Invoke the wrapper.
    ///
    /// Returns synchronously with the result of the most recent actual
    /// invocation, which is `None` until the function has run at least
    /// once. A leading call invokes the function on the caller's stack, so
    /// a panic there propagates to the caller; the window timer is armed
    /// before the function runs, so a panicking leading call cannot wedge
    /// the wrapper in the windowed state.
    ///
    /// Must be called from within the configured async runtime: opening a
    /// window spawns its timer task. The call itself never blocks or
    /// suspends.
    pub fn call(&self, arg: A) -> Option<R> {
        let mut guard = self.state.lock();

        if guard.windowed {
            guard.pending = Some(arg);
            if self.options.trailing {
                guard.trailing_pending = true;
            }
            return guard.last_result.clone();
        }

        guard.windowed = true;
        let task = arm_window::<A, R, F, RT>(
            self.state.clone(),
            Arc::clone(&self.func),
            self.wait,
            self.options,
            self.on_error.clone(),
        );
        guard.window_task = Some(task);

        if self.options.leading {
            drop(guard);
            let result = (self.func)(arg);
            let mut guard = self.state.lock();
            guard.last_result = Some(result);
            guard.last_result.clone()
        } else {
            guard.pending = Some(arg);
            guard.trailing_pending = true;
            guard.last_result.clone()
        }
    }

    /// Result of the most recent actual invocation, if any.
    pub fn last_result(&self) -> Option<R> {
        self.state.lock().last_result.clone()
    }
}

/// Spawn the timer task that closes (and, while trailing calls keep
/// arriving, re-arms) the wrapper's window.
///
/// The task loops one iteration per window. A window with a parked trailing
/// call flushes it with the newest arguments and keeps the window chain
/// alive; a quiet window transitions the wrapper back to Idle and ends the
/// task. The running timer is intentionally never restarted by calls.
fn arm_window<A, R, F, RT>(
    state: RT::Mutex<ThrottleState<A, R>>,
    func: Arc<F>,
    wait: Duration,
    options: ThrottleOptions,
    on_error: Option<ErrorHandler>,
) -> DamperTask
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
    RT: Runtime,
{
    DamperTask::spawn(move |token| async move {
        let timer = RT::Timer::default();
        loop {
            let sleep = timer.sleep_future(wait);
            let cancelled = token.cancelled();
            pin_mut!(sleep);
            pin_mut!(cancelled);
            if let Either::Right(_) = select(sleep, cancelled).await {
                return;
            }

            let arg = {
                let mut guard = state.lock();
                if guard.trailing_pending && options.trailing {
                    guard.trailing_pending = false;
                    guard.pending.take()
                } else {
                    guard.windowed = false;
                    guard.pending = None;
                    guard.window_task = None;
                    return;
                }
            };

            // The deferred invocation runs outside the lock so user code can
            // call back into the wrapper without deadlocking.
            if let Some(arg) = arg {
                match catch_unwind(AssertUnwindSafe(|| (func)(arg))) {
                    Ok(result) => state.lock().last_result = Some(result),
                    Err(payload) => report_deferred_panic("throttle", payload, on_error.as_ref()),
                }
            }
        }
    })
}

/// Wrap `func` so it runs at most once per `wait`, with default
/// leading/trailing edges.
///
/// # Example
///
/// ```no_run
/// use damper::throttle;
/// use std::time::Duration;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let throttled = throttle(|n: u32| n + 1, Duration::from_millis(100));
///
///     assert_eq!(throttled.call(1), Some(2)); // leading invocation
///     assert_eq!(throttled.call(7), Some(2)); // suppressed: last result
/// }
/// ```
pub fn throttle<A, R, F>(func: F, wait: Duration) -> Throttle<A, R, F>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Throttle::new(func, wait)
}

/// Like [`throttle`], with explicit edge configuration.
///
/// # Example
///
/// ```no_run
/// use damper::{throttle_with, ThrottleOptions};
/// use std::time::Duration;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let throttled = throttle_with(
///         |n: u32| n + 1,
///         Duration::from_millis(100),
///         ThrottleOptions::new().leading(false),
///     );
///
///     assert_eq!(throttled.call(1), None); // deferred to the trailing edge
/// }
/// ```
pub fn throttle_with<A, R, F>(
    func: F,
    wait: Duration,
    options: ThrottleOptions,
) -> Throttle<A, R, F>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Throttle::with_options(func, wait, options)
}
