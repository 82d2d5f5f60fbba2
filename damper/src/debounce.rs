// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Burst-collapsing wrapper that fires after a quiet period.
//!
//! The debounce wrapper defers invocation until `wait` has elapsed with no
//! further calls. Every call stores its arguments as the newest pending
//! invocation and restarts the quiet timer, so a burst of calls spaced
//! closer than `wait` produces exactly one trailing invocation, fired
//! `wait` after the last call and carrying the last call's arguments.
//! Earlier arguments in the burst are discarded, not queued.
//!
//! State machine per wrapper:
//! - **Idle**, call arrives: with `leading` the function runs immediately on
//!   the caller's stack and the call returns its result. Either way the
//!   arguments are parked, the quiet timer is armed, and the wrapper is
//!   Pending.
//! - **Pending**, call arrives: the armed timer is cancelled, the newest
//!   arguments replace the parked ones, and a fresh timer is armed
//!   (restart-on-call semantics - the opposite of throttle's fixed window).
//! - Timer fires: the parked invocation runs, unless the burst consisted
//!   solely of the leading call that already ran. The wrapper returns to
//!   Idle.
//! - [`Debounce::cancel`] discards the parked invocation and disarms the
//!   timer at any time, including from inside the wrapped function or after
//!   the timer already fired (both no-ops where nothing is pending).

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

/// Edge configuration for [`Debounce`].
///
/// Trailing behavior is not configurable: firing after quiet is the point
/// of debouncing. Defaults to no leading edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DebounceOptions {
    /// Also invoke immediately on the first call of a burst.
    pub leading: bool,
}

impl DebounceOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self { leading: false }
    }

    #[must_use]
    pub const fn leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }
}

struct DebounceState<A> {
    pending: Option<A>,
    trailing_pending: bool,
    epoch: u64,
    timer_task: Option<DamperTask>,
}

impl<A> DebounceState<A> {
    fn new() -> Self {
        Self {
            pending: None,
            trailing_pending: false,
            epoch: 0,
            timer_task: None,
        }
    }
}

/// Burst-collapsing function wrapper.
///
/// Clones share state: calls through any clone restart the same quiet
/// timer, and [`cancel`](Self::cancel) through any clone disarms it.
/// Created via [`debounce`] or [`Debounce::with_options`].
pub struct Debounce<A, F, RT = DefaultRuntime>
where
    A: Clone + Send + 'static,
    F: Send + Sync + 'static,
    RT: Runtime,
{
    func: Arc<F>,
    wait: Duration,
    options: DebounceOptions,
    on_error: Option<ErrorHandler>,
    state: RT::Mutex<DebounceState<A>>,
}

impl<A, F, RT> Clone for Debounce<A, F, RT>
where
    A: Clone + Send + 'static,
    F: Send + Sync + 'static,
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

impl<A, F, RT> Debounce<A, F, RT>
where
    A: Clone + Send + 'static,
    F: Send + Sync + 'static,
    RT: Runtime,
{
    /// Wrap `func` with default options (trailing only).
    pub fn new(func: F, wait: Duration) -> Self {
        Self::with_options(func, wait, DebounceOptions::default())
    }

    /// Wrap `func` with explicit edge configuration.
    ///
    /// `wait` is the quiet period; `Duration::ZERO` is valid and fires the
    /// pending invocation on the next timer tick.
    pub fn with_options(func: F, wait: Duration, options: DebounceOptions) -> Self {
        Self {
            func: Arc::new(func),
            wait,
            options,
            on_error: None,
            state: MutexLike::new(DebounceState::new()),
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
    /// Returns `Some(result)` only when this call triggered a leading
    /// invocation; otherwise `None` (the result of the deferred invocation
    /// is not observable through the return channel). A leading invocation
    /// runs on the caller's stack, so a panic there propagates to the
    /// caller; the quiet timer is armed first, so the wrapper state stays
    /// consistent.
    ///
    /// Must be called from within the configured async runtime: arming the
    /// quiet timer spawns a task. The call itself never blocks or suspends.
    pub fn call<R>(&self, arg: A) -> Option<R>
    where
        F: Fn(A) -> R,
        R: Send + 'static,
    {
        let mut guard = self.state.lock();

        let was_pending = guard.timer_task.is_some();
        if let Some(task) = guard.timer_task.take() {
            // Restart on every call: the armed timer never survives a
            // newer call (debounce's defining behavior).
            task.cancel();
        }

        let leading_call = self.options.leading && !was_pending;
        guard.trailing_pending = if was_pending { true } else { !leading_call };
        guard.pending = Some(arg.clone());
        guard.epoch = guard.epoch.wrapping_add(1);

        let task = arm_quiet_timer::<A, R, F, RT>(
            self.state.clone(),
            Arc::clone(&self.func),
            self.wait,
            guard.epoch,
            self.on_error.clone(),
        );
        guard.timer_task = Some(task);

        if leading_call {
            drop(guard);
            Some((self.func)(arg))
        } else {
            None
        }
    }

    /// Discard the pending invocation and disarm the quiet timer.
    ///
    /// Safe to call at any time: from Idle it is a no-op, after the timer
    /// fired it is a no-op, and calling it from inside the wrapped function
    /// itself cannot deadlock (user code never runs under the state lock).
    pub fn cancel(&self) {
        let mut guard = self.state.lock();
        guard.epoch = guard.epoch.wrapping_add(1);
        if let Some(task) = guard.timer_task.take() {
            task.cancel();
        }
        guard.pending = None;
        guard.trailing_pending = false;
    }
}

/// Spawn the quiet-period timer for the newest call.
///
/// The task races its sleep against cancellation and re-checks the state
/// epoch under the lock before firing, so a timer that lost a restart or
/// cancel race exits without invoking.
fn arm_quiet_timer<A, R, F, RT>(
    state: RT::Mutex<DebounceState<A>>,
    func: Arc<F>,
    wait: Duration,
    epoch: u64,
    on_error: Option<ErrorHandler>,
) -> DamperTask
where
    A: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
    RT: Runtime,
{
    DamperTask::spawn(move |token| async move {
        let timer = RT::Timer::default();
        let sleep = timer.sleep_future(wait);
        let cancelled = token.cancelled();
        pin_mut!(sleep);
        pin_mut!(cancelled);
        if let Either::Right(_) = select(sleep, cancelled).await {
            return;
        }

        let arg = {
            let mut guard = state.lock();
            if guard.epoch != epoch {
                // A newer call or a cancel superseded this timer.
                return;
            }
            guard.timer_task = None;
            if guard.trailing_pending {
                guard.trailing_pending = false;
                guard.pending.take()
            } else {
                // The burst was just the leading call, which already ran.
                guard.pending = None;
                None
            }
        };

        // The deferred invocation runs outside the lock so user code can
        // call back into the wrapper (including cancel) without
        // deadlocking.
        if let Some(arg) = arg {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| {
                (func)(arg);
            })) {
                report_deferred_panic("debounce", payload, on_error.as_ref());
            }
        }
    })
}

/// Wrap `func` so a burst of calls collapses into one invocation, fired
/// `wait` after the last call with the last call's arguments.
///
/// # Example
///
/// ```no_run
/// use damper::debounce;
/// use std::time::Duration;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let debounced = debounce(|q: String| println!("search: {q}"), Duration::from_millis(50));
///
///     debounced.call("r".to_string());
///     debounced.call("ru".to_string());
///     debounced.call("rust".to_string()); // only this one fires
///
///     debounced.cancel(); // or nothing fires at all
/// }
/// ```
pub fn debounce<A, R, F>(func: F, wait: Duration) -> Debounce<A, F>
where
    A: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Debounce::new(func, wait)
}

/// Like [`debounce`], with explicit edge configuration.
///
/// # Example
///
/// ```no_run
/// use damper::{debounce_with, DebounceOptions};
/// use std::time::Duration;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let debounced = debounce_with(
///         |n: u32| n + 1,
///         Duration::from_millis(100),
///         DebounceOptions::new().leading(true),
///     );
///
///     // The first call of a burst runs immediately and returns its result.
///     assert_eq!(debounced.call(1), Some(2));
///     assert_eq!(debounced.call(2), None);
/// }
/// ```
pub fn debounce_with<A, R, F>(func: F, wait: Duration, options: DebounceOptions) -> Debounce<A, F>
where
    A: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Debounce::with_options(func, wait, options)
}
