// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Invocation gate that opens once enough calls have been made.

use core::sync::atomic::{AtomicU64, Ordering};

/// Count-gated wrapper created by [`after`].
///
/// Counts every call; the wrapped function only runs from the `n`-th call
/// onward. Purely synchronous, no timers involved.
pub struct After<F> {
    threshold: u64,
    calls: AtomicU64,
    func: F,
}

impl<F> After<F> {
    /// Invoke the wrapper.
    ///
    /// Returns `None` while fewer than `n` calls have been made, and the
    /// function's result from the `n`-th call onward.
    pub fn call<A, R>(&self, arg: A) -> Option<R>
    where
        F: Fn(A) -> R,
    {
        let made = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        (made >= self.threshold).then(|| (self.func)(arg))
    }

    /// Number of calls made so far (invoked or not).
    pub fn count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Gate `func` behind an invocation count: calls before the `n`-th return
/// `None` without invoking.
///
/// For `n <= 1` every call invokes.
///
/// # Example
///
/// ```
/// use damper::after;
///
/// let gate = after(3, |x: u32| x * 10);
/// assert_eq!(gate.call(1), None);
/// assert_eq!(gate.call(2), None);
/// assert_eq!(gate.call(3), Some(30));
/// assert_eq!(gate.call(4), Some(40));
/// ```
pub fn after<F>(n: u64, func: F) -> After<F> {
    After {
        threshold: n,
        calls: AtomicU64::new(0),
        func,
    }
}
