// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the damper combinators.
//!
//! Calls into a wrapped function happen on two paths: synchronously inside
//! the caller (leading invocations, gates, memoization) and deferred inside
//! a timer task (trailing invocations). Synchronous panics propagate to the
//! caller unchanged; deferred panics have no caller to reach, so they are
//! captured as [`DamperError::DeferredPanic`] and routed to the wrapper's
//! error handler, or logged when no handler is installed.

use core::any::Any;

/// Root error type for all damper operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DamperError {
    /// A wrapped function panicked during a deferred (timer-fired)
    /// invocation.
    ///
    /// No caller is waiting on a deferred invocation, so the panic cannot
    /// propagate; the payload is stringified and carried here instead.
    #[error("deferred invocation panicked: {context}")]
    DeferredPanic {
        /// Stringified panic payload plus the combinator that fired it.
        context: String,
    },
}

impl DamperError {
    /// Create a deferred-panic error with the given context.
    pub fn deferred_panic(context: impl Into<String>) -> Self {
        Self::DeferredPanic {
            context: context.into(),
        }
    }
}

/// Specialized Result type for damper operations.
pub type Result<T> = std::result::Result<T, DamperError>;

/// Render a panic payload as a displayable string.
///
/// Panic payloads are `Box<dyn Any>`; in practice they are almost always a
/// `&str` or a `String`. Anything else gets a fixed placeholder.
///
/// # Examples
///
/// ```
/// use damper_core::panic_message;
///
/// let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
/// assert_eq!(panic_message(payload.as_ref()), "boom");
/// ```
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
