// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Function-control combinators with runtime-agnostic timer scheduling.
//!
//! This crate wraps plain functions with invocation policies: rate-limited
//! ([`throttle`]), burst-collapsed ([`debounce`]), count-gated ([`after`],
//! [`before`]) and cached ([`memoize`]). The timer-driven wrappers work with
//! any async runtime through the `Timer`/`Runtime` abstraction in
//! `damper-runtime`.
//!
//! # Overview
//!
//! - **[`throttle`]** - at most one invocation per window, with configurable
//!   leading/trailing edges
//! - **[`debounce`]** - collapse a burst of calls into a single invocation
//!   after a quiet period, cancelable
//! - **[`after`] / [`before`]** - pure invocation-count gates
//! - **[`memoize`] / [`memoize_with`]** - result caching keyed by argument
//!
//! # Runtime Support
//!
//! Enable runtime-specific features in your `Cargo.toml`:
//! - `runtime-tokio` (default) - Tokio runtime support
//! - `runtime-smol` - smol runtime support
//!
//! # Example
//!
//! ```no_run
//! use damper::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let throttled = throttle(|n: u32| n * 2, Duration::from_millis(100));
//!
//!     // Leading call goes through immediately; the second call inside the
//!     // window is suppressed and returns the last actual result.
//!     assert_eq!(throttled.call(21), Some(42));
//!     assert_eq!(throttled.call(99), Some(42));
//!
//!     let debounced = debounce(|msg: String| println!("{msg}"), Duration::from_millis(50));
//!     debounced.call("first".to_string());
//!     debounced.call("only this one fires".to_string());
//! }
//! ```

use damper_core::DamperError;
use std::sync::Arc;

mod after;
mod before;
mod logging;
mod memoize;
pub mod prelude;
mod runtimes;

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
mod debounce;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
mod throttle;

pub use after::{after, After};
pub use before::{before, Before};
pub use memoize::{memoize, memoize_with, Memoize};

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use debounce::{debounce, debounce_with, Debounce, DebounceOptions};
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use throttle::{throttle, throttle_with, Throttle, ThrottleOptions};

#[cfg(feature = "runtime-tokio")]
pub use runtimes::{TokioRuntime, TokioTimer};

#[cfg(feature = "runtime-smol")]
pub use runtimes::{SmolRuntime, SmolTimer};

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use runtimes::DefaultRuntime;

/// Handler invoked when a deferred invocation fails.
///
/// Installed per wrapper via `with_error_handler`; receives the
/// [`DamperError`] describing the failure. Without a handler, failures go
/// to the error log.
pub type ErrorHandler = Arc<dyn Fn(DamperError) + Send + Sync>;
