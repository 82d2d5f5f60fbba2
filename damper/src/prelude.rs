// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Convenience re-exports for the common surface of the crate.

pub use crate::after::{after, After};
pub use crate::before::{before, Before};
pub use crate::memoize::{memoize, memoize_with, Memoize};

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use crate::debounce::{debounce, debounce_with, Debounce, DebounceOptions};
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use crate::throttle::{throttle, throttle_with, Throttle, ThrottleOptions};

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use crate::runtimes::DefaultRuntime;

pub use damper_core::{DamperError, Result};
pub use damper_runtime::runtime::Runtime;
pub use damper_runtime::timer::Timer;
