// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
pub use damper_runtime::impls::tokio::{TokioRuntime, TokioTimer};

#[cfg(feature = "runtime-smol")]
pub use damper_runtime::impls::smol::{SmolRuntime, SmolTimer};

/// Runtime the combinators default to when none is named explicitly.
#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = TokioRuntime;

#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = SmolRuntime;
