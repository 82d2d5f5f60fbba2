// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

// Conditional logging shim: uses `tracing` when enabled, falls back to eprintln!/println!

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        tracing::error!($($arg)*);
    }};
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        tracing::warn!($($arg)*);
    }};
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        tracing::info!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        println!($($arg)*);
    }};
}

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub(crate) mod deferred {
    use crate::ErrorHandler;
    use core::any::Any;
    use damper_core::{panic_message, DamperError};

    /// Route a panic captured inside a timer task to the wrapper's error
    /// handler, or to the error log when none is installed. Deferred
    /// failures have no caller to propagate to, but they must not vanish.
    pub(crate) fn report_deferred_panic(
        combinator: &str,
        payload: Box<dyn Any + Send>,
        handler: Option<&ErrorHandler>,
    ) {
        let err =
            DamperError::deferred_panic(format!("{combinator}: {}", panic_message(payload.as_ref())));
        match handler {
            Some(handler) => handler(err),
            None => crate::error!("{err}"),
        }
    }
}
