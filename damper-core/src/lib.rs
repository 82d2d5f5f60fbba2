// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core primitives shared by the damper combinators.
//!
//! This crate provides the pieces the timer-driven combinators are built on:
//!
//! - [`DamperError`] - error type for failures that cannot reach a caller
//! - [`CancellationToken`] - runtime-agnostic cancellation channel
//! - [`DamperTask`] - spawned timer task with cancel-on-drop semantics

pub mod cancellation_token;
pub mod error;
pub mod task;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{panic_message, DamperError, Result};
pub use self::task::DamperTask;
