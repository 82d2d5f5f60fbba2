// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared test infrastructure for the damper workspace.
//!
//! Paused-clock settling helpers plus invocation recorders for asserting
//! how often, and with which arguments, a wrapped function actually ran.

pub mod helpers;
pub mod recorder;

pub use self::helpers::{advance_ms, settle};
pub use self::recorder::{Counter, Recorder};
