// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared invocation counter.
///
/// Clone it into a wrapped closure and assert on the count from the test
/// body.
#[derive(Clone, Debug, Default)]
pub struct Counter {
    count: Arc<AtomicU64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new count.
    pub fn incr(&self) -> u64 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

/// Shared argument recorder.
///
/// Records every value pushed from a wrapped closure, preserving order, so
/// tests can assert exactly which invocations happened.
#[derive(Clone, Debug)]
pub struct Recorder<A> {
    values: Arc<Mutex<Vec<A>>>,
}

impl<A> Recorder<A> {
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, value: A) {
        self.values.lock().push(value);
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl<A: Clone> Recorder<A> {
    /// Snapshot of everything recorded so far, in order.
    pub fn values(&self) -> Vec<A> {
        self.values.lock().clone()
    }
}

impl<A> Default for Recorder<A> {
    fn default() -> Self {
        Self::new()
    }
}
