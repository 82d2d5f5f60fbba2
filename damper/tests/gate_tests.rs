// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use damper::prelude::*;
use damper_test_utils::{Counter, Recorder};

#[test]
fn test_after_invokes_from_nth_call_onward() {
    // Arrange
    let log = Recorder::new();
    let gate = {
        let log = log.clone();
        after(3, move |i: u32| {
            log.push(i);
            i
        })
    };

    // Act & Assert
    for i in 0..10 {
        let result = gate.call(i);
        if i < 2 {
            assert_eq!(result, None, "call {} is below the threshold", i + 1);
        } else {
            assert_eq!(result, Some(i));
        }
    }
    assert_eq!(log.values(), vec![2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(gate.count(), 10, "every call is counted, invoked or not");
}

#[test]
fn test_after_with_low_threshold_always_invokes() {
    let counter = Counter::new();
    let gate = {
        let counter = counter.clone();
        after(1, move |()| counter.incr())
    };

    assert_eq!(gate.call(()), Some(1));
    assert_eq!(gate.call(()), Some(2));
    assert_eq!(counter.get(), 2);

    // Threshold zero behaves the same: the gate is open from the start.
    let counter = Counter::new();
    let gate = {
        let counter = counter.clone();
        after(0, move |()| counter.incr())
    };
    assert_eq!(gate.call(()), Some(1));
}

#[test]
fn test_before_replays_last_result_once_closed() {
    // Arrange
    let counter = Counter::new();
    let gate = {
        let counter = counter.clone();
        before(3, move |()| counter.incr())
    };

    // Act & Assert: invoked for the first three calls, then frozen
    assert_eq!(gate.call(()), Some(1));
    assert_eq!(gate.call(()), Some(2));
    assert_eq!(gate.call(()), Some(3));
    assert_eq!(gate.call(()), Some(3));
    assert_eq!(gate.call(()), Some(3));
    assert_eq!(counter.get(), 3, "the function runs at most n times");
}

#[test]
fn test_before_with_zero_never_invokes() {
    let counter = Counter::new();
    let gate = {
        let counter = counter.clone();
        before(0, move |()| counter.incr())
    };

    assert_eq!(gate.call(()), None);
    assert_eq!(gate.call(()), None);
    assert_eq!(counter.get(), 0);
}

#[test]
fn test_before_passes_arguments_while_open() {
    let recorder = Recorder::new();
    let gate = {
        let recorder = recorder.clone();
        before(2, move |v: &str| {
            recorder.push(v.to_string());
            v.len()
        })
    };

    assert_eq!(gate.call("one"), Some(3));
    assert_eq!(gate.call("three"), Some(5));
    assert_eq!(gate.call("ignored"), Some(5), "closed gate ignores new arguments");
    assert_eq!(recorder.values(), vec!["one".to_string(), "three".to_string()]);
}
