// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Result;
use damper::prelude::*;
use damper_test_utils::{advance_ms, settle, Counter, Recorder};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_leading_call_fires_immediately() -> Result<()> {
    // Arrange
    let counter = Counter::new();
    let throttled = {
        let counter = counter.clone();
        throttle(
            move |()| {
                counter.incr();
            },
            Duration::from_millis(32),
        )
    };

    // Act & Assert
    throttled.call(());
    throttled.call(());
    assert_eq!(counter.get(), 1, "leading call runs immediately");

    advance_ms(64).await;
    assert_eq!(counter.get(), 2, "trailing call flushes after the window");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_suppressed_calls_return_last_actual_result() -> Result<()> {
    // Arrange
    let counter = Counter::new();
    let throttled = {
        let counter = counter.clone();
        throttle(move |()| counter.incr(), Duration::from_millis(100))
    };

    // Act
    let mut results = Vec::new();
    results.push(throttled.call(()));
    results.push(throttled.call(()));
    advance_ms(50).await;
    results.push(throttled.call(()));
    advance_ms(50).await; // t=100: trailing flush, window re-arms
    advance_ms(50).await;
    advance_ms(50).await; // t=200: quiet window closes
    advance_ms(50).await; // t=250
    results.push(throttled.call(()));
    advance_ms(10).await;
    results.push(throttled.call(()));

    // Assert
    assert_eq!(
        results,
        vec![Some(1), Some(1), Some(1), Some(3), Some(3)],
        "suppressed calls observe the most recent actual result"
    );
    assert_eq!(counter.get(), 3);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_trailing_flush_uses_latest_arguments() -> Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let throttled = {
        let recorder = recorder.clone();
        throttle(
            move |v: u32| {
                recorder.push(v);
                v
            },
            Duration::from_millis(100),
        )
    };

    // Act & Assert
    assert_eq!(throttled.call(1), Some(1));
    assert_eq!(throttled.call(2), Some(1));
    assert_eq!(throttled.call(3), Some(1));

    advance_ms(100).await;
    assert_eq!(
        recorder.values(),
        vec![1, 3],
        "trailing flush carries the newest arguments, intermediates are dropped"
    );

    // The flushing window re-armed itself: the next call is still suppressed.
    assert_eq!(throttled.call(4), Some(3));
    advance_ms(100).await;
    assert_eq!(recorder.values(), vec![1, 3, 4]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_window_reopens_after_quiet_window() -> Result<()> {
    // Arrange
    let counter = Counter::new();
    let throttled = {
        let counter = counter.clone();
        throttle(move |()| counter.incr(), Duration::from_millis(32))
    };

    // Act & Assert
    throttled.call(());
    advance_ms(32).await; // lone leading call: window closes without a flush
    assert_eq!(counter.get(), 1);

    throttled.call(());
    assert_eq!(counter.get(), 2, "fresh window opens with a new leading call");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_continuous_pressure_fires_once_per_window() -> Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let throttled = {
        let recorder = recorder.clone();
        throttle(
            move |i: u32| {
                recorder.push(i);
            },
            Duration::from_millis(50),
        )
    };

    // Act: calls every 10ms, far faster than the 50ms window
    for i in 1..=30 {
        throttled.call(i);
        advance_ms(10).await;
    }

    // Assert: one leading call, then one flush per 50ms window
    assert_eq!(recorder.values(), vec![1, 5, 10, 15, 20, 25, 30]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_leading_disabled_defers_to_trailing_edge() -> Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let throttled = {
        let recorder = recorder.clone();
        throttle_with(
            move |v: u32| {
                recorder.push(v);
                v
            },
            Duration::from_millis(100),
            ThrottleOptions::new().leading(false),
        )
    };

    // Act & Assert
    assert_eq!(throttled.call(1), None, "no result before the first invocation");
    assert_eq!(throttled.call(2), None);
    assert!(recorder.is_empty(), "nothing runs synchronously");

    advance_ms(100).await;
    assert_eq!(
        recorder.values(),
        vec![2],
        "exactly one trailing invocation with the last call's arguments"
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_trailing_disabled_drops_midwindow_calls() -> Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let throttled = {
        let recorder = recorder.clone();
        throttle_with(
            move |v: u32| {
                recorder.push(v);
                v
            },
            Duration::from_millis(60),
            ThrottleOptions::new().trailing(false),
        )
    };

    // Act & Assert
    assert_eq!(throttled.call(1), Some(1));
    throttled.call(2);
    throttled.call(3);

    advance_ms(60).await;
    assert_eq!(recorder.values(), vec![1], "mid-window calls never flush");

    throttled.call(4);
    throttled.call(5);
    assert_eq!(
        recorder.values(),
        vec![1, 4],
        "one invocation per window entered, not per call"
    );

    advance_ms(60).await;
    assert_eq!(recorder.values(), vec![1, 4]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_both_edges_disabled_never_invokes() -> Result<()> {
    // Arrange
    let counter = Counter::new();
    let throttled = {
        let counter = counter.clone();
        throttle_with(
            move |()| counter.incr(),
            Duration::from_millis(50),
            ThrottleOptions::new().leading(false).trailing(false),
        )
    };

    // Act & Assert: degenerate but well-defined configuration
    assert_eq!(throttled.call(()), None);
    assert_eq!(throttled.call(()), None);
    advance_ms(200).await;
    assert_eq!(counter.get(), 0);

    throttled.call(());
    advance_ms(100).await;
    assert_eq!(counter.get(), 0);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_zero_wait_disables_suppression() -> Result<()> {
    // Arrange
    let counter = Counter::new();
    let throttled = {
        let counter = counter.clone();
        throttle(move |()| counter.incr(), Duration::ZERO)
    };

    // Act & Assert: each zero-length window closes on the next timer tick
    throttled.call(());
    settle().await;
    throttled.call(());
    settle().await;
    assert_eq!(counter.get(), 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_clones_share_the_same_window() -> Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let throttled = {
        let recorder = recorder.clone();
        throttle(
            move |v: u32| {
                recorder.push(v);
                v
            },
            Duration::from_millis(100),
        )
    };
    let other_handle = throttled.clone();

    // Act & Assert
    assert_eq!(throttled.call(1), Some(1));
    assert_eq!(other_handle.call(2), Some(1), "clone calls count against the shared window");

    advance_ms(100).await;
    assert_eq!(recorder.values(), vec![1, 2]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_last_result_accessor_tracks_invocations() -> Result<()> {
    // Arrange
    let throttled = throttle(|v: u32| v * 10, Duration::from_millis(40));

    // Act & Assert
    assert_eq!(throttled.last_result(), None);
    throttled.call(3);
    assert_eq!(throttled.last_result(), Some(30));

    throttled.call(4); // suppressed
    assert_eq!(throttled.last_result(), Some(30));

    advance_ms(40).await; // trailing flush
    assert_eq!(throttled.last_result(), Some(40));

    Ok(())
}
