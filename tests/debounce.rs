//! End-to-end tests for the debounced wrappers, driven by the real clock
//! and worker thread.

use admin_utils::Debouncer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_millis(100);

fn counting_debouncer(
    wait: Duration,
) -> (Debouncer<usize>, Arc<AtomicUsize>, Arc<Mutex<usize>>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(0));
    let debounced = {
        let hits = Arc::clone(&hits);
        let last = Arc::clone(&last);
        Debouncer::new(wait, move |n: usize| {
            hits.fetch_add(1, Ordering::SeqCst);
            *last.lock().expect("test lock") = n;
        })
        .expect("valid config")
    };
    (debounced, hits, last)
}

#[test]
fn test_burst_collapses_to_single_trailing_invocation() {
    let (debounced, hits, last) = counting_debouncer(WAIT);

    let burst_end = {
        let mut at = Instant::now();
        for n in 1..=5 {
            debounced.call(n);
            at = Instant::now();
            std::thread::sleep(Duration::from_millis(10));
        }
        at
    };

    // Poll until the trailing edge lands, then verify it happened once,
    // with the last arguments, no earlier than a full quiet period after
    // the final call.
    let deadline = Instant::now() + Duration::from_secs(2);
    while hits.load(Ordering::SeqCst) == 0 {
        assert!(Instant::now() < deadline, "trailing invocation never fired");
        std::thread::sleep(Duration::from_millis(5));
    }
    let fired_after = burst_end.elapsed();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(*last.lock().expect("test lock"), 5);
    assert!(
        fired_after >= WAIT,
        "fired {fired_after:?} after the last call, before the quiet period"
    );

    // A later quiet period is independent.
    debounced.call(9);
    std::thread::sleep(WAIT * 3);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(*last.lock().expect("test lock"), 9);
}

#[test]
fn test_leading_mode_invokes_first_call_only() {
    let hits = Arc::new(AtomicUsize::new(0));
    let debounced = {
        let hits = Arc::clone(&hits);
        Debouncer::leading(WAIT, move |n: usize| {
            hits.fetch_add(1, Ordering::SeqCst);
            n
        })
        .expect("valid config")
    };

    assert_eq!(debounced.call(7), Some(7));
    assert_eq!(debounced.call(8), None);
    assert_eq!(debounced.call(9), None);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // After the quiet period settles, the next call is a fresh leading edge.
    std::thread::sleep(WAIT * 3);
    assert_eq!(debounced.call(10), Some(10));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn test_flush_runs_pending_call_immediately() {
    let (debounced, hits, last) = counting_debouncer(Duration::from_secs(30));

    debounced.call(42);
    assert!(debounced.is_pending());

    debounced.flush();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(*last.lock().expect("test lock"), 42);
    assert!(!debounced.is_pending());
}

#[test]
fn test_cancel_discards_pending_call() {
    let (debounced, hits, _) = counting_debouncer(Duration::from_millis(40));

    debounced.call(1);
    debounced.cancel();
    assert!(!debounced.is_pending());

    std::thread::sleep(Duration::from_millis(120));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_independent_wrappers_do_not_interfere() {
    let (first, first_hits, _) = counting_debouncer(Duration::from_millis(40));
    let (second, second_hits, _) = counting_debouncer(Duration::from_millis(40));

    first.call(1);
    second.call(2);
    first.cancel();

    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(first_hits.load(Ordering::SeqCst), 0);
    assert_eq!(second_hits.load(Ordering::SeqCst), 1);
}
