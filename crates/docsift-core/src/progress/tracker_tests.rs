use std::sync::Arc;
use std::time::Duration;

use docsift_types::SearchStatus;

use super::{ProgressStore, ProgressTracker};

fn tracker() -> ProgressTracker {
    ProgressTracker::with_limits(Duration::from_secs(3600), 100)
}

#[test]
fn test_unknown_id_is_none() {
    let tracker = tracker();
    assert!(tracker.get("nope").is_none());
    assert!(!tracker.mark_status("nope", SearchStatus::Failed));
    tracker.advance("nope", 3);
    assert!(tracker.is_empty());
}

#[test]
fn test_fresh_record_is_initializing() {
    let tracker = tracker();
    tracker.start("job");
    let snapshot = tracker.get("job").unwrap();
    assert_eq!(snapshot.status, SearchStatus::Initializing);
    assert_eq!(snapshot.processed_chunks, 0);
    assert_eq!(snapshot.total_chunks, 0);
    assert_eq!(snapshot.percentage(), 0.0);
}

#[test]
fn test_total_is_fixed_once() {
    let tracker = tracker();
    tracker.start("job");
    tracker.set_total("job", 4);
    tracker.set_total("job", 99);
    let snapshot = tracker.get("job").unwrap();
    assert_eq!(snapshot.total_chunks, 4);
    assert_eq!(snapshot.status, SearchStatus::Processing);
}

#[test]
fn test_advance_clamps_at_total() {
    let tracker = tracker();
    tracker.start("job");
    tracker.set_total("job", 3);
    tracker.advance("job", 2);
    tracker.advance("job", 5);
    assert_eq!(tracker.get("job").unwrap().processed_chunks, 3);
    assert_eq!(tracker.get("job").unwrap().percentage(), 100.0);
}

#[test]
fn test_terminal_states_are_sticky() {
    let tracker = tracker();
    tracker.start("job");
    tracker.set_total("job", 2);
    assert!(tracker.mark_status("job", SearchStatus::Completed));
    assert!(!tracker.mark_status("job", SearchStatus::Failed));
    assert_eq!(tracker.get("job").unwrap().status, SearchStatus::Completed);
}

#[test]
fn test_failed_keeps_counters() {
    let tracker = tracker();
    tracker.start("job");
    tracker.set_total("job", 10);
    tracker.advance("job", 4);
    assert!(tracker.mark_status("job", SearchStatus::Failed));
    tracker.advance("job", 4);
    let snapshot = tracker.get("job").unwrap();
    assert_eq!(snapshot.status, SearchStatus::Failed);
    assert_eq!(snapshot.processed_chunks, 4);
}

#[test]
fn test_records_are_independent() {
    let tracker = tracker();
    tracker.start("a");
    tracker.start("b");
    tracker.set_total("a", 2);
    tracker.advance("a", 2);
    let b = tracker.get("b").unwrap();
    assert_eq!(b.processed_chunks, 0);
    assert_eq!(b.status, SearchStatus::Initializing);
}

#[test]
fn test_expired_terminal_records_are_evicted() {
    let tracker = ProgressTracker::with_limits(Duration::ZERO, 100);
    tracker.start("done");
    tracker.start("running");
    tracker.mark_status("done", SearchStatus::Failed);
    assert_eq!(tracker.evict_expired(), 1);
    assert!(tracker.get("done").is_none());
    assert!(tracker.get("running").is_some());
}

#[test]
fn test_capacity_evicts_oldest_finished_first() {
    let tracker = ProgressTracker::with_limits(Duration::from_secs(3600), 3);
    tracker.start("old");
    tracker.start("newer");
    tracker.start("running");
    tracker.mark_status("old", SearchStatus::Failed);
    std::thread::sleep(Duration::from_millis(2));
    tracker.mark_status("newer", SearchStatus::Failed);

    tracker.start("incoming");
    assert!(tracker.get("old").is_none());
    assert!(tracker.get("newer").is_some());
    assert!(tracker.get("running").is_some());
    assert!(tracker.get("incoming").is_some());
}

#[test]
fn test_capacity_never_evicts_in_flight() {
    let tracker = ProgressTracker::with_limits(Duration::from_secs(3600), 2);
    tracker.start("a");
    tracker.start("b");
    tracker.start("c");
    assert_eq!(tracker.len(), 3);
}

#[tokio::test]
async fn test_concurrent_advances_are_not_lost() {
    let tracker = Arc::new(tracker());
    tracker.start("job");
    tracker.set_total("job", 1000);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move {
                for _ in 0..50 {
                    tracker.advance("job", 1);
                    let _ = tracker.get("job");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(tracker.get("job").unwrap().processed_chunks, 500);
}

#[tokio::test]
async fn test_sweeper_stops_with_tracker() {
    let tracker = Arc::new(ProgressTracker::with_limits(Duration::ZERO, 10));
    tracker.start("job");
    tracker.mark_status("job", SearchStatus::Failed);
    let handle = tracker.start_sweeper(Duration::from_millis(10));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(tracker.get("job").is_none());

    drop(tracker);
    tokio::time::timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
}
