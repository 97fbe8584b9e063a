/// Concurrent access tests
///
/// Each registry operation takes the internal lock once, so increments
/// and merges from multiple threads must not be lost
/// Run with: cargo test --test concurrent_access_tests
use monoctx::{ContextRegistry, StateMap};
use serde_json::json;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_increments_are_not_lost() {
    let registry = Arc::new(ContextRegistry::new());

    let mut handles = vec![];
    let num_threads = 8;
    let increments_per_thread = 1000;

    for _ in 0..num_threads {
        let registry_clone = Arc::clone(&registry);

        let handle = thread::spawn(move || {
            for _ in 0..increments_per_thread {
                registry_clone.increment("contended");
            }
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        registry.count("contended"),
        num_threads * increments_per_thread
    );
}

#[test]
fn test_concurrent_merges_keep_every_key() {
    let registry = Arc::new(ContextRegistry::new());

    let mut handles = vec![];
    let num_threads = 8;

    for thread_id in 0..num_threads {
        let registry_clone = Arc::clone(&registry);

        let handle = thread::spawn(move || {
            let key = format!("thread_{}", thread_id);
            let patch = StateMap::from_iter([(key, json!(thread_id))]);
            registry_clone.merge_state(patch);
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    for thread_id in 0..num_threads {
        assert_eq!(
            registry.state_value(&format!("thread_{}", thread_id)),
            Some(json!(thread_id))
        );
    }
}

#[test]
fn test_concurrent_reads_see_consistent_snapshots() {
    let registry = Arc::new(ContextRegistry::new());
    registry.merge_state(StateMap::from_iter([(
        "fixed".to_string(),
        json!("value"),
    )]));

    let mut handles = vec![];

    for _ in 0..4 {
        let registry_clone = Arc::clone(&registry);

        let handle = thread::spawn(move || {
            for _ in 0..250 {
                let snapshot = registry_clone.snapshot();
                assert_eq!(snapshot.value("fixed"), Some(&json!("value")));
                assert!(snapshot.state_created_at() <= snapshot.state_updated_at());
            }
        });

        handles.push(handle);
    }

    for _ in 0..4 {
        let registry_clone = Arc::clone(&registry);

        let handle = thread::spawn(move || {
            for _ in 0..250 {
                registry_clone.increment("churn");
            }
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.count("churn"), 1000);
}
