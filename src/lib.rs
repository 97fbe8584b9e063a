// ============================================================================
// monoctx Library
// ============================================================================

pub mod core;
pub mod facade;
pub mod registry;
pub mod result;

// Re-export main types for convenience
pub use core::{ContextError, Result};
pub use facade::MonoContext;
pub use registry::{ContextRegistry, RESERVED_KEYS, StateMap, reserved_key_warning};
pub use result::Snapshot;

/// Crate version, as published in the package metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// High-level global API
// ============================================================================
//
// Free functions over the process-wide registry. Unrelated parts of a
// program can share counters and context through these without threading
// a value through every call site; a `MonoContext` handle forwards to the
// same registry for call sites that prefer an object.

/// Increments the named counter on the global registry and returns its new value
///
/// # Examples
///
/// ```
/// let first = monoctx::increment("jobs.started");
/// let second = monoctx::increment("jobs.started");
///
/// assert_eq!(first, 1);
/// assert_eq!(second, 2);
/// ```
pub fn increment(name: &str) -> u64 {
    ContextRegistry::global().increment(name)
}

/// Current count for `name` on the global registry, or 0 if never incremented
///
/// # Examples
///
/// ```
/// assert_eq!(monoctx::count("jobs.failed"), 0);
/// ```
pub fn count(name: &str) -> u64 {
    ContextRegistry::global().count(name)
}

/// Resets the named counter on the global registry; unknown names are a no-op
pub fn reset_count(name: &str) {
    ContextRegistry::global().reset_count(name)
}

/// Clears every tracked counter on the global registry
pub fn reset_all_counts() {
    ContextRegistry::global().reset_all_counts()
}

/// Shallow-merges `patch` into the global shared state and returns the snapshot
///
/// Reserved keys in the patch are logged and dropped; the rest overwrite
/// existing keys of the same name.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let patch = monoctx::StateMap::from_iter([("hello".to_string(), json!("world"))]);
/// let snapshot = monoctx::merge_state(patch);
///
/// assert_eq!(snapshot.value("hello"), Some(&json!("world")));
/// assert_eq!(monoctx::state_value("hello"), Some(json!("world")));
/// ```
pub fn merge_state(patch: StateMap) -> Snapshot {
    ContextRegistry::global().merge_state(patch)
}

/// Parses a JSON object string and merges it into the global shared state
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let snapshot = monoctx::merge_state_json(r#"{"deploy": "blue"}"#)?;
/// assert_eq!(snapshot.value("deploy"), Some(&json!("blue")));
/// # Ok::<(), monoctx::ContextError>(())
/// ```
pub fn merge_state_json(payload: &str) -> Result<Snapshot> {
    ContextRegistry::global().merge_state_json(payload)
}

/// Recomputes and returns the global registry's snapshot
///
/// # Examples
///
/// ```
/// monoctx::increment("snapshot.example");
/// let snapshot = monoctx::snapshot();
///
/// assert_eq!(snapshot.count("snapshot.example"), 1);
/// assert!(snapshot.state_created_at() <= snapshot.state_updated_at());
/// ```
pub fn snapshot() -> Snapshot {
    ContextRegistry::global().snapshot()
}

/// Value of a user state key on the global registry, or `None` if never set
pub fn state_value(key: &str) -> Option<serde_json::Value> {
    ContextRegistry::global().state_value(key)
}

/// Clears the global user state and restarts both timestamps
///
/// Counters are not affected.
pub fn reset_state() {
    ContextRegistry::global().reset_state()
}
