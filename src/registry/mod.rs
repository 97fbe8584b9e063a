//! The registry core: counter table, state blob, and the type tying them
//! together with timestamp bookkeeping and the process-wide singleton.

mod counters;
mod state;

pub use counters::CounterTable;
pub use state::{RESERVED_KEYS, StateBlob, StateMap, reserved_key_warning};

use crate::core::{ContextError, Result};
use crate::result::Snapshot;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde_json::Value as JsonValue;
use std::sync::{Arc, RwLock};

// Global singleton instance of the registry
lazy_static! {
    static ref GLOBAL_CONTEXT: Arc<ContextRegistry> = Arc::new(ContextRegistry::new());
}

/// Process-wide shared state and counter registry
///
/// Owns the counter table, the user state blob, and the creation/update
/// timestamps. All operations take `&self`; the fields sit behind a single
/// `RwLock`, so each operation is atomic with respect to itself (an
/// increment's read-then-write cannot interleave with another operation).
/// Cross-operation atomicity is not provided.
///
/// Most call sites use the global instance through the crate-root
/// functions or a [`MonoContext`](crate::MonoContext) handle; isolated
/// instances from [`ContextRegistry::new`] are useful in tests.
pub struct ContextRegistry {
    inner: RwLock<RegistryInner>,
}

#[derive(Debug)]
struct RegistryInner {
    counts: CounterTable,
    state: StateBlob,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RegistryInner {
    fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.state.entries().clone(),
            self.counts.snapshot(),
            self.created_at,
            self.updated_at,
        )
    }
}

impl ContextRegistry {
    /// Get the global ContextRegistry instance
    ///
    /// Returns a reference to the singleton registry shared by the whole
    /// process. Handles and the crate-root free functions forward here, so
    /// mutations made through any of them are visible through all of them.
    pub fn global() -> &'static Arc<ContextRegistry> {
        &GLOBAL_CONTEXT
    }

    /// Creates an empty registry with both timestamps set to now
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            inner: RwLock::new(RegistryInner {
                counts: CounterTable::new(),
                state: StateBlob::new(),
                created_at: now,
                updated_at: now,
            }),
        }
    }

    /// Creates a registry seeded with an initial state
    ///
    /// The seed goes through the same reserved-key filter as
    /// [`merge_state`](Self::merge_state).
    pub fn with_initial_state(seed: StateMap) -> Self {
        let registry = Self::new();
        registry.merge_state(seed);
        registry
    }

    /// Increments the named counter and returns its new value
    ///
    /// An absent name is created at 0 before the increment, so the first
    /// call returns 1. Any string is a valid name, including `""`.
    pub fn increment(&self, name: &str) -> u64 {
        self.inner.write().unwrap().counts.increment(name)
    }

    /// Current count for `name`, or 0 if never incremented
    ///
    /// Pure read: does not create the name.
    pub fn count(&self, name: &str) -> u64 {
        self.inner.read().unwrap().counts.get(name)
    }

    /// Resets the named counter to 0; unknown names are a no-op
    pub fn reset_count(&self, name: &str) {
        self.inner.write().unwrap().counts.reset(name);
    }

    /// Clears every tracked counter
    pub fn reset_all_counts(&self) {
        self.inner.write().unwrap().counts.reset_all();
    }

    /// Shallow-merges `patch` into the shared state and returns the snapshot
    ///
    /// Reserved keys present in the patch are logged and dropped without
    /// failing the call; the remaining keys overwrite existing entries of
    /// the same name. The update timestamp only moves when at least one
    /// key actually applied, so a patch of nothing but reserved keys (or
    /// an empty patch) leaves the state untouched.
    pub fn merge_state(&self, patch: StateMap) -> Snapshot {
        let mut inner = self.inner.write().unwrap();
        if inner.state.merge(patch) > 0 {
            inner.updated_at = Utc::now();
        }
        inner.snapshot()
    }

    /// Parses a JSON object string and merges it like [`merge_state`](Self::merge_state)
    ///
    /// The payload must be a JSON object. Malformed JSON or a non-object
    /// payload is rejected without touching the state.
    pub fn merge_state_json(&self, payload: &str) -> Result<Snapshot> {
        match serde_json::from_str::<JsonValue>(payload)? {
            JsonValue::Object(patch) => Ok(self.merge_state(patch)),
            other => Err(ContextError::InvalidPatch(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Recomputes and returns the externally visible snapshot
    ///
    /// User state keys plus a copy of the counter table and both
    /// timestamps. The snapshot is a value; later registry mutations do
    /// not change it.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.read().unwrap().snapshot()
    }

    /// Value of a user state key, or `None` if never set
    ///
    /// Reserved keys are never part of the user state, so asking for them
    /// returns `None`.
    pub fn state_value(&self, key: &str) -> Option<JsonValue> {
        self.inner.read().unwrap().state.get(key).cloned()
    }

    /// Clears the user state and restarts both timestamps
    ///
    /// Immediately afterwards `stateCreatedAt == stateUpdatedAt`. Counters
    /// are not affected.
    pub fn reset_state(&self) {
        let mut inner = self.inner.write().unwrap();
        let now = Utc::now();
        inner.state.clear();
        inner.created_at = now;
        inner.updated_at = now;
    }
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
