use crate::core::{ContextError, Result};
use crate::registry::StateMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Externally visible view of the registry
///
/// User state keys sit at the top level, the counter table under
/// `counts`, and the bookkeeping timestamps under `stateCreatedAt` /
/// `stateUpdatedAt` — which is also the shape it serializes to. A
/// snapshot is computed on demand and is a plain value: mutating the
/// registry afterwards never changes an already returned snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    state: StateMap,

    counts: HashMap<String, u64>,

    #[serde(rename = "stateCreatedAt")]
    state_created_at: DateTime<Utc>,

    #[serde(rename = "stateUpdatedAt")]
    state_updated_at: DateTime<Utc>,
}

impl Snapshot {
    pub(crate) fn new(
        state: StateMap,
        counts: HashMap<String, u64>,
        state_created_at: DateTime<Utc>,
        state_updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            state,
            counts,
            state_created_at,
            state_updated_at,
        }
    }

    /// Value of a user state key, or `None` if never set
    pub fn value(&self, key: &str) -> Option<&JsonValue> {
        self.state.get(key)
    }

    /// The user state keys captured by this snapshot
    pub fn state(&self) -> &StateMap {
        &self.state
    }

    /// Count for `name` at snapshot time, 0 if it was never incremented
    pub fn count(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// The counter table captured by this snapshot
    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    /// When the state was created (or last fully reset)
    pub fn state_created_at(&self) -> DateTime<Utc> {
        self.state_created_at
    }

    /// When a merge last applied at least one key
    pub fn state_updated_at(&self) -> DateTime<Utc> {
        self.state_updated_at
    }

    /// Serializes the snapshot to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ContextError::SerializationError(e.to_string()))
    }

    /// Serializes the snapshot to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ContextError::SerializationError(e.to_string()))
    }
}
