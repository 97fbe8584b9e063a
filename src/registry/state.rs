use log::warn;
use serde_json::Value as JsonValue;

/// A state patch and the blob's underlying map type
pub type StateMap = serde_json::Map<String, JsonValue>;

/// Keys owned by the registry itself
///
/// They only ever appear in snapshots, never inside the user blob, and
/// cannot be set through a merge.
pub const RESERVED_KEYS: [&str; 3] = ["counts", "stateCreatedAt", "stateUpdatedAt"];

/// Exact message emitted when a merge tries to set a reserved key
pub fn reserved_key_warning(key: &str) -> String {
    format!("WARNING: refusing to override \"{key}\" property in MonoContext state")
}

/// User-supplied shared context
///
/// Arbitrary string keys mapped to arbitrary JSON values. The blob holds
/// user keys only; counters and timestamps live in their own registry
/// fields and are joined into snapshots at read time.
#[derive(Debug, Clone, Default)]
pub struct StateBlob {
    entries: StateMap,
}

impl StateBlob {
    /// Creates an empty blob
    pub fn new() -> Self {
        Self {
            entries: StateMap::new(),
        }
    }

    /// Shallow-merges `patch` into the blob, returning how many keys applied
    ///
    /// Reserved keys present in the patch are logged and dropped; the rest
    /// overwrite existing entries of the same name. Nested objects are
    /// replaced whole, not deep-merged.
    pub fn merge(&mut self, patch: StateMap) -> usize {
        let mut applied = 0;
        for (key, value) in patch {
            if RESERVED_KEYS.contains(&key.as_str()) {
                warn!("{}", reserved_key_warning(&key));
                continue;
            }
            self.entries.insert(key, value);
            applied += 1;
        }
        applied
    }

    /// Returns the value stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    /// Removes every user key
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The blob's entries, as joined into snapshots
    pub(crate) fn entries(&self) -> &StateMap {
        &self.entries
    }
}
