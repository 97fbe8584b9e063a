use crate::core::Result;
use crate::registry::{ContextRegistry, StateMap};
use crate::result::Snapshot;
use log::info;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Notice logged when a handle is constructed without suppression
pub(crate) const CONSTRUCTION_NOTICE: &str =
    "WARNING: constructing a MonoContext handle is unnecessary, the registry is globally accessible";

/// Handle over the process-wide registry
///
/// Construction is never required: every operation is reachable through
/// the crate-root functions or [`ContextRegistry::global`]. The handle
/// exists for call sites that prefer an object to pass around. All
/// handles built with [`new`](MonoContext::new) or
/// [`quiet`](MonoContext::quiet) share the same underlying registry, so
/// mutations made through one are visible through every other.
///
/// # Examples
///
/// ```
/// use monoctx::MonoContext;
///
/// let a = MonoContext::quiet();
/// let b = MonoContext::quiet();
///
/// a.increment("handle.shared");
/// assert_eq!(b.count("handle.shared"), 1);
/// ```
#[derive(Clone)]
pub struct MonoContext {
    registry: Arc<ContextRegistry>,
}

impl MonoContext {
    /// Creates a handle to the global registry
    ///
    /// Logs a notice that construction is unnecessary; use
    /// [`quiet`](Self::quiet) to suppress it. The returned handle behaves
    /// identically either way.
    pub fn new() -> Self {
        info!("{CONSTRUCTION_NOTICE}");
        Self::quiet()
    }

    /// Creates a handle to the global registry without the construction notice
    pub fn quiet() -> Self {
        Self {
            registry: Arc::clone(ContextRegistry::global()),
        }
    }

    /// Creates a handle over a specific registry instance
    ///
    /// Useful for tests that need isolation from the process-wide state.
    pub fn with_registry(registry: Arc<ContextRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this handle forwards to
    pub fn registry(&self) -> &Arc<ContextRegistry> {
        &self.registry
    }

    /// Increments the named counter and returns its new value
    pub fn increment(&self, name: &str) -> u64 {
        self.registry.increment(name)
    }

    /// Current count for `name`, or 0 if never incremented
    pub fn count(&self, name: &str) -> u64 {
        self.registry.count(name)
    }

    /// Resets the named counter to 0; unknown names are a no-op
    pub fn reset_count(&self, name: &str) {
        self.registry.reset_count(name)
    }

    /// Clears every tracked counter
    pub fn reset_all_counts(&self) {
        self.registry.reset_all_counts()
    }

    /// Shallow-merges `patch` into the shared state and returns the snapshot
    pub fn merge_state(&self, patch: StateMap) -> Snapshot {
        self.registry.merge_state(patch)
    }

    /// Parses a JSON object string and merges it into the shared state
    pub fn merge_state_json(&self, payload: &str) -> Result<Snapshot> {
        self.registry.merge_state_json(payload)
    }

    /// Recomputes and returns the externally visible snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.registry.snapshot()
    }

    /// Value of a user state key, or `None` if never set
    pub fn state_value(&self, key: &str) -> Option<JsonValue> {
        self.registry.state_value(key)
    }

    /// Clears the user state and restarts both timestamps
    pub fn reset_state(&self) {
        self.registry.reset_state()
    }
}

impl Default for MonoContext {
    fn default() -> Self {
        Self::new()
    }
}
