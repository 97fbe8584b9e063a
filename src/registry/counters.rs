use std::collections::HashMap;

/// Named counter table
///
/// Maps counter names to non-negative totals. Absent names read as zero;
/// incrementing an absent name creates it at 1. Any string is a valid
/// name, including the empty string.
#[derive(Debug, Clone, Default)]
pub struct CounterTable {
    counts: HashMap<String, u64>,
}

impl CounterTable {
    /// Creates an empty counter table
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Increments the counter for `name` and returns its new value
    pub fn increment(&mut self, name: &str) -> u64 {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Returns the current count for `name`, or 0 if never incremented
    ///
    /// Pure read: does not create the name.
    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Sets the counter for `name` back to 0
    ///
    /// Names that were never incremented are a no-op; whether a reset name
    /// stays in the table is not observable through `get`.
    pub fn reset(&mut self, name: &str) {
        if let Some(count) = self.counts.get_mut(name) {
            *count = 0;
        }
    }

    /// Forgets every tracked name
    pub fn reset_all(&mut self) {
        self.counts.clear();
    }

    /// Cloned projection of the table, as joined into snapshots
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_reads_zero() {
        let counts = CounterTable::new();
        assert_eq!(counts.get("never"), 0);
        assert!(counts.snapshot().is_empty());
    }

    #[test]
    fn increment_returns_running_total() {
        let mut counts = CounterTable::new();
        for expected in 1..=5 {
            assert_eq!(counts.increment("requests"), expected);
        }
        assert_eq!(counts.get("requests"), 5);
    }

    #[test]
    fn empty_string_is_a_valid_name() {
        let mut counts = CounterTable::new();
        assert_eq!(counts.increment(""), 1);
        assert_eq!(counts.get(""), 1);
    }

    #[test]
    fn reset_only_touches_the_named_counter() {
        let mut counts = CounterTable::new();
        counts.increment("a");
        counts.increment("a");
        counts.increment("b");

        counts.reset("a");
        assert_eq!(counts.get("a"), 0);
        assert_eq!(counts.get("b"), 1);

        counts.reset("missing");
        assert_eq!(counts.get("b"), 1);
    }

    #[test]
    fn reset_all_clears_the_table() {
        let mut counts = CounterTable::new();
        counts.increment("a");
        counts.increment("b");

        counts.reset_all();
        assert_eq!(counts.get("a"), 0);
        assert_eq!(counts.get("b"), 0);
        assert!(counts.snapshot().is_empty());
    }
}
