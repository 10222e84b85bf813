//! Injected persistence seam for shipment submissions.
//!
//! The core treats stored values as opaque JSON; callers decide what a
//! submission contains (route, freight spec, compliance result). No
//! durability guarantees are offered or implied.

use std::collections::BTreeMap;

use serde_json::Value;

/// Key-value repository for submissions. Implementations may be in-memory,
/// file-backed, or remote; the core only depends on this trait.
pub trait SubmissionStore {
    /// Persist a value and return its generated id.
    fn save(&mut self, value: Value) -> String;
    fn get(&self, id: &str) -> Option<&Value>;
    /// Remove a value; returns whether it existed.
    fn delete(&mut self, id: &str) -> bool;
    /// All entries, ordered by id.
    fn list(&self) -> Vec<(&str, &Value)>;
}

/// In-memory store with sequential ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionStore for MemoryStore {
    fn save(&mut self, value: Value) -> String {
        self.next_id += 1;
        let id = format!("sub-{:06}", self.next_id);
        self.entries.insert(id.clone(), value);
        id
    }

    fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    fn delete(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    fn list(&self) -> Vec<(&str, &Value)> {
        self.entries
            .iter()
            .map(|(id, value)| (id.as_str(), value))
            .collect()
    }
}
