//! Save-scoped officer -> character assignments.

use std::collections::HashMap;

/// Persistent officer id -> character id map owned by the current save.
pub trait AssignmentStore {
    fn get(&self, officer_id: &str) -> Option<&str>;

    fn put(&mut self, officer_id: &str, character_id: &str);
}

impl AssignmentStore for HashMap<String, String> {
    fn get(&self, officer_id: &str) -> Option<&str> {
        HashMap::get(self, officer_id).map(String::as_str)
    }

    fn put(&mut self, officer_id: &str, character_id: &str) {
        self.insert(officer_id.to_string(), character_id.to_string());
    }
}
