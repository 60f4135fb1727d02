// File: ./src/progress.rs
// Completed reading items, keyed by schedule item id.
use crate::model::ScheduleItem;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    done: BTreeSet<String>,
}

impl Progress {
    /// Flips an id and returns its new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.done.remove(id) {
            false
        } else {
            self.done.insert(id.to_string());
            true
        }
    }

    /// Returns true when the id was not already complete.
    pub fn mark(&mut self, id: &str) -> bool {
        self.done.insert(id.to_string())
    }

    pub fn is_done(&self, id: &str) -> bool {
        self.done.contains(id)
    }

    pub fn count_done(&self, items: &[ScheduleItem]) -> usize {
        items.iter().filter(|i| self.is_done(&i.id)).count()
    }

    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.done.iter().map(String::as_str)
    }

    pub fn export_json(&self) -> String {
        // A set of strings always serializes.
        serde_json::to_string(&self.done).unwrap_or_else(|_| "[]".to_string())
    }

    /// Unions the ids from a JSON array of strings and returns how many
    /// were new. The payload is validated before anything changes.
    pub fn import_json(&mut self, payload: &str) -> Result<usize> {
        let incoming: Vec<String> = serde_json::from_str(payload.trim())
            .context("Progress import must be a JSON array of strings")?;
        let before = self.done.len();
        self.done.extend(incoming.into_iter().filter(|id| !id.trim().is_empty()));
        Ok(self.done.len() - before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_text;

    #[test]
    fn test_toggle_and_mark() {
        let mut p = Progress::default();
        assert!(p.toggle("MAT1"));
        assert!(p.is_done("MAT1"));
        assert!(!p.toggle("MAT1"));
        assert!(!p.is_done("MAT1"));
        assert!(p.mark("MAT1"));
        assert!(!p.mark("MAT1"));
    }

    #[test]
    fn test_count_done() {
        let items = parse_text("太 1-3");
        let mut p = Progress::default();
        p.mark("MAT2");
        p.mark("PSA1");
        assert_eq!(p.count_done(&items), 1);
    }

    #[test]
    fn test_import_is_idempotent() {
        let mut p = Progress::default();
        p.mark("MAT1");
        assert_eq!(p.import_json(r#"["MAT1","MAT2"]"#).unwrap(), 1);
        let snapshot = p.clone();
        assert_eq!(p.import_json(r#"["MAT1","MAT2"]"#).unwrap(), 0);
        assert_eq!(p, snapshot);
    }

    #[test]
    fn test_malformed_import_changes_nothing() {
        let mut p = Progress::default();
        p.mark("MAT1");
        assert!(p.import_json("{\"a\":1}").is_err());
        assert!(p.import_json("[\"x\", 3]").is_err());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_export_is_sorted_array() {
        let mut p = Progress::default();
        p.mark("PSA1");
        p.mark("MAT1");
        assert_eq!(p.export_json(), r#"["MAT1","PSA1"]"#);
    }
}
