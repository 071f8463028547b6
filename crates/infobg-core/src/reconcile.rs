//! Structured comparison of two observations that share an identity key.
//!
//! Registries and census tables repeat the same logical record across
//! editions. Instead of an equality check that prints on partial mismatch,
//! every such comparison returns a [`Reconciliation`] and the caller decides
//! whether to warn, collect, or ignore it.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// One differing field between the kept and the incoming record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub existing: String,
    pub incoming: String,
}

impl FieldDiff {
    #[must_use]
    pub fn new(field: &str, existing: impl ToString, incoming: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            existing: existing.to_string(),
            incoming: incoming.to_string(),
        }
    }
}

/// Outcome of comparing two records with the same identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Same key, same content.
    Match,
    /// Same key, different canonical name.
    NameConflict { existing: String, incoming: String },
    /// Same key and name, different payload values.
    ValueConflict { fields: Vec<FieldDiff> },
}

impl Reconciliation {
    /// Collapse a list of payload differences into a result.
    #[must_use]
    pub fn from_diffs(fields: Vec<FieldDiff>) -> Self {
        if fields.is_empty() {
            Self::Match
        } else {
            Self::ValueConflict { fields }
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// A record that has an identity key and can be compared to another record
/// with the same key.
pub trait Reconcile {
    type Key: Eq + Hash + Clone;

    fn identity(&self) -> Self::Key;

    /// Compare `self` (already kept) with `incoming` (same identity).
    fn reconcile(&self, incoming: &Self) -> Reconciliation;
}

/// Result of offering a record to a [`FirstSeen`] collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// First record with this key; it was stored.
    New,
    /// A record with this key already exists; the incoming one was dropped.
    Duplicate(Reconciliation),
}

/// Insertion-ordered collection where the first record per key wins.
#[derive(Debug, Clone)]
pub struct FirstSeen<T: Reconcile> {
    index: HashMap<T::Key, usize>,
    items: Vec<T>,
}

impl<T: Reconcile> Default for FirstSeen<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }
}

impl<T: Reconcile> FirstSeen<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `item` unless its key is already present.
    pub fn admit(&mut self, item: T) -> Admission {
        let key = item.identity();
        if let Some(&pos) = self.index.get(&key) {
            return Admission::Duplicate(self.items[pos].reconcile(&item));
        }
        self.index.insert(key, self.items.len());
        self.items.push(item);
        Admission::New
    }

    #[must_use]
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.items[pos])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        key: u32,
        name: &'static str,
        value: u32,
    }

    impl Reconcile for Row {
        type Key = u32;

        fn identity(&self) -> u32 {
            self.key
        }

        fn reconcile(&self, incoming: &Self) -> Reconciliation {
            if self.name != incoming.name {
                return Reconciliation::NameConflict {
                    existing: self.name.into(),
                    incoming: incoming.name.into(),
                };
            }
            let mut diffs = Vec::new();
            if self.value != incoming.value {
                diffs.push(FieldDiff::new("value", self.value, incoming.value));
            }
            Reconciliation::from_diffs(diffs)
        }
    }

    #[test]
    fn first_record_per_key_wins() {
        let mut seen = FirstSeen::new();
        assert_eq!(seen.admit(Row { key: 1, name: "a", value: 10 }), Admission::New);
        assert_eq!(
            seen.admit(Row { key: 1, name: "a", value: 10 }),
            Admission::Duplicate(Reconciliation::Match)
        );
        assert_eq!(
            seen.admit(Row { key: 1, name: "a", value: 11 }),
            Admission::Duplicate(Reconciliation::ValueConflict {
                fields: vec![FieldDiff::new("value", 10, 11)]
            })
        );
        assert_eq!(
            seen.admit(Row { key: 1, name: "b", value: 10 }),
            Admission::Duplicate(Reconciliation::NameConflict {
                existing: "a".into(),
                incoming: "b".into()
            })
        );
        assert_eq!(seen.len(), 1);
        assert_eq!(seen.get(&1).map(|r| r.value), Some(10));
    }

    #[test]
    fn reconciliation_serializes_with_outcome_tag() {
        let json = serde_json::to_value(Reconciliation::Match).unwrap();
        assert_eq!(json["outcome"], "match");
        let json = serde_json::to_value(Reconciliation::from_diffs(vec![FieldDiff::new(
            "current", 95, 91,
        )]))
        .unwrap();
        assert_eq!(json["outcome"], "value_conflict");
        assert_eq!(json["fields"][0]["existing"], "95");
    }
}
