//! Capability tags and capability sets.
//!
//! A capability is an opaque, case-preserved tag advertised by a
//! registered node (`midi`, `real-time`, `gpu`). Nodes hold a set:
//! uniqueness enforced, order irrelevant. Discovery filtering is
//! conjunctive — every requested tag must be present.

use crate::error::TupleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One opaque capability tag.
///
/// Tags must survive the `caps=a,b` wire form, so they are non-empty
/// and contain neither commas nor whitespace. Case is preserved and
/// significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Capability(String);

impl Capability {
    pub fn new(tag: impl Into<String>) -> Result<Self, TupleError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(TupleError::CapabilityParse(
                "capability tag is empty".to_string(),
            ));
        }
        if tag.contains(',') || tag.chars().any(char::is_whitespace) {
            return Err(TupleError::CapabilityParse(format!(
                "capability tag {tag:?} contains a comma or whitespace"
            )));
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Capability {
    type Error = TupleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Capability> for String {
    fn from(value: Capability) -> Self {
        value.0
    }
}

/// A deduplicated, order-insensitive set of capability tags.
///
/// The empty set is valid both on nodes (discoverable by coordinate
/// alone) and as a filter (matches everything).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw tag text, deduplicating.
    pub fn from_tags<I, S>(tags: I) -> Result<Self, TupleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for tag in tags {
            set.insert(Capability::new(tag.as_ref())?);
        }
        Ok(Self(set))
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|c| c.as_str() == tag)
    }

    /// Conjunctive membership: every tag in `required` is present here.
    pub fn contains_all(&self, required: &CapabilitySet) -> bool {
        required.0.is_subset(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> CapabilitySet {
        CapabilitySet::from_tags(tags).unwrap()
    }

    #[test]
    fn rejects_unrepresentable_tags() {
        assert!(Capability::new("midi").is_ok());
        assert!(Capability::new("real-time").is_ok());
        assert!(matches!(
            Capability::new(""),
            Err(TupleError::CapabilityParse(_))
        ));
        assert!(Capability::new("a,b").is_err());
        assert!(Capability::new("a b").is_err());
    }

    #[test]
    fn deduplicates() {
        let caps = set(&["midi", "midi", "gpu"]);
        assert_eq!(caps.len(), 2);
        assert!(caps.contains("midi"));
        assert!(caps.contains("gpu"));
    }

    #[test]
    fn filter_is_conjunctive() {
        let node = set(&["a", "b"]);
        assert!(node.contains_all(&set(&["a", "b"])));
        assert!(node.contains_all(&set(&["a"])));
        assert!(!node.contains_all(&set(&["a", "c"])));
        assert!(node.contains_all(&CapabilitySet::new()));
    }

    #[test]
    fn case_is_preserved_and_significant() {
        let caps = set(&["MIDI"]);
        assert!(caps.contains("MIDI"));
        assert!(!caps.contains("midi"));
    }
}
