//! Tuple coordinates and their canonical text form.
//!
//! A coordinate is an ordered label sequence ending in the reserved
//! `tuple` suffix, written as dot-joined ASCII text:
//!
//! ```text
//! ambient.120.london.music.tuple
//! ```
//!
//! The text form is wire-visible and must stay bit-exact across
//! implementations: labels are `[A-Za-z0-9-]+`, the whole name is at
//! most 253 bytes, and at least one semantic label precedes the suffix.

use crate::error::TupleError;
use serde::{Deserialize, Serialize};

/// Reserved trailing label marking namespace membership.
pub const TUPLE_SUFFIX: &str = "tuple";

/// Maximum length of the canonical text form (DNS name limit).
pub const MAX_COORDINATE_LENGTH: usize = 253;

/// Minimum label count: one semantic label plus the suffix.
pub const MIN_LABELS: usize = 2;

/// Default record TTL in seconds.
pub const DEFAULT_TTL: u32 = 300;

/// Whether `label` satisfies the coordinate label grammar.
pub(crate) fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// A validated coordinate: ordered labels, last one always the suffix.
///
/// Construction goes through [`Coordinate::parse`] or
/// [`Coordinate::from_labels`]; every held instance satisfies the
/// grammar, arity, and length invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    labels: Vec<String>,
}

impl Coordinate {
    /// Parse canonical text into a coordinate.
    pub fn parse(text: &str) -> Result<Self, TupleError> {
        if text.is_empty() {
            return Err(TupleError::InvalidCoordinate(
                "coordinate is empty".to_string(),
            ));
        }
        if text.len() > MAX_COORDINATE_LENGTH {
            return Err(TupleError::InvalidCoordinate(format!(
                "coordinate exceeds {MAX_COORDINATE_LENGTH} bytes"
            )));
        }
        let labels: Vec<String> = text.split('.').map(str::to_string).collect();
        Self::from_labels(labels)
    }

    /// Build a coordinate from an already-split label sequence.
    ///
    /// The sequence must include the trailing suffix label.
    pub fn from_labels(labels: Vec<String>) -> Result<Self, TupleError> {
        if labels.len() < MIN_LABELS {
            return Err(TupleError::InvalidCoordinate(format!(
                "coordinate needs at least {MIN_LABELS} labels, got {}",
                labels.len()
            )));
        }
        for label in &labels {
            if !is_valid_label(label) {
                return Err(TupleError::InvalidCoordinate(format!(
                    "invalid label: {label:?}"
                )));
            }
        }
        match labels.last() {
            Some(last) if last == TUPLE_SUFFIX => {}
            _ => {
                return Err(TupleError::InvalidCoordinate(format!(
                    "coordinate must end with the {TUPLE_SUFFIX:?} label"
                )));
            }
        }
        let joined_len: usize = labels.iter().map(String::len).sum::<usize>() + labels.len() - 1;
        if joined_len > MAX_COORDINATE_LENGTH {
            return Err(TupleError::InvalidCoordinate(format!(
                "coordinate exceeds {MAX_COORDINATE_LENGTH} bytes"
            )));
        }
        Ok(Self { labels })
    }

    /// All labels, suffix included.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels without the trailing suffix.
    pub fn semantic_labels(&self) -> &[String] {
        &self.labels[..self.labels.len() - 1]
    }

    /// Label count, suffix included.
    pub fn arity(&self) -> usize {
        self.labels.len()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.labels.join("."))
    }
}

impl std::str::FromStr for Coordinate {
    type Err = TupleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = TupleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

/// Join semantic labels and append the reserved suffix.
///
/// `["ambient", "120", "london", "music"]` encodes to
/// `"ambient.120.london.music.tuple"`.
pub fn encode_coordinate<S: AsRef<str>>(labels: &[S]) -> Result<String, TupleError> {
    let mut all: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
    all.push(TUPLE_SUFFIX.to_string());
    Ok(Coordinate::from_labels(all)?.to_string())
}

/// Inverse of [`encode_coordinate`]: strip the suffix and return the
/// semantic labels.
pub fn decode_coordinate(text: &str) -> Result<Vec<String>, TupleError> {
    let coordinate = Coordinate::parse(text)?;
    Ok(coordinate.semantic_labels().to_vec())
}

/// Non-throwing check equivalent to "decode would succeed".
pub fn validate_coordinate(text: &str) -> bool {
    Coordinate::parse(text).is_ok()
}
