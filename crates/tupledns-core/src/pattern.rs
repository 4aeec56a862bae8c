//! Wildcard patterns over the coordinate space.
//!
//! A pattern is coordinate-shaped text where any label may be `*`,
//! matching exactly one label at that position. Wildcarding is
//! whole-label only: `amb*` is not a pattern label, and `*` never
//! spans multiple labels.

use crate::coordinate::{
    Coordinate, MAX_COORDINATE_LENGTH, MIN_LABELS, TUPLE_SUFFIX, is_valid_label,
};
use crate::error::TupleError;

/// The single-label wildcard.
pub const WILDCARD: &str = "*";

/// A validated query pattern.
///
/// The trailing label must be the literal reserved suffix — a wildcard
/// there would leave namespace membership of the query ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    labels: Vec<String>,
}

impl Pattern {
    /// Parse pattern text.
    pub fn parse(text: &str) -> Result<Self, TupleError> {
        if text.is_empty() {
            return Err(TupleError::InvalidCoordinate("pattern is empty".to_string()));
        }
        if text.len() > MAX_COORDINATE_LENGTH {
            return Err(TupleError::InvalidCoordinate(format!(
                "pattern exceeds {MAX_COORDINATE_LENGTH} bytes"
            )));
        }
        let labels: Vec<String> = text.split('.').map(str::to_string).collect();
        if labels.len() < MIN_LABELS {
            return Err(TupleError::InvalidCoordinate(format!(
                "pattern needs at least {MIN_LABELS} labels, got {}",
                labels.len()
            )));
        }
        for label in &labels {
            if label != WILDCARD && !is_valid_label(label) {
                return Err(TupleError::InvalidCoordinate(format!(
                    "invalid pattern label: {label:?}"
                )));
            }
        }
        match labels.last() {
            Some(last) if last == TUPLE_SUFFIX => {}
            _ => {
                return Err(TupleError::InvalidCoordinate(format!(
                    "pattern must end with the literal {TUPLE_SUFFIX:?} label"
                )));
            }
        }
        Ok(Self { labels })
    }

    /// All labels, wildcards included.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label count.
    pub fn arity(&self) -> usize {
        self.labels.len()
    }

    /// Whether the pattern contains no wildcards.
    pub fn is_concrete(&self) -> bool {
        self.labels.iter().all(|l| l != WILDCARD)
    }

    /// Test a concrete coordinate against this pattern.
    ///
    /// Arity-strict: differing label counts never match. Non-wildcard
    /// labels compare byte-for-byte, case-sensitively.
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        if self.arity() != coordinate.arity() {
            return false;
        }
        self.labels
            .iter()
            .zip(coordinate.labels())
            .all(|(p, c)| p == WILDCARD || p == c)
    }

    /// View a wildcard-free pattern as the coordinate it names.
    pub fn to_coordinate(&self) -> Option<Coordinate> {
        if self.is_concrete() {
            Coordinate::from_labels(self.labels.clone()).ok()
        } else {
            None
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.labels.join("."))
    }
}

impl std::str::FromStr for Pattern {
    type Err = TupleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Boundary convenience: match two text forms, false on any parse failure.
pub fn match_pattern(coordinate: &str, pattern: &str) -> bool {
    match (Coordinate::parse(coordinate), Pattern::parse(pattern)) {
        (Ok(coordinate), Ok(pattern)) => pattern.matches(&coordinate),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_is_single_label_substitution() {
        assert!(match_pattern("a.b.c.tuple", "*.b.*.tuple"));
        assert!(!match_pattern("a.b.c.tuple", "a.x.c.tuple"));
        assert!(match_pattern(
            "ambient.120.london.music.tuple",
            "*.120.*.music.tuple"
        ));
    }

    #[test]
    fn arity_strict() {
        assert!(!match_pattern("a.b.tuple", "a.b.c.tuple"));
        assert!(!match_pattern("a.b.c.tuple", "*.tuple"));
        assert!(!match_pattern("a.b.c.tuple", "*.*.*.*.tuple"));
    }

    #[test]
    fn exact_match_is_degenerate_pattern() {
        assert!(match_pattern("a.b.c.tuple", "a.b.c.tuple"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!match_pattern("Ambient.music.tuple", "ambient.music.tuple"));
    }

    #[test]
    fn no_partial_label_wildcards() {
        assert!(Pattern::parse("amb*.music.tuple").is_err());
        assert!(Pattern::parse("**.music.tuple").is_err());
    }

    #[test]
    fn trailing_label_must_be_literal_suffix() {
        assert!(Pattern::parse("a.b.*").is_err());
        assert!(Pattern::parse("a.b.music").is_err());
        assert!(Pattern::parse("*.tuple").is_ok());
    }

    #[test]
    fn concrete_pattern_names_a_coordinate() {
        let concrete = Pattern::parse("a.b.tuple").unwrap();
        assert!(concrete.is_concrete());
        assert_eq!(
            concrete.to_coordinate().unwrap(),
            Coordinate::parse("a.b.tuple").unwrap()
        );

        let wild = Pattern::parse("*.b.tuple").unwrap();
        assert!(!wild.is_concrete());
        assert!(wild.to_coordinate().is_none());
    }

    #[test]
    fn match_pattern_is_false_on_invalid_input() {
        assert!(!match_pattern("", "*.tuple"));
        assert!(!match_pattern("a.tuple", ""));
        assert!(!match_pattern("has spaces.tuple", "*.tuple"));
    }
}
