//! Range-query decomposition.
//!
//! A range query starts from a pattern template with named
//! placeholders:
//!
//! ```text
//! {genre}.{bpm}.london.music.tuple
//! ```
//!
//! Each placeholder is bound by a [`RangeSpec`] entry to either an
//! explicit value set or a closed numeric interval. Set-bound
//! dimensions multiply out into concrete patterns (cartesian product);
//! interval-bound dimensions stay a single wildcard position and are
//! enforced after the fact by [`RangeExpansion::retain`], because
//! coordinate labels are opaque text and enumerating every integer in
//! an interval would be unbounded work.

use crate::coordinate::{Coordinate, is_valid_label};
use crate::error::TupleError;
use crate::pattern::{Pattern, WILDCARD};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\{([A-Za-z0-9_-]+)\}$").expect("placeholder regex must compile")
    })
}

/// Constraint on one named dimension of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionRange {
    /// Closed numeric interval; matched labels must parse to an
    /// integer in `[min, max]`.
    Interval { min: i64, max: i64 },

    /// Explicit finite set of allowed literal labels.
    Values(Vec<String>),
}

/// Per-dimension constraints for one range query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSpec {
    dims: BTreeMap<String, DimensionRange>,
}

impl RangeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `dimension` to a closed numeric interval.
    pub fn interval(mut self, dimension: impl Into<String>, min: i64, max: i64) -> Self {
        self.dims
            .insert(dimension.into(), DimensionRange::Interval { min, max });
        self
    }

    /// Bind `dimension` to an explicit value set.
    pub fn values<I, S>(mut self, dimension: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dims.insert(
            dimension.into(),
            DimensionRange::Values(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn get(&self, dimension: &str) -> Option<&DimensionRange> {
        self.dims.get(dimension)
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dims.len()
    }
}

/// Post-match numeric constraint on one label position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalFilter {
    pub dimension: String,
    pub position: usize,
    pub min: i64,
    pub max: i64,
}

impl IntervalFilter {
    /// Whether the coordinate's label at this position parses to an
    /// integer inside the interval. Non-numeric labels are discarded,
    /// never an error.
    pub fn accepts(&self, coordinate: &Coordinate) -> bool {
        let Some(label) = coordinate.labels().get(self.position) else {
            return false;
        };
        match label.parse::<i64>() {
            Ok(value) => self.min <= value && value <= self.max,
            Err(_) => false,
        }
    }
}

/// Result of expanding a template: the concrete patterns to query and
/// the interval filters to apply to every match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpansion {
    pub patterns: Vec<Pattern>,
    pub filters: Vec<IntervalFilter>,
}

impl RangeExpansion {
    /// Whether a matched coordinate survives all interval filters.
    pub fn retain(&self, coordinate: &Coordinate) -> bool {
        self.filters.iter().all(|f| f.accepts(coordinate))
    }
}

enum Slot {
    Literal(String),
    Choices(Vec<String>),
}

/// Expand a placeholder template against a range spec.
///
/// The number of emitted patterns is the product of the set-bound
/// cardinalities; interval-bound dimensions contribute exactly one
/// wildcard position each. Every placeholder must have a spec entry
/// and every spec entry must be referenced — a dangling key on either
/// side is an `InvalidParameter`, so a typo'd dimension name fails
/// loudly instead of silently widening the query.
pub fn expand(template: &str, spec: &RangeSpec) -> Result<RangeExpansion, TupleError> {
    if template.is_empty() {
        return Err(TupleError::InvalidCoordinate("template is empty".to_string()));
    }

    let mut slots = Vec::new();
    let mut filters = Vec::new();
    let mut seen = Vec::new();

    for (position, label) in template.split('.').enumerate() {
        if let Some(captures) = placeholder_re().captures(label) {
            let dimension = captures[1].to_string();
            if seen.contains(&dimension) {
                return Err(TupleError::InvalidParameter(format!(
                    "placeholder {{{dimension}}} appears more than once"
                )));
            }
            let Some(range) = spec.get(&dimension) else {
                return Err(TupleError::InvalidParameter(format!(
                    "placeholder {{{dimension}}} has no range-spec entry"
                )));
            };
            match range {
                DimensionRange::Interval { min, max } => {
                    if min > max {
                        return Err(TupleError::InvalidParameter(format!(
                            "interval for {{{dimension}}} is empty: {min} > {max}"
                        )));
                    }
                    filters.push(IntervalFilter {
                        dimension: dimension.clone(),
                        position,
                        min: *min,
                        max: *max,
                    });
                    slots.push(Slot::Literal(WILDCARD.to_string()));
                }
                DimensionRange::Values(values) => {
                    if values.is_empty() {
                        return Err(TupleError::InvalidParameter(format!(
                            "value set for {{{dimension}}} is empty"
                        )));
                    }
                    for value in values {
                        if !is_valid_label(value) {
                            return Err(TupleError::InvalidParameter(format!(
                                "value {value:?} for {{{dimension}}} is not a valid label"
                            )));
                        }
                    }
                    slots.push(Slot::Choices(values.clone()));
                }
            }
            seen.push(dimension);
        } else {
            slots.push(Slot::Literal(label.to_string()));
        }
    }

    for dimension in spec.dims.keys() {
        if !seen.contains(dimension) {
            return Err(TupleError::InvalidParameter(format!(
                "range-spec entry {dimension:?} is not referenced by the template"
            )));
        }
    }

    // Cartesian product across the set-bound slots.
    let mut assembled: Vec<Vec<String>> = vec![Vec::new()];
    for slot in &slots {
        match slot {
            Slot::Literal(label) => {
                for labels in &mut assembled {
                    labels.push(label.clone());
                }
            }
            Slot::Choices(values) => {
                let mut next = Vec::with_capacity(assembled.len() * values.len());
                for labels in &assembled {
                    for value in values {
                        let mut widened = labels.clone();
                        widened.push(value.clone());
                        next.push(widened);
                    }
                }
                assembled = next;
            }
        }
    }

    let mut patterns = Vec::with_capacity(assembled.len());
    for labels in assembled {
        patterns.push(Pattern::parse(&labels.join("."))?);
    }

    Ok(RangeExpansion { patterns, filters })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_dimension_multiplies_interval_stays_wildcard() {
        let spec = RangeSpec::new()
            .values("genre", ["ambient", "jazz"])
            .interval("bpm", 110, 130);
        let expansion = expand("{genre}.{bpm}.test.music.tuple", &spec).unwrap();

        let texts: Vec<String> = expansion.patterns.iter().map(Pattern::to_string).collect();
        assert_eq!(texts, ["ambient.*.test.music.tuple", "jazz.*.test.music.tuple"]);
        assert_eq!(expansion.filters.len(), 1);
        assert_eq!(expansion.filters[0].position, 1);
        assert_eq!(expansion.filters[0].dimension, "bpm");
    }

    #[test]
    fn cartesian_product_across_set_dimensions() {
        let spec = RangeSpec::new()
            .values("genre", ["ambient", "jazz", "electronic"])
            .values("city", ["london", "berlin"]);
        let expansion = expand("{genre}.{city}.music.tuple", &spec).unwrap();
        assert_eq!(expansion.patterns.len(), 6);
        assert!(expansion.filters.is_empty());
    }

    #[test]
    fn interval_filter_discards_out_of_range_and_non_numeric() {
        let spec = RangeSpec::new().interval("bpm", 110, 130);
        let expansion = expand("ambient.{bpm}.music.tuple", &spec).unwrap();

        let inside = Coordinate::parse("ambient.120.music.tuple").unwrap();
        let below = Coordinate::parse("ambient.100.music.tuple").unwrap();
        let above = Coordinate::parse("ambient.140.music.tuple").unwrap();
        let text = Coordinate::parse("ambient.fast.music.tuple").unwrap();

        assert!(expansion.retain(&inside));
        assert!(!expansion.retain(&below));
        assert!(!expansion.retain(&above));
        assert!(!expansion.retain(&text));
    }

    #[test]
    fn interval_bounds_are_inclusive() {
        let spec = RangeSpec::new().interval("bpm", 110, 130);
        let expansion = expand("a.{bpm}.music.tuple", &spec).unwrap();
        assert!(expansion.retain(&Coordinate::parse("a.110.music.tuple").unwrap()));
        assert!(expansion.retain(&Coordinate::parse("a.130.music.tuple").unwrap()));
    }

    #[test]
    fn unbound_placeholder_fails() {
        let err = expand("{genre}.music.tuple", &RangeSpec::new()).unwrap_err();
        assert!(matches!(err, TupleError::InvalidParameter(_)));
    }

    #[test]
    fn unused_spec_key_fails_loudly() {
        let spec = RangeSpec::new()
            .values("genre", ["jazz"])
            .interval("bmp", 0, 10); // typo'd dimension
        let err = expand("{genre}.music.tuple", &spec).unwrap_err();
        assert!(matches!(err, TupleError::InvalidParameter(_)));
    }

    #[test]
    fn empty_interval_and_empty_value_set_fail() {
        let spec = RangeSpec::new().interval("bpm", 10, 5);
        assert!(expand("{bpm}.music.tuple", &spec).is_err());

        let spec = RangeSpec::new().values("genre", Vec::<String>::new());
        assert!(expand("{genre}.music.tuple", &spec).is_err());
    }

    #[test]
    fn substituted_values_must_be_labels() {
        let spec = RangeSpec::new().values("genre", ["has space"]);
        assert!(expand("{genre}.music.tuple", &spec).is_err());
    }

    #[test]
    fn duplicate_placeholder_fails() {
        let spec = RangeSpec::new().values("x", ["a"]);
        assert!(expand("{x}.{x}.tuple", &spec).is_err());
    }

    #[test]
    fn template_without_placeholders_needs_empty_spec() {
        let expansion = expand("a.*.tuple", &RangeSpec::new()).unwrap();
        assert_eq!(expansion.patterns.len(), 1);
        assert!(expand("a.*.tuple", &RangeSpec::new().interval("bpm", 1, 2)).is_err());
    }

    #[test]
    fn template_must_be_pattern_shaped() {
        assert!(expand("{genre}.music", &RangeSpec::new().values("genre", ["a"])).is_err());
        assert!(expand("", &RangeSpec::new()).is_err());
    }
}
