//! # tupledns-core
//!
//! Core model for the TupleDNS multidimensional discovery protocol.
//!
//! This crate provides:
//! - [`Coordinate`] and the canonical dot-joined text codec
//! - [`Pattern`] with whole-label wildcard matching
//! - [`Capability`] / [`CapabilitySet`] with conjunctive filtering
//! - [`RangeSpec`] expansion into concrete patterns + interval filters
//! - the shared [`TupleError`] taxonomy
//!
//! It intentionally performs no I/O. Substrate access lives in
//! `tupledns-substrate`; orchestration lives in `tupledns-engine`.
//!
//! ## Coordinate space
//!
//! ```text
//! ambient.120.london.music.tuple
//! └────── semantic labels ─────┘└ reserved suffix
//! ```
//!
//! A pattern wildcards whole labels only: `*.120.*.music.tuple`
//! matches the coordinate above; `amb*` is not a pattern label.

pub mod capability;
pub mod coordinate;
pub mod error;
pub mod node;
pub mod pattern;
pub mod range;

pub use capability::{Capability, CapabilitySet};
pub use coordinate::{
    Coordinate, DEFAULT_TTL, MAX_COORDINATE_LENGTH, MIN_LABELS, TUPLE_SUFFIX, decode_coordinate,
    encode_coordinate, validate_coordinate,
};
pub use error::TupleError;
pub use node::NodeRecord;
pub use pattern::{Pattern, WILDCARD, match_pattern};
pub use range::{DimensionRange, IntervalFilter, RangeExpansion, RangeSpec, expand};
