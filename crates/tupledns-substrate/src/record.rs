//! Record types and the wire payload codec.
//!
//! A registered node publishes two records under its coordinate: an
//! address record holding the textual IP, and a capability record
//! holding `caps=tag1,tag2,...`. The capability payload may carry
//! trailing space-separated attributes, which are ignored here.

use tupledns_core::{CapabilitySet, TupleError};

const CAPS_PREFIX: &str = "caps=";

/// The two record kinds the engine publishes and queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordType {
    /// Network address (DNS A/AAAA analogue).
    Address,
    /// Capability tags (DNS TXT analogue).
    Capabilities,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Capabilities => write!(f, "capabilities"),
        }
    }
}

/// Encode a capability set as a record payload.
///
/// The empty set encodes as a bare `caps=`, so re-registration with no
/// capabilities still overwrites a previous record.
pub fn format_capability_record(capabilities: &CapabilitySet) -> String {
    let tags: Vec<&str> = capabilities.iter().map(|c| c.as_str()).collect();
    format!("{CAPS_PREFIX}{}", tags.join(","))
}

/// Decode a capability record payload.
///
/// A payload without the `caps=` prefix carries no capabilities and
/// decodes to the empty set. Malformed tags are a `CapabilityParse`
/// error.
pub fn parse_capability_record(payload: &str) -> Result<CapabilitySet, TupleError> {
    let Some(rest) = payload
        .find(CAPS_PREFIX)
        .map(|at| &payload[at + CAPS_PREFIX.len()..])
    else {
        return Ok(CapabilitySet::new());
    };
    let tags = rest.split(' ').next().unwrap_or("");
    if tags.is_empty() {
        return Ok(CapabilitySet::new());
    }
    CapabilitySet::from_tags(tags.split(','))
}
