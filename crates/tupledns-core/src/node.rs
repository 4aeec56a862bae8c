//! The record a node publishes about itself.

use crate::capability::CapabilitySet;
use crate::coordinate::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A discovered (or to-be-published) node.
///
/// Records are ephemeral: the substrate owns storage and expires them
/// after `ttl` seconds. Re-registration under the same coordinate
/// replaces the record wholesale — capability sets are never merged
/// across registrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Position in the coordinate space.
    pub coordinate: Coordinate,

    /// Network address the node answers on.
    pub address: IpAddr,

    /// Advertised capability tags.
    pub capabilities: CapabilitySet,

    /// Seconds the record remains valid.
    pub ttl: u32,

    /// When the record was last published or observed.
    pub last_seen: DateTime<Utc>,
}

impl NodeRecord {
    /// Whether the node advertises a single capability tag.
    pub fn has_capability(&self, tag: &str) -> bool {
        self.capabilities.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_lookup() {
        let record = NodeRecord {
            coordinate: Coordinate::parse("test.music.tuple").unwrap(),
            address: "127.0.0.1".parse().unwrap(),
            capabilities: CapabilitySet::from_tags(["midi", "real-time"]).unwrap(),
            ttl: 300,
            last_seen: Utc::now(),
        };
        assert!(record.has_capability("midi"));
        assert!(!record.has_capability("gpu"));
    }
}
