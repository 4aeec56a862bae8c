//! # tupledns-substrate
//!
//! The name-resolution substrate boundary.
//!
//! The discovery engine owns all matching and aggregation logic; the
//! substrate is reached only through the narrow [`Substrate`] trait:
//! publish a record under a name, withdraw a name, query records, and
//! enumerate live names under a zone. A substrate may or may not
//! support wildcard labels in queries — the engine degrades to
//! enumerate-and-filter when it does not.
//!
//! Records are ephemeral and TTL-bounded. The substrate owns storage
//! and expiry; nothing here tracks record lifetime independently.

pub mod memory;
pub mod record;

pub use memory::MemorySubstrate;
pub use record::{RecordType, format_capability_record, parse_capability_record};

use async_trait::async_trait;

/// Errors surfaced by a substrate backend.
///
/// `NotFound` and `Timeout` are distinguishable outcomes by contract:
/// the engine treats the former as an authoritative empty answer and
/// only the latter (plus `Backend`) as a sub-query failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstrateError {
    /// No live record under the queried name.
    #[error("name not found")]
    NotFound,

    /// The substrate did not answer within its own deadline.
    #[error("substrate query timed out")]
    Timeout,

    /// The operation is not supported by this backend (for example a
    /// wildcard query against a backend without native wildcards).
    #[error("unsupported substrate operation: {0}")]
    Unsupported(String),

    /// Any other backend failure.
    #[error("substrate failure: {0}")]
    Backend(String),
}

impl SubstrateError {
    /// Whether a registration-path retry can help.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Backend(_))
    }
}

/// One substrate answer row.
///
/// `name` is the concrete coordinate text owning the record; for
/// native wildcard queries it identifies which coordinate matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub name: String,
    pub value: String,
    pub ttl: u32,
}

/// The publish/query contract the engine runs against.
#[async_trait]
pub trait Substrate: Send + Sync {
    /// Publish `value` under `(name, record_type)` with a TTL in
    /// seconds. Last writer wins per `(name, record_type)`.
    async fn publish(
        &self,
        name: &str,
        record_type: RecordType,
        value: &str,
        ttl: u32,
    ) -> Result<(), SubstrateError>;

    /// Remove every record under `name`. Withdrawing an absent name
    /// succeeds (idempotent).
    async fn withdraw(&self, name: &str) -> Result<(), SubstrateError>;

    /// Fetch live records of one type under `name`.
    ///
    /// Backends reporting [`Substrate::wildcard_queries`] accept `*`
    /// labels in `name` and answer for every matching live name.
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<RawRecord>, SubstrateError>;

    /// Whether `query` accepts wildcard labels natively.
    fn wildcard_queries(&self) -> bool {
        false
    }

    /// List live names whose trailing label equals `zone`. Used for
    /// pattern decomposition when wildcard queries are unsupported.
    async fn enumerate(&self, zone: &str) -> Result<Vec<String>, SubstrateError>;
}
