//! # tupledns-engine
//!
//! Registration and discovery over a TupleDNS substrate.
//!
//! The [`TupleDns`] handle is the context object for all operations:
//! it owns the substrate connection and configuration, and its
//! lifetime bounds every call made through it. There is no ambient
//! global state — concurrent handles never share per-call state, and
//! "re-initialization" is simply constructing a new handle.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tupledns_core::CapabilitySet;
//! use tupledns_engine::TupleDns;
//! use tupledns_substrate::MemorySubstrate;
//!
//! # async fn demo() -> Result<(), tupledns_core::TupleError> {
//! let dns = TupleDns::new(Arc::new(MemorySubstrate::new()));
//! let caps = CapabilitySet::from_tags(["midi", "real-time"])?;
//! dns.register(
//!     "ambient.120.london.music.tuple",
//!     "10.0.0.1".parse().unwrap(),
//!     &caps,
//!     300,
//! )
//! .await?;
//!
//! let found = dns.find("*.120.*.music.tuple").await?;
//! assert_eq!(found.nodes.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
mod discovery;
mod registration;

pub use config::EngineConfig;
pub use discovery::{FindResult, SubQueryFailure};

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tupledns_core::{CapabilitySet, Coordinate, Pattern, RangeSpec, TupleError, range};
use tupledns_substrate::Substrate;

/// Client handle over one substrate connection.
///
/// Operations fail with [`TupleError::Closed`] after [`close`]
/// (`close` itself is idempotent and safe to race).
///
/// [`close`]: TupleDns::close
pub struct TupleDns {
    substrate: Arc<dyn Substrate>,
    config: EngineConfig,
    closed: AtomicBool,
}

impl TupleDns {
    /// A handle with default configuration.
    pub fn new(substrate: Arc<dyn Substrate>) -> Self {
        Self {
            substrate,
            config: EngineConfig::default(),
            closed: AtomicBool::new(false),
        }
    }

    /// A handle with explicit configuration.
    pub fn with_config(
        substrate: Arc<dyn Substrate>,
        config: EngineConfig,
    ) -> Result<Self, TupleError> {
        config.validate()?;
        Ok(Self {
            substrate,
            config,
            closed: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Release the handle. Idempotent; subsequent operations fail
    /// with [`TupleError::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), TupleError> {
        if self.is_closed() {
            return Err(TupleError::Closed);
        }
        Ok(())
    }

    /// Publish a node record under `coordinate`.
    ///
    /// Capabilities may be empty; a node without advertised
    /// capabilities is discoverable by coordinate alone. Registering
    /// an already-registered coordinate replaces the record and
    /// resets its TTL.
    pub async fn register(
        &self,
        coordinate: &str,
        address: IpAddr,
        capabilities: &CapabilitySet,
        ttl: u32,
    ) -> Result<(), TupleError> {
        self.ensure_open()?;
        let coordinate = Coordinate::parse(coordinate)?;
        registration::register(
            &self.substrate,
            &self.config,
            &coordinate,
            address,
            capabilities,
            ttl,
        )
        .await
    }

    /// Withdraw a node record immediately, independent of TTL.
    /// Unregistering a coordinate with no active record succeeds.
    pub async fn unregister(&self, coordinate: &str) -> Result<(), TupleError> {
        self.ensure_open()?;
        let coordinate = Coordinate::parse(coordinate)?;
        registration::unregister(&self.substrate, &self.config, &coordinate).await
    }

    /// Discover nodes matching a wildcard pattern.
    pub async fn find(&self, pattern: &str) -> Result<FindResult, TupleError> {
        self.find_with_capabilities(pattern, &CapabilitySet::new())
            .await
    }

    /// Discover nodes matching a pattern that also advertise every
    /// capability in `required`.
    pub async fn find_with_capabilities(
        &self,
        pattern: &str,
        required: &CapabilitySet,
    ) -> Result<FindResult, TupleError> {
        self.ensure_open()?;
        let pattern = Pattern::parse(pattern)?;
        discovery::run_find(
            &self.substrate,
            &self.config,
            std::slice::from_ref(&pattern),
            required,
            None,
        )
        .await
    }

    /// Discover nodes matching a placeholder template bounded by a
    /// range spec.
    pub async fn find_range(
        &self,
        template: &str,
        spec: &RangeSpec,
    ) -> Result<FindResult, TupleError> {
        self.find_range_with_capabilities(template, spec, &CapabilitySet::new())
            .await
    }

    /// Range discovery with an additional conjunctive capability
    /// filter.
    pub async fn find_range_with_capabilities(
        &self,
        template: &str,
        spec: &RangeSpec,
        required: &CapabilitySet,
    ) -> Result<FindResult, TupleError> {
        self.ensure_open()?;
        let expansion = range::expand(template, spec)?;
        discovery::run_find(
            &self.substrate,
            &self.config,
            &expansion.patterns,
            required,
            Some(&expansion),
        )
        .await
    }
}
