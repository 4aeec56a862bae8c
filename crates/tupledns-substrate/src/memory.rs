//! In-memory substrate used by tests and the CLI.
//!
//! Behaves like a tiny authoritative zone: deterministic name order,
//! last-writer-wins per `(name, record type)`, and lazy TTL expiry
//! checked against wall-clock `Instant`s at read time.

use crate::{RawRecord, RecordType, Substrate, SubstrateError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tupledns_core::{Coordinate, Pattern};

#[derive(Debug, Clone)]
struct StoredRecord {
    record_type: RecordType,
    value: String,
    ttl: u32,
    expires_at: Instant,
}

impl StoredRecord {
    fn live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// A TTL-enforcing in-memory name store.
///
/// By default wildcard queries are unsupported, which routes the
/// engine through its enumerate-and-decompose path; construct with
/// [`MemorySubstrate::with_native_wildcards`] to exercise the
/// single-query path instead.
#[derive(Debug, Default)]
pub struct MemorySubstrate {
    records: RwLock<BTreeMap<String, Vec<StoredRecord>>>,
    native_wildcards: bool,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A substrate that answers wildcard queries natively.
    pub fn with_native_wildcards() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            native_wildcards: true,
        }
    }

    /// Number of names with at least one live record.
    pub async fn live_names(&self) -> usize {
        let now = Instant::now();
        let records = self.records.read().await;
        records
            .values()
            .filter(|entries| entries.iter().any(|r| r.live(now)))
            .count()
    }

    fn collect(
        entries: &[StoredRecord],
        record_type: RecordType,
        name: &str,
        now: Instant,
    ) -> Vec<RawRecord> {
        entries
            .iter()
            .filter(|r| r.record_type == record_type && r.live(now))
            .map(|r| RawRecord {
                name: name.to_string(),
                value: r.value.clone(),
                ttl: r.ttl,
            })
            .collect()
    }
}

#[async_trait]
impl Substrate for MemorySubstrate {
    async fn publish(
        &self,
        name: &str,
        record_type: RecordType,
        value: &str,
        ttl: u32,
    ) -> Result<(), SubstrateError> {
        let now = Instant::now();
        let mut records = self.records.write().await;
        let entries = records.entry(name.to_string()).or_default();
        entries.retain(|r| r.record_type != record_type && r.live(now));
        entries.push(StoredRecord {
            record_type,
            value: value.to_string(),
            ttl,
            expires_at: now + Duration::from_secs(u64::from(ttl)),
        });
        Ok(())
    }

    async fn withdraw(&self, name: &str) -> Result<(), SubstrateError> {
        let mut records = self.records.write().await;
        records.remove(name);
        Ok(())
    }

    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<RawRecord>, SubstrateError> {
        let now = Instant::now();
        let records = self.records.read().await;

        if name.contains('*') {
            if !self.native_wildcards {
                return Err(SubstrateError::Unsupported(
                    "wildcard queries are not enabled".to_string(),
                ));
            }
            let pattern = Pattern::parse(name)
                .map_err(|e| SubstrateError::Backend(format!("bad wildcard query: {e}")))?;
            let mut matched = Vec::new();
            for (stored_name, entries) in records.iter() {
                let Ok(coordinate) = Coordinate::parse(stored_name) else {
                    continue;
                };
                if pattern.matches(&coordinate) {
                    matched.extend(Self::collect(entries, record_type, stored_name, now));
                }
            }
            if matched.is_empty() {
                return Err(SubstrateError::NotFound);
            }
            return Ok(matched);
        }

        let found = records
            .get(name)
            .map(|entries| Self::collect(entries, record_type, name, now))
            .unwrap_or_default();
        if found.is_empty() {
            return Err(SubstrateError::NotFound);
        }
        Ok(found)
    }

    fn wildcard_queries(&self) -> bool {
        self.native_wildcards
    }

    async fn enumerate(&self, zone: &str) -> Result<Vec<String>, SubstrateError> {
        let now = Instant::now();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|(name, entries)| {
                name.rsplit('.').next() == Some(zone) && entries.iter().any(|r| r.live(now))
            })
            .map(|(name, _)| name.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_then_query() {
        let substrate = MemorySubstrate::new();
        substrate
            .publish("a.music.tuple", RecordType::Address, "10.0.0.1", 300)
            .await
            .unwrap();

        let records = substrate
            .query("a.music.tuple", RecordType::Address)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "10.0.0.1");
        assert_eq!(records[0].name, "a.music.tuple");
    }

    #[tokio::test]
    async fn last_writer_wins_per_record_type() {
        let substrate = MemorySubstrate::new();
        substrate
            .publish("a.music.tuple", RecordType::Address, "10.0.0.1", 300)
            .await
            .unwrap();
        substrate
            .publish("a.music.tuple", RecordType::Address, "10.0.0.2", 300)
            .await
            .unwrap();
        substrate
            .publish("a.music.tuple", RecordType::Capabilities, "caps=midi", 300)
            .await
            .unwrap();

        let addresses = substrate
            .query("a.music.tuple", RecordType::Address)
            .await
            .unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].value, "10.0.0.2");

        let caps = substrate
            .query("a.music.tuple", RecordType::Capabilities)
            .await
            .unwrap();
        assert_eq!(caps[0].value, "caps=midi");
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let substrate = MemorySubstrate::new();
        substrate
            .publish("a.music.tuple", RecordType::Address, "10.0.0.1", 0)
            .await
            .unwrap();
        assert_eq!(
            substrate.query("a.music.tuple", RecordType::Address).await,
            Err(SubstrateError::NotFound)
        );
        assert_eq!(substrate.enumerate("tuple").await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn withdraw_is_idempotent() {
        let substrate = MemorySubstrate::new();
        substrate
            .publish("a.music.tuple", RecordType::Address, "10.0.0.1", 300)
            .await
            .unwrap();
        substrate.withdraw("a.music.tuple").await.unwrap();
        substrate.withdraw("a.music.tuple").await.unwrap();
        assert_eq!(
            substrate.query("a.music.tuple", RecordType::Address).await,
            Err(SubstrateError::NotFound)
        );
    }

    #[tokio::test]
    async fn enumerate_filters_by_zone() {
        let substrate = MemorySubstrate::new();
        substrate
            .publish("a.music.tuple", RecordType::Address, "10.0.0.1", 300)
            .await
            .unwrap();
        substrate
            .publish("b.music.tuple", RecordType::Address, "10.0.0.2", 300)
            .await
            .unwrap();
        substrate
            .publish("other.example", RecordType::Address, "10.0.0.3", 300)
            .await
            .unwrap();

        assert_eq!(
            substrate.enumerate("tuple").await.unwrap(),
            vec!["a.music.tuple".to_string(), "b.music.tuple".to_string()]
        );
    }

    #[tokio::test]
    async fn wildcard_query_requires_native_mode() {
        let plain = MemorySubstrate::new();
        assert!(matches!(
            plain.query("*.music.tuple", RecordType::Address).await,
            Err(SubstrateError::Unsupported(_))
        ));

        let native = MemorySubstrate::with_native_wildcards();
        native
            .publish("a.music.tuple", RecordType::Address, "10.0.0.1", 300)
            .await
            .unwrap();
        native
            .publish("b.jazz.tuple", RecordType::Address, "10.0.0.2", 300)
            .await
            .unwrap();

        let records = native
            .query("*.music.tuple", RecordType::Address)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "a.music.tuple");
    }
}
