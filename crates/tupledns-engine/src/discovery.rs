//! Query planning, concurrent fan-out, and result aggregation.
//!
//! One logical `find` call becomes N concrete sub-queries:
//!
//! 1. a wildcard-free pattern is its own single sub-query;
//! 2. a wildcard pattern against a substrate with native wildcard
//!    support is one wildcard sub-query;
//! 3. otherwise the zone is enumerated once and filtered through the
//!    pattern matcher, yielding one sub-query per surviving name.
//!
//! Sub-queries run concurrently behind a semaphore of
//! `max_concurrent` permits, each under its own deadline. The calling
//! task is the single aggregation point: it re-verifies every raw
//! match against the pattern (the substrate may over-match), applies
//! the capability and interval filters, dedupes by coordinate, and
//! records per-sub-query failures. Partial failure is a successful
//! result with a non-empty failure list; the call as a whole fails
//! only when every sub-query failed.

use crate::config::EngineConfig;
use crate::registration::map_substrate_error;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use tupledns_core::{
    CapabilitySet, Coordinate, NodeRecord, Pattern, RangeExpansion, TUPLE_SUFFIX, TupleError,
};
use tupledns_substrate::{RawRecord, RecordType, Substrate, SubstrateError, parse_capability_record};

/// One failed sub-query inside an otherwise successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubQueryFailure {
    /// The queried name (may contain wildcards).
    pub name: String,
    pub error: TupleError,
}

/// Aggregated outcome of one `find`/`find_range` call.
///
/// Zero nodes with zero failures is a valid "nothing matched"
/// outcome, distinct from a call that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindResult {
    /// Matched nodes, deduplicated by coordinate.
    pub nodes: Vec<NodeRecord>,

    /// Concrete sub-queries issued against the substrate.
    pub queries: usize,

    /// Wall-clock time for the whole call.
    pub elapsed: Duration,

    /// Sub-queries that failed while others succeeded.
    pub failures: Vec<SubQueryFailure>,
}

pub(crate) async fn run_find(
    substrate: &Arc<dyn Substrate>,
    config: &EngineConfig,
    patterns: &[Pattern],
    required: &CapabilitySet,
    expansion: Option<&RangeExpansion>,
) -> Result<FindResult, TupleError> {
    let started = Instant::now();
    let sub_queries = plan(substrate, patterns).await?;
    debug!(
        patterns = patterns.len(),
        sub_queries = sub_queries.len(),
        "planned discovery"
    );

    if sub_queries.is_empty() {
        return Ok(FindResult {
            nodes: Vec::new(),
            queries: 0,
            elapsed: started.elapsed(),
            failures: Vec::new(),
        });
    }

    let queries = sub_queries.len();
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent));
    let mut join_set = JoinSet::new();
    for name in sub_queries {
        let substrate = Arc::clone(substrate);
        let semaphore = Arc::clone(&semaphore);
        let deadline = config.query_timeout;
        join_set.spawn(async move {
            let permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        name,
                        Err(TupleError::QueryFailed("worker pool closed".to_string())),
                    );
                }
            };
            let outcome = match tokio::time::timeout(deadline, fetch(&*substrate, &name)).await {
                Ok(result) => result,
                Err(_) => Err(TupleError::Timeout),
            };
            drop(permit);
            (name, outcome)
        });
    }

    // Single ownership point for the per-call accumulator.
    let mut merged: BTreeMap<Coordinate, NodeRecord> = BTreeMap::new();
    let mut failures = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((_, Ok(nodes))) => {
                for node in nodes {
                    if !patterns.iter().any(|p| p.matches(&node.coordinate)) {
                        // Defensive re-check: the substrate over-matched.
                        continue;
                    }
                    if let Some(expansion) = expansion
                        && !expansion.retain(&node.coordinate)
                    {
                        continue;
                    }
                    if !node.capabilities.contains_all(required) {
                        continue;
                    }
                    merged.entry(node.coordinate.clone()).or_insert(node);
                }
            }
            Ok((name, Err(error))) => {
                warn!(sub_query = %name, %error, "sub-query failed");
                failures.push(SubQueryFailure { name, error });
            }
            Err(join_error) => {
                failures.push(SubQueryFailure {
                    name: "sub-query task".to_string(),
                    error: TupleError::QueryFailed(join_error.to_string()),
                });
            }
        }
    }

    if failures.len() == queries {
        if failures.iter().all(|f| f.error == TupleError::Timeout) {
            return Err(TupleError::Timeout);
        }
        return Err(TupleError::QueryFailed(format!(
            "all {queries} sub-queries failed"
        )));
    }

    Ok(FindResult {
        nodes: merged.into_values().collect(),
        queries,
        elapsed: started.elapsed(),
        failures,
    })
}

/// Turn the logical patterns into the concrete sub-query names.
async fn plan(
    substrate: &Arc<dyn Substrate>,
    patterns: &[Pattern],
) -> Result<Vec<String>, TupleError> {
    let mut names = BTreeSet::new();
    let needs_enumeration =
        !substrate.wildcard_queries() && patterns.iter().any(|p| !p.is_concrete());
    let zone_names = if needs_enumeration {
        match substrate.enumerate(TUPLE_SUFFIX).await {
            Ok(zone_names) => zone_names,
            Err(error) => return Err(map_substrate_error(error)),
        }
    } else {
        Vec::new()
    };

    for pattern in patterns {
        if pattern.is_concrete() || substrate.wildcard_queries() {
            names.insert(pattern.to_string());
        } else {
            for name in &zone_names {
                if let Ok(coordinate) = Coordinate::parse(name)
                    && pattern.matches(&coordinate)
                {
                    names.insert(name.clone());
                }
            }
        }
    }
    Ok(names.into_iter().collect())
}

/// Resolve one sub-query into node records.
///
/// A `NotFound` answer means no node lives there and yields an empty
/// list; undecodable record payloads fail the sub-query.
async fn fetch(substrate: &dyn Substrate, name: &str) -> Result<Vec<NodeRecord>, TupleError> {
    let address_records = match substrate.query(name, RecordType::Address).await {
        Ok(records) => records,
        Err(SubstrateError::NotFound) => return Ok(Vec::new()),
        Err(error) => return Err(map_fetch_error(error)),
    };

    // A wildcard sub-query answers for several concrete names.
    let mut by_name: BTreeMap<String, RawRecord> = BTreeMap::new();
    for record in address_records {
        by_name.entry(record.name.clone()).or_insert(record);
    }

    let mut nodes = Vec::with_capacity(by_name.len());
    for (owner, address_record) in by_name {
        let coordinate = Coordinate::parse(&owner).map_err(|e| {
            TupleError::QueryFailed(format!("substrate answered with a bad name {owner:?}: {e}"))
        })?;
        let address = address_record.value.parse().map_err(|_| {
            TupleError::QueryFailed(format!(
                "address record for {owner} is not an IP: {:?}",
                address_record.value
            ))
        })?;

        let capabilities = match substrate.query(&owner, RecordType::Capabilities).await {
            Ok(records) => match records.first() {
                Some(record) => parse_capability_record(&record.value)?,
                None => CapabilitySet::new(),
            },
            Err(SubstrateError::NotFound) => CapabilitySet::new(),
            Err(error) => return Err(map_fetch_error(error)),
        };

        nodes.push(NodeRecord {
            coordinate,
            address,
            capabilities,
            ttl: address_record.ttl,
            last_seen: Utc::now(),
        });
    }
    Ok(nodes)
}

fn map_fetch_error(error: SubstrateError) -> TupleError {
    match error {
        SubstrateError::Timeout => TupleError::Timeout,
        other => TupleError::QueryFailed(other.to_string()),
    }
}
