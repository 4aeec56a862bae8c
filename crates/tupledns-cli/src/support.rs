use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use tupledns_core::{CapabilitySet, NodeRecord, RangeSpec, TupleError};
use tupledns_engine::{FindResult, TupleDns};
use tupledns_substrate::MemorySubstrate;

/// One registered node as stored in the universe file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseEntry {
    pub coordinate: String,
    pub address: IpAddr,
    #[serde(default)]
    pub capabilities: Vec<String>,
    pub ttl: u32,
}

/// Load the universe file; a missing file is an empty universe.
pub fn load_universe_or_exit(path: &Path) -> Vec<UniverseEntry> {
    if !path.exists() {
        return Vec::new();
    }
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        std::process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("error: failed to parse {}: {e}", path.display());
        std::process::exit(1);
    })
}

pub fn save_universe_or_exit(path: &Path, entries: &[UniverseEntry]) {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(e) = fs::create_dir_all(parent)
    {
        eprintln!("error: failed to create {}: {e}", parent.display());
        std::process::exit(1);
    }
    let text = serde_json::to_string_pretty(entries).unwrap_or_else(|e| {
        eprintln!("error: failed to serialize universe: {e}");
        std::process::exit(1);
    });
    if let Err(e) = fs::write(path, text) {
        eprintln!("error: failed to write {}: {e}", path.display());
        std::process::exit(1);
    }
}

pub fn runtime_or_exit() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        })
}

pub fn capability_set_or_exit(tags: &[String]) -> CapabilitySet {
    CapabilitySet::from_tags(tags).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

/// Parse `--range bpm=110..130` and `--set genre=ambient,jazz` flags.
pub fn range_spec_or_exit(ranges: &[String], sets: &[String]) -> RangeSpec {
    let mut spec = RangeSpec::new();
    for flag in ranges {
        let (dimension, bounds) = split_flag_or_exit(flag, "--range");
        let Some((min, max)) = bounds.split_once("..") else {
            eprintln!("error: --range wants dimension=min..max, got {flag:?}");
            std::process::exit(1);
        };
        let min = parse_bound_or_exit(min, flag);
        let max = parse_bound_or_exit(max, flag);
        spec = spec.interval(dimension, min, max);
    }
    for flag in sets {
        let (dimension, values) = split_flag_or_exit(flag, "--set");
        spec = spec.values(dimension, values.split(','));
    }
    spec
}

fn split_flag_or_exit<'a>(flag: &'a str, option: &str) -> (&'a str, &'a str) {
    flag.split_once('=').unwrap_or_else(|| {
        eprintln!("error: {option} wants dimension=value, got {flag:?}");
        std::process::exit(1);
    })
}

fn parse_bound_or_exit(bound: &str, flag: &str) -> i64 {
    bound.parse().unwrap_or_else(|_| {
        eprintln!("error: bound {bound:?} in {flag:?} is not an integer");
        std::process::exit(1);
    })
}

/// Build an engine handle over a substrate seeded from the universe.
pub async fn engine_over_universe_or_exit(
    entries: &[UniverseEntry],
    native_wildcards: bool,
) -> TupleDns {
    let substrate = if native_wildcards {
        MemorySubstrate::with_native_wildcards()
    } else {
        MemorySubstrate::new()
    };
    let dns = TupleDns::new(Arc::new(substrate));
    for entry in entries {
        if let Err(e) = register_entry(&dns, entry).await {
            eprintln!("error: universe entry {}: {e}", entry.coordinate);
            std::process::exit(1);
        }
    }
    dns
}

pub async fn register_entry(dns: &TupleDns, entry: &UniverseEntry) -> Result<(), TupleError> {
    let capabilities = CapabilitySet::from_tags(&entry.capabilities)?;
    dns.register(&entry.coordinate, entry.address, &capabilities, entry.ttl)
        .await
}

fn node_payload(node: &NodeRecord) -> Value {
    json!({
        "coordinate": node.coordinate.to_string(),
        "address": node.address.to_string(),
        "capabilities": node.capabilities.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        "ttl": node.ttl,
        "last_seen": node.last_seen.to_rfc3339(),
    })
}

pub fn print_find_result(query: &str, result: &FindResult, json_output: bool) {
    if json_output {
        let payload = json!({
            "query": query,
            "nodes": result.nodes.iter().map(node_payload).collect::<Vec<_>>(),
            "queries": result.queries,
            "elapsed_ms": result.elapsed.as_millis() as u64,
            "failures": result
                .failures
                .iter()
                .map(|f| json!({ "name": f.name, "error": f.error.to_string() }))
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("tupledns find {query}");
        println!("  Nodes: {}", result.nodes.len());
        for node in &result.nodes {
            let tags: Vec<&str> = node.capabilities.iter().map(|c| c.as_str()).collect();
            println!("    {} {} [{}]", node.coordinate, node.address, tags.join(","));
        }
        println!("  Sub-queries: {}", result.queries);
        println!("  Elapsed: {:?}", result.elapsed);
        if !result.failures.is_empty() {
            println!("  Failures: {}", result.failures.len());
            for failure in &result.failures {
                println!("    {}: {}", failure.name, failure.error);
            }
        }
    }
}
