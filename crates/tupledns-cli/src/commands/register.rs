use crate::support::{
    UniverseEntry, load_universe_or_exit, register_entry, runtime_or_exit, save_universe_or_exit,
};
use serde_json::json;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tupledns_engine::TupleDns;
use tupledns_substrate::MemorySubstrate;

pub fn run(
    coordinate: String,
    universe: PathBuf,
    address: IpAddr,
    capabilities: Vec<String>,
    ttl: u32,
    json_output: bool,
) {
    let entry = UniverseEntry {
        coordinate: coordinate.clone(),
        address,
        capabilities,
        ttl,
    };

    // Run the entry through the engine's own validation path before
    // touching the file.
    let runtime = runtime_or_exit();
    runtime.block_on(async {
        let dns = TupleDns::new(Arc::new(MemorySubstrate::new()));
        if let Err(e) = register_entry(&dns, &entry).await {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    });

    let mut entries = load_universe_or_exit(&universe);
    let replaced = entries.iter().any(|e| e.coordinate == coordinate);
    entries.retain(|e| e.coordinate != coordinate);
    entries.push(entry);
    save_universe_or_exit(&universe, &entries);

    if json_output {
        let payload = json!({
            "coordinate": coordinate,
            "universe": universe.display().to_string(),
            "replaced": replaced,
            "nodes": entries.len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "{} {coordinate} in {}",
            if replaced { "replaced" } else { "registered" },
            universe.display()
        );
    }
}
