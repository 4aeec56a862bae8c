use crate::support::{load_universe_or_exit, save_universe_or_exit};
use serde_json::json;
use std::path::PathBuf;
use tupledns_core::Coordinate;

pub fn run(coordinate: String, universe: PathBuf, json_output: bool) {
    if let Err(e) = Coordinate::parse(&coordinate) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let mut entries = load_universe_or_exit(&universe);
    let before = entries.len();
    entries.retain(|e| e.coordinate != coordinate);
    let removed = before != entries.len();
    // Withdrawing an absent coordinate is not an error.
    save_universe_or_exit(&universe, &entries);

    if json_output {
        let payload = json!({
            "coordinate": coordinate,
            "universe": universe.display().to_string(),
            "removed": removed,
            "nodes": entries.len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "{} {coordinate} in {}",
            if removed { "withdrew" } else { "no record for" },
            universe.display()
        );
    }
}
