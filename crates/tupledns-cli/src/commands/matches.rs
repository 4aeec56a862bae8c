use serde_json::json;
use tupledns_core::match_pattern;

pub fn run(coordinate: String, pattern: String, json_output: bool) {
    let matched = match_pattern(&coordinate, &pattern);
    if json_output {
        let payload = json!({
            "coordinate": coordinate,
            "pattern": pattern,
            "matches": matched,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("{}", if matched { "match" } else { "no match" });
    }
    if !matched {
        std::process::exit(1);
    }
}
