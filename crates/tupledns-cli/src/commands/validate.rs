use serde_json::json;
use tupledns_core::validate_coordinate;

pub fn run(coordinate: String, json_output: bool) {
    let valid = validate_coordinate(&coordinate);
    if json_output {
        let payload = json!({ "coordinate": coordinate, "valid": valid });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "{coordinate}: {}",
            if valid { "valid" } else { "invalid" }
        );
    }
    if !valid {
        std::process::exit(1);
    }
}
