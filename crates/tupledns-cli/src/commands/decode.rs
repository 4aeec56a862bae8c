use serde_json::json;
use tupledns_core::decode_coordinate;

pub fn run(coordinate: String, json_output: bool) {
    let labels = decode_coordinate(&coordinate).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    if json_output {
        let payload = json!({ "coordinate": coordinate, "labels": labels });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("{}", labels.join(" "));
    }
}
