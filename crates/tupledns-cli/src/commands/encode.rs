use serde_json::json;
use tupledns_core::encode_coordinate;

pub fn run(labels: Vec<String>, json_output: bool) {
    let coordinate = encode_coordinate(&labels).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    if json_output {
        let payload = json!({ "labels": labels, "coordinate": coordinate });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("{coordinate}");
    }
}
