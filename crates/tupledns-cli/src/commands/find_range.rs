use crate::support::{
    capability_set_or_exit, engine_over_universe_or_exit, load_universe_or_exit, print_find_result,
    range_spec_or_exit, runtime_or_exit,
};
use std::path::PathBuf;

pub fn run(
    template: String,
    universe: PathBuf,
    ranges: Vec<String>,
    sets: Vec<String>,
    capabilities: Vec<String>,
    json_output: bool,
) {
    let spec = range_spec_or_exit(&ranges, &sets);
    let required = capability_set_or_exit(&capabilities);
    let entries = load_universe_or_exit(&universe);

    let runtime = runtime_or_exit();
    let result = runtime.block_on(async {
        let dns = engine_over_universe_or_exit(&entries, false).await;
        dns.find_range_with_capabilities(&template, &spec, &required)
            .await
    });

    match result {
        Ok(result) => print_find_result(&template, &result, json_output),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
