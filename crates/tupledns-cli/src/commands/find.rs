use crate::support::{
    capability_set_or_exit, engine_over_universe_or_exit, load_universe_or_exit, print_find_result,
    runtime_or_exit,
};
use std::path::PathBuf;

pub fn run(
    pattern: String,
    universe: PathBuf,
    capabilities: Vec<String>,
    native_wildcards: bool,
    json_output: bool,
) {
    let required = capability_set_or_exit(&capabilities);
    let entries = load_universe_or_exit(&universe);

    let runtime = runtime_or_exit();
    let result = runtime.block_on(async {
        let dns = engine_over_universe_or_exit(&entries, native_wildcards).await;
        dns.find_with_capabilities(&pattern, &required).await
    });

    match result {
        Ok(result) => print_find_result(&pattern, &result, json_output),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
