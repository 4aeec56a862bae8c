//! TupleDNS CLI: the `tupledns` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { coordinate, json } => commands::validate::run(coordinate, json),

        Commands::Encode { labels, json } => commands::encode::run(labels, json),

        Commands::Decode { coordinate, json } => commands::decode::run(coordinate, json),

        Commands::Match {
            coordinate,
            pattern,
            json,
        } => commands::matches::run(coordinate, pattern, json),

        Commands::Register {
            coordinate,
            universe,
            address,
            capabilities,
            ttl,
            json,
        } => commands::register::run(coordinate, universe, address, capabilities, ttl, json),

        Commands::Unregister {
            coordinate,
            universe,
            json,
        } => commands::unregister::run(coordinate, universe, json),

        Commands::Find {
            pattern,
            universe,
            capabilities,
            native_wildcards,
            json,
        } => commands::find::run(pattern, universe, capabilities, native_wildcards, json),

        Commands::FindRange {
            template,
            universe,
            ranges,
            sets,
            capabilities,
            json,
        } => commands::find_range::run(template, universe, ranges, sets, capabilities, json),
    }
}
