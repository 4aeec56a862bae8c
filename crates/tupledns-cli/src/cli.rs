use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tupledns",
    about = "TupleDNS: register and discover nodes in a multidimensional coordinate space",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether text is a well-formed tuple coordinate
    Validate {
        coordinate: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Join semantic labels into a coordinate (suffix appended)
    Encode {
        /// Semantic labels, in order (e.g. ambient 120 london music)
        #[arg(required = true)]
        labels: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a coordinate back into its semantic labels
    Decode {
        coordinate: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Test a coordinate against a wildcard pattern
    Match {
        coordinate: String,
        pattern: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a node in the universe file
    Register {
        coordinate: String,

        /// Path to the universe file
        #[arg(long, default_value = ".tupledns/universe.json")]
        universe: PathBuf,

        /// Network address the node answers on
        #[arg(long)]
        address: IpAddr,

        /// Capability tag (repeatable)
        #[arg(long = "cap")]
        capabilities: Vec<String>,

        /// Record TTL in seconds
        #[arg(long, default_value_t = 300)]
        ttl: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw a node from the universe file
    Unregister {
        coordinate: String,

        /// Path to the universe file
        #[arg(long, default_value = ".tupledns/universe.json")]
        universe: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Discover nodes matching a wildcard pattern
    Find {
        pattern: String,

        /// Path to the universe file
        #[arg(long, default_value = ".tupledns/universe.json")]
        universe: PathBuf,

        /// Required capability tag (repeatable, conjunctive)
        #[arg(long = "cap")]
        capabilities: Vec<String>,

        /// Answer wildcard queries natively instead of decomposing
        #[arg(long)]
        native_wildcards: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Discover nodes through a range-bounded template
    FindRange {
        /// Pattern template with placeholders, e.g. "{genre}.{bpm}.test.music.tuple"
        template: String,

        /// Path to the universe file
        #[arg(long, default_value = ".tupledns/universe.json")]
        universe: PathBuf,

        /// Interval constraint, e.g. --range bpm=110..130 (repeatable)
        #[arg(long = "range")]
        ranges: Vec<String>,

        /// Value-set constraint, e.g. --set genre=ambient,jazz (repeatable)
        #[arg(long = "set")]
        sets: Vec<String>,

        /// Required capability tag (repeatable, conjunctive)
        #[arg(long = "cap")]
        capabilities: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
