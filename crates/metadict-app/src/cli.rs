use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Look up words across every registered dictionary engine at once
#[derive(Parser, Debug)]
#[command(name = "metadict", version, about)]
pub struct Cli {
    /// JSON config file. Defaults to ./config.json when present, otherwise
    /// METADICT_* environment variables are used.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Run engine calls one at a time in plan order
    #[arg(long, global = true)]
    pub sequential: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a word or phrase and print the merged response as JSON
    Query {
        /// Dictionaries, comma separated: `de-en` (both ways), `de>en` or `de`
        dictionaries: String,

        /// Word or phrase to look up
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Include per-step diagnostics with timings
        #[arg(short, long)]
        diagnostics: bool,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Run the self-tests declared by the registered engines
    SelfTest {
        /// Only test the engine with this name
        #[arg(short, long)]
        engine: Option<String>,
    },

    /// List registered engines and their capabilities
    Engines,
}
