use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Render loan pipeline queries into the JSON request body the pipeline API expects
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a request from a TOML query definition and print its JSON
    Render {
        /// Query definition file
        #[arg(env = "PIPELINE_QUERY_FILE")]
        file: PathBuf,

        /// Indent the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Also write the JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the wire tokens accepted for every enumeration
    Tokens,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
