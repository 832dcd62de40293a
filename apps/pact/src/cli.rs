//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pact - construct and inspect package manager actions
#[derive(Parser)]
#[command(name = "pact")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Construct and inspect package manager actions")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to a JSON log file
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH", env = "PACT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Construct an object by class name
    ///
    /// Each argument is parsed as JSON; anything that is not valid JSON is
    /// taken as a string. A JSON object {"new": CLASS, "args": [...]}
    /// constructs a nested object, e.g. the options of a FetchAction.
    New {
        /// Class name, e.g. FetchActionOptions
        class: String,

        /// Constructor arguments
        args: Vec<String>,
    },

    /// List constructible classes
    Classes,

    /// Show the effective fetch options
    FetchOptions {
        /// Resume partial downloads
        #[arg(long)]
        safe_resume: bool,

        /// Fetch sources even for packages that do not need them
        #[arg(long)]
        fetch_unneeded: bool,
    },

    /// List repositories that might support an action
    Supports {
        /// Action name: fetch, info or config
        action: String,

        /// Only ask this repository
        #[arg(short, long)]
        repository: Option<String>,
    },
}
