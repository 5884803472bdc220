//! Command-line interface for the escapade demo driver.

use clap::{Parser, Subcommand};

/// Escapade - ordered-input puzzle progression engine
#[derive(Parser, Debug)]
#[command(name = "escapade")]
#[command(about = "Demo driver for the escapade puzzle engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the scripted cellar scenario
    Demo {
        /// Tokens to feed the cellar door, in order (comma separated)
        #[arg(long, value_delimiter = ',')]
        tokens: Option<Vec<String>>,
    },

    /// Validate a JSON file of puzzle definitions
    Check {
        /// Path to the definitions file
        path: std::path::PathBuf,
    },
}
