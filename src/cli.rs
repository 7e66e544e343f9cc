use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::ConfiguratorError;

/// packconf - packaging configurator with live pricing
#[derive(Parser)]
#[command(name = "packconf")]
#[command(about = "Configure a packaging order step by step and price it")]
#[command(version)]
pub struct Cli {
    /// Use a catalog JSON file instead of the built-in catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sections, options and quantity tiers
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Price a set of selections and print the order summary
    Quote {
        /// JSON preset of id -> option(s) to start from (defaults otherwise)
        #[arg(short, long)]
        selections: Option<PathBuf>,

        /// Apply a choice as the wizard would: `--set size=m --set premium=window`
        #[arg(long = "set", value_name = "ID=OPTION", value_parser = parse_assignment)]
        set: Vec<Assignment>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a catalog file
    Validate {
        /// Path to catalog file to validate
        file: PathBuf,
    },
    /// Replay a scripted session and report each step
    Replay {
        /// JSON list of actions (select / continue / reopen / wait)
        script: PathBuf,

        /// Auto-advance delay in milliseconds
        #[arg(long, default_value_t = 400)]
        auto_advance_ms: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A `--set ID=OPTION` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: String,
    pub option: String,
}

/// Parse `ID=OPTION`. The option may be empty (clears a scalar) but the id
/// may not.
pub fn parse_assignment(raw: &str) -> Result<Assignment, ConfiguratorError> {
    let (target, option) = raw
        .split_once('=')
        .ok_or_else(|| ConfiguratorError::selection(format!("expected ID=OPTION, got '{}'", raw)))?;
    let target = target.trim();
    if target.is_empty() {
        return Err(ConfiguratorError::selection(format!(
            "missing id in '{}'",
            raw
        )));
    }
    Ok(Assignment {
        target: target.to_string(),
        option: option.trim().to_string(),
    })
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
