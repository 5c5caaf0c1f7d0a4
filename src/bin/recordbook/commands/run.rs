//! Run command
//!
//! Usage: recordbook run <SCRIPT> [--json] [--dry-run]

use super::{run_batch, BatchOptions};
use clap::Args;
use recordbook::config::EngineConfig;
use recordbook::{load_script, Result};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Operation script; `.json` files are read as a JSON batch
    pub script: PathBuf,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Run without saving the result
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute run command
pub fn execute(config: &EngineConfig, args: RunArgs) -> Result<()> {
    let operations = load_script(&args.script)?;
    run_batch(
        config,
        operations,
        BatchOptions {
            json: args.json,
            dry_run: args.dry_run,
        },
    )
}
