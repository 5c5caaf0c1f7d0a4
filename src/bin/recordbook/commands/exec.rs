//! Exec command
//!
//! Usage: recordbook exec "add NAME1 name2 email@email.com" "list" [--json] [--dry-run]

use super::{run_batch, BatchOptions};
use clap::Args;
use recordbook::config::EngineConfig;
use recordbook::script::parse_line;
use recordbook::Result;

#[derive(Debug, Args)]
pub struct ExecArgs {
    /// Operations, one per argument, in script syntax
    #[arg(required = true)]
    pub operations: Vec<String>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Run without saving the result
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute exec command
pub fn execute(config: &EngineConfig, args: ExecArgs) -> Result<()> {
    let mut operations = Vec::with_capacity(args.operations.len());
    for (i, line) in args.operations.iter().enumerate() {
        if let Some(op) = parse_line(line, i + 1)? {
            operations.push(op);
        }
    }
    run_batch(
        config,
        operations,
        BatchOptions {
            json: args.json,
            dry_run: args.dry_run,
        },
    )
}
