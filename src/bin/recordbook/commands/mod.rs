pub mod exec;
pub mod list;
pub mod run;

use recordbook::config::EngineConfig;
use recordbook::{Effect, Operation, RecordStore, Result, RunReport, Session};

/// Options shared by the batch-running commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub json: bool,
    pub dry_run: bool,
}

/// Open the configured record file, run `operations`, report and save.
pub fn run_batch(
    config: &EngineConfig,
    operations: Vec<Operation>,
    options: BatchOptions,
) -> Result<()> {
    let mut session = Session::from_config(config)?;
    let report = session.run(operations);

    if options.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }

    if !options.dry_run {
        session.save()?;
    }
    Ok(())
}

/// One line per operation; listings print their records first.
pub fn print_report(report: &RunReport) {
    for outcome in report.iter() {
        if let Some(Effect::Listed { entries }) = outcome.effect() {
            for entry in entries {
                println!("{}. {}", entry.position, entry.record);
            }
        }
        println!("{}", outcome);
    }
}

pub fn print_store(store: &RecordStore) {
    for (position, record) in store.list() {
        println!("{}. {}", position, record);
    }
}
