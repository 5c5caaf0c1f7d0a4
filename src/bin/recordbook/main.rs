//! recordbook CLI
//!
//! Command-line front-end for running operation batches against a record file.

use clap::{Args, Parser, Subcommand, ValueEnum};
use recordbook::config::{EngineConfig, DATA_PATH_ENV, DEFAULT_DATA_FILE};
use recordbook::logging::{self, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "recordbook")]
#[command(about = "recordbook - batch record editor with undo", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Record file to load and save
    #[arg(long, global = true, env = DATA_PATH_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Fail instead of creating the record file when it is missing
    #[arg(long, global = true)]
    pub no_create: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Off)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
    Off,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Profile::Pretty,
            LogFormat::Json => Profile::Json,
            LogFormat::Off => Profile::Off,
        }
    }
}

impl GlobalArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            data_path: self.data.clone(),
            create_if_missing: !self.no_create,
            log_profile: self.log_format.into(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run an operation script (text, or JSON with a .json extension)
    Run(commands::run::RunArgs),
    /// Run operations given on the command line
    Exec(commands::exec::ExecArgs),
    /// Print the stored records
    List,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.global.config();
    logging::init(config.log_profile);

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(&config, args),
        Commands::Exec(args) => commands::exec::execute(&config, args),
        Commands::List => commands::list::execute(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
