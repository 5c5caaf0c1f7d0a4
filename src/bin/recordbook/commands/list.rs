//! List command
//!
//! Usage: recordbook list

use super::print_store;
use recordbook::config::EngineConfig;
use recordbook::{Result, Session};

/// Execute list command
pub fn execute(config: &EngineConfig) -> Result<()> {
    let session = Session::from_config(config)?;
    print_store(session.store());
    Ok(())
}
