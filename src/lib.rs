//! # recordbook
//!
//! A batch editor for flat, three-field records with command-history undo.
//!
//! ## Core Concepts
//!
//! - **Records**: `{identifier, attribute, contact}` triples, one per line
//! - **Operations**: add, update, delete, list and undo, each validating its
//!   own parameter string before touching the store
//! - **History**: applied add/update/delete operations, newest on top; every
//!   undo pops and reverses exactly one
//! - **Runner**: applies a batch in order and reports every operation,
//!   skipping the ones that fail
//!
//! ## Example
//!
//! ```
//! use recordbook::{Operation, Runner};
//!
//! let mut runner = Runner::default();
//! let report = runner.run(vec![
//!     Operation::add("NAME1 name2 email@email.com"),
//!     Operation::update("10.6 jean luc jean.luc@domain.com"),
//!     Operation::list(),
//! ]);
//!
//! assert_eq!(report.rejected_count(), 1);
//! assert_eq!(runner.store().to_lines(), vec!["Name1 Name2 email@email.com"]);
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod operations;
pub mod runner;
pub mod script;
pub mod session;
pub mod storage;
pub mod store;
pub mod types;
pub mod validate;

// Re-exports
pub use config::EngineConfig;
pub use error::{ErrorKind, Result, StoreError};
pub use history::History;
pub use operations::{Effect, ListedRecord, Operation, OperationKind, Phase, Reversal};
pub use runner::{run, Outcome, OutcomeStatus, RunReport, Runner};
pub use script::{load_script, parse_json, parse_script, OperationRequest};
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Listing, RecordStore};
pub use types::*;
pub use validate::{capitalise, validate_email, validate_token};
