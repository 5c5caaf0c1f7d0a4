//! Sequential batch execution with per-operation error isolation.

use crate::error::{ErrorKind, Result};
use crate::history::History;
use crate::operations::{Effect, Operation, OperationKind};
use crate::store::RecordStore;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// What happened to one operation of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Applied { effect: Effect },
    Rejected { error: ErrorKind, message: String },
}

/// Reported result of one operation, in batch order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// 1-based position of the operation in the batch.
    pub sequence: usize,
    pub operation: OperationKind,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, OutcomeStatus::Applied { .. })
    }

    pub fn effect(&self) -> Option<&Effect> {
        match &self.status {
            OutcomeStatus::Applied { effect } => Some(effect),
            OutcomeStatus::Rejected { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.status {
            OutcomeStatus::Applied { .. } => None,
            OutcomeStatus::Rejected { error, .. } => Some(*error),
        }
    }
}

/// One-line feedback for the operation.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            OutcomeStatus::Applied { effect } => write!(f, "{effect}"),
            OutcomeStatus::Rejected { message, .. } => {
                write!(f, "Error: {} not successful: {message}", self.operation)
            }
        }
    }
}

/// Outcomes of a whole batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.len() - self.applied_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> + '_ {
        self.outcomes.iter()
    }

    /// Error kinds of rejected operations, in batch order.
    pub fn errors(&self) -> Vec<ErrorKind> {
        self.outcomes.iter().filter_map(Outcome::error_kind).collect()
    }

    /// One feedback line per operation.
    pub fn lines(&self) -> Vec<String> {
        self.outcomes.iter().map(Outcome::to_string).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Apply `operations` in order against `store`.
///
/// A rejected operation is reported and skipped; it never reaches `history`
/// and never stops the batch. Applied reversible operations are pushed onto
/// `history`, so a later `Undo` in the same batch can reverse them.
pub fn run<I>(operations: I, store: &mut RecordStore, history: &mut History) -> RunReport
where
    I: IntoIterator<Item = Operation>,
{
    let mut report = RunReport::default();

    for (i, mut op) in operations.into_iter().enumerate() {
        let sequence = i + 1;
        let kind = op.kind();

        let status = match op.apply(store, history) {
            Ok(effect) => {
                debug!(sequence, operation = %kind, %effect, "operation applied");
                if op.is_reversible() {
                    history.push(op);
                }
                OutcomeStatus::Applied { effect }
            }
            Err(e) => {
                warn!(sequence, operation = %kind, error = %e, "operation rejected");
                OutcomeStatus::Rejected {
                    error: e.kind(),
                    message: e.to_string(),
                }
            }
        };

        report.outcomes.push(Outcome {
            sequence,
            operation: kind,
            status,
        });
    }

    debug!(
        applied = report.applied_count(),
        rejected = report.rejected_count(),
        history = history.len(),
        "batch finished"
    );
    report
}

/// Owns a record store and its undo history across batches.
#[derive(Clone, Debug, Default)]
pub struct Runner {
    store: RecordStore,
    history: History,
}

impl Runner {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            history: History::new(),
        }
    }

    /// Run a batch. History carries over from earlier batches.
    pub fn run<I>(&mut self, operations: I) -> RunReport
    where
        I: IntoIterator<Item = Operation>,
    {
        run(operations, &mut self.store, &mut self.history)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }
}
