//! Operations over the record store.
//!
//! Each [`Operation`] validates its own parameter string, applies itself to a
//! [`RecordStore`] and, for add/update/delete, can reverse itself from the
//! snapshot it captured while applying. Validation always completes before
//! the store is touched, so a rejected operation leaves no trace.
//!
//! Parameter strings are split on single spaces. Trailing empty tokens are
//! dropped; interior empty tokens are kept, which is how an update skips a
//! field (`"2  Manager"` leaves the identifier of record 2 alone).

mod add;
mod delete;
mod update;

pub use add::AddOperation;
pub use delete::{DeleteOperation, DeleteSnapshot};
pub use update::{UpdateOperation, UpdateRequest, UpdateSnapshot};

use crate::error::{Result, StoreError};
use crate::history::History;
use crate::store::RecordStore;
use crate::types::{Position, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of operation variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Update,
    Delete,
    List,
    Undo,
}

impl OperationKind {
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::List => "list",
            OperationKind::Undo => "undo",
        }
    }

    pub fn is_reversible(self) -> bool {
        matches!(
            self,
            OperationKind::Add | OperationKind::Update | OperationKind::Delete
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle of a reversible operation.
///
/// `S` is the snapshot captured by apply and consumed by reverse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase<S> {
    Constructed,
    Applied(S),
    Reversed(S),
}

impl<S> Phase<S> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Phase::Applied(_))
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, Phase::Reversed(_))
    }

    pub(crate) fn ensure_constructed(&self, kind: OperationKind) -> Result<()> {
        match self {
            Phase::Constructed => Ok(()),
            _ => Err(StoreError::InvalidOperation(format!(
                "{kind} operation has already been applied"
            ))),
        }
    }

    pub(crate) fn applied(&self, kind: OperationKind) -> Result<&S> {
        match self {
            Phase::Applied(snapshot) => Ok(snapshot),
            Phase::Constructed => Err(StoreError::InvalidOperation(format!(
                "{kind} operation has not been applied"
            ))),
            Phase::Reversed(_) => Err(StoreError::InvalidOperation(format!(
                "{kind} operation has already been reversed"
            ))),
        }
    }

    pub(crate) fn mark_reversed(&mut self) {
        if let Phase::Applied(_) = self {
            if let Phase::Applied(snapshot) = std::mem::replace(self, Phase::Constructed) {
                *self = Phase::Reversed(snapshot);
            }
        }
    }
}

/// A numbered record in a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListedRecord {
    pub position: Position,
    pub record: Record,
}

/// Observable result of a successful apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Added {
        position: Position,
        record: Record,
    },
    Updated {
        position: Position,
        before: Record,
        after: Record,
    },
    Deleted {
        position: Position,
        record: Record,
    },
    /// Snapshot of the store at the time of listing.
    Listed {
        entries: Vec<ListedRecord>,
    },
    Undone {
        operation: OperationKind,
        reversal: Reversal,
    },
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Added { position, record } => write!(f, "Added {position}. {record}"),
            Effect::Updated {
                position, after, ..
            } => write!(f, "Updated {position}. {after}"),
            Effect::Deleted { position, record } => write!(f, "Deleted {position}. {record}"),
            Effect::Listed { entries } => match entries.len() {
                1 => write!(f, "Listed 1 record"),
                n => write!(f, "Listed {n} records"),
            },
            Effect::Undone {
                operation,
                reversal,
            } => write!(f, "Undo {operation}: {reversal}"),
        }
    }
}

/// Observable result of a successful reverse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reversal {
    /// An added record was removed again.
    Removed { position: Position, record: Record },
    /// An updated record got its previous fields back.
    Restored { position: Position, record: Record },
    /// A deleted record was put back at its old position.
    Reinserted { position: Position, record: Record },
    /// The operation has nothing to reverse.
    Nothing { operation: OperationKind },
}

impl fmt::Display for Reversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reversal::Removed { position, record } => write!(f, "removed {position}. {record}"),
            Reversal::Restored { position, record } => write!(f, "restored {position}. {record}"),
            Reversal::Reinserted { position, record } => {
                write!(f, "reinserted {position}. {record}")
            }
            Reversal::Nothing { operation } => write!(f, "{operation} cannot be undone"),
        }
    }
}

/// A unit of work over the record store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Add(AddOperation),
    Update(UpdateOperation),
    Delete(DeleteOperation),
    List,
    Undo,
}

impl Operation {
    /// Add a record from `"<identifier> <attribute> <email>"`.
    pub fn add(params: impl Into<String>) -> Self {
        Operation::Add(AddOperation::new(params))
    }

    /// Update from `"<position> <field>[ <field>[ <email>]]"`.
    pub fn update(params: impl Into<String>) -> Self {
        Operation::Update(UpdateOperation::new(params))
    }

    /// Delete from `"<position>"`.
    pub fn delete(params: impl Into<String>) -> Self {
        Operation::Delete(DeleteOperation::new(params))
    }

    pub fn list() -> Self {
        Operation::List
    }

    pub fn undo() -> Self {
        Operation::Undo
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Add(_) => OperationKind::Add,
            Operation::Update(_) => OperationKind::Update,
            Operation::Delete(_) => OperationKind::Delete,
            Operation::List => OperationKind::List,
            Operation::Undo => OperationKind::Undo,
        }
    }

    pub fn is_reversible(&self) -> bool {
        self.kind().is_reversible()
    }

    /// Parameter string, for variants that take one.
    pub fn params(&self) -> Option<&str> {
        match self {
            Operation::Add(op) => Some(op.params()),
            Operation::Update(op) => Some(op.params()),
            Operation::Delete(op) => Some(op.params()),
            Operation::List | Operation::Undo => None,
        }
    }

    /// Apply this operation.
    ///
    /// Only `Undo` touches `history`: it pops the newest entry and reverses
    /// it. If that reversal fails the entry is pushed back.
    pub fn apply(&mut self, store: &mut RecordStore, history: &mut History) -> Result<Effect> {
        match self {
            Operation::Add(op) => op.apply(store),
            Operation::Update(op) => op.apply(store),
            Operation::Delete(op) => op.apply(store),
            Operation::List => Ok(Effect::Listed {
                entries: store
                    .list()
                    .map(|(position, record)| ListedRecord {
                        position,
                        record: record.clone(),
                    })
                    .collect(),
            }),
            Operation::Undo => {
                let mut last = history.pop().ok_or(StoreError::EmptyHistory)?;
                match last.reverse(store) {
                    Ok(reversal) => Ok(Effect::Undone {
                        operation: last.kind(),
                        reversal,
                    }),
                    Err(e) => {
                        history.push(last);
                        Err(e)
                    }
                }
            }
        }
    }

    /// Reverse a previously applied operation.
    ///
    /// `List` and `Undo` have nothing to reverse and report
    /// [`Reversal::Nothing`].
    pub fn reverse(&mut self, store: &mut RecordStore) -> Result<Reversal> {
        match self {
            Operation::Add(op) => op.reverse(store),
            Operation::Update(op) => op.reverse(store),
            Operation::Delete(op) => op.reverse(store),
            Operation::List | Operation::Undo => Ok(Reversal::Nothing {
                operation: self.kind(),
            }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.params() {
            Some(params) => write!(f, "{} {}", self.kind(), params),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// Split a parameter string on single spaces, dropping trailing empties.
pub(crate) fn tokenize(params: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = params.split(' ').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Parse a position token as a signed integer.
pub(crate) fn parse_position(token: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|_| StoreError::InvalidIndex(token.to_string()))
}

/// Resolve a 1-based position against the store, yielding a 0-based index.
pub(crate) fn resolve_position(position: i64, store: &RecordStore) -> Result<usize> {
    let len = store.len();
    match usize::try_from(position) {
        Ok(p) if p >= 1 && p <= len => Ok(p - 1),
        _ => Err(StoreError::OutOfRange { position, len }),
    }
}
