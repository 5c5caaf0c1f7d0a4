//! Add a new record at the end of the store.

use super::{tokenize, Effect, OperationKind, Phase, Reversal};
use crate::error::{Result, StoreError};
use crate::store::RecordStore;
use crate::types::{Position, Record, FIELD_COUNT};
use crate::validate::{capitalise, validate_email};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOperation {
    params: String,
    phase: Phase<Position>,
}

impl AddOperation {
    pub fn new(params: impl Into<String>) -> Self {
        Self {
            params: params.into(),
            phase: Phase::Constructed,
        }
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    pub fn phase(&self) -> &Phase<Position> {
        &self.phase
    }

    /// Validate the parameters and build the normalised record.
    pub fn parse(&self) -> Result<Record> {
        let tokens = tokenize(&self.params);
        if tokens.len() != FIELD_COUNT || tokens.iter().any(|t| t.is_empty()) {
            return Err(StoreError::InvalidArity {
                operation: "add",
                expected: "3 fields",
                got: tokens.iter().filter(|t| !t.is_empty()).count(),
            });
        }
        if !validate_email(tokens[2]) {
            return Err(StoreError::InvalidEmail(tokens[2].to_string()));
        }
        Ok(Record::new(
            capitalise(tokens[0]),
            capitalise(tokens[1]),
            tokens[2],
        ))
    }

    pub(crate) fn apply(&mut self, store: &mut RecordStore) -> Result<Effect> {
        self.phase.ensure_constructed(OperationKind::Add)?;
        let record = self.parse()?;
        let position = store.add(record.clone());
        self.phase = Phase::Applied(position);
        Ok(Effect::Added { position, record })
    }

    /// Remove the record at the current end of the store.
    pub(crate) fn reverse(&mut self, store: &mut RecordStore) -> Result<Reversal> {
        self.phase.applied(OperationKind::Add)?;
        let index = store.len().checked_sub(1).ok_or(StoreError::OutOfRange {
            position: 0,
            len: 0,
        })?;
        let record = store.delete(index)?;
        self.phase.mark_reversed();
        Ok(Reversal::Removed {
            position: Position::from_index(index),
            record,
        })
    }
}
