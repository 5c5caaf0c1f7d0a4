//! Partial update of an existing record.

use super::{parse_position, resolve_position, tokenize, Effect, OperationKind, Phase, Reversal};
use crate::error::{Result, StoreError};
use crate::store::RecordStore;
use crate::types::{Position, Record, FIELD_COUNT};
use crate::validate::{capitalise, validate_email};

/// Validated update parameters, before they are resolved against a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRequest {
    /// 1-based position as given; not yet bounds-checked.
    pub position: i64,
    /// Replacement values in field order; empty means keep.
    pub fields: Vec<String>,
}

/// State captured before the update, used to restore it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateSnapshot {
    pub index: usize,
    pub before: Record,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateOperation {
    params: String,
    phase: Phase<UpdateSnapshot>,
}

impl UpdateOperation {
    pub fn new(params: impl Into<String>) -> Self {
        Self {
            params: params.into(),
            phase: Phase::Constructed,
        }
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    pub fn phase(&self) -> &Phase<UpdateSnapshot> {
        &self.phase
    }

    /// Check syntax: integer position, 1 to 3 fields, a valid email when all
    /// three fields are given. Fields 1 and 2 come back capitalised.
    pub fn parse(&self) -> Result<UpdateRequest> {
        let tokens = tokenize(&self.params);
        let position = parse_position(tokens.first().copied().unwrap_or(""))?;

        let fields = tokens.get(1..).unwrap_or(&[]);
        if fields.is_empty() || fields.len() > FIELD_COUNT {
            return Err(StoreError::InvalidArity {
                operation: "update",
                expected: "1 to 3 fields after the index",
                got: fields.len(),
            });
        }
        if fields.len() == FIELD_COUNT && !validate_email(fields[2]) {
            return Err(StoreError::InvalidEmail(fields[2].to_string()));
        }

        let fields = fields
            .iter()
            .enumerate()
            .map(|(slot, value)| match slot {
                0 | 1 => capitalise(value),
                _ => value.to_string(),
            })
            .collect();
        Ok(UpdateRequest { position, fields })
    }

    pub(crate) fn apply(&mut self, store: &mut RecordStore) -> Result<Effect> {
        self.phase.ensure_constructed(OperationKind::Update)?;
        let request = self.parse()?;
        let index = resolve_position(request.position, store)?;

        let before = store.entries()[index].clone();
        store.update(index, request.fields.as_slice())?;
        let after = store.entries()[index].clone();

        self.phase = Phase::Applied(UpdateSnapshot {
            index,
            before: before.clone(),
        });
        Ok(Effect::Updated {
            position: Position::from_index(index),
            before,
            after,
        })
    }

    /// Write the full pre-update record back at the same index.
    pub(crate) fn reverse(&mut self, store: &mut RecordStore) -> Result<Reversal> {
        let UpdateSnapshot { index, before } = self.phase.applied(OperationKind::Update)?.clone();
        store.update(index, &before.fields()[..])?;
        self.phase.mark_reversed();
        Ok(Reversal::Restored {
            position: Position::from_index(index),
            record: before,
        })
    }
}
