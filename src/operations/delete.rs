//! Delete a record by position.

use super::{parse_position, resolve_position, tokenize, Effect, OperationKind, Phase, Reversal};
use crate::error::{Result, StoreError};
use crate::store::RecordStore;
use crate::types::{Position, Record};

/// The removed record and where it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteSnapshot {
    pub index: usize,
    pub record: Record,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteOperation {
    params: String,
    phase: Phase<DeleteSnapshot>,
}

impl DeleteOperation {
    pub fn new(params: impl Into<String>) -> Self {
        Self {
            params: params.into(),
            phase: Phase::Constructed,
        }
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    pub fn phase(&self) -> &Phase<DeleteSnapshot> {
        &self.phase
    }

    /// The requested 1-based position, not yet bounds-checked.
    pub fn parse(&self) -> Result<i64> {
        let tokens = tokenize(&self.params);
        if tokens.len() > 1 {
            return Err(StoreError::InvalidArity {
                operation: "delete",
                expected: "a single index",
                got: tokens.len(),
            });
        }
        parse_position(tokens.first().copied().unwrap_or(""))
    }

    pub(crate) fn apply(&mut self, store: &mut RecordStore) -> Result<Effect> {
        self.phase.ensure_constructed(OperationKind::Delete)?;
        let index = resolve_position(self.parse()?, store)?;
        let record = store.delete(index)?;
        self.phase = Phase::Applied(DeleteSnapshot {
            index,
            record: record.clone(),
        });
        Ok(Effect::Deleted {
            position: Position::from_index(index),
            record,
        })
    }

    /// Put the removed record back where it was.
    pub(crate) fn reverse(&mut self, store: &mut RecordStore) -> Result<Reversal> {
        let DeleteSnapshot { index, record } = self.phase.applied(OperationKind::Delete)?.clone();
        store.insert_at(index, record.clone())?;
        self.phase.mark_reversed();
        Ok(Reversal::Reinserted {
            position: Position::from_index(index),
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample() -> RecordStore {
        RecordStore::from_records(vec![
            Record::new("Ann", "Lee", "ann@lee.com"),
            Record::new("Bob", "Ray", "bob@ray.com"),
            Record::new("Cat", "Moe", "cat@moe.com"),
        ])
    }

    #[test]
    fn test_delete_middle_and_reverse() {
        let mut store = sample();
        let mut op = DeleteOperation::new("2");

        let effect = op.apply(&mut store).unwrap();
        assert_eq!(
            effect,
            Effect::Deleted {
                position: Position(2),
                record: Record::new("Bob", "Ray", "bob@ray.com"),
            }
        );
        assert_eq!(store.to_lines(), vec!["Ann Lee ann@lee.com", "Cat Moe cat@moe.com"]);

        op.reverse(&mut store).unwrap();
        assert_eq!(store, sample());
    }

    #[test]
    fn test_delete_invalid_index() {
        let mut store = sample();
        for params in ["1.2", "one", ""] {
            let err = DeleteOperation::new(params).apply(&mut store).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIndex, "params: {params:?}");
        }
        assert_eq!(store, sample());
    }

    #[test]
    fn test_delete_extra_tokens() {
        let mut store = sample();
        let err = DeleteOperation::new("1 2").apply(&mut store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArity);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut empty = RecordStore::new();
        let err = DeleteOperation::new("1").apply(&mut empty).unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange { position: 1, len: 0 }));

        let mut store = sample();
        for params in ["0", "4", "-3"] {
            let err = DeleteOperation::new(params).apply(&mut store).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange, "params: {params:?}");
        }
        assert_eq!(store, sample());
    }
}
