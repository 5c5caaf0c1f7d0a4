//! In-memory record store.
//!
//! Records keep insertion order and are addressed by 0-based index
//! internally; [`Position`] is the 1-based form shown to users.

use crate::error::{Result, StoreError};
use crate::types::{Position, Record, FIELD_COUNT};

/// Ordered, index-addressable collection of records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records` in order.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Build a store from the line encoding.
    ///
    /// Trailing whitespace is trimmed and blank lines are skipped. Any other
    /// line must hold exactly three non-empty fields.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim_end();
            if line.is_empty() {
                continue;
            }
            let record = Record::parse_line(line).ok_or_else(|| StoreError::InvalidFormat {
                line: i + 1,
                reason: format!("expected {} space-separated fields, got {:?}", FIELD_COUNT, line),
            })?;
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Encode every record as a line, in order.
    pub fn to_lines(&self) -> Vec<String> {
        self.records.iter().map(Record::to_line).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Read-only view of the full collection.
    pub fn entries(&self) -> &[Record] {
        &self.records
    }

    /// Append a record, returning its position.
    pub fn add(&mut self, record: Record) -> Position {
        self.records.push(record);
        Position(self.records.len())
    }

    /// Replace the fields of the record at `index`.
    ///
    /// `fields` holds one to three values in field order; an empty value
    /// leaves that field untouched.
    pub fn update<S: AsRef<str>>(&mut self, index: usize, fields: &[S]) -> Result<()> {
        if fields.is_empty() || fields.len() > FIELD_COUNT {
            return Err(StoreError::InvalidArity {
                operation: "update",
                expected: "1 to 3 fields",
                got: fields.len(),
            });
        }
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))?;

        for (slot, value) in fields.iter().enumerate() {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }
            if let Some(field) = record.field_mut(slot) {
                *field = value.to_string();
            }
        }
        Ok(())
    }

    /// Remove and return the record at `index`, closing the gap.
    pub fn delete(&mut self, index: usize) -> Result<Record> {
        if index >= self.records.len() {
            return Err(out_of_range(index, self.records.len()));
        }
        Ok(self.records.remove(index))
    }

    /// Insert `record` at `index`, shifting later records up.
    pub fn insert_at(&mut self, index: usize, record: Record) -> Result<()> {
        if index > self.records.len() {
            return Err(out_of_range(index, self.records.len()));
        }
        self.records.insert(index, record);
        Ok(())
    }

    /// Numbered view of the store, starting at position 1.
    pub fn list(&self) -> Listing<'_> {
        Listing {
            inner: self.records.iter().enumerate(),
        }
    }
}

fn out_of_range(index: usize, len: usize) -> StoreError {
    StoreError::OutOfRange {
        position: Position::from_index(index).0 as i64,
        len,
    }
}

/// Iterator over `(position, record)` pairs; clone it to restart.
#[derive(Clone, Debug)]
pub struct Listing<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Record>>,
}

impl<'a> Iterator for Listing<'a> {
    type Item = (Position, &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, record)| (Position::from_index(index), record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Listing<'_> {}
