//! Core types for the record engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fields every stored record carries.
pub const FIELD_COUNT: usize = 3;

/// Separator between fields in the line encoding.
pub const FIELD_DELIMITER: char = ' ';

/// A single flat record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Name or other identifier.
    pub identifier: String,

    /// Attribute such as a role or title.
    pub attribute: String,

    /// Contact email address.
    pub contact: String,
}

impl Record {
    pub fn new(
        identifier: impl Into<String>,
        attribute: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            attribute: attribute.into(),
            contact: contact.into(),
        }
    }

    /// Fields in storage order.
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [&self.identifier, &self.attribute, &self.contact]
    }

    /// Mutable access to the field at `slot` (0-based).
    pub fn field_mut(&mut self, slot: usize) -> Option<&mut String> {
        match slot {
            0 => Some(&mut self.identifier),
            1 => Some(&mut self.attribute),
            2 => Some(&mut self.contact),
            _ => None,
        }
    }

    /// Encode as a single delimited line.
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// Decode a line holding exactly three non-empty fields.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split(FIELD_DELIMITER);
        let identifier = parts.next().filter(|s| !s.is_empty())?;
        let attribute = parts.next().filter(|s| !s.is_empty())?;
        let contact = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(identifier, attribute, contact))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.identifier,
            self.attribute,
            self.contact,
            d = FIELD_DELIMITER
        )
    }
}

/// External, 1-based position of a record in the store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub usize);

impl Position {
    /// Position of the record at internal `index`.
    pub fn from_index(index: usize) -> Self {
        Position(index + 1)
    }

    /// Internal 0-based index, `None` for position 0.
    pub fn index(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({})", self.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}
