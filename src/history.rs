//! Undo history.

use crate::operations::{Operation, OperationKind};

/// LIFO stack of applied, reversible operations.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<Operation>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an applied operation.
    ///
    /// Only reversible operations belong here; `List` and `Undo` are never
    /// recorded.
    pub fn push(&mut self, operation: Operation) {
        debug_assert!(
            operation.is_reversible(),
            "{} is not reversible",
            operation.kind()
        );
        self.entries.push(operation);
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Option<Operation> {
        self.entries.pop()
    }

    /// Most recent entry, if any.
    pub fn peek(&self) -> Option<&Operation> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kinds of the recorded operations, oldest first.
    pub fn kinds(&self) -> Vec<OperationKind> {
        self.entries.iter().map(Operation::kind).collect()
    }
}
