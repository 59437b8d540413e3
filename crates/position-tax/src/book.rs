//! Operation Book
//!
//! Owns the operation list in insertion order. Drafts are validated before
//! they are stored, so only well-formed operations ever reach the
//! accumulator.

use uuid::Uuid;

use crate::accumulator::accumulate;
use crate::error::{CalculatorError, Result};
use crate::models::{DerivedPoint, Operation};
use crate::validation::OperationDraft;

#[derive(Debug, Clone, Default)]
pub struct OperationBook {
    operations: Vec<Operation>,
}

impl OperationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft and append it under a fresh id.
    pub fn add(&mut self, draft: &OperationDraft) -> Result<&Operation> {
        let valid = draft.validate()?;
        let op = valid.into_operation(Uuid::new_v4());
        tracing::debug!(id = %op.id, kind = %op.kind, date = %op.date, "Operation added");
        self.operations.push(op);
        Ok(&self.operations[self.operations.len() - 1])
    }

    /// Replace every field of an existing operation except its id.
    pub fn edit(&mut self, id: Uuid, draft: &OperationDraft) -> Result<&Operation> {
        let index = self.position(id)?;
        let valid = draft.validate()?;
        self.operations[index] = valid.into_operation(id);
        tracing::debug!(%id, "Operation edited");
        Ok(&self.operations[index])
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Operation> {
        let index = self.position(id)?;
        tracing::debug!(%id, "Operation removed");
        Ok(self.operations.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }

    /// Operations in insertion order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Derived sequence for the current operations, recomputed on each call.
    pub fn points(&self) -> Vec<DerivedPoint> {
        accumulate(&self.operations)
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.operations
            .iter()
            .position(|op| op.id == id)
            .ok_or(CalculatorError::OperationNotFound(id))
    }
}
