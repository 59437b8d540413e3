use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Invalid operation: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Operation not found: {0}")]
    OperationNotFound(Uuid),

    #[error("Invalid operation type: {0}")]
    InvalidKind(String),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
