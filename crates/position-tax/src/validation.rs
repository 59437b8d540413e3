//! Operation Validation
//!
//! Field-level checks applied before an operation may enter the book.
//! The accumulator itself never validates; anything that reaches it has
//! passed through here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Operation, OperationKind};

/// Operation fields as entered, before an id is assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDraft {
    pub name: String,
    pub date: Option<NaiveDate>,
    /// Operation type as entered (`buy` / `sell`)
    pub kind: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub fee: Option<f64>,
}

/// Draft that passed every check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidOperation {
    pub name: String,
    pub date: NaiveDate,
    pub kind: OperationKind,
    pub price: f64,
    pub quantity: f64,
    pub fee: f64,
}

impl ValidOperation {
    pub fn into_operation(self, id: Uuid) -> Operation {
        Operation {
            id,
            name: self.name,
            date: self.date,
            kind: self.kind,
            price: self.price,
            quantity: self.quantity,
            fee: self.fee,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Date,
    Kind,
    Price,
    Quantity,
    Fee,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Date => write!(f, "date"),
            Field::Kind => write!(f, "type"),
            Field::Price => write!(f, "price"),
            Field::Quantity => write!(f, "quantity"),
            Field::Fee => write!(f, "fee"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Every failing field of a draft, in field order
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for one field, if it failed
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&Operation> for OperationDraft {
    fn from(op: &Operation) -> Self {
        Self {
            name: op.name.clone(),
            date: Some(op.date),
            kind: Some(op.kind.to_string()),
            price: Some(op.price),
            quantity: Some(op.quantity),
            fee: Some(op.fee),
        }
    }
}

impl OperationDraft {
    pub fn validate(&self) -> Result<ValidOperation, ValidationErrors> {
        let mut errors = Vec::new();
        let mut fail = |field: Field, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        let name = self.name.trim();
        if name.is_empty() {
            fail(Field::Name, "Asset name is required");
        }
        if self.date.is_none() {
            fail(Field::Date, "Operation date is required");
        }
        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => {
                fail(Field::Kind, "Operation type is required");
                None
            }
            Some(raw) => match raw.parse::<OperationKind>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    fail(Field::Kind, "Invalid operation type");
                    None
                }
            },
        };
        check_number(&mut fail, Field::Price, self.price, 0.0, "Price");
        check_number(&mut fail, Field::Quantity, self.quantity, 1.0, "Quantity");
        check_number(&mut fail, Field::Fee, self.fee, 0.0, "Fee");

        match (self.date, kind, self.price, self.quantity, self.fee) {
            (Some(date), Some(kind), Some(price), Some(quantity), Some(fee))
                if errors.is_empty() =>
            {
                Ok(ValidOperation {
                    name: name.to_string(),
                    date,
                    kind,
                    price,
                    quantity,
                    fee,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn check_number(
    fail: &mut impl FnMut(Field, &str),
    field: Field,
    value: Option<f64>,
    min: f64,
    label: &str,
) {
    match value {
        None => fail(field, &format!("{label} is required")),
        Some(v) if !v.is_finite() => fail(field, &format!("{label} must be a number")),
        Some(v) if v < min => {
            if min > 0.0 {
                fail(field, &format!("{label} must be at least {min}"))
            } else {
                fail(field, &format!("{label} cannot be negative"))
            }
        }
        Some(_) => {}
    }
}
