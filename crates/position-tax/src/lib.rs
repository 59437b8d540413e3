//! Position Tax
//!
//! Average-cost position tracking for a single asset with loss carryforward
//! and a flat capital gains rate. Operations go in (any order), one
//! `DerivedPoint` per operation comes out in date order.

pub mod accumulator;
pub mod book;
pub mod error;
pub mod formatting;
pub mod models;
pub mod range;
pub mod validation;

#[cfg(test)]
mod tests;

pub use accumulator::{
    accumulate, final_state, summary, PositionState, PositionSummary, Step, ROUNDING_DECIMALS,
    TAX_RATE,
};
pub use book::OperationBook;
pub use error::{CalculatorError, Result};
pub use formatting::{format_value, round_to};
pub use models::{DerivedPoint, Indicator, Operation, OperationKind};
pub use range::RangeSelector;
pub use validation::{Field, FieldError, OperationDraft, ValidOperation, ValidationErrors};
