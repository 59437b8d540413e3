//! Position Accumulator
//!
//! Walks the operations in date order carrying an explicit
//! `PositionState` (average price, quantity held, loss carryforward)
//! and emits one `DerivedPoint` per operation.
//!
//! Degenerate sequences are not guarded. A sell that takes holdings to
//! zero or below, or a zero-quantity buy on an empty position, divides by
//! zero on the next buy and yields `NaN` or an infinite average price.

use serde::{Deserialize, Serialize};

use crate::formatting::round_to;
use crate::models::{DerivedPoint, Operation, OperationKind};

/// Flat rate applied to net gains after the loss offset
pub const TAX_RATE: f64 = 0.15;

/// Fractional digits kept in every stored monetary indicator
pub const ROUNDING_DECIMALS: u32 = 5;

/// Running state threaded from one operation to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionState {
    pub avg_price: f64,
    pub avg_quantity: f64,
    pub accumulated_loss: f64,
}

/// Per-operation outputs that are not part of the carried state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub realized_result: f64,
    pub tax_due: f64,
}

impl PositionState {
    /// Apply one operation, returning the next state and what it realized.
    pub fn apply(self, op: &Operation) -> (PositionState, Step) {
        match op.kind {
            OperationKind::Buy => {
                let total_cost =
                    self.avg_price * self.avg_quantity + op.price * op.quantity + op.fee;
                let avg_quantity = self.avg_quantity + op.quantity;
                let next = PositionState {
                    avg_price: total_cost / avg_quantity,
                    avg_quantity,
                    accumulated_loss: self.accumulated_loss,
                };
                (next, Step::default())
            }
            OperationKind::Sell => {
                let realized_result = (op.price - self.avg_price) * op.quantity - op.fee;
                let avg_quantity = self.avg_quantity - op.quantity;

                let (accumulated_loss, tax_due) = if realized_result < 0.0 {
                    (self.accumulated_loss + realized_result.abs(), 0.0)
                } else {
                    let offset = nan_min(realized_result, self.accumulated_loss);
                    (
                        self.accumulated_loss - offset,
                        (realized_result - offset) * TAX_RATE,
                    )
                };

                let next = PositionState {
                    avg_price: self.avg_price,
                    avg_quantity,
                    accumulated_loss,
                };
                (
                    next,
                    Step {
                        realized_result,
                        tax_due,
                    },
                )
            }
        }
    }

    fn point(&self, step: &Step, sequence_index: usize, op: &Operation) -> DerivedPoint {
        DerivedPoint {
            sequence_index,
            date_label: op.date_label(),
            tax_due: round_to(step.tax_due, ROUNDING_DECIMALS),
            avg_price: round_to(self.avg_price, ROUNDING_DECIMALS),
            avg_quantity: self.avg_quantity,
            accumulated_loss: round_to(self.accumulated_loss, ROUNDING_DECIMALS),
            realized_result: round_to(step.realized_result, ROUNDING_DECIMALS),
        }
    }
}

/// `min` that keeps a NaN operand instead of discarding it like `f64::min`
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Copy of the operations ordered by date. Stable, so same-day operations
/// keep their input order.
fn sorted_by_date(operations: &[Operation]) -> Vec<&Operation> {
    let mut sorted: Vec<&Operation> = operations.iter().collect();
    sorted.sort_by_key(|op| op.date);
    sorted
}

/// Derive one point per operation, in ascending date order.
pub fn accumulate(operations: &[Operation]) -> Vec<DerivedPoint> {
    let points: Vec<DerivedPoint> = sorted_by_date(operations)
        .into_iter()
        .enumerate()
        .scan(PositionState::default(), |state, (i, op)| {
            let (next, step) = state.apply(op);
            *state = next;
            Some(next.point(&step, i, op))
        })
        .collect();

    tracing::debug!(operations = points.len(), "Accumulated position");
    points
}

/// Unrounded state after the last operation (zero state for no operations).
pub fn final_state(operations: &[Operation]) -> PositionState {
    sorted_by_date(operations)
        .into_iter()
        .fold(PositionState::default(), |state, op| state.apply(op).0)
}

/// Totals over a (possibly zoomed) point sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub operations: usize,
    pub total_tax_due: f64,
    pub total_realized_result: f64,
}

pub fn summary(points: &[DerivedPoint]) -> PositionSummary {
    PositionSummary {
        operations: points.len(),
        total_tax_due: round_to(points.iter().map(|p| p.tax_due).sum(), ROUNDING_DECIMALS),
        total_realized_result: round_to(
            points.iter().map(|p| p.realized_result).sum(),
            ROUNDING_DECIMALS,
        ),
    }
}
