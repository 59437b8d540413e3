//! Operation and derived point types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CalculatorError;

/// Date format used for point labels
pub const DATE_LABEL_FORMAT: &str = "%d/%m/%Y";

/// Direction of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Buy,
    Sell,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Buy => write!(f, "buy"),
            OperationKind::Sell => write!(f, "sell"),
        }
    }
}

impl std::str::FromStr for OperationKind {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(OperationKind::Buy),
            "sell" => Ok(OperationKind::Sell),
            _ => Err(CalculatorError::InvalidKind(s.to_string())),
        }
    }
}

/// A single buy or sell of the tracked asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Stable identifier, never changed by edits
    pub id: Uuid,
    /// Asset label (display only)
    pub name: String,
    /// Operation date, used for ordering
    pub date: NaiveDate,
    /// Buy or sell
    #[serde(rename = "type")]
    pub kind: OperationKind,
    /// Unit price
    pub price: f64,
    /// Units traded
    pub quantity: f64,
    /// Fee, added to cost on a buy and subtracted from proceeds on a sell
    pub fee: f64,
}

impl Operation {
    pub fn date_label(&self) -> String {
        self.date.format(DATE_LABEL_FORMAT).to_string()
    }
}

/// Snapshot of the running indicators right after one operation.
///
/// Serialized with the short chart names (`ir`, `pm`, `qm`, `pa`, `ra`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    /// Position in the date-sorted sequence
    #[serde(rename = "index")]
    pub sequence_index: usize,
    /// Operation date as `DD/MM/YYYY`
    #[serde(rename = "date")]
    pub date_label: String,
    /// IR: tax owed by this operation
    #[serde(rename = "ir")]
    pub tax_due: f64,
    /// PM: weighted average acquisition cost per unit
    #[serde(rename = "pm")]
    pub avg_price: f64,
    /// QM: units held (not rounded)
    #[serde(rename = "qm")]
    pub avg_quantity: f64,
    /// PA: loss carried forward
    #[serde(rename = "pa")]
    pub accumulated_loss: f64,
    /// RA: result realized by this operation
    #[serde(rename = "ra")]
    pub realized_result: f64,
}

impl DerivedPoint {
    /// Value of one indicator series at this point
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::TaxDue => self.tax_due,
            Indicator::AccumulatedLoss => self.accumulated_loss,
            Indicator::AvgPrice => self.avg_price,
            Indicator::AvgQuantity => self.avg_quantity,
            Indicator::RealizedResult => self.realized_result,
        }
    }
}

/// The five indicator series, in legend order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    TaxDue,
    AccumulatedLoss,
    AvgPrice,
    AvgQuantity,
    RealizedResult,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::TaxDue,
        Indicator::AccumulatedLoss,
        Indicator::AvgPrice,
        Indicator::AvgQuantity,
        Indicator::RealizedResult,
    ];

    /// Short code shown in column headers and chart legends
    pub fn code(&self) -> &'static str {
        match self {
            Indicator::TaxDue => "IR",
            Indicator::AccumulatedLoss => "PA",
            Indicator::AvgPrice => "PM",
            Indicator::AvgQuantity => "QM",
            Indicator::RealizedResult => "RA",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Indicator::TaxDue => "Income tax due",
            Indicator::AccumulatedLoss => "Accumulated loss",
            Indicator::AvgPrice => "Average price",
            Indicator::AvgQuantity => "Average quantity",
            Indicator::RealizedResult => "Realized result",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
