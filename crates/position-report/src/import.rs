use anyhow::Result;
use chrono::NaiveDate;
use position_tax::{CalculatorError, OperationBook, OperationDraft};
use serde::{Deserialize, Serialize};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Parse CSV operation rows into drafts.
/// Expected columns: name, type, date, price, quantity, fee
pub fn parse_operations_csv(csv_data: &str) -> Result<Vec<OperationDraft>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let mut drafts = Vec::new();
    for result in reader.records() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("");

        drafts.push(OperationDraft {
            name: field(0).to_string(),
            kind: Some(field(1).to_string()).filter(|k| !k.is_empty()),
            date: parse_date(field(2)),
            price: parse_number(field(3)),
            quantity: parse_number(field(4)),
            fee: parse_number(field(5)),
        });
    }

    Ok(drafts)
}

/// Add every draft to the book; rejected rows are counted and described.
pub fn import_operations(book: &mut OperationBook, drafts: &[OperationDraft]) -> ImportResult {
    let mut result = ImportResult::default();

    for (i, draft) in drafts.iter().enumerate() {
        // header is line 1
        let line = i + 2;
        match book.add(draft) {
            Ok(_) => result.imported += 1,
            Err(CalculatorError::Validation(errors)) => {
                tracing::warn!(line, %errors, "Skipping invalid operation");
                result.errors.push(format!("line {}: {}", line, errors));
                result.skipped += 1;
            }
            Err(e) => {
                result.errors.push(format!("line {}: {}", line, e));
                result.skipped += 1;
            }
        }
    }

    result
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Blank is missing, anything unparsable is kept as NaN so validation
/// reports it as not a number.
fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        None
    } else {
        Some(s.parse().unwrap_or(f64::NAN))
    }
}
