//! Pure numeric helpers shared by the accumulator and the renderers.
use rust_decimal::prelude::*;

/// Fixed-point digits used when rendering a value
const DISPLAY_DECIMALS: usize = 5;
/// Fractional digits always kept after trimming
const MIN_DISPLAY_DECIMALS: usize = 2;

/// Round half away from zero to `decimals` fractional digits, deciding on
/// the exact binary value (`8.345675` is stored just below the half and
/// rounds down). Non-finite and out-of-range values pass through unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    // shortest decimal text parses back to the nearest f64
    exact
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .unwrap_or(value)
}

/// Render a value with 5 fractional digits, trimming trailing zeros down
/// to a minimum of 2 digits: `1.0 -> "1.00"`, `1.234567 -> "1.23457"`.
pub fn format_value(value: f64) -> String {
    // -0.0 would otherwise render with a sign
    let value = if value == 0.0 { 0.0 } else { value };
    let fixed = format!("{:.*}", DISPLAY_DECIMALS, value);

    let Some((int_part, frac_part)) = fixed.split_once('.') else {
        // NaN / inf
        return fixed;
    };

    let trimmed = frac_part.trim_end_matches('0');
    if trimmed.len() >= MIN_DISPLAY_DECIMALS {
        format!("{int_part}.{trimmed}")
    } else {
        format!("{int_part}.{trimmed:0<width$}", width = MIN_DISPLAY_DECIMALS)
    }
}
