use anyhow::Result;
use position_tax::{format_value, summary, DerivedPoint, Indicator, RangeSelector};
use std::fmt::Write;

const DATE_WIDTH: usize = 10;
const VALUE_WIDTH: usize = 14;

/// Points to display: the neighborhood of `focus_index`, or everything when
/// no focus is set or the index is past the last point.
pub fn focus_window(points: &[DerivedPoint], focus_index: Option<usize>) -> &[DerivedPoint] {
    let mut range = RangeSelector::new();
    match focus_index {
        Some(index) if index < points.len() => range.focus_on(index, points.len()),
        Some(index) => tracing::warn!(
            index,
            points = points.len(),
            "FOCUS_INDEX is past the last point, showing all points"
        ),
        None => {}
    }
    range.visible(points)
}

/// Table with one row per point and a totals footer.
pub fn render_table(points: &[DerivedPoint]) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:>4}  {:<DATE_WIDTH$}", "#", "Date");
    for indicator in Indicator::ALL {
        let _ = write!(out, " {:>VALUE_WIDTH$}", indicator.code());
    }
    out.push('\n');

    for point in points {
        let _ = write!(
            out,
            "{:>4}  {:<DATE_WIDTH$}",
            point.sequence_index, point.date_label
        );
        for indicator in Indicator::ALL {
            let _ = write!(out, " {:>VALUE_WIDTH$}", format_value(point.value(indicator)));
        }
        out.push('\n');
    }

    let totals = summary(points);
    let _ = writeln!(
        out,
        "\n{} operations | tax due {} | realized result {}",
        totals.operations,
        format_value(totals.total_tax_due),
        format_value(totals.total_realized_result)
    );

    out
}

/// Legend lines, e.g. `PM  Average price`
pub fn render_legend() -> String {
    Indicator::ALL
        .iter()
        .map(|i| format!("{}  {}", i.code(), i.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(points: &[DerivedPoint]) -> Result<String> {
    Ok(serde_json::to_string_pretty(points)?)
}
