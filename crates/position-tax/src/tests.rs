use approx::assert_relative_eq;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::accumulator::{accumulate, ROUNDING_DECIMALS};
use crate::formatting::round_to;
use crate::models::{DerivedPoint, Operation, OperationKind};
use crate::range::RangeSelector;

/// Helper: operation on 2024-`month`-`day`.
fn op(
    month: u32,
    day: u32,
    kind: OperationKind,
    price: f64,
    quantity: f64,
    fee: f64,
) -> Operation {
    Operation {
        id: Uuid::new_v4(),
        name: "VALE3".to_string(),
        date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
        kind,
        price,
        quantity,
        fee,
    }
}

fn buy(month: u32, day: u32, price: f64, quantity: f64, fee: f64) -> Operation {
    op(month, day, OperationKind::Buy, price, quantity, fee)
}

fn sell(month: u32, day: u32, price: f64, quantity: f64, fee: f64) -> Operation {
    op(month, day, OperationKind::Sell, price, quantity, fee)
}

fn is_rounded(value: f64) -> bool {
    !value.is_finite() || round_to(value, ROUNDING_DECIMALS) == value
}

#[test]
fn test_empty_input() {
    assert!(accumulate(&[]).is_empty());
}

#[test]
fn test_accumulate_is_pure() {
    let ops = vec![
        buy(1, 10, 10.0, 3.0, 1.0),
        sell(1, 20, 7.0, 1.0, 0.5),
        buy(2, 1, 12.0, 4.0, 0.0),
        sell(2, 15, 20.0, 5.0, 2.0),
    ];
    let snapshot = ops.clone();

    let first = accumulate(&ops);
    let second = accumulate(&ops);

    assert_eq!(first, second);
    assert_eq!(ops, snapshot);
}

#[test]
fn test_output_sorted_by_date() {
    let ops = vec![
        sell(3, 1, 15.0, 1.0, 0.0),
        buy(1, 5, 10.0, 2.0, 0.0),
        buy(2, 9, 10.0, 2.0, 0.0),
    ];
    let points = accumulate(&ops);

    let labels: Vec<&str> = points.iter().map(|p| p.date_label.as_str()).collect();
    assert_eq!(labels, vec!["05/01/2024", "09/02/2024", "01/03/2024"]);
    let indexes: Vec<usize> = points.iter().map(|p| p.sequence_index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
    assert_eq!(points[2].avg_quantity, 3.0);
}

#[test]
fn test_same_date_keeps_input_order() {
    // sell listed first on the same day as the buy: processed first
    let ops = vec![sell(1, 5, 10.0, 1.0, 0.0), buy(1, 5, 10.0, 1.0, 0.0)];
    let points = accumulate(&ops);

    assert_eq!(points[0].avg_quantity, -1.0);
    assert_relative_eq!(points[0].realized_result, 10.0);
    assert_relative_eq!(points[0].tax_due, 1.5);
}

#[test]
fn test_single_buy() {
    let (p, q, f) = (13.7, 3.0, 2.45);
    let points = accumulate(&[buy(1, 1, p, q, f)]);

    assert_eq!(points.len(), 1);
    assert_relative_eq!(points[0].avg_price, (p * q + f) / q, epsilon = 1e-5);
    assert_eq!(points[0].avg_quantity, q);
    assert_eq!(points[0].tax_due, 0.0);
    assert_eq!(points[0].accumulated_loss, 0.0);
    assert_eq!(points[0].realized_result, 0.0);
}

#[test]
fn test_buy_then_sell() {
    let points = accumulate(&[buy(1, 1, 10.0, 2.0, 0.0), sell(1, 2, 15.0, 1.0, 0.0)]);

    assert_relative_eq!(points[0].avg_price, 10.0);
    assert_eq!(points[0].avg_quantity, 2.0);
    assert_eq!(points[0].realized_result, 0.0);

    assert_relative_eq!(points[1].realized_result, 5.0);
    assert_relative_eq!(points[1].avg_price, 10.0);
    assert_eq!(points[1].avg_quantity, 1.0);
    assert_relative_eq!(points[1].accumulated_loss, 0.0);
    assert_relative_eq!(points[1].tax_due, 0.75);
}

#[test]
fn test_loss_carryforward() {
    let points = accumulate(&[
        buy(1, 1, 20.0, 10.0, 0.0),
        // loss of 30
        sell(1, 2, 17.0, 5.0, 15.0),
        // gain of 20, fully offset
        sell(1, 3, 24.0, 5.0, 0.0),
        buy(1, 4, 10.0, 5.0, 0.0),
        // gain of 45, remaining 10 offset
        sell(1, 5, 19.0, 5.0, 0.0),
    ]);

    assert_relative_eq!(points[1].realized_result, -30.0);
    assert_relative_eq!(points[1].accumulated_loss, 30.0);
    assert_eq!(points[1].tax_due, 0.0);

    assert_relative_eq!(points[2].realized_result, 20.0);
    assert_relative_eq!(points[2].accumulated_loss, 10.0);
    assert_eq!(points[2].tax_due, 0.0);

    assert_eq!(points[3].avg_quantity, 5.0);
    assert_relative_eq!(points[3].avg_price, 10.0);
    assert_relative_eq!(points[3].accumulated_loss, 10.0);

    assert_relative_eq!(points[4].realized_result, 45.0);
    assert_relative_eq!(points[4].accumulated_loss, 0.0);
    assert_relative_eq!(points[4].tax_due, 5.25, epsilon = 1e-9);
}

#[test]
fn test_fees_on_both_sides() {
    let points = accumulate(&[buy(1, 1, 10.0, 10.0, 5.0), sell(1, 2, 12.0, 10.0, 5.0)]);

    assert_relative_eq!(points[0].avg_price, 10.5);
    // 10 * (12 - 10.5) - 5
    assert_relative_eq!(points[1].realized_result, 10.0, epsilon = 1e-9);
    assert_relative_eq!(points[1].tax_due, 1.5, epsilon = 1e-9);
    assert_eq!(points[1].avg_quantity, 0.0);
}

#[test]
fn test_monetary_fields_rounded_to_five_decimals() {
    let points = accumulate(&[
        buy(1, 1, 10.0, 3.0, 1.0),
        buy(1, 2, 11.111111, 7.0, 0.333333),
        sell(1, 3, 9.87654321, 4.0, 0.1),
        sell(1, 4, 14.2857142, 2.0, 0.0),
    ]);

    for point in &points {
        assert!(is_rounded(point.tax_due), "{point:?}");
        assert!(is_rounded(point.avg_price), "{point:?}");
        assert!(is_rounded(point.accumulated_loss), "{point:?}");
        assert!(is_rounded(point.realized_result), "{point:?}");
    }
    assert_eq!(points[0].avg_price, 10.33333);
}

#[test]
fn test_average_price_rounds_on_exact_value() {
    // 30.000015 / 3 sits just below 10.000005
    let points = accumulate(&[buy(1, 1, 10.0, 3.0, 0.000015)]);
    assert_eq!(points[0].avg_price, 10.0);

    let points = accumulate(&[buy(1, 1, 8.345675, 1.0, 0.0)]);
    assert_eq!(points[0].avg_price, 8.34567);
}

#[test]
fn test_exact_tie_rounds_away_from_zero() {
    let points = accumulate(&[buy(1, 1, 0.015625, 1.0, 0.0)]);
    assert_eq!(points[0].avg_price, 0.01563);

    // realized -0.015625 on a zero-cost position
    let points = accumulate(&[buy(1, 1, 0.0, 1.0, 0.0), sell(1, 2, 0.0, 1.0, 0.015625)]);
    assert_eq!(points[1].realized_result, -0.01563);
    assert_eq!(points[1].accumulated_loss, 0.01563);
}

#[test]
fn test_realized_result_rounds_on_exact_value() {
    let points = accumulate(&[buy(1, 1, 0.0, 1.0, 0.0), sell(1, 2, 8.345675, 1.0, 0.0)]);
    assert_eq!(points[1].realized_result, 8.34567);
    assert_eq!(points[1].avg_quantity, 0.0);
}

#[test]
fn test_quantity_is_not_rounded() {
    let points = accumulate(&[buy(1, 1, 10.0, 0.123456789, 0.0)]);
    assert_eq!(points[0].avg_quantity, 0.123456789);
}

#[test]
fn test_sell_before_any_buy_goes_negative() {
    let points = accumulate(&[sell(1, 1, 10.0, 2.0, 0.0)]);

    assert_eq!(points[0].avg_price, 0.0);
    assert_eq!(points[0].avg_quantity, -2.0);
    assert_relative_eq!(points[0].realized_result, 20.0);
    assert_relative_eq!(points[0].tax_due, 3.0);
}

#[test]
fn test_buy_back_to_zero_holdings_divides_by_zero() {
    let points = accumulate(&[sell(1, 1, 10.0, 2.0, 0.0), buy(1, 2, 10.0, 2.0, 1.0)]);

    assert_eq!(points[1].avg_quantity, 0.0);
    assert_eq!(points[1].avg_price, f64::INFINITY);
}

#[test]
fn test_zero_quantity_first_buy_is_nan() {
    let points = accumulate(&[buy(1, 1, 10.0, 0.0, 0.0)]);
    assert!(points[0].avg_price.is_nan());
    assert_eq!(points[0].avg_quantity, 0.0);
}

#[test]
fn test_nan_average_propagates_through_sells() {
    let points = accumulate(&[
        buy(1, 1, 10.0, 0.0, 0.0),
        sell(1, 2, 10.0, 1.0, 0.0),
        sell(1, 3, 10.0, 1.0, 0.0),
    ]);

    assert!(points[1].realized_result.is_nan());
    assert!(points[1].tax_due.is_nan());
    assert!(points[1].accumulated_loss.is_nan());
    assert!(points[2].accumulated_loss.is_nan());
    assert_eq!(points[2].avg_quantity, -2.0);
}

#[test]
fn test_zoom_onto_clicked_point() {
    let ops: Vec<Operation> = (1..=6).map(|d| buy(1, d, 10.0, 1.0, 0.0)).collect();
    let full = accumulate(&ops);
    let mut selector = RangeSelector::new();

    selector.focus_on(3, full.len());
    let visible: Vec<usize> = selector.visible(&full).iter().map(|p| p.sequence_index).collect();
    assert_eq!(visible, vec![2, 3, 4]);

    selector.set_range(Some((1, 4)));
    assert_eq!(selector.visible(&full), &full[1..5]);

    selector.clear();
    let all: &[DerivedPoint] = selector.visible(&full);
    assert_eq!(all, &full[..]);
}
