use super::*;

fn four_bars() -> RawSeries {
    RawSeries {
        t: vec![1, 2, 3, 4],
        o: vec![10.0, 12.0, 9.0, 11.0],
        h: vec![13.0, 14.0, 10.0, 12.0],
        l: vec![9.0, 11.0, 8.0, 10.0],
        c: vec![12.0, 9.0, 11.0, 10.0],
        v: vec![100.0, 250.0, 50.0, 0.0],
    }
}

#[test]
fn rows_follow_input_order() {
    let (points, _) = normalize(&four_bars()).unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(points[1].timestamp, 2);
    assert_eq!(points[1].open, 12.0);
    assert_eq!(points[1].close, 9.0);
    assert!(points[0].is_bullish());
    assert!(!points[1].is_bullish());
}

#[test]
fn stats_use_highs_and_lows_of_full_series() {
    let (_, stats) = normalize(&four_bars()).unwrap();
    assert_eq!(stats.min_price, 8.0);
    assert_eq!(stats.max_price, 14.0);
    assert_eq!(stats.price_range, 6.0);
    assert_eq!(stats.max_volume, 250.0);
}

#[test]
fn empty_series_is_rejected() {
    let err = normalize(&RawSeries::default()).unwrap_err();
    assert!(matches!(err, ReelError::EmptySeries));
}

#[test]
fn unequal_columns_are_rejected() {
    let mut raw = four_bars();
    raw.v.pop();
    let err = normalize(&raw).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("'v'"));
}

#[test]
fn non_finite_values_are_rejected() {
    let mut raw = four_bars();
    raw.h[2] = f64::NAN;
    assert!(matches!(normalize(&raw), Err(ReelError::Validation(_))));
}

#[test]
fn doji_counts_as_bullish() {
    let p = DataPoint {
        timestamp: 0,
        open: 5.0,
        high: 6.0,
        low: 4.0,
        close: 5.0,
        volume: 1.0,
    };
    assert!(p.is_bullish());
    assert_eq!(p.body_mid(), 5.0);
}

#[test]
fn decodes_dataset_json() {
    let raw = RawSeries::from_json_str(
        r#"{"t":[1700000000],"o":[1.5],"h":[2.0],"l":[1.0],"c":[1.75],"v":[42]}"#,
    )
    .unwrap();
    assert_eq!(raw.len(), 1);
    let (points, stats) = normalize(&raw).unwrap();
    assert_eq!(points[0].volume, 42.0);
    assert_eq!(stats.price_range, 1.0);

    assert!(matches!(
        RawSeries::from_json_str("{\"t\": [1]"),
        Err(ReelError::Serde(_))
    ));
}
