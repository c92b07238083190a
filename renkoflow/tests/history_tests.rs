use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use renkoflow::{
    BrickHistory, Direction, IndicatorSnapshot, PipelineOutput, RenkoBrick, Signal, Trend,
};

fn row(i: u32) -> PipelineOutput {
    let ts = Utc.with_ymd_and_hms(2025, 10, 7, 0, i, 0).unwrap();
    let brick = RenkoBrick::stack(ts, dec!(100) + rust_decimal::Decimal::from(i), Direction::Up, dec!(1));
    PipelineOutput {
        signal: Signal::hold(&brick),
        brick,
        snapshot: IndicatorSnapshot {
            ema_fast: Some(dec!(100)),
            ema_slow: None,
            band_value: Some(dec!(99.5)),
            trend: Trend::Up,
            flipped: i == 2,
        },
    }
}

#[test]
fn ring_retention_evicts_oldest() {
    let mut history = BrickHistory::new(Some(3));
    for i in 0..5 {
        history.push(row(i));
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.total_appended(), 5);
    let closes: Vec<_> = history.iter().map(|r| r.brick.close).collect();
    assert_eq!(closes, vec![dec!(103), dec!(104), dec!(105)]);
    assert_eq!(history.last_n(10).len(), 3);
    assert_eq!(history.last_n(1)[0], row(4));
}

#[test]
fn unbounded_history_keeps_everything() {
    let mut history = BrickHistory::default();
    assert!(history.is_empty());
    for i in 0..40 {
        history.push(row(i));
    }
    assert_eq!(history.len(), 40);
}

#[test]
fn dataframe_exports_one_row_per_brick() {
    let mut history = BrickHistory::new(None);
    for i in 0..4 {
        history.push(row(i));
    }
    let df = history.dataframe().expect("build dataframe");
    assert_eq!(df.height(), 4);
    assert_eq!(df.width(), 12);
    let ema_slow = df.column("ema_slow").expect("ema_slow column");
    assert_eq!(ema_slow.null_count(), 4);
}
