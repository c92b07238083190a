use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use renkoflow::{
    ConfigError, IngestError, Pipeline, PipelineConfig, PipelineOutput, PipelineStage,
    SignalEvaluator, SignalKind, Tick,
};

fn ts(i: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 7, 0, 0, 0).unwrap() + Duration::minutes(i)
}

fn ticks(prices: &[Decimal]) -> Vec<Tick> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| Tick::new(ts(i as i64), *p))
        .collect()
}

fn unit_pipeline() -> Pipeline {
    Pipeline::configure(dec!(1), 2, 5, 2, dec!(2)).expect("valid config")
}

fn zigzag() -> Vec<Tick> {
    let prices: Vec<Decimal> = [
        100, 101, 103, 102, 99, 98, 101, 105, 104, 106, 103, 100, 97, 98, 102, 104, 107, 106,
        103, 101, 100, 102, 105,
    ]
    .into_iter()
    .map(Decimal::from)
    .collect();
    ticks(&prices)
}

#[test]
fn zero_brick_size_is_rejected_before_any_tick() {
    let err = Pipeline::configure(Decimal::ZERO, 20, 50, 2, dec!(30)).err();
    assert!(matches!(err, Some(ConfigError::NonPositiveBrickSize(_))));
}

#[test]
fn periods_are_validated_at_configure_time() {
    assert!(matches!(
        Pipeline::configure(dec!(1), 0, 50, 2, dec!(3)).err(),
        Some(ConfigError::NonPositivePeriod { name: "ema_fast_period" })
    ));
    assert!(matches!(
        Pipeline::configure(dec!(1), 5, 5, 2, dec!(3)).err(),
        Some(ConfigError::FastNotBelowSlow { fast: 5, slow: 5 })
    ));
    assert!(matches!(
        Pipeline::configure(dec!(1), 5, 8, 0, dec!(3)).err(),
        Some(ConfigError::NonPositivePeriod { name: "atr_period" })
    ));
    assert!(matches!(
        Pipeline::configure(dec!(1), 5, 8, 2, dec!(0)).err(),
        Some(ConfigError::NonPositiveMultiplier(_))
    ));
    assert!(matches!(
        Pipeline::from_config(PipelineConfig::default().with_max_history(1)).err(),
        Some(ConfigError::RetentionTooSmall { max_history: 1 })
    ));
}

#[test]
fn first_tick_moves_from_seeding_to_streaming() {
    let mut pipeline = unit_pipeline();
    assert_eq!(pipeline.stage(), PipelineStage::Seeding);
    let out = pipeline.ingest(&Tick::new(ts(0), dec!(100))).unwrap();
    assert!(out.is_empty());
    assert_eq!(pipeline.stage(), PipelineStage::Streaming);
    assert_eq!(pipeline.synthesizer().last_close(), Some(dec!(100)));
}

#[test]
fn one_output_per_brick_in_completion_order() {
    let mut pipeline = unit_pipeline();
    pipeline.ingest(&Tick::new(ts(0), dec!(100))).unwrap();
    let out = pipeline.ingest(&Tick::new(ts(1), dec!(103.4))).unwrap();

    assert_eq!(out.len(), 3);
    let closes: Vec<_> = out.iter().map(|o| o.brick.close).collect();
    assert_eq!(closes, vec![dec!(101), dec!(102), dec!(103)]);
    assert_eq!(out[0].signal.kind, SignalKind::Hold);
    assert_eq!(pipeline.brick_count(), 3);
    assert_eq!(pipeline.history().len(), 3);
}

#[test]
fn every_signal_matches_evaluator_on_adjacent_pair() {
    let mut pipeline = unit_pipeline();
    let outputs = pipeline.ingest_all(&zigzag()).unwrap();
    assert!(outputs.len() > 20);

    for pair in outputs.windows(2) {
        let expected =
            SignalEvaluator.evaluate(&pair[0].brick, &pair[0].snapshot, &pair[1].brick);
        assert_eq!(pair[1].signal, expected);
        assert_eq!(pair[1].brick.open, pair[0].brick.close);
    }
}

#[test]
fn pullback_in_up_trend_fires_buys() {
    let prices: Vec<Decimal> = [100, 101, 102, 103, 104, 105, 104, 103, 104, 105]
        .into_iter()
        .map(Decimal::from)
        .collect();
    let mut pipeline = unit_pipeline();
    let outputs = pipeline.ingest_all(&ticks(&prices)).unwrap();

    let kinds: Vec<_> = outputs.iter().map(|o| o.signal.kind).collect();
    let mut expected = vec![SignalKind::Hold; 7];
    expected.extend([SignalKind::Buy, SignalKind::Buy]);
    assert_eq!(kinds, expected);
    assert_eq!(outputs[7].signal.price, dec!(104));
    assert_eq!(outputs[8].signal.timestamp, ts(9));
}

#[test]
fn rally_in_down_trend_fires_sells() {
    let prices: Vec<Decimal> = [100, 99, 98, 97, 96, 95, 96, 97, 96, 95]
        .into_iter()
        .map(Decimal::from)
        .collect();
    let mut pipeline = unit_pipeline();
    let outputs = pipeline.ingest_all(&ticks(&prices)).unwrap();

    let kinds: Vec<_> = outputs.iter().map(|o| o.signal.kind).collect();
    let mut expected = vec![SignalKind::Hold; 7];
    expected.extend([SignalKind::Sell, SignalKind::Sell]);
    assert_eq!(kinds, expected);
}

#[test]
fn out_of_order_tick_is_rejected_without_mutation() {
    let mut pipeline = unit_pipeline();
    pipeline.ingest(&Tick::new(ts(5), dec!(100))).unwrap();
    pipeline.ingest(&Tick::new(ts(6), dec!(102))).unwrap();

    let err = pipeline.ingest(&Tick::new(ts(4), dec!(90))).unwrap_err();
    assert_eq!(
        err,
        IngestError::OutOfOrder {
            previous: ts(6),
            received: ts(4),
        }
    );
    assert_eq!(pipeline.synthesizer().last_close(), Some(dec!(102)));
    assert_eq!(pipeline.brick_count(), 2);

    // same timestamp is still in order
    let out = pipeline.ingest(&Tick::new(ts(6), dec!(103))).unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn replay_is_deterministic() {
    let run = || -> Vec<PipelineOutput> {
        let mut pipeline = unit_pipeline();
        pipeline.ingest_all(&zigzag()).unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn bounded_history_keeps_latest_rows_only() {
    let config = PipelineConfig::new(dec!(1), 2, 5, 2, dec!(2)).with_max_history(4);
    let mut pipeline = Pipeline::from_config(config).unwrap();
    let outputs = pipeline.ingest_all(&zigzag()).unwrap();

    assert_eq!(pipeline.history().len(), 4);
    assert_eq!(pipeline.brick_count(), outputs.len() as u64);
    assert_eq!(pipeline.history().last_n(4), outputs[outputs.len() - 4..].to_vec());
    assert_eq!(pipeline.last_output(), outputs.last());
}

#[test]
fn scenario_from_eurusd_fixture() {
    let mut pipeline = Pipeline::configure(dec!(0.0010), 20, 50, 2, dec!(30)).unwrap();
    pipeline.ingest(&Tick::new(ts(0), dec!(1.1000))).unwrap();
    let out = pipeline.ingest(&Tick::new(ts(1), dec!(1.1025))).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!((out[0].brick.open, out[0].brick.close), (dec!(1.1000), dec!(1.1010)));
    assert_eq!((out[1].brick.open, out[1].brick.close), (dec!(1.1010), dec!(1.1020)));
    assert!(out.iter().all(|o| o.signal.kind == SignalKind::Hold));
    assert_eq!(out[0].snapshot.ema_fast, None);
}
