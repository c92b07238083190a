use std::path::PathBuf;

use renkoflow::{ConfigLoader, OrderPolicy, Pipeline, PipelineConfig, TickReceiver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "usage: cargo run -q -p replay --bin audit_bricks -- <csv_path> [config.yaml|config.json]"
        );
        std::process::exit(2);
    }

    let csv_path = PathBuf::from(&args[1]);
    let config = match args.get(2) {
        Some(path) => ConfigLoader::load(path)?,
        None => PipelineConfig::default(),
    };

    let mut receiver = TickReceiver::new(Pipeline::from_config(config)?).with_policy(OrderPolicy::Skip);
    let summary = receiver.ingest_csv(&csv_path)?;
    let pipeline = receiver.pipeline();
    let outputs: Vec<_> = pipeline.history().iter().cloned().collect();
    let report = replay::audit_outputs(&outputs, pipeline.synthesizer().brick_size());

    println!(
        "AUDIT summary: ticks={} skipped={} bricks={} buys={} sells={} flips={}",
        summary.ticks, summary.skipped, report.bricks, report.buys, report.sells, report.flips,
    );

    if report.passed() {
        println!("AUDIT result: PASS (no invariant violations found)");
        return Ok(());
    }

    println!("AUDIT result: FAIL violations={}", report.violations.len());
    for item in report.violations.iter().take(30) {
        println!("- {item}");
    }
    if report.violations.len() > 30 {
        println!("- ... {} more", report.violations.len() - 30);
    }
    std::process::exit(1);
}
