use std::path::PathBuf;

use renkoflow::{ConfigLoader, Pipeline, PipelineConfig, SignalKind, TickReceiver, init_logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "usage: cargo run -q -p replay --bin replay_signals -- <csv_path> [config.yaml|config.json] [out.csv]"
        );
        std::process::exit(2);
    }
    init_logging();

    let csv_path = PathBuf::from(&args[1]);
    let config = match args.get(2) {
        Some(path) => ConfigLoader::load(path)?,
        None => PipelineConfig::default(),
    };
    let out_path = args.get(3).map(PathBuf::from);

    let mut receiver = TickReceiver::new(Pipeline::from_config(config)?);
    let summary = receiver.ingest_csv(&csv_path)?;
    let pipeline = receiver.into_pipeline();
    let outputs: Vec<_> = pipeline.history().iter().cloned().collect();

    for output in outputs.iter().filter(|x| x.signal.kind != SignalKind::Hold) {
        println!(
            "{} @ {} | {}",
            output.signal.kind, output.signal.price, output.signal.timestamp
        );
    }

    println!(
        "REPLAY summary: ticks={} skipped={} bricks={} buys={} sells={}",
        summary.ticks,
        summary.skipped,
        summary.bricks,
        outputs.iter().filter(|x| x.signal.kind == SignalKind::Buy).count(),
        outputs.iter().filter(|x| x.signal.kind == SignalKind::Sell).count(),
    );

    if let Some(out_path) = out_path {
        replay::write_csv_file(&out_path, &outputs)?;
        println!("REPLAY export: {} rows -> {}", outputs.len(), out_path.display());
    }

    Ok(())
}
