use std::path::PathBuf;

use renkoflow::{ConfigLoader, Pipeline, PipelineConfig, SignalKind, init_logging, load_ticks};
use replay::{RelayConfig, spawn_relay};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "usage: cargo run -q -p replay --bin relay_signals -- <csv_path> [config.yaml|config.json]"
        );
        std::process::exit(2);
    }
    init_logging();

    let config = match args.get(2) {
        Some(path) => ConfigLoader::load(path)?,
        None => PipelineConfig::default(),
    };
    let ticks = load_ticks(PathBuf::from(&args[1]))?;
    let handle = spawn_relay(Pipeline::from_config(config)?, ticks, RelayConfig::default());

    let mut received = 0usize;
    for output in handle.outputs().iter() {
        received += 1;
        if output.signal.kind != SignalKind::Hold {
            println!("{}", serde_json::to_string(&output)?);
        }
    }

    let pipeline = handle.join()?;
    println!(
        "RELAY summary: received={} bricks={}",
        received,
        pipeline.brick_count()
    );
    Ok(())
}
