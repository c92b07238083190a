use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use renkoflow::PipelineOutput;
use serde::Serialize;

/// Flat row layout for CSV export, one per brick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRow {
    pub timestamp: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub direction: &'static str,
    pub ema_fast: Option<String>,
    pub ema_slow: Option<String>,
    pub band_value: Option<String>,
    pub trend: &'static str,
    pub flipped: bool,
    pub signal: &'static str,
}

impl From<&PipelineOutput> for SignalRow {
    fn from(value: &PipelineOutput) -> Self {
        let brick = &value.brick;
        let snapshot = &value.snapshot;
        Self {
            timestamp: brick.timestamp.to_rfc3339(),
            open: brick.open.to_string(),
            high: brick.high.to_string(),
            low: brick.low.to_string(),
            close: brick.close.to_string(),
            direction: brick.direction.as_str(),
            ema_fast: snapshot.ema_fast.map(|x| x.to_string()),
            ema_slow: snapshot.ema_slow.map(|x| x.to_string()),
            band_value: snapshot.band_value.map(|x| x.to_string()),
            trend: snapshot.trend.as_str(),
            flipped: snapshot.flipped,
            signal: value.signal.kind.as_str(),
        }
    }
}

pub fn write_csv<W: Write>(writer: W, outputs: &[PipelineOutput]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for output in outputs {
        writer.serialize(SignalRow::from(output))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: impl AsRef<Path>, outputs: &[PipelineOutput]) -> Result<(), csv::Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    write_csv(File::create(path)?, outputs)
}

/// One JSON message per brick, newline separated.
pub fn to_json_lines(outputs: &[PipelineOutput]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for output in outputs {
        out.push_str(&serde_json::to_string(output)?);
        out.push('\n');
    }
    Ok(out)
}
