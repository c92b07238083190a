use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::constant::DataError;
use crate::engine::Pipeline;
use crate::history::PipelineOutput;
use crate::tick::Tick;

/// What to do with a tick older than its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderPolicy {
    #[default]
    Reject,
    Skip,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub ticks: usize,
    pub skipped: usize,
    pub bricks: usize,
}

#[derive(Debug)]
pub struct TickReceiver {
    pipeline: Pipeline,
    policy: OrderPolicy,
}

impl TickReceiver {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            policy: OrderPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: OrderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn ingest_tick(&mut self, tick: &Tick) -> Result<Vec<PipelineOutput>, DataError> {
        Ok(self.pipeline.ingest(tick)?)
    }

    pub fn ingest_batch<'a>(
        &mut self,
        ticks: impl IntoIterator<Item = &'a Tick>,
    ) -> Result<IngestSummary, DataError> {
        let mut summary = IngestSummary::default();
        for tick in ticks {
            summary.ticks += 1;
            match self.pipeline.ingest(tick) {
                Ok(outputs) => summary.bricks += outputs.len(),
                Err(error) if self.policy == OrderPolicy::Skip => {
                    warn!(%error, "skipping tick");
                    summary.skipped += 1;
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(summary)
    }

    pub fn ingest_csv(&mut self, file_path: impl AsRef<Path>) -> Result<IngestSummary, DataError> {
        let file_path = file_path.as_ref();
        let ticks = load_ticks(file_path)?;
        let summary = self.ingest_batch(&ticks)?;
        info!(
            path = %file_path.display(),
            ticks = summary.ticks,
            skipped = summary.skipped,
            bricks = summary.bricks,
            "csv replay finished"
        );
        Ok(summary)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn into_pipeline(self) -> Pipeline {
        self.pipeline
    }
}

#[derive(Debug, Deserialize)]
struct CsvTickRow {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    datetime: String,
    #[serde(default, alias = "Open")]
    open: Option<String>,
    #[serde(default, alias = "High")]
    high: Option<String>,
    #[serde(default, alias = "Low")]
    low: Option<String>,
    #[serde(alias = "Close", alias = "price", alias = "last_price")]
    close: String,
    #[serde(default, alias = "Volume")]
    volume: Option<String>,
}

impl CsvTickRow {
    fn into_tick(self) -> Result<Tick, DataError> {
        Ok(Tick {
            timestamp: parse_datetime(&self.datetime)?,
            close: parse_price(&self.close)?,
            open: parse_optional_price(self.open)?,
            high: parse_optional_price(self.high)?,
            low: parse_optional_price(self.low)?,
            volume: parse_optional_price(self.volume)?,
        })
    }
}

pub fn load_ticks(file_path: impl AsRef<Path>) -> Result<Vec<Tick>, DataError> {
    let reader = csv::Reader::from_path(file_path)?;
    collect_ticks(reader)
}

pub fn read_ticks<R: Read>(input: R) -> Result<Vec<Tick>, DataError> {
    collect_ticks(csv::Reader::from_reader(input))
}

fn collect_ticks<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Tick>, DataError> {
    let mut out = Vec::new();
    for row in reader.deserialize::<CsvTickRow>() {
        out.push(row?.into_tick()?);
    }
    Ok(out)
}

fn parse_price(value: &str) -> Result<Decimal, DataError> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| DataError::InvalidPrice(value.to_string()))
}

fn parse_optional_price(value: Option<String>) -> Result<Option<Decimal>, DataError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_price(v).map(Some),
    }
}

pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, DataError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let patterns = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y%m%d%H%M%S%.f",
    ];

    for pattern in patterns {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return Ok(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
        }
    }

    Err(DataError::InvalidDatetime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_fixture_timestamp() {
        let dt = parse_datetime("2025-10-07 00:01:05").expect("valid datetime");
        assert_eq!(dt.to_rfc3339(), "2025-10-07T00:01:05+00:00");
    }

    #[test]
    fn rejects_garbage_price() {
        assert!(matches!(parse_price("abc"), Err(DataError::InvalidPrice(_))));
        assert_eq!(parse_optional_price(Some(" ".to_string())).unwrap(), None);
    }
}
