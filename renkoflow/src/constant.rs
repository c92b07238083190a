use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// `+1` for `Up`, `-1` for `Down`.
    pub fn sign(self) -> Decimal {
        match self {
            Self::Up => Decimal::ONE,
            Self::Down => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Unknown,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Unknown => "unknown",
        }
    }
}

impl From<Direction> for Trend {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl SignalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        }
    }
}

impl Display for SignalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("brick size must be > 0, got {0}")]
    NonPositiveBrickSize(Decimal),
    #[error("{name} must be > 0")]
    NonPositivePeriod { name: &'static str },
    #[error("fast ema period ({fast}) must be below slow ema period ({slow})")]
    FastNotBelowSlow { fast: usize, slow: usize },
    #[error("atr multiplier must be > 0, got {0}")]
    NonPositiveMultiplier(Decimal),
    #[error("max_history must keep at least 2 rows, got {max_history}")]
    RetentionTooSmall { max_history: usize },
    #[error("unsupported config file format: {0}")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("tick at {received} is earlier than previous tick at {previous}")]
    OutOfOrder {
        previous: DateTime<Utc>,
        received: DateTime<Utc>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("invalid datetime: {0}")]
    InvalidDatetime(String),
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}
