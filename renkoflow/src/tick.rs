use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bar::RenkoBrick;
use crate::constant::{ConfigError, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub timestamp: DateTime<Utc>,
    pub close: Decimal,
    #[serde(default)]
    pub open: Option<Decimal>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
    #[serde(default)]
    pub volume: Option<Decimal>,
}

impl Tick {
    pub fn new(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self {
            timestamp,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Baseline {
    last_close: Decimal,
    pending_open: Decimal,
}

/// Converts a tick stream into fixed-height bricks.
#[derive(Debug, Clone)]
pub struct RenkoSynthesizer {
    brick_size: Decimal,
    baseline: Option<Baseline>,
}

impl RenkoSynthesizer {
    pub fn new(brick_size: Decimal) -> Result<Self, ConfigError> {
        if brick_size <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveBrickSize(brick_size));
        }
        Ok(Self {
            brick_size,
            baseline: None,
        })
    }

    pub fn brick_size(&self) -> Decimal {
        self.brick_size
    }

    pub fn is_seeded(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn last_close(&self) -> Option<Decimal> {
        self.baseline.map(|x| x.last_close)
    }

    pub fn pending_open(&self) -> Option<Decimal> {
        self.baseline.map(|x| x.pending_open)
    }

    /// Feeds one tick; the first tick only seeds the baseline.
    pub fn feed(&mut self, tick: &Tick) -> Vec<RenkoBrick> {
        let Some(mut baseline) = self.baseline else {
            self.baseline = Some(Baseline {
                last_close: tick.close,
                pending_open: tick.close,
            });
            debug!(price = %tick.close, "renko baseline seeded");
            return Vec::new();
        };

        let mut bricks = Vec::new();
        while (tick.close - baseline.last_close).abs() >= self.brick_size {
            let direction = if tick.close > baseline.last_close {
                Direction::Up
            } else {
                Direction::Down
            };
            let brick = RenkoBrick::stack(
                tick.timestamp,
                baseline.pending_open,
                direction,
                self.brick_size,
            );
            baseline.last_close = brick.close;
            baseline.pending_open = brick.close;
            bricks.push(brick);
        }

        self.baseline = Some(baseline);
        bricks
    }

    /// Number of bricks `price` would complete, without mutating state.
    pub fn pending_bricks(&self, price: Decimal) -> u64 {
        match self.baseline {
            None => 0,
            Some(baseline) => {
                let moves = ((price - baseline.last_close).abs() / self.brick_size).floor();
                moves.to_u64().unwrap_or(u64::MAX)
            }
        }
    }
}
