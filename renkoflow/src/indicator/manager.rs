use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bar::RenkoBrick;
use crate::constant::Trend;

use super::core::Indicator;
use super::ema::Ema;
use super::supertrend::Supertrend;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ema_fast: Option<Decimal>,
    pub ema_slow: Option<Decimal>,
    pub band_value: Option<Decimal>,
    pub trend: Trend,
    /// The trend band changed side on this brick.
    #[serde(default)]
    pub flipped: bool,
}

impl IndicatorSnapshot {
    pub fn is_warm(&self) -> bool {
        self.ema_fast.is_some()
            && self.ema_slow.is_some()
            && self.band_value.is_some()
            && self.trend != Trend::Unknown
    }
}

/// Runs the fast/slow EMA pair and the trend band over the brick sequence.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    fast: Ema,
    slow: Ema,
    band: Supertrend,
    updates: usize,
}

impl IndicatorEngine {
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        atr_period: usize,
        atr_multiplier: Decimal,
    ) -> Self {
        Self {
            fast: Ema::new(fast_period),
            slow: Ema::new(slow_period),
            band: Supertrend::new(atr_period, atr_multiplier),
            updates: 0,
        }
    }

    pub fn update(&mut self, brick: &RenkoBrick) -> IndicatorSnapshot {
        self.updates += 1;
        IndicatorSnapshot {
            ema_fast: self.fast.update(brick),
            ema_slow: self.slow.update(brick),
            band_value: self.band.update(brick),
            trend: self.band.trend(),
            flipped: self.band.flipped(),
        }
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}
