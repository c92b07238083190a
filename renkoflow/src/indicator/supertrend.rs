//! 波动率趋势带（supertrend）。
//!
//! 上升趋势中带值只会向价格收紧（取 `max(lower, prev)`），收盘跌破前值时翻转为下降趋势并
//! 跳到当前上轨；下降趋势对称处理。ATR 未就绪前趋势为 `Unknown`、带值为 `None`。

use rust_decimal::Decimal;

use crate::bar::RenkoBrick;
use crate::constant::Trend;

use super::atr::Atr;
use super::core::Indicator;

#[derive(Debug, Clone)]
pub struct Supertrend {
    name: String,
    atr: Atr,
    multiplier: Decimal,
    band: Option<Decimal>,
    trend: Trend,
    flipped: bool,
}

impl Supertrend {
    pub fn new(period: usize, multiplier: Decimal) -> Self {
        assert!(multiplier > Decimal::ZERO, "multiplier must be > 0");
        Self {
            name: format!("supertrend_{period}_{multiplier}"),
            atr: Atr::new(period),
            multiplier,
            band: None,
            trend: Trend::Unknown,
            flipped: false,
        }
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Whether the most recent update snapped the band to the other side.
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    fn step(&mut self, brick: &RenkoBrick, atr: Decimal) {
        let offset = self.multiplier * atr;
        let mid = brick.midpoint();
        let upper = mid + offset;
        let lower = mid - offset;

        self.flipped = false;
        let (trend, band) = match (self.trend, self.band) {
            (Trend::Up, Some(prev)) if brick.close < prev => {
                self.flipped = true;
                (Trend::Down, upper)
            }
            (Trend::Up, Some(prev)) => (Trend::Up, lower.max(prev)),
            (Trend::Down, Some(prev)) if brick.close > prev => {
                self.flipped = true;
                (Trend::Up, lower)
            }
            (Trend::Down, Some(prev)) => (Trend::Down, upper.min(prev)),
            // first defined bar: side the brick itself moved to
            _ if brick.is_up() => (Trend::Up, lower),
            _ => (Trend::Down, upper),
        };

        self.trend = trend;
        self.band = Some(band);
    }
}

impl Indicator for Supertrend {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.atr.reset();
        self.band = None;
        self.trend = Trend::Unknown;
        self.flipped = false;
    }

    fn update(&mut self, brick: &RenkoBrick) -> Option<Decimal> {
        match self.atr.update(brick) {
            Some(atr) => self.step(brick, atr),
            None => self.flipped = false,
        }
        self.band
    }

    fn value(&self) -> Option<Decimal> {
        self.band
    }
}
