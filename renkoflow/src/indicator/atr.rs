use rust_decimal::Decimal;

use crate::bar::RenkoBrick;

use super::core::Indicator;
use super::ema::Ema;

/// Average true range smoothed with the exponential recursion of [`Ema`].
#[derive(Debug, Clone)]
pub struct Atr {
    name: String,
    smoother: Ema,
    prev_close: Option<Decimal>,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "period must be > 0");
        Self {
            name: format!("atr_{period}"),
            smoother: Ema::new(period),
            prev_close: None,
        }
    }

    pub fn true_range(high: Decimal, low: Decimal, prev_close: Option<Decimal>) -> Decimal {
        match prev_close {
            Some(prev_close) => (high - low)
                .max((high - prev_close).abs())
                .max((low - prev_close).abs()),
            None => high - low,
        }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.smoother.reset();
        self.prev_close = None;
    }

    fn update(&mut self, brick: &RenkoBrick) -> Option<Decimal> {
        let tr = Self::true_range(brick.high, brick.low, self.prev_close);
        self.prev_close = Some(brick.close);
        self.smoother.push(tr)
    }

    fn value(&self) -> Option<Decimal> {
        self.smoother.value()
    }
}
