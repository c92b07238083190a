use rust_decimal::Decimal;

use crate::bar::RenkoBrick;

use super::core::Indicator;

/// Exponential moving average seeded with the simple average of the first
/// `period` inputs.
#[derive(Debug, Clone)]
pub struct Ema {
    name: String,
    period: usize,
    alpha: Decimal,
    value: Option<Decimal>,
    seed_sum: Decimal,
    seen: usize,
}

impl Ema {
    /// Callers validate `period > 0` (see `PipelineConfig::validate`).
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "period must be > 0");
        Self {
            name: format!("ema_{period}"),
            period,
            alpha: Decimal::TWO / Decimal::from(period as u64 + 1),
            value: None,
            seed_sum: Decimal::ZERO,
            seen: 0,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn alpha(&self) -> Decimal {
        self.alpha
    }

    pub fn is_ready(&self) -> bool {
        self.value.is_some()
    }

    pub fn push(&mut self, input: Decimal) -> Option<Decimal> {
        self.value = match self.value {
            Some(prev) => Some(self.alpha * input + (Decimal::ONE - self.alpha) * prev),
            None => {
                self.seed_sum += input;
                self.seen += 1;
                (self.seen == self.period)
                    .then(|| self.seed_sum / Decimal::from(self.period as u64))
            }
        };
        self.value
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.value = None;
        self.seed_sum = Decimal::ZERO;
        self.seen = 0;
    }

    fn update(&mut self, brick: &RenkoBrick) -> Option<Decimal> {
        self.push(brick.close)
    }

    fn value(&self) -> Option<Decimal> {
        self.value
    }
}
