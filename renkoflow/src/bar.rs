use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constant::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenkoBrick {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub direction: Direction,
}

impl RenkoBrick {
    /// Builds a brick of height `brick_size` on top of `open`.
    pub fn stack(
        timestamp: DateTime<Utc>,
        open: Decimal,
        direction: Direction,
        brick_size: Decimal,
    ) -> Self {
        let close = open + direction.sign() * brick_size;
        Self {
            timestamp,
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            direction,
        }
    }

    pub fn body(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    pub fn midpoint(&self) -> Decimal {
        (self.high + self.low) / Decimal::TWO
    }

    pub fn is_up(&self) -> bool {
        self.close > self.open
    }

    pub fn is_down(&self) -> bool {
        self.close < self.open
    }
}
