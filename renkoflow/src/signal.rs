//! 两根砖确认信号。
//!
//! 只使用前一根砖已确认的指标状态，加上当前砖自身的开收关系，避免未来函数。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bar::RenkoBrick;
use crate::constant::{SignalKind, Trend};
use crate::indicator::IndicatorSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    pub fn hold(brick: &RenkoBrick) -> Self {
        Self {
            kind: SignalKind::Hold,
            price: brick.close,
            timestamp: brick.timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Confirmed {
    trend: Trend,
    band: Decimal,
    fast: Decimal,
    slow: Decimal,
}

impl Confirmed {
    fn from_snapshot(snapshot: &IndicatorSnapshot) -> Option<Self> {
        if snapshot.trend == Trend::Unknown {
            return None;
        }
        Some(Self {
            trend: snapshot.trend,
            band: snapshot.band_value?,
            fast: snapshot.ema_fast?,
            slow: snapshot.ema_slow?,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SignalEvaluator;

impl SignalEvaluator {
    pub fn evaluate(
        &self,
        prev_brick: &RenkoBrick,
        prev_snapshot: &IndicatorSnapshot,
        curr_brick: &RenkoBrick,
    ) -> Signal {
        let kind = if self.buy_setup(prev_brick, prev_snapshot, curr_brick) {
            SignalKind::Buy
        } else if self.sell_setup(prev_brick, prev_snapshot, curr_brick) {
            SignalKind::Sell
        } else {
            SignalKind::Hold
        };
        Signal {
            kind,
            price: curr_brick.close,
            timestamp: curr_brick.timestamp,
        }
    }

    /// Up trend, price above the band, fast over slow, previous low dipped
    /// under the slow average, and the current brick closes up.
    pub fn buy_setup(
        &self,
        prev_brick: &RenkoBrick,
        prev_snapshot: &IndicatorSnapshot,
        curr_brick: &RenkoBrick,
    ) -> bool {
        let Some(c) = Confirmed::from_snapshot(prev_snapshot) else {
            return false;
        };
        c.trend == Trend::Up
            && c.band < prev_brick.close
            && c.fast > c.slow
            && prev_brick.low < c.slow
            && curr_brick.close > curr_brick.open
    }

    pub fn sell_setup(
        &self,
        prev_brick: &RenkoBrick,
        prev_snapshot: &IndicatorSnapshot,
        curr_brick: &RenkoBrick,
    ) -> bool {
        let Some(c) = Confirmed::from_snapshot(prev_snapshot) else {
            return false;
        };
        c.trend == Trend::Down
            && c.band > prev_brick.close
            && c.fast < c.slow
            && prev_brick.high > c.slow
            && curr_brick.close < curr_brick.open
    }
}
