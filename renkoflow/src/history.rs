//! 输出历史管理。
//!
//! 负责 `(brick, snapshot, signal)` 三元组的追加、可选的保留上限（环形淘汰最旧行）、
//! 窗口读取与 dataframe 导出。算法本身只依赖最近两行。

use std::collections::VecDeque;

use polars::df;
use polars::prelude::DataFrame;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::bar::RenkoBrick;
use crate::constant::DataError;
use crate::indicator::IndicatorSnapshot;
use crate::signal::Signal;

/// One completed brick with the indicator state and classification it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub brick: RenkoBrick,
    pub snapshot: IndicatorSnapshot,
    pub signal: Signal,
}

#[derive(Debug, Clone, Default)]
pub struct BrickHistory {
    rows: VecDeque<PipelineOutput>,
    max_rows: Option<usize>,
    total_appended: u64,
}

impl BrickHistory {
    pub fn new(max_rows: Option<usize>) -> Self {
        Self {
            rows: VecDeque::new(),
            max_rows,
            total_appended: 0,
        }
    }

    pub fn push(&mut self, row: PipelineOutput) {
        if let Some(max_rows) = self.max_rows {
            while self.rows.len() >= max_rows.max(1) {
                self.rows.pop_front();
            }
        }
        self.rows.push_back(row);
        self.total_appended = self.total_appended.saturating_add(1);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ever appended, including evicted ones.
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }

    pub fn last(&self) -> Option<&PipelineOutput> {
        self.rows.back()
    }

    pub fn last_n(&self, n: usize) -> Vec<PipelineOutput> {
        let skip = self.rows.len().saturating_sub(n);
        self.rows.iter().skip(skip).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipelineOutput> {
        self.rows.iter()
    }

    pub fn dataframe(&self) -> Result<DataFrame, DataError> {
        let to_f64 = |x: Decimal| x.to_f64().unwrap_or(f64::NAN);
        let opt_f64 = |x: Option<Decimal>| x.and_then(|v| v.to_f64());

        let df = df!(
            "timestamp" => self.rows.iter().map(|r| r.brick.timestamp.timestamp_millis()).collect::<Vec<_>>(),
            "open" => self.rows.iter().map(|r| to_f64(r.brick.open)).collect::<Vec<_>>(),
            "high" => self.rows.iter().map(|r| to_f64(r.brick.high)).collect::<Vec<_>>(),
            "low" => self.rows.iter().map(|r| to_f64(r.brick.low)).collect::<Vec<_>>(),
            "close" => self.rows.iter().map(|r| to_f64(r.brick.close)).collect::<Vec<_>>(),
            "direction" => self.rows.iter().map(|r| r.brick.direction.as_str()).collect::<Vec<_>>(),
            "ema_fast" => self.rows.iter().map(|r| opt_f64(r.snapshot.ema_fast)).collect::<Vec<_>>(),
            "ema_slow" => self.rows.iter().map(|r| opt_f64(r.snapshot.ema_slow)).collect::<Vec<_>>(),
            "band_value" => self.rows.iter().map(|r| opt_f64(r.snapshot.band_value)).collect::<Vec<_>>(),
            "trend" => self.rows.iter().map(|r| r.snapshot.trend.as_str()).collect::<Vec<_>>(),
            "flipped" => self.rows.iter().map(|r| r.snapshot.flipped).collect::<Vec<_>>(),
            "signal" => self.rows.iter().map(|r| r.signal.kind.as_str()).collect::<Vec<_>>()
        )?;
        Ok(df)
    }
}
