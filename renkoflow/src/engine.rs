//! 流水线驱动。
//!
//! 串联 `Tick -> RenkoBrick -> IndicatorSnapshot -> Signal`：
//! - `Seeding`：首个 tick 只建立砖基准；
//! - `Streaming`：每根完成的砖依次推进指标并与前一根砖配对评估信号；
//! - 乱序 tick 被整体拒绝，状态保持不变。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::constant::{ConfigError, IngestError, SignalKind};
use crate::history::{BrickHistory, PipelineOutput};
use crate::indicator::IndicatorEngine;
use crate::signal::{Signal, SignalEvaluator};
use crate::tick::{RenkoSynthesizer, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Seeding,
    Streaming,
}

#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    stage: PipelineStage,
    synthesizer: RenkoSynthesizer,
    indicators: IndicatorEngine,
    evaluator: SignalEvaluator,
    history: BrickHistory,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Pipeline {
    pub fn configure(
        brick_size: Decimal,
        ema_fast_period: usize,
        ema_slow_period: usize,
        atr_period: usize,
        atr_multiplier: Decimal,
    ) -> Result<Self, ConfigError> {
        Self::from_config(PipelineConfig::new(
            brick_size,
            ema_fast_period,
            ema_slow_period,
            atr_period,
            atr_multiplier,
        ))
    }

    pub fn from_config(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            stage: PipelineStage::Seeding,
            synthesizer: RenkoSynthesizer::new(config.brick_size)?,
            indicators: IndicatorEngine::new(
                config.ema_fast_period,
                config.ema_slow_period,
                config.atr_period,
                config.atr_multiplier,
            ),
            evaluator: SignalEvaluator,
            history: BrickHistory::new(config.max_history),
            last_timestamp: None,
            config,
        })
    }

    /// Processes one tick, returning one output per brick it completed.
    pub fn ingest(&mut self, tick: &Tick) -> Result<Vec<PipelineOutput>, IngestError> {
        if let Some(previous) = self.last_timestamp.filter(|prev| tick.timestamp < *prev) {
            warn!(%previous, received = %tick.timestamp, "rejected out-of-order tick");
            return Err(IngestError::OutOfOrder {
                previous,
                received: tick.timestamp,
            });
        }
        self.last_timestamp = Some(tick.timestamp);

        let bricks = self.synthesizer.feed(tick);
        if self.stage == PipelineStage::Seeding {
            self.stage = PipelineStage::Streaming;
            return Ok(Vec::new());
        }

        let mut outputs = Vec::with_capacity(bricks.len());
        for brick in bricks {
            let snapshot = self.indicators.update(&brick);
            let signal = match self.history.last() {
                Some(prev) => self.evaluator.evaluate(&prev.brick, &prev.snapshot, &brick),
                None => Signal::hold(&brick),
            };

            debug!(
                open = %brick.open,
                close = %brick.close,
                direction = brick.direction.as_str(),
                trend = snapshot.trend.as_str(),
                "brick completed"
            );
            if snapshot.flipped {
                info!(trend = snapshot.trend.as_str(), close = %brick.close, "trend band flipped");
            }
            if signal.kind != SignalKind::Hold {
                info!("{} @ {} | {}", signal.kind, signal.price, signal.timestamp);
            }

            let output = PipelineOutput {
                brick,
                snapshot,
                signal,
            };
            self.history.push(output.clone());
            outputs.push(output);
        }
        Ok(outputs)
    }

    /// Ingests ticks in order, stopping at the first rejected one.
    pub fn ingest_all<'a>(
        &mut self,
        ticks: impl IntoIterator<Item = &'a Tick>,
    ) -> Result<Vec<PipelineOutput>, IngestError> {
        let mut outputs = Vec::new();
        for tick in ticks {
            outputs.extend(self.ingest(tick)?);
        }
        Ok(outputs)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn synthesizer(&self) -> &RenkoSynthesizer {
        &self.synthesizer
    }

    pub fn history(&self) -> &BrickHistory {
        &self.history
    }

    pub fn last_output(&self) -> Option<&PipelineOutput> {
        self.history.last()
    }

    pub fn brick_count(&self) -> u64 {
        self.history.total_appended()
    }
}
