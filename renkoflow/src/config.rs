use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::constant::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub brick_size: Decimal,
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    pub atr_period: usize,
    pub atr_multiplier: Decimal,
    /// Rows kept in the output history; `None` keeps everything.
    #[serde(default)]
    pub max_history: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            brick_size: Decimal::new(10, 4),
            ema_fast_period: 20,
            ema_slow_period: 50,
            atr_period: 2,
            atr_multiplier: Decimal::from(30),
            max_history: None,
        }
    }
}

impl PipelineConfig {
    pub fn new(
        brick_size: Decimal,
        ema_fast_period: usize,
        ema_slow_period: usize,
        atr_period: usize,
        atr_multiplier: Decimal,
    ) -> Self {
        Self {
            brick_size,
            ema_fast_period,
            ema_slow_period,
            atr_period,
            atr_multiplier,
            max_history: None,
        }
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brick_size <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveBrickSize(self.brick_size));
        }
        for (name, period) in [
            ("ema_fast_period", self.ema_fast_period),
            ("ema_slow_period", self.ema_slow_period),
            ("atr_period", self.atr_period),
        ] {
            if period == 0 {
                return Err(ConfigError::NonPositivePeriod { name });
            }
        }
        if self.ema_fast_period >= self.ema_slow_period {
            return Err(ConfigError::FastNotBelowSlow {
                fast: self.ema_fast_period,
                slow: self.ema_slow_period,
            });
        }
        if self.atr_multiplier <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveMultiplier(self.atr_multiplier));
        }
        if let Some(max_history) = self.max_history.filter(|x| *x < 2) {
            return Err(ConfigError::RetentionTooSmall { max_history });
        }
        Ok(())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a `.json` / `.yaml` / `.yml` file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let config: PipelineConfig = match path.extension().and_then(|x| x.to_str()) {
            Some("json") => {
                let value: JsonValue = serde_json::from_str(&text)?;
                serde_json::from_value(value)?
            }
            Some("yaml") | Some("yml") => {
                let value: YamlValue = serde_yaml::from_str(&text)?;
                serde_yaml::from_value(value)?
            }
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        config.validate()?;
        Ok(config)
    }
}
