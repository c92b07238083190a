pub mod bar;
pub mod config;
pub mod constant;
pub mod engine;
pub mod history;
pub mod indicator;
pub mod logging;
pub mod receiver;
pub mod signal;
pub mod tick;

pub use bar::RenkoBrick;
pub use config::{ConfigLoader, PipelineConfig};
pub use constant::{ConfigError, DataError, Direction, IngestError, SignalKind, Trend};
pub use engine::{Pipeline, PipelineStage};
pub use history::{BrickHistory, PipelineOutput};
pub use indicator::{Atr, Ema, Indicator, IndicatorEngine, IndicatorSnapshot, Supertrend};
pub use logging::init_logging;
pub use receiver::{IngestSummary, OrderPolicy, TickReceiver, load_ticks, parse_datetime, read_ticks};
pub use signal::{Signal, SignalEvaluator};
pub use tick::{RenkoSynthesizer, Tick};

/// Process-scoped state owned by one stream.
pub type PipelineState = Pipeline;
