pub mod atr;
pub mod core;
pub mod ema;
pub mod manager;
pub mod supertrend;

pub use atr::Atr;
pub use core::Indicator;
pub use ema::Ema;
pub use manager::{IndicatorEngine, IndicatorSnapshot};
pub use supertrend::Supertrend;
