//! `replay` crate 入口。
//!
//! 职责：从 CSV 回放 tick 驱动 `renkoflow` 流水线，并提供结果导出、一致性审计与
//! 跨线程中继（生产者/消费者）能力。
//!
//! 模块分工：
//! - `export`：三元组导出为 CSV 行或逐砖 JSON 消息。
//! - `audit`：砖形与趋势带不变量复核。
//! - `relay`：有界通道上的 tick 生产者与流水线消费者。

pub mod audit;
pub mod export;
pub mod relay;

pub use audit::{AuditReport, audit_outputs};
pub use export::{SignalRow, to_json_lines, write_csv, write_csv_file};
pub use relay::{RelayConfig, RelayError, RelayHandle, run_relay, spawn_relay};
