//! # 数据模型模块
//!
//! 提供日志提取结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `validate.rs`, `commands/` 模块使用
//! - 子模块: summary

pub mod summary;

pub use summary::{ConvergenceRow, ConvergenceTable, ParsedLog, ThermoSummary, Verdict};
