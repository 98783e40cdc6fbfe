//! # check 子命令 CLI 定义
//!
//! 检查单个 Gaussian 优化/频率日志文件的有效性并打印提取结果。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::parsers::MarkerPolicy;
use crate::validate::ValidationPolicy;

/// 标记多次出现时的选取方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum MarkerChoice {
    /// Use the first occurrence of each section marker
    #[default]
    First,
    /// Use the last occurrence of each section marker
    Last,
}

impl std::fmt::Display for MarkerChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerChoice::First => write!(f, "first"),
            MarkerChoice::Last => write!(f, "last"),
        }
    }
}

impl From<MarkerChoice> for MarkerPolicy {
    fn from(choice: MarkerChoice) -> Self {
        match choice {
            MarkerChoice::First => MarkerPolicy::FirstMatch,
            MarkerChoice::Last => MarkerPolicy::LastMatch,
        }
    }
}

/// 校验失败的报告方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ValidationChoice {
    /// Run all checks and report every failure
    #[default]
    Collect,
    /// Stop at the first failed check
    FailFast,
}

impl std::fmt::Display for ValidationChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationChoice::Collect => write!(f, "collect"),
            ValidationChoice::FailFast => write!(f, "fail-fast"),
        }
    }
}

impl From<ValidationChoice> for ValidationPolicy {
    fn from(choice: ValidationChoice) -> Self {
        match choice {
            ValidationChoice::Collect => ValidationPolicy::CollectAll,
            ValidationChoice::FailFast => ValidationPolicy::FailFast,
        }
    }
}

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the Gaussian optimization/frequency log file
    pub log_file: PathBuf,

    /// Which occurrence wins when a section marker appears more than once
    #[arg(long, value_enum, default_value_t = MarkerChoice::First)]
    pub marker: MarkerChoice,

    /// How validation failures are reported
    #[arg(long, value_enum, default_value_t = ValidationChoice::Collect)]
    pub validation: ValidationChoice,
}
