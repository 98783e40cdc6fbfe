//! # 日志校验模块
//!
//! 对解码完成的日志状态按固定顺序执行语义检查，并按策略归约为裁定。
//! 解码本身从不被检查结果打断；策略只决定如何报告失败。
//!
//! ## 检查顺序
//! 1. 末行包含正常终止标记
//! 2. 收敛检查点存在且四项全部收敛
//! 3. 无虚频（低于 -10 cm^-1 的频率）
//! 4. 热化学区块存在
//! 5. 低频列表非空
//!
//! ## 依赖关系
//! - 被 `parsers/gaussian_log.rs` 使用
//! - 使用 `models/summary.rs`, `error.rs`

use serde::{Deserialize, Serialize};

use crate::error::GausscheckError;
use crate::models::{ConvergenceTable, Verdict};

/// 正常终止标记，仅在末行检查
pub const TERMINATION_MARKER: &str = "Normal termination";

/// 低于此值 (cm^-1) 的频率视为虚频
pub const IMAGINARY_THRESHOLD: f64 = -10.0;

/// 校验失败的归约策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// 首个失败的检查立即作为错误返回
    FailFast,
    /// 执行全部检查，裁定中列出所有失败项
    #[default]
    CollectAll,
}

/// 语义校验问题
///
/// 与 `GausscheckError` 的结构性解码错误不同，这些是对一份可解码日志
/// 的判断，可克隆、可序列化，随 `Verdict` 一起返回。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationIssue {
    /// 末行缺少正常终止标记
    MalformedTermination,
    /// 未找到全部收敛的检查点
    NotConverged,
    /// 首个低于阈值的虚频数值
    ImaginaryFrequency(f64),
    /// 未找到热化学区块
    MissingThermochemistry,
    /// 未找到任何低频行
    MissingFrequencies,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MalformedTermination => {
                write!(f, "log did not end with normal termination")
            }
            ValidationIssue::NotConverged => write!(f, "structure did not fully converge"),
            ValidationIssue::ImaginaryFrequency(value) => {
                write!(f, "imaginary frequency detected: {} cm^-1", value)
            }
            ValidationIssue::MissingThermochemistry => {
                write!(f, "thermochemistry section not found")
            }
            ValidationIssue::MissingFrequencies => write!(f, "no low frequencies found"),
        }
    }
}

impl From<ValidationIssue> for GausscheckError {
    fn from(issue: ValidationIssue) -> Self {
        match issue {
            ValidationIssue::MalformedTermination => GausscheckError::MalformedTermination,
            ValidationIssue::NotConverged => GausscheckError::NotConverged,
            ValidationIssue::ImaginaryFrequency(value) => {
                GausscheckError::ImaginaryFrequency(value)
            }
            ValidationIssue::MissingThermochemistry => {
                GausscheckError::MissingSection("thermochemistry".to_string())
            }
            ValidationIssue::MissingFrequencies => {
                GausscheckError::MissingSection("low frequencies".to_string())
            }
        }
    }
}

/// 对解码状态执行全部检查，返回裁定
///
/// 空文档在第 1 项检查即失败。
pub fn run_checks(
    lines: &[String],
    convergence: Option<&ConvergenceTable>,
    frequencies: &[f64],
    has_thermochemistry: bool,
) -> Verdict {
    let mut issues = Vec::new();

    let terminated = lines
        .last()
        .is_some_and(|line| line.contains(TERMINATION_MARKER));
    if !terminated {
        issues.push(ValidationIssue::MalformedTermination);
    }

    if !convergence.is_some_and(ConvergenceTable::is_fully_converged) {
        issues.push(ValidationIssue::NotConverged);
    }

    if let Some(&value) = frequencies.iter().find(|f| **f < IMAGINARY_THRESHOLD) {
        issues.push(ValidationIssue::ImaginaryFrequency(value));
    }

    if !has_thermochemistry {
        issues.push(ValidationIssue::MissingThermochemistry);
    }

    if frequencies.is_empty() {
        issues.push(ValidationIssue::MissingFrequencies);
    }

    if issues.is_empty() {
        Verdict::Valid
    } else {
        Verdict::Invalid(issues)
    }
}
