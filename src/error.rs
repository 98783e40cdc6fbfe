//! # 统一错误处理模块
//!
//! 定义 gausscheck 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// gausscheck 统一错误类型
#[derive(Error, Debug)]
pub enum GausscheckError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 结构性解码错误
    // ─────────────────────────────────────────────────────────────
    #[error("Required section missing or truncated: {0}")]
    MissingSection(String),

    #[error("Failed to parse numeric field: '{0}'")]
    NumericParse(String),

    // ─────────────────────────────────────────────────────────────
    // 语义校验错误
    // ─────────────────────────────────────────────────────────────
    #[error("Log did not end with normal termination; calculation crashed or log is truncated")]
    MalformedTermination,

    #[error("Structure did not fully converge")]
    NotConverged,

    #[error("Imaginary frequency detected: {0} cm^-1 is below -10")]
    ImaginaryFrequency(f64),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, GausscheckError>;
