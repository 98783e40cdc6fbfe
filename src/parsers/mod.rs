//! # 解析器模块
//!
//! 提供 Gaussian 优化/频率日志的扫描引擎与字段切分工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: fields, gaussian_log

pub mod fields;
pub mod gaussian_log;

pub use gaussian_log::{scan_lines, MarkerPolicy, ScanOptions};

use crate::error::{GausscheckError, Result};
use crate::models::ParsedLog;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 读取日志文件并扫描
///
/// 引擎本身只面向内存中的行序列，这里是文件路径的薄封装。
pub fn parse_log_file(path: &Path, options: &ScanOptions) -> Result<ParsedLog> {
    let file = File::open(path).map_err(|e| GausscheckError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let lines: Vec<String> = reader.lines().filter_map(|l| l.ok()).collect();

    scan_lines(&lines, options)
}
