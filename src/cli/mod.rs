//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `check`: 检查单个 Gaussian 日志并打印提取结果
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: check

pub mod check;

use clap::{Parser, Subcommand};

/// gausscheck - Gaussian 优化/频率日志检查器
#[derive(Parser)]
#[command(name = "gausscheck")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Gaussian geometry optimization / frequency log checker", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Check a Gaussian optimization/frequency log and print extracted results
    Check(check::CheckArgs),
}
