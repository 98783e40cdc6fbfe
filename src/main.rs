//! # gausscheck - Gaussian 优化/频率日志检查器
//!
//! 从几何优化/频率计算日志中提取收敛表、低频列表与热化学汇总，
//! 并判断计算结果是否可用。
//!
//! ## 子命令
//! - `check` - 检查单个日志文件并打印提取结果
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (日志扫描引擎)
//!   │     ├── models/    (数据模型)
//!   │     └── validate   (语义校验)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;
mod validate;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
