//! # check 子命令实现
//!
//! 读取日志文件、运行扫描引擎并渲染提取结果与裁定。
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `parsers/`, `models/`, `utils/output.rs`

use crate::cli::check::CheckArgs;
use crate::error::Result;
use crate::models::{ConvergenceTable, ParsedLog, ThermoSummary, Verdict};
use crate::parsers::{self, ScanOptions};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 收敛表显示行
#[derive(Debug, Clone, Tabled)]
struct ConvergenceDisplayRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Threshold")]
    threshold: String,
    #[tabled(rename = "Converged?")]
    converged: &'static str,
}

/// 热化学汇总显示行
#[derive(Debug, Clone, Tabled)]
struct ThermoDisplayRow {
    #[tabled(rename = "Quantity")]
    quantity: &'static str,
    #[tabled(rename = "Value (Hartree)")]
    value: String,
}

/// 执行日志检查
pub fn execute(args: CheckArgs) -> Result<()> {
    output::print_header("Checking Gaussian Log");
    output::print_info(&format!("Reading '{}'", args.log_file.display()));

    let options = ScanOptions {
        marker: args.marker.into(),
        validation: args.validation.into(),
    };
    let parsed = parsers::parse_log_file(&args.log_file, &options)?;

    render(&parsed);

    // 非零退出码交给 main 统一处理
    match parsed.verdict {
        Verdict::Valid => Ok(()),
        Verdict::Invalid(issues) => Err(issues[0].clone().into()),
    }
}

fn render(parsed: &ParsedLog) {
    match &parsed.convergence {
        Some(table) => print_convergence(table),
        None => output::print_warning("No fully converged checkpoint found."),
    }

    if parsed.frequencies.is_empty() {
        output::print_warning("No low frequencies found.");
    } else {
        let formatted: Vec<String> = parsed
            .frequencies
            .iter()
            .map(|f| format!("{:.1}", f))
            .collect();
        output::print_info(&format!("Low frequencies (cm^-1): {}", formatted.join("  ")));
    }

    match &parsed.thermochemistry {
        Some(thermo) => print_thermochemistry(thermo),
        None => output::print_warning("No thermochemistry section found."),
    }

    match &parsed.verdict {
        Verdict::Valid => output::print_success("Log is valid."),
        Verdict::Invalid(issues) => {
            for issue in issues {
                output::print_warning(&format!("Check failed: {}", issue));
            }
        }
    }
}

fn print_convergence(table: &ConvergenceTable) {
    output::print_header("Convergence");

    let items = [
        "Maximum Force",
        "RMS Force",
        "Maximum Displacement",
        "RMS Displacement",
    ];
    let rows: Vec<ConvergenceDisplayRow> = items
        .into_iter()
        .zip(table.rows())
        .map(|(item, row)| ConvergenceDisplayRow {
            item,
            value: format!("{:.6}", row.value),
            threshold: format!("{:.6}", row.threshold),
            converged: if row.converged { "YES" } else { "NO" },
        })
        .collect();

    println!("{}", Table::new(&rows));
    output::print_info(&format!(
        "Predicted change in energy: {:e} Hartree",
        table.predicted_energy_change
    ));
}

fn print_thermochemistry(thermo: &ThermoSummary) {
    output::print_header("Thermochemistry");

    let rows: Vec<ThermoDisplayRow> = thermo
        .labeled_fields()
        .into_iter()
        .map(|(quantity, value)| ThermoDisplayRow {
            quantity,
            value: format!("{:.6}", value),
        })
        .collect();

    println!("{}", Table::new(&rows));
}
