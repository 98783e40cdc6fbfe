//! # Gaussian 优化/频率日志扫描引擎
//!
//! 对已载入内存的日志行做一次线性定位，再解码三个结果区块：
//! 收敛表（`Converged?`）、低频列表（`Low frequencies`）、
//! 热化学汇总（`Zero-point correction`），最后交给 `validate` 裁定。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `commands/check.rs` 使用
//! - 使用 `parsers/fields.rs`, `models/summary.rs`, `validate.rs`

use crate::error::{GausscheckError, Result};
use crate::models::{ConvergenceRow, ConvergenceTable, ParsedLog, ThermoSummary, Verdict};
use crate::validate::{self, ValidationPolicy};

use super::fields::{parse_fortran_float, split_on_gap};

/// 收敛检查点标记（表头行）
const CONVERGED_MARKER: &str = "Converged?";

/// 低频行标记，可多次出现，每次都累积
const LOW_FREQ_MARKER: &str = "Low frequencies";

/// 热化学区块标记，标记行本身是区块首行
const THERMO_MARKER: &str = "Zero-point correction";

/// 热化学区块标签与数值之间的宽分隔符
const WIDE_GAP: &str = "    ";

/// 同一标记多次出现时取哪一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPolicy {
    /// 取第一次出现（对收敛表：第一个全收敛检查点）
    #[default]
    FirstMatch,
    /// 取最后一次出现
    LastMatch,
}

/// 扫描配置
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub marker: MarkerPolicy,
    pub validation: ValidationPolicy,
}

/// 单次线性扫描记录的各标记出现行号
#[derive(Debug, Default)]
struct SectionIndex {
    converged: Vec<usize>,
    low_frequencies: Vec<usize>,
    thermochemistry: Vec<usize>,
}

/// 扫描日志行并产出完整解析结果
///
/// 结构性错误（区块被截断、数值无法解析）总是返回 `Err`；
/// 语义校验失败在 `CollectAll` 下记入裁定，在 `FailFast` 下
/// 以首个失败项作为错误返回。对相同输入结果完全确定。
pub fn scan_lines(lines: &[String], options: &ScanOptions) -> Result<ParsedLog> {
    let index = locate_sections(lines);

    let convergence = select_convergence(lines, &index.converged, options.marker)?;
    let frequencies = decode_frequencies(lines, &index.low_frequencies)?;
    let thermochemistry = match pick_marker(&index.thermochemistry, options.marker) {
        Some(start) => Some(decode_thermochemistry_at(lines, start)?),
        None => None,
    };

    let verdict = validate::run_checks(
        lines,
        convergence.as_ref(),
        &frequencies,
        thermochemistry.is_some(),
    );

    if options.validation == ValidationPolicy::FailFast {
        if let Verdict::Invalid(issues) = &verdict {
            return Err(issues[0].clone().into());
        }
    }

    Ok(ParsedLog {
        convergence,
        frequencies,
        thermochemistry,
        verdict,
    })
}

/// 一次前向遍历，记录所有标记出现位置（子串包含，不做锚定）
fn locate_sections(lines: &[String]) -> SectionIndex {
    let mut index = SectionIndex::default();

    for (i, line) in lines.iter().enumerate() {
        if line.contains(CONVERGED_MARKER) {
            index.converged.push(i);
        }
        if line.contains(LOW_FREQ_MARKER) {
            index.low_frequencies.push(i);
        }
        if line.contains(THERMO_MARKER) {
            index.thermochemistry.push(i);
        }
    }

    index
}

fn pick_marker(occurrences: &[usize], policy: MarkerPolicy) -> Option<usize> {
    match policy {
        MarkerPolicy::FirstMatch => occurrences.first().copied(),
        MarkerPolicy::LastMatch => occurrences.last().copied(),
    }
}

/// 在各收敛检查点中按策略选取全收敛的一个
///
/// 未全收敛的检查点只是跳过，优化可能在后面的步骤收敛。
fn select_convergence(
    lines: &[String],
    markers: &[usize],
    policy: MarkerPolicy,
) -> Result<Option<ConvergenceTable>> {
    let mut selected = None;

    for &start in markers {
        if let Some(table) = decode_convergence_at(lines, start)? {
            selected = Some(table);
            if policy == MarkerPolicy::FirstMatch {
                break;
            }
        }
    }

    Ok(selected)
}

/// 解码一个收敛检查点
///
/// 标记行之后是四行监测量，随后一行是预测能量变化。
/// 四行末字段不全为 "YES" 时返回 `Ok(None)`；
/// 标记后不足 5 行则日志被截断，返回 `MissingSection`。
fn decode_convergence_at(lines: &[String], start: usize) -> Result<Option<ConvergenceTable>> {
    if lines.len() <= start + 5 {
        return Err(GausscheckError::MissingSection(
            "convergence table".to_string(),
        ));
    }

    let rows = &lines[start + 1..start + 5];
    if !rows
        .iter()
        .all(|row| row.split_whitespace().last() == Some("YES"))
    {
        return Ok(None);
    }

    let mut decoded = [ConvergenceRow {
        value: 0.0,
        threshold: 0.0,
        converged: false,
    }; 4];
    for (slot, row) in decoded.iter_mut().zip(rows) {
        *slot = decode_convergence_row(row)?;
    }

    // 预测能量变化行形如 "Predicted change in Energy=-1.234567D-05"
    let energy_line = &lines[start + 5];
    let (_, value) = energy_line
        .split_once('=')
        .ok_or_else(|| GausscheckError::NumericParse(energy_line.trim().to_string()))?;

    Ok(Some(ConvergenceTable {
        maximum_force: decoded[0],
        rms_force: decoded[1],
        maximum_displacement: decoded[2],
        rms_displacement: decoded[3],
        predicted_energy_change: parse_fortran_float(value)?,
    }))
}

/// 解码收敛表的一行，末三个字段依次为数值、阈值、收敛标志
fn decode_convergence_row(line: &str) -> Result<ConvergenceRow> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(GausscheckError::MissingSection(
            "convergence table".to_string(),
        ));
    }

    Ok(ConvergenceRow {
        value: parse_fortran_float(fields[fields.len() - 3])?,
        threshold: parse_fortran_float(fields[fields.len() - 2])?,
        converged: fields[fields.len() - 1] == "YES",
    })
}

/// 按出现顺序累积所有低频行上的频率值
///
/// 虚频不会中止解码，是否可接受由校验阶段判断。
fn decode_frequencies(lines: &[String], markers: &[usize]) -> Result<Vec<f64>> {
    let mut frequencies = Vec::new();

    for &index in markers {
        let line = &lines[index];
        let tail = match line.find(LOW_FREQ_MARKER) {
            Some(pos) => &line[pos + LOW_FREQ_MARKER.len()..],
            None => continue,
        };

        for token in tail.split_whitespace() {
            // 标签后的 "---" 分隔符
            if token == "---" {
                continue;
            }
            frequencies.push(parse_fortran_float(token)?);
        }
    }

    Ok(frequencies)
}

/// 解码热化学区块：标记行起连续 8 行，每行一个基础字段
fn decode_thermochemistry_at(lines: &[String], start: usize) -> Result<ThermoSummary> {
    if lines.len() < start + 8 {
        return Err(GausscheckError::MissingSection("thermochemistry".to_string()));
    }

    let mut fields = [0.0f64; 8];
    for (slot, line) in fields.iter_mut().zip(&lines[start..start + 8]) {
        *slot = decode_thermo_value(line)?;
    }

    Ok(ThermoSummary::from_fields(fields))
}

/// 从标签行提取数值：宽分隔符切分、滤空、取末片段的首个 token
///
/// 末片段可能带单位尾注，如 "0.068712 (Hartree/Particle)"。
fn decode_thermo_value(line: &str) -> Result<f64> {
    let fragments = split_on_gap(line, WIDE_GAP);
    let token = fragments
        .last()
        .and_then(|fragment| fragment.split_whitespace().next())
        .ok_or_else(|| GausscheckError::MissingSection("thermochemistry".to_string()))?;

    token
        .parse()
        .map_err(|_| GausscheckError::NumericParse(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationIssue;

    fn to_lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn convergence_block(energy: &str) -> Vec<String> {
        let mut block = to_lines(&[
            "         Item               Value     Threshold  Converged?",
            "         Maximum Force            0.000013     0.000450     YES",
            "         RMS     Force            0.000007     0.000300     YES",
            "         Maximum Displacement     0.000294     0.001800     YES",
            "         RMS     Displacement     0.000179     0.001200     YES",
        ]);
        block.push(format!("         Predicted change in Energy={}", energy));
        block
    }

    fn thermo_block() -> Vec<String> {
        to_lines(&[
            " Zero-point correction=                           0.068712 (Hartree/Particle)",
            " Thermal correction to Energy=                    0.071571",
            " Thermal correction to Enthalpy=                  0.072515",
            " Thermal correction to Gibbs Free Energy=         0.051253",
            " Sum of electronic and zero-point Energies=            -75.516632",
            " Sum of electronic and thermal Energies=               -75.513773",
            " Sum of electronic and thermal Enthalpies=             -75.512829",
            " Sum of electronic and thermal Free Energies=          -75.534091",
        ])
    }

    fn well_formed_log() -> Vec<String> {
        let mut lines =
            vec![" SCF Done:  E(RHF) =  -75.5853702426     A.U. after    9 cycles".to_string()];
        lines.extend(convergence_block("-1.234567D-05"));
        lines.push(" Low frequencies ---   -0.5    0.3   12.7".to_string());
        lines.push(" Low frequencies --- 1640.2 3807.5 3911.1".to_string());
        lines.extend(thermo_block());
        lines.push(" Normal termination of Gaussian 16 at Tue Aug 26 10:00:00 2026.".to_string());
        lines
    }

    #[test]
    fn test_scan_well_formed_log() {
        let parsed = scan_lines(&well_formed_log(), &ScanOptions::default()).unwrap();

        assert_eq!(parsed.verdict, Verdict::Valid);
        assert_eq!(
            parsed.frequencies,
            vec![-0.5, 0.3, 12.7, 1640.2, 3807.5, 3911.1]
        );

        let table = parsed.convergence.expect("convergence table decoded");
        assert!(table.is_fully_converged());
        assert!((table.predicted_energy_change - (-1.234567e-5)).abs() < 1e-15);
        assert!((table.maximum_force.value - 0.000013).abs() < 1e-12);
        assert!((table.rms_displacement.threshold - 0.001200).abs() < 1e-12);

        let thermo = parsed.thermochemistry.expect("thermochemistry decoded");
        assert!((thermo.zero_point_correction - 0.068712).abs() < 1e-12);
        assert!(
            (thermo.electronic_energy
                - (thermo.sum_of_electronic_and_zero_point_energies
                    - thermo.zero_point_correction))
                .abs()
                < 1e-9
        );
        assert!((thermo.electronic_energy - (-75.585344)).abs() < 1e-6);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let lines = well_formed_log();
        let first = scan_lines(&lines, &ScanOptions::default()).unwrap();
        let second = scan_lines(&lines, &ScanOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unconverged_checkpoint_is_skipped_not_decoded() {
        let mut lines = convergence_block("-1.0D-03");
        lines[4] = "         RMS     Displacement     0.004179     0.001200     NO".to_string();
        lines.push(" Normal termination of Gaussian 16.".to_string());
        let parsed = scan_lines(&lines, &ScanOptions::default()).unwrap();

        assert!(parsed.convergence.is_none());
        match parsed.verdict {
            Verdict::Invalid(ref issues) => {
                assert!(issues.contains(&ValidationIssue::NotConverged))
            }
            Verdict::Valid => panic!("NO row must leave the log unconverged"),
        }
    }

    #[test]
    fn test_later_converged_checkpoint_wins_over_skipped_one() {
        let mut lines = convergence_block("-9.9D-03");
        lines[1] = "         Maximum Force            0.012013     0.000450     NO".to_string();
        lines.extend(convergence_block("-1.234567D-05"));
        lines.push(" Normal termination of Gaussian 16.".to_string());

        let parsed = scan_lines(&lines, &ScanOptions::default()).unwrap();
        let table = parsed.convergence.expect("second checkpoint decoded");
        assert!((table.predicted_energy_change - (-1.234567e-5)).abs() < 1e-15);
    }

    #[test]
    fn test_marker_policy_first_vs_last() {
        let mut lines = convergence_block("-2.0D-04");
        lines.extend(convergence_block("-3.0D-06"));
        lines.push(" Normal termination of Gaussian 16.".to_string());

        let first = scan_lines(&lines, &ScanOptions::default()).unwrap();
        assert!(
            (first.convergence.unwrap().predicted_energy_change - (-2.0e-4)).abs() < 1e-15
        );

        let options = ScanOptions {
            marker: MarkerPolicy::LastMatch,
            ..Default::default()
        };
        let last = scan_lines(&lines, &options).unwrap();
        assert!(
            (last.convergence.unwrap().predicted_energy_change - (-3.0e-6)).abs() < 1e-15
        );
    }

    #[test]
    fn test_truncated_convergence_block_is_structural_error() {
        let lines = to_lines(&[
            "         Item               Value     Threshold  Converged?",
            "         Maximum Force            0.000013     0.000450     YES",
        ]);
        assert!(matches!(
            scan_lines(&lines, &ScanOptions::default()),
            Err(GausscheckError::MissingSection(section)) if section == "convergence table"
        ));
    }

    #[test]
    fn test_imaginary_frequency_reported_with_value() {
        let mut lines = well_formed_log();
        lines[7] = " Low frequencies ---  -15.2    0.3   12.7".to_string();
        let parsed = scan_lines(&lines, &ScanOptions::default()).unwrap();

        // 虚频不中止解码，其余数值仍被累积
        assert_eq!(parsed.frequencies[..3], [-15.2, 0.3, 12.7]);
        assert_eq!(
            parsed.verdict,
            Verdict::Invalid(vec![ValidationIssue::ImaginaryFrequency(-15.2)])
        );
    }

    #[test]
    fn test_truncated_log_is_invalid() {
        let mut lines = well_formed_log();
        lines.pop();
        let parsed = scan_lines(&lines, &ScanOptions::default()).unwrap();
        match parsed.verdict {
            Verdict::Invalid(issues) => {
                assert_eq!(issues[0], ValidationIssue::MalformedTermination)
            }
            Verdict::Valid => panic!("log without termination line must not validate"),
        }
    }

    #[test]
    fn test_missing_thermochemistry_is_invalid() {
        let lines: Vec<String> = well_formed_log()
            .into_iter()
            .filter(|line| !line.contains(THERMO_MARKER))
            .collect();
        let parsed = scan_lines(&lines, &ScanOptions::default()).unwrap();
        match parsed.verdict {
            Verdict::Invalid(issues) => {
                assert!(issues.contains(&ValidationIssue::MissingThermochemistry))
            }
            Verdict::Valid => panic!("missing thermochemistry must not validate"),
        }
    }

    #[test]
    fn test_thermo_block_truncated_at_eof() {
        let lines = to_lines(&[
            " Zero-point correction=                           0.068712",
            " Thermal correction to Energy=                    0.071571",
        ]);
        assert!(matches!(
            scan_lines(&lines, &ScanOptions::default()),
            Err(GausscheckError::MissingSection(section)) if section == "thermochemistry"
        ));
    }

    #[test]
    fn test_thermo_bad_numeric_token() {
        let mut lines = well_formed_log();
        lines[10] = " Thermal correction to Energy=                    n/a".to_string();
        assert!(matches!(
            scan_lines(&lines, &ScanOptions::default()),
            Err(GausscheckError::NumericParse(token)) if token == "n/a"
        ));
    }

    #[test]
    fn test_thermo_value_pipeline_per_label_line() {
        let expected = [
            0.068712, 0.071571, 0.072515, 0.051253, -75.516632, -75.513773, -75.512829,
            -75.534091,
        ];
        for (line, want) in thermo_block().iter().zip(expected) {
            let got = decode_thermo_value(line).unwrap();
            assert!((got - want).abs() < 1e-12, "line {:?} -> {}", line, got);
        }
    }

    #[test]
    fn test_fail_fast_surfaces_first_issue_as_error() {
        let mut lines = well_formed_log();
        lines.pop();
        let options = ScanOptions {
            validation: ValidationPolicy::FailFast,
            ..Default::default()
        };
        assert!(matches!(
            scan_lines(&lines, &options),
            Err(GausscheckError::MalformedTermination)
        ));
    }

    #[test]
    fn test_fail_fast_on_imaginary_frequency() {
        let mut lines = well_formed_log();
        lines[7] = " Low frequencies ---  -15.2    0.3   12.7".to_string();
        let options = ScanOptions {
            validation: ValidationPolicy::FailFast,
            ..Default::default()
        };
        assert!(matches!(
            scan_lines(&lines, &options),
            Err(GausscheckError::ImaginaryFrequency(value)) if value == -15.2
        ));
    }

    #[test]
    fn test_empty_document() {
        let parsed = scan_lines(&[], &ScanOptions::default()).unwrap();
        assert!(parsed.convergence.is_none());
        assert!(parsed.frequencies.is_empty());
        assert!(parsed.thermochemistry.is_none());
        match parsed.verdict {
            Verdict::Invalid(issues) => {
                assert_eq!(issues[0], ValidationIssue::MalformedTermination)
            }
            Verdict::Valid => panic!("empty document must not validate"),
        }
    }
}
