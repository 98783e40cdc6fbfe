//! # 字段切分工具
//!
//! Gaussian 日志使用不规则多空格对齐列，数值采用 Fortran 的 D 指数记法。
//! 本模块提供对应的切分与解析辅助函数。
//!
//! ## 依赖关系
//! - 被 `parsers/gaussian_log.rs` 使用

use crate::error::{GausscheckError, Result};

/// 按给定的宽分隔符切分一行，丢弃空片段
///
/// 列间距不固定（2 个空格、4 个空格或更多都可能出现），更宽的间隔
/// 会产生空片段，行首行尾的空白同理，统一过滤掉。
pub fn split_on_gap<'a>(line: &'a str, gap: &str) -> Vec<&'a str> {
    line.split(gap)
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// 解析可能使用 Fortran D 指数记法的数值 token
///
/// 例如 `-1.234567D-05` 先替换为 `-1.234567E-05` 再转换。
pub fn parse_fortran_float(token: &str) -> Result<f64> {
    let normalized = token.trim().replace(['D', 'd'], "E");
    let value: f64 = normalized
        .parse()
        .map_err(|_| GausscheckError::NumericParse(token.trim().to_string()))?;

    if !value.is_finite() {
        return Err(GausscheckError::NumericParse(token.trim().to_string()));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_gap_collapses_wider_runs() {
        let line = "Zero-point correction=                           0.068712 (Hartree/Particle)";
        let fragments = split_on_gap(line, "    ");
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], "Zero-point correction=");
        assert_eq!(fragments[1], "0.068712 (Hartree/Particle)");
    }

    #[test]
    fn test_split_on_gap_no_empty_edge_fields() {
        let fragments = split_on_gap("    a    b    ", "    ");
        assert_eq!(fragments, vec!["a", "b"]);
    }

    #[test]
    fn test_split_on_gap_keeps_narrow_gaps_together() {
        // 两个空格不足以构成四空格分隔符
        let fragments = split_on_gap("Thermal correction to Energy=  0.073123", "    ");
        assert_eq!(fragments, vec!["Thermal correction to Energy=  0.073123"]);
    }

    #[test]
    fn test_parse_fortran_float_d_exponent() {
        assert!((parse_fortran_float("-1.234567D-05").unwrap() - (-1.234567e-5)).abs() < 1e-18);
        assert!((parse_fortran_float("3.2d+02").unwrap() - 320.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_fortran_float_plain_notation() {
        assert!((parse_fortran_float(" -75.519349 ").unwrap() - (-75.519349)).abs() < 1e-12);
    }

    #[test]
    fn test_parse_fortran_float_rejects_garbage() {
        assert!(matches!(
            parse_fortran_float("YES"),
            Err(GausscheckError::NumericParse(token)) if token == "YES"
        ));
    }

    #[test]
    fn test_parse_fortran_float_rejects_non_finite() {
        assert!(parse_fortran_float("inf").is_err());
        assert!(parse_fortran_float("NaN").is_err());
    }
}
