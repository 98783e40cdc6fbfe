//! # Gaussian 日志提取结果数据模型
//!
//! 存储从优化/频率计算日志中提取的收敛表、低频列表与热化学汇总。
//!
//! ## 依赖关系
//! - 被 `parsers/gaussian_log.rs`, `validate.rs` 使用
//! - 被 `commands/check.rs` 使用

use serde::{Deserialize, Serialize};

use crate::validate::ValidationIssue;

/// 收敛表的一行（某一监测量与其阈值的比较）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceRow {
    /// 当前值
    pub value: f64,

    /// 收敛阈值
    pub threshold: f64,

    /// 该量是否已收敛（行尾字段为 "YES"）
    pub converged: bool,
}

/// 优化收敛检查点（四个监测量 + 预测能量变化）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceTable {
    /// 最大受力
    pub maximum_force: ConvergenceRow,

    /// 均方根受力
    pub rms_force: ConvergenceRow,

    /// 最大位移
    pub maximum_displacement: ConvergenceRow,

    /// 均方根位移
    pub rms_displacement: ConvergenceRow,

    /// 预测下一步能量变化 (Hartree)，日志中为 Fortran D 指数记法
    pub predicted_energy_change: f64,
}

impl ConvergenceTable {
    /// 按日志顺序返回四行
    pub fn rows(&self) -> [&ConvergenceRow; 4] {
        [
            &self.maximum_force,
            &self.rms_force,
            &self.maximum_displacement,
            &self.rms_displacement,
        ]
    }

    /// 四个监测量是否全部收敛
    pub fn is_fully_converged(&self) -> bool {
        self.rows().iter().all(|row| row.converged)
    }
}

/// 热化学汇总（Hartree/Particle）
///
/// `electronic_energy` 是派生量，构造时由
/// `sum_of_electronic_and_zero_point_energies - zero_point_correction`
/// 计算得到，不单独存储于日志。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermoSummary {
    /// 零点振动能修正
    pub zero_point_correction: f64,

    /// 内能热修正
    pub thermal_correction_to_energy: f64,

    /// 焓热修正
    pub thermal_correction_to_enthalpy: f64,

    /// Gibbs 自由能热修正
    pub thermal_correction_to_gibbs: f64,

    /// 电子能 + 零点能
    pub sum_of_electronic_and_zero_point_energies: f64,

    /// 电子能 + 热力学内能
    pub sum_of_electronic_and_thermal_energies: f64,

    /// 电子能 + 热力学焓
    pub sum_of_electronic_and_thermal_enthalpies: f64,

    /// 电子能 + 热力学自由能
    pub sum_of_electronic_and_thermal_free_energies: f64,

    /// 纯电子能（派生量）
    pub electronic_energy: f64,
}

impl ThermoSummary {
    /// 由日志顺序的 8 个基础字段构造，并计算派生的电子能
    pub fn from_fields(fields: [f64; 8]) -> Self {
        let [zero_point_correction, thermal_correction_to_energy, thermal_correction_to_enthalpy, thermal_correction_to_gibbs, sum_of_electronic_and_zero_point_energies, sum_of_electronic_and_thermal_energies, sum_of_electronic_and_thermal_enthalpies, sum_of_electronic_and_thermal_free_energies] =
            fields;

        ThermoSummary {
            zero_point_correction,
            thermal_correction_to_energy,
            thermal_correction_to_enthalpy,
            thermal_correction_to_gibbs,
            sum_of_electronic_and_zero_point_energies,
            sum_of_electronic_and_thermal_energies,
            sum_of_electronic_and_thermal_enthalpies,
            sum_of_electronic_and_thermal_free_energies,
            electronic_energy: sum_of_electronic_and_zero_point_energies - zero_point_correction,
        }
    }

    /// 按日志顺序返回 (标签, 数值) 对，供表格输出使用
    pub fn labeled_fields(&self) -> [(&'static str, f64); 9] {
        [
            ("Zero-point correction", self.zero_point_correction),
            (
                "Thermal correction to Energy",
                self.thermal_correction_to_energy,
            ),
            (
                "Thermal correction to Enthalpy",
                self.thermal_correction_to_enthalpy,
            ),
            (
                "Thermal correction to Gibbs Free Energy",
                self.thermal_correction_to_gibbs,
            ),
            (
                "Sum of electronic and zero-point Energies",
                self.sum_of_electronic_and_zero_point_energies,
            ),
            (
                "Sum of electronic and thermal Energies",
                self.sum_of_electronic_and_thermal_energies,
            ),
            (
                "Sum of electronic and thermal Enthalpies",
                self.sum_of_electronic_and_thermal_enthalpies,
            ),
            (
                "Sum of electronic and thermal Free Energies",
                self.sum_of_electronic_and_thermal_free_energies,
            ),
            ("Electronic energy", self.electronic_energy),
        ]
    }
}

/// 整份日志的校验裁定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    /// 所有检查通过
    Valid,
    /// 至少一项检查失败，按检查顺序列出
    Invalid(Vec<ValidationIssue>),
}

/// 一次日志扫描的完整结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLog {
    /// 收敛检查点（未找到全收敛检查点时为 None）
    pub convergence: Option<ConvergenceTable>,

    /// 按出现顺序累积的低频振动频率 (cm^-1)
    pub frequencies: Vec<f64>,

    /// 热化学汇总（未找到区块时为 None）
    pub thermochemistry: Option<ThermoSummary>,

    /// 校验裁定
    pub verdict: Verdict,
}
