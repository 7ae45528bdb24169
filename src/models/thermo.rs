//! # 振动谱与热力学性质数据模型
//!
//! ## 依赖关系
//! - 被 `parsers/outcar.rs`、`parsers/freq_db.rs` 创建
//! - 被 `thermo/` 模块使用

use crate::error::{QthermoError, Result};
use crate::thermo::constants::{cm_to_ev, CM_UNIT_THRESHOLD, REAL_MODE_THRESHOLD};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 振动模式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeKind {
    Real,
    Imaginary,
}

/// 单个振动模式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VibrationalMode {
    /// 振动能量 hν (eV)，虚频保存其绝对值
    pub energy: f64,
    pub kind: ModeKind,
}

impl VibrationalMode {
    pub fn real(energy: f64) -> Self {
        VibrationalMode {
            energy,
            kind: ModeKind::Real,
        }
    }

    pub fn imaginary(energy: f64) -> Self {
        VibrationalMode {
            energy: energy.abs(),
            kind: ModeKind::Imaginary,
        }
    }

    /// 是否参与热力学求和
    pub fn is_active(&self) -> bool {
        self.kind == ModeKind::Real && self.energy > REAL_MODE_THRESHOLD
    }
}

/// 振动谱（统一为 eV）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationalSpectrum {
    modes: Vec<VibrationalMode>,
}

impl VibrationalSpectrum {
    /// 从已标记的 eV 模式构造
    pub fn from_modes(modes: Vec<VibrationalMode>) -> Self {
        VibrationalSpectrum { modes }
    }

    /// 从频率列表构造，自动判断单位
    ///
    /// 只要有一个值的绝对值大于 10，整组按 cm⁻¹ 处理并换算为 eV；
    /// 否则视为 eV。负值为虚频。
    pub fn from_frequencies(values: &[f64]) -> Self {
        let in_wavenumbers = values.iter().any(|v| v.abs() > CM_UNIT_THRESHOLD);
        let modes = values
            .iter()
            .map(|&v| {
                let energy = if in_wavenumbers { cm_to_ev(v) } else { v };
                if energy < 0.0 {
                    VibrationalMode::imaginary(energy)
                } else {
                    VibrationalMode::real(energy)
                }
            })
            .collect();
        VibrationalSpectrum { modes }
    }

    pub fn modes(&self) -> &[VibrationalMode] {
        &self.modes
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// 参与求和的实频能量 (eV)
    pub fn real_energies(&self) -> Vec<f64> {
        self.modes
            .iter()
            .filter(|m| m.is_active())
            .map(|m| m.energy)
            .collect()
    }

    /// 实频能量，若一个都没有则报错
    pub fn require_real_energies(&self) -> Result<Vec<f64>> {
        let energies = self.real_energies();
        if energies.is_empty() {
            return Err(QthermoError::NoRealFrequencies {
                imaginary: self.imaginary_count(),
            });
        }
        Ok(energies)
    }

    pub fn imaginary_count(&self) -> usize {
        self.modes
            .iter()
            .filter(|m| m.kind == ModeKind::Imaginary)
            .count()
    }

    /// 最大虚频幅值 (eV)
    pub fn largest_imaginary(&self) -> Option<f64> {
        self.modes
            .iter()
            .filter(|m| m.kind == ModeKind::Imaginary)
            .map(|m| m.energy)
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// 热力学处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermoStatus {
    Gas,
    Ads,
}

impl std::fmt::Display for ThermoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThermoStatus::Gas => write!(f, "gas"),
            ThermoStatus::Ads => write!(f, "ads"),
        }
    }
}

impl FromStr for ThermoStatus {
    type Err = QthermoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gas" => Ok(ThermoStatus::Gas),
            "ads" => Ok(ThermoStatus::Ads),
            other => Err(QthermoError::InvalidFormat(format!(
                "unknown thermo status '{}' (expected gas or ads)",
                other
            ))),
        }
    }
}

/// 热力学性质集合
///
/// 能量单位 eV，熵单位 eV/K。气相模型给出 H/G/Cp，
/// 谐振子模型给出 U/F/Cv。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoPropertySet {
    /// 温度 (K)
    pub temperature: f64,
    /// 压力 (Pa)，仅气相
    pub pressure: Option<f64>,
    /// 输入振动谱
    pub spectrum: VibrationalSpectrum,
    /// 零点能
    pub zpe: f64,
    /// 熵
    pub entropy: f64,
    /// 内能 U
    pub internal_energy: Option<f64>,
    /// 焓 H
    pub enthalpy: Option<f64>,
    /// Helmholtz 自由能 F
    pub helmholtz: Option<f64>,
    /// Gibbs 自由能 G
    pub gibbs: Option<f64>,
    /// U - ZPE
    pub cv: Option<f64>,
    /// H - ZPE
    pub cp: Option<f64>,
    pub status: ThermoStatus,
}

impl ThermoPropertySet {
    /// 自由能修正：优先 G，其次 F
    pub fn free_energy(&self) -> Option<f64> {
        self.gibbs.or(self.helmholtz)
    }

    /// T·S (eV)
    pub fn ts(&self) -> f64 {
        self.temperature * self.entropy
    }
}

impl std::fmt::Display for ThermoPropertySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Thermodynamic Properties ({})", self.status)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Temperature: {:.2} K", self.temperature)?;
        if let Some(p) = self.pressure {
            writeln!(f, "Pressure: {} Pa", p)?;
        }
        writeln!(f, "Number of frequencies: {}", self.spectrum.len())?;
        if self.spectrum.imaginary_count() > 0 {
            writeln!(
                f,
                "Imaginary modes excluded: {}",
                self.spectrum.imaginary_count()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Energy corrections (eV):")?;
        writeln!(f, "  ZPE (Zero-point energy):      {:.6}", self.zpe)?;
        if let Some(cp) = self.cp {
            writeln!(f, "  Cp (Heat capacity):           {:.6}", cp)?;
        }
        if let Some(cv) = self.cv {
            writeln!(f, "  Cv (Heat capacity):           {:.6}", cv)?;
        }
        writeln!(f)?;
        if let Some(h) = self.enthalpy {
            writeln!(f, "Enthalpy (H):                   {:.6} eV", h)?;
        }
        if let Some(u) = self.internal_energy {
            writeln!(f, "Internal energy (U):            {:.6} eV", u)?;
        }
        writeln!(f, "Entropy (S):                    {:.8} eV/K", self.entropy)?;
        writeln!(f, "TS:                             {:.6} eV", self.ts())?;
        if let Some(g) = self.gibbs {
            writeln!(f, "Gibbs free energy (G):          {:.6} eV", g)?;
        }
        if let Some(a) = self.helmholtz {
            writeln!(f, "Helmholtz free energy (F):      {:.6} eV", a)?;
        }
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wavenumber_detection() {
        let spec = VibrationalSpectrum::from_frequencies(&[649.6, 1339.3]);
        let e = spec.real_energies();
        assert!((e[0] - 649.6 * 1.2398e-4).abs() < 1e-12);
        assert!((e[1] - 1339.3 * 1.2398e-4).abs() < 1e-12);
    }

    #[test]
    fn test_ev_input_kept() {
        let spec = VibrationalSpectrum::from_frequencies(&[0.05, 0.2, 0.45]);
        assert_eq!(spec.real_energies(), vec![0.05, 0.2, 0.45]);
    }

    #[test]
    fn test_negative_magnitude_triggers_wavenumbers() {
        // 只有虚频超过 10 时也按 cm⁻¹ 处理
        let spec = VibrationalSpectrum::from_frequencies(&[-150.0, 5.0]);
        assert_eq!(spec.imaginary_count(), 1);
        let largest = spec.largest_imaginary().unwrap();
        assert!((largest - 150.0 * 1.2398e-4).abs() < 1e-12);
        assert!((spec.real_energies()[0] - 5.0 * 1.2398e-4).abs() < 1e-12);
    }

    #[test]
    fn test_near_zero_modes_filtered() {
        let spec = VibrationalSpectrum::from_frequencies(&[0.0, 1e-8, 0.1]);
        assert_eq!(spec.real_energies(), vec![0.1]);
        assert_eq!(spec.imaginary_count(), 0);
    }

    #[test]
    fn test_no_real_frequencies() {
        let spec = VibrationalSpectrum::from_frequencies(&[-0.01, -0.02]);
        match spec.require_real_energies() {
            Err(QthermoError::NoRealFrequencies { imaginary }) => assert_eq!(imaginary, 2),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("GAS".parse::<ThermoStatus>().unwrap(), ThermoStatus::Gas);
        assert!("liquid".parse::<ThermoStatus>().is_err());
    }
}
