//! # 谐振子热化学模型
//!
//! 吸附物只保留振动自由度（无平动、转动）。
//!
//! ## 公式
//! - ZPE = ½ Σ εᵢ
//! - U(T) = ZPE + Σ εᵢ / (exp(εᵢ/kT) − 1)
//! - S(T) = k Σ [xᵢ / (exp(xᵢ) − 1) − ln(1 − exp(−xᵢ))]，xᵢ = εᵢ/kT
//! - F = U − T·S
//!
//! ## 依赖关系
//! - 被 `thermo/mod.rs` 调用
//! - 振动求和函数同时被 `thermo/ideal_gas.rs` 使用

use crate::error::Result;
use crate::models::{ThermoPropertySet, ThermoStatus, VibrationalSpectrum};
use crate::thermo::constants::BOLTZMANN_EV;

/// 零点能 (eV)
pub(crate) fn zero_point_energy(energies: &[f64]) -> f64 {
    0.5 * energies.iter().sum::<f64>()
}

/// 0 K → T 的振动能变化 (eV)
pub(crate) fn vibrational_energy(energies: &[f64], temperature: f64) -> f64 {
    let kt = BOLTZMANN_EV * temperature;
    energies
        .iter()
        .map(|e| e / ((e / kt).exp() - 1.0))
        .sum()
}

/// 振动熵 (eV/K)
pub(crate) fn vibrational_entropy(energies: &[f64], temperature: f64) -> f64 {
    let kt = BOLTZMANN_EV * temperature;
    let sum: f64 = energies
        .iter()
        .map(|e| {
            let x = e / kt;
            x / (x.exp() - 1.0) - (1.0 - (-x).exp()).ln()
        })
        .sum();
    BOLTZMANN_EV * sum
}

/// 谐振子热化学计算器
#[derive(Debug, Clone)]
pub struct HarmonicThermo {
    spectrum: VibrationalSpectrum,
    vib_energies: Vec<f64>,
}

impl HarmonicThermo {
    /// 创建计算器；没有实频时报错
    pub fn new(spectrum: VibrationalSpectrum) -> Result<Self> {
        let vib_energies = spectrum.require_real_energies()?;
        Ok(HarmonicThermo {
            spectrum,
            vib_energies,
        })
    }

    pub fn zpe(&self) -> f64 {
        zero_point_energy(&self.vib_energies)
    }

    pub fn internal_energy(&self, temperature: f64) -> f64 {
        self.zpe() + vibrational_energy(&self.vib_energies, temperature)
    }

    pub fn entropy(&self, temperature: f64) -> f64 {
        vibrational_entropy(&self.vib_energies, temperature)
    }

    pub fn helmholtz_energy(&self, temperature: f64) -> f64 {
        self.internal_energy(temperature) - temperature * self.entropy(temperature)
    }

    /// 计算温度 T 下的全部热力学性质
    pub fn properties(&self, temperature: f64) -> ThermoPropertySet {
        let zpe = self.zpe();
        let u = self.internal_energy(temperature);
        let s = self.entropy(temperature);
        let f = u - temperature * s;

        ThermoPropertySet {
            temperature,
            pressure: None,
            spectrum: self.spectrum.clone(),
            zpe,
            entropy: s,
            internal_energy: Some(u),
            enthalpy: None,
            helmholtz: Some(f),
            gibbs: None,
            cv: Some(u - zpe),
            cp: None,
            status: ThermoStatus::Ads,
        }
    }
}
