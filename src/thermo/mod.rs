//! # 热化学模块
//!
//! 从振动谱计算热力学性质（ZPE、H/U、S、G/F、Cp/Cv），
//! 并组合为反应自由能。
//!
//! ## 模型
//! - 理想气体（气相分子）：平动 + 转动 + 振动 + 电子
//! - 谐振子（吸附物）：仅振动
//!
//! ## 依赖关系
//! - 被 `commands/thermo.rs`、`commands/reaction.rs` 调用
//! - 使用 `models/thermo.rs`、`models/molecule.rs`
//! - 子模块: constants, elements, gas_params, geometries, harmonic, ideal_gas, reaction

pub mod constants;
pub mod elements;
pub mod gas_params;
pub mod geometries;
pub mod harmonic;
pub mod ideal_gas;
pub mod reaction;

pub use gas_params::GasParameters;
pub use geometries::reference_molecule;
pub use harmonic::HarmonicThermo;
pub use ideal_gas::IdealGasThermo;
pub use reaction::{equilibrium_potential, reaction_free_energy, species_free_energy};

use crate::error::{QthermoError, Result};
use crate::models::{Molecule, ThermoPropertySet, VibrationalSpectrum};
use constants::{DEFAULT_PRESSURE, DEFAULT_TEMPERATURE};

/// 计算条件
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoConditions {
    /// 温度 (K)
    pub temperature: f64,
    /// 压力 (Pa)，谐振子模型忽略
    pub pressure: f64,
}

impl Default for ThermoConditions {
    fn default() -> Self {
        ThermoConditions {
            temperature: DEFAULT_TEMPERATURE,
            pressure: DEFAULT_PRESSURE,
        }
    }
}

impl ThermoConditions {
    pub fn new(temperature: f64, pressure: f64) -> Result<Self> {
        let conditions = ThermoConditions {
            temperature,
            pressure,
        };
        conditions.validate()?;
        Ok(conditions)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.temperature > 0.0) {
            return Err(QthermoError::InvalidArgument(format!(
                "temperature must be positive, got {} K",
                self.temperature
            )));
        }
        if !(self.pressure > 0.0) {
            return Err(QthermoError::InvalidArgument(format!(
                "pressure must be positive, got {} Pa",
                self.pressure
            )));
        }
        Ok(())
    }
}

/// 统计力学模型选择
#[derive(Debug, Clone)]
pub enum ThermoModel {
    /// 理想气体；`molecule` 为空时使用伪几何结构
    IdealGas {
        species: String,
        params: GasParameters,
        molecule: Option<Molecule>,
    },
    /// 谐振子（吸附物）
    Harmonic,
}

impl ThermoModel {
    /// 按物种名查表构造理想气体模型
    ///
    /// 内置气体使用参考结构，其余物种退回伪几何结构。
    pub fn ideal_gas(species: impl Into<String>) -> Self {
        let species = species.into();
        let params = GasParameters::lookup(&species);
        let molecule = reference_molecule(&species);
        ThermoModel::IdealGas {
            species,
            params,
            molecule,
        }
    }
}

/// 按模型计算热力学性质
pub fn compute_thermo(
    spectrum: &VibrationalSpectrum,
    model: &ThermoModel,
    conditions: &ThermoConditions,
) -> Result<ThermoPropertySet> {
    conditions.validate()?;

    match model {
        ThermoModel::IdealGas {
            species,
            params,
            molecule,
        } => {
            let gas = IdealGasThermo::new(species.as_str(), spectrum.clone(), *params, molecule.as_ref())?;
            Ok(gas.properties(conditions.temperature, conditions.pressure))
        }
        ThermoModel::Harmonic => {
            let ads = HarmonicThermo::new(spectrum.clone())?;
            Ok(ads.properties(conditions.temperature))
        }
    }
}

/// 气相热化学（频率单位自动判断）
pub fn gas_thermo(
    species: &str,
    frequencies: &[f64],
    conditions: &ThermoConditions,
) -> Result<ThermoPropertySet> {
    compute_thermo(
        &VibrationalSpectrum::from_frequencies(frequencies),
        &ThermoModel::ideal_gas(species),
        conditions,
    )
}

/// 吸附物热化学（频率单位自动判断）
pub fn ads_thermo(frequencies: &[f64], conditions: &ThermoConditions) -> Result<ThermoPropertySet> {
    compute_thermo(
        &VibrationalSpectrum::from_frequencies(frequencies),
        &ThermoModel::Harmonic,
        conditions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThermoStatus;

    #[test]
    fn test_model_dispatch() {
        let conditions = ThermoConditions::default();

        let gas = gas_thermo("H2O", &[1614.4, 3736.9, 3847.9], &conditions).unwrap();
        assert_eq!(gas.status, ThermoStatus::Gas);
        assert!(gas.gibbs.is_some() && gas.helmholtz.is_none());

        let ads = ads_thermo(&[459.5, 563.0, 995.3], &conditions).unwrap();
        assert_eq!(ads.status, ThermoStatus::Ads);
        assert!(ads.helmholtz.is_some() && ads.gibbs.is_none());
    }

    #[test]
    fn test_ideal_gas_uses_reference_structure() {
        match ThermoModel::ideal_gas("H2_ref") {
            ThermoModel::IdealGas { molecule, params, .. } => {
                assert_eq!(molecule.map(|m| m.atoms.len()), Some(2));
                assert_eq!(params.symmetry_number, 2);
            }
            ThermoModel::Harmonic => panic!("expected ideal gas"),
        }

        match ThermoModel::ideal_gas("C4H10") {
            ThermoModel::IdealGas { molecule, .. } => assert!(molecule.is_none()),
            ThermoModel::Harmonic => panic!("expected ideal gas"),
        }
    }

    #[test]
    fn test_invalid_conditions() {
        assert!(ThermoConditions::new(0.0, 1e5).is_err());
        assert!(ThermoConditions::new(300.0, -1.0).is_err());
        assert!(ThermoConditions::new(f64::NAN, 1e5).is_err());

        let bad = ThermoConditions {
            temperature: -5.0,
            pressure: 1e5,
        };
        assert!(ads_thermo(&[0.1], &bad).is_err());
    }

    #[test]
    fn test_properties_are_fresh_per_query() {
        let spec = VibrationalSpectrum::from_frequencies(&[459.5, 563.0, 995.3]);
        let cold = compute_thermo(&spec, &ThermoModel::Harmonic, &ThermoConditions::new(200.0, 1e5).unwrap()).unwrap();
        let hot = compute_thermo(&spec, &ThermoModel::Harmonic, &ThermoConditions::new(600.0, 1e5).unwrap()).unwrap();

        assert_eq!(cold.zpe, hot.zpe);
        assert!(hot.entropy > cold.entropy);
        assert_eq!(cold.temperature, 200.0);
    }
}
