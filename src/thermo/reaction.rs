//! # 反应自由能组合
//!
//! 将各物种的电子能与热力学修正按化学计量数组合为反应自由能，
//! 并换算平衡电位。
//!
//! 化学计量数约定：反应物为负，产物为正。
//!
//! ## 依赖关系
//! - 只使用 `ThermoPropertySet` 的结果，不依赖热化学模型内部
//! - 被 `commands/reaction.rs` 调用

use crate::error::{QthermoError, Result};
use crate::models::ThermoPropertySet;

use std::collections::{BTreeMap, HashMap};

/// 单个物种的总自由能 = 电子能 + (G 或 F)
pub fn species_free_energy(
    species: &str,
    thermo: &ThermoPropertySet,
    electronic_energy: f64,
) -> Result<f64> {
    thermo
        .free_energy()
        .map(|g| electronic_energy + g)
        .ok_or_else(|| QthermoError::IncompleteThermoData {
            species: species.to_string(),
        })
}

/// 反应自由能 ΔG = Σ νᵢ · Gᵢ (eV)
pub fn reaction_free_energy(
    species_thermo: &HashMap<String, ThermoPropertySet>,
    stoichiometry: &BTreeMap<String, f64>,
    electronic_energy: &HashMap<String, f64>,
) -> Result<f64> {
    let mut delta_g = 0.0;

    for (species, coeff) in stoichiometry {
        let (thermo, e_elec) = match (species_thermo.get(species), electronic_energy.get(species))
        {
            (Some(t), Some(e)) => (t, *e),
            _ => {
                return Err(QthermoError::MissingSpeciesData {
                    species: species.clone(),
                })
            }
        };

        delta_g += coeff * species_free_energy(species, thermo, e_elec)?;
    }

    Ok(delta_g)
}

/// 平衡电位 U_eq = −ΔG / n (V)
pub fn equilibrium_potential(delta_g: f64, n_electrons: u32) -> Result<f64> {
    if n_electrons == 0 {
        return Err(QthermoError::InvalidArgument(
            "number of transferred electrons must be at least 1".to_string(),
        ));
    }
    Ok(-delta_g / n_electrons as f64)
}
