//! # 理想气体热化学模型
//!
//! 刚性转子 / 谐振子近似下的平动 + 转动 + 振动 + 电子贡献。
//!
//! ## 公式
//! - H = ZPE + Cp_trans + Cp_rot + Cp_vib + kT
//!   - Cp_trans = 3/2 kT
//!   - Cp_rot = 0（单原子）、kT（线性）、3/2 kT（非线性）
//!   - Cp_vib = Σ εᵢ / (exp(εᵢ/kT) − 1)
//! - S = S_trans + S_rot + S_elec + S_vib + S_p
//!   - S_trans: Sackur–Tetrode，参考压力 1e5 Pa
//!   - S_rot (线性) = k [ln(8π² I kT / (σ h²)) + 1]
//!   - S_rot (非线性) = k [ln(√(π I_A I_B I_C) / σ · (8π² kT / h²)^{3/2}) + 3/2]
//!   - S_elec = k ln(2S + 1)
//!   - S_p = −k ln(P / 1e5 Pa)
//! - G = H − T·S
//!
//! ## 依赖关系
//! - 被 `thermo/mod.rs` 调用
//! - 使用 `thermo/harmonic.rs` 的振动求和
//! - 使用 `models/molecule.rs` 获取质量与转动惯量

use crate::error::{QthermoError, Result};
use crate::models::{MolecularGeometry, Molecule, ThermoPropertySet, ThermoStatus, VibrationalSpectrum};
use crate::parsers::formula::parse_formula;
use crate::thermo::constants::{
    AMU_KG, ANGSTROM2_TO_M2, BOLTZMANN_EV, BOLTZMANN_J, PLANCK_J, REFERENCE_PRESSURE,
};
use crate::thermo::gas_params::GasParameters;
use crate::thermo::harmonic::{vibrational_energy, vibrational_entropy, zero_point_energy};

use std::f64::consts::PI;

/// 理想气体热化学计算器
#[derive(Debug, Clone)]
pub struct IdealGasThermo {
    species: String,
    params: GasParameters,
    spectrum: VibrationalSpectrum,
    vib_energies: Vec<f64>,
    /// 分子总质量 (amu)
    mass: f64,
    /// 主转动惯量，升序 (amu·Å²)
    moments: [f64; 3],
}

impl IdealGasThermo {
    /// 创建计算器
    ///
    /// `molecule` 为空时从物种化学式生成伪几何结构，
    /// 此时转动熵只是近似值。
    pub fn new(
        species: impl Into<String>,
        spectrum: VibrationalSpectrum,
        params: GasParameters,
        molecule: Option<&Molecule>,
    ) -> Result<Self> {
        let species = species.into();
        let vib_energies = spectrum.require_real_energies()?;

        let pseudo;
        let molecule = match molecule {
            Some(m) => m,
            None => {
                pseudo = Molecule::pseudo_from_composition(
                    species.as_str(),
                    &parse_formula(&species),
                    params.geometry,
                )?;
                &pseudo
            }
        };

        let mass = molecule.total_mass()?;
        let moments = molecule.principal_moments()?;

        match params.geometry {
            MolecularGeometry::Linear if moments[2] <= 0.0 => {
                return Err(QthermoError::InvalidGeometry(format!(
                    "'{}' is declared linear but has no rotational inertia",
                    species
                )));
            }
            MolecularGeometry::Nonlinear if moments[0] <= 1e-8 => {
                return Err(QthermoError::InvalidGeometry(format!(
                    "'{}' is declared nonlinear but its structure is linear (I_A = {:.3e} amu·Å²)",
                    species, moments[0]
                )));
            }
            _ => {}
        }

        if params.symmetry_number == 0 {
            return Err(QthermoError::InvalidArgument(
                "symmetry number must be at least 1".to_string(),
            ));
        }

        Ok(IdealGasThermo {
            species,
            params,
            spectrum,
            vib_energies,
            mass,
            moments,
        })
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn parameters(&self) -> &GasParameters {
        &self.params
    }

    /// 分子总质量 (amu)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn zpe(&self) -> f64 {
        zero_point_energy(&self.vib_energies)
    }

    /// 焓 H(T) (eV)，含 ZPE 与 pV 项
    pub fn enthalpy(&self, temperature: f64) -> f64 {
        let kt = BOLTZMANN_EV * temperature;
        let cp_trans = 1.5 * kt;
        let cp_rot = match self.params.geometry {
            MolecularGeometry::Monatomic => 0.0,
            MolecularGeometry::Linear => kt,
            MolecularGeometry::Nonlinear => 1.5 * kt,
        };
        let cp_vib = vibrational_energy(&self.vib_energies, temperature);
        let cp_corr = kt;

        self.zpe() + cp_trans + cp_rot + cp_vib + cp_corr
    }

    /// 平动熵 (eV/K)，参考压力 1e5 Pa
    fn translational_entropy(&self, temperature: f64) -> f64 {
        let mass_kg = self.mass * AMU_KG;
        let kt_j = BOLTZMANN_J * temperature;
        let mut s = (2.0 * PI * mass_kg * kt_j / PLANCK_J.powi(2)).powf(1.5);
        s *= kt_j / REFERENCE_PRESSURE;
        BOLTZMANN_EV * (s.ln() + 2.5)
    }

    /// 转动熵 (eV/K)
    fn rotational_entropy(&self, temperature: f64) -> f64 {
        let kt_j = BOLTZMANN_J * temperature;
        let sigma = self.params.symmetry_number as f64;

        match self.params.geometry {
            MolecularGeometry::Monatomic => 0.0,
            MolecularGeometry::Linear => {
                let inertia = self.moments[2] * AMU_KG * ANGSTROM2_TO_M2;
                let s = 8.0 * PI.powi(2) * inertia * kt_j / sigma / PLANCK_J.powi(2);
                BOLTZMANN_EV * (s.ln() + 1.0)
            }
            MolecularGeometry::Nonlinear => {
                let product: f64 = self
                    .moments
                    .iter()
                    .map(|i| i * AMU_KG * ANGSTROM2_TO_M2)
                    .product();
                let mut s = (PI * product).sqrt() / sigma;
                s *= (8.0 * PI.powi(2) * kt_j / PLANCK_J.powi(2)).powf(1.5);
                BOLTZMANN_EV * (s.ln() + 1.5)
            }
        }
    }

    /// 电子熵 (eV/K)
    fn electronic_entropy(&self) -> f64 {
        BOLTZMANN_EV * (2.0 * self.params.spin + 1.0).ln()
    }

    /// 压力修正 (eV/K)
    fn pressure_entropy(&self, pressure: f64) -> f64 {
        -BOLTZMANN_EV * (pressure / REFERENCE_PRESSURE).ln()
    }

    /// 熵 S(T, P) (eV/K)
    pub fn entropy(&self, temperature: f64, pressure: f64) -> f64 {
        self.translational_entropy(temperature)
            + self.rotational_entropy(temperature)
            + self.electronic_entropy()
            + vibrational_entropy(&self.vib_energies, temperature)
            + self.pressure_entropy(pressure)
    }

    /// Gibbs 自由能 G(T, P) (eV)
    pub fn gibbs_energy(&self, temperature: f64, pressure: f64) -> f64 {
        self.enthalpy(temperature) - temperature * self.entropy(temperature, pressure)
    }

    /// 计算 (T, P) 下的全部热力学性质
    pub fn properties(&self, temperature: f64, pressure: f64) -> ThermoPropertySet {
        let zpe = self.zpe();
        let h = self.enthalpy(temperature);
        let s = self.entropy(temperature, pressure);

        ThermoPropertySet {
            temperature,
            pressure: Some(pressure),
            spectrum: self.spectrum.clone(),
            zpe,
            entropy: s,
            internal_energy: None,
            enthalpy: Some(h),
            helmholtz: None,
            gibbs: Some(h - temperature * s),
            cv: None,
            cp: Some(h - zpe),
            status: ThermoStatus::Gas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Atom;
    use crate::thermo::constants::DEFAULT_PRESSURE;
    use crate::thermo::geometries::reference_molecule;

    fn co2_spectrum() -> VibrationalSpectrum {
        VibrationalSpectrum::from_frequencies(&[649.6, 651.3, 1339.3, 2365.1])
    }

    fn co2_molecule() -> Molecule {
        Molecule::new(
            "CO2",
            vec![
                Atom::new("O", [0.0, 0.0, -1.16]),
                Atom::new("C", [0.0, 0.0, 0.0]),
                Atom::new("O", [0.0, 0.0, 1.16]),
            ],
        )
    }

    #[test]
    fn test_cp_is_h_minus_zpe() {
        let gas = IdealGasThermo::new(
            "CO2",
            co2_spectrum(),
            GasParameters::lookup("CO2"),
            Some(&co2_molecule()),
        )
        .unwrap();
        let props = gas.properties(298.15, DEFAULT_PRESSURE);

        assert_eq!(props.cp.unwrap(), props.enthalpy.unwrap() - props.zpe);
        assert_eq!(props.status, ThermoStatus::Gas);
        assert_eq!(props.pressure, Some(DEFAULT_PRESSURE));
    }

    #[test]
    fn test_co2_entropy_magnitude() {
        // 实验标准熵约 213.8 J/(mol·K) ≈ 2.216e-3 eV/K
        let gas = IdealGasThermo::new(
            "CO2",
            co2_spectrum(),
            GasParameters::lookup("CO2"),
            Some(&co2_molecule()),
        )
        .unwrap();
        let s = gas.entropy(298.15, 1e5);
        assert!(s > 2.1e-3 && s < 2.3e-3, "S = {}", s);
    }

    #[test]
    fn test_enthalpy_decomposition() {
        let gas = IdealGasThermo::new(
            "CO2",
            co2_spectrum(),
            GasParameters::lookup("CO2"),
            Some(&co2_molecule()),
        )
        .unwrap();
        let t = 298.15;
        let kt = BOLTZMANN_EV * t;
        let vib = vibrational_energy(&co2_spectrum().real_energies(), t);
        // 线性: 3/2 kT + kT + kT
        let expected = gas.zpe() + 3.5 * kt + vib;
        assert!((gas.enthalpy(t) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_pressure_dependence() {
        let gas = IdealGasThermo::new("CO2", co2_spectrum(), GasParameters::lookup("CO2"), None)
            .unwrap();
        let s1 = gas.entropy(298.15, 1e5);
        let s2 = gas.entropy(298.15, 1e4);
        assert!((s2 - s1 - BOLTZMANN_EV * 10f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_spin_degeneracy() {
        let spec = VibrationalSpectrum::from_frequencies(&[1580.0]);
        let singlet = IdealGasThermo::new(
            "O2",
            spec.clone(),
            GasParameters::lookup("O2").with_spin(0.0),
            None,
        )
        .unwrap();
        let triplet =
            IdealGasThermo::new("O2", spec, GasParameters::lookup("O2"), None).unwrap();

        let diff = triplet.entropy(298.15, 1e5) - singlet.entropy(298.15, 1e5);
        assert!((diff - BOLTZMANN_EV * 3f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_pseudo_geometry_fallback() {
        let spec = VibrationalSpectrum::from_frequencies(&[1614.4, 3736.9, 3847.9]);
        let gas = IdealGasThermo::new("H2O", spec, GasParameters::lookup("H2O"), None).unwrap();
        assert!((gas.mass() - (2.0 * 1.008 + 15.999)).abs() < 1e-9);

        let props = gas.properties(298.15, 101_325.0);
        assert!(props.entropy > 0.0);
        assert!(props.gibbs.unwrap() < props.enthalpy.unwrap());
    }

    #[test]
    fn test_h2_rotational_entropy_from_bond_length() {
        let spec = VibrationalSpectrum::from_frequencies(&[4401.0]);
        let params = GasParameters::lookup("H2");
        let t = 298.15;

        let h2 = reference_molecule("H2").unwrap();
        let real = IdealGasThermo::new("H2", spec.clone(), params, Some(&h2)).unwrap();

        // 双原子 I = μ r²，r = 0.741 Å
        let inertia = 1.008 / 2.0 * 0.741f64.powi(2) * AMU_KG * ANGSTROM2_TO_M2;
        let expected = BOLTZMANN_EV
            * ((8.0 * PI.powi(2) * inertia * BOLTZMANN_J * t / 2.0 / PLANCK_J.powi(2)).ln() + 1.0);
        assert!((real.rotational_entropy(t) - expected).abs() < 1e-12);

        // 1.5 Å 伪链高估 S_rot k·ln((1.5/0.741)²)，约 36 meV 的 TS
        let pseudo = IdealGasThermo::new("H2", spec, params, None).unwrap();
        let diff = pseudo.rotational_entropy(t) - real.rotational_entropy(t);
        assert!((diff - BOLTZMANN_EV * (1.5f64 / 0.741).powi(2).ln()).abs() < 1e-12);
        assert!(t * diff > 0.03);
    }

    #[test]
    fn test_linear_molecule_declared_nonlinear() {
        let err = IdealGasThermo::new(
            "CO2",
            co2_spectrum(),
            GasParameters::lookup("CO2").with_geometry(MolecularGeometry::Nonlinear),
            Some(&co2_molecule()),
        );
        assert!(matches!(err, Err(QthermoError::InvalidGeometry(_))));
    }

    #[test]
    fn test_no_real_frequencies() {
        let spec = VibrationalSpectrum::from_frequencies(&[-120.0]);
        let err = IdealGasThermo::new("CO", spec, GasParameters::lookup("CO"), None);
        assert!(matches!(err, Err(QthermoError::NoRealFrequencies { .. })));
    }
}
