//! # 物理常数与单位换算
//!
//! CODATA 2014 数值。
//!
//! ## 依赖关系
//! - 被 `thermo/`、`models/thermo.rs` 使用

/// Boltzmann 常数 (J/K)
pub const BOLTZMANN_J: f64 = 1.380_648_52e-23;

/// Planck 常数 (J·s)
pub const PLANCK_J: f64 = 6.626_070_040e-34;

/// 原子质量单位 (kg)
pub const AMU_KG: f64 = 1.660_539_040e-27;

/// 元电荷 (C)
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_620_8e-19;

/// Boltzmann 常数 (eV/K)
pub const BOLTZMANN_EV: f64 = BOLTZMANN_J / ELEMENTARY_CHARGE;

/// Å² → m²
pub const ANGSTROM2_TO_M2: f64 = 1e-20;

/// 熵的参考压力 (Pa)
pub const REFERENCE_PRESSURE: f64 = 1e5;

/// 默认温度 (K)
pub const DEFAULT_TEMPERATURE: f64 = 298.15;

/// 默认压力 (Pa)
pub const DEFAULT_PRESSURE: f64 = 101_325.0;

/// 波数 (cm⁻¹) → 能量 (eV)
pub const CM_TO_EV: f64 = 1.2398e-4;

/// 频率列表中任一绝对值超过此值时按 cm⁻¹ 处理
pub const CM_UNIT_THRESHOLD: f64 = 10.0;

/// 低于此能量 (eV) 的模式不参与求和
pub const REAL_MODE_THRESHOLD: f64 = 1e-6;

/// cm⁻¹ → eV
pub fn cm_to_ev(wavenumber: f64) -> f64 {
    wavenumber * CM_TO_EV
}

/// eV → cm⁻¹
pub fn ev_to_cm(energy: f64) -> f64 {
    energy / CM_TO_EV
}
