//! # 理想气体参数表
//!
//! 常见小分子的转动对称数、几何类型和电子自旋。
//! 未收录的物种默认为 σ=1、非线性、自旋 0；调用方可覆盖任一参数。
//!
//! ## 依赖关系
//! - 被 `thermo/ideal_gas.rs`、`thermo/geometries.rs`、`commands/thermo.rs` 使用

use crate::models::MolecularGeometry;

use std::collections::HashMap;
use std::sync::LazyLock;

/// 理想气体模型参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasParameters {
    /// 转动对称数 σ
    pub symmetry_number: u32,
    /// 几何类型
    pub geometry: MolecularGeometry,
    /// 总电子自旋 S（简并度 2S+1）
    pub spin: f64,
}

impl Default for GasParameters {
    fn default() -> Self {
        GasParameters {
            symmetry_number: 1,
            geometry: MolecularGeometry::Nonlinear,
            spin: 0.0,
        }
    }
}

impl GasParameters {
    const fn new(symmetry_number: u32, geometry: MolecularGeometry, spin: f64) -> Self {
        GasParameters {
            symmetry_number,
            geometry,
            spin,
        }
    }

    /// 按物种名查表，未收录时返回默认值
    pub fn lookup(species: &str) -> Self {
        Self::known(species).unwrap_or_default()
    }

    /// 按物种名查表（忽略 `_ref` / `_g` 后缀）
    pub fn known(species: &str) -> Option<Self> {
        GAS_PARAMETERS.get(gas_table_key(species)).copied()
    }

    pub fn with_symmetry_number(mut self, sigma: u32) -> Self {
        self.symmetry_number = sigma;
        self
    }

    pub fn with_geometry(mut self, geometry: MolecularGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = spin;
        self
    }
}

/// 内置表的查找键：去掉空白及 `_ref` / `_g` 后缀
pub(crate) fn gas_table_key(species: &str) -> &str {
    let name = species.trim();
    let name = name.strip_suffix("_ref").unwrap_or(name);
    name.strip_suffix("_g").unwrap_or(name)
}

/// 内置理想气体参数表
pub static GAS_PARAMETERS: LazyLock<HashMap<&'static str, GasParameters>> = LazyLock::new(|| {
    use MolecularGeometry::{Linear, Nonlinear};

    [
        ("H2", GasParameters::new(2, Linear, 0.0)),
        ("N2", GasParameters::new(2, Linear, 0.0)),
        ("O2", GasParameters::new(2, Linear, 1.0)),
        ("H2O", GasParameters::new(2, Nonlinear, 0.0)),
        ("CO", GasParameters::new(1, Linear, 0.0)),
        ("CO2", GasParameters::new(2, Linear, 0.0)),
        ("CH4", GasParameters::new(12, Nonlinear, 0.0)),
        ("NH3", GasParameters::new(3, Nonlinear, 0.0)),
        ("CH3OH", GasParameters::new(1, Nonlinear, 0.0)),
        ("CH2O", GasParameters::new(2, Nonlinear, 0.0)),
        ("HCOOH", GasParameters::new(1, Nonlinear, 0.0)),
        ("HCOO", GasParameters::new(1, Nonlinear, 0.0)),
        ("C2H2", GasParameters::new(2, Linear, 0.0)),
        ("C2H4", GasParameters::new(4, Nonlinear, 0.0)),
        ("C2H6", GasParameters::new(6, Nonlinear, 0.0)),
        ("C3H6", GasParameters::new(1, Nonlinear, 0.0)),
        ("C3H8", GasParameters::new(2, Nonlinear, 0.0)),
        ("CH3CHO", GasParameters::new(1, Nonlinear, 0.0)),
        ("CH3COOH", GasParameters::new(1, Nonlinear, 0.0)),
        ("CH3CH2OH", GasParameters::new(1, Nonlinear, 0.0)),
        ("HCl", GasParameters::new(1, Linear, 0.0)),
        ("Cl2", GasParameters::new(2, Linear, 0.0)),
    ]
    .into_iter()
    .collect()
});
