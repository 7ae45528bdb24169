//! # 分子结构数据模型
//!
//! 理想气体模型需要分子总质量和转动惯量。结构可以由调用方提供
//! （笛卡尔坐标，Å），也可以从化学式生成一个伪几何结构。
//!
//! ## 依赖关系
//! - 被 `thermo/ideal_gas.rs` 使用
//! - 使用 `thermo/elements.rs` 获取原子质量
//! - 使用 `models/composition.rs`

use crate::error::{QthermoError, Result};
use crate::models::ElementComposition;
use crate::thermo::elements;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 伪几何结构中相邻原子的间距 (Å)
pub const PSEUDO_BOND_LENGTH: f64 = 1.5;

/// 分子几何类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MolecularGeometry {
    Monatomic,
    Linear,
    Nonlinear,
}

impl std::fmt::Display for MolecularGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MolecularGeometry::Monatomic => write!(f, "monatomic"),
            MolecularGeometry::Linear => write!(f, "linear"),
            MolecularGeometry::Nonlinear => write!(f, "nonlinear"),
        }
    }
}

impl std::str::FromStr for MolecularGeometry {
    type Err = QthermoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "monatomic" => Ok(MolecularGeometry::Monatomic),
            "linear" => Ok(MolecularGeometry::Linear),
            "nonlinear" => Ok(MolecularGeometry::Nonlinear),
            other => Err(QthermoError::InvalidArgument(format!(
                "unknown geometry '{}' (expected linear, nonlinear or monatomic)",
                other
            ))),
        }
    }
}

/// 原子信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atom {
    /// 元素符号
    pub element: String,

    /// 笛卡尔坐标 [x, y, z] (Å)
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }
}

/// 分子结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Molecule {
    /// 分子名称
    pub name: String,

    /// 原子列表
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(name: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Molecule {
            name: name.into(),
            atoms,
        }
    }

    /// 从化学组成生成伪几何结构
    ///
    /// 线性分子沿 z 轴排成间距 1.5 Å 的链；非线性分子排在 xy 平面内
    /// 边长 1.5 Å 的正多边形上。只用于估算质量和转动惯量。
    pub fn pseudo_from_composition(
        name: impl Into<String>,
        composition: &ElementComposition,
        geometry: MolecularGeometry,
    ) -> Result<Self> {
        let name = name.into();
        let symbols: Vec<&str> = composition
            .iter()
            .flat_map(|(el, n)| std::iter::repeat(el).take(n as usize))
            .collect();

        if symbols.is_empty() {
            return Err(QthermoError::InvalidGeometry(format!(
                "cannot build a structure for '{}': no atoms in formula",
                name
            )));
        }

        let n = symbols.len();
        let positions: Vec<[f64; 3]> = match geometry {
            MolecularGeometry::Monatomic | MolecularGeometry::Linear => (0..n)
                .map(|i| [0.0, 0.0, i as f64 * PSEUDO_BOND_LENGTH])
                .collect(),
            MolecularGeometry::Nonlinear => {
                if n < 3 {
                    return Err(QthermoError::InvalidGeometry(format!(
                        "'{}' has {} atom(s) and cannot be nonlinear",
                        name, n
                    )));
                }
                let radius = PSEUDO_BOND_LENGTH / (2.0 * (PI / n as f64).sin());
                (0..n)
                    .map(|i| {
                        let phi = 2.0 * PI * i as f64 / n as f64;
                        [radius * phi.cos(), radius * phi.sin(), 0.0]
                    })
                    .collect()
            }
        };

        let atoms = symbols
            .into_iter()
            .zip(positions)
            .map(|(el, pos)| Atom::new(el, pos))
            .collect();

        Ok(Molecule { name, atoms })
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        self.atoms
            .iter()
            .map(|a| (a.element.as_str(), 1))
            .collect::<ElementComposition>()
            .to_string()
    }

    /// 各原子质量 (amu)
    pub fn masses(&self) -> Result<Vec<f64>> {
        self.atoms
            .iter()
            .map(|a| {
                elements::atomic_mass(&a.element)
                    .ok_or_else(|| QthermoError::UnknownElement(a.element.clone()))
            })
            .collect()
    }

    /// 分子总质量 (amu)
    pub fn total_mass(&self) -> Result<f64> {
        Ok(self.masses()?.iter().sum())
    }

    /// 质心坐标 (Å)
    pub fn center_of_mass(&self) -> Result<[f64; 3]> {
        let masses = self.masses()?;
        let total: f64 = masses.iter().sum();
        let mut com = [0.0; 3];
        for (atom, m) in self.atoms.iter().zip(&masses) {
            for k in 0..3 {
                com[k] += m * atom.position[k];
            }
        }
        for c in com.iter_mut() {
            *c /= total;
        }
        Ok(com)
    }

    /// 关于质心的转动惯量张量 (amu·Å²)
    pub fn inertia_tensor(&self) -> Result<[[f64; 3]; 3]> {
        let masses = self.masses()?;
        let com = self.center_of_mass()?;
        let mut tensor = [[0.0; 3]; 3];

        for (atom, m) in self.atoms.iter().zip(&masses) {
            let r = [
                atom.position[0] - com[0],
                atom.position[1] - com[1],
                atom.position[2] - com[2],
            ];
            let r2 = r[0] * r[0] + r[1] * r[1] + r[2] * r[2];
            for i in 0..3 {
                for j in 0..3 {
                    let delta = if i == j { r2 } else { 0.0 };
                    tensor[i][j] += m * (delta - r[i] * r[j]);
                }
            }
        }

        Ok(tensor)
    }

    /// 主转动惯量，升序排列 (amu·Å²)
    pub fn principal_moments(&self) -> Result<[f64; 3]> {
        Ok(symmetric_eigenvalues(self.inertia_tensor()?))
    }
}

/// 3x3 实对称矩阵的特征值（解析法），升序返回
fn symmetric_eigenvalues(a: [[f64; 3]; 3]) -> [f64; 3] {
    let p1 = a[0][1].powi(2) + a[0][2].powi(2) + a[1][2].powi(2);

    if p1 < 1e-30 {
        let mut eig = [a[0][0], a[1][1], a[2][2]];
        eig.sort_by(|x, y| x.total_cmp(y));
        return eig;
    }

    let q = (a[0][0] + a[1][1] + a[2][2]) / 3.0;
    let p2 = (a[0][0] - q).powi(2) + (a[1][1] - q).powi(2) + (a[2][2] - q).powi(2) + 2.0 * p1;
    let p = (p2 / 6.0).sqrt();

    let mut b = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            let shift = if i == j { q } else { 0.0 };
            b[i][j] = (a[i][j] - shift) / p;
        }
    }

    // det(B) / 2，数值误差可能略超出 [-1, 1]
    let r = (b[0][0] * (b[1][1] * b[2][2] - b[1][2] * b[2][1])
        - b[0][1] * (b[1][0] * b[2][2] - b[1][2] * b[2][0])
        + b[0][2] * (b[1][0] * b[2][1] - b[1][1] * b[2][0]))
        / 2.0;
    let phi = r.clamp(-1.0, 1.0).acos() / 3.0;

    let largest = q + 2.0 * p * phi.cos();
    let smallest = q + 2.0 * p * (phi + 2.0 * PI / 3.0).cos();
    let middle = 3.0 * q - largest - smallest;

    [smallest, middle, largest]
}
