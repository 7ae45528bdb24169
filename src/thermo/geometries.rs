//! # 内置气体分子参考结构
//!
//! 参数表中每个气体分子的平衡几何（笛卡尔坐标，Å），
//! 供理想气体模型计算质量与转动惯量。
//! 数值取自实验键长键角或 G2 测试集的优化结构。
//!
//! ## 依赖关系
//! - 被 `thermo/mod.rs`（`ThermoModel::ideal_gas`）使用
//! - 使用 `thermo/gas_params.rs` 的名称规范化

use crate::models::{Atom, Molecule};
use crate::thermo::gas_params::gas_table_key;

use std::collections::HashMap;
use std::sync::LazyLock;

type Coordinates = &'static [(&'static str, [f64; 3])];

/// 内置参考结构表
pub static REFERENCE_GEOMETRIES: LazyLock<HashMap<&'static str, Coordinates>> =
    LazyLock::new(|| {
        let table: [(&'static str, Coordinates); 22] = [
            ("H2", &[("H", [0.0, 0.0, 0.0]), ("H", [0.0, 0.0, 0.741])]),
            ("N2", &[("N", [0.0, 0.0, 0.0]), ("N", [0.0, 0.0, 1.098])]),
            ("O2", &[("O", [0.0, 0.0, 0.0]), ("O", [0.0, 0.0, 1.208])]),
            ("CO", &[("C", [0.0, 0.0, 0.0]), ("O", [0.0, 0.0, 1.128])]),
            ("HCl", &[("H", [0.0, 0.0, 0.0]), ("Cl", [0.0, 0.0, 1.275])]),
            ("Cl2", &[("Cl", [0.0, 0.0, 0.0]), ("Cl", [0.0, 0.0, 1.988])]),
            (
                "CO2",
                &[
                    ("O", [0.0, 0.0, -1.162]),
                    ("C", [0.0, 0.0, 0.0]),
                    ("O", [0.0, 0.0, 1.162]),
                ],
            ),
            (
                "C2H2",
                &[
                    ("H", [0.0, 0.0, -1.663]),
                    ("C", [0.0, 0.0, -0.603]),
                    ("C", [0.0, 0.0, 0.603]),
                    ("H", [0.0, 0.0, 1.663]),
                ],
            ),
            (
                "H2O",
                &[
                    ("O", [0.0, 0.0, 0.1173]),
                    ("H", [0.0, 0.7572, -0.4692]),
                    ("H", [0.0, -0.7572, -0.4692]),
                ],
            ),
            (
                "NH3",
                &[
                    ("N", [0.0, 0.0, 0.1162]),
                    ("H", [0.0, 0.9377, -0.2711]),
                    ("H", [0.8121, -0.4689, -0.2711]),
                    ("H", [-0.8121, -0.4689, -0.2711]),
                ],
            ),
            (
                "CH4",
                &[
                    ("C", [0.0, 0.0, 0.0]),
                    ("H", [0.6291, 0.6291, 0.6291]),
                    ("H", [-0.6291, -0.6291, 0.6291]),
                    ("H", [-0.6291, 0.6291, -0.6291]),
                    ("H", [0.6291, -0.6291, -0.6291]),
                ],
            ),
            (
                "CH2O",
                &[
                    ("C", [0.0, 0.0, -0.5296]),
                    ("O", [0.0, 0.0, 0.6736]),
                    ("H", [0.0, 0.9349, -1.1110]),
                    ("H", [0.0, -0.9349, -1.1110]),
                ],
            ),
            (
                "CH3OH",
                &[
                    ("C", [-0.047131, 0.664389, 0.0]),
                    ("O", [-0.047131, -0.758551, 0.0]),
                    ("H", [-1.092995, 0.969785, 0.0]),
                    ("H", [0.878534, -1.048458, 0.0]),
                    ("H", [0.437145, 1.080376, 0.891772]),
                    ("H", [0.437145, 1.080376, -0.891772]),
                ],
            ),
            (
                "HCOOH",
                &[
                    ("O", [-1.040945, -0.436432, 0.0]),
                    ("C", [0.0, 0.423949, 0.0]),
                    ("O", [1.169372, 0.103741, 0.0]),
                    ("H", [-0.64957, -1.335134, 0.0]),
                    ("H", [-0.377847, 1.452967, 0.0]),
                ],
            ),
            (
                "HCOO",
                &[
                    ("C", [0.0, 0.0, 0.0]),
                    ("O", [1.08, 0.68, 0.0]),
                    ("O", [-1.08, 0.68, 0.0]),
                    ("H", [0.0, -1.10, 0.0]),
                ],
            ),
            (
                "C2H4",
                &[
                    ("C", [0.0, 0.0, 0.6695]),
                    ("C", [0.0, 0.0, -0.6695]),
                    ("H", [0.0, 0.9289, 1.2321]),
                    ("H", [0.0, -0.9289, 1.2321]),
                    ("H", [0.0, 0.9289, -1.2321]),
                    ("H", [0.0, -0.9289, -1.2321]),
                ],
            ),
            (
                "C2H6",
                &[
                    ("C", [0.0, 0.0, 0.762209]),
                    ("C", [0.0, 0.0, -0.762209]),
                    ("H", [0.0, 1.018957, 1.157229]),
                    ("H", [-0.882443, -0.509479, 1.157229]),
                    ("H", [0.882443, -0.509479, 1.157229]),
                    ("H", [0.0, -1.018957, -1.157229]),
                    ("H", [-0.882443, 0.509479, -1.157229]),
                    ("H", [0.882443, 0.509479, -1.157229]),
                ],
            ),
            (
                "C3H6",
                &[
                    ("C", [1.29129, 0.133682, 0.0]),
                    ("C", [0.0, 0.479159, 0.0]),
                    ("H", [1.60116, -0.90702, 0.0]),
                    ("H", [2.0808, 0.877337, 0.0]),
                    ("H", [-0.263221, 1.536098, 0.0]),
                    ("C", [-1.139757, -0.492341, 0.0]),
                    ("H", [-0.776859, -1.523291, 0.0]),
                    ("H", [-1.77554, -0.352861, 0.880007]),
                    ("H", [-1.77554, -0.352861, -0.880007]),
                ],
            ),
            (
                "C3H8",
                &[
                    ("C", [0.0, 0.587716, 0.0]),
                    ("C", [1.266857, -0.260186, 0.0]),
                    ("C", [-1.266857, -0.260186, 0.0]),
                    ("H", [0.0, 1.24461, 0.876534]),
                    ("H", [0.0, 1.24461, -0.876534]),
                    ("H", [2.166294, 0.362633, 0.0]),
                    ("H", [-2.166294, 0.362633, 0.0]),
                    ("H", [1.304055, -0.904126, 0.883165]),
                    ("H", [1.304055, -0.904126, -0.883165]),
                    ("H", [-1.304055, -0.904126, 0.883165]),
                    ("H", [-1.304055, -0.904126, -0.883165]),
                ],
            ),
            (
                "CH3CHO",
                &[
                    ("O", [1.218055, 0.36124, 0.0]),
                    ("C", [0.0, 0.464133, 0.0]),
                    ("H", [-0.477241, 1.465295, 0.0]),
                    ("C", [-0.948102, -0.700138, 0.0]),
                    ("H", [-0.385946, -1.634236, 0.0]),
                    ("H", [-1.596321, -0.652475, 0.880946]),
                    ("H", [-1.596321, -0.652475, -0.880946]),
                ],
            ),
            (
                "CH3COOH",
                &[
                    ("C", [0.0, 0.15456, 0.0]),
                    ("O", [0.166384, 1.360084, 0.0]),
                    ("O", [-1.236449, -0.415036, 0.0]),
                    ("H", [-1.867646, 0.333582, 0.0]),
                    ("C", [1.073776, -0.892748, 0.0]),
                    ("H", [2.048189, -0.408135, 0.0]),
                    ("H", [0.968661, -1.528353, 0.881747]),
                    ("H", [0.968661, -1.528353, -0.881747]),
                ],
            ),
            (
                "CH3CH2OH",
                &[
                    ("C", [1.168181, -0.400382, 0.0]),
                    ("C", [0.0, 0.559462, 0.0]),
                    ("O", [-1.190083, -0.227669, 0.0]),
                    ("H", [-1.946623, 0.381525, 0.0]),
                    ("H", [0.042557, 1.207508, 0.886933]),
                    ("H", [0.042557, 1.207508, -0.886933]),
                    ("H", [2.115891, 0.1448, 0.0]),
                    ("H", [1.128599, -1.037234, 0.885881]),
                    ("H", [1.128599, -1.037234, -0.885881]),
                ],
            ),
        ];
        table.into_iter().collect()
    });

/// 按物种名取内置参考结构（忽略 `_ref` / `_g` 后缀）
pub fn reference_molecule(species: &str) -> Option<Molecule> {
    let key = gas_table_key(species);
    REFERENCE_GEOMETRIES.get(key).map(|coords| {
        let atoms = coords
            .iter()
            .map(|(element, position)| Atom::new(*element, *position))
            .collect();
        Molecule::new(key, atoms)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MolecularGeometry;
    use crate::parsers::formula::parse_formula;
    use crate::thermo::gas_params::GAS_PARAMETERS;

    #[test]
    fn test_every_known_gas_has_a_structure() {
        for (name, params) in GAS_PARAMETERS.iter() {
            let mol = reference_molecule(name).unwrap();
            assert_eq!(mol.formula(), parse_formula(name).to_string(), "{}", name);

            let moments = mol.principal_moments().unwrap();
            match params.geometry {
                MolecularGeometry::Linear => {
                    assert!(moments[0] < 1e-8, "{} should be linear", name);
                    assert!(moments[2] > 0.1, "{}", name);
                }
                MolecularGeometry::Nonlinear => {
                    assert!(moments[0] > 1e-3, "{} should be nonlinear", name);
                }
                MolecularGeometry::Monatomic => {}
            }
        }
    }

    #[test]
    fn test_decorated_names() {
        let h2 = reference_molecule("H2_ref").unwrap();
        assert_eq!(h2.name, "H2");
        assert_eq!(h2.atoms.len(), 2);
        assert!(reference_molecule("CO2_g").is_some());
        assert!(reference_molecule("COOH").is_none());
    }
}
