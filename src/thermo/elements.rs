//! # 原子质量数据库
//!
//! 标准原子量 (amu)，用于理想气体平动熵和转动惯量。
//!
//! ## 数据来源
//! IUPAC 标准原子量（常规值）
//!
//! ## 依赖关系
//! - 被 `models/molecule.rs` 调用
//! - 纯静态数据，无外部依赖

use std::collections::HashMap;
use std::sync::LazyLock;

/// 原子质量表
pub static ATOMIC_MASSES: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        // 第一、二周期
        ("H", 1.008),
        ("He", 4.002_602),
        ("Li", 6.94),
        ("Be", 9.012_183_1),
        ("B", 10.81),
        ("C", 12.011),
        ("N", 14.007),
        ("O", 15.999),
        ("F", 18.998_403_163),
        ("Ne", 20.1797),
        // 第三周期
        ("Na", 22.989_769_28),
        ("Mg", 24.305),
        ("Al", 26.981_538_5),
        ("Si", 28.085),
        ("P", 30.973_761_998),
        ("S", 32.06),
        ("Cl", 35.45),
        ("Ar", 39.948),
        // 第四周期
        ("K", 39.0983),
        ("Ca", 40.078),
        ("Sc", 44.955_908),
        ("Ti", 47.867),
        ("V", 50.9415),
        ("Cr", 51.9961),
        ("Mn", 54.938_044),
        ("Fe", 55.845),
        ("Co", 58.933_194),
        ("Ni", 58.6934),
        ("Cu", 63.546),
        ("Zn", 65.38),
        ("Ga", 69.723),
        ("Ge", 72.630),
        ("As", 74.921_595),
        ("Se", 78.971),
        ("Br", 79.904),
        ("Kr", 83.798),
        // 第五周期
        ("Rb", 85.4678),
        ("Sr", 87.62),
        ("Y", 88.905_84),
        ("Zr", 91.224),
        ("Nb", 92.906_37),
        ("Mo", 95.95),
        ("Tc", 97.907_21),
        ("Ru", 101.07),
        ("Rh", 102.905_50),
        ("Pd", 106.42),
        ("Ag", 107.8682),
        ("Cd", 112.414),
        ("In", 114.818),
        ("Sn", 118.710),
        ("Sb", 121.760),
        ("Te", 127.60),
        ("I", 126.904_47),
        ("Xe", 131.293),
        // 常见催化金属
        ("Hf", 178.49),
        ("Ta", 180.947_88),
        ("W", 183.84),
        ("Re", 186.207),
        ("Os", 190.23),
        ("Ir", 192.217),
        ("Pt", 195.084),
        ("Au", 196.966_569),
        ("Hg", 200.592),
        ("Pb", 207.2),
        ("Bi", 208.980_40),
    ]
    .into_iter()
    .collect()
});

/// 获取原子质量 (amu)
pub fn atomic_mass(element: &str) -> Option<f64> {
    ATOMIC_MASSES.get(element).copied()
}
