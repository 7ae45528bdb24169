//! # 数据模型模块
//!
//! 定义能量记录、元素组成、分子结构和热力学性质的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`energy/`、`thermo/` 和 `commands/` 使用
//! - 子模块: record, composition, molecule, thermo

pub mod composition;
pub mod molecule;
pub mod record;
pub mod thermo;

pub use composition::ElementComposition;
pub use molecule::{Atom, MolecularGeometry, Molecule};
pub use record::{EnergyRecord, EnergyTable, SpeciesType};
pub use thermo::{ModeKind, ThermoPropertySet, ThermoStatus, VibrationalMode, VibrationalSpectrum};
