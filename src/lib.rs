//! # Qthermo - 形成能与振动热化学
//!
//! 面向表面催化 DFT 数据的两类计算：
//! - 形成能：由 H2 / H2O / CO2 建立元素参考能，计算气相、液相、
//!   吸附物与 slab 的形成能
//! - 热化学：由振动频率计算 ZPE、焓/内能、熵与自由能修正，
//!   并组合为反应自由能与平衡电位
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── energy/     (参考能、slab 查找、形成能、数据集缓存)
//!   ├── thermo/     (理想气体、谐振子、反应组合)
//!   ├── parsers/    (化学式、能量表、OUTCAR、频率数据库)
//!   ├── models/     (数据模型)
//!   ├── batch/      (文件收集与并行处理)
//!   ├── cli/ + commands/ (命令行)
//!   ├── diagnostics.rs
//!   └── error.rs
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod diagnostics;
pub mod energy;
pub mod error;
pub mod models;
pub mod parsers;
pub mod thermo;
pub mod utils;

pub use diagnostics::{Diagnostic, Diagnostics, Level};
pub use energy::{
    compute_formation_energies, resolve_slab, Dataset, DatasetCache, FormationSummary,
    ReferenceTable,
};
pub use error::{QthermoError, Result};
pub use models::{
    ElementComposition, EnergyRecord, EnergyTable, SpeciesType, ThermoPropertySet, ThermoStatus,
    VibrationalSpectrum,
};
pub use parsers::formula::parse_formula;
pub use thermo::{
    compute_thermo, equilibrium_potential, reaction_free_energy, ThermoConditions, ThermoModel,
};
