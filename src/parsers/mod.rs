//! # 解析器模块
//!
//! 提供化学式、能量表、OUTCAR 频率、频率数据库及 XYZ 结构的解析。
//!
//! ## 依赖关系
//! - 被 `energy/`、`commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: formula, table, outcar, freq_db, xyz

pub mod formula;
pub mod freq_db;
pub mod outcar;
pub mod table;
pub mod xyz;

pub use formula::{clean_label, parse_formula};
pub use freq_db::{FrequencyDatabase, FrequencyEntry};
pub use outcar::{frequencies_from_outcar_str, parse_outcar_frequencies};
pub use table::{
    read_energy_table, read_energy_table_from_reader, write_energy_table,
    write_energy_table_to_writer, TableFormat,
};
pub use xyz::{parse_xyz_content, parse_xyz_file};
