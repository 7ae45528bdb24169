//! # 形成能模块
//!
//! 从能量表计算元素参考能与各物种形成能。
//!
//! 计算顺序固定：先由枢轴物种建立参考能表（失败即终止），
//! 再逐行计算形成能（单行失败只记诊断）。
//!
//! ## 依赖关系
//! - 被 `commands/formation.rs`、`commands/query.rs` 调用
//! - 使用 `parsers/formula.rs`、`parsers/table.rs`
//! - 子模块: reference, slab, formation, dataset

pub mod dataset;
pub mod formation;
pub mod reference;
pub mod slab;

pub use dataset::{Dataset, DatasetCache, TypeSummary};
pub use formation::{compute_formation_energies, formation_energy_for, FormationSummary, RowIssue};
pub use reference::ReferenceTable;
pub use slab::resolve_slab;
