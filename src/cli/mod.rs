//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `formation`: 计算能量表的形成能
//! - `query`: 查询数据目录中的数据集
//! - `thermo`: 单个振动谱或批量 OUTCAR 的热化学修正
//! - `reaction`: 组合反应自由能与平衡电位
//! - `freq`: 浏览频率数据库
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: formation, query, thermo, reaction, freq

pub mod formation;
pub mod freq;
pub mod query;
pub mod reaction;
pub mod thermo;

use clap::{Parser, Subcommand};

/// Qthermo - 形成能与振动热化学工具
#[derive(Parser)]
#[command(name = "qthermo")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Formation energies and vibrational thermochemistry for surface chemistry", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute formation energies for an energy table (.tsv/.csv)
    Formation(formation::FormationArgs),

    /// Query a cached dataset from a data directory
    Query(query::QueryArgs),

    /// Thermochemical corrections (ZPE, H/U, S, G/F) from vibrational frequencies
    Thermo(thermo::ThermoArgs),

    /// Reaction free energy and equilibrium potential
    Reaction(reaction::ReactionArgs),

    /// Browse a vibrational frequency database
    Freq(freq::FreqArgs),
}

