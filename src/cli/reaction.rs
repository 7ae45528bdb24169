//! # reaction 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/reaction.rs`

use clap::Args;
use std::path::PathBuf;

/// reaction 子命令参数
#[derive(Args, Debug)]
pub struct ReactionArgs {
    /// Reaction CSV: species_name, coefficient, electronic_energy, status, frequencies
    pub input: PathBuf,

    /// Number of transferred electrons (prints the equilibrium potential)
    #[arg(short = 'n', long)]
    pub electrons: Option<u32>,

    /// Temperature in K
    #[arg(short = 'T', long, default_value_t = 298.15, env = "QTHERMO_TEMPERATURE")]
    pub temperature: f64,

    /// Pressure in Pa (gas phase only)
    #[arg(short = 'P', long, default_value_t = 101325.0, env = "QTHERMO_PRESSURE")]
    pub pressure: f64,
}
