//! # thermo 子命令 CLI 定义
//!
//! 频率来源三选一：`--frequencies` 列表、`--freq-db` 数据库条目、
//! 或 `input` 指定的 OUTCAR。`input` 为目录时进入批量模式。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/thermo.rs`

use crate::models::MolecularGeometry;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 热化学处理方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Phase {
    /// Ideal-gas model
    Gas,
    /// Harmonic model (adsorbate)
    Ads,
    /// Gas if the path contains a `gases` directory (or the database says so), else ads
    Auto,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Gas => write!(f, "gas"),
            Phase::Ads => write!(f, "ads"),
            Phase::Auto => write!(f, "auto"),
        }
    }
}

/// 分子几何类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum GeometryArg {
    Monatomic,
    Linear,
    Nonlinear,
}

impl From<GeometryArg> for MolecularGeometry {
    fn from(g: GeometryArg) -> Self {
        match g {
            GeometryArg::Monatomic => MolecularGeometry::Monatomic,
            GeometryArg::Linear => MolecularGeometry::Linear,
            GeometryArg::Nonlinear => MolecularGeometry::Nonlinear,
        }
    }
}

/// thermo 子命令参数
#[derive(Args, Debug)]
pub struct ThermoArgs {
    /// OUTCAR file, or a directory for batch mode
    pub input: Option<PathBuf>,

    /// Comma-separated frequencies (cm^-1 or eV; negative = imaginary)
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub frequencies: Option<Vec<f64>>,

    /// Frequency database CSV to take frequencies from
    #[arg(long)]
    pub freq_db: Option<PathBuf>,

    /// Species name (gas parameters, formula, database lookup)
    #[arg(short, long)]
    pub species: Option<String>,

    /// Database reference (literature source) filter
    #[arg(long)]
    pub reference: Option<String>,

    /// Statistical model
    #[arg(long, value_enum, default_value_t = Phase::Auto)]
    pub phase: Phase,

    /// Override the rotational symmetry number
    #[arg(long)]
    pub symmetry: Option<u32>,

    /// Override the molecular geometry
    #[arg(long, value_enum)]
    pub geometry: Option<GeometryArg>,

    /// Override the total electronic spin
    #[arg(long)]
    pub spin: Option<f64>,

    /// XYZ structure for the gas molecule (default: built-in structure, else pseudo-geometry)
    #[arg(long)]
    pub structure: Option<PathBuf>,

    /// Temperature in K
    #[arg(short = 'T', long, default_value_t = 298.15, env = "QTHERMO_TEMPERATURE")]
    pub temperature: f64,

    /// Pressure in Pa (gas phase only)
    #[arg(short = 'P', long, default_value_t = 101325.0, env = "QTHERMO_PRESSURE")]
    pub pressure: f64,

    /// Glob pattern for OUTCAR files in batch mode
    #[arg(short, long, default_value = "OUTCAR")]
    pub pattern: String,

    /// Recurse into subdirectories in batch mode
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs in batch mode (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Batch summary CSV (default: <input>/thermo_summary.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
