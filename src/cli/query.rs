//! # query 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/query.rs`

use crate::models::SpeciesType;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 相态类型过滤
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TypeFilter {
    Gas,
    Liquid,
    Slab,
    Ads,
}

impl From<TypeFilter> for SpeciesType {
    fn from(t: TypeFilter) -> Self {
        match t {
            TypeFilter::Gas => SpeciesType::Gas,
            TypeFilter::Liquid => SpeciesType::Liquid,
            TypeFilter::Slab => SpeciesType::Slab,
            TypeFilter::Ads => SpeciesType::Ads,
        }
    }
}

/// query 子命令参数
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Dataset name (looks for <data-dir>/<name>.tsv)
    pub dataset: Option<String>,

    /// Directory containing dataset .tsv files
    #[arg(short, long, default_value = ".", env = "QTHERMO_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Species name (exact match)
    #[arg(short, long)]
    pub species: Option<String>,

    /// Surface name
    #[arg(long)]
    pub surface: Option<String>,

    /// Site / facet name
    #[arg(long)]
    pub site: Option<String>,

    /// Restrict to one species type
    #[arg(short = 't', long = "type", value_enum)]
    pub species_type: Option<TypeFilter>,

    /// List available datasets and exit
    #[arg(short, long, default_value_t = false)]
    pub list: bool,
}
