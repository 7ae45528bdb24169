//! # formation 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/formation.rs`

use clap::Args;
use std::path::PathBuf;

/// formation 子命令参数
#[derive(Args, Debug)]
pub struct FormationArgs {
    /// Input energy table (.tsv or .csv)
    pub input: PathBuf,

    /// Output file (default: <input stem>_formation.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of rows to print (0 = all)
    #[arg(short = 'n', long, default_value_t = 10)]
    pub top_n: usize,

    /// Print per-type formation energy statistics
    #[arg(short, long, default_value_t = false)]
    pub summary: bool,

    /// Do not write the output file
    #[arg(long, default_value_t = false)]
    pub no_save: bool,
}
