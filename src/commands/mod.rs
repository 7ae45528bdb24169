//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `energy/`, `thermo/`, `parsers/`, `utils/`
//! - 子模块: formation, query, thermo, reaction, freq

pub mod formation;
pub mod freq;
pub mod query;
pub mod reaction;
pub mod thermo;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Formation(args) => formation::execute(args),
        Commands::Query(args) => query::execute(args),
        Commands::Thermo(args) => thermo::execute(args),
        Commands::Reaction(args) => reaction::execute(args),
        Commands::Freq(args) => freq::execute(args),
    }
}
