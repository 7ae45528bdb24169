//! # qthermo 命令行入口
//!
//! ## 子命令
//! - `formation` - 能量表形成能计算
//! - `query`     - 数据集查询
//! - `thermo`    - 振动热化学修正（单个或批量 OUTCAR）
//! - `reaction`  - 反应自由能与平衡电位
//! - `freq`      - 频率数据库浏览
//!
//! ## 依赖关系
//! - 使用 `qthermo::cli` 解析参数
//! - 使用 `qthermo::commands` 执行

use clap::Parser;
use qthermo::cli::Cli;
use qthermo::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
