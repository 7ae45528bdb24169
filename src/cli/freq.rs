//! # freq 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/freq.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::models::ThermoStatus;

/// 状态过滤
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StatusFilter {
    Gas,
    Ads,
}

impl From<StatusFilter> for ThermoStatus {
    fn from(s: StatusFilter) -> Self {
        match s {
            StatusFilter::Gas => ThermoStatus::Gas,
            StatusFilter::Ads => ThermoStatus::Ads,
        }
    }
}

/// freq 子命令参数
#[derive(Args, Debug)]
pub struct FreqArgs {
    /// Frequency database CSV
    pub database: PathBuf,

    /// Species name (exact match)
    #[arg(short, long)]
    pub species: Option<String>,

    /// Reference (literature source)
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Status filter
    #[arg(long, value_enum)]
    pub status: Option<StatusFilter>,

    /// Case-insensitive regex search on species names
    #[arg(long)]
    pub search: Option<String>,
}
