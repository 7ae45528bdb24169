//! # 统一错误处理模块
//!
//! 定义 Qthermo 的所有错误类型，使用 `thiserror` 派生。
//!
//! 只有"致命"错误会出现在这里：缺列、缺少 H2/H2O 参考物种、没有实频、
//! 反应组合缺数据等。单行的形成能缺失（缺元素参考、找不到 slab）
//! 不是错误，而是 `None` + 诊断信息，见 `diagnostics.rs`。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Qthermo 统一错误类型
#[derive(Error, Debug)]
pub enum QthermoError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Missing required columns: {missing:?}. Available columns: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    // ─────────────────────────────────────────────────────────────
    // 形成能错误
    // ─────────────────────────────────────────────────────────────
    #[error("{species} energy not found in dataset; reference energies cannot be established. Available species: {available:?}")]
    MissingPivotSpecies {
        species: String,
        available: Vec<String>,
    },

    #[error("Dataset '{name}' not found in {dir}. Available datasets: {available:?}")]
    DatasetNotFound {
        name: String,
        dir: String,
        available: Vec<String>,
    },

    // ─────────────────────────────────────────────────────────────
    // 热化学错误
    // ─────────────────────────────────────────────────────────────
    #[error("No real positive frequencies for thermochemistry ({imaginary} imaginary mode(s) excluded)")]
    NoRealFrequencies { imaginary: usize },

    #[error("Unknown element '{0}' (no atomic mass available)")]
    UnknownElement(String),

    #[error("Invalid molecular geometry: {0}")]
    InvalidGeometry(String),

    #[error("Species '{species}' not found in thermochemistry or electronic energy input")]
    MissingSpeciesData { species: String },

    #[error("No free energy data (G or F) for species '{species}'")]
    IncompleteThermoData { species: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, QthermoError>;
