//! # 诊断信息收集
//!
//! 库代码不直接打印。弱匹配回退、单行形成能缺失等情况记录为
//! `Diagnostic`，由命令层通过 `utils/output.rs` 统一输出。
//!
//! ## 依赖关系
//! - 被 `energy/`、`thermo/` 模块写入
//! - 被 `commands/` 读取并打印

use crate::utils::output;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// 信息：回退查找成功等
    Info,
    /// 警告：单行无法计算
    Warning,
}

/// 单条诊断信息
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// 诊断信息收集器
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            level: Level::Info,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            level: Level::Warning,
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.level == Level::Warning)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 是否存在包含给定文本的诊断
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.message.contains(needle))
    }

    /// 通过终端输出工具打印全部诊断
    pub fn emit(&self) {
        for d in &self.entries {
            output::print_tagged(d.level.into(), &d.message);
        }
    }
}
