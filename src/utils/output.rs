//! # 终端输出工具
//!
//! 命令层的消息统一为 `[标签] 消息` 一行，`Err` 标签写到 stderr。
//! 库代码只记录 `Diagnostics`，由 `Diagnostics::emit` 经 `Level -> Tag`
//! 映射后在这里输出。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块和 `diagnostics.rs` 使用
//! - 使用 `colored` crate

use crate::diagnostics::Level;
use colored::{ColoredString, Colorize};

const RULE_WIDTH: usize = 60;

/// 消息标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Ok,
    Info,
    Warn,
    Skip,
    Err,
}

impl Tag {
    /// 未着色的标签文本
    pub fn label(self) -> &'static str {
        match self {
            Tag::Ok => "[OK]",
            Tag::Info => "[*]",
            Tag::Warn => "[WARN]",
            Tag::Skip => "[SKIP]",
            Tag::Err => "[ERR]",
        }
    }

    fn styled(self) -> ColoredString {
        let label = self.label();
        match self {
            Tag::Ok => label.green().bold(),
            Tag::Info => label.blue().bold(),
            Tag::Warn => label.yellow().bold(),
            Tag::Skip => label.dimmed(),
            Tag::Err => label.red().bold(),
        }
    }
}

impl From<Level> for Tag {
    fn from(level: Level) -> Self {
        match level {
            Level::Info => Tag::Info,
            Level::Warning => Tag::Warn,
        }
    }
}

/// 带标签打印一行消息
pub fn print_tagged(tag: Tag, msg: &str) {
    match tag {
        Tag::Err => eprintln!("{} {}", tag.styled(), msg),
        _ => println!("{} {}", tag.styled(), msg),
    }
}

pub fn print_success(msg: &str) {
    print_tagged(Tag::Ok, msg);
}

pub fn print_error(msg: &str) {
    print_tagged(Tag::Err, msg);
}

pub fn print_warning(msg: &str) {
    print_tagged(Tag::Warn, msg);
}

pub fn print_info(msg: &str) {
    print_tagged(Tag::Info, msg);
}

pub fn print_skip(msg: &str) {
    print_tagged(Tag::Skip, msg);
}

/// 打印 `名称  数值 单位` 形式的一行能量
pub fn print_energy(label: &str, value: f64, unit: &str) {
    println!("  {:<28} {:>14.6} {}", label, value, unit.dimmed());
}

/// 打印标题栏；空标题只输出一条横线
pub fn print_header(title: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    if title.is_empty() {
        println!("{}", rule.dimmed());
        return;
    }
    println!("\n{}", rule.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", rule.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_to_tag() {
        assert_eq!(Tag::from(Level::Info), Tag::Info);
        assert_eq!(Tag::from(Level::Warning), Tag::Warn);
        assert_eq!(Tag::from(Level::Warning).label(), "[WARN]");
    }

    #[test]
    fn test_labels_are_distinct() {
        let tags = [Tag::Ok, Tag::Info, Tag::Warn, Tag::Skip, Tag::Err];
        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
