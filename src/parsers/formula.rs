//! # 化学式解析器
//!
//! 将物种标签解析为元素组成，仅支持 "元素 + 数字" 的简单串联写法，
//! 不支持括号。无法匹配的字符直接忽略。
//!
//! ## 依赖关系
//! - 被 `energy/formation.rs`、`thermo/ideal_gas.rs` 使用
//! - 使用 `regex` crate

use crate::models::ElementComposition;

use regex::Regex;
use std::sync::LazyLock;

/// 元素符号 + 可选数字
static ELEMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]?)(\d*)").expect("valid element regex"));

/// 去除 `_ref` 后缀及 `_`、`-`、`+` 分隔符
pub fn clean_label(label: &str) -> String {
    label
        .replace("_ref", "")
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | '+'))
        .collect()
}

/// 解析化学式
///
/// - `"CO2"` → {C: 1, O: 2}
/// - `"H2O_ref"` → {H: 2, O: 1}
/// - `"slab"` → {}
pub fn parse_formula(label: &str) -> ElementComposition {
    let cleaned = clean_label(label);
    let mut composition = ElementComposition::new();

    if cleaned.trim().eq_ignore_ascii_case("slab") {
        return composition;
    }

    for caps in ELEMENT_PATTERN.captures_iter(&cleaned) {
        let element = &caps[1];
        let count = match &caps[2] {
            "" => 1,
            digits => digits.parse::<u32>().unwrap_or(1),
        };
        composition.add(element, count);
    }

    composition
}
