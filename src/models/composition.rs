//! # 元素组成
//!
//! 元素符号 → 原子数的有序映射，由 `parsers/formula.rs` 生成。
//! 空映射是合法的，表示"没有需要配平的原子"（例如裸 slab）。
//!
//! ## 依赖关系
//! - 被 `parsers/formula.rs` 创建
//! - 被 `energy/formation.rs`、`models/molecule.rs` 使用

use std::collections::BTreeMap;

/// 元素组成
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementComposition {
    counts: BTreeMap<String, u32>,
}

impl ElementComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加某元素的原子数
    pub fn add(&mut self, element: &str, count: u32) {
        *self.counts.entry(element.to_string()).or_insert(0) += count;
    }

    pub fn count(&self, element: &str) -> u32 {
        self.counts.get(element).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// 总原子数
    pub fn total_atoms(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl std::fmt::Display for ElementComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (el, count) in &self.counts {
            if *count == 1 {
                write!(f, "{}", el)?;
            } else {
                write!(f, "{}{}", el, count)?;
            }
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, u32)> for ElementComposition {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        let mut comp = ElementComposition::new();
        for (el, n) in iter {
            comp.add(el, n);
        }
        comp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut comp = ElementComposition::new();
        comp.add("O", 1);
        comp.add("H", 2);
        comp.add("O", 1);

        assert_eq!(comp.count("O"), 2);
        assert_eq!(comp.count("H"), 2);
        assert_eq!(comp.count("C"), 0);
        assert_eq!(comp.total_atoms(), 4);
    }

    #[test]
    fn test_display_sorted() {
        let comp: ElementComposition = [("O", 2), ("C", 1)].into_iter().collect();
        assert_eq!(comp.to_string(), "CO2");
    }
}
