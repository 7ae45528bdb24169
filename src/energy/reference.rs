//! # 元素参考能
//!
//! 由气/液相枢轴物种建立元素参考能：
//!
//! ## 公式
//! - E_ref(H) = 0.5 · E(H2)
//! - E_ref(O) = E(H2O) − E(H2)
//! - E_ref(C) = E(CO2) − 2 · E_ref(O)（仅当存在 CO2）
//!
//! 枢轴物种按固定顺序的匹配器查找，首个命中即返回。最后一级会在
//! 全表（包括 ads/slab 行）中查找，命中时给出提示，注明实际使用的类型。
//!
//! ## 依赖关系
//! - 被 `energy/formation.rs`、`energy/dataset.rs` 使用
//! - 使用 `models/record.rs`、`diagnostics.rs`

use crate::diagnostics::Diagnostics;
use crate::error::{QthermoError, Result};
use crate::models::EnergyRecord;

use std::collections::BTreeMap;

/// 枢轴物种匹配方式，按强弱排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PivotMatcher {
    /// 气/液相中精确匹配
    Exact,
    /// 气/液相中忽略大小写
    CaseInsensitive,
    /// 气/液相中匹配 `<name>_ref`
    RefSuffix,
    /// 全表忽略大小写
    AnyType,
}

const PIVOT_MATCHERS: [PivotMatcher; 4] = [
    PivotMatcher::Exact,
    PivotMatcher::CaseInsensitive,
    PivotMatcher::RefSuffix,
    PivotMatcher::AnyType,
];

impl PivotMatcher {
    fn find<'a>(
        &self,
        pool: &[&'a EnergyRecord],
        all: &'a [EnergyRecord],
        name: &str,
    ) -> Option<&'a EnergyRecord> {
        match self {
            PivotMatcher::Exact => pool.iter().copied().find(|r| r.species_name == name),
            PivotMatcher::CaseInsensitive => pool
                .iter()
                .copied()
                .find(|r| r.species_name.eq_ignore_ascii_case(name)),
            PivotMatcher::RefSuffix => {
                let ref_name = format!("{}_ref", name);
                pool.iter()
                    .copied()
                    .find(|r| r.species_name.eq_ignore_ascii_case(&ref_name))
            }
            PivotMatcher::AnyType => all
                .iter()
                .find(|r| r.species_name.eq_ignore_ascii_case(name)),
        }
    }

    fn note(&self, name: &str, found: &EnergyRecord) -> Option<String> {
        match self {
            PivotMatcher::Exact => None,
            PivotMatcher::CaseInsensitive => Some(format!(
                "Found {} as '{}' (case-insensitive match)",
                name, found.species_name
            )),
            PivotMatcher::RefSuffix => Some(format!(
                "Found {} as '{}' (_ref suffix)",
                name, found.species_name
            )),
            PivotMatcher::AnyType => Some(format!(
                "Found {} with type='{}' (using as reference)",
                name, found.species_type
            )),
        }
    }
}

/// 查找枢轴物种的校正能量
fn lookup_pivot(
    pool: &[&EnergyRecord],
    all: &[EnergyRecord],
    name: &str,
    diagnostics: &mut Diagnostics,
) -> Option<f64> {
    PIVOT_MATCHERS.iter().find_map(|matcher| {
        matcher.find(pool, all, name).map(|record| {
            if let Some(note) = matcher.note(name, record) {
                diagnostics.info(note);
            }
            record.corrected_energy()
        })
    })
}

/// 元素参考能表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    energies: BTreeMap<String, f64>,
}

impl ReferenceTable {
    /// 由数据行建立参考能
    ///
    /// 缺少 H2 或 H2O 时返回 `MissingPivotSpecies`。
    pub fn resolve(records: &[EnergyRecord], diagnostics: &mut Diagnostics) -> Result<Self> {
        let mut pool: Vec<&EnergyRecord> = records
            .iter()
            .filter(|r| r.species_type.is_fluid())
            .collect();

        if pool.is_empty() {
            diagnostics.warn("No entries with type='gas' or 'liquid' found; searching all entries for references");
            pool = records.iter().collect();
        }

        let missing = |species: &str| QthermoError::MissingPivotSpecies {
            species: species.to_string(),
            available: available_species(records),
        };

        let mut energies = BTreeMap::new();

        let e_h2 = lookup_pivot(&pool, records, "H2", diagnostics).ok_or_else(|| missing("H2"))?;
        energies.insert("H".to_string(), 0.5 * e_h2);

        let e_h2o =
            lookup_pivot(&pool, records, "H2O", diagnostics).ok_or_else(|| missing("H2O"))?;
        let e_o = e_h2o - e_h2;
        energies.insert("O".to_string(), e_o);

        match lookup_pivot(&pool, records, "CO2", diagnostics) {
            Some(e_co2) => {
                energies.insert("C".to_string(), e_co2 - 2.0 * e_o);
            }
            None => diagnostics.info("CO2 not found; no carbon reference energy"),
        }

        Ok(ReferenceTable { energies })
    }

    /// 直接由 (元素, 能量) 构造
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        ReferenceTable {
            energies: entries
                .into_iter()
                .map(|(el, e)| (el.to_string(), e))
                .collect(),
        }
    }

    pub fn get(&self, element: &str) -> Option<f64> {
        self.energies.get(element).copied()
    }

    pub fn contains(&self, element: &str) -> bool {
        self.energies.contains_key(element)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.energies.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

/// 去重后的物种名（保持首次出现顺序）
fn available_species(records: &[EnergyRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for r in records {
        if !names.contains(&r.species_name) {
            names.push(r.species_name.clone());
        }
    }
    names
}
