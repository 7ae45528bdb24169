//! # 形成能计算
//!
//! 对每一行独立计算形成能：
//!
//! ## 公式
//! - 气/液相：ΔE_f = E_corr − Σ nₑ · E_ref(e)
//! - 吸附物：ΔE_f = E_corr − E_slab − Σ nₑ · E_ref(e)
//! - slab：ΔE_f = 0
//!
//! 单行失败（缺元素参考、缺表面信息、找不到 slab、无法解析的标签）
//! 记为 `None` 并写入一条警告，不会中断整批计算。
//!
//! ## 依赖关系
//! - 使用 `parsers/formula.rs`、`energy/reference.rs`、`energy/slab.rs`
//! - 使用 `rayon` 并行计算各行

use crate::diagnostics::Diagnostics;
use crate::energy::reference::ReferenceTable;
use crate::energy::slab::resolve_slab;
use crate::models::{EnergyRecord, SpeciesType};
use crate::parsers::formula::parse_formula;

use rayon::prelude::*;
use thiserror::Error;

/// 单行无法计算的原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowIssue {
    #[error("could not parse any element from '{0}'")]
    UnparseableLabel(String),

    #[error("missing reference energies for {0:?}")]
    MissingReferences(Vec<String>),

    #[error("no surface information for adsorbate")]
    NoSurface,

    #[error("slab energy not found for surface {surface}, site {site}")]
    SlabNotFound { surface: String, site: String },
}

/// 批量计算结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormationSummary {
    pub total: usize,
    pub resolved: usize,
}

impl FormationSummary {
    pub fn unresolved(&self) -> usize {
        self.total - self.resolved
    }
}

/// 计算单行形成能
///
/// `records` 为整张表，用于查找 slab。
pub fn formation_energy_for(
    record: &EnergyRecord,
    records: &[EnergyRecord],
    references: &ReferenceTable,
) -> Result<f64, RowIssue> {
    if record.species_type == SpeciesType::Slab {
        return Ok(0.0);
    }

    let composition = parse_formula(&record.species_name);

    if composition.is_empty() {
        if record.is_slab_label() {
            return Ok(0.0);
        }
        return Err(RowIssue::UnparseableLabel(record.species_name.clone()));
    }

    let missing: Vec<String> = composition
        .elements()
        .filter(|el| !references.contains(el))
        .map(|el| el.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RowIssue::MissingReferences(missing));
    }

    let ref_sum: f64 = composition
        .iter()
        .map(|(el, n)| n as f64 * references.get(el).unwrap_or(0.0))
        .sum();

    match record.species_type {
        SpeciesType::Ads => {
            let surface = record.surface_name.as_deref().ok_or(RowIssue::NoSurface)?;
            let site = record.site_name.as_deref();
            let slab = resolve_slab(records, surface, site).ok_or_else(|| RowIssue::SlabNotFound {
                surface: surface.to_string(),
                site: site.unwrap_or("-").to_string(),
            })?;
            Ok(record.corrected_energy() - slab - ref_sum)
        }
        SpeciesType::Gas | SpeciesType::Liquid => Ok(record.corrected_energy() - ref_sum),
        SpeciesType::Slab => Ok(0.0),
    }
}

/// 计算全部行的形成能并原位写回
///
/// 参考能表必须已建立；各行并行计算，结果按输入顺序写回，
/// 诊断信息也按输入顺序记录。
pub fn compute_formation_energies(
    records: &mut [EnergyRecord],
    references: &ReferenceTable,
    diagnostics: &mut Diagnostics,
) -> FormationSummary {
    let snapshot: &[EnergyRecord] = records;
    let outcomes: Vec<Result<f64, RowIssue>> = snapshot
        .par_iter()
        .map(|r| formation_energy_for(r, snapshot, references))
        .collect();

    let mut summary = FormationSummary {
        total: records.len(),
        resolved: 0,
    };

    for (record, outcome) in records.iter_mut().zip(outcomes) {
        match outcome {
            Ok(value) => {
                record.formation_energy = Some(value);
                summary.resolved += 1;
            }
            Err(issue) => {
                diagnostics.warn(format!(
                    "Cannot calculate formation energy for {}: {}",
                    record.describe(),
                    issue
                ));
                record.formation_energy = None;
            }
        }
    }

    summary
}
