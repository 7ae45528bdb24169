//! # 清洁表面能量查找
//!
//! 为吸附物找到对应的 slab 能量。匹配顺序：
//! 1. 表面与位点都相同（位点两侧都必须给出）
//! 2. 仅表面相同
//! 3. 第一个 slab 行
//!
//! 第 3 步在多表面数据中可能选错 slab，保留此行为以兼容已有数据集。
//!
//! ## 依赖关系
//! - 被 `energy/formation.rs` 使用

use crate::models::EnergyRecord;

/// 查找 slab 的校正能量
pub fn resolve_slab(records: &[EnergyRecord], surface: &str, site: Option<&str>) -> Option<f64> {
    let candidates: Vec<&EnergyRecord> = records.iter().filter(|r| r.is_slab()).collect();

    let first = *candidates.first()?;

    let surface_matches = |r: &EnergyRecord| r.surface_name.as_deref() == Some(surface);

    if let Some(site) = site {
        if let Some(r) = candidates
            .iter()
            .find(|r| surface_matches(r) && r.site_name.as_deref() == Some(site))
        {
            return Some(r.corrected_energy());
        }
    }

    let chosen = candidates
        .iter()
        .find(|r| surface_matches(r))
        .copied()
        .unwrap_or(first);

    Some(chosen.corrected_energy())
}
