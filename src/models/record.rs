//! # 能量记录数据模型
//!
//! 一行输入/输出数据：物种、表面、位点、相态、原始能量、校正能量，
//! 以及计算得到的形成能。
//!
//! ## 依赖关系
//! - 被 `parsers/table.rs` 读写
//! - 被 `energy/` 模块使用

use crate::error::QthermoError;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 物种相态类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesType {
    Gas,
    Liquid,
    Slab,
    Ads,
}

impl SpeciesType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeciesType::Gas => "gas",
            SpeciesType::Liquid => "liquid",
            SpeciesType::Slab => "slab",
            SpeciesType::Ads => "ads",
        }
    }

    /// 气相或液相（可作为参考物种）
    pub fn is_fluid(&self) -> bool {
        matches!(self, SpeciesType::Gas | SpeciesType::Liquid)
    }
}

impl std::fmt::Display for SpeciesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpeciesType {
    type Err = QthermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gas" => Ok(SpeciesType::Gas),
            "liquid" => Ok(SpeciesType::Liquid),
            "slab" => Ok(SpeciesType::Slab),
            "ads" => Ok(SpeciesType::Ads),
            other => Err(QthermoError::InvalidFormat(format!(
                "unknown species type '{}' (expected gas, liquid, slab or ads)",
                other
            ))),
        }
    }
}

/// 能量记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    /// 物种名称（如 "CH4", "CO2_ref", "slab"）
    pub species_name: String,

    /// 表面名称（吸附物使用）
    pub surface_name: Option<String>,

    /// 位点/晶面名称
    pub site_name: Option<String>,

    /// 相态类型
    #[serde(rename = "type")]
    pub species_type: SpeciesType,

    /// 原始电子能量 (eV)
    pub raw_energy: f64,

    /// 外部校正能量 (eV)，缺省为 0
    pub correction_energy: Option<f64>,

    /// 形成能 (eV)，None 表示无法计算
    pub formation_energy: Option<f64>,

    /// 原表中其余列的值（顺序与 `EnergyTable::extra_columns` 一致）
    #[serde(skip)]
    pub extra: Vec<String>,
}

impl EnergyRecord {
    pub fn new(species_name: impl Into<String>, species_type: SpeciesType, raw_energy: f64) -> Self {
        EnergyRecord {
            species_name: species_name.into(),
            surface_name: None,
            site_name: None,
            species_type,
            raw_energy,
            correction_energy: None,
            formation_energy: None,
            extra: Vec::new(),
        }
    }

    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface_name = Some(surface.into());
        self
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site_name = Some(site.into());
        self
    }

    pub fn with_correction(mut self, correction: f64) -> Self {
        self.correction_energy = Some(correction);
        self
    }

    /// 校正后能量 = 原始能量 + 校正能量
    ///
    /// 总是现算，从不从输入读取。
    pub fn corrected_energy(&self) -> f64 {
        self.raw_energy + self.correction_energy.unwrap_or(0.0)
    }

    /// 物种名是否为 "slab"（忽略大小写）
    pub fn is_slab_label(&self) -> bool {
        self.species_name.trim().eq_ignore_ascii_case("slab")
    }

    /// 是否为 slab 行（类型为 slab 或名称为 slab）
    pub fn is_slab(&self) -> bool {
        self.species_type == SpeciesType::Slab || self.is_slab_label()
    }

    /// 用于诊断信息的行描述
    pub fn describe(&self) -> String {
        match (&self.surface_name, &self.site_name) {
            (Some(surface), Some(site)) => {
                format!("{} ({}) on {}/{}", self.species_name, self.species_type, surface, site)
            }
            (Some(surface), None) => {
                format!("{} ({}) on {}", self.species_name, self.species_type, surface)
            }
            _ => format!("{} ({})", self.species_name, self.species_type),
        }
    }
}

/// 能量数据表
#[derive(Debug, Clone, Default)]
pub struct EnergyTable {
    /// 非标准列名（原样保留并写回）
    pub extra_columns: Vec<String>,

    /// 数据行
    pub records: Vec<EnergyRecord>,
}

impl EnergyTable {
    pub fn new(records: Vec<EnergyRecord>) -> Self {
        EnergyTable {
            extra_columns: Vec::new(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 已成功计算形成能的行数
    pub fn resolved_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.formation_energy.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_type_case_insensitive() {
        assert_eq!("GAS".parse::<SpeciesType>().unwrap(), SpeciesType::Gas);
        assert_eq!(" Liquid ".parse::<SpeciesType>().unwrap(), SpeciesType::Liquid);
        assert_eq!("Ads".parse::<SpeciesType>().unwrap(), SpeciesType::Ads);
        assert!("solid".parse::<SpeciesType>().is_err());
    }

    #[test]
    fn test_corrected_energy() {
        let rec = EnergyRecord::new("CO2", SpeciesType::Gas, -22.99);
        assert!((rec.corrected_energy() - (-22.99)).abs() < 1e-12);

        let rec = rec.with_correction(0.15);
        assert!((rec.corrected_energy() - (-22.84)).abs() < 1e-12);
    }

    #[test]
    fn test_slab_detection() {
        let by_type = EnergyRecord::new("Pt111", SpeciesType::Slab, -300.0);
        let by_name = EnergyRecord::new("SLAB", SpeciesType::Ads, -300.0);
        let gas = EnergyRecord::new("H2", SpeciesType::Gas, -6.77);

        assert!(by_type.is_slab());
        assert!(by_name.is_slab());
        assert!(!gas.is_slab());
    }

    #[test]
    fn test_describe() {
        let rec = EnergyRecord::new("CO", SpeciesType::Ads, -310.0)
            .with_surface("Cu")
            .with_site("211");
        assert_eq!(rec.describe(), "CO (ads) on Cu/211");
    }
}
