//! # 振动频率数据库
//!
//! 读取并查询整理好的频率 CSV：
//!
//! ```text
//! species_name,reference,status,frequencies
//! CO2,Ara,gas,"[2361.1, 1316.3, 649.6, 651.3]"
//! H,Ara,ads,"[1105.6, 812.3, 790.0]"
//! ```
//!
//! 频率为方括号列表（单位 cm⁻¹ 或 eV，由热化学模块自动判断），可为空。
//!
//! ## 依赖关系
//! - 被 `commands/freq.rs`、`commands/thermo.rs` 使用
//! - 使用 `csv` + `serde` 反序列化，`regex` 做模糊搜索

use crate::error::{QthermoError, Result};
use crate::models::ThermoStatus;

use regex::RegexBuilder;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV 原始行
#[derive(Debug, Deserialize)]
struct RawEntry {
    species_name: String,
    reference: String,
    status: String,
    #[serde(default)]
    frequencies: Option<String>,
}

/// 频率数据库条目
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyEntry {
    pub species_name: String,
    pub reference: String,
    pub status: ThermoStatus,
    pub frequencies: Vec<f64>,
}

impl FrequencyEntry {
    pub fn num_freqs(&self) -> usize {
        self.frequencies.len()
    }
}

/// 频率数据库
#[derive(Debug, Clone, Default)]
pub struct FrequencyDatabase {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyDatabase {
    /// 从 CSV 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(QthermoError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path).map_err(|e| QthermoError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_reader(file, &path.display().to_string())
    }

    /// 从任意 reader 加载
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();

        for (i, result) in rdr.deserialize::<RawEntry>().enumerate() {
            let raw = result?;
            let row = i + 2;

            let status: ThermoStatus = raw.status.parse().map_err(|e: QthermoError| {
                QthermoError::ParseError {
                    format: "frequency database".to_string(),
                    path: source.to_string(),
                    reason: format!("row {}: {}", row, e),
                }
            })?;

            let frequencies = parse_frequency_list(raw.frequencies.as_deref().unwrap_or(""))
                .map_err(|reason| QthermoError::ParseError {
                    format: "frequency database".to_string(),
                    path: source.to_string(),
                    reason: format!("row {} ({}): {}", row, raw.species_name, reason),
                })?;

            entries.push(FrequencyEntry {
                species_name: raw.species_name,
                reference: raw.reference,
                status,
                frequencies,
            });
        }

        Ok(FrequencyDatabase { entries })
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按物种（精确匹配）及可选的文献来源、状态查询
    pub fn get(
        &self,
        species: &str,
        reference: Option<&str>,
        status: Option<ThermoStatus>,
    ) -> Vec<&FrequencyEntry> {
        self.entries
            .iter()
            .filter(|e| e.species_name == species)
            .filter(|e| reference.map_or(true, |r| e.reference == r))
            .filter(|e| status.map_or(true, |s| e.status == s))
            .collect()
    }

    /// 第一个匹配条目的频率列表
    pub fn get_freq(
        &self,
        species: &str,
        reference: Option<&str>,
        status: Option<ThermoStatus>,
    ) -> Option<&[f64]> {
        self.get(species, reference, status)
            .first()
            .map(|e| e.frequencies.as_slice())
    }

    /// 按来源、状态、物种列表过滤
    pub fn filter(
        &self,
        reference: Option<&str>,
        status: Option<ThermoStatus>,
        species_list: Option<&[&str]>,
    ) -> Vec<&FrequencyEntry> {
        self.entries
            .iter()
            .filter(|e| reference.map_or(true, |r| e.reference == r))
            .filter(|e| status.map_or(true, |s| e.status == s))
            .filter(|e| species_list.map_or(true, |list| list.contains(&e.species_name.as_str())))
            .collect()
    }

    /// 物种名正则搜索（忽略大小写）
    pub fn search(&self, pattern: &str) -> Result<Vec<&FrequencyEntry>> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| QthermoError::InvalidArgument(format!("invalid search pattern: {}", e)))?;

        Ok(self
            .entries
            .iter()
            .filter(|e| re.is_match(&e.species_name))
            .collect())
    }

    /// 全部物种（排序去重）
    pub fn species(&self) -> Vec<String> {
        unique_sorted(self.entries.iter().map(|e| e.species_name.as_str()))
    }

    /// 全部文献来源（排序去重）
    pub fn references(&self) -> Vec<String> {
        unique_sorted(self.entries.iter().map(|e| e.reference.as_str()))
    }

    pub fn gas_species(&self) -> Vec<String> {
        self.species_with_status(ThermoStatus::Gas)
    }

    pub fn ads_species(&self) -> Vec<String> {
        self.species_with_status(ThermoStatus::Ads)
    }

    fn species_with_status(&self, status: ThermoStatus) -> Vec<String> {
        unique_sorted(
            self.entries
                .iter()
                .filter(|e| e.status == status)
                .map(|e| e.species_name.as_str()),
        )
    }
}

fn unique_sorted<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|s| s.to_string())
        .collect()
}

/// 解析 `"[1.0, 2.0]"` 形式的列表，空串或 `[]` 返回空列表
pub fn parse_frequency_list(s: &str) -> std::result::Result<Vec<f64>, String> {
    let inner = s.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>()
                .map_err(|_| format!("invalid frequency value '{}'", t))
        })
        .collect()
}
