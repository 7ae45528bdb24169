//! # 数据集与缓存
//!
//! `Dataset` 为一张已计算形成能的能量表，提供按物种/表面/类型的查询；
//! `DatasetCache` 按名称从数据目录加载 `<name>.tsv`，首次加载后共享复用。
//!
//! ## 依赖关系
//! - 被 `commands/query.rs` 使用
//! - 使用 `parsers/table.rs` 读取数据
//! - 使用 `batch/collector.rs` 列出可用数据集

use crate::batch::FileCollector;
use crate::diagnostics::Diagnostics;
use crate::energy::formation::{compute_formation_energies, FormationSummary};
use crate::energy::reference::ReferenceTable;
use crate::error::{QthermoError, Result};
use crate::models::{EnergyRecord, EnergyTable, SpeciesType};
use crate::parsers::table::read_energy_table;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 按类型汇总的形成能统计（仅统计已求得的值）
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSummary {
    pub species_type: SpeciesType,
    /// 该类型总行数
    pub rows: usize,
    /// 有形成能的行数
    pub count: usize,
    pub mean: Option<f64>,
    /// 样本标准差，count < 2 时为 None
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl TypeSummary {
    fn from_values(species_type: SpeciesType, rows: usize, values: &[f64]) -> Self {
        let count = values.len();
        let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
        let std = match (mean, count) {
            (Some(m), n) if n > 1 => {
                let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
                Some(var.sqrt())
            }
            _ => None,
        };

        TypeSummary {
            species_type,
            rows,
            count,
            mean,
            std,
            min: values.iter().copied().reduce(f64::min),
            max: values.iter().copied().reduce(f64::max),
        }
    }
}

/// 已计算形成能的数据集
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    table: EnergyTable,
    references: ReferenceTable,
    summary: FormationSummary,
    diagnostics: Diagnostics,
}

impl Dataset {
    /// 建立参考能并计算全部形成能
    pub fn from_table(name: impl Into<String>, mut table: EnergyTable) -> Result<Self> {
        let mut diagnostics = Diagnostics::new();
        let references = ReferenceTable::resolve(&table.records, &mut diagnostics)?;
        let summary = compute_formation_energies(&mut table.records, &references, &mut diagnostics);

        Ok(Dataset {
            name: name.into(),
            table,
            references,
            summary,
            diagnostics,
        })
    }

    /// 从文件加载
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self> {
        let table = read_energy_table(path)?;
        Self::from_table(name, table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &EnergyTable {
        &self.table
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.table.records
    }

    pub fn references(&self) -> &ReferenceTable {
        &self.references
    }

    pub fn summary(&self) -> FormationSummary {
        self.summary
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 按物种名（精确）及可选表面、位点查找
    pub fn find(
        &self,
        species: &str,
        surface: Option<&str>,
        site: Option<&str>,
    ) -> Vec<&EnergyRecord> {
        self.records()
            .iter()
            .filter(|r| r.species_name == species)
            .filter(|r| surface.map_or(true, |s| r.surface_name.as_deref() == Some(s)))
            .filter(|r| site.map_or(true, |s| r.site_name.as_deref() == Some(s)))
            .collect()
    }

    /// 第一个匹配行的形成能
    pub fn formation_energy(
        &self,
        species: &str,
        surface: Option<&str>,
        site: Option<&str>,
    ) -> Option<f64> {
        self.find(species, surface, site)
            .first()
            .and_then(|r| r.formation_energy)
    }

    /// 物种名列表（排序去重），可按类型过滤
    pub fn species_list(&self, species_type: Option<SpeciesType>) -> Vec<String> {
        self.records()
            .iter()
            .filter(|r| species_type.map_or(true, |t| r.species_type == t))
            .map(|r| r.species_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn filter_by_type(&self, species_type: SpeciesType) -> Vec<&EnergyRecord> {
        self.records()
            .iter()
            .filter(|r| r.species_type == species_type)
            .collect()
    }

    pub fn filter_by_surface(&self, surface: &str) -> Vec<&EnergyRecord> {
        self.records()
            .iter()
            .filter(|r| r.surface_name.as_deref() == Some(surface))
            .collect()
    }

    /// 按类型统计形成能
    pub fn summary_by_type(&self) -> Vec<TypeSummary> {
        let mut groups: BTreeMap<SpeciesType, (usize, Vec<f64>)> = BTreeMap::new();
        for r in self.records() {
            let entry = groups.entry(r.species_type).or_default();
            entry.0 += 1;
            if let Some(e) = r.formation_energy {
                entry.1.push(e);
            }
        }

        groups
            .into_iter()
            .map(|(t, (rows, values))| TypeSummary::from_values(t, rows, &values))
            .collect()
    }
}

/// 数据集缓存
///
/// 同名数据集只计算一次；`reload` 强制重新计算，`invalidate` / `clear`
/// 丢弃缓存。
#[derive(Debug)]
pub struct DatasetCache {
    data_dir: PathBuf,
    entries: HashMap<String, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            entries: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 数据集对应的文件路径
    pub fn dataset_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.tsv", name))
    }

    /// 加载数据集（命中缓存则直接返回）
    pub fn load(&mut self, name: &str) -> Result<Arc<Dataset>> {
        if let Some(ds) = self.entries.get(name) {
            return Ok(Arc::clone(ds));
        }
        self.reload(name)
    }

    /// 强制重新加载并计算
    pub fn reload(&mut self, name: &str) -> Result<Arc<Dataset>> {
        let path = self.dataset_path(name);
        if !path.is_file() {
            return Err(QthermoError::DatasetNotFound {
                name: name.to_string(),
                dir: self.data_dir.display().to_string(),
                available: self.available_datasets(),
            });
        }

        let dataset = Arc::new(Dataset::load(name, &path)?);
        self.entries.insert(name.to_string(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// 丢弃单个缓存，返回是否存在
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 数据目录下全部 `*.tsv` 的文件名（不含扩展名），排序
    pub fn available_datasets(&self) -> Vec<String> {
        let files = FileCollector::new(self.data_dir.clone())
            .with_pattern("*.tsv")
            .map(|c| c.collect())
            .unwrap_or_default();

        let mut names: Vec<String> = files
            .iter()
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        names.sort();
        names
    }
}
