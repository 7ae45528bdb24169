//! # 能量数据表读写
//!
//! 读取/写出 CSV 或 TSV 能量表。列名忽略大小写并做别名归一化：
//! `surface` → `surface_name`，`facet` → `site_name`，
//! `species` → `species_name`，`status` / `phase` → `type`。
//! `species_name`、`raw_energy`、`type` 为必需列。
//!
//! 输入中的 `corrected_energy` / `formation_energy` 列被忽略，
//! 两者总是重新计算。
//!
//! ## 依赖关系
//! - 被 `energy/dataset.rs`、`commands/formation.rs` 使用
//! - 使用 `csv` crate
//! - 使用 `models/record.rs`

use crate::error::{QthermoError, Result};
use crate::models::{EnergyRecord, EnergyTable, SpeciesType};

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// 必需列
const REQUIRED_COLUMNS: [&str; 3] = ["species_name", "raw_energy", "type"];

/// 输出时的标准列顺序
const OUTPUT_COLUMNS: [&str; 8] = [
    "species_name",
    "surface_name",
    "site_name",
    "type",
    "raw_energy",
    "correction_energy",
    "corrected_energy",
    "formation_energy",
];

/// 表格文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
}

impl TableFormat {
    /// 从文件扩展名推断格式
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "tsv" => Ok(TableFormat::Tsv),
            "xlsx" | "xls" => Err(QthermoError::UnsupportedFormat(format!(
                "{} (export the sheet to .tsv or .csv first)",
                path.display()
            ))),
            _ => Err(QthermoError::UnsupportedFormat(format!(
                "Cannot determine table format for: {}",
                path.display()
            ))),
        }
    }

    pub fn delimiter(&self) -> u8 {
        match self {
            TableFormat::Csv => b',',
            TableFormat::Tsv => b'\t',
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Tsv => "tsv",
        }
    }
}

impl std::fmt::Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 列名归一化
pub fn normalize_column_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.as_str() {
        "surface" => "surface_name".to_string(),
        "facet" => "site_name".to_string(),
        "species" => "species_name".to_string(),
        "status" | "phase" => "type".to_string(),
        _ => lower,
    }
}

/// 标准列在原表中的位置
#[derive(Debug, Default)]
struct ColumnMap {
    species_name: usize,
    raw_energy: usize,
    species_type: usize,
    surface_name: Option<usize>,
    site_name: Option<usize>,
    correction_energy: Option<usize>,
    /// (原列名, 位置)
    extra: Vec<(String, usize)>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut found: Vec<(String, usize)> = Vec::new();
        let mut extra = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            let canonical = normalize_column_name(header);
            let known = OUTPUT_COLUMNS.contains(&canonical.as_str());

            if !known {
                extra.push((header.trim().to_string(), idx));
            } else if !found.iter().any(|(name, _)| *name == canonical) {
                found.push((canonical, idx));
            }
        }

        let position = |name: &str| found.iter().find(|(n, _)| n == name).map(|(_, i)| *i);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| position(c).is_none())
            .map(|c| c.to_string())
            .collect();

        match (
            position("species_name"),
            position("raw_energy"),
            position("type"),
        ) {
            (Some(species_name), Some(raw_energy), Some(species_type)) if missing.is_empty() => {
                Ok(ColumnMap {
                    species_name,
                    raw_energy,
                    species_type,
                    surface_name: position("surface_name"),
                    site_name: position("site_name"),
                    correction_energy: position("correction_energy"),
                    extra,
                })
            }
            _ => Err(QthermoError::MissingColumns {
                missing,
                available: headers.iter().map(|h| h.to_string()).collect(),
            }),
        }
    }
}

/// 读取能量表文件
pub fn read_energy_table(path: &Path) -> Result<EnergyTable> {
    if !path.exists() {
        return Err(QthermoError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let format = TableFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| QthermoError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    read_energy_table_from_reader(file, format, &path.display().to_string())
}

/// 从任意 reader 读取能量表
pub fn read_energy_table_from_reader<R: Read>(
    reader: R,
    format: TableFormat,
    source: &str,
) -> Result<EnergyTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let parse_error = |row: usize, reason: String| QthermoError::ParseError {
        format: format!("{} energy table", format),
        path: source.to_string(),
        reason: format!("row {}: {}", row, reason),
    };

    let mut records = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = i + 2; // 1-based，含表头
        let fields = result?;
        let field = |idx: usize| fields.get(idx).unwrap_or("").trim();
        let optional = |idx: Option<usize>| {
            idx.map(|i| field(i))
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        let species_name = field(columns.species_name);
        if species_name.is_empty() {
            return Err(parse_error(row, "empty species_name".to_string()));
        }

        let raw = field(columns.raw_energy);
        let raw_energy: f64 = raw
            .parse()
            .map_err(|_| parse_error(row, format!("invalid raw_energy '{}'", raw)))?;

        let species_type: SpeciesType = field(columns.species_type)
            .parse()
            .map_err(|e: QthermoError| parse_error(row, e.to_string()))?;

        let correction_energy = match optional(columns.correction_energy) {
            Some(s) => Some(
                s.parse::<f64>()
                    .map_err(|_| parse_error(row, format!("invalid correction_energy '{}'", s)))?,
            ),
            None => None,
        };

        records.push(EnergyRecord {
            species_name: species_name.to_string(),
            surface_name: optional(columns.surface_name),
            site_name: optional(columns.site_name),
            species_type,
            raw_energy,
            correction_energy,
            formation_energy: None,
            extra: columns
                .extra
                .iter()
                .map(|(_, idx)| field(*idx).to_string())
                .collect(),
        });
    }

    Ok(EnergyTable {
        extra_columns: columns.extra.into_iter().map(|(name, _)| name).collect(),
        records,
    })
}

/// 写出能量表文件
pub fn write_energy_table(table: &EnergyTable, path: &Path, format: TableFormat) -> Result<()> {
    let file = File::create(path).map_err(|e| QthermoError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    write_energy_table_to_writer(table, file, format).map_err(|e| match e {
        QthermoError::FileWriteError { source, .. } => QthermoError::FileWriteError {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}

/// 写出能量表到任意 writer
pub fn write_energy_table_to_writer<W: Write>(
    table: &EnergyTable,
    writer: W,
    format: TableFormat,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);

    let header: Vec<&str> = OUTPUT_COLUMNS
        .iter()
        .copied()
        .chain(table.extra_columns.iter().map(|s| s.as_str()))
        .collect();
    wtr.write_record(&header)?;

    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();

    for r in &table.records {
        let mut row = vec![
            r.species_name.clone(),
            r.surface_name.clone().unwrap_or_default(),
            r.site_name.clone().unwrap_or_default(),
            r.species_type.to_string(),
            r.raw_energy.to_string(),
            opt(r.correction_energy),
            r.corrected_energy().to_string(),
            opt(r.formation_energy),
        ];
        row.extend(r.extra.iter().cloned());
        wtr.write_record(&row)?;
    }

    wtr.flush().map_err(|e| QthermoError::FileWriteError {
        path: "<writer>".to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSV: &str = "Surface\tFacet\tSpecies\tRaw_Energy\tStatus\tcorrection_energy\tnote\n\
                       \t\tH2\t-6.77\tgas\t\tbeef\n\
                       Cu\t211\tCO\t-310.5\tADS\t0.1\t\n\
                       Cu\t211\tslab\t-300.0\tslab\t\tclean\n";

    #[test]
    fn test_alias_columns() {
        let table = read_energy_table_from_reader(TSV.as_bytes(), TableFormat::Tsv, "test").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.extra_columns, vec!["note".to_string()]);

        let h2 = &table.records[0];
        assert_eq!(h2.species_name, "H2");
        assert_eq!(h2.species_type, SpeciesType::Gas);
        assert!(h2.surface_name.is_none());
        assert!(h2.correction_energy.is_none());
        assert_eq!(h2.extra, vec!["beef".to_string()]);

        let co = &table.records[1];
        assert_eq!(co.species_type, SpeciesType::Ads);
        assert_eq!(co.surface_name.as_deref(), Some("Cu"));
        assert_eq!(co.site_name.as_deref(), Some("211"));
        assert!((co.corrected_energy() - (-310.4)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_required_columns() {
        let csv = "species,energy\nH2,-6.77\n";
        match read_energy_table_from_reader(csv.as_bytes(), TableFormat::Csv, "test") {
            Err(QthermoError::MissingColumns { missing, available }) => {
                assert_eq!(missing, vec!["raw_energy".to_string(), "type".to_string()]);
                assert_eq!(available, vec!["species".to_string(), "energy".to_string()]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_energy_is_fatal() {
        let csv = "species_name,raw_energy,type\nH2,abc,gas\n";
        let err = read_energy_table_from_reader(csv.as_bytes(), TableFormat::Csv, "test");
        assert!(matches!(err, Err(QthermoError::ParseError { .. })));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let csv = "species_name,raw_energy,type\nPt,-5.0,solid\n";
        let err = read_energy_table_from_reader(csv.as_bytes(), TableFormat::Csv, "test");
        match err {
            Err(QthermoError::ParseError { reason, .. }) => assert!(reason.contains("row 2")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_input_formation_energy_ignored() {
        let csv = "species_name,raw_energy,type,formation_energy,corrected_energy\nH2,-6.77,gas,1.0,99\n";
        let table = read_energy_table_from_reader(csv.as_bytes(), TableFormat::Csv, "test").unwrap();
        assert!(table.extra_columns.is_empty());
        assert!(table.records[0].formation_energy.is_none());
        assert!((table.records[0].corrected_energy() - (-6.77)).abs() < 1e-12);
    }

    #[test]
    fn test_write_includes_formation_column() {
        let mut table = read_energy_table_from_reader(TSV.as_bytes(), TableFormat::Tsv, "test").unwrap();
        table.records[2].formation_energy = Some(0.0);

        let mut buf = Vec::new();
        write_energy_table_to_writer(&table, &mut buf, TableFormat::Csv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "species_name,surface_name,site_name,type,raw_energy,correction_energy,corrected_energy,formation_energy,note"
        );
        assert_eq!(lines[1], "H2,,,gas,-6.77,,-6.77,,beef");
        assert_eq!(lines[3], "slab,Cu,211,slab,-300,,-300,0,clean");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(TableFormat::from_path(Path::new("a.TSV")).unwrap(), TableFormat::Tsv);
        assert_eq!(TableFormat::from_path(Path::new("a.csv")).unwrap(), TableFormat::Csv);
        assert!(TableFormat::from_path(Path::new("a.xlsx")).is_err());
        assert!(TableFormat::from_path(Path::new("data")).is_err());
    }
}
