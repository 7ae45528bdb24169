//! # formation 命令实现
//!
//! 读取能量表，建立元素参考能，计算每行形成能并写出结果表。
//!
//! ## 依赖关系
//! - 使用 `cli/formation.rs` 定义的参数
//! - 使用 `energy/dataset.rs`、`parsers/table.rs`
//! - 使用 `utils/output.rs`

use crate::cli::formation::FormationArgs;
use crate::energy::{Dataset, TypeSummary};
use crate::error::Result;
use crate::models::EnergyRecord;
use crate::parsers::table::{read_energy_table, write_energy_table, TableFormat};
use crate::utils::output;

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 参考能表格行
#[derive(Debug, Clone, Tabled)]
pub(crate) struct ReferenceRow {
    #[tabled(rename = "Element")]
    pub element: String,
    #[tabled(rename = "E_ref (eV)")]
    pub energy: String,
}

/// 形成能表格行
#[derive(Debug, Clone, Tabled)]
pub(crate) struct FormationRow {
    #[tabled(rename = "Species")]
    pub species: String,
    #[tabled(rename = "Surface")]
    pub surface: String,
    #[tabled(rename = "Site")]
    pub site: String,
    #[tabled(rename = "Type")]
    pub species_type: String,
    #[tabled(rename = "E_corr (eV)")]
    pub corrected: String,
    #[tabled(rename = "ΔE_f (eV)")]
    pub formation: String,
}

impl From<&EnergyRecord> for FormationRow {
    fn from(r: &EnergyRecord) -> Self {
        FormationRow {
            species: r.species_name.clone(),
            surface: r.surface_name.clone().unwrap_or_else(|| "-".to_string()),
            site: r.site_name.clone().unwrap_or_else(|| "-".to_string()),
            species_type: r.species_type.to_string(),
            corrected: format!("{:.6}", r.corrected_energy()),
            formation: r
                .formation_energy
                .map(|e| format!("{:.4}", e))
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// 统计表格行
#[derive(Debug, Clone, Tabled)]
pub(crate) struct SummaryRow {
    #[tabled(rename = "Type")]
    pub species_type: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Mean")]
    pub mean: String,
    #[tabled(rename = "Std")]
    pub std: String,
    #[tabled(rename = "Min")]
    pub min: String,
    #[tabled(rename = "Max")]
    pub max: String,
}

impl From<&TypeSummary> for SummaryRow {
    fn from(s: &TypeSummary) -> Self {
        let fmt = |v: Option<f64>| v.map(|x| format!("{:.4}", x)).unwrap_or_else(|| "-".to_string());
        SummaryRow {
            species_type: s.species_type.to_string(),
            rows: s.rows,
            count: s.count,
            mean: fmt(s.mean),
            std: fmt(s.std),
            min: fmt(s.min),
            max: fmt(s.max),
        }
    }
}

/// 执行 formation 命令
pub fn execute(args: FormationArgs) -> Result<()> {
    output::print_header("Calculating Formation Energies");

    let format = TableFormat::from_path(&args.input)?;
    let table = read_energy_table(&args.input)?;
    output::print_info(&format!(
        "Loaded {} entries from '{}'",
        table.len(),
        args.input.display()
    ));

    let name = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let dataset = Dataset::from_table(name, table)?;
    dataset.diagnostics().emit();

    print_references(&dataset);
    print_records(dataset.records(), args.top_n);

    if args.summary {
        print_summary(&dataset);
    }

    let summary = dataset.summary();
    output::print_success(&format!(
        "Calculated formation energies for {}/{} entries",
        summary.resolved, summary.total
    ));

    if !args.no_save {
        let out_path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input, format));
        let out_format = TableFormat::from_path(&out_path).unwrap_or(format);
        write_energy_table(dataset.table(), &out_path, out_format)?;
        output::print_success(&format!("Results saved to '{}'", out_path.display()));
    }

    Ok(())
}

/// `<dir>/<stem>_formation.<ext>`
pub(crate) fn default_output_path(input: &Path, format: TableFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "energies".to_string());
    input.with_file_name(format!("{}_formation.{}", stem, format.extension()))
}

pub(crate) fn print_references(dataset: &Dataset) {
    output::print_header("Reference Energies");
    let rows: Vec<ReferenceRow> = dataset
        .references()
        .iter()
        .map(|(el, e)| ReferenceRow {
            element: el.to_string(),
            energy: format!("{:.6}", e),
        })
        .collect();
    println!("{}", Table::new(&rows));
}

fn print_records(records: &[EnergyRecord], top_n: usize) {
    let shown = if top_n == 0 { records.len() } else { top_n.min(records.len()) };
    output::print_header(&format!("Formation Energies ({} of {})", shown, records.len()));

    let rows: Vec<FormationRow> = records.iter().take(shown).map(FormationRow::from).collect();
    println!("{}", Table::new(&rows));
}

pub(crate) fn print_summary(dataset: &Dataset) {
    output::print_header("Summary by Type");
    let rows: Vec<SummaryRow> = dataset
        .summary_by_type()
        .iter()
        .map(SummaryRow::from)
        .collect();
    println!("{}", Table::new(&rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let p = default_output_path(Path::new("data/BEEF-vdW.tsv"), TableFormat::Tsv);
        assert_eq!(p, PathBuf::from("data/BEEF-vdW_formation.tsv"));

        let p = default_output_path(Path::new("energies.csv"), TableFormat::Csv);
        assert_eq!(p, PathBuf::from("energies_formation.csv"));
    }

    #[test]
    fn test_execute_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("e.csv");
        std::fs::write(
            &input,
            "species,type,raw_energy\nH2,gas,-6.77\nH2O,gas,-14.22\nOH,ads,-10.0\n",
        )
        .unwrap();

        execute(FormationArgs {
            input: input.clone(),
            output: None,
            top_n: 0,
            summary: true,
            no_save: false,
        })
        .unwrap();

        let written = read_energy_table(&dir.path().join("e_formation.csv")).unwrap();
        assert_eq!(written.len(), 3);
    }
}
