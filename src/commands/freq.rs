//! # freq 命令实现
//!
//! 浏览频率数据库：按物种/来源/状态查询或正则搜索。
//!
//! ## 依赖关系
//! - 使用 `cli/freq.rs` 定义的参数
//! - 使用 `parsers/freq_db.rs`
//! - 使用 `utils/output.rs`

use crate::cli::freq::FreqArgs;
use crate::error::Result;
use crate::models::ThermoStatus;
use crate::parsers::freq_db::{FrequencyDatabase, FrequencyEntry};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 频率条目表格行
#[derive(Debug, Clone, Tabled)]
struct FreqRow {
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "N")]
    count: usize,
    #[tabled(rename = "Frequencies")]
    frequencies: String,
}

impl From<&FrequencyEntry> for FreqRow {
    fn from(e: &FrequencyEntry) -> Self {
        FreqRow {
            species: e.species_name.clone(),
            reference: e.reference.clone(),
            status: e.status.to_string(),
            count: e.num_freqs(),
            frequencies: e
                .frequencies
                .iter()
                .map(|f| format!("{:.1}", f))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// 执行 freq 命令
pub fn execute(args: FreqArgs) -> Result<()> {
    let db = FrequencyDatabase::load(&args.database)?;
    let status: Option<ThermoStatus> = args.status.map(Into::into);

    output::print_header(&format!("Frequency Database: {}", args.database.display()));

    let entries: Vec<&FrequencyEntry> = match (&args.search, &args.species) {
        (Some(pattern), _) => db
            .search(pattern)?
            .into_iter()
            .filter(|e| args.reference.as_deref().map_or(true, |r| e.reference == r))
            .filter(|e| status.map_or(true, |s| e.status == s))
            .collect(),
        (None, Some(species)) => db.get(species, args.reference.as_deref(), status),
        (None, None) if args.reference.is_some() || status.is_some() => {
            db.filter(args.reference.as_deref(), status, None)
        }
        (None, None) => {
            print_overview(&db);
            return Ok(());
        }
    };

    if entries.is_empty() {
        output::print_warning("No matching entries");
        return Ok(());
    }

    let rows: Vec<FreqRow> = entries.into_iter().map(FreqRow::from).collect();
    println!("{}", Table::new(&rows));
    output::print_info(&format!("{} entries", rows.len()));

    Ok(())
}

fn print_overview(db: &FrequencyDatabase) {
    output::print_info(&format!(
        "{} entries, {} species",
        db.len(),
        db.species().len()
    ));
    output::print_info(&format!("References: {}", db.references().join(", ")));
    output::print_info(&format!("Gas phase: {}", db.gas_species().join(", ")));
    output::print_info(&format!("Adsorbed: {}", db.ads_species().join(", ")));
}
