//! # query 命令实现
//!
//! 从数据目录加载数据集（带缓存），按物种/表面/位点/类型查询形成能。
//!
//! ## 依赖关系
//! - 使用 `cli/query.rs` 定义的参数
//! - 使用 `energy/dataset.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::query::QueryArgs;
use crate::commands::formation::{print_references, print_summary, FormationRow};
use crate::energy::DatasetCache;
use crate::error::{QthermoError, Result};
use crate::models::{EnergyRecord, SpeciesType};
use crate::utils::{output, progress};

use tabled::Table;

/// 执行 query 命令
pub fn execute(args: QueryArgs) -> Result<()> {
    if !args.data_dir.is_dir() {
        return Err(QthermoError::DirectoryNotFound {
            path: args.data_dir.display().to_string(),
        });
    }

    let mut cache = DatasetCache::new(args.data_dir.clone());

    let name = match (&args.dataset, args.list) {
        (Some(name), false) => name.clone(),
        _ => {
            list_datasets(&cache);
            return Ok(());
        }
    };

    output::print_header(&format!("Dataset: {}", name));

    let spinner = progress::loading_spinner(&format!("Loading {}...", name));
    let loaded = cache.load(&name);
    spinner.finish_and_clear();
    let dataset = loaded?;

    dataset.diagnostics().emit();
    output::print_success(&format!(
        "{} loaded ({} entries, {} with formation energy)",
        dataset.name(),
        dataset.len(),
        dataset.summary().resolved
    ));

    let type_filter: Option<SpeciesType> = args.species_type.map(Into::into);

    let matches: Vec<&EnergyRecord> = match (&args.species, &args.surface) {
        (Some(species), _) => dataset.find(species, args.surface.as_deref(), args.site.as_deref()),
        (None, Some(surface)) => dataset.filter_by_surface(surface),
        (None, None) => match type_filter {
            Some(t) => dataset.filter_by_type(t),
            None => {
                print_references(&dataset);
                print_summary(&dataset);
                output::print_info(&format!(
                    "Species: {}",
                    dataset.species_list(None).join(", ")
                ));
                return Ok(());
            }
        },
    };

    let matches: Vec<&EnergyRecord> = matches
        .into_iter()
        .filter(|r| type_filter.map_or(true, |t| r.species_type == t))
        .collect();

    if matches.is_empty() {
        output::print_warning(&format!("No entries matched in {}", dataset.name()));
        return Ok(());
    }

    let rows: Vec<FormationRow> = matches.iter().map(|r| FormationRow::from(*r)).collect();
    println!("{}", Table::new(&rows));

    if let Some(species) = &args.species {
        if matches.len() > 1 {
            output::print_warning(&format!(
                "Multiple entries found for '{}'; the first match is reported",
                species
            ));
        }
        match matches[0].formation_energy {
            Some(e) => output::print_energy(&format!("ΔE_f({})", species), e, "eV"),
            None => output::print_warning(&format!(
                "Formation energy of '{}' could not be calculated",
                species
            )),
        }
    }

    Ok(())
}

fn list_datasets(cache: &DatasetCache) {
    let names = cache.available_datasets();
    if names.is_empty() {
        output::print_warning(&format!(
            "No .tsv datasets found in '{}'",
            cache.data_dir().display()
        ));
        return;
    }

    output::print_header(&format!("Datasets in {}", cache.data_dir().display()));
    for name in names {
        println!("  {}", name);
    }
}
