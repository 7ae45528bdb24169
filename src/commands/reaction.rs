//! # reaction 命令实现
//!
//! 读取反应定义 CSV，逐物种计算热化学修正，组合为反应自由能，
//! 可选给出平衡电位。
//!
//! 输入格式：
//! ```text
//! species_name,coefficient,electronic_energy,status,frequencies
//! CO2,-1,-22.96,gas,"[2361.1, 1316.3, 649.6, 651.3]"
//! COOH*,1,-330.12,ads,"[3500.0, 1600.0, 1200.0]"
//! ```
//!
//! ## 依赖关系
//! - 使用 `cli/reaction.rs` 定义的参数
//! - 使用 `thermo/`、`parsers/freq_db.rs`
//! - 使用 `utils/output.rs`

use crate::cli::reaction::ReactionArgs;
use crate::error::{QthermoError, Result};
use crate::models::{ThermoPropertySet, ThermoStatus, VibrationalSpectrum};
use crate::parsers::freq_db::parse_frequency_list;
use crate::thermo::{
    compute_thermo, equilibrium_potential, reaction_free_energy, species_free_energy,
    ThermoConditions, ThermoModel,
};
use crate::utils::output;

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use tabled::{Table, Tabled};

/// CSV 原始行
#[derive(Debug, Deserialize)]
struct RawSpecies {
    species_name: String,
    coefficient: f64,
    electronic_energy: f64,
    status: String,
    #[serde(default)]
    frequencies: Option<String>,
}

/// 反应中的一个物种
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReactionSpecies {
    pub name: String,
    pub coefficient: f64,
    pub electronic_energy: f64,
    pub status: ThermoStatus,
    pub spectrum: VibrationalSpectrum,
}

/// 物种结果表格行
#[derive(Debug, Clone, Tabled)]
struct SpeciesRow {
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "ν")]
    coefficient: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "E_elec (eV)")]
    electronic: String,
    #[tabled(rename = "ZPE")]
    zpe: String,
    #[tabled(rename = "TS")]
    ts: String,
    #[tabled(rename = "G (eV)")]
    total: String,
}

/// 读取反应定义
pub(crate) fn read_reaction<R: Read>(reader: R, source: &str) -> Result<Vec<ReactionSpecies>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut species = Vec::new();
    for (i, result) in rdr.deserialize::<RawSpecies>().enumerate() {
        let raw = result?;
        let parse_error = |reason: String| QthermoError::ParseError {
            format: "reaction".to_string(),
            path: source.to_string(),
            reason: format!("row {}: {}", i + 2, reason),
        };

        let status: ThermoStatus = raw
            .status
            .parse()
            .map_err(|e: QthermoError| parse_error(e.to_string()))?;
        let freqs = parse_frequency_list(raw.frequencies.as_deref().unwrap_or(""))
            .map_err(parse_error)?;

        species.push(ReactionSpecies {
            name: raw.species_name,
            coefficient: raw.coefficient,
            electronic_energy: raw.electronic_energy,
            status,
            spectrum: VibrationalSpectrum::from_frequencies(&freqs),
        });
    }

    if species.is_empty() {
        return Err(QthermoError::InvalidFormat(format!(
            "no species in reaction file {}",
            source
        )));
    }

    Ok(species)
}

/// 计算反应自由能，返回各物种热力学性质与 ΔG
pub(crate) fn evaluate_reaction(
    species: &[ReactionSpecies],
    conditions: &ThermoConditions,
) -> Result<(HashMap<String, ThermoPropertySet>, f64)> {
    let mut thermo = HashMap::new();
    let mut electronic = HashMap::new();
    let mut stoichiometry: BTreeMap<String, f64> = BTreeMap::new();

    for s in species {
        if stoichiometry.contains_key(&s.name) {
            return Err(QthermoError::InvalidArgument(format!(
                "species '{}' appears more than once in the reaction",
                s.name
            )));
        }

        let model = match s.status {
            ThermoStatus::Gas => ThermoModel::ideal_gas(s.name.as_str()),
            ThermoStatus::Ads => ThermoModel::Harmonic,
        };
        let props = compute_thermo(&s.spectrum, &model, conditions)?;

        thermo.insert(s.name.clone(), props);
        electronic.insert(s.name.clone(), s.electronic_energy);
        stoichiometry.insert(s.name.clone(), s.coefficient);
    }

    let delta_g = reaction_free_energy(&thermo, &stoichiometry, &electronic)?;
    Ok((thermo, delta_g))
}

/// 执行 reaction 命令
pub fn execute(args: ReactionArgs) -> Result<()> {
    let conditions = ThermoConditions::new(args.temperature, args.pressure)?;

    let file = File::open(&args.input).map_err(|e| QthermoError::FileReadError {
        path: args.input.display().to_string(),
        source: e,
    })?;
    let species = read_reaction(file, &args.input.display().to_string())?;

    output::print_header(&format!(
        "Reaction Free Energy at {:.2} K",
        conditions.temperature
    ));

    let (thermo, delta_g) = evaluate_reaction(&species, &conditions)?;

    let mut rows = Vec::new();
    for s in &species {
        if let Some(props) = thermo.get(&s.name) {
            let total = species_free_energy(&s.name, props, s.electronic_energy)?;
            rows.push(SpeciesRow {
                species: s.name.clone(),
                coefficient: format!("{:+}", s.coefficient),
                status: s.status.to_string(),
                electronic: format!("{:.6}", s.electronic_energy),
                zpe: format!("{:.4}", props.zpe),
                ts: format!("{:.4}", props.ts()),
                total: format!("{:.6}", total),
            });
        }
    }
    println!("{}", Table::new(&rows));

    output::print_header("");
    output::print_energy("ΔG", delta_g, "eV");

    if let Some(n) = args.electrons {
        let u_eq = equilibrium_potential(delta_g, n)?;
        output::print_energy(&format!("U_eq (n = {})", n), u_eq, "V");
    }

    Ok(())
}
