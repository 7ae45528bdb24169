//! # thermo 命令实现
//!
//! 单个振动谱或一批 OUTCAR 的热化学修正。
//!
//! ## 功能
//! - 频率来源：命令行列表 / 频率数据库 / OUTCAR
//! - 相态自动判断：路径中含 `gases` 目录时按理想气体处理，
//!   物种名取 OUTCAR 所在目录名（`H2_ref` → `H2`）
//! - 气相结构：`--structure` XYZ，其次内置参考结构，最后伪几何结构
//! - 批量模式并行处理并写出 CSV 汇总
//!
//! ## 依赖关系
//! - 使用 `cli/thermo.rs` 定义的参数
//! - 使用 `thermo/`、`parsers/outcar.rs`、`parsers/freq_db.rs`、`parsers/xyz.rs`
//! - 使用 `batch/` 进行批量处理

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::thermo::{Phase, ThermoArgs};
use crate::error::{QthermoError, Result};
use crate::models::{Molecule, ThermoPropertySet, ThermoStatus, VibrationalSpectrum};
use crate::parsers::freq_db::FrequencyDatabase;
use crate::parsers::outcar::parse_outcar_frequencies;
use crate::parsers::xyz::parse_xyz_file;
use crate::thermo::constants::ev_to_cm;
use crate::thermo::{
    compute_thermo, reference_molecule, GasParameters, ThermoConditions, ThermoModel,
};
use crate::utils::output;

use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tabled::{Table, Tabled};

/// 振动谱及其来源
struct SpectrumSource {
    spectrum: VibrationalSpectrum,
    /// 数据库条目自带的状态
    status: Option<ThermoStatus>,
    description: String,
}

/// 批量结果行
#[derive(Debug, Clone, Serialize, Tabled)]
struct BatchRow {
    #[tabled(rename = "File")]
    path: String,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Modes")]
    modes: usize,
    #[tabled(rename = "Imag")]
    imaginary: usize,
    #[tabled(rename = "ZPE")]
    #[serde(rename = "zpe_eV")]
    zpe: f64,
    #[tabled(rename = "Cp/Cv")]
    #[serde(rename = "heat_capacity_eV")]
    heat_capacity: f64,
    #[tabled(rename = "TS")]
    #[serde(rename = "ts_eV")]
    ts: f64,
    #[tabled(rename = "G/F")]
    #[serde(rename = "free_energy_eV")]
    free_energy: f64,
    #[tabled(skip)]
    #[serde(skip)]
    imaginary_note: Option<String>,
}

impl BatchRow {
    fn new(path: &Path, species: &str, props: &ThermoPropertySet) -> Self {
        BatchRow {
            path: path.display().to_string(),
            species: species.to_string(),
            status: props.status.to_string(),
            modes: props.spectrum.len(),
            imaginary: props.spectrum.imaginary_count(),
            zpe: round6(props.zpe),
            heat_capacity: round6(props.cp.or(props.cv).unwrap_or(0.0)),
            ts: round6(props.ts()),
            free_energy: round6(props.free_energy().unwrap_or(0.0)),
            imaginary_note: imaginary_note(&props.spectrum),
        }
    }
}

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

/// 虚频提示：数量及最大虚频幅值
fn imaginary_note(spectrum: &VibrationalSpectrum) -> Option<String> {
    let largest = spectrum.largest_imaginary()?;
    Some(format!(
        "{} imaginary mode(s) excluded from thermochemistry (largest {:.1} cm^-1, {:.4} eV)",
        spectrum.imaginary_count(),
        ev_to_cm(largest),
        largest
    ))
}

/// 执行 thermo 命令
pub fn execute(args: ThermoArgs) -> Result<()> {
    let conditions = ThermoConditions::new(args.temperature, args.pressure)?;

    match &args.input {
        Some(input) if input.is_dir() => run_batch(&args, input, &conditions),
        _ => run_single(&args, &conditions),
    }
}

// ─────────────────────────────────────────────────────────────
// 单个振动谱
// ─────────────────────────────────────────────────────────────

fn run_single(args: &ThermoArgs, conditions: &ThermoConditions) -> Result<()> {
    let source = load_spectrum(args)?;
    output::print_info(&format!("Frequencies from {}", source.description));

    let status = resolve_status(args.phase, args.input.as_deref(), source.status);
    let species = args
        .species
        .clone()
        .or_else(|| args.input.as_deref().and_then(species_from_path));

    let structure = args.structure.as_deref().map(parse_xyz_file).transpose()?;
    let model = build_model(status, species.as_deref(), args, structure)?;

    if let Some(note) = imaginary_note(&source.spectrum) {
        output::print_warning(&note);
    }

    let energies: Vec<String> = source
        .spectrum
        .modes()
        .iter()
        .map(|m| format!("{:.6}", m.energy))
        .collect();
    output::print_info(&format!("Mode energies (eV): [{}]", energies.join(", ")));

    let props = compute_thermo(&source.spectrum, &model, conditions)?;
    println!("{}", props);

    Ok(())
}

fn load_spectrum(args: &ThermoArgs) -> Result<SpectrumSource> {
    if let Some(freqs) = &args.frequencies {
        return Ok(SpectrumSource {
            spectrum: VibrationalSpectrum::from_frequencies(freqs),
            status: None,
            description: "command line".to_string(),
        });
    }

    if let Some(db_path) = &args.freq_db {
        let species = args.species.as_deref().ok_or_else(|| {
            QthermoError::InvalidArgument("--species is required with --freq-db".to_string())
        })?;
        let db = FrequencyDatabase::load(db_path)?;
        let status_filter = match args.phase {
            Phase::Gas => Some(ThermoStatus::Gas),
            Phase::Ads => Some(ThermoStatus::Ads),
            Phase::Auto => None,
        };

        let entries = db.get(species, args.reference.as_deref(), status_filter);
        let entry = entries.first().ok_or_else(|| {
            QthermoError::InvalidArgument(format!(
                "no frequencies for '{}' in {}",
                species,
                db_path.display()
            ))
        })?;
        if entries.len() > 1 {
            output::print_warning(&format!(
                "{} entries for '{}'; using reference '{}'",
                entries.len(),
                species,
                entry.reference
            ));
        }

        return Ok(SpectrumSource {
            spectrum: VibrationalSpectrum::from_frequencies(&entry.frequencies),
            status: Some(entry.status),
            description: format!("{} ({})", db_path.display(), entry.reference),
        });
    }

    match &args.input {
        Some(path) => Ok(SpectrumSource {
            spectrum: parse_outcar_frequencies(path)?,
            status: None,
            description: path.display().to_string(),
        }),
        None => Err(QthermoError::InvalidArgument(
            "no frequencies given: pass an OUTCAR path, --frequencies, or --freq-db with --species"
                .to_string(),
        )),
    }
}

// ─────────────────────────────────────────────────────────────
// 批量 OUTCAR
// ─────────────────────────────────────────────────────────────

fn run_batch(args: &ThermoArgs, input: &Path, conditions: &ThermoConditions) -> Result<()> {
    output::print_header("Batch Thermochemistry");

    let files = FileCollector::new(input.to_path_buf())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(QthermoError::NoFilesFound {
            pattern: format!("{}/{}", input.display(), args.pattern),
        });
    }

    output::print_info(&format!("Found {} file(s)", files.len()));

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(&files, |path| process_outcar(path, args, conditions))?;

    for row in &result.outputs {
        if let Some(note) = &row.imaginary_note {
            output::print_warning(&format!("{}: {}", row.path, note));
        }
    }
    for (path, reason) in &result.skipped {
        output::print_skip(&format!("{}: {}", path, reason));
    }
    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path, err));
    }

    if !result.outputs.is_empty() {
        println!("{}", Table::new(&result.outputs));

        let out_path = args
            .output
            .clone()
            .unwrap_or_else(|| input.join("thermo_summary.csv"));
        save_batch_csv(&result.outputs, &out_path)?;
        output::print_success(&format!("Summary saved to '{}'", out_path.display()));
    }

    output::print_info(&format!(
        "{} processed, {} skipped, {} failed",
        result.success(),
        result.skipped.len(),
        result.failed()
    ));

    Ok(())
}

fn process_outcar(
    path: &PathBuf,
    args: &ThermoArgs,
    conditions: &ThermoConditions,
) -> ProcessResult<BatchRow> {
    let name = path.display().to_string();

    let spectrum = match parse_outcar_frequencies(path) {
        Ok(s) => s,
        Err(QthermoError::ParseError { reason, .. }) => return ProcessResult::Skipped(name, reason),
        Err(e) => return ProcessResult::Failed(name, e.to_string()),
    };

    let status = resolve_status(args.phase, Some(path), None);
    let species = species_from_path(path).unwrap_or_default();

    let outcome = build_model(status, Some(species.as_str()), args, None)
        .and_then(|model| compute_thermo(&spectrum, &model, conditions));

    match outcome {
        Ok(props) => ProcessResult::Success(BatchRow::new(path, &species, &props)),
        Err(e) => ProcessResult::Failed(name, e.to_string()),
    }
}

fn save_batch_csv(rows: &[BatchRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(QthermoError::CsvError)?;

    for row in rows {
        wtr.serialize(row).map_err(QthermoError::CsvError)?;
    }

    wtr.flush().map_err(|e| QthermoError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 相态与模型
// ─────────────────────────────────────────────────────────────

/// 路径中是否含 `gases` 目录
pub(crate) fn path_is_gas(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == "gases"))
}

/// 由 OUTCAR 所在目录名推断物种名（去掉 `_ref` 后缀）
pub(crate) fn species_from_path(path: &Path) -> Option<String> {
    let dir = if path.is_dir() { path } else { path.parent()? };
    let name = dir.file_name()?.to_str()?;
    Some(name.strip_suffix("_ref").unwrap_or(name).to_string())
}

fn resolve_status(phase: Phase, path: Option<&Path>, db_status: Option<ThermoStatus>) -> ThermoStatus {
    match phase {
        Phase::Gas => ThermoStatus::Gas,
        Phase::Ads => ThermoStatus::Ads,
        Phase::Auto => db_status.unwrap_or_else(|| {
            if path.map_or(false, path_is_gas) {
                ThermoStatus::Gas
            } else {
                ThermoStatus::Ads
            }
        }),
    }
}

/// 构造统计模型
///
/// 气相结构优先取 `structure`，其次内置参考结构，最后为伪几何结构。
fn build_model(
    status: ThermoStatus,
    species: Option<&str>,
    args: &ThermoArgs,
    structure: Option<Molecule>,
) -> Result<ThermoModel> {
    match status {
        ThermoStatus::Ads => Ok(ThermoModel::Harmonic),
        ThermoStatus::Gas => {
            let species = species.filter(|s| !s.is_empty()).ok_or_else(|| {
                QthermoError::InvalidArgument(
                    "gas-phase thermochemistry needs a species name (--species)".to_string(),
                )
            })?;

            let mut params = GasParameters::lookup(species);
            if let Some(sigma) = args.symmetry {
                params = params.with_symmetry_number(sigma);
            }
            if let Some(geometry) = args.geometry {
                params = params.with_geometry(geometry.into());
            }
            if let Some(spin) = args.spin {
                params = params.with_spin(spin);
            }

            Ok(ThermoModel::IdealGas {
                species: species.to_string(),
                params,
                molecule: structure.or_else(|| reference_molecule(species)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_heuristics() {
        let p = Path::new("/work/gases/H2_ref/OUTCAR");
        assert!(path_is_gas(p));
        assert_eq!(species_from_path(p).as_deref(), Some("H2"));

        let p = Path::new("/work/Cu211/COOH/OUTCAR");
        assert!(!path_is_gas(p));
        assert_eq!(species_from_path(p).as_deref(), Some("COOH"));

        assert!(!path_is_gas(Path::new("/work/gases_old/CO/OUTCAR")));
    }

    #[test]
    fn test_imaginary_note() {
        let clean = VibrationalSpectrum::from_frequencies(&[500.0, 1200.0]);
        assert!(imaginary_note(&clean).is_none());

        let noisy = VibrationalSpectrum::from_frequencies(&[-100.0, 500.0, -250.0]);
        let note = imaginary_note(&noisy).unwrap();
        assert!(note.starts_with("2 imaginary mode(s)"));
        assert!(note.contains("largest 250.0 cm^-1"));
    }

    #[test]
    fn test_resolve_status() {
        let gas_path = Path::new("gases/CO2/OUTCAR");
        assert_eq!(resolve_status(Phase::Auto, Some(gas_path), None), ThermoStatus::Gas);
        assert_eq!(resolve_status(Phase::Ads, Some(gas_path), None), ThermoStatus::Ads);
        assert_eq!(resolve_status(Phase::Auto, None, None), ThermoStatus::Ads);
        assert_eq!(
            resolve_status(Phase::Auto, None, Some(ThermoStatus::Gas)),
            ThermoStatus::Gas
        );
    }

    #[test]
    fn test_batch_over_directory() {
        let dir = tempfile::tempdir().unwrap();
        let gas_dir = dir.path().join("gases").join("H2O");
        let ads_dir = dir.path().join("Cu211").join("OH");
        let empty_dir = dir.path().join("Cu211").join("slab");
        for d in [&gas_dir, &ads_dir, &empty_dir] {
            std::fs::create_dir_all(d).unwrap();
        }

        let line = |mev: f64| format!("   1 f  =   1.0 THz   6.2 2PiTHz 33.0 cm-1   {} meV\n", mev);
        std::fs::write(
            gas_dir.join("OUTCAR"),
            format!("{}{}{}", line(476.9), line(462.2), line(200.2)),
        )
        .unwrap();
        std::fs::write(ads_dir.join("OUTCAR"), format!("{}{}", line(450.0), line(90.0))).unwrap();
        std::fs::write(empty_dir.join("OUTCAR"), "no frequencies\n").unwrap();

        let out = dir.path().join("summary.csv");
        let args = ThermoArgs {
            input: Some(dir.path().to_path_buf()),
            frequencies: None,
            freq_db: None,
            species: None,
            reference: None,
            phase: Phase::Auto,
            symmetry: None,
            geometry: None,
            spin: None,
            structure: None,
            temperature: 298.15,
            pressure: 101325.0,
            pattern: "OUTCAR".to_string(),
            recursive: true,
            jobs: 2,
            output: Some(out.clone()),
        };
        execute(args).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("path,species,status"));
        assert!(text.contains(",H2O,gas,"));
        assert!(text.contains(",OH,ads,"));
    }

    fn single_args() -> ThermoArgs {
        ThermoArgs {
            input: None,
            frequencies: None,
            freq_db: None,
            species: None,
            reference: None,
            phase: Phase::Auto,
            symmetry: None,
            geometry: None,
            spin: None,
            structure: None,
            temperature: 298.15,
            pressure: 101325.0,
            pattern: "OUTCAR".to_string(),
            recursive: false,
            jobs: 0,
            output: None,
        }
    }

    #[test]
    fn test_single_needs_frequencies() {
        assert!(matches!(
            execute(single_args()),
            Err(QthermoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_gas_structure_priority() {
        let args = single_args();
        let atoms_of = |model: ThermoModel| match model {
            ThermoModel::IdealGas { molecule, .. } => molecule.map(|m| m.atoms.len()),
            ThermoModel::Harmonic => panic!("expected ideal gas"),
        };

        let custom = crate::parsers::xyz::parse_xyz_content("2\nH2\nH 0 0 0\nH 0 0 0.75\n", "H2")
            .unwrap();
        let model = build_model(ThermoStatus::Gas, Some("CO2"), &args, Some(custom)).unwrap();
        assert_eq!(atoms_of(model), Some(2));

        let model = build_model(ThermoStatus::Gas, Some("CO2_ref"), &args, None).unwrap();
        assert_eq!(atoms_of(model), Some(3));

        let model = build_model(ThermoStatus::Gas, Some("C4H10"), &args, None).unwrap();
        assert_eq!(atoms_of(model), None);
    }

    #[test]
    fn test_single_with_structure_file() {
        let dir = tempfile::tempdir().unwrap();
        let xyz = dir.path().join("h2.xyz");
        std::fs::write(&xyz, "2\nH2\nH 0 0 0\nH 0 0 0.741\n").unwrap();

        let mut args = single_args();
        args.frequencies = Some(vec![4401.0]);
        args.species = Some("H2".to_string());
        args.phase = Phase::Gas;
        args.structure = Some(xyz);
        assert!(execute(args).is_ok());

        let mut args = single_args();
        args.frequencies = Some(vec![4401.0]);
        args.species = Some("H2".to_string());
        args.phase = Phase::Gas;
        args.structure = Some(dir.path().join("missing.xyz"));
        assert!(matches!(execute(args), Err(QthermoError::FileReadError { .. })));
    }
}
