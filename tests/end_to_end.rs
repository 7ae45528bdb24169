use qthermo::energy::formation_energy_for;
use qthermo::parsers::table::{read_energy_table, write_energy_table, TableFormat};
use qthermo::models::{Atom, Molecule};
use qthermo::thermo::constants::BOLTZMANN_EV;
use qthermo::thermo::{ads_thermo, gas_thermo, GasParameters};
use qthermo::{
    compute_formation_energies, compute_thermo, equilibrium_potential, parse_formula,
    reaction_free_energy, Dataset, DatasetCache, Diagnostics, EnergyRecord, EnergyTable, Level,
    QthermoError, ReferenceTable, SpeciesType, ThermoConditions, ThermoModel, VibrationalSpectrum,
};

use std::collections::{BTreeMap, HashMap};
use std::fs;

const TSV: &str = "species_name\tsurface_name\tsite_name\ttype\traw_energy\tcorrection_energy\n\
                   H2\t\t\tgas\t-6.77\t\n\
                   H2O\t\t\tgas\t-14.22\t\n\
                   CO2\t\t\tgas\t-22.96\t\n\
                   slab\tCu\t211\tslab\t-300.0\t\n\
                   CO\tCu\t211\tads\t-315.5\t0.1\n\
                   CO\t\t\tads\t-315.5\t\n";

fn sample_records() -> Vec<EnergyRecord> {
    vec![
        EnergyRecord::new("H2", SpeciesType::Gas, -6.77),
        EnergyRecord::new("H2O", SpeciesType::Gas, -14.22),
        EnergyRecord::new("CO2", SpeciesType::Gas, -22.96),
    ]
}

#[test]
fn formula_parsing() {
    let ethanol = parse_formula("CH3CH2OH");
    assert_eq!(ethanol.count("C"), 2);
    assert_eq!(ethanol.count("H"), 6);
    assert_eq!(ethanol.count("O"), 1);

    assert_eq!(parse_formula("H2O_ref").count("H"), 2);
    assert!(parse_formula("slab").is_empty());
}

#[test]
fn references_from_pivots() {
    let mut diags = Diagnostics::new();
    let refs = ReferenceTable::resolve(&sample_records(), &mut diags).unwrap();

    assert!((refs.get("H").unwrap() - (-3.385)).abs() < 1e-9);
    assert!((refs.get("O").unwrap() - (-7.45)).abs() < 1e-9);
    assert!((refs.get("C").unwrap() - (-22.96 + 14.9)).abs() < 1e-9);
}

#[test]
fn missing_pivot_is_fatal() {
    let records = vec![EnergyRecord::new("H2", SpeciesType::Gas, -6.77)];
    let err = ReferenceTable::resolve(&records, &mut Diagnostics::new()).unwrap_err();
    assert!(matches!(err, QthermoError::MissingPivotSpecies { .. }));
}

#[test]
fn weaker_pivot_matches_are_reported() {
    let records = vec![
        EnergyRecord::new("H2", SpeciesType::Ads, -6.77),
        EnergyRecord::new("H2O_ref", SpeciesType::Gas, -14.22),
        EnergyRecord::new("slab", SpeciesType::Slab, -300.0).with_surface("Cu"),
    ];
    let mut diags = Diagnostics::new();
    let refs = ReferenceTable::resolve(&records, &mut diags).unwrap();

    assert!((refs.get("H").unwrap() - (-3.385)).abs() < 1e-9);
    assert!((refs.get("O").unwrap() - (-7.45)).abs() < 1e-9);
    assert!(!refs.contains("C"));

    // 跨类型回退给出提示而非警告
    assert!(diags
        .iter()
        .any(|d| d.level == Level::Info && d.message.contains("H2 with type='ads'")));
    assert!(diags.contains("_ref suffix"));
    assert!(diags.contains("CO2 not found"));
    assert_eq!(diags.warnings().count(), 0);
}

#[test]
fn carbon_rows_unresolved_without_co2() {
    let mut records = vec![
        EnergyRecord::new("H2", SpeciesType::Gas, -6.77),
        EnergyRecord::new("H2O", SpeciesType::Gas, -14.22),
        EnergyRecord::new("CH4", SpeciesType::Gas, -24.0),
        EnergyRecord::new("slab", SpeciesType::Slab, -300.0).with_surface("Cu"),
        EnergyRecord::new("OH", SpeciesType::Ads, -310.0).with_surface("Cu"),
    ];
    let mut diags = Diagnostics::new();
    let refs = ReferenceTable::resolve(&records, &mut diags).unwrap();
    let summary = compute_formation_energies(&mut records, &refs, &mut diags);

    assert_eq!(summary.resolved, 4);
    assert!(records[2].formation_energy.is_none());
    let oh = -310.0 + 300.0 - refs.get("O").unwrap() - refs.get("H").unwrap();
    assert!((records[4].formation_energy.unwrap() - oh).abs() < 1e-9);

    let warnings: Vec<_> = diags.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("CH4"));
    assert!(warnings[0].message.contains("[\"C\"]"));
}

#[test]
fn adsorbate_slab_matching_and_fallback() {
    let pivots = sample_records();
    let refs = ReferenceTable::resolve(&pivots, &mut Diagnostics::new()).unwrap();
    let co_refs = refs.get("C").unwrap() + refs.get("O").unwrap();

    let mut records = pivots.clone();
    records.extend([
        EnergyRecord::new("slab", SpeciesType::Slab, -400.0)
            .with_surface("Pt")
            .with_site("111"),
        EnergyRecord::new("slab", SpeciesType::Slab, -300.0).with_surface("Cu"),
        EnergyRecord::new("CO", SpeciesType::Ads, -315.0)
            .with_surface("Cu")
            .with_site("100"),
        EnergyRecord::new("CO", SpeciesType::Ads, -415.0)
            .with_surface("Au")
            .with_site("211"),
    ]);

    let mut diags = Diagnostics::new();
    compute_formation_energies(&mut records, &refs, &mut diags);

    // 位点不匹配时退回同表面 slab
    assert!((records[5].formation_energy.unwrap() - (-315.0 + 300.0 - co_refs)).abs() < 1e-9);
    // 表面也不匹配时取表中第一个 slab
    assert!((records[6].formation_energy.unwrap() - (-415.0 + 400.0 - co_refs)).abs() < 1e-9);
    assert_eq!(diags.warnings().count(), 0);

    // 表中没有任何 slab
    let mut records = pivots;
    records.push(
        EnergyRecord::new("CO", SpeciesType::Ads, -315.0)
            .with_surface("Cu")
            .with_site("211"),
    );
    let mut diags = Diagnostics::new();
    compute_formation_energies(&mut records, &refs, &mut diags);
    assert!(records[3].formation_energy.is_none());
    assert!(diags.contains("slab energy not found for surface Cu, site 211"));
}

#[test]
fn formation_energies_for_table() {
    let mut records = sample_records();
    records.push(
        EnergyRecord::new("slab", SpeciesType::Slab, -300.0)
            .with_surface("Cu")
            .with_site("211"),
    );
    records.push(
        EnergyRecord::new("CO", SpeciesType::Ads, -315.5)
            .with_surface("Cu")
            .with_site("211"),
    );
    records.push(EnergyRecord::new("CO", SpeciesType::Ads, -315.5));

    let mut diags = Diagnostics::new();
    let refs = ReferenceTable::resolve(&records, &mut diags).unwrap();
    let summary = compute_formation_energies(&mut records, &refs, &mut diags);

    assert_eq!(summary.total, 6);
    assert_eq!(summary.resolved, 5);

    // 枢轴物种自身形成能为 0
    for r in &records[..3] {
        assert!(r.formation_energy.unwrap().abs() < 1e-9);
    }
    assert_eq!(records[3].formation_energy, Some(0.0));

    let expected = -315.5 + 300.0 - refs.get("C").unwrap() - refs.get("O").unwrap();
    assert!((records[4].formation_energy.unwrap() - expected).abs() < 1e-9);
    assert!(records[5].formation_energy.is_none());
    assert_eq!(diags.warnings().count(), 1);
}

#[test]
fn formation_is_idempotent() {
    let mut records = sample_records();
    records.push(EnergyRecord::new("CH4", SpeciesType::Gas, -24.0));
    let refs = ReferenceTable::resolve(&records, &mut Diagnostics::new()).unwrap();

    compute_formation_energies(&mut records, &refs, &mut Diagnostics::new());
    let first: Vec<_> = records.iter().map(|r| r.formation_energy).collect();
    compute_formation_energies(&mut records, &refs, &mut Diagnostics::new());
    let second: Vec<_> = records.iter().map(|r| r.formation_energy).collect();

    assert_eq!(first, second);
    assert_eq!(
        formation_energy_for(&records[3], &records, &refs).ok(),
        first[3]
    );
}

#[test]
fn table_round_trip_and_cache() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cu.tsv");
    fs::write(&input, TSV).unwrap();

    let dataset = Dataset::load("cu", &input).unwrap();
    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.summary().resolved, 5);
    assert_eq!(dataset.table().resolved_count(), 5);
    let co = dataset.formation_energy("CO", Some("Cu"), Some("211")).unwrap();

    let out = dir.path().join("cu_formation.tsv");
    write_energy_table(dataset.table(), &out, TableFormat::Tsv).unwrap();
    let reread = read_energy_table(&out).unwrap();
    assert_eq!(reread.len(), 6);
    assert_eq!(reread.records[4].correction_energy, Some(0.1));

    let mut cache = DatasetCache::new(dir.path());
    assert_eq!(cache.available_datasets(), vec!["cu", "cu_formation"]);

    let a = cache.load("cu").unwrap();
    let b = cache.load("cu").unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert!((a.formation_energy("CO", Some("Cu"), Some("211")).unwrap() - co).abs() < 1e-12);

    assert!(cache.invalidate("cu"));
    assert!(!cache.contains("cu"));
    assert!(matches!(
        cache.load("missing"),
        Err(QthermoError::DatasetNotFound { .. })
    ));
}

#[test]
fn dataset_from_empty_table_fails() {
    let table = EnergyTable::new(Vec::new());
    assert!(Dataset::from_table("empty", table).is_err());
}

#[test]
fn heat_capacity_identities() {
    let conditions = ThermoConditions::new(298.15, 101_325.0).unwrap();

    let gas = gas_thermo("CO2", &[2361.1, 1316.3, 649.6, 651.3], &conditions).unwrap();
    assert_eq!(gas.cp.unwrap(), gas.enthalpy.unwrap() - gas.zpe);

    let ads = ads_thermo(&[0.2, 0.15, 0.05], &conditions).unwrap();
    assert_eq!(ads.cv.unwrap(), ads.internal_energy.unwrap() - ads.zpe);
}

#[test]
fn known_gases_use_equilibrium_structures() {
    let conditions = ThermoConditions::default();
    let builtin = gas_thermo("H2", &[4401.0], &conditions).unwrap();

    let h2 = Molecule::new(
        "H2",
        vec![Atom::new("H", [0.0, 0.0, 0.0]), Atom::new("H", [0.0, 0.0, 0.741])],
    );
    let explicit = compute_thermo(
        &VibrationalSpectrum::from_frequencies(&[4401.0]),
        &ThermoModel::IdealGas {
            species: "H2".to_string(),
            params: GasParameters::lookup("H2"),
            molecule: Some(h2),
        },
        &conditions,
    )
    .unwrap();

    assert!((builtin.gibbs.unwrap() - explicit.gibbs.unwrap()).abs() < 1e-12);
    assert!((builtin.ts() - 0.4023).abs() < 5e-4, "TS = {}", builtin.ts());
}

#[test]
fn gas_free_energy_pressure_dependence() {
    let freqs = [2361.1, 1316.3, 649.6, 651.3];
    let t = 298.15;
    let at = |p: f64| {
        gas_thermo("CO2", &freqs, &ThermoConditions::new(t, p).unwrap())
            .unwrap()
            .gibbs
            .unwrap()
    };

    let g_ref = at(1e5);
    assert!((at(1e6) - g_ref - BOLTZMANN_EV * t * 10f64.ln()).abs() < 1e-12);
    assert!((at(101_325.0) - g_ref - BOLTZMANN_EV * t * 1.01325f64.ln()).abs() < 1e-12);
}

#[test]
fn imaginary_modes_are_ignored() {
    let conditions = ThermoConditions::default();
    let clean = ads_thermo(&[0.2, 0.1], &conditions).unwrap();
    let noisy = ads_thermo(&[0.2, 0.1, -0.01], &conditions).unwrap();

    assert!((clean.zpe - noisy.zpe).abs() < 1e-12);
    assert!((clean.entropy - noisy.entropy).abs() < 1e-12);
}

#[test]
fn reaction_and_equilibrium_potential() {
    let conditions = ThermoConditions::default();
    let props = ads_thermo(&[0.1, 0.2], &conditions).unwrap();

    let thermo = HashMap::from([("A".to_string(), props.clone()), ("B".to_string(), props)]);
    let stoichiometry = BTreeMap::from([("A".to_string(), -1.0), ("B".to_string(), 1.0)]);
    let electronic = HashMap::from([("A".to_string(), -10.0), ("B".to_string(), -9.5)]);

    let dg = reaction_free_energy(&thermo, &stoichiometry, &electronic).unwrap();
    assert!((dg - 0.5).abs() < 1e-9);
    assert!((equilibrium_potential(dg, 2).unwrap() - (-0.25)).abs() < 1e-9);
    assert!(equilibrium_potential(dg, 0).is_err());
}
