use std::fmt::Write as _;

use tensile_metrics::{
    load_file, AnalysisConfig, AnalysisError, Axis, ColumnMap, Config, IngestError, Metric,
    MetricOutcome, ReaderConfig, Specimen, SpecimenDirectory, SpecimenReport,
};

/// Four header lines then `load,displacement,stress,time,extension,strain`
/// rows for a curve rising with slope 10 up to displacement 1, flat after.
fn bilinear_file(delimiter: char) -> String {
    let mut text = String::from("Specimen 100-001\nArea,20\nRate,1\nLoad,Disp,Stress,Time,Ext,Strain\n");
    for i in 0..=300 {
        let d = i as f64 / 100.0;
        let load = 10.0 * d.min(1.0);
        let stress = load / 20.0;
        let strain = d / 50.0;
        let cells = [load, d, stress, i as f64, strain, strain].map(|v| v.to_string());
        writeln!(text, "{}", cells.join(delimiter.to_string().as_str())).unwrap();
    }
    text
}

#[test]
fn test_csv_file_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("100-001.Dat");
    std::fs::write(&path, bilinear_file(',')).unwrap();

    let config = Config::default();
    let record = load_file(&path, &config.reader).unwrap();
    assert_eq!(record.name(), "100-001");
    assert_eq!(record.len(), 301);
    assert!(record.issues().is_empty());

    let analysis = AnalysisConfig {
        modulus_lower_bound: 0.25,
        ..config.analysis
    };
    let specimen = Specimen::new(record, analysis);
    let report = SpecimenReport::from_specimen(&specimen);

    assert_eq!(report.peak, MetricOutcome::Computed(10.0));
    let modulus = report.modulus.ok().unwrap();
    assert!((modulus.slope - 10.0).abs() < 1e-9);
    assert!((modulus.lower.x - 0.25).abs() < 1e-9);
    assert!((modulus.upper.x - 0.75).abs() < 1e-9);

    let yield_point = report.yield_point.ok().unwrap();
    assert!((yield_point.x - 1.2).abs() < 1e-9, "{yield_point:?}");
    assert!((yield_point.y - 10.0).abs() < 1e-9, "{yield_point:?}");
}

#[test]
fn test_tab_file_stress_strain() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("100-002.txt"), bilinear_file('\t')).unwrap();

    let config = Config::from_json(
        r#"{
            "reader": { "delimiter": "\t" },
            "analysis": { "x_axis": "Strain", "y_axis": "Stress",
                          "modulus_lower_bound": 0.25, "yield_offset": 0.004 }
        }"#,
    )
    .unwrap();

    let specimens = SpecimenDirectory::open(dir.path()).unwrap();
    let record = specimens.load("100-002", ".txt", &config.reader).unwrap();
    let specimen = Specimen::new(record, config.analysis);

    // stress = 0.5 * min(d, 1), strain = d / 50 => modulus 25
    assert_eq!(specimen.peak().unwrap(), 0.5);
    let modulus = specimen.modulus().unwrap();
    assert!((modulus.slope - 25.0).abs() < 1e-6, "{modulus:?}");

    // 25 * (strain - 0.004) = 0.5  =>  strain = 0.024
    let yield_point = specimen.yield_point().unwrap();
    assert!((yield_point.x - 0.024).abs() < 1e-6, "{yield_point:?}");
    assert!((yield_point.y - 0.5).abs() < 1e-6, "{yield_point:?}");
}

#[test]
fn test_bad_cells_surface_as_incomplete_curve() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    let mut text = bilinear_file(',');
    text.push_str("n/a,3.01,0.5,301,0.06,0.06\n");
    std::fs::write(&path, text).unwrap();

    let record = load_file(&path, &ReaderConfig::default()).unwrap();
    assert_eq!(record.issues().len(), 1);
    assert_eq!(record.issues()[0].row, 301);

    let specimen = Specimen::new(record, AnalysisConfig::default());
    let err = specimen.peak().unwrap_err();
    assert_eq!(err.specimen, "broken");
    assert_eq!(err.metric, Metric::Peak);
    assert!(matches!(err.source, AnalysisError::IncompleteCurve { row: 301, .. }));

    // load is not on either axis here, so the curve is complete
    let config = AnalysisConfig {
        x_axis: Axis::Strain,
        y_axis: Axis::Stress,
        ..Default::default()
    };
    let record = load_file(&path, &ReaderConfig::default()).unwrap();
    let specimen = Specimen::new(record, config);
    assert_eq!(specimen.peak().unwrap(), 0.5);
}

#[test]
fn test_ragged_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.csv");
    let mut text = bilinear_file(',');
    text.push_str("1,2,3\n");
    std::fs::write(&path, text).unwrap();

    let err = load_file(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IngestError::RowShape { expected: 6, found: 3, .. }));
}

#[test]
fn test_time_column_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timed.csv");
    std::fs::write(&path, bilinear_file(',')).unwrap();

    let reader = ReaderConfig {
        columns: ColumnMap {
            time: Some(3),
            ..ColumnMap::default()
        },
        ..ReaderConfig::default()
    };
    let record = load_file(&path, &reader).unwrap();
    assert_eq!(record.samples()[7].time, Some(7.0));

    let record = load_file(&path, &ReaderConfig::default()).unwrap();
    assert_eq!(record.samples()[7].time, None);
}
