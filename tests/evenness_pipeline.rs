//! Integration tests for the Pareto-Lorenz evenness pipeline.

use approx::assert_relative_eq;
use pl_curve::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write_input(path: &Path, lines: &[&str]) {
    let mut file = std::fs::File::create(path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

#[test]
fn test_run() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("test-input.tsv");
    let graph = dir.path().join("test.png");
    let output = dir.path().join("test.tsv");
    write_input(
        &input,
        &["Bin\tStep I\tStep II", "219\t0.5\t0.3", "218\t0.5\t0.7"],
    );

    let result = Pipeline::new().run_files(&input, &graph, &output).unwrap();
    assert!(graph.is_file());
    assert!(output.is_file());
    assert!(result.curves.iter().all(|c| c.len() == 2));

    let report = SummaryReport::from_tsv(&output).unwrap();
    let names: Vec<&str> = report.iter().map(|r| r.sample.as_str()).collect();
    assert_eq!(names, vec!["Step I", "Step II"]);

    let step_i = report.get("Step I").unwrap();
    assert_eq!(step_i.gini, 0.0);
    assert_eq!(step_i.corrected_gini, 0.0);
    assert_eq!(step_i.n, 2);

    let step_ii = report.get("Step II").unwrap();
    assert_relative_eq!(step_ii.gini, 0.2, epsilon = 1e-12);
    assert_relative_eq!(step_ii.corrected_gini, 0.4, epsilon = 1e-12);
    assert_eq!(step_ii.n, 2);
}

#[test]
fn test_report_roundtrip_matches_in_memory_results() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.tsv");
    let output = dir.path().join("out.tsv");
    write_input(
        &input,
        &[
            "Bin\tA\tB\tC",
            "301\t0.40\t0.10\t0.25",
            "302\t0.00\t0.00\t0.00",
            "303\t0.35\t0.60\t0.25",
            "304\t0.25\t0.30\t0.50",
        ],
    );

    let result = Pipeline::new()
        .run_files(&input, dir.path().join("g.png"), &output)
        .unwrap();
    assert_eq!(result.removed_bins, vec!["302".to_string()]);

    let loaded = SummaryReport::from_tsv(&output).unwrap();
    assert_eq!(loaded.len(), result.report.len());
    for (a, b) in loaded.iter().zip(result.report.iter()) {
        assert_eq!(a.sample, b.sample);
        assert_eq!(a.n, b.n);
        assert_relative_eq!(a.gini, b.gini, epsilon = 1e-15);
        assert_relative_eq!(a.corrected_gini, b.corrected_gini, epsilon = 1e-15);
    }
}

#[test]
fn test_validation_failure_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.tsv");
    let graph = dir.path().join("graph.png");
    let output = dir.path().join("out.tsv");
    write_input(&input, &["Bin\tStep I", "219\t0.1", "218\t0.8"]);

    let err = Pipeline::new().run_files(&input, &graph, &output).unwrap_err();
    assert!(matches!(err, PlCurveError::ColumnSum { .. }));
    assert!(err.to_string().contains("columns don't sum to 1"));
    assert!(!graph.exists());
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Pipeline::new()
        .run_files(
            dir.path().join("missing.tsv"),
            dir.path().join("g.png"),
            dir.path().join("o.tsv"),
        )
        .unwrap_err();
    assert!(matches!(err, PlCurveError::Csv(_) | PlCurveError::Io(_)));
}

#[test]
fn test_curves_are_monotone_and_truncated() {
    let table = AbundanceTable::from_columns(
        (1..=6).map(|i| format!("bin{}", i)).collect(),
        vec![
            ("even".into(), vec![1.0 / 6.0; 6]),
            ("skewed".into(), vec![0.6, 0.4, 0.00002, 0.0, 0.0, 0.0]),
            ("sparse".into(), vec![0.0, 0.0, 0.99995, 0.0, 0.0, 0.0]),
        ],
    )
    .unwrap();

    let output = Pipeline::new().run(&table).unwrap();
    for curve in &output.curves {
        let cum = curve.cumulative_abundances();
        assert!(cum.windows(2).all(|w| w[0] <= w[1]), "{} not monotone", curve.name());
        assert!(*cum.last().unwrap() <= 1.0 + SUM_TOLERANCE);
        assert_eq!(curve.total_bins(), 6);
    }

    // reaches full abundance at its second bin
    let skewed = &output.curves[1];
    assert_eq!(skewed.len(), 2);
    assert_relative_eq!(skewed.cumulative_proportions()[1], 2.0 / 6.0);

    // never exceeds the threshold, so every bin is kept
    let sparse = &output.curves[2];
    assert_eq!(sparse.len(), 6);

    let even = output.report.get("even").unwrap();
    assert_relative_eq!(even.gini, 0.0, epsilon = 1e-12);

    let sparse = output.report.get("sparse").unwrap();
    assert_eq!(sparse.n, 6);
    assert_relative_eq!(sparse.gini, 5.0 / 6.0, epsilon = 1e-12);
}

#[test]
fn test_custom_key_column_and_curve_export() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let curves_path = dir.path().join("curves.tsv");
    write_input(&input, &["Fragment,Day 1", "88,0.7", "91,0.3"]);

    let pipeline = Pipeline::new().key_column("Fragment").delimiter(',');
    pipeline
        .run_files_with_curves(
            &input,
            dir.path().join("g.svg"),
            dir.path().join("o.tsv"),
            Some(curves_path.as_path()),
        )
        .unwrap();

    let contents = std::fs::read_to_string(&curves_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Day 1\t88\t0.7\t0.7\t0.5"));
    assert!(lines[2].starts_with("Day 1\t91\t0.3\t"));
    assert!(lines[2].ends_with("\t1"));
}

#[test]
fn test_unwritable_output_leaves_no_graph() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.tsv");
    let graph = dir.path().join("graph.png");
    let output = dir.path().join("no_such_dir").join("out.tsv");
    write_input(&input, &["Bin\tStep I", "219\t0.5", "218\t0.5"]);

    let err = Pipeline::new().run_files(&input, &graph, &output).unwrap_err();
    assert!(matches!(err, PlCurveError::Csv(_) | PlCurveError::Io(_)));
    assert!(!graph.exists());
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_removes_curve_export() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.tsv");
    let curves = dir.path().join("curves.tsv");
    let graph = dir.path().join("graph.svg");
    let output = dir.path().join("no_such_dir").join("out.tsv");
    write_input(&input, &["Bin\tStep I", "219\t0.5", "218\t0.5"]);

    let result = Pipeline::new().run_files_with_curves(&input, &graph, &output, Some(curves.as_path()));
    assert!(result.is_err());
    assert!(!curves.exists());
    assert!(!graph.exists());
}

#[test]
fn test_unwritable_curve_export_writes_nothing_else() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.tsv");
    let curves = dir.path().join("no_such_dir").join("curves.tsv");
    let graph = dir.path().join("graph.png");
    let output = dir.path().join("out.tsv");
    write_input(&input, &["Bin\tStep I", "219\t0.5", "218\t0.5"]);

    let result = Pipeline::new().run_files_with_curves(&input, &graph, &output, Some(curves.as_path()));
    assert!(result.is_err());
    assert!(!graph.exists());
    assert!(!output.exists());
}
