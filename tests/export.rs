use std::fs;

use aero_design_calculator::airframe::samples;
use aero_design_calculator::export::{envelope, feasibility, history, open_artifact, report};
use aero_design_calculator::feasibility::{Band, FeasibilityScorer};
use aero_design_calculator::optimizer::{
    Constraint, DesignOptimizer, DesignVariable, Objective, SearchSettings,
};
use aero_design_calculator::performance::{MissionProfile, PerformanceAnalyzer};
use aero_design_calculator::assess;

#[test]
fn envelope_csv_round_trips_through_csv_reader() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/vn.csv");
    let aircraft = samples::general_aviation().expect("sample");
    let envelope = PerformanceAnalyzer::new(&aircraft).flight_envelope();
    let va = envelope.maneuvering_speed_m_s();

    let mut writer = open_artifact(&path).expect("writer");
    let written = envelope::write_all(&mut writer, envelope.restart()).expect("write");
    drop(writer);
    assert_eq!(written, 55);

    let mut reader = csv::Reader::from_path(&path).expect("csv reader");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["index", "speed_m_s", "speed_kmh", "load_factor"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 55);

    let field = |row: &csv::StringRecord, i: usize| -> f64 {
        row.get(i).expect("field").parse().expect("number")
    };
    assert_eq!(&rows[0][0], "0");
    assert!((field(&rows[0], 1) - envelope.stall_speed_m_s()).abs() < 1e-3);
    assert!((field(&rows[0], 3) - 1.0).abs() < 1e-3);
    assert!((field(&rows[49], 1) - va).abs() < 1e-3);
    assert!((field(&rows[49], 2) - va * 3.6).abs() < 1e-3);
    assert!((field(&rows[49], 3) - 2.5).abs() < 1e-3);
    assert_eq!(field(&rows[54], 1), 0.0);
}

#[test]
fn optimizer_history_and_summary_are_exported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = samples::general_aviation().expect("sample");
    let mut optimizer = DesignOptimizer::with_settings(SearchSettings {
        max_iterations: 10,
        ..SearchSettings::default()
    });
    optimizer
        .add_objective(Objective::MaximizeLiftToDrag, 1.0)
        .expect("objective");
    optimizer.add_constraint(Constraint::max_stall_speed(30.0));
    optimizer
        .set_design_variables([(DesignVariable::WingArea, (12.0, 25.0))])
        .expect("bounds");
    let result = optimizer.optimize(&base).expect("optimize");

    let history_path = dir.path().join("history.csv");
    let mut writer = open_artifact(&history_path).expect("writer");
    history::write_all(&mut writer, &result.history).expect("history");
    drop(writer);

    let mut reader = csv::Reader::from_path(&history_path).expect("csv reader");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), result.history.len());
    let last = rows.last().expect("at least one generation");
    assert_eq!(
        last[1].parse::<usize>().expect("evaluations"),
        result.evaluations
    );

    let summary_path = dir.path().join("summary.json");
    report::write_json(&summary_path, &result.summary()).expect("json");
    let text = fs::read_to_string(&summary_path).expect("read json");
    assert!(text.ends_with('\n'));
    let json: serde_json::Value = serde_json::from_str(&text).expect("parse json");
    assert_eq!(json["aircraft"], "General Aviation_optimized");
    assert_eq!(json["backend"], "differential_evolution");
    assert_eq!(json["design_variables"][0]["name"], "wing_area");
    assert_eq!(
        json["constraints"][0]["satisfied"],
        serde_json::Value::Bool(result.constraints[0].satisfied)
    );
    assert_eq!(json["evaluations"], result.evaluations);
}

#[test]
fn assessment_report_serializes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("assessment.json");
    let aircraft = samples::fighter().expect("sample");
    let assessment = assess(&aircraft, &MissionProfile::default()).expect("assessment");
    report::write_json(&path, &assessment).expect("json");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    let score = json["feasibility"]["score"].as_f64().expect("score");
    assert!((score - assessment.feasibility.score).abs() < 1e-9);
    assert_eq!(
        json["feasibility"]["metrics"].as_array().map(Vec::len),
        Some(5)
    );
    assert!(json["metrics"]["stall_speed_m_s"].as_f64().expect("stall") > 0.0);
}

#[test]
fn feasibility_table_labels_each_band() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reports/feasibility.csv");
    let aircraft = samples::general_aviation().expect("sample");
    let metrics = PerformanceAnalyzer::new(&aircraft)
        .analyze(&MissionProfile::default())
        .expect("metrics");
    let scored = FeasibilityScorer::new().score(&metrics);

    let mut writer = open_artifact(&path).expect("writer");
    feasibility::write_all(&mut writer, &scored).expect("write");
    drop(writer);

    let mut reader = csv::Reader::from_path(&path).expect("csv reader");
    assert_eq!(
        reader.headers().expect("headers").iter().collect::<Vec<_>>(),
        ["metric", "value", "unit", "band", "score", "weight"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 6);
    for (row, line) in rows.iter().zip(&scored.metrics) {
        assert_eq!(&row[0], line.metric.name());
        assert_eq!(&row[2], line.unit);
        assert_eq!(&row[3], line.band.label());
        assert_eq!(row[4].parse::<f64>().expect("score"), line.band.score());
    }
    assert_eq!(&rows[1][0], "L/D Ratio");
    assert_eq!(&rows[1][2], "");

    let overall = &rows[5];
    assert_eq!(&overall[0], "Overall");
    assert_eq!(&overall[3], scored.overall.label());
    let score: f64 = overall[1].parse().expect("overall score");
    assert!((score - scored.score).abs() < 1e-4);
    assert!(Band::ALL.iter().any(|b| b.label() == &overall[3]));
}
