use aero_design_calculator::airframe::samples;
use aero_design_calculator::core::units::kmh_to_ms;
use aero_design_calculator::feasibility::{Band, FeasibilityScorer, Metric};
use aero_design_calculator::performance::{MissionProfile, PerformanceAnalyzer, PerformanceMetrics};

fn trainer_metrics() -> PerformanceMetrics {
    let aircraft = samples::general_aviation().expect("sample");
    PerformanceAnalyzer::new(&aircraft)
        .analyze(&MissionProfile::default())
        .expect("analysis")
}

fn ideal_metrics() -> PerformanceMetrics {
    let mut m = trainer_metrics();
    m.stall_speed_m_s = 20.0;
    m.max_lift_drag = 18.0;
    m.takeoff_distance_m = 200.0;
    m.wing_loading_pa = 1_000.0;
    m.service_ceiling_m = 13_000.0;
    m
}

#[test]
fn weights_sum_to_one() {
    let total: f64 = Metric::ALL.iter().map(|m| m.weight()).sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn band_boundaries_fall_into_the_worse_band() {
    assert_eq!(Metric::StallSpeed.band(99.999), Band::Excellent);
    assert_eq!(Metric::StallSpeed.band(100.0), Band::Good);
    assert_eq!(Metric::StallSpeed.band(300.0), Band::Critical);
    assert_eq!(Metric::LiftToDrag.band(15.0), Band::Good);
    assert_eq!(Metric::LiftToDrag.band(15.01), Band::Excellent);
    assert_eq!(Metric::LiftToDrag.band(4.0), Band::Critical);
    assert_eq!(Metric::TakeoffDistance.band(800.0), Band::Acceptable);
    assert_eq!(Metric::WingLoading.band(4_000.0), Band::Marginal);
    assert_eq!(Metric::ServiceCeiling.band(8.0), Band::Acceptable);
    assert_eq!(Metric::ServiceCeiling.band(0.5), Band::Critical);
}

#[test]
fn non_finite_values_are_critical() {
    for metric in Metric::ALL {
        assert_eq!(metric.band(f64::NAN), Band::Critical, "{:?}", metric);
        assert_eq!(metric.band(f64::INFINITY), Band::Critical, "{:?}", metric);
    }

    let mut m = trainer_metrics();
    m.max_lift_drag = f64::NAN;
    let report = FeasibilityScorer::new().score(&m);
    let ld = report.assessment(Metric::LiftToDrag).expect("L/D line");
    assert_eq!(ld.band, Band::Critical);
    assert_eq!(ld.score, 5.0);
}

#[test]
fn overall_band_thresholds_and_verdicts() {
    assert_eq!(Band::for_overall_score(90.0), Band::Excellent);
    assert_eq!(Band::for_overall_score(89.99), Band::Good);
    assert_eq!(Band::for_overall_score(50.0), Band::Acceptable);
    assert_eq!(Band::for_overall_score(30.0), Band::Marginal);
    assert_eq!(Band::for_overall_score(10.0), Band::Poor);
    assert_eq!(Band::for_overall_score(9.9), Band::Critical);
    assert_eq!(Band::Excellent.verdict(), "Highly Flyable");
    assert_eq!(Band::Critical.verdict(), "Unlikely to Fly");
}

#[test]
fn ideal_design_scores_full_marks() {
    let report = FeasibilityScorer::new().score(&ideal_metrics());
    assert!((report.score - 100.0).abs() < 1e-9, "score = {}", report.score);
    assert_eq!(report.overall, Band::Excellent);
    assert_eq!(report.verdict, "Highly Flyable");
    assert!(report.suggestions.is_empty());
    assert!(!report.has_red_flags());
    assert_eq!(report.metrics.len(), 5);
}

#[test]
fn score_is_weighted_sum_of_sub_scores() {
    let mut m = ideal_metrics();
    // 120 km/h stall (Good) and 1 000 m takeoff (Acceptable).
    m.stall_speed_m_s = kmh_to_ms(120.0);
    m.takeoff_distance_m = 1_000.0;
    let report = FeasibilityScorer::new().score(&m);
    let expected = 0.30 * 85.0 + 0.25 * 100.0 + 0.20 * 70.0 + 0.15 * 100.0 + 0.10 * 100.0;
    assert!((report.score - expected).abs() < 1e-9);
    assert_eq!(report.overall, Band::Good);
    assert_eq!(
        report.assessment(Metric::StallSpeed).map(|a| a.band),
        Some(Band::Good)
    );
}

#[test]
fn struggling_design_gets_suggestions_for_weak_metrics() {
    let mut m = ideal_metrics();
    m.stall_speed_m_s = kmh_to_ms(260.0);
    m.max_lift_drag = 7.0;
    m.takeoff_distance_m = 3_000.0;
    m.wing_loading_pa = 5_000.0;
    let report = FeasibilityScorer::new().score(&m);
    let expected = 0.30 * 25.0 + 0.25 * 50.0 + 0.20 * 25.0 + 0.15 * 50.0 + 0.10 * 100.0;
    assert!((report.score - expected).abs() < 1e-9, "score = {}", report.score);
    assert_eq!(report.overall, Band::Marginal);

    assert_eq!(report.suggestions.len(), 4, "{:?}", report.suggestions);
    assert!(report.suggestions[0].starts_with("To reduce stall speed"));
    assert!(report.suggestions[1].starts_with("To improve L/D ratio"));
    assert!(report.suggestions[2].starts_with("To reduce takeoff distance"));
    assert!(report.suggestions[3].starts_with("To reduce wing loading"));
}

#[test]
fn good_overall_design_gets_no_suggestions() {
    let mut m = ideal_metrics();
    m.takeoff_distance_m = 3_000.0;
    m.wing_loading_pa = 5_000.0;
    let report = FeasibilityScorer::new().score(&m);
    assert_eq!(report.overall, Band::Good);
    assert_eq!(
        report.assessment(Metric::TakeoffDistance).map(|a| a.band),
        Some(Band::Poor)
    );
    assert_eq!(
        report.assessment(Metric::WingLoading).map(|a| a.band),
        Some(Band::Marginal)
    );
    assert!(report.suggestions.is_empty(), "{:?}", report.suggestions);
}

#[test]
fn red_flags_are_independent_of_score() {
    let mut m = ideal_metrics();
    m.takeoff_distance_m = 4_500.0;
    m.design.wing_area_m2 = 0.0;
    m.design.fuel_fraction = 0.95;
    let report = FeasibilityScorer::new().score(&m);
    assert_eq!(report.red_flags.len(), 3, "{:?}", report.red_flags);
    assert!(report.red_flags.iter().any(|f| f.contains("wing area")));
    assert!(report.red_flags.iter().any(|f| f.contains("takeoff distance")));
    assert!(report.red_flags.iter().any(|f| f.contains("fuel fraction")));
}

#[test]
fn trade_off_notes_follow_the_configuration() {
    let report = FeasibilityScorer::new().score(&trainer_metrics());
    assert_eq!(report.trade_offs.len(), 4, "{:?}", report.trade_offs);

    let mut m = trainer_metrics();
    m.design.aspect_ratio = 10.0;
    let report = FeasibilityScorer::new().score(&m);
    assert!(
        report
            .trade_offs
            .iter()
            .any(|t| t.starts_with("High aspect ratio"))
    );
}

#[test]
fn scoring_is_deterministic() {
    let scorer = FeasibilityScorer::new();
    let m = trainer_metrics();
    assert_eq!(scorer.score(&m), scorer.score(&m));
}

#[test]
fn reference_aircraft_are_scored() {
    for aircraft in samples::all().expect("samples") {
        let metrics = PerformanceAnalyzer::new(&aircraft)
            .analyze(&MissionProfile::default())
            .expect("analysis");
        let report = FeasibilityScorer::new().score(&metrics);
        assert!(
            (0.0..=100.0).contains(&report.score),
            "{}: {}",
            aircraft.name(),
            report.score
        );
        assert!(
            report.overall <= Band::Marginal,
            "{} scored {} ({})",
            aircraft.name(),
            report.score,
            report.verdict
        );
        assert_eq!(report.verdict, report.overall.verdict());
    }

    let report = FeasibilityScorer::new().score(&trainer_metrics());
    assert_eq!(report.overall, Band::Excellent, "score = {}", report.score);
}
