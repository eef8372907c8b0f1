use aero_design_calculator::aerodynamics::AerodynamicCoefficients;
use aero_design_calculator::airframe::{
    Aircraft, AircraftGeometry, MassProperties, Powerplant, ValidationError, samples,
};
use aero_design_calculator::atmosphere::{AtmosphericConditions, standard_atmosphere};
use aero_design_calculator::feasibility::{Band, Metric};
use aero_design_calculator::performance::{
    ConditionError, DomainError, EnvelopeLimits, FlightConditions, MissionProfile,
    PerformanceAnalyzer,
};

const G: f64 = 9.81;

fn trainer() -> Aircraft {
    samples::general_aviation().expect("general aviation sample")
}

fn trainer_with_cl_max(cl_max: f64) -> Aircraft {
    let base = trainer();
    Aircraft::new(
        "Trainer",
        *base.geometry(),
        *base.mass(),
        AerodynamicCoefficients {
            cl_max,
            ..*base.coefficients()
        },
        *base.powerplant(),
    )
    .expect("valid trainer")
}

#[test]
fn stall_speed_follows_lift_equation() {
    let aircraft = trainer_with_cl_max(1.4);
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let expected = (2.0 * 1157.0 * G / (1.225 * 1.4 * 16.2)).sqrt();
    let vs = analyzer.stall_speed();
    assert!((vs - expected).abs() < 0.02, "V_s = {} vs {}", vs, expected);
    assert!((vs - 28.58).abs() < 0.05, "V_s = {}", vs);

    // ~103 km/h sits just past the 100 km/h boundary.
    let kmh = vs * 3.6;
    assert_eq!(Metric::StallSpeed.band(kmh), Band::Good);
    assert_eq!(Metric::StallSpeed.band(83.0), Band::Excellent);
}

#[test]
fn stall_speed_rises_with_altitude_and_load() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let sea_level = AtmosphericConditions::sea_level();
    let high = standard_atmosphere(5_000.0).expect("5 km");

    let vs = analyzer.stall_speed_at(&sea_level, None, 1.0);
    assert!(analyzer.stall_speed_at(&high, None, 1.0) > vs);
    let turning = analyzer.stall_speed_at(&sea_level, None, 2.0);
    assert!((turning - vs * 2.0_f64.sqrt()).abs() < 1e-9);
    let light = analyzer.stall_speed_at(&sea_level, Some(900.0), 1.0);
    assert!(light < vs);
}

#[test]
fn stall_speed_never_rises_with_wing_area_or_falls_with_weight() {
    let base = trainer();
    let sea_level = AtmosphericConditions::sea_level();

    let sized: Vec<f64> = [12.0, 16.2, 24.0]
        .iter()
        .map(|&area_m2| {
            let aircraft = Aircraft::new(
                "Resized",
                AircraftGeometry {
                    area_m2,
                    ..*base.geometry()
                },
                *base.mass(),
                *base.coefficients(),
                *base.powerplant(),
            )
            .expect("valid wing");
            PerformanceAnalyzer::new(&aircraft).stall_speed()
        })
        .collect();
    for pair in sized.windows(2) {
        assert!(pair[1] <= pair[0], "V_s rose with area: {:?}", sized);
    }

    let analyzer = PerformanceAnalyzer::new(&base);
    let loaded: Vec<f64> = [800.0, 1_000.0, 1_157.0]
        .iter()
        .map(|&kg| analyzer.stall_speed_at(&sea_level, Some(kg), 1.0))
        .collect();
    for pair in loaded.windows(2) {
        assert!(pair[1] >= pair[0], "V_s fell with weight: {:?}", loaded);
    }
}

#[test]
fn zero_wing_area_is_rejected_before_analysis() {
    let base = trainer();
    let geometry = AircraftGeometry {
        area_m2: 0.0,
        ..*base.geometry()
    };
    let err = Aircraft::new(
        "Flat",
        geometry,
        *base.mass(),
        *base.coefficients(),
        *base.powerplant(),
    )
    .expect_err("zero area must fail");
    assert_eq!(err, ValidationError::WingArea(0.0));
}

#[test]
fn mass_budget_is_validated() {
    let base = trainer();
    let over = MassProperties {
        payload_kg: 400.0,
        ..*base.mass()
    };
    let err = Aircraft::new(
        "Heavy",
        *base.geometry(),
        over,
        *base.coefficients(),
        *base.powerplant(),
    )
    .expect_err("overweight must fail");
    assert!(matches!(err, ValidationError::MassBudget { .. }), "{err}");

    let no_thrust = Powerplant {
        static_thrust_n: 0.0,
        ..*base.powerplant()
    };
    assert_eq!(
        Aircraft::new(
            "Glider",
            *base.geometry(),
            *base.mass(),
            *base.coefficients(),
            no_thrust
        ),
        Err(ValidationError::Thrust(0.0))
    );
}

#[test]
fn breguet_range_uses_cruise_condition() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let range = analyzer
        .range(3_000.0, 60.0, 150.0)
        .expect("feasible cruise");

    let atm = standard_atmosphere(3_000.0).expect("3 km");
    let cl = analyzer.required_lift_coefficient(&atm, 60.0, 1157.0, 1.0);
    let cd = aircraft.aerodynamics().drag_coefficient(cl);
    let expected = 60.0 / aircraft.powerplant().tsfc_per_s * (cl / cd) * (1157.0 / 1007.0_f64).ln();
    assert!(
        (range - expected).abs() / expected < 1e-9,
        "range = {} vs {}",
        range,
        expected
    );

    let longer = analyzer.range(3_000.0, 60.0, 200.0).expect("more fuel");
    assert!(longer > range);
}

#[test]
fn breguet_range_rejects_out_of_domain_inputs() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);

    assert!(matches!(
        analyzer.range(10_000.0, 200.0, 1157.0),
        Err(DomainError::FuelFractionOutOfRange { .. })
    ));
    assert!(matches!(
        analyzer.range(10_000.0, 200.0, -1.0),
        Err(DomainError::FuelFractionOutOfRange { .. })
    ));
    assert!(matches!(
        analyzer.range(10_000.0, 20.0, 100.0),
        Err(DomainError::LiftExceedsMaximum { .. })
    ));
    assert!(matches!(
        analyzer.range(10_000.0, 0.0, 100.0),
        Err(DomainError::NonPositiveSpeed(_))
    ));
    assert!(matches!(
        analyzer.range(60_000.0, 200.0, 100.0),
        Err(DomainError::Atmosphere(_))
    ));
}

#[test]
fn endurance_and_fuel_for_range() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let ld = aircraft.aerodynamics().max_lift_drag_ratio();
    let tsfc = aircraft.powerplant().tsfc_per_s;

    let endurance = analyzer.endurance(3_000.0, 200.0).expect("endurance");
    let expected = ld / tsfc * (1157.0 / 957.0_f64).ln();
    assert!((endurance - expected).abs() < 1e-6);

    // Fuel for the range flown at max L/D inverts the Breguet relation.
    let range_m = 500_000.0;
    let fuel = analyzer.fuel_for_range(range_m, 60.0).expect("fuel");
    let back = 60.0 / tsfc * ld * (1157.0 / (1157.0 - fuel)).ln();
    assert!((back - range_m).abs() < 1e-3, "range back = {}", back);
    assert_eq!(analyzer.fuel_for_range(0.0, 60.0).expect("zero"), 0.0);
}

#[test]
fn takeoff_distance_formula_and_obstacle_segment() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let thrust = aircraft.powerplant().static_thrust_n;
    let w = 1157.0 * G;
    let expected = 1.44 * w * w / (1.225 * G * 1.6 * 16.2 * thrust);

    let roll = analyzer.takeoff_distance(thrust).expect("takeoff");
    assert!(
        (roll - expected).abs() / expected < 1e-3,
        "roll = {} vs {}",
        roll,
        expected
    );

    let takeoff = analyzer
        .takeoff_performance(thrust, 600.0)
        .expect("takeoff performance");
    assert!((takeoff.obstacle_distance_m - 15.24 / 0.06).abs() < 1e-9);
    assert!((takeoff.total_distance_m - roll - takeoff.obstacle_distance_m).abs() < 1e-9);
    assert!(takeoff.runway_adequate);
    assert!((takeoff.liftoff_speed_m_s - 1.2 * takeoff.stall_speed_m_s).abs() < 1e-12);

    assert!(
        !analyzer
            .takeoff_performance(thrust, 300.0)
            .expect("takeoff")
            .runway_adequate
    );
    assert_eq!(
        analyzer.takeoff_distance(0.0),
        Err(DomainError::NonPositiveThrust(0.0))
    );
}

#[test]
fn climb_rate_drops_with_load_factor() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let thrust = aircraft.powerplant().static_thrust_n;
    let sea_level = AtmosphericConditions::sea_level();
    let speed = 40.0;

    let level = FlightConditions::level(sea_level, speed, 5.0).expect("level");
    let turn = FlightConditions::level_turn(sea_level, speed, 5.0, 60.0).expect("turn");
    assert!((turn.load_factor() - 2.0).abs() < 1e-9);

    let rc_level = analyzer.rate_of_climb(thrust, &level);
    let rc_turn = analyzer.rate_of_climb(thrust, &turn);
    assert!(rc_level > 0.0, "rc = {}", rc_level);
    assert!(rc_turn < rc_level);

    let at_climb_speed = analyzer.sea_level_climb_rate(1.3).expect("climb");
    assert!(at_climb_speed > 0.0 && at_climb_speed < 20.0);
}

#[test]
fn flight_conditions_validate_and_derive() {
    let atm = standard_atmosphere(10_000.0).expect("10 km");
    let fc = FlightConditions::level(atm, 200.0, 2.0).expect("cruise");
    assert!((fc.mach() - 200.0 / atm.speed_of_sound_m_s).abs() < 1e-12);
    assert!((fc.dynamic_pressure_pa() - 0.5 * atm.density_kg_m3 * 40_000.0).abs() < 1e-9);
    assert!((fc.equivalent_airspeed_m_s() - 200.0 * atm.density_ratio().sqrt()).abs() < 1e-3);
    assert!(fc.reynolds_number(1.5) > 1e6);

    assert_eq!(
        FlightConditions::level(atm, 0.0, 2.0),
        Err(ConditionError::Airspeed(0.0))
    );
    assert_eq!(
        FlightConditions::level_turn(atm, 100.0, 2.0, 90.0),
        Err(ConditionError::BankAngle(90.0))
    );
    assert_eq!(
        FlightConditions::new(atm, 100.0, 2.0, 0.0, -1.0),
        Err(ConditionError::LoadFactor(-1.0))
    );
}

#[test]
fn climb_profile_reports_ceiling() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let profile = analyzer
        .climb_profile(0.0, 8_000.0, 1157.0, 2_700.0)
        .expect("profile");

    assert_eq!(profile.samples.len(), 50);
    assert_eq!(profile.samples[0].altitude_m, 0.0);
    assert!((profile.samples[49].altitude_m - 8_000.0).abs() < 1e-9);
    assert!(profile.samples.iter().all(|s| s.climb_rate_m_s >= 0.0));
    assert!(profile.samples[0].climb_rate_m_s > 0.508);
    assert!(profile.service_ceiling_m > 0.0 && profile.service_ceiling_m <= 8_000.0);

    assert!(matches!(
        analyzer.climb_profile(5_000.0, 1_000.0, 1157.0, 2_700.0),
        Err(DomainError::AltitudeRange { .. })
    ));
    for weight_kg in [0.0, -50.0, f64::NAN] {
        assert!(matches!(
            analyzer.climb_profile(0.0, 8_000.0, weight_kg, 2_700.0),
            Err(DomainError::NonPositiveWeight(_))
        ));
    }
}

#[test]
fn empirical_service_ceiling_from_wing_loading() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let wl = analyzer.wing_loading();
    assert!((wl - 1157.0 * G / 16.2).abs() < 1e-9);
    assert!((analyzer.service_ceiling() - (4_000.0 + (1_000.0 - wl) * 10.0)).abs() < 1e-9);

    let airliner = samples::airliner().expect("airliner");
    let heavy = PerformanceAnalyzer::new(&airliner);
    let wl = heavy.wing_loading();
    assert!(wl > 1_000.0);
    assert!((heavy.service_ceiling() - (4_000.0 + (5_000.0 - wl) * 2.0)).abs() < 1e-9);
}

#[test]
fn analyze_bundles_consistent_metrics() {
    for aircraft in samples::all().expect("samples") {
        let analyzer = PerformanceAnalyzer::new(&aircraft);
        let metrics = analyzer
            .analyze(&MissionProfile::default())
            .unwrap_or_else(|e| panic!("{}: {}", aircraft.name(), e));

        assert!(metrics.range_m > 0.0, "{}", aircraft.name());
        assert!(metrics.endurance_s > 0.0);
        assert!(metrics.takeoff_distance_m > 0.0);
        assert!((metrics.stall_speed_m_s - analyzer.stall_speed()).abs() < 1e-12);
        assert!(
            (metrics.max_lift_drag - aircraft.aerodynamics().max_lift_drag_ratio()).abs() < 1e-3
        );
        assert_eq!(metrics.design.name, aircraft.name());
        assert_eq!(metrics.design.wing_area_m2, aircraft.geometry().area_m2);
    }
}

#[test]
fn design_summary_carries_the_mass_budget() {
    let aircraft = trainer();
    let design = PerformanceAnalyzer::new(&aircraft)
        .analyze(&MissionProfile::default())
        .expect("metrics")
        .design;

    assert!((design.fuel_fraction - 200.0 / 1157.0).abs() < 1e-12);
    assert!((design.payload_fraction - 197.0 / 1157.0).abs() < 1e-12);
    assert!((design.empty_fraction - 760.0 / 1157.0).abs() < 1e-12);
    assert!((design.max_landing_kg - 0.85 * 1157.0).abs() < 1e-9);
    assert!(design.empty_fraction + design.payload_fraction + design.fuel_fraction <= 1.0);
}

#[test]
fn envelope_walks_the_vn_boundary() {
    let aircraft = trainer();
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let envelope = analyzer.flight_envelope();
    let vs = analyzer.stall_speed();
    let va = vs * 2.5_f64.sqrt();

    assert_eq!(envelope.len(), 55);
    assert!((envelope.maneuvering_speed_m_s() - va).abs() < 1e-9);
    assert!((envelope.dive_speed_m_s() - 1.4 * va).abs() < 1e-9);

    let points: Vec<_> = envelope.clone().collect();
    assert_eq!(points.len(), 55);
    assert!((points[0].speed_m_s - vs).abs() < 1e-12);
    assert!((points[0].load_factor - 1.0).abs() < 1e-12);
    assert!((points[50].speed_m_s - va).abs() < 1e-9);
    assert_eq!(points[50].load_factor, 2.5);
    assert_eq!(points[52].load_factor, -1.0);
    assert!((points[53].speed_m_s - vs).abs() < 1e-9);
    assert_eq!(points[54].speed_m_s, 0.0);
    assert_eq!(points[54].load_factor, 0.0);
    assert!(
        points
            .iter()
            .all(|p| (-1.0..=2.5).contains(&p.load_factor))
    );

    // Positive stall curve is monotone in speed and load.
    for pair in points[..50].windows(2) {
        assert!(pair[1].speed_m_s >= pair[0].speed_m_s);
        assert!(pair[1].load_factor >= pair[0].load_factor);
    }

    // Restarting reproduces the same sequence.
    let mut partial = envelope.clone();
    partial.next();
    partial.next();
    let again: Vec<_> = partial.restart().collect();
    assert_eq!(again, points);
}

#[test]
fn envelope_at_altitude_with_custom_limits() {
    let aircraft = samples::fighter().expect("fighter");
    let analyzer = PerformanceAnalyzer::new(&aircraft);
    let limits = EnvelopeLimits {
        positive_load_factor: 9.0,
        negative_load_factor: -3.0,
        curve_samples: 20,
        ..EnvelopeLimits::default()
    };
    let envelope = analyzer
        .flight_envelope_with(limits, 5_000.0, Some(15_000.0))
        .expect("envelope");
    assert_eq!(envelope.len(), 25);
    assert!(envelope.stall_speed_m_s() > 0.0);
    assert!((envelope.maneuvering_speed_m_s() - 3.0 * envelope.stall_speed_m_s()).abs() < 1e-9);
    let max_n = envelope
        .clone()
        .map(|p| p.load_factor)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(max_n, 9.0);

    assert!(
        analyzer
            .flight_envelope_with(limits, -10.0, None)
            .is_err()
    );
}
