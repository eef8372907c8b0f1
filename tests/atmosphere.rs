use aero_design_calculator::atmosphere::{
    AtmosphereError, AtmosphericConditions, MAX_ALTITUDE_M, standard_atmosphere,
};

fn relative_gap(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.abs().max(b.abs())
}

#[test]
fn sea_level_matches_isa_reference() {
    let sl = standard_atmosphere(0.0).expect("sea level");
    assert!((sl.temperature_k - 288.15).abs() < 1e-9);
    assert!((sl.pressure_pa - 101_325.0).abs() < 1e-6);
    assert!(
        (sl.density_kg_m3 - 1.225).abs() < 1e-3,
        "rho = {}",
        sl.density_kg_m3
    );
    assert!(
        (sl.speed_of_sound_m_s - 340.29).abs() < 0.05,
        "a = {}",
        sl.speed_of_sound_m_s
    );
    assert_eq!(sl, AtmosphericConditions::sea_level());
    assert!((sl.density_ratio() - 1.0).abs() < 1e-12);

    let mu = sl.dynamic_viscosity();
    assert!((mu - 1.789e-5).abs() < 5e-8, "mu = {}", mu);
}

#[test]
fn tropopause_values() {
    let tp = standard_atmosphere(11_000.0).expect("tropopause");
    assert!((tp.temperature_k - 216.65).abs() < 1e-9);
    assert!((tp.pressure_pa - 22_632.1).abs() < 10.0, "p = {}", tp.pressure_pa);

    // Isothermal layer keeps temperature constant.
    let mid = standard_atmosphere(15_000.0).expect("lower stratosphere");
    assert!((mid.temperature_k - 216.65).abs() < 1e-9);
    assert!(mid.pressure_pa < tp.pressure_pa);
}

#[test]
fn layers_are_continuous_at_their_boundaries() {
    for boundary in [11_000.0_f64, 20_000.0, 32_000.0] {
        let below = standard_atmosphere(boundary - 1e-6).expect("below");
        let at = standard_atmosphere(boundary).expect("at");
        assert!(
            relative_gap(below.pressure_pa, at.pressure_pa) < 1e-3,
            "pressure jump at {} m: {} vs {}",
            boundary,
            below.pressure_pa,
            at.pressure_pa
        );
        assert!(relative_gap(below.temperature_k, at.temperature_k) < 1e-6);
        assert!(relative_gap(below.density_kg_m3, at.density_kg_m3) < 1e-3);
    }
}

#[test]
fn density_decreases_with_altitude() {
    let mut previous = f64::INFINITY;
    let mut altitude = 0.0;
    while altitude <= MAX_ALTITUDE_M {
        let atm = standard_atmosphere(altitude).expect("inside model");
        assert!(atm.density_kg_m3 > 0.0);
        assert!(
            atm.density_kg_m3 < previous,
            "density not decreasing at {} m",
            altitude
        );
        previous = atm.density_kg_m3;
        altitude += 500.0;
    }
}

#[test]
fn out_of_range_altitudes_are_rejected() {
    assert_eq!(
        standard_atmosphere(-1.0),
        Err(AtmosphereError::BelowSeaLevel(-1.0))
    );
    assert!(matches!(
        standard_atmosphere(MAX_ALTITUDE_M + 1.0),
        Err(AtmosphereError::AboveModelCeiling { .. })
    ));
    assert!(matches!(
        standard_atmosphere(f64::NAN),
        Err(AtmosphereError::NonFinite(_))
    ));
    assert!(standard_atmosphere(MAX_ALTITUDE_M).is_ok());
}
