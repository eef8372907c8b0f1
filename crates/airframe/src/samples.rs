//! Reference aircraft used by tests, studies, and as optimizer starting points.

use aero_aerodynamics::AerodynamicCoefficients;

use crate::{
    Aircraft, AircraftGeometry, DEFAULT_TSFC_PER_S, MassProperties, Powerplant, ValidationError,
};

/// Four-seat single-engine piston trainer.
pub fn general_aviation() -> Result<Aircraft, ValidationError> {
    Aircraft::new(
        "General Aviation",
        AircraftGeometry {
            span_m: 11.0,
            area_m2: 16.2,
            sweep_deg: 0.0,
            dihedral_deg: 1.7,
            taper_ratio: 0.7,
            thickness_ratio: 0.12,
            fuselage_length_m: 8.3,
            fuselage_diameter_m: 1.2,
        },
        MassProperties {
            empty_kg: 760.0,
            fuel_capacity_kg: 200.0,
            payload_kg: 197.0,
            mtow_kg: 1157.0,
        },
        AerodynamicCoefficients {
            cd0: 0.025,
            oswald_efficiency: 0.8,
            cl_max: 1.6,
            ..AerodynamicCoefficients::default()
        },
        Powerplant {
            static_thrust_n: 2_700.0,
            tsfc_per_s: DEFAULT_TSFC_PER_S,
        },
    )
}

/// Narrow-body twin-jet airliner (flapped CL_max).
pub fn airliner() -> Result<Aircraft, ValidationError> {
    Aircraft::new(
        "Airliner",
        AircraftGeometry {
            span_m: 35.8,
            area_m2: 125.0,
            sweep_deg: 25.0,
            dihedral_deg: 6.0,
            taper_ratio: 0.24,
            thickness_ratio: 0.11,
            fuselage_length_m: 37.6,
            fuselage_diameter_m: 3.95,
        },
        MassProperties {
            empty_kg: 41_000.0,
            fuel_capacity_kg: 20_000.0,
            payload_kg: 18_000.0,
            mtow_kg: 79_000.0,
        },
        AerodynamicCoefficients {
            cd0: 0.02,
            oswald_efficiency: 0.85,
            cl_max: 2.4,
            ..AerodynamicCoefficients::default()
        },
        Powerplant {
            static_thrust_n: 234_000.0,
            tsfc_per_s: 1.6e-5,
        },
    )
}

/// Single-seat multirole fighter.
pub fn fighter() -> Result<Aircraft, ValidationError> {
    Aircraft::new(
        "Fighter",
        AircraftGeometry {
            span_m: 9.96,
            area_m2: 27.9,
            sweep_deg: 40.0,
            dihedral_deg: 0.0,
            taper_ratio: 0.25,
            thickness_ratio: 0.05,
            fuselage_length_m: 15.06,
            fuselage_diameter_m: 1.8,
        },
        MassProperties {
            empty_kg: 8_570.0,
            fuel_capacity_kg: 3_200.0,
            payload_kg: 2_400.0,
            mtow_kg: 19_200.0,
        },
        AerodynamicCoefficients {
            cd0: 0.018,
            oswald_efficiency: 0.75,
            cl_max: 1.8,
            ..AerodynamicCoefficients::default()
        },
        Powerplant {
            static_thrust_n: 127_000.0,
            tsfc_per_s: 2.2e-5,
        },
    )
}

/// All reference aircraft in a stable order.
pub fn all() -> Result<Vec<Aircraft>, ValidationError> {
    Ok(vec![general_aviation()?, airliner()?, fighter()?])
}
