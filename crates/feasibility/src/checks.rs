//! Static checklists: hard red flags, per-metric suggestions, and design trade-off notes.

use aero_core::units::ms_to_kmh;
use aero_performance::PerformanceMetrics;

use crate::Metric;

/// Improvement hint for a metric in a marginal or worse band of a design whose
/// overall rating is also marginal or worse.
pub fn suggestion(metric: Metric) -> &'static str {
    match metric {
        Metric::StallSpeed => {
            "To reduce stall speed: Increase wing area, improve CL_max, or reduce weight"
        }
        Metric::LiftToDrag => {
            "To improve L/D ratio: Increase aspect ratio, reduce parasitic drag, optimize airfoils"
        }
        Metric::TakeoffDistance => {
            "To reduce takeoff distance: Increase wing area, add high-lift devices, or increase thrust"
        }
        Metric::WingLoading => {
            "To reduce wing loading: Increase wing area or reduce takeoff weight"
        }
        Metric::ServiceCeiling => {
            "To increase service ceiling: Reduce wing loading, increase power, or improve L/D ratio"
        }
    }
}

/// Hard physics violations, reported regardless of the weighted score.
pub fn red_flags(metrics: &PerformanceMetrics) -> Vec<String> {
    let design = &metrics.design;
    let checks: [(bool, &str); 8] = [
        (
            design.wing_area_m2 <= 0.0,
            "Non-positive wing area - geometry is undefined",
        ),
        (
            ms_to_kmh(metrics.stall_speed_m_s) > 300.0,
            "Extremely high stall speed - dangerous for most applications",
        ),
        (
            metrics.max_lift_drag < 4.0,
            "Very poor L/D ratio - flight may be unsustainable",
        ),
        (
            metrics.takeoff_distance_m > 4_000.0,
            "Extreme takeoff distance - requires specialized facilities",
        ),
        (
            metrics.wing_loading_pa > 8_000.0,
            "Extreme wing loading - requires exceptional performance",
        ),
        (
            design.aspect_ratio < 1.0,
            "Very low aspect ratio - aerodynamically questionable",
        ),
        (
            design.fuel_fraction > 0.9,
            "Excessive fuel fraction - impractical design",
        ),
        (
            design.empty_fraction > 1.0,
            "Empty weight exceeds MTOW - mass budget error",
        ),
    ];

    checks
        .iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, text)| text.to_string())
        .collect()
}

/// Qualitative notes on where the configuration sits in the usual design trade space.
pub fn trade_offs(metrics: &PerformanceMetrics) -> Vec<String> {
    let design = &metrics.design;

    let aspect = match design.aspect_ratio {
        ar if ar > 8.0 => "High aspect ratio: excellent fuel efficiency",
        ar if ar < 5.0 => "Low aspect ratio: high maneuverability",
        _ => "Moderate aspect ratio: balanced performance",
    };
    let sweep = match design.sweep_deg {
        s if s > 20.0 => "Swept wing: high-speed capability",
        s if s < 5.0 => "Straight wing: excellent low-speed handling",
        _ => "Moderate sweep: balanced speed capability",
    };
    let loading = match metrics.wing_loading_pa {
        wl if wl > 4_000.0 => "High wing loading: fast cruise, long runways needed",
        wl if wl < 1_500.0 => "Low wing loading: short runway capability",
        _ => "Moderate wing loading: versatile performance",
    };
    let fuel = match design.fuel_fraction {
        f if f > 0.4 => "High fuel fraction: long range, reduced payload",
        f if f < 0.2 => "Low fuel fraction: limited range, high payload",
        _ => "Balanced fuel fraction: good range-payload balance",
    };

    [aspect, sweep, loading, fuel]
        .into_iter()
        .map(str::to_string)
        .collect()
}
