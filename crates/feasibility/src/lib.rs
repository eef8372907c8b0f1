//! Flight-feasibility scoring: banded metric table, weighted score, red flags, and improvement guidance.

pub mod checks;

use aero_core::units::{m_to_km, ms_to_kmh};
use aero_performance::PerformanceMetrics;
use serde::Serialize;

/// Ordered quality band, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Band {
    Excellent,
    Good,
    Acceptable,
    Marginal,
    Poor,
    Critical,
}

impl Band {
    pub const ALL: [Band; 6] = [
        Band::Excellent,
        Band::Good,
        Band::Acceptable,
        Band::Marginal,
        Band::Poor,
        Band::Critical,
    ];

    /// Sub-score awarded for landing in this band.
    pub fn score(self) -> f64 {
        match self {
            Band::Excellent => 100.0,
            Band::Good => 85.0,
            Band::Acceptable => 70.0,
            Band::Marginal => 50.0,
            Band::Poor => 25.0,
            Band::Critical => 5.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Excellent => "Excellent",
            Band::Good => "Good",
            Band::Acceptable => "Acceptable",
            Band::Marginal => "Marginal",
            Band::Poor => "Poor",
            Band::Critical => "Critical",
        }
    }

    /// Plain-language flyability verdict for an overall band.
    pub fn verdict(self) -> &'static str {
        match self {
            Band::Excellent => "Highly Flyable",
            Band::Good => "Flyable",
            Band::Acceptable => "Flyable with Limitations",
            Band::Marginal => "Challenging",
            Band::Poor => "Significant Problems",
            Band::Critical => "Unlikely to Fly",
        }
    }

    /// Overall band for a weighted score in `[0, 100]`.
    pub fn for_overall_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Band::Excellent,
            s if s >= 70.0 => Band::Good,
            s if s >= 50.0 => Band::Acceptable,
            s if s >= 30.0 => Band::Marginal,
            s if s >= 10.0 => Band::Poor,
            _ => Band::Critical,
        }
    }

    /// True for Marginal and worse: the bands that trigger improvement suggestions.
    pub fn needs_attention(self) -> bool {
        self >= Band::Marginal
    }
}

/// Which way a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

/// Scored metric, with its weight and band thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    StallSpeed,
    LiftToDrag,
    TakeoffDistance,
    WingLoading,
    ServiceCeiling,
}

struct MetricRule {
    metric: Metric,
    weight: f64,
    direction: Direction,
    /// Boundaries between Excellent|Good|Acceptable|Marginal|Poor|Critical.
    thresholds: [f64; 5],
}

const TABLE: [MetricRule; 5] = [
    MetricRule {
        metric: Metric::StallSpeed,
        weight: 0.30,
        direction: Direction::LowerIsBetter,
        thresholds: [100.0, 150.0, 200.0, 250.0, 300.0],
    },
    MetricRule {
        metric: Metric::LiftToDrag,
        weight: 0.25,
        direction: Direction::HigherIsBetter,
        thresholds: [15.0, 12.0, 8.0, 6.0, 4.0],
    },
    MetricRule {
        metric: Metric::TakeoffDistance,
        weight: 0.20,
        direction: Direction::LowerIsBetter,
        thresholds: [300.0, 800.0, 1_500.0, 2_500.0, 4_000.0],
    },
    MetricRule {
        metric: Metric::WingLoading,
        weight: 0.15,
        direction: Direction::LowerIsBetter,
        thresholds: [1_500.0, 2_500.0, 4_000.0, 6_000.0, 8_000.0],
    },
    MetricRule {
        metric: Metric::ServiceCeiling,
        weight: 0.10,
        direction: Direction::HigherIsBetter,
        thresholds: [12.0, 8.0, 5.0, 3.0, 1.0],
    },
];

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::StallSpeed,
        Metric::LiftToDrag,
        Metric::TakeoffDistance,
        Metric::WingLoading,
        Metric::ServiceCeiling,
    ];

    fn rule(self) -> &'static MetricRule {
        match self {
            Metric::StallSpeed => &TABLE[0],
            Metric::LiftToDrag => &TABLE[1],
            Metric::TakeoffDistance => &TABLE[2],
            Metric::WingLoading => &TABLE[3],
            Metric::ServiceCeiling => &TABLE[4],
        }
    }

    pub fn weight(self) -> f64 {
        self.rule().weight
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::StallSpeed => "Stall Speed",
            Metric::LiftToDrag => "L/D Ratio",
            Metric::TakeoffDistance => "Takeoff Distance",
            Metric::WingLoading => "Wing Loading",
            Metric::ServiceCeiling => "Service Ceiling",
        }
    }

    /// Unit the metric is banded in.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::StallSpeed => "km/h",
            Metric::LiftToDrag => "",
            Metric::TakeoffDistance => "m",
            Metric::WingLoading => "Pa",
            Metric::ServiceCeiling => "km",
        }
    }

    /// Extract the metric from SI performance data, converted to its banding unit.
    pub fn value(self, metrics: &PerformanceMetrics) -> f64 {
        match self {
            Metric::StallSpeed => ms_to_kmh(metrics.stall_speed_m_s),
            Metric::LiftToDrag => metrics.max_lift_drag,
            Metric::TakeoffDistance => metrics.takeoff_distance_m,
            Metric::WingLoading => metrics.wing_loading_pa,
            Metric::ServiceCeiling => m_to_km(metrics.service_ceiling_m),
        }
    }

    /// Band for a value in this metric's unit. Boundary values fall into the worse band;
    /// non-finite values are critical.
    pub fn band(self, value: f64) -> Band {
        if !value.is_finite() {
            return Band::Critical;
        }
        let rule = self.rule();
        let better = |threshold: f64| match rule.direction {
            Direction::LowerIsBetter => value < threshold,
            Direction::HigherIsBetter => value > threshold,
        };
        rule.thresholds
            .iter()
            .zip(Band::ALL)
            .find(|(threshold, _)| better(**threshold))
            .map(|(_, band)| band)
            .unwrap_or(Band::Critical)
    }
}

/// Per-metric line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricAssessment {
    pub metric: Metric,
    pub value: f64,
    pub unit: &'static str,
    pub band: Band,
    pub score: f64,
    pub weight: f64,
}

/// Deterministic feasibility verdict for one set of metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeasibilityReport {
    pub score: f64,
    pub overall: Band,
    pub verdict: &'static str,
    pub metrics: Vec<MetricAssessment>,
    pub red_flags: Vec<String>,
    pub suggestions: Vec<String>,
    pub trade_offs: Vec<String>,
}

impl FeasibilityReport {
    pub fn assessment(&self, metric: Metric) -> Option<&MetricAssessment> {
        self.metrics.iter().find(|a| a.metric == metric)
    }

    pub fn has_red_flags(&self) -> bool {
        !self.red_flags.is_empty()
    }
}

/// Maps performance metrics to a weighted feasibility report.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityScorer;

impl FeasibilityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, metrics: &PerformanceMetrics) -> FeasibilityReport {
        let assessments: Vec<MetricAssessment> = Metric::ALL
            .iter()
            .map(|&metric| {
                let value = metric.value(metrics);
                let band = metric.band(value);
                MetricAssessment {
                    metric,
                    value,
                    unit: metric.unit(),
                    band,
                    score: band.score(),
                    weight: metric.weight(),
                }
            })
            .collect();

        let score: f64 = assessments.iter().map(|a| a.score * a.weight).sum();
        let overall = Band::for_overall_score(score);

        // Guidance is only given once the design as a whole is in trouble.
        let suggestions = if overall.needs_attention() {
            assessments
                .iter()
                .filter(|a| a.band.needs_attention())
                .map(|a| checks::suggestion(a.metric).to_string())
                .collect()
        } else {
            Vec::new()
        };

        FeasibilityReport {
            score,
            overall,
            verdict: overall.verdict(),
            metrics: assessments,
            red_flags: checks::red_flags(metrics),
            suggestions,
            trade_offs: checks::trade_offs(metrics),
        }
    }
}
