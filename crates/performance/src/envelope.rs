//! V-n (airspeed versus load factor) boundary generation.

use serde::{Deserialize, Serialize};

/// Structural and sampling limits for the V-n diagram.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvelopeLimits {
    /// Positive limit load factor.
    pub positive_load_factor: f64,
    /// Negative limit load factor.
    pub negative_load_factor: f64,
    /// Dive speed as a multiple of manoeuvring speed.
    pub dive_speed_factor: f64,
    /// Number of samples along the positive stall curve.
    pub curve_samples: usize,
}

impl Default for EnvelopeLimits {
    fn default() -> Self {
        Self {
            positive_load_factor: 2.5,
            negative_load_factor: -1.0,
            dive_speed_factor: 1.4,
            curve_samples: 50,
        }
    }
}

/// One boundary vertex of the V-n diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvelopePoint {
    pub speed_m_s: f64,
    pub load_factor: f64,
}

/// Lazy, finite walk around the V-n boundary.
///
/// Order: positive stall curve from `V_s` to `V_A`, the structural line to
/// `V_D`, the negative limit back to the negative stall speed, then the origin.
/// Cloning yields an independent iterator that restarts from the first point.
#[derive(Debug, Clone)]
pub struct FlightEnvelope {
    stall_speed_m_s: f64,
    limits: EnvelopeLimits,
    index: usize,
}

const TAIL_POINTS: usize = 5;

impl FlightEnvelope {
    pub fn new(stall_speed_m_s: f64, limits: EnvelopeLimits) -> Self {
        Self {
            stall_speed_m_s,
            limits: EnvelopeLimits {
                curve_samples: limits.curve_samples.max(2),
                ..limits
            },
            index: 0,
        }
    }

    /// 1-g stall speed the envelope is built on.
    pub fn stall_speed_m_s(&self) -> f64 {
        self.stall_speed_m_s
    }

    /// Manoeuvring speed `V_A = V_s·sqrt(n_max)`, where the stall curve meets the positive limit.
    pub fn maneuvering_speed_m_s(&self) -> f64 {
        self.stall_speed_m_s * self.limits.positive_load_factor.max(0.0).sqrt()
    }

    pub fn dive_speed_m_s(&self) -> f64 {
        self.maneuvering_speed_m_s() * self.limits.dive_speed_factor
    }

    /// Stall speed under the negative limit load.
    pub fn negative_stall_speed_m_s(&self) -> f64 {
        self.stall_speed_m_s * self.limits.negative_load_factor.abs().sqrt()
    }

    /// A fresh iterator positioned at the first point.
    pub fn restart(&self) -> Self {
        Self {
            index: 0,
            ..self.clone()
        }
    }

    fn total_points(&self) -> usize {
        self.limits.curve_samples + TAIL_POINTS
    }

    fn point(&self, index: usize) -> Option<EnvelopePoint> {
        let samples = self.limits.curve_samples;
        let n_max = self.limits.positive_load_factor;
        let n_min = self.limits.negative_load_factor;
        let v_s = self.stall_speed_m_s;
        let v_a = self.maneuvering_speed_m_s();
        let v_d = self.dive_speed_m_s();

        let (speed_m_s, load_factor) = if index < samples {
            let fraction = index as f64 / (samples - 1) as f64;
            let v = v_s + (v_a - v_s) * fraction;
            let n = if v_s > 0.0 { (v / v_s).powi(2) } else { n_max };
            (v, n.min(n_max))
        } else {
            match index - samples {
                0 => (v_a, n_max),
                1 => (v_d, n_max),
                2 => (v_d, n_min),
                3 => (self.negative_stall_speed_m_s(), n_min),
                4 => (0.0, 0.0),
                _ => return None,
            }
        };

        Some(EnvelopePoint {
            speed_m_s,
            load_factor,
        })
    }
}

impl Iterator for FlightEnvelope {
    type Item = EnvelopePoint;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.point(self.index)?;
        self.index += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_points().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FlightEnvelope {}
