//! Mission performance analysis: flight conditions, Breguet range/endurance, climb, takeoff, and V-n envelope.

pub mod analyzer;
pub mod conditions;
pub mod envelope;
pub mod metrics;

pub use analyzer::{
    ClimbProfile, ClimbSample, DomainError, MissionProfile, PerformanceAnalyzer,
    TakeoffPerformance,
};
pub use conditions::{ConditionError, FlightConditions};
pub use envelope::{EnvelopeLimits, EnvelopePoint, FlightEnvelope};
pub use metrics::{DesignSummary, PerformanceMetrics};
