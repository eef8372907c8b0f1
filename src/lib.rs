//! Aircraft design evaluation and optimization.
//!
//! The workspace crates are re-exported under short names; this crate adds the glue
//! between configuration records and runtime values plus the one-call [`assess`]
//! pipeline (analysis followed by feasibility scoring).

pub use aero_aerodynamics as aerodynamics;
pub use aero_airframe as airframe;
pub use aero_atmosphere as atmosphere;
pub use aero_config as config;
pub use aero_core as core;
pub use aero_export as export;
pub use aero_feasibility as feasibility;
pub use aero_optimizer as optimizer;
pub use aero_performance as performance;

pub mod assessment;
pub mod catalog;
pub mod study;

pub use assessment::{Assessment, assess};

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
