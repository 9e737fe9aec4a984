//! Tracking module - camera orientation and input stability
//!
//! Re-exports only. All logic in submodules.

mod orientation;
mod stability_gate;

pub use orientation::{OrientationEstimate, OrientationEstimator, OrientationZone, PrimarySide};
pub use stability_gate::StabilityGate;
