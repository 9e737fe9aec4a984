//! Quadratic penalty curves
//!
//! penalty = min(cap, scale · max(0, measured − deadzone)²)
//!
//! Small deviations cost a few points, large ones saturate at the cap.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenaltyCurve {
    /// Deviation absorbed without cost (normal biomechanical noise)
    pub deadzone: f32,
    /// Points per squared unit of deviation past the deadzone
    pub scale: f32,
    /// Upper bound for this category
    pub cap: f32,
}

impl PenaltyCurve {
    pub const fn new(deadzone: f32, scale: f32, cap: f32) -> Self {
        Self { deadzone, scale, cap }
    }

    /// Non-finite measurements cost nothing: the category is not evaluable
    pub fn penalty(&self, measured: f32) -> f32 {
        if !measured.is_finite() {
            return 0.0;
        }
        let excess = (measured - self.deadzone).max(0.0);
        (self.scale * excess * excess).min(self.cap)
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.deadzone >= 0.0 && self.scale >= 0.0 && self.cap >= 0.0
    }
}

/// Tempo floor for one movement phase
///
/// The measured deviation is how far the phase fell short of `floor_s`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TempoRule {
    pub floor_s: f32,
    pub curve: PenaltyCurve,
}

impl TempoRule {
    pub const fn new(floor_s: f32, curve: PenaltyCurve) -> Self {
        Self { floor_s, curve }
    }

    pub fn shortfall(&self, duration_s: f32) -> f32 {
        (self.floor_s - duration_s).max(0.0)
    }

    pub fn penalty(&self, duration_s: f32) -> f32 {
        if !duration_s.is_finite() {
            return 0.0;
        }
        self.curve.penalty(self.shortfall(duration_s))
    }
}
