//! Continuous 0-100 scorer
//!
//! Each fault category reads the closed window's extrema and timestamps,
//! runs through its own quadratic penalty curve and is capped independently.
//! Categories the viewpoint makes unreliable are not evaluated at all.

use serde::Serialize;

use super::context::ScoringContext;
use super::window::ClosedWindow;
use crate::config::{CurlScoring, PushupScoring};
use crate::signal::Channel;

/// Per-category penalty points for one rep
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Penalties {
    pub range: f32,
    pub secondary: f32,
    pub trunk: f32,
    pub tempo: f32,
    pub asymmetry: f32,
}

impl Penalties {
    pub fn total(&self) -> f32 {
        self.range + self.secondary + self.trunk + self.tempo + self.asymmetry
    }

    pub fn score(&self) -> f32 {
        (100.0 - self.total()).clamp(0.0, 100.0)
    }
}

// ============================================================================
// WINDOW READERS
// ============================================================================

/// Largest per-side minimum of the elbow channel (the shallowest side)
pub(crate) fn shallowest_min(window: &ClosedWindow, ctx: &ScoringContext) -> f32 {
    ctx.mode
        .sides()
        .iter()
        .map(|s| window.min(Channel::elbow(*s)))
        .filter(|v| v.is_finite())
        .fold(f32::NAN, f32::max)
}

/// Smallest per-side maximum of the elbow channel (the least extended side)
pub(crate) fn weakest_max(window: &ClosedWindow, ctx: &ScoringContext) -> f32 {
    ctx.mode
        .sides()
        .iter()
        .map(|s| window.max(Channel::elbow(*s)))
        .filter(|v| v.is_finite())
        .fold(f32::NAN, f32::min)
}

/// Smallest per-side elbow range
pub(crate) fn narrowest_range(window: &ClosedWindow, ctx: &ScoringContext) -> f32 {
    ctx.mode
        .sides()
        .iter()
        .map(|s| window.range(Channel::elbow(*s)))
        .filter(|v| v.is_finite())
        .fold(f32::NAN, f32::min)
}

/// Difference in deepest elbow flexion between the two sides
pub(crate) fn elbow_asymmetry(window: &ClosedWindow) -> f32 {
    (window.min(Channel::LeftElbow) - window.min(Channel::RightElbow)).abs()
}

/// Widest shoulder-flexion excursion of either side
pub(crate) fn shoulder_swing(window: &ClosedWindow) -> f32 {
    window
        .range(Channel::LeftShoulder)
        .max(window.range(Channel::RightShoulder))
}

/// Worst sag (positive) and pike (positive) of the hip line
pub(crate) fn hip_deviation(window: &ClosedWindow) -> (f32, f32) {
    let sag = window.max(Channel::HipLine).max(0.0);
    let pike = (-window.min(Channel::HipLine)).max(0.0);
    (sag, pike)
}

// ============================================================================
// EXERCISE SCORERS
// ============================================================================

/// Curl: concentric runs from rest to peak flexion, eccentric back down
pub fn score_curl(window: &ClosedWindow, cfg: &CurlScoring, ctx: &ScoringContext) -> Penalties {
    let flexion = shallowest_min(window, ctx) - cfg.target_flexion;
    let extension = cfg.target_extension - weakest_max(window, ctx);

    let secondary = if ctx.secondary_reliable() {
        cfg.shoulder_takeover.penalty(shoulder_swing(window))
    } else {
        0.0
    };

    let asymmetry = if ctx.symmetry_reliable() {
        cfg.asymmetry.penalty(elbow_asymmetry(window))
    } else {
        0.0
    };

    Penalties {
        range: cfg.flexion_shortfall.penalty(flexion) + cfg.extension_shortfall.penalty(extension),
        secondary,
        trunk: cfg.torso_sway.penalty(window.range(Channel::TorsoLean)),
        tempo: cfg.concentric.penalty(window.to_bottom()) + cfg.eccentric.penalty(window.from_bottom()),
        asymmetry,
    }
}

/// Push-up: eccentric runs from plank to bottom, concentric back up
pub fn score_pushup(window: &ClosedWindow, cfg: &PushupScoring, ctx: &ScoringContext) -> Penalties {
    let depth = shallowest_min(window, ctx) - cfg.target_depth;
    let lockout = cfg.target_lockout - weakest_max(window, ctx);
    let (sag, pike) = hip_deviation(window);

    let asymmetry = if ctx.symmetry_reliable() {
        cfg.asymmetry.penalty(elbow_asymmetry(window))
    } else {
        0.0
    };

    Penalties {
        range: cfg.depth_shortfall.penalty(depth) + cfg.lockout_shortfall.penalty(lockout),
        secondary: 0.0,
        trunk: cfg.hip_line.penalty(sag.max(pike)),
        tempo: cfg.eccentric.penalty(window.to_bottom()) + cfg.concentric.penalty(window.from_bottom()),
        asymmetry,
    }
}
