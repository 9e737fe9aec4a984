//! Rep results and the closed set of coaching cues
//!
//! The engine only ever emits `Cue` values. Turning them into text is the
//! presentation layer's job (see `bridge::messages`).

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    // Depth
    IncompleteCurl,
    ShallowPushup,
    // Lockout / extension
    IncompleteExtension,
    NoLockout,
    // Fallback when neither end was flagged
    IncompleteRange,
    // Secondary joint
    ElbowDrift,
    // Trunk
    TorsoSwing,
    HipSag,
    HipPike,
    // Tempo
    RushedLift,
    FastLowering,
    // Cross-body
    UnevenArms,
    /// Descent abandoned before reaching the bottom
    PartialRep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepKind {
    Full,
    Partial,
}

/// Coarse form grade used where no continuous scorer exists
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormTier {
    Good,
    Fair,
    Poor,
}

impl FormTier {
    /// One tier lost per failed check
    pub fn from_checks(depth_ok: bool, posture_ok: bool) -> Self {
        match (depth_ok, posture_ok) {
            (true, true) => FormTier::Good,
            (true, false) | (false, true) => FormTier::Fair,
            (false, false) => FormTier::Poor,
        }
    }
}

/// Immutable record of one counted rep
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RepResult {
    /// 1-based position in the set
    pub index: u32,
    pub kind: RepKind,
    pub concentric_s: f32,
    pub eccentric_s: f32,
    pub duration_s: f32,
    /// None for partial reps, which are never scored
    pub score: Option<f32>,
    /// Only set by the generic detector
    pub tier: Option<FormTier>,
    /// Ordered by priority; empty means nothing to correct
    pub cues: Vec<Cue>,
}

impl RepResult {
    pub fn is_partial(&self) -> bool {
        self.kind == RepKind::Partial
    }
}
