//! Per-frame snapshots handed to the presentation layer

use serde::Serialize;

use crate::classifier::{ExerciseKind, MotionPhase};
use crate::fsm::{LimbPhase, PushupPhase};
use crate::scoring::{LimbMode, RepResult};
use crate::signal::DisplayAngle;
use crate::tracking::OrientationEstimate;

/// Where each exercise's state machine currently stands
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "exercise", rename_all = "snake_case")]
pub enum PhaseReport {
    Curl {
        left: LimbPhase,
        right: LimbPhase,
        /// Set while a rep is in progress
        mode: Option<LimbMode>,
    },
    Pushup {
        phase: PushupPhase,
    },
    Generic {
        detected: Option<ExerciseKind>,
        phase: MotionPhase,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    pub timestamp: f64,
    pub angles: Vec<DisplayAngle>,
    pub orientation: OrientationEstimate,
    pub gate_open: bool,
    pub phase: PhaseReport,
    pub rep_count: u32,
    /// Set on exactly the frame a rep was counted
    pub new_rep: Option<RepResult>,
    pub last_rep: Option<RepResult>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameOutput {
    /// No angle could be computed from this frame; skip rendering it
    NoAngles { timestamp: f64, rep_count: u32 },
    Tracked(FrameReport),
}

impl FrameOutput {
    pub fn report(&self) -> Option<&FrameReport> {
        match self {
            FrameOutput::Tracked(report) => Some(report),
            FrameOutput::NoAngles { .. } => None,
        }
    }

    pub fn new_rep(&self) -> Option<&RepResult> {
        self.report().and_then(|r| r.new_rep.as_ref())
    }

    pub fn rep_count(&self) -> u32 {
        match self {
            FrameOutput::Tracked(report) => report.rep_count,
            FrameOutput::NoAngles { rep_count, .. } => *rep_count,
        }
    }
}
