//! Per-frame front end shared by every engine, plus the rep ledger

use crate::config::EngineConfig;
use crate::pose::{JointFrame, JointName};
use crate::scoring::{Cue, RepKind, RepResult};
use crate::signal::{AngleBank, ChannelValues};
use crate::tracking::{OrientationEstimate, OrientationEstimator, StabilityGate};

use super::measure::measure;

/// Everything the front end learned from one frame
#[derive(Clone, Debug)]
pub struct Observation {
    pub raw: ChannelValues,
    pub smoothed: ChannelValues,
    pub orientation: OrientationEstimate,
    pub gate_open: bool,
    /// The gate closed on this frame after a sustained dropout
    pub gate_dropped: bool,
}

/// Angle measurement, smoothing, orientation and the stability gate
#[derive(Clone, Debug)]
pub struct Tracker {
    bank: AngleBank,
    orientation: OrientationEstimator,
    gate: StabilityGate,
}

impl Tracker {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            bank: AngleBank::new(&config.smoothing),
            orientation: OrientationEstimator::new(config.orientation.clone()),
            gate: StabilityGate::new(config.stability.clone()),
        }
    }

    pub fn bank(&self) -> &AngleBank {
        &self.bank
    }

    pub fn observe(&mut self, frame: &JointFrame, visibility: f32, groups: &[&[JointName]]) -> Observation {
        let raw = measure(frame, visibility);
        let smoothed = self.bank.update(&raw);
        let orientation = self.orientation.update(frame);
        let was_open = self.gate.is_open();
        let gate_open = self.gate.observe(frame, groups);
        Observation {
            raw,
            smoothed,
            orientation,
            gate_open,
            gate_dropped: was_open && !gate_open,
        }
    }
}

/// Running rep count and the most recent result
#[derive(Clone, Debug, Default)]
pub struct RepLedger {
    count: u32,
    last: Option<RepResult>,
}

impl RepLedger {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn last(&self) -> Option<&RepResult> {
        self.last.as_ref()
    }

    pub fn next_index(&self) -> u32 {
        self.count + 1
    }

    pub fn record(&mut self, result: RepResult) -> RepResult {
        self.count = result.index;
        self.last = Some(result.clone());
        result
    }
}

/// Result for a descent that turned back before the bottom
pub fn partial_rep(index: u32, start: f64, turn: f64, end: f64) -> RepResult {
    RepResult {
        index,
        kind: RepKind::Partial,
        concentric_s: (end - turn) as f32,
        eccentric_s: (turn - start) as f32,
        duration_s: (end - start) as f32,
        score: None,
        tier: None,
        cues: vec![Cue::PartialRep],
    }
}
