//! Two-phase rep counter with a three-tier form grade
//!
//! Extended -> Contracted when the primary angle drops below
//! `contracted_below`; Contracted -> Extended (one rep) when it rises above
//! `extended_above`. The gap between the two is the hysteresis band.

use serde::Serialize;

use crate::config::TwoPhaseThresholds;
use crate::scoring::FormTier;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPhase {
    Extended,
    Contracted,
}

/// One counted two-phase rep
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountedRep {
    pub start: f64,
    /// When the deepest angle was reached
    pub deepest_at: f64,
    pub end: f64,
    pub deepest: f32,
    pub worst_posture: f32,
    pub tier: FormTier,
}

#[derive(Clone, Debug)]
pub struct TwoPhaseCounter {
    phase: MotionPhase,
    reps: u32,
    start: f64,
    deepest: f32,
    deepest_at: f64,
    worst_posture: f32,
}

impl Default for TwoPhaseCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TwoPhaseCounter {
    pub fn new() -> Self {
        Self {
            phase: MotionPhase::Extended,
            reps: 0,
            start: 0.0,
            deepest: f32::NAN,
            deepest_at: 0.0,
            worst_posture: f32::NAN,
        }
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    /// `posture` is the unsigned deviation that costs a tier (NaN = unknown)
    pub fn update(
        &mut self,
        t: f64,
        angle: f32,
        posture: f32,
        th: &TwoPhaseThresholds,
    ) -> Option<CountedRep> {
        match self.phase {
            MotionPhase::Extended => {
                if angle < th.contracted_below {
                    self.phase = MotionPhase::Contracted;
                    self.start = t;
                    self.deepest = angle;
                    self.deepest_at = t;
                    self.worst_posture = posture;
                }
                None
            }
            MotionPhase::Contracted => {
                if angle < self.deepest {
                    self.deepest = angle;
                    self.deepest_at = t;
                }
                self.worst_posture = self.worst_posture.max(posture);

                if angle > th.extended_above {
                    self.phase = MotionPhase::Extended;
                    self.reps += 1;
                    let depth_ok = self.deepest <= th.good_depth;
                    // unknown posture is not held against the rep
                    let posture_ok = !(self.worst_posture > th.max_lean);
                    Some(CountedRep {
                        start: self.start,
                        deepest_at: self.deepest_at,
                        end: t,
                        deepest: self.deepest,
                        worst_posture: self.worst_posture,
                        tier: FormTier::from_checks(depth_ok, posture_ok),
                    })
                } else {
                    None
                }
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
