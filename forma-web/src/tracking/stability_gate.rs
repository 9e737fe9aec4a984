//! Stability gate - warm-up before any state machine may advance
//!
//! Detection noise at stream start (someone walking into frame, the model
//! locking on) must not trigger reps. The gate opens only after a joint
//! group has been visible with enough mean confidence for a run of
//! consecutive frames, and closes again after a sustained dropout.

use crate::config::StabilityConfig;
use crate::kinematics::{all_visible, mean_confidence};
use crate::pose::{JointFrame, JointName};

#[derive(Clone, Debug)]
pub struct StabilityGate {
    config: StabilityConfig,
    /// Consecutive passing frames
    streak: u32,
    /// Consecutive failing frames while open
    misses: u32,
    open: bool,
}

impl StabilityGate {
    pub fn new(config: StabilityConfig) -> Self {
        Self {
            config,
            streak: 0,
            misses: 0,
            open: false,
        }
    }

    /// Observe one frame; returns whether the gate is open afterwards
    ///
    /// The frame passes when any of `groups` is fully visible with mean
    /// confidence at or above the configured floor.
    pub fn observe(&mut self, frame: &JointFrame, groups: &[&[JointName]]) -> bool {
        let passes = groups.iter().any(|group| {
            all_visible(frame, group, self.config.visibility)
                && mean_confidence(frame, group) >= self.config.min_confidence
        });

        if passes {
            self.streak = self.streak.saturating_add(1);
            self.misses = 0;
            if !self.open && self.streak >= self.config.warmup_frames {
                log::debug!("stability gate open after {} frames", self.streak);
                self.open = true;
            }
        } else {
            self.streak = 0;
            if self.open {
                self.misses += 1;
                if self.misses >= self.config.dropout_frames {
                    log::debug!("stability gate closed after {} bad frames", self.misses);
                    self.open = false;
                    self.misses = 0;
                }
            }
        }

        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn reset(&mut self) {
        self.streak = 0;
        self.misses = 0;
        self.open = false;
    }
}
