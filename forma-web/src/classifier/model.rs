//! Exercise labels for the generic detector

use serde::{Deserialize, Serialize};

use crate::config::{GenericConfig, TwoPhaseThresholds};
use crate::signal::Channel;

/// Number of candidate exercises
pub const EXERCISE_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Squat,
    PushUp,
    BicepCurl,
}

impl ExerciseKind {
    /// Candidates in tie-break order: earlier wins a tie
    pub const TIE_BREAK_ORDER: [ExerciseKind; EXERCISE_COUNT] = [
        ExerciseKind::Squat,
        ExerciseKind::PushUp,
        ExerciseKind::BicepCurl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::PushUp => "push_up",
            ExerciseKind::BicepCurl => "bicep_curl",
        }
    }

    pub fn thresholds<'a>(&self, cfg: &'a GenericConfig) -> &'a TwoPhaseThresholds {
        match self {
            ExerciseKind::Squat => &cfg.squat,
            ExerciseKind::PushUp => &cfg.pushup,
            ExerciseKind::BicepCurl => &cfg.curl,
        }
    }

    /// Channel whose deviation costs a form tier
    pub fn posture_channel(&self) -> Channel {
        match self {
            ExerciseKind::Squat | ExerciseKind::BicepCurl => Channel::TorsoInclination,
            ExerciseKind::PushUp => Channel::HipLine,
        }
    }

    /// Whether the contracting half of the cycle is the lifting one
    pub fn lifts_into_contraction(&self) -> bool {
        matches!(self, ExerciseKind::BicepCurl)
    }
}
