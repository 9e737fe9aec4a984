//! Bilateral curl engine

use crate::config::EngineConfig;
use crate::fsm::{ArmVisibility, BilateralMachine, RepOutcome};
use crate::kinematics::all_visible;
use crate::pose::{arm, JointFrame, JointName, Side, LEFT_ARM, RIGHT_ARM};
use crate::scoring::{curl_cues, score_curl, RepKind, RepResult, ScoringContext};
use crate::signal::Channel;
use crate::tracking::OrientationZone;

use super::output::{FrameOutput, FrameReport, PhaseReport};
use super::pipeline::{RepLedger, Tracker};
use super::ExerciseEngine;

const DISPLAY: [Channel; 5] = [
    Channel::LeftElbow,
    Channel::RightElbow,
    Channel::LeftShoulder,
    Channel::RightShoulder,
    Channel::TorsoLean,
];

#[derive(Clone, Debug)]
pub struct CurlState {
    tracker: Tracker,
    machine: BilateralMachine,
    ledger: RepLedger,
}

impl CurlState {
    pub fn rep_count(&self) -> u32 {
        self.ledger.count()
    }

    pub fn last_rep(&self) -> Option<&RepResult> {
        self.ledger.last()
    }

    pub fn machine(&self) -> &BilateralMachine {
        &self.machine
    }
}

pub struct CurlEngine {
    config: EngineConfig,
}

impl CurlEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn arms(&self, frame: &JointFrame) -> ArmVisibility {
        let visible = |side| all_visible(frame, &arm(side).joints(), self.config.curl.visibility);
        ArmVisibility {
            left: visible(Side::Left),
            right: visible(Side::Right),
        }
    }

    fn to_result(&self, outcome: RepOutcome, zone: OrientationZone, ledger: &RepLedger) -> Option<RepResult> {
        let index = ledger.next_index();
        match outcome {
            RepOutcome::Credited { window, mode } => {
                let cfg = &self.config.curl;
                let ctx = ScoringContext::new(zone, mode);
                let score = score_curl(&window, &cfg.scoring, &ctx).score();
                let cues = curl_cues(&window, &cfg.feedback, &ctx);
                log::info!("curl rep {} scored {:.0} in {:?} mode, cues {:?}", index, score, mode, cues);
                Some(RepResult {
                    index,
                    kind: RepKind::Full,
                    concentric_s: window.to_bottom(),
                    eccentric_s: window.from_bottom(),
                    duration_s: window.duration(),
                    score: Some(score),
                    tier: None,
                    cues,
                })
            }
            // BilateralMachine never yields Partial; only the push-up machine does
            RepOutcome::Partial { .. } | RepOutcome::Discarded(_) => None,
        }
    }
}

impl ExerciseEngine for CurlEngine {
    type State = CurlState;

    fn initial_state(&self) -> CurlState {
        CurlState {
            tracker: Tracker::new(&self.config),
            machine: BilateralMachine::new(),
            ledger: RepLedger::default(),
        }
    }

    fn update(&self, mut state: CurlState, frame: &JointFrame) -> (CurlState, FrameOutput) {
        let t = frame.timestamp;
        let (left, right) = (LEFT_ARM.joints(), RIGHT_ARM.joints());
        let groups: [&[JointName]; 2] = [&left, &right];
        let obs = state.tracker.observe(frame, self.config.curl.visibility, &groups);

        // The dropout frame is usually empty too; abandon before bailing out
        let measured = obs.raw.any_finite();
        let outcome = if obs.gate_dropped {
            state.machine.abandon(t)
        } else if obs.gate_open && measured {
            state
                .machine
                .update(t, &obs.smoothed, &obs.orientation, self.arms(frame), &self.config.curl)
        } else {
            None
        };

        if !measured {
            let output = FrameOutput::NoAngles {
                timestamp: t,
                rep_count: state.ledger.count(),
            };
            return (state, output);
        }

        let new_rep = outcome
            .and_then(|o| self.to_result(o, obs.orientation.zone, &state.ledger))
            .map(|r| state.ledger.record(r));

        let phase = PhaseReport::Curl {
            left: state.machine.limb(Side::Left).phase(),
            right: state.machine.limb(Side::Right).phase(),
            mode: state.machine.latched_mode(),
        };
        let report = FrameReport {
            timestamp: t,
            angles: state.tracker.bank().display(&DISPLAY),
            orientation: obs.orientation,
            gate_open: obs.gate_open,
            phase,
            rep_count: state.ledger.count(),
            new_rep,
            last_rep: state.ledger.last().cloned(),
        };
        (state, FrameOutput::Tracked(report))
    }
}
