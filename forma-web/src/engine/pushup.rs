//! Push-up engine

use crate::config::EngineConfig;
use crate::fsm::{choose_mode, ArmVisibility, PushupMachine, RepOutcome};
use crate::kinematics::all_visible;
use crate::pose::{arm, leg, JointFrame, JointName, Side};
use crate::scoring::{pushup_cues, score_pushup, RepKind, RepResult, ScoringContext};
use crate::signal::Channel;
use crate::tracking::OrientationZone;

use super::output::{FrameOutput, FrameReport, PhaseReport};
use super::pipeline::{partial_rep, RepLedger, Tracker};
use super::ExerciseEngine;

const DISPLAY: [Channel; 4] = [
    Channel::LeftElbow,
    Channel::RightElbow,
    Channel::HipLine,
    Channel::TorsoInclination,
];

/// Shoulder, elbow, wrist, hip and ankle of one side
fn plank_chain(side: Side) -> [JointName; 5] {
    let (a, l) = (arm(side), leg(side));
    [a.shoulder, a.elbow, a.wrist, l.hip, l.ankle]
}

#[derive(Clone, Debug)]
pub struct PushupState {
    tracker: Tracker,
    machine: PushupMachine,
    ledger: RepLedger,
}

impl PushupState {
    pub fn rep_count(&self) -> u32 {
        self.ledger.count()
    }

    pub fn last_rep(&self) -> Option<&RepResult> {
        self.ledger.last()
    }

    pub fn machine(&self) -> &PushupMachine {
        &self.machine
    }
}

pub struct PushupEngine {
    config: EngineConfig,
}

impl PushupEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn arms(&self, frame: &JointFrame) -> ArmVisibility {
        let v = self.config.pushup.visibility;
        let visible = |side| {
            let a = arm(side);
            all_visible(frame, &[a.shoulder, a.elbow, a.wrist], v)
        };
        ArmVisibility {
            left: visible(Side::Left),
            right: visible(Side::Right),
        }
    }

    fn to_result(&self, outcome: RepOutcome, zone: OrientationZone, ledger: &RepLedger) -> Option<RepResult> {
        let index = ledger.next_index();
        match outcome {
            RepOutcome::Credited { window, mode } => {
                let cfg = &self.config.pushup;
                let ctx = ScoringContext::new(zone, mode);
                let score = score_pushup(&window, &cfg.scoring, &ctx).score();
                let cues = pushup_cues(&window, &cfg.feedback, &ctx);
                log::info!("push-up {} scored {:.0}, cues {:?}", index, score, cues);
                Some(RepResult {
                    index,
                    kind: RepKind::Full,
                    concentric_s: window.from_bottom(),
                    eccentric_s: window.to_bottom(),
                    duration_s: window.duration(),
                    score: Some(score),
                    tier: None,
                    cues,
                })
            }
            RepOutcome::Partial { start, turn, end } => {
                log::info!("push-up {} counted as partial ({:.2}s)", index, end - start);
                Some(partial_rep(index, start, turn, end))
            }
            RepOutcome::Discarded(_) => None,
        }
    }
}

impl ExerciseEngine for PushupEngine {
    type State = PushupState;

    fn initial_state(&self) -> PushupState {
        PushupState {
            tracker: Tracker::new(&self.config),
            machine: PushupMachine::new(),
            ledger: RepLedger::default(),
        }
    }

    fn update(&self, mut state: PushupState, frame: &JointFrame) -> (PushupState, FrameOutput) {
        let t = frame.timestamp;
        let (left, right) = (plank_chain(Side::Left), plank_chain(Side::Right));
        let groups: [&[JointName]; 2] = [&left, &right];
        let obs = state.tracker.observe(frame, self.config.pushup.visibility, &groups);

        // The dropout frame is usually empty too; abandon before bailing out
        let measured = obs.raw.any_finite();
        let outcome = if obs.gate_dropped {
            state.machine.abandon(t)
        } else if obs.gate_open && measured {
            let mode = choose_mode(&obs.orientation, self.arms(frame));
            state.machine.update(t, &obs.smoothed, mode, &self.config.pushup)
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

        let report = FrameReport {
            timestamp: t,
            angles: state.tracker.bank().display(&DISPLAY),
            orientation: obs.orientation,
            gate_open: obs.gate_open,
            phase: PhaseReport::Pushup {
                phase: state.machine.phase(),
            },
            rep_count: state.ledger.count(),
            new_rep,
            last_rep: state.ledger.last().cloned(),
        };
        (state, FrameOutput::Tracked(report))
    }
}
