//! Generic engine: vote-stable exercise detection plus a two-phase counter
//!
//! Reps carry a coarse form tier instead of a continuous score. Switching
//! exercise mid-set restarts the counter but not the set's rep total.

use crate::classifier::{extract_features, CountedRep, ExerciseDetector, ExerciseKind, TwoPhaseCounter};
use crate::config::EngineConfig;
use crate::pose::{JointName, JointFrame, LEFT_ARM, LEFT_LEG, RIGHT_ARM, RIGHT_LEG};
use crate::scoring::{RepKind, RepResult};
use crate::signal::Channel;

use super::output::{FrameOutput, FrameReport, PhaseReport};
use super::pipeline::{RepLedger, Tracker};
use super::ExerciseEngine;

const DISPLAY: [Channel; 5] = [
    Channel::LeftElbow,
    Channel::RightElbow,
    Channel::LeftKnee,
    Channel::RightKnee,
    Channel::TorsoInclination,
];

#[derive(Clone, Debug)]
pub struct GenericState {
    tracker: Tracker,
    detector: ExerciseDetector,
    counter: TwoPhaseCounter,
    /// Exercise the counter is running for
    counting: Option<ExerciseKind>,
    ledger: RepLedger,
}

impl GenericState {
    pub fn rep_count(&self) -> u32 {
        self.ledger.count()
    }

    pub fn last_rep(&self) -> Option<&RepResult> {
        self.ledger.last()
    }

    pub fn detected(&self) -> Option<ExerciseKind> {
        self.detector.current()
    }
}

pub struct GenericEngine {
    config: EngineConfig,
}

impl GenericEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn to_result(kind: ExerciseKind, rep: CountedRep, index: u32) -> RepResult {
        let into_turn = (rep.deepest_at - rep.start) as f32;
        let out_of_turn = (rep.end - rep.deepest_at) as f32;
        let (concentric_s, eccentric_s) = if kind.lifts_into_contraction() {
            (into_turn, out_of_turn)
        } else {
            (out_of_turn, into_turn)
        };
        log::info!("{} rep {} graded {:?}", kind.as_str(), index, rep.tier);
        RepResult {
            index,
            kind: RepKind::Full,
            concentric_s,
            eccentric_s,
            duration_s: (rep.end - rep.start) as f32,
            score: None,
            tier: Some(rep.tier),
            cues: Vec::new(),
        }
    }
}

impl ExerciseEngine for GenericEngine {
    type State = GenericState;

    fn initial_state(&self) -> GenericState {
        GenericState {
            tracker: Tracker::new(&self.config),
            detector: ExerciseDetector::new(&self.config.generic),
            counter: TwoPhaseCounter::new(),
            counting: None,
            ledger: RepLedger::default(),
        }
    }

    fn update(&self, mut state: GenericState, frame: &JointFrame) -> (GenericState, FrameOutput) {
        let t = frame.timestamp;
        let cfg = &self.config.generic;
        let chains = [
            LEFT_ARM.joints(),
            RIGHT_ARM.joints(),
            LEFT_LEG.joints(),
            RIGHT_LEG.joints(),
        ];
        let groups: Vec<&[JointName]> = chains.iter().map(|c| c.as_slice()).collect();
        let obs = state.tracker.observe(frame, cfg.visibility, &groups);

        // The dropout frame is usually empty too; reset before bailing out
        if obs.gate_dropped {
            state.counter.reset();
        }
        if !obs.raw.any_finite() {
            let output = FrameOutput::NoAngles {
                timestamp: t,
                rep_count: state.ledger.count(),
            };
            return (state, output);
        }

        let features = extract_features(frame, &obs.smoothed, cfg.visibility);
        let detected = state.detector.update(&features, cfg);
        if detected != state.counting {
            state.counter.reset();
            state.counting = detected;
        }

        let mut new_rep = None;
        if let (true, Some(kind)) = (obs.gate_open, state.counting) {
            let angle = match kind {
                ExerciseKind::Squat => features.knee,
                ExerciseKind::PushUp | ExerciseKind::BicepCurl => features.elbow,
            };
            let posture = obs.smoothed.get(kind.posture_channel()).abs();
            if let Some(rep) = state.counter.update(t, angle, posture, kind.thresholds(cfg)) {
                let result = Self::to_result(kind, rep, state.ledger.next_index());
                new_rep = Some(state.ledger.record(result));
            }
        }

        let report = FrameReport {
            timestamp: t,
            angles: state.tracker.bank().display(&DISPLAY),
            orientation: obs.orientation,
            gate_open: obs.gate_open,
            phase: PhaseReport::Generic {
                detected: state.counting,
                phase: state.counter.phase(),
            },
            rep_count: state.ledger.count(),
            new_rep,
            last_rep: state.ledger.last().cloned(),
        };
        (state, FrameOutput::Tracked(report))
    }
}
