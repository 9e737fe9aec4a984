//! Engine module - per-exercise update functions over explicit state
//!
//! Each engine is immutable configuration; all per-set state lives in the
//! `State` value the caller threads through `update`. Two sessions never
//! share state.

mod curl;
mod generic;
mod measure;
mod output;
mod pipeline;
mod pushup;

pub use curl::{CurlEngine, CurlState};
pub use generic::{GenericEngine, GenericState};
pub use measure::measure;
pub use output::{FrameOutput, FrameReport, PhaseReport};
pub use pipeline::{partial_rep, Observation, RepLedger, Tracker};
pub use pushup::{PushupEngine, PushupState};

use crate::config::EngineConfig;
use crate::pose::JointFrame;
use crate::scoring::RepResult;

/// One exercise's pure per-frame step
pub trait ExerciseEngine {
    type State;

    /// Fresh state for a new set
    fn initial_state(&self) -> Self::State;

    /// Consume the previous state and one frame, return the next state
    fn update(&self, state: Self::State, frame: &JointFrame) -> (Self::State, FrameOutput);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    Curl,
    Pushup,
    Generic,
}

impl SessionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "curl" | "bicep_curl" | "bicep-curl" => Some(SessionKind::Curl),
            "pushup" | "push_up" | "push-up" => Some(SessionKind::Pushup),
            "generic" | "auto" => Some(SessionKind::Generic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Curl => "curl",
            SessionKind::Pushup => "pushup",
            SessionKind::Generic => "generic",
        }
    }
}

/// An engine together with the state of its current set
pub struct Runner<E: ExerciseEngine> {
    engine: E,
    state: E::State,
}

impl<E: ExerciseEngine> Runner<E> {
    pub fn new(engine: E) -> Self {
        let state = engine.initial_state();
        Self { engine, state }
    }

    pub fn step(&mut self, frame: &JointFrame) -> FrameOutput {
        let state = std::mem::replace(&mut self.state, self.engine.initial_state());
        let (next, output) = self.engine.update(state, frame);
        self.state = next;
        output
    }

    pub fn state(&self) -> &E::State {
        &self.state
    }
}

/// Closed set of engines a caller can drive
pub enum Session {
    Curl(Runner<CurlEngine>),
    Pushup(Runner<PushupEngine>),
    Generic(Runner<GenericEngine>),
}

impl Session {
    pub fn new(kind: SessionKind, config: EngineConfig) -> Self {
        match kind {
            SessionKind::Curl => Session::Curl(Runner::new(CurlEngine::new(config))),
            SessionKind::Pushup => Session::Pushup(Runner::new(PushupEngine::new(config))),
            SessionKind::Generic => Session::Generic(Runner::new(GenericEngine::new(config))),
        }
    }

    pub fn kind(&self) -> SessionKind {
        match self {
            Session::Curl(_) => SessionKind::Curl,
            Session::Pushup(_) => SessionKind::Pushup,
            Session::Generic(_) => SessionKind::Generic,
        }
    }

    pub fn step(&mut self, frame: &JointFrame) -> FrameOutput {
        match self {
            Session::Curl(runner) => runner.step(frame),
            Session::Pushup(runner) => runner.step(frame),
            Session::Generic(runner) => runner.step(frame),
        }
    }

    pub fn rep_count(&self) -> u32 {
        match self {
            Session::Curl(runner) => runner.state().rep_count(),
            Session::Pushup(runner) => runner.state().rep_count(),
            Session::Generic(runner) => runner.state().rep_count(),
        }
    }

    pub fn last_rep(&self) -> Option<&RepResult> {
        match self {
            Session::Curl(runner) => runner.state().last_rep(),
            Session::Pushup(runner) => runner.state().last_rep(),
            Session::Generic(runner) => runner.state().last_rep(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_kind_names() {
        assert_eq!(SessionKind::from_name("Bicep_Curl"), Some(SessionKind::Curl));
        assert_eq!(SessionKind::from_name(" push-up "), Some(SessionKind::Pushup));
        assert_eq!(SessionKind::from_name("auto"), Some(SessionKind::Generic));
        assert_eq!(SessionKind::from_name("deadlift"), None);
    }

    #[test]
    fn test_session_steps_empty_frames() {
        let mut session = Session::new(SessionKind::Pushup, EngineConfig::default());
        assert_eq!(session.kind(), SessionKind::Pushup);
        let out = session.step(&JointFrame::new(0.0));
        assert!(out.report().is_none());
        assert_eq!(session.rep_count(), 0);
        assert!(session.last_rep().is_none());
    }
}
