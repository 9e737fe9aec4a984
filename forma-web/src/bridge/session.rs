//! Session store and JS entry points
//!
//! One exercise set per page. JavaScript starts a set, pushes one flat
//! landmark array per camera frame and reads back JSON-shaped snapshots.
//! The `*_inner` functions hold all logic so they can be tested natively;
//! the `#[wasm_bindgen]` wrappers only convert values.

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::engine::{FrameOutput, Session, SessionKind};
use crate::scoring::{FormTier, RepKind, RepResult};

use super::error::BridgeError;
use super::frames::{frame_from_flat, FRAME_LEN};
use super::messages::rep_messages;

// ============================================================================
// SESSION STORE
// ============================================================================

struct ActiveSet {
    session: Session,
    history: Vec<RepResult>,
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static SESSION: RefCell<Option<ActiveSet>> = RefCell::new(None);
}

fn with_set<T>(f: impl FnOnce(&mut ActiveSet) -> T) -> Result<T, BridgeError> {
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f).ok_or(BridgeError::NoSession))
}

// ============================================================================
// SNAPSHOT TYPES
// ============================================================================

/// One rep as shown to the user
#[derive(Clone, Debug, Serialize)]
pub struct RepView {
    pub index: u32,
    pub kind: RepKind,
    pub score: Option<f32>,
    pub tier: Option<FormTier>,
    pub duration_s: f32,
    pub messages: Vec<&'static str>,
}

impl From<&RepResult> for RepView {
    fn from(rep: &RepResult) -> Self {
        Self {
            index: rep.index,
            kind: rep.kind,
            score: rep.score,
            tier: rep.tier,
            duration_s: rep.duration_s,
            messages: rep_messages(&rep.cues),
        }
    }
}

/// Aggregate of a finished set; persisting it is the caller's job
#[derive(Clone, Debug, Serialize)]
pub struct SetSummary {
    pub exercise: &'static str,
    pub reps: u32,
    pub partial_reps: u32,
    /// Mean over scored reps only
    pub mean_score: Option<f32>,
    pub rep_details: Vec<RepView>,
}

impl SetSummary {
    pub fn from_history(kind: SessionKind, history: &[RepResult]) -> Self {
        let scores: Vec<f32> = history.iter().filter_map(|r| r.score).collect();
        let mean_score = (!scores.is_empty()).then(|| scores.iter().sum::<f32>() / scores.len() as f32);
        Self {
            exercise: kind.as_str(),
            reps: history.len() as u32,
            partial_reps: history.iter().filter(|r| r.kind == RepKind::Partial).count() as u32,
            mean_score,
            rep_details: history.iter().map(RepView::from).collect(),
        }
    }
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Replace any running set with a fresh one
pub fn start_session_inner(exercise: &str, config_json: Option<&str>) -> Result<SessionKind, BridgeError> {
    let kind = SessionKind::from_name(exercise)
        .ok_or_else(|| BridgeError::UnknownExercise(exercise.to_string()))?;
    let config = match config_json {
        Some(json) if !json.trim().is_empty() => EngineConfig::from_json(json)?,
        _ => EngineConfig::default(),
    };

    SESSION.with(|cell| {
        let previous = cell.borrow_mut().replace(ActiveSet {
            session: Session::new(kind, config),
            history: Vec::new(),
        });
        if previous.is_some() {
            log::warn!("previous set discarded by start_session");
        }
    });
    log::info!("{} session started", kind.as_str());
    Ok(kind)
}

pub fn push_frame_inner(data: &[f32], timestamp_ms: f64) -> Result<FrameOutput, BridgeError> {
    let frame = frame_from_flat(data, timestamp_ms)?;
    with_set(|set| {
        let output = set.session.step(&frame);
        if let Some(rep) = output.new_rep() {
            set.history.push(rep.clone());
        }
        output
    })
}

pub fn rep_count_inner() -> Result<u32, BridgeError> {
    with_set(|set| set.session.rep_count())
}

pub fn last_rep_inner() -> Result<Option<RepView>, BridgeError> {
    with_set(|set| set.session.last_rep().map(RepView::from))
}

/// Close the set and return its summary
pub fn end_session_inner() -> Result<SetSummary, BridgeError> {
    let set = SESSION
        .with(|cell| cell.borrow_mut().take())
        .ok_or(BridgeError::NoSession)?;
    let summary = SetSummary::from_history(set.session.kind(), &set.history);
    log::info!(
        "{} set ended: {} reps ({} partial)",
        summary.exercise,
        summary.reps,
        summary.partial_reps
    );
    Ok(summary)
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| BridgeError::Serialize(e.to_string()).into())
}

/// `exercise` is "curl", "pushup" or "generic"; `config_json` overrides
/// any subset of the default tables
#[wasm_bindgen]
pub fn start_session(exercise: &str, config_json: Option<String>) -> Result<(), JsValue> {
    start_session_inner(exercise, config_json.as_deref())?;
    Ok(())
}

/// Called from JavaScript with a flat Float32Array of 132 values
/// (33 landmarks x 4: x, y, z, visibility)
#[wasm_bindgen]
pub fn push_frame(data: &[f32], timestamp_ms: f64) -> Result<JsValue, JsValue> {
    if data.len() != FRAME_LEN {
        web_sys::console::warn_1(
            &format!("Invalid landmark data length: {} (expected {})", data.len(), FRAME_LEN).into(),
        );
    }
    let output = push_frame_inner(data, timestamp_ms)?;
    to_js(&output)
}

/// Reps counted so far, 0 without a session
#[wasm_bindgen]
pub fn rep_count() -> u32 {
    rep_count_inner().unwrap_or(0)
}

#[wasm_bindgen]
pub fn last_rep() -> Result<JsValue, JsValue> {
    let rep = last_rep_inner()?;
    to_js(&rep)
}

#[wasm_bindgen]
pub fn end_session() -> Result<JsValue, JsValue> {
    let summary = end_session_inner()?;
    to_js(&summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Cue;

    fn rep(index: u32, score: Option<f32>, cues: Vec<Cue>) -> RepResult {
        RepResult {
            index,
            kind: if score.is_some() { RepKind::Full } else { RepKind::Partial },
            concentric_s: 0.5,
            eccentric_s: 0.7,
            duration_s: 1.2,
            score,
            tier: None,
            cues,
        }
    }

    #[test]
    fn test_summary_skips_partials_in_mean() {
        let history = [
            rep(1, Some(90.0), vec![]),
            rep(2, None, vec![Cue::PartialRep]),
            rep(3, Some(70.0), vec![Cue::TorsoSwing]),
        ];
        let summary = SetSummary::from_history(SessionKind::Curl, &history);
        assert_eq!(summary.reps, 3);
        assert_eq!(summary.partial_reps, 1);
        assert_eq!(summary.mean_score, Some(80.0));
        assert_eq!(summary.rep_details[0].messages, vec!["Great rep!"]);
        assert_eq!(summary.exercise, "curl");
    }

    #[test]
    fn test_empty_summary() {
        let summary = SetSummary::from_history(SessionKind::Pushup, &[]);
        assert_eq!(summary.reps, 0);
        assert!(summary.mean_score.is_none());
    }

    #[test]
    fn test_session_lifecycle() {
        assert!(matches!(rep_count_inner(), Err(BridgeError::NoSession)));
        assert!(matches!(
            start_session_inner("rowing", None),
            Err(BridgeError::UnknownExercise(_))
        ));
        assert!(matches!(
            start_session_inner("curl", Some("{\"smoothing\": {\"alpha\": 0.0}}")),
            Err(BridgeError::Config(_))
        ));

        assert_eq!(start_session_inner("curl", Some("")).unwrap(), SessionKind::Curl);
        assert!(matches!(
            push_frame_inner(&[0.0; 12], 0.0),
            Err(BridgeError::BadFrameLength { got: 12, .. })
        ));
        let out = push_frame_inner(&[0.5; FRAME_LEN], 33.0).unwrap();
        assert_eq!(out.rep_count(), 0);
        assert_eq!(rep_count_inner().unwrap(), 0);
        assert!(last_rep_inner().unwrap().is_none());

        let summary = end_session_inner().unwrap();
        assert_eq!(summary.reps, 0);
        assert!(matches!(end_session_inner(), Err(BridgeError::NoSession)));
    }
}
