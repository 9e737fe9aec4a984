mod common;

use common::{cosine_rep, gap, hold, new_reps, plank_frame, run, timed, with_gaps};
use forma_web::engine::{PushupEngine, Session, SessionKind};
use forma_web::fsm::PushupPhase;
use forma_web::pose::JointFrame;
use forma_web::scoring::{Cue, RepKind};
use forma_web::EngineConfig;

fn plank_frames(angles: &[f32]) -> Vec<JointFrame> {
    timed(angles).map(|(t, a)| plank_frame(t, a)).collect()
}

#[test]
fn test_partial_then_full_rep() {
    let mut trace = hold(170.0, 1.5);
    trace.extend(cosine_rep(170.0, 120.0, 0.8));
    trace.extend(hold(170.0, 0.5));
    trace.extend(cosine_rep(170.0, 70.0, 1.4));
    trace.extend(hold(170.0, 1.0));

    let engine = PushupEngine::new(EngineConfig::default());
    let (state, outputs) = run(&engine, plank_frames(&trace));
    let reps = new_reps(&outputs);

    assert_eq!(state.rep_count(), 2);
    assert_eq!(reps.len(), 2);

    assert_eq!(reps[0].kind, RepKind::Partial);
    assert!(reps[0].score.is_none());
    assert_eq!(reps[0].cues, vec![Cue::PartialRep]);

    assert_eq!(reps[1].kind, RepKind::Full);
    assert_eq!(reps[1].index, 2);
    assert!(reps[1].score.is_some());
    assert!(!reps[1].cues.contains(&Cue::PartialRep));
    assert_eq!(state.machine().phase(), PushupPhase::Plank);
}

#[test]
fn test_dips_before_hold_do_not_count() {
    // dipping straight away, before the plank has been held long enough
    let mut trace = hold(170.0, 0.5);
    trace.extend(cosine_rep(170.0, 70.0, 1.4));
    trace.extend(hold(170.0, 0.2));

    let engine = PushupEngine::new(EngineConfig::default());
    let (state, _) = run(&engine, plank_frames(&trace));
    assert_eq!(state.rep_count(), 0);
}

#[test]
fn test_session_drives_pushups() {
    let mut trace = hold(170.0, 1.5);
    trace.extend(cosine_rep(170.0, 70.0, 1.4));
    trace.extend(hold(170.0, 1.0));

    let mut session = Session::new(SessionKind::Pushup, EngineConfig::default());
    for frame in plank_frames(&trace) {
        session.step(&frame);
    }
    assert_eq!(session.rep_count(), 1);
    assert_eq!(session.last_rep().map(|r| r.kind), Some(RepKind::Full));
}

#[test]
fn test_tracking_loss_mid_descent_disarms() {
    let mut trace = hold(170.0, 1.5);
    let rep = cosine_rep(170.0, 70.0, 1.4);
    trace.extend_from_slice(&rep[..rep.len() / 2]);
    trace.extend(gap(2.0));
    trace.extend(hold(170.0, 2.5));

    let engine = PushupEngine::new(EngineConfig::default());
    let (state, outputs) = run(&engine, with_gaps(&trace, plank_frame));

    assert_eq!(state.rep_count(), 0);
    assert!(new_reps(&outputs).is_empty());
    // re-armed by a fresh plank hold, with nothing carried over
    assert_eq!(state.machine().phase(), PushupPhase::Plank);
}
