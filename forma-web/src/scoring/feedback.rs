//! Discrete coaching cues
//!
//! Plain threshold checks over the same closed window the continuous scorer
//! reads. Evaluation order is the output order: depth, lockout, range
//! fallback, secondary joint, trunk, tempo, asymmetry.

use super::context::ScoringContext;
use super::continuous::{
    elbow_asymmetry, hip_deviation, narrowest_range, shallowest_min, shoulder_swing, weakest_max,
};
use super::cues::Cue;
use super::window::ClosedWindow;
use crate::config::{CurlFeedback, PushupFeedback};
use crate::signal::Channel;

pub fn curl_cues(window: &ClosedWindow, cfg: &CurlFeedback, ctx: &ScoringContext) -> Vec<Cue> {
    let mut cues = Vec::new();

    let depth = shallowest_min(window, ctx) > cfg.max_top_angle;
    let lockout = weakest_max(window, ctx) < cfg.min_lockout_angle;
    if depth {
        cues.push(Cue::IncompleteCurl);
    }
    if lockout {
        cues.push(Cue::IncompleteExtension);
    }
    if !depth && !lockout && narrowest_range(window, ctx) < cfg.min_range {
        cues.push(Cue::IncompleteRange);
    }

    if ctx.secondary_reliable() && shoulder_swing(window) > cfg.max_shoulder_swing {
        cues.push(Cue::ElbowDrift);
    }

    if window.range(Channel::TorsoLean) > cfg.max_torso_sway {
        cues.push(Cue::TorsoSwing);
    }

    if window.to_bottom() < cfg.min_concentric_s {
        cues.push(Cue::RushedLift);
    }
    if window.from_bottom() < cfg.min_eccentric_s {
        cues.push(Cue::FastLowering);
    }

    if ctx.symmetry_reliable() && elbow_asymmetry(window) > cfg.max_asymmetry {
        cues.push(Cue::UnevenArms);
    }

    cues
}

pub fn pushup_cues(window: &ClosedWindow, cfg: &PushupFeedback, ctx: &ScoringContext) -> Vec<Cue> {
    let mut cues = Vec::new();

    let depth = shallowest_min(window, ctx) > cfg.max_bottom_angle;
    let lockout = weakest_max(window, ctx) < cfg.min_lockout_angle;
    if depth {
        cues.push(Cue::ShallowPushup);
    }
    if lockout {
        cues.push(Cue::NoLockout);
    }
    if !depth && !lockout && narrowest_range(window, ctx) < cfg.min_range {
        cues.push(Cue::IncompleteRange);
    }

    // sag and pike in one rep: the larger one wins
    let (sag, pike) = hip_deviation(window);
    if sag > cfg.max_sag && sag >= pike {
        cues.push(Cue::HipSag);
    } else if pike > cfg.max_pike {
        cues.push(Cue::HipPike);
    }

    if window.to_bottom() < cfg.min_eccentric_s {
        cues.push(Cue::FastLowering);
    }
    if window.from_bottom() < cfg.min_concentric_s {
        cues.push(Cue::RushedLift);
    }

    if ctx.symmetry_reliable() && elbow_asymmetry(window) > cfg.max_asymmetry {
        cues.push(Cue::UnevenArms);
    }

    cues
}
