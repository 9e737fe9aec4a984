//! Coaching text for each cue
//!
//! The only place cue values turn into strings.

use crate::scoring::Cue;

pub const GREAT_REP: &str = "Great rep!";

pub fn cue_text(cue: Cue) -> &'static str {
    match cue {
        Cue::IncompleteCurl => "Curl higher, bring the weight to your shoulders",
        Cue::ShallowPushup => "Go lower, chest toward the floor",
        Cue::IncompleteExtension => "Lower all the way, straighten your arms",
        Cue::NoLockout => "Push all the way up and lock out",
        Cue::IncompleteRange => "Use your full range of motion",
        Cue::ElbowDrift => "Keep your elbows pinned to your sides",
        Cue::TorsoSwing => "Stop swinging, keep your torso still",
        Cue::HipSag => "Hips are sagging, squeeze your core",
        Cue::HipPike => "Hips too high, straighten your body",
        Cue::RushedLift => "Slow down on the way up",
        Cue::FastLowering => "Control the way down",
        Cue::UnevenArms => "Move both arms evenly",
        Cue::PartialRep => "Partial rep, go deeper",
    }
}

/// Ordered messages for one rep; nothing to correct reads as praise
pub fn rep_messages(cues: &[Cue]) -> Vec<&'static str> {
    if cues.is_empty() {
        vec![GREAT_REP]
    } else {
        cues.iter().map(|c| cue_text(*c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_praise() {
        assert_eq!(rep_messages(&[]), vec![GREAT_REP]);
    }

    #[test]
    fn test_order_is_kept() {
        let msgs = rep_messages(&[Cue::HipSag, Cue::FastLowering]);
        assert_eq!(msgs.len(), 2);
        assert!(msgs[0].contains("sagging"));
        assert!(msgs[1].contains("down"));
    }
}
