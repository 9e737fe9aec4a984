//! Posture features for exercise classification
//!
//! Angles come from the smoothed channels; the coarse geometric gates
//! (elbow placement, hip/knee/ankle stacking, shoulder-hip level) are read
//! straight from the frame.

use crate::kinematics::visible_joint;
use crate::pose::{arm, leg, JointFrame, Side};
use crate::signal::{Channel, ChannelValues};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostureFeatures {
    /// Mean of the finite elbow angles
    pub elbow: f32,
    /// Mean of the finite knee angles
    pub knee: f32,
    /// Torso angle from vertical, 0 = upright
    pub inclination: f32,
    /// Smallest horizontal elbow-to-shoulder offset over torso length
    pub elbow_offset: f32,
    /// Some visible elbow sits below its shoulder
    pub elbow_below_shoulder: bool,
    /// Vertical shoulder-to-hip gap in frame units
    pub level_gap: f32,
    /// Some side has hip above knee above ankle
    pub stacked: bool,
}

fn mean_finite(a: f32, b: f32) -> f32 {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => (a + b) * 0.5,
        (true, false) => a,
        (false, true) => b,
        (false, false) => f32::NAN,
    }
}

/// Extract posture features from the current frame
///
/// Sides with any joint at or below `visibility` are skipped; a feature no
/// side can provide is NaN (or false for the boolean gates).
pub fn extract_features(frame: &JointFrame, smoothed: &ChannelValues, visibility: f32) -> PostureFeatures {
    let mut elbow_offset = f32::NAN;
    let mut elbow_below_shoulder = false;
    let mut level_gap = f32::NAN;
    let mut stacked = false;

    for side in [Side::Left, Side::Right] {
        let chain = arm(side);
        let joint = |name| visible_joint(frame, name, visibility);

        if let (Some(hip), Some(shoulder), Some(elbow)) =
            (joint(chain.hip), joint(chain.shoulder), joint(chain.elbow))
        {
            let torso = (shoulder.y - hip.y).abs().max(1e-3);
            let offset = (elbow.x - shoulder.x).abs() / torso;
            elbow_offset = elbow_offset.min(offset);
            elbow_below_shoulder |= elbow.y > shoulder.y;
        }

        if let (Some(hip), Some(shoulder)) = (joint(chain.hip), joint(chain.shoulder)) {
            level_gap = level_gap.min((shoulder.y - hip.y).abs());
        }

        let legs = leg(side);
        if let (Some(hip), Some(knee), Some(ankle)) =
            (joint(legs.hip), joint(legs.knee), joint(legs.ankle))
        {
            stacked |= hip.y < knee.y && knee.y < ankle.y;
        }
    }

    PostureFeatures {
        elbow: mean_finite(
            smoothed.get(Channel::LeftElbow),
            smoothed.get(Channel::RightElbow),
        ),
        knee: mean_finite(
            smoothed.get(Channel::LeftKnee),
            smoothed.get(Channel::RightKnee),
        ),
        inclination: smoothed.get(Channel::TorsoInclination),
        elbow_offset,
        elbow_below_shoulder,
        level_gap,
        stacked,
    }
}
