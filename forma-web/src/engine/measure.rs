//! Raw angle channels from one joint frame
//!
//! Every channel whose joints are not all visible is NaN.

use crate::kinematics::{
    inclination_from_vertical, joint_angle, mean_confidence, midpoint, sagittal_angle,
    shoulder_flexion, signed_line_deviation, signed_vertical_angle, visible_joint,
};
use crate::pose::{arm, leg, Joint, JointFrame, JointName, Side};
use crate::signal::{Channel, ChannelValues};

pub fn measure(frame: &JointFrame, visibility: f32) -> ChannelValues {
    let mut values = ChannelValues::default();
    let joint = |name| visible_joint(frame, name, visibility);

    let shoulders = match (joint(JointName::LeftShoulder), joint(JointName::RightShoulder)) {
        (Some(l), Some(r)) => Some((l, r)),
        _ => None,
    };

    for side in [Side::Left, Side::Right] {
        let chain = arm(side);
        let (hip, shoulder, elbow, wrist) = (
            joint(chain.hip),
            joint(chain.shoulder),
            joint(chain.elbow),
            joint(chain.wrist),
        );

        if let (Some(s), Some(e), Some(w)) = (shoulder, elbow, wrist) {
            values.set(Channel::elbow(side), joint_angle(s, e, w));
        }

        if let (Some(h), Some(s), Some(e)) = (hip, shoulder, elbow) {
            let flexion = match shoulders {
                Some(pair) => sagittal_angle(h, s, e, pair),
                None => shoulder_flexion(h, s, e),
            };
            values.set(Channel::shoulder(side), flexion);
        }

        let legs = leg(side);
        if let (Some(h), Some(k), Some(a)) = (joint(legs.hip), joint(legs.knee), joint(legs.ankle)) {
            values.set(Channel::knee(side), joint_angle(h, k, a));
        }
    }

    if let Some((hip, shoulder)) = torso(frame, visibility) {
        let front = match joint(JointName::Nose) {
            Some(nose) if nose.x < shoulder.x => -1.0,
            _ => 1.0,
        };
        values.set(Channel::TorsoLean, signed_vertical_angle(&hip, &shoulder, front));
        values.set(Channel::TorsoInclination, inclination_from_vertical(&hip, &shoulder));
    }

    if let Some(line) = body_line(frame, visibility) {
        values.set(Channel::HipLine, line);
    }

    values
}

/// Hip and shoulder centers; a single visible side stands in for both
fn torso(frame: &JointFrame, visibility: f32) -> Option<(Joint, Joint)> {
    let joint = |name| visible_joint(frame, name, visibility);
    let center = |a: Option<&Joint>, b: Option<&Joint>| match (a, b) {
        (Some(a), Some(b)) => Some(midpoint(a, b)),
        (Some(one), None) | (None, Some(one)) => Some(*one),
        (None, None) => None,
    };
    let hip = center(joint(JointName::LeftHip), joint(JointName::RightHip))?;
    let shoulder = center(joint(JointName::LeftShoulder), joint(JointName::RightShoulder))?;
    Some((hip, shoulder))
}

/// Signed shoulder-hip-ankle deviation on the most confident full side
fn body_line(frame: &JointFrame, visibility: f32) -> Option<f32> {
    [Side::Left, Side::Right]
        .into_iter()
        .filter_map(|side| {
            let chain = leg(side);
            let names = [chain.shoulder, chain.hip, chain.ankle];
            let s = visible_joint(frame, chain.shoulder, visibility)?;
            let h = visible_joint(frame, chain.hip, visibility)?;
            let a = visible_joint(frame, chain.ankle, visibility)?;
            Some((mean_confidence(frame, &names), signed_line_deviation(s, h, a)))
        })
        .max_by(|x, y| x.0.total_cmp(&y.0))
        .map(|(_, line)| line)
}
