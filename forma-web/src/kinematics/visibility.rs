//! Visibility thresholding
//!
//! Thresholds are passed in per call site: different exercises tolerate
//! different occlusion patterns.

use crate::pose::{Joint, JointFrame, JointName};

pub fn is_visible(joint: Option<&Joint>, threshold: f32) -> bool {
    matches!(joint, Some(j) if j.confidence > threshold)
}

/// Look up a joint and return it only if it clears the threshold
pub fn visible_joint(frame: &JointFrame, name: JointName, threshold: f32) -> Option<&Joint> {
    frame.get(name).filter(|j| j.confidence > threshold)
}

pub fn all_visible(frame: &JointFrame, names: &[JointName], threshold: f32) -> bool {
    names
        .iter()
        .all(|name| is_visible(frame.get(*name), threshold))
}

/// Mean confidence over `names`; missing joints count as zero
pub fn mean_confidence(frame: &JointFrame, names: &[JointName]) -> f32 {
    if names.is_empty() {
        return 0.0;
    }
    let total: f32 = names
        .iter()
        .map(|name| frame.get(*name).map_or(0.0, |j| j.confidence))
        .sum();
    total / names.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> JointFrame {
        JointFrame::from_joints(
            0.0,
            [
                Joint::new(JointName::LeftShoulder, 0.4, 0.3, 0.9),
                Joint::new(JointName::LeftElbow, 0.4, 0.5, 0.2),
            ],
        )
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let f = frame();
        assert!(is_visible(f.get(JointName::LeftElbow), 0.1));
        assert!(!is_visible(f.get(JointName::LeftElbow), 0.2));
        assert!(!is_visible(None, 0.0));
    }

    #[test]
    fn test_visible_joint_filters() {
        let f = frame();
        assert!(visible_joint(&f, JointName::LeftShoulder, 0.5).is_some());
        assert!(visible_joint(&f, JointName::LeftElbow, 0.5).is_none());
        assert!(visible_joint(&f, JointName::LeftWrist, 0.0).is_none());
    }

    #[test]
    fn test_mean_confidence_counts_missing_as_zero() {
        let f = frame();
        let names = [JointName::LeftShoulder, JointName::LeftElbow, JointName::LeftWrist];
        assert!((mean_confidence(&f, &names) - (1.1 / 3.0)).abs() < 1e-6);
        assert!(all_visible(&f, &names[..1], 0.5));
        assert!(!all_visible(&f, &names, 0.1));
    }
}
