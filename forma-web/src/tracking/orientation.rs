//! Camera-relative orientation from shoulder depth asymmetry
//!
//! 0° when the shoulders are side by side (facing the camera), towards 90°
//! as one shoulder recedes (side view). The estimate holds its last value
//! whenever the shoulders are not jointly visible, so a single bad frame
//! can never snap the zone back to frontal.

use serde::Serialize;

use crate::config::OrientationConfig;
use crate::kinematics::visible_joint;
use crate::pose::{JointFrame, JointName, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationZone {
    Frontal,
    Oblique,
    Side,
}

/// Which side of the body faces the camera
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimarySide {
    Left,
    Right,
    Both,
}

impl PrimarySide {
    /// The single leading side, if one leads
    pub fn side(self) -> Option<Side> {
        match self {
            PrimarySide::Left => Some(Side::Left),
            PrimarySide::Right => Some(Side::Right),
            PrimarySide::Both => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OrientationEstimate {
    /// NaN when the shoulders were not usable this frame
    pub raw_angle_deg: f32,
    pub smoothed_angle_deg: f32,
    pub zone: OrientationZone,
    pub primary_side: PrimarySide,
}

impl OrientationEstimate {
    pub fn frontal() -> Self {
        Self {
            raw_angle_deg: f32::NAN,
            smoothed_angle_deg: 0.0,
            zone: OrientationZone::Frontal,
            primary_side: PrimarySide::Both,
        }
    }

    pub fn is_frontal(&self) -> bool {
        self.zone == OrientationZone::Frontal
    }
}

#[derive(Clone, Debug)]
pub struct OrientationEstimator {
    config: OrientationConfig,
    smoothed: Option<f32>,
    current: OrientationEstimate,
}

impl OrientationEstimator {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            config,
            smoothed: None,
            current: OrientationEstimate::frontal(),
        }
    }

    pub fn update(&mut self, frame: &JointFrame) -> OrientationEstimate {
        let Some((raw, depth_delta)) = self.measure(frame) else {
            self.current.raw_angle_deg = f32::NAN;
            return self.current;
        };

        let alpha = self.config.alpha;
        let smoothed = match self.smoothed {
            Some(previous) => alpha * raw + (1.0 - alpha) * previous,
            None => raw,
        };
        self.smoothed = Some(smoothed);

        // depth_delta = left.z - right.z; smaller z is closer to the camera
        let primary_side = if depth_delta.abs() <= self.config.depth_epsilon {
            PrimarySide::Both
        } else if depth_delta < 0.0 {
            PrimarySide::Left
        } else {
            PrimarySide::Right
        };

        let zone = self.classify(smoothed);
        if zone != self.current.zone {
            log::debug!(
                "orientation zone {:?} -> {:?} at {:.1}°",
                self.current.zone,
                zone,
                smoothed
            );
        }

        self.current = OrientationEstimate {
            raw_angle_deg: raw,
            smoothed_angle_deg: smoothed,
            zone,
            primary_side,
        };
        self.current
    }

    pub fn current(&self) -> OrientationEstimate {
        self.current
    }

    /// Raw rotation and signed depth difference, if both shoulders carry depth
    fn measure(&self, frame: &JointFrame) -> Option<(f32, f32)> {
        let threshold = self.config.visibility;
        let left = visible_joint(frame, JointName::LeftShoulder, threshold)?;
        let right = visible_joint(frame, JointName::RightShoulder, threshold)?;
        let depth_delta = left.z? - right.z?;
        let horizontal = (left.x - right.x).abs();

        if horizontal == 0.0 && depth_delta == 0.0 {
            return None;
        }

        let raw = depth_delta.abs().atan2(horizontal).to_degrees();
        Some((raw, depth_delta))
    }

    fn classify(&self, angle: f32) -> OrientationZone {
        if angle < self.config.frontal_max_deg {
            OrientationZone::Frontal
        } else if angle < self.config.side_min_deg {
            OrientationZone::Oblique
        } else {
            OrientationZone::Side
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Joint;

    fn shoulders(t: f64, dx: f32, left_z: f32, right_z: f32) -> JointFrame {
        JointFrame::from_joints(
            t,
            [
                Joint::with_depth(JointName::LeftShoulder, 0.5 + dx / 2.0, 0.3, left_z, 0.9),
                Joint::with_depth(JointName::RightShoulder, 0.5 - dx / 2.0, 0.3, right_z, 0.9),
            ],
        )
    }

    #[test]
    fn test_frontal_view() {
        let mut est = OrientationEstimator::new(OrientationConfig::default());
        let e = est.update(&shoulders(0.0, 0.2, 0.0, 0.0));
        assert!(e.raw_angle_deg.abs() < 0.01);
        assert_eq!(e.zone, OrientationZone::Frontal);
        assert_eq!(e.primary_side, PrimarySide::Both);
    }

    #[test]
    fn test_side_view_left_closer() {
        let mut est = OrientationEstimator::new(OrientationConfig::default());
        let mut e = est.update(&shoulders(0.0, 0.02, -0.2, 0.2));
        for i in 1..30 {
            e = est.update(&shoulders(i as f64 / 30.0, 0.02, -0.2, 0.2));
        }
        assert!(e.smoothed_angle_deg > 80.0);
        assert_eq!(e.zone, OrientationZone::Side);
        assert_eq!(e.primary_side, PrimarySide::Left);
    }

    #[test]
    fn test_oblique_band() {
        let mut est = OrientationEstimator::new(OrientationConfig::default());
        // atan2(0.2, 0.2) = 45°
        let e = est.update(&shoulders(0.0, 0.2, 0.1, -0.1));
        assert_eq!(e.zone, OrientationZone::Oblique);
        assert_eq!(e.primary_side, PrimarySide::Right);
    }

    #[test]
    fn test_smoothing_is_gradual() {
        let mut est = OrientationEstimator::new(OrientationConfig::default());
        est.update(&shoulders(0.0, 0.2, 0.0, 0.0));
        let e = est.update(&shoulders(0.033, 0.02, -0.2, 0.2));
        assert!(e.raw_angle_deg > 80.0);
        assert!(e.smoothed_angle_deg < 25.0);
    }

    #[test]
    fn test_invisible_shoulders_hold_zone() {
        let mut est = OrientationEstimator::new(OrientationConfig::default());
        for i in 0..30 {
            est.update(&shoulders(i as f64 / 30.0, 0.02, -0.2, 0.2));
        }
        let before = est.current();
        assert_eq!(before.zone, OrientationZone::Side);

        for i in 0..10 {
            let e = est.update(&JointFrame::new(2.0 + i as f64 / 30.0));
            assert_eq!(e.zone, OrientationZone::Side);
            assert_eq!(e.smoothed_angle_deg, before.smoothed_angle_deg);
            assert!(e.raw_angle_deg.is_nan());
        }
    }

    #[test]
    fn test_missing_depth_holds() {
        let mut est = OrientationEstimator::new(OrientationConfig::default());
        let frame = JointFrame::from_joints(
            0.0,
            [
                Joint::new(JointName::LeftShoulder, 0.6, 0.3, 0.9),
                Joint::new(JointName::RightShoulder, 0.4, 0.3, 0.9),
            ],
        );
        let e = est.update(&frame);
        assert_eq!(e.zone, OrientationZone::Frontal);
        assert!(e.raw_angle_deg.is_nan());
    }
}
