//! Canonical joint labels (MediaPipe Pose - 33 total)
//!
//! The discriminant of each variant is its index in the flat landmark
//! array delivered by the pose source.

use serde::{Deserialize, Serialize};

/// Number of joints in a full MediaPipe Pose frame
pub const JOINT_COUNT: usize = 33;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl JointName {
    pub const ALL: [JointName; JOINT_COUNT] = [
        JointName::Nose,
        JointName::LeftEyeInner,
        JointName::LeftEye,
        JointName::LeftEyeOuter,
        JointName::RightEyeInner,
        JointName::RightEye,
        JointName::RightEyeOuter,
        JointName::LeftEar,
        JointName::RightEar,
        JointName::MouthLeft,
        JointName::MouthRight,
        JointName::LeftShoulder,
        JointName::RightShoulder,
        JointName::LeftElbow,
        JointName::RightElbow,
        JointName::LeftWrist,
        JointName::RightWrist,
        JointName::LeftPinky,
        JointName::RightPinky,
        JointName::LeftIndex,
        JointName::RightIndex,
        JointName::LeftThumb,
        JointName::RightThumb,
        JointName::LeftHip,
        JointName::RightHip,
        JointName::LeftKnee,
        JointName::RightKnee,
        JointName::LeftAnkle,
        JointName::RightAnkle,
        JointName::LeftHeel,
        JointName::RightHeel,
        JointName::LeftFootIndex,
        JointName::RightFootIndex,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// Which half of the body a joint chain belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Shoulder → elbow → wrist plus the hip used as the torso anchor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmChain {
    pub hip: JointName,
    pub shoulder: JointName,
    pub elbow: JointName,
    pub wrist: JointName,
}

/// Shoulder → hip → knee → ankle for one side of the body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegChain {
    pub shoulder: JointName,
    pub hip: JointName,
    pub knee: JointName,
    pub ankle: JointName,
}

pub const LEFT_ARM: ArmChain = ArmChain {
    hip: JointName::LeftHip,
    shoulder: JointName::LeftShoulder,
    elbow: JointName::LeftElbow,
    wrist: JointName::LeftWrist,
};

pub const RIGHT_ARM: ArmChain = ArmChain {
    hip: JointName::RightHip,
    shoulder: JointName::RightShoulder,
    elbow: JointName::RightElbow,
    wrist: JointName::RightWrist,
};

pub const LEFT_LEG: LegChain = LegChain {
    shoulder: JointName::LeftShoulder,
    hip: JointName::LeftHip,
    knee: JointName::LeftKnee,
    ankle: JointName::LeftAnkle,
};

pub const RIGHT_LEG: LegChain = LegChain {
    shoulder: JointName::RightShoulder,
    hip: JointName::RightHip,
    knee: JointName::RightKnee,
    ankle: JointName::RightAnkle,
};

pub fn arm(side: Side) -> ArmChain {
    match side {
        Side::Left => LEFT_ARM,
        Side::Right => RIGHT_ARM,
    }
}

pub fn leg(side: Side) -> LegChain {
    match side {
        Side::Left => LEFT_LEG,
        Side::Right => RIGHT_LEG,
    }
}

impl ArmChain {
    pub fn joints(&self) -> [JointName; 4] {
        [self.hip, self.shoulder, self.elbow, self.wrist]
    }
}

impl LegChain {
    pub fn joints(&self) -> [JointName; 4] {
        [self.shoulder, self.hip, self.knee, self.ankle]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, name) in JointName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
            assert_eq!(JointName::from_index(i), Some(*name));
        }
        assert_eq!(JointName::from_index(JOINT_COUNT), None);
    }

    #[test]
    fn test_mediapipe_indices() {
        assert_eq!(JointName::LeftShoulder.index(), 11);
        assert_eq!(JointName::RightWrist.index(), 16);
        assert_eq!(JointName::LeftHip.index(), 23);
    }
}
