//! One instant of pose-source output
//!
//! A `JointFrame` is consumed by a single engine update and then dropped.
//! The engine only ever reads joints.

use serde::{Deserialize, Serialize};

use super::joints::{JointName, JOINT_COUNT};

/// A single detected joint (normalized image coordinates)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub name: JointName,
    pub x: f32, // 0-1 normalized, grows right
    pub y: f32, // 0-1 normalized, grows down
    /// Relative depth, smaller = closer to the camera
    pub z: Option<f32>,
    pub confidence: f32,
}

impl Joint {
    pub fn new(name: JointName, x: f32, y: f32, confidence: f32) -> Self {
        Self { name, x, y, z: None, confidence }
    }

    pub fn with_depth(name: JointName, x: f32, y: f32, z: f32, confidence: f32) -> Self {
        Self { name, x, y, z: Some(z), confidence }
    }

    pub fn xy(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// All joints reported for one camera frame
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JointFrame {
    /// Monotonic capture time in seconds
    pub timestamp: f64,
    slots: Vec<Option<Joint>>,
}

impl JointFrame {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            slots: vec![None; JOINT_COUNT],
        }
    }

    pub fn from_joints(timestamp: f64, joints: impl IntoIterator<Item = Joint>) -> Self {
        let mut frame = Self::new(timestamp);
        for joint in joints {
            frame.insert(joint);
        }
        frame
    }

    /// Later inserts of the same name replace earlier ones
    pub fn insert(&mut self, joint: Joint) {
        if self.slots.len() < JOINT_COUNT {
            self.slots.resize(JOINT_COUNT, None);
        }
        self.slots[joint.name.index()] = Some(joint);
    }

    pub fn get(&self, name: JointName) -> Option<&Joint> {
        self.slots.get(name.index()).and_then(|slot| slot.as_ref())
    }

    pub fn joints(&self) -> impl Iterator<Item = &Joint> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.joints().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
