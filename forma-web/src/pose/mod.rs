//! Pose module - joint labels and per-frame joint collections
//!
//! Re-exports only. All logic in submodules.

mod frame;
mod joints;

pub use frame::{Joint, JointFrame};
pub use joints::{
    arm, leg, ArmChain, JointName, LegChain, Side, JOINT_COUNT, LEFT_ARM, LEFT_LEG, RIGHT_ARM,
    RIGHT_LEG,
};
