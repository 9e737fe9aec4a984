//! Kinematics module - stateless geometry and visibility primitives
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod visibility;

pub use angles::{
    inclination_from_vertical, joint_angle, midpoint, sagittal_angle, shoulder_flexion,
    signed_line_deviation, signed_vertical_angle,
};
pub use visibility::{all_visible, is_visible, mean_confidence, visible_joint};
