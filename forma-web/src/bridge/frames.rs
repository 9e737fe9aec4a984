//! Flat landmark arrays from JavaScript into joint frames

use crate::pose::{Joint, JointFrame, JointName, JOINT_COUNT};

use super::error::BridgeError;

/// x, y, z, visibility per landmark
pub const FLOATS_PER_JOINT: usize = 4;
pub const FRAME_LEN: usize = JOINT_COUNT * FLOATS_PER_JOINT;

/// Build a frame from 33 x (x, y, z, visibility); `timestamp_ms` is the
/// caller's monotonic clock in milliseconds
///
/// A non-finite z drops depth for that joint. Non-finite x/y drops the joint.
pub fn frame_from_flat(data: &[f32], timestamp_ms: f64) -> Result<JointFrame, BridgeError> {
    if data.len() != FRAME_LEN {
        return Err(BridgeError::BadFrameLength {
            got: data.len(),
            expected: FRAME_LEN,
        });
    }

    let mut frame = JointFrame::new(timestamp_ms / 1000.0);
    for (name, chunk) in JointName::ALL.iter().zip(data.chunks_exact(FLOATS_PER_JOINT)) {
        let (x, y, z, visibility) = (chunk[0], chunk[1], chunk[2], chunk[3]);
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let confidence = if visibility.is_finite() {
            visibility.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let joint = if z.is_finite() {
            Joint::with_depth(*name, x, y, z, confidence)
        } else {
            Joint::new(*name, x, y, confidence)
        };
        frame.insert(joint);
    }
    Ok(frame)
}
