//! Joint angle calculation
//!
//! All angles are in degrees. Any angle that cannot be computed (coincident
//! points, missing depth where depth is required) is `f32::NAN`, never a
//! panic and never a guessed value.

use nalgebra::{Vector2, Vector3};

use crate::pose::Joint;

/// Segments shorter than this are treated as degenerate
const MIN_SEGMENT: f32 = 1e-4;

fn planar(j: &Joint) -> Vector2<f32> {
    Vector2::new(j.x, j.y)
}

fn spatial(j: &Joint) -> Option<Vector3<f32>> {
    j.z.map(|z| Vector3::new(j.x, j.y, z))
}

/// Angle at vertex `b` between rays b→a and b→c, in [0°, 180°]
///
/// Uses atan2(|cross|, dot) which stays accurate near 0° and 180°
/// where acos of the normalized dot product loses precision.
pub fn joint_angle(a: &Joint, b: &Joint, c: &Joint) -> f32 {
    let v1 = planar(a) - planar(b);
    let v2 = planar(c) - planar(b);

    if v1.norm() < MIN_SEGMENT || v2.norm() < MIN_SEGMENT {
        return f32::NAN;
    }

    let cross = v1.perp(&v2);
    let dot = v1.dot(&v2);
    cross.abs().atan2(dot).to_degrees()
}

/// Angle at `b` measured in the body's sagittal plane
///
/// The reference pair (usually the two shoulders) fixes the mediolateral
/// axis; both rays are projected onto the plane orthogonal to it before
/// measuring. Falls back to [`joint_angle`] when any point lacks depth or
/// the reference pair is degenerate (side-on view).
pub fn sagittal_angle(a: &Joint, b: &Joint, c: &Joint, reference: (&Joint, &Joint)) -> f32 {
    let (Some(pa), Some(pb), Some(pc), Some(r0), Some(r1)) = (
        spatial(a),
        spatial(b),
        spatial(c),
        spatial(reference.0),
        spatial(reference.1),
    ) else {
        return joint_angle(a, b, c);
    };

    // Mediolateral axis, kept horizontal so lean does not tilt the plane
    let mut axis = r1 - r0;
    axis.y = 0.0;
    let axis_len = axis.norm();
    if axis_len < MIN_SEGMENT {
        return joint_angle(a, b, c);
    }
    let axis = axis / axis_len;

    let project = |v: Vector3<f32>| v - axis * v.dot(&axis);
    let v1 = project(pa - pb);
    let v2 = project(pc - pb);

    if v1.norm() < MIN_SEGMENT || v2.norm() < MIN_SEGMENT {
        return f32::NAN;
    }

    v1.cross(&v2).norm().atan2(v1.dot(&v2)).to_degrees()
}

/// Signed deviation of the segment base→tip from vertical
///
/// 0° = tip straight above base. `front_sign` is +1.0 when the subject
/// faces +x in the image and -1.0 when facing -x, so that positive always
/// means leaning toward the front.
pub fn signed_vertical_angle(base: &Joint, tip: &Joint, front_sign: f32) -> f32 {
    let dx = tip.x - base.x;
    let up = base.y - tip.y; // image y grows downward

    if dx.hypot(up) < MIN_SEGMENT {
        return f32::NAN;
    }

    dx.atan2(up).to_degrees() * front_sign
}

/// Unsigned inclination of base→tip from vertical, in [0°, 90°]
///
/// 0° = upright, 90° = horizontal. Direction-agnostic so a body lying
/// head-left and head-right reads the same.
pub fn inclination_from_vertical(base: &Joint, tip: &Joint) -> f32 {
    let dx = (tip.x - base.x).abs();
    let dy = (tip.y - base.y).abs();

    if dx.hypot(dy) < MIN_SEGMENT {
        return f32::NAN;
    }

    dx.atan2(dy).to_degrees()
}

/// Shoulder flexion: 0° with the arm hanging along the torso
pub fn shoulder_flexion(hip: &Joint, shoulder: &Joint, elbow: &Joint) -> f32 {
    joint_angle(hip, shoulder, elbow)
}

/// Signed bend of a three-point line at its middle joint
///
/// Returns 180° minus the angle at `mid`, positive when `mid` sits below
/// the a→c line in the image (hips sagging), negative when above (piking).
pub fn signed_line_deviation(a: &Joint, mid: &Joint, c: &Joint) -> f32 {
    let angle = joint_angle(a, mid, c);
    if angle.is_nan() {
        return f32::NAN;
    }

    let line = planar(c) - planar(a);
    let len_sq = line.norm_squared();
    if len_sq < MIN_SEGMENT * MIN_SEGMENT {
        return f32::NAN;
    }

    let t = (planar(mid) - planar(a)).dot(&line) / len_sq;
    let foot = planar(a) + line * t;
    let bend = 180.0 - angle;

    if mid.y >= foot.y {
        bend
    } else {
        -bend
    }
}

/// Midpoint of two joints, inheriting the lower confidence
pub fn midpoint(a: &Joint, b: &Joint) -> Joint {
    let z = match (a.z, b.z) {
        (Some(za), Some(zb)) => Some((za + zb) * 0.5),
        _ => None,
    };
    Joint {
        name: a.name,
        x: (a.x + b.x) * 0.5,
        y: (a.y + b.y) * 0.5,
        z,
        confidence: a.confidence.min(b.confidence),
    }
}
