//! Synthetic pose traces built from joint geometry

#![allow(dead_code)]

use forma_web::engine::{ExerciseEngine, FrameOutput};
use forma_web::pose::{arm, leg, Joint, JointFrame, Side};
use forma_web::scoring::RepResult;

pub const FPS: f64 = 30.0;
const CONF: f32 = 0.9;

/// One cosine cycle from `hi` down to `lo` and back, sampled at FPS
pub fn cosine_rep(hi: f32, lo: f32, secs: f64) -> Vec<f32> {
    let n = (secs * FPS).round() as usize;
    (0..n)
        .map(|i| {
            let phase = i as f32 / n as f32;
            (hi + lo) / 2.0 + (hi - lo) / 2.0 * (2.0 * std::f32::consts::PI * phase).cos()
        })
        .collect()
}

pub fn hold(angle: f32, secs: f64) -> Vec<f32> {
    vec![angle; (secs * FPS).round() as usize]
}

fn rotate_about(p: (f32, f32), pivot: (f32, f32), deg: f32) -> (f32, f32) {
    let (s, c) = deg.to_radians().sin_cos();
    let (dx, dy) = (p.0 - pivot.0, p.1 - pivot.1);
    (pivot.0 + dx * c - dy * s, pivot.1 + dx * s + dy * c)
}

/// Standing subject facing the camera, upper arms hanging, elbows at the
/// given angles; the whole upper body leans `lean` degrees about the hips
pub fn curl_frame(t: f64, left: f32, right: f32, lean: f32) -> JointFrame {
    let mut frame = JointFrame::new(t);
    for (side, angle, x) in [(Side::Left, left, 0.42), (Side::Right, right, 0.58)] {
        let chain = arm(side);
        let hip = (x, 0.70);
        let elbow = (x, 0.50);
        let rad = angle.to_radians();
        let wrist = (elbow.0 + 0.2 * rad.sin(), elbow.1 - 0.2 * rad.cos());
        let place = |p| rotate_about(p, hip, lean);
        let (s, e, w) = (place((x, 0.30)), place(elbow), place(wrist));
        frame.insert(Joint::new(chain.hip, hip.0, hip.1, CONF));
        frame.insert(Joint::new(chain.shoulder, s.0, s.1, CONF));
        frame.insert(Joint::new(chain.elbow, e.0, e.1, CONF));
        frame.insert(Joint::new(chain.wrist, w.0, w.1, CONF));
    }
    frame
}

/// Subject turned side-on with the left shoulder toward the camera; both
/// arm chains stay visible and carry depth
pub fn side_curl_frame(t: f64, left: f32, right: f32) -> JointFrame {
    let mut frame = JointFrame::new(t);
    for (side, angle, x, z) in [(Side::Left, left, 0.49, -0.15), (Side::Right, right, 0.51, 0.15)] {
        let chain = arm(side);
        let elbow = (x, 0.50);
        let rad = angle.to_radians();
        let wrist = (elbow.0 + 0.2 * rad.sin(), elbow.1 - 0.2 * rad.cos());
        frame.insert(Joint::with_depth(chain.hip, x, 0.70, z, CONF));
        frame.insert(Joint::with_depth(chain.shoulder, x, 0.30, z, CONF));
        frame.insert(Joint::with_depth(chain.elbow, elbow.0, elbow.1, z, CONF));
        frame.insert(Joint::with_depth(chain.wrist, wrist.0, wrist.1, z, CONF));
    }
    frame
}

/// Side-on plank with the left side toward the camera; the right side is
/// reported with near-zero visibility
pub fn plank_frame(t: f64, elbow_angle: f32) -> JointFrame {
    let mut frame = JointFrame::new(t);
    for (side, conf) in [(Side::Left, CONF), (Side::Right, 0.05)] {
        let a = arm(side);
        let l = leg(side);
        let rad = elbow_angle.to_radians();
        let (ex, ey) = (0.30, 0.65);
        frame.insert(Joint::new(a.shoulder, 0.30, 0.50, conf));
        frame.insert(Joint::new(a.elbow, ex, ey, conf));
        frame.insert(Joint::new(a.wrist, ex + 0.15 * rad.sin(), ey - 0.15 * rad.cos(), conf));
        frame.insert(Joint::new(l.hip, 0.55, 0.50, conf));
        frame.insert(Joint::new(l.knee, 0.70, 0.50, conf));
        frame.insert(Joint::new(l.ankle, 0.85, 0.50, conf));
    }
    frame
}

/// Drive an engine over frames, collecting every output
pub fn run<E: ExerciseEngine>(
    engine: &E,
    frames: impl IntoIterator<Item = JointFrame>,
) -> (E::State, Vec<FrameOutput>) {
    let mut state = engine.initial_state();
    let mut outputs = Vec::new();
    for frame in frames {
        let (next, out) = engine.update(state, &frame);
        state = next;
        outputs.push(out);
    }
    (state, outputs)
}

pub fn timed(angles: &[f32]) -> impl Iterator<Item = (f64, f32)> + '_ {
    angles.iter().enumerate().map(|(i, a)| (i as f64 / FPS, *a))
}

/// NaN entries in a trace become frames with no joints at all
pub fn with_gaps(angles: &[f32], make: impl Fn(f64, f32) -> JointFrame) -> Vec<JointFrame> {
    timed(angles)
        .map(|(t, a)| if a.is_nan() { JointFrame::new(t) } else { make(t, a) })
        .collect()
}

pub fn gap(secs: f64) -> Vec<f32> {
    hold(f32::NAN, secs)
}

pub fn new_reps(outputs: &[FrameOutput]) -> Vec<RepResult> {
    outputs.iter().filter_map(|o| o.new_rep().cloned()).collect()
}
