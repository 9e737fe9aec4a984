//! Per-limb curl cycle: Rest -> Ascending -> Top -> Descending -> Rest
//!
//! Driven by one smoothed elbow angle against two hysteresis bands. A NaN
//! angle satisfies no comparison, so a limb that loses tracking simply
//! stops progressing.

use serde::Serialize;

use crate::config::{LimbThresholds, ThresholdCompensation};
use crate::pose::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbPhase {
    Rest,
    Ascending,
    Top,
    Descending,
}

/// What a single update did to the limb
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimbEvent {
    None,
    /// Left Rest; a cycle has started
    Started,
    /// Entered Top (peak flexion)
    ReachedTop,
    /// Back at Rest after a full cycle that met the duration guard
    Completed,
    /// Back at Rest without a valid full cycle
    Aborted,
}

/// Shift the bands for foreshortening: a rotated arm projects to a smaller
/// apparent range, so extended thresholds drop and flexed ones rise.
pub fn compensate(
    base: &LimbThresholds,
    compensation: &ThresholdCompensation,
    rotation_deg: f32,
) -> LimbThresholds {
    let rotation = if rotation_deg.is_finite() {
        rotation_deg.clamp(0.0, 90.0)
    } else {
        0.0
    };
    let down = compensation.extended_shift_per_deg * rotation;
    let up = compensation.flexed_shift_per_deg * rotation;
    LimbThresholds {
        extended_enter: base.extended_enter - down,
        extended_exit: base.extended_exit - down,
        flexed_enter: base.flexed_enter + up,
        flexed_exit: base.flexed_exit + up,
    }
}

/// Duration guards shared by both limbs
#[derive(Clone, Copy, Debug)]
pub struct LimbGuards {
    pub min_phase_s: f32,
    pub min_rep_s: f32,
}

#[derive(Clone, Debug)]
pub struct LimbMachine {
    side: Side,
    phase: LimbPhase,
    phase_since: f64,
    cycle_start: Option<f64>,
    /// Seen extended since the last reset
    armed: bool,
    /// Highest angle seen while resting, and when
    rest_peak: Option<(f32, f64)>,
    /// Running extrema of the elbow angle over the current cycle
    cycle_min: f32,
    cycle_max: f32,
}

impl LimbMachine {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            phase: LimbPhase::Rest,
            phase_since: 0.0,
            cycle_start: None,
            armed: false,
            rest_peak: None,
            cycle_min: f32::NAN,
            cycle_max: f32::NAN,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn phase(&self) -> LimbPhase {
        self.phase
    }

    pub fn is_resting(&self) -> bool {
        self.phase == LimbPhase::Rest
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn cycle_start(&self) -> Option<f64> {
        self.cycle_start
    }

    pub fn rest_peak(&self) -> Option<(f32, f64)> {
        self.rest_peak
    }

    /// Min and max elbow angle of the cycle in progress (NaN at rest)
    pub fn cycle_extrema(&self) -> (f32, f32) {
        (self.cycle_min, self.cycle_max)
    }

    pub fn update(
        &mut self,
        angle: f32,
        t: f64,
        bands: &LimbThresholds,
        guards: &LimbGuards,
    ) -> LimbEvent {
        if self.phase != LimbPhase::Rest && angle.is_finite() {
            self.cycle_min = self.cycle_min.min(angle);
            self.cycle_max = self.cycle_max.max(angle);
        }

        match self.phase {
            LimbPhase::Rest => {
                if angle >= bands.extended_enter {
                    self.armed = true;
                }
                if self.armed && angle < bands.extended_exit {
                    self.cycle_start = Some(t);
                    self.cycle_min = angle;
                    self.cycle_max = angle;
                    self.enter(LimbPhase::Ascending, t);
                    return LimbEvent::Started;
                }
                if angle.is_finite() && self.rest_peak.map_or(true, |(peak, _)| angle > peak) {
                    self.rest_peak = Some((angle, t));
                }
                LimbEvent::None
            }
            LimbPhase::Ascending => {
                if angle >= bands.extended_enter {
                    log::debug!("{:?} limb dropped back to rest before peak", self.side);
                    self.finish(angle, t);
                    LimbEvent::Aborted
                } else if angle <= bands.flexed_enter
                    && self.elapsed(t) >= guards.min_phase_s as f64
                {
                    self.enter(LimbPhase::Top, t);
                    LimbEvent::ReachedTop
                } else {
                    LimbEvent::None
                }
            }
            LimbPhase::Top => {
                if angle > bands.flexed_exit {
                    self.enter(LimbPhase::Descending, t);
                }
                LimbEvent::None
            }
            LimbPhase::Descending => {
                if angle <= bands.flexed_enter {
                    self.enter(LimbPhase::Top, t);
                    LimbEvent::ReachedTop
                } else if angle >= bands.extended_enter {
                    let duration = self.cycle_start.map_or(0.0, |start| t - start);
                    self.finish(angle, t);
                    if duration >= guards.min_rep_s as f64 {
                        LimbEvent::Completed
                    } else {
                        log::debug!("{:?} limb cycle too short ({:.2}s)", self.side, duration);
                        LimbEvent::Aborted
                    }
                } else {
                    LimbEvent::None
                }
            }
        }
    }

    /// Back to Rest, disarmed: the limb has to be seen extended again
    pub fn reset(&mut self, t: f64) {
        self.phase = LimbPhase::Rest;
        self.phase_since = t;
        self.cycle_start = None;
        self.armed = false;
        self.rest_peak = None;
        self.cycle_min = f32::NAN;
        self.cycle_max = f32::NAN;
    }

    /// Post-rep baseline: at Rest, still armed, rest peak restarts here
    fn finish(&mut self, angle: f32, t: f64) {
        self.enter(LimbPhase::Rest, t);
        self.cycle_start = None;
        self.rest_peak = Some((angle, t));
        self.cycle_min = f32::NAN;
        self.cycle_max = f32::NAN;
    }

    fn enter(&mut self, phase: LimbPhase, t: f64) {
        log::debug!("{:?} limb {:?} -> {:?}", self.side, self.phase, phase);
        self.phase = phase;
        self.phase_since = t;
    }

    fn elapsed(&self, t: f64) -> f64 {
        t - self.phase_since
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARDS: LimbGuards = LimbGuards {
        min_phase_s: 0.12,
        min_rep_s: 0.5,
    };

    fn bands() -> LimbThresholds {
        LimbThresholds::default()
    }

    /// Feed (angle, t) pairs, collect non-None events
    fn run(limb: &mut LimbMachine, trace: &[(f32, f64)]) -> Vec<LimbEvent> {
        trace
            .iter()
            .map(|(a, t)| limb.update(*a, *t, &bands(), &GUARDS))
            .filter(|e| *e != LimbEvent::None)
            .collect()
    }

    #[test]
    fn test_full_cycle() {
        let mut limb = LimbMachine::new(Side::Left);
        let events = run(
            &mut limb,
            &[(170.0, 0.0), (130.0, 0.1), (60.0, 0.4), (100.0, 0.7), (160.0, 1.0)],
        );
        assert_eq!(
            events,
            vec![LimbEvent::Started, LimbEvent::ReachedTop, LimbEvent::Completed]
        );
        assert!(limb.is_resting());
        assert!(limb.is_armed());
    }

    #[test]
    fn test_unarmed_limb_cannot_start() {
        let mut limb = LimbMachine::new(Side::Right);
        assert!(run(&mut limb, &[(100.0, 0.0), (50.0, 0.2), (100.0, 0.4)]).is_empty());
        assert_eq!(limb.phase(), LimbPhase::Rest);
    }

    #[test]
    fn test_no_chatter_inside_bands() {
        let mut limb = LimbMachine::new(Side::Left);
        // between extended_exit and extended_enter: never leaves Rest
        let mut trace = vec![(170.0, 0.0)];
        for i in 1..40 {
            let a = if i % 2 == 0 { 141.0 } else { 149.0 };
            trace.push((a, i as f64 * 0.033));
        }
        assert!(run(&mut limb, &trace).is_empty());

        // reach Top, then oscillate between flexed_enter and flexed_exit
        run(&mut limb, &[(130.0, 2.0), (60.0, 2.3)]);
        assert_eq!(limb.phase(), LimbPhase::Top);
        for i in 0..40 {
            let a = if i % 2 == 0 { 76.0 } else { 84.0 };
            limb.update(a, 2.4 + i as f64 * 0.033, &bands(), &GUARDS);
            assert_eq!(limb.phase(), LimbPhase::Top);
        }
    }

    #[test]
    fn test_top_needs_min_phase_duration() {
        let mut limb = LimbMachine::new(Side::Left);
        run(&mut limb, &[(170.0, 0.0), (130.0, 0.1)]);
        limb.update(60.0, 0.15, &bands(), &GUARDS);
        assert_eq!(limb.phase(), LimbPhase::Ascending);
        limb.update(60.0, 0.25, &bands(), &GUARDS);
        assert_eq!(limb.phase(), LimbPhase::Top);
    }

    #[test]
    fn test_fast_cycle_aborted() {
        let mut limb = LimbMachine::new(Side::Left);
        let events = run(
            &mut limb,
            &[(170.0, 0.0), (130.0, 0.05), (60.0, 0.2), (100.0, 0.3), (160.0, 0.4)],
        );
        assert_eq!(events.last(), Some(&LimbEvent::Aborted));
    }

    #[test]
    fn test_return_before_peak_aborts() {
        let mut limb = LimbMachine::new(Side::Left);
        let events = run(&mut limb, &[(170.0, 0.0), (130.0, 0.1), (110.0, 0.3), (155.0, 0.5)]);
        assert_eq!(events, vec![LimbEvent::Started, LimbEvent::Aborted]);
    }

    #[test]
    fn test_nan_stalls() {
        let mut limb = LimbMachine::new(Side::Left);
        run(&mut limb, &[(170.0, 0.0), (130.0, 0.1)]);
        for i in 0..10 {
            let event = limb.update(f32::NAN, 0.2 + i as f64 * 0.1, &bands(), &GUARDS);
            assert_eq!(event, LimbEvent::None);
        }
        assert_eq!(limb.phase(), LimbPhase::Ascending);
    }

    #[test]
    fn test_rest_peak_and_cycle_extrema() {
        let mut limb = LimbMachine::new(Side::Left);
        run(&mut limb, &[(160.0, 0.0), (172.0, 0.1), (165.0, 0.2)]);
        assert_eq!(limb.rest_peak(), Some((172.0, 0.1)));
        run(&mut limb, &[(130.0, 0.3), (50.0, 0.6)]);
        assert_eq!(limb.cycle_extrema(), (50.0, 130.0));
    }

    #[test]
    fn test_reset_disarms() {
        let mut limb = LimbMachine::new(Side::Left);
        run(&mut limb, &[(170.0, 0.0), (130.0, 0.1)]);
        limb.reset(0.2);
        assert!(!limb.is_armed());
        assert!(run(&mut limb, &[(60.0, 0.3), (130.0, 0.5)]).is_empty());
    }

    #[test]
    fn test_compensation_shifts_bands() {
        let shifted = compensate(&bands(), &ThresholdCompensation::default(), 40.0);
        assert!((shifted.extended_enter - 144.0).abs() < 1e-4);
        assert!((shifted.flexed_enter - 83.0).abs() < 1e-4);
        let clamped = compensate(&bands(), &ThresholdCompensation::default(), 200.0);
        let at_90 = compensate(&bands(), &ThresholdCompensation::default(), 90.0);
        assert_eq!(clamped.flexed_exit, at_90.flexed_exit);
        let nan = compensate(&bands(), &ThresholdCompensation::default(), f32::NAN);
        assert_eq!(nan.extended_enter, 150.0);
    }
}
