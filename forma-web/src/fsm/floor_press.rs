//! Single-body push-up machine
//!
//! Idle -> Plank -> Descending -> Bottom -> Ascending -> Plank
//!
//! Idle arms into Plank only after the body line, the torso inclination and
//! the elbows have all held a plank posture for `hold_s`. After each rep the
//! machine returns to Plank, never Idle, so the hold is not re-required.
//! Sustained loss of posture disarms it back to Idle.

use serde::Serialize;

use crate::config::PushupConfig;
use crate::scoring::{LimbMode, RepWindow};
use crate::signal::{Channel, ChannelValues};

use super::outcome::{DiscardReason, RepOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PushupPhase {
    Idle,
    Plank,
    Descending,
    Bottom,
    Ascending,
}

/// Elbow angle that drives the machine: one side, or the mean of both
pub fn tracked_elbow(values: &ChannelValues, mode: LimbMode) -> f32 {
    match mode {
        LimbMode::Single(side) => values.get(Channel::elbow(side)),
        LimbMode::Both => {
            let left = values.get(Channel::LeftElbow);
            let right = values.get(Channel::RightElbow);
            match (left.is_finite(), right.is_finite()) {
                (true, true) => (left + right) * 0.5,
                (true, false) => left,
                (false, true) => right,
                (false, false) => f32::NAN,
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct PushupMachine {
    phase: PushupPhase,
    phase_since: f64,
    /// Start of the current uninterrupted plank hold while Idle
    hold_since: Option<f64>,
    /// Start of the current posture loss while armed
    lost_since: Option<f64>,
    /// Highest elbow angle seen while in Plank
    plank_peak: Option<(f32, f64)>,
    window: Option<RepWindow>,
    mode: Option<LimbMode>,
}

impl Default for PushupMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PushupMachine {
    pub fn new() -> Self {
        Self {
            phase: PushupPhase::Idle,
            phase_since: 0.0,
            hold_since: None,
            lost_since: None,
            plank_peak: None,
            window: None,
            mode: None,
        }
    }

    pub fn phase(&self) -> PushupPhase {
        self.phase
    }

    pub fn window_open(&self) -> bool {
        self.window.is_some()
    }

    pub fn latched_mode(&self) -> Option<LimbMode> {
        self.mode
    }

    pub fn update(
        &mut self,
        t: f64,
        values: &ChannelValues,
        mode: LimbMode,
        cfg: &PushupConfig,
    ) -> Option<RepOutcome> {
        let mode = self.mode.unwrap_or(mode);
        let elbow = tracked_elbow(values, mode);
        let th = &cfg.thresholds;
        let in_posture = body_in_posture(values, cfg);

        if let Some(window) = self.window.as_mut() {
            window.observe(t, values);
        }

        if self.phase != PushupPhase::Idle {
            if in_posture {
                self.lost_since = None;
            } else {
                let since = *self.lost_since.get_or_insert(t);
                if t - since >= cfg.arming.disarm_after_s as f64 {
                    return self.disarm(t);
                }
            }
        }

        match self.phase {
            PushupPhase::Idle => {
                if in_posture && elbow >= th.plank_enter {
                    let since = *self.hold_since.get_or_insert(t);
                    if t - since >= cfg.arming.hold_s as f64 {
                        log::info!("plank held for {:.1}s, push-up counting armed", t - since);
                        self.hold_since = None;
                        self.plank_peak = Some((elbow, t));
                        self.enter(PushupPhase::Plank, t);
                    }
                } else {
                    self.hold_since = None;
                }
                None
            }
            PushupPhase::Plank => {
                if elbow < th.plank_exit {
                    self.open_window(t, values, mode);
                    self.enter(PushupPhase::Descending, t);
                } else if elbow.is_finite() && self.plank_peak.map_or(true, |(p, _)| elbow > p) {
                    self.plank_peak = Some((elbow, t));
                }
                None
            }
            PushupPhase::Descending => {
                if elbow <= th.bottom_enter {
                    if let Some(window) = self.window.as_mut() {
                        window.mark_bottom(t);
                    }
                    self.enter(PushupPhase::Bottom, t);
                    None
                } else if elbow >= th.plank_enter {
                    Some(self.abandoned_descent(t, elbow, cfg))
                } else {
                    None
                }
            }
            PushupPhase::Bottom => {
                if elbow > th.bottom_exit {
                    self.enter(PushupPhase::Ascending, t);
                }
                None
            }
            PushupPhase::Ascending => {
                if elbow <= th.bottom_enter {
                    if let Some(window) = self.window.as_mut() {
                        window.mark_bottom(t);
                    }
                    self.enter(PushupPhase::Bottom, t);
                    None
                } else if elbow >= th.plank_enter {
                    Some(self.complete(t, elbow, cfg))
                } else {
                    None
                }
            }
        }
    }

    /// Drop any rep in progress and fall back to Idle
    pub fn abandon(&mut self, t: f64) -> Option<RepOutcome> {
        self.disarm(t)
    }

    fn open_window(&mut self, t: f64, values: &ChannelValues, mode: LimbMode) {
        let mut window = RepWindow::open(t);
        if let Some((peak, at)) = self.plank_peak {
            for side in mode.sides() {
                window.seed(Channel::elbow(*side), peak, at);
            }
        }
        window.observe(t, values);
        log::debug!("push-up window opened at {:.2}s in {:?} mode", t, mode);
        self.window = Some(window);
        self.mode = Some(mode);
    }

    /// Back to Plank from Descending without touching the bottom
    fn abandoned_descent(&mut self, t: f64, elbow: f32, cfg: &PushupConfig) -> RepOutcome {
        let start = self.phase_since;
        let descent = t - start;
        let turn = self
            .window
            .take()
            .and_then(|w| self.deepest_at(&w))
            .unwrap_or(start);
        self.back_to_plank(t, elbow);

        if descent < cfg.min_descent_s as f64 {
            log::debug!("descent of {:.2}s too short for a partial rep", descent);
            return RepOutcome::Discarded(DiscardReason::TooShort);
        }
        RepOutcome::Partial {
            start,
            turn,
            end: t,
        }
    }

    fn complete(&mut self, t: f64, elbow: f32, cfg: &PushupConfig) -> RepOutcome {
        let mode = self.mode.unwrap_or(LimbMode::Both);
        let window = self.window.take().and_then(|w| w.close(t));
        self.back_to_plank(t, elbow);

        match window {
            Some(window) if window.duration() >= cfg.min_rep_s => {
                RepOutcome::Credited { window, mode }
            }
            Some(window) => {
                log::warn!("push-up of {:.2}s below minimum rep time", window.duration());
                RepOutcome::Discarded(DiscardReason::TooShort)
            }
            None => RepOutcome::Discarded(DiscardReason::Aborted),
        }
    }

    fn deepest_at(&self, window: &RepWindow) -> Option<f64> {
        let mode = self.mode.unwrap_or(LimbMode::Both);
        mode.sides()
            .iter()
            .filter_map(|s| window.extrema(Channel::elbow(*s)))
            .min_by(|a, b| a.min.total_cmp(&b.min))
            .map(|e| e.min_at)
    }

    fn back_to_plank(&mut self, t: f64, elbow: f32) {
        self.mode = None;
        self.plank_peak = Some((elbow, t));
        self.enter(PushupPhase::Plank, t);
    }

    fn disarm(&mut self, t: f64) -> Option<RepOutcome> {
        let dropped = self.window.take().is_some();
        if self.phase != PushupPhase::Idle {
            log::info!("plank posture lost, push-up counting disarmed");
        }
        self.enter(PushupPhase::Idle, t);
        self.hold_since = None;
        self.lost_since = None;
        self.plank_peak = None;
        self.mode = None;
        dropped.then_some(RepOutcome::Discarded(DiscardReason::LostTracking))
    }

    fn enter(&mut self, phase: PushupPhase, t: f64) {
        if phase != self.phase {
            log::debug!("push-up {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.phase_since = t;
    }
}

/// Straight body line and a near-horizontal torso
fn body_in_posture(values: &ChannelValues, cfg: &PushupConfig) -> bool {
    let max_bend = 180.0 - cfg.arming.min_body_line;
    values.get(Channel::HipLine).abs() <= max_bend
        && values.get(Channel::TorsoInclination) >= cfg.arming.min_inclination
}
