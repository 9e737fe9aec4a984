//! Two-limb synchronized rep machine
//!
//! Each arm runs its own `LimbMachine`. A rep is credited only when both
//! arms complete a full cycle and return to rest within the sync window of
//! each other; anything else is dropped silently and both arms reset.
//!
//! Side-on, or with one arm chain out of view, the machine counts from the
//! single primary arm instead. The mode is latched while a rep window is
//! open so a mid-rep zone change cannot mix the two.

use crate::config::CurlConfig;
use crate::pose::Side;
use crate::scoring::{LimbMode, RepWindow};
use crate::signal::{Channel, ChannelValues};
use crate::tracking::{OrientationEstimate, OrientationZone};

use super::limb::{compensate, LimbEvent, LimbGuards, LimbMachine};
use super::outcome::{DiscardReason, RepOutcome};

/// Whether each arm chain (hip, shoulder, elbow, wrist) is visible this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmVisibility {
    pub left: bool,
    pub right: bool,
}

impl ArmVisibility {
    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Pick the counting mode for a rep that is about to start
pub fn choose_mode(orientation: &OrientationEstimate, arms: ArmVisibility) -> LimbMode {
    let primary = orientation.primary_side.side().unwrap_or(Side::Left);
    match (arms.left, arms.right) {
        (true, true) => match orientation.zone {
            OrientationZone::Frontal | OrientationZone::Oblique => LimbMode::Both,
            OrientationZone::Side => LimbMode::Single(primary),
        },
        (true, false) => LimbMode::Single(Side::Left),
        (false, true) => LimbMode::Single(Side::Right),
        // nothing visible: no limb can progress anyway
        (false, false) => LimbMode::Both,
    }
}

#[derive(Clone, Debug)]
pub struct BilateralMachine {
    left: LimbMachine,
    right: LimbMachine,
    window: Option<RepWindow>,
    /// Latched while `window` is open
    mode: Option<LimbMode>,
    /// First arm to complete, waiting for its partner
    pending: Option<(Side, f64)>,
}

impl Default for BilateralMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl BilateralMachine {
    pub fn new() -> Self {
        Self {
            left: LimbMachine::new(Side::Left),
            right: LimbMachine::new(Side::Right),
            window: None,
            mode: None,
            pending: None,
        }
    }

    pub fn limb(&self, side: Side) -> &LimbMachine {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn limb_mut(&mut self, side: Side) -> &mut LimbMachine {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
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
        orientation: &OrientationEstimate,
        arms: ArmVisibility,
        cfg: &CurlConfig,
    ) -> Option<RepOutcome> {
        let bands = compensate(&cfg.thresholds, &cfg.compensation, orientation.smoothed_angle_deg);
        let guards = LimbGuards {
            min_phase_s: cfg.min_phase_s,
            min_rep_s: cfg.min_rep_s,
        };
        let mode = self.mode.unwrap_or_else(|| choose_mode(orientation, arms));

        // the unused arm stays disarmed while counting from one side
        if let LimbMode::Single(side) = mode {
            self.limb_mut(side.other()).reset(t);
        }

        let mut events = [LimbEvent::None; 2];
        for (slot, side) in [Side::Left, Side::Right].into_iter().enumerate() {
            if !mode.sides().contains(&side) {
                continue;
            }
            // an arm that already completed is held at rest
            if self.pending.is_some_and(|(held, _)| held == side) {
                continue;
            }
            let angle = values.get(Channel::elbow(side));
            events[slot] = self.limb_mut(side).update(angle, t, &bands, &guards);
        }
        let fired = |e: LimbEvent| events.iter().any(|x| *x == e);

        if self.window.is_none() && fired(LimbEvent::Started) {
            self.open_window(t, mode);
        }
        if let Some(window) = self.window.as_mut() {
            window.observe(t, values);
            if fired(LimbEvent::ReachedTop) {
                window.mark_bottom(t);
            }
        }

        if fired(LimbEvent::Aborted) {
            return Some(self.discard(t, DiscardReason::Aborted));
        }

        let completed: Vec<Side> = [Side::Left, Side::Right]
            .into_iter()
            .zip(events)
            .filter(|(_, e)| *e == LimbEvent::Completed)
            .map(|(s, _)| s)
            .collect();

        match mode {
            LimbMode::Single(_) => {
                if !completed.is_empty() {
                    return Some(self.credit(t, mode));
                }
            }
            LimbMode::Both => {
                if completed.len() == 2 {
                    return Some(self.credit(t, mode));
                }
                if let Some(&side) = completed.first() {
                    if let Some((_, first_at)) = self.pending {
                        if t - first_at <= cfg.sync_window_s as f64 {
                            return Some(self.credit(t, mode));
                        }
                        return Some(self.discard(t, DiscardReason::OutOfSync));
                    }
                    if self.limb(side.other()).is_resting() {
                        return Some(self.discard(t, DiscardReason::OneSided));
                    }
                    self.pending = Some((side, t));
                }
                if let Some((_, first_at)) = self.pending {
                    if t - first_at > cfg.sync_window_s as f64 {
                        return Some(self.discard(t, DiscardReason::OutOfSync));
                    }
                }
            }
        }
        None
    }

    /// Drop any rep in progress and disarm both arms
    pub fn abandon(&mut self, t: f64) -> Option<RepOutcome> {
        if self.window.is_some() {
            Some(self.discard(t, DiscardReason::LostTracking))
        } else {
            self.left.reset(t);
            self.right.reset(t);
            None
        }
    }

    fn open_window(&mut self, t: f64, mode: LimbMode) {
        let mut window = RepWindow::open(t);
        for side in mode.sides() {
            if let Some((peak, at)) = self.limb(*side).rest_peak() {
                window.seed(Channel::elbow(*side), peak, at);
            }
        }
        log::debug!("rep window opened at {:.2}s in {:?} mode", t, mode);
        self.window = Some(window);
        self.mode = Some(mode);
    }

    fn credit(&mut self, t: f64, mode: LimbMode) -> RepOutcome {
        self.pending = None;
        self.mode = None;
        match self.window.take().and_then(|w| w.close(t)) {
            Some(window) => RepOutcome::Credited { window, mode },
            None => self.discard(t, DiscardReason::Aborted),
        }
    }

    fn discard(&mut self, t: f64, reason: DiscardReason) -> RepOutcome {
        log::warn!("curl attempt discarded at {:.2}s: {:?}", t, reason);
        self.left.reset(t);
        self.right.reset(t);
        self.window = None;
        self.mode = None;
        self.pending = None;
        RepOutcome::Discarded(reason)
    }
}
