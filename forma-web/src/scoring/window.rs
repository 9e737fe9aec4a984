//! Rep window aggregator
//!
//! Accumulates per-channel extrema and phase timestamps while a rep is in
//! progress. It never interprets values, so every exercise's state machine
//! can reuse it. Closing consumes the open window and yields a read-only
//! `ClosedWindow` for the scorers.

use serde::Serialize;

use crate::signal::{Channel, ChannelValues};

/// Running min/max of one channel and when each was reached
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Extrema {
    pub min: f32,
    pub max: f32,
    pub min_at: f64,
    pub max_at: f64,
}

impl Extrema {
    fn new(value: f32, t: f64) -> Self {
        Self {
            min: value,
            max: value,
            min_at: t,
            max_at: t,
        }
    }

    fn include(&mut self, value: f32, t: f64) {
        if value < self.min {
            self.min = value;
            self.min_at = t;
        }
        if value > self.max {
            self.max = value;
            self.max_at = t;
        }
    }

    pub fn range(&self) -> f32 {
        self.max - self.min
    }
}

#[derive(Clone, Debug)]
pub struct RepWindow {
    extrema: [Option<Extrema>; Channel::COUNT],
    start: f64,
    bottom: Option<f64>,
    frames: u32,
}

impl RepWindow {
    pub fn open(start: f64) -> Self {
        Self {
            extrema: [None; Channel::COUNT],
            start,
            bottom: None,
            frames: 0,
        }
    }

    /// Fold one frame of smoothed values into the extrema; NaN is skipped
    pub fn observe(&mut self, t: f64, values: &ChannelValues) {
        for (channel, value) in values.iter() {
            self.include(channel, value, t);
        }
        self.frames += 1;
    }

    /// Include a value observed before the window opened (e.g. rest peak)
    pub fn seed(&mut self, channel: Channel, value: f32, t: f64) {
        self.include(channel, value, t);
    }

    /// Record the deepest phase being entered; the latest entry wins
    pub fn mark_bottom(&mut self, t: f64) {
        self.bottom = Some(t);
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn has_bottom(&self) -> bool {
        self.bottom.is_some()
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn extrema(&self, channel: Channel) -> Option<Extrema> {
        self.extrema[channel.index()]
    }

    /// Close the window; None when the deepest phase was never reached
    pub fn close(self, end: f64) -> Option<ClosedWindow> {
        let bottom = self.bottom?;
        Some(ClosedWindow {
            extrema: self.extrema,
            start: self.start,
            bottom,
            end,
            frames: self.frames,
        })
    }

    fn include(&mut self, channel: Channel, value: f32, t: f64) {
        if !value.is_finite() {
            return;
        }
        match &mut self.extrema[channel.index()] {
            Some(e) => e.include(value, t),
            slot @ None => *slot = Some(Extrema::new(value, t)),
        }
    }
}

/// A completed rep window, handed read-only to both scorers
#[derive(Clone, Debug)]
pub struct ClosedWindow {
    extrema: [Option<Extrema>; Channel::COUNT],
    pub start: f64,
    pub bottom: f64,
    pub end: f64,
    pub frames: u32,
}

impl ClosedWindow {
    pub fn extrema(&self, channel: Channel) -> Option<Extrema> {
        self.extrema[channel.index()]
    }

    /// Min of a channel, NaN if never observed
    pub fn min(&self, channel: Channel) -> f32 {
        self.extrema(channel).map_or(f32::NAN, |e| e.min)
    }

    pub fn max(&self, channel: Channel) -> f32 {
        self.extrema(channel).map_or(f32::NAN, |e| e.max)
    }

    pub fn range(&self, channel: Channel) -> f32 {
        self.extrema(channel).map_or(f32::NAN, |e| e.range())
    }

    pub fn duration(&self) -> f32 {
        (self.end - self.start) as f32
    }

    /// Time from rep start to the deepest phase
    pub fn to_bottom(&self) -> f32 {
        (self.bottom - self.start) as f32
    }

    /// Time from the deepest phase to rep end
    pub fn from_bottom(&self) -> f32 {
        (self.end - self.bottom) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(elbow: f32, lean: f32) -> ChannelValues {
        let mut v = ChannelValues::default();
        v.set(Channel::LeftElbow, elbow);
        v.set(Channel::TorsoLean, lean);
        v
    }

    #[test]
    fn test_tracks_extrema_and_times() {
        let mut w = RepWindow::open(1.0);
        w.observe(1.0, &values(140.0, 2.0));
        w.observe(1.3, &values(50.0, -3.0));
        w.observe(1.6, &values(145.0, 1.0));
        w.mark_bottom(1.3);

        let closed = w.close(1.6).unwrap();
        let elbow = closed.extrema(Channel::LeftElbow).unwrap();
        assert_eq!(elbow.min, 50.0);
        assert_eq!(elbow.min_at, 1.3);
        assert_eq!(elbow.max, 145.0);
        assert_eq!(closed.range(Channel::TorsoLean), 5.0);
        assert_eq!(closed.frames, 3);
        assert!((closed.to_bottom() - 0.3).abs() < 1e-6);
        assert!((closed.from_bottom() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_nan_is_skipped() {
        let mut w = RepWindow::open(0.0);
        w.observe(0.0, &values(f32::NAN, 1.0));
        assert!(w.extrema(Channel::LeftElbow).is_none());
        w.observe(0.1, &values(90.0, 1.0));
        assert_eq!(w.extrema(Channel::LeftElbow).map(|e| e.min), Some(90.0));
    }

    #[test]
    fn test_seed_counts_toward_extrema_not_frames() {
        let mut w = RepWindow::open(0.5);
        w.seed(Channel::LeftElbow, 172.0, 0.4);
        w.observe(0.5, &values(138.0, 0.0));
        w.mark_bottom(0.5);
        let closed = w.close(0.9).unwrap();
        assert_eq!(closed.max(Channel::LeftElbow), 172.0);
        assert_eq!(closed.frames, 1);
    }

    #[test]
    fn test_close_requires_bottom() {
        let w = RepWindow::open(0.0);
        assert!(w.close(1.0).is_none());
    }

    #[test]
    fn test_unobserved_channel_is_nan() {
        let mut w = RepWindow::open(0.0);
        w.mark_bottom(0.2);
        let closed = w.close(0.4).unwrap();
        assert!(closed.min(Channel::HipLine).is_nan());
        assert!(closed.range(Channel::HipLine).is_nan());
    }
}
