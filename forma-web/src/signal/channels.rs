//! Named angle channels and the per-channel smoothing bank

use serde::{Deserialize, Serialize};

use super::median_ema::ChannelSmoother;
use crate::config::SmoothingConfig;
use crate::pose::Side;

/// A scalar angle derived from joints, always in degrees
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    LeftElbow,
    RightElbow,
    LeftShoulder,
    RightShoulder,
    LeftKnee,
    RightKnee,
    /// Signed hip→shoulder lean from vertical, positive = forward
    TorsoLean,
    /// Unsigned hip→shoulder angle from vertical, 90 = horizontal
    TorsoInclination,
    /// Signed shoulder-hip-ankle bend, positive = sag
    HipLine,
}

impl Channel {
    pub const COUNT: usize = 9;

    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::LeftElbow,
        Channel::RightElbow,
        Channel::LeftShoulder,
        Channel::RightShoulder,
        Channel::LeftKnee,
        Channel::RightKnee,
        Channel::TorsoLean,
        Channel::TorsoInclination,
        Channel::HipLine,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn elbow(side: Side) -> Self {
        match side {
            Side::Left => Channel::LeftElbow,
            Side::Right => Channel::RightElbow,
        }
    }

    pub fn shoulder(side: Side) -> Self {
        match side {
            Side::Left => Channel::LeftShoulder,
            Side::Right => Channel::RightShoulder,
        }
    }

    pub fn knee(side: Side) -> Self {
        match side {
            Side::Left => Channel::LeftKnee,
            Side::Right => Channel::RightKnee,
        }
    }
}

/// One value per channel; NaN = not computable this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelValues([f32; Channel::COUNT]);

impl Default for ChannelValues {
    fn default() -> Self {
        Self([f32::NAN; Channel::COUNT])
    }
}

impl ChannelValues {
    pub fn get(&self, channel: Channel) -> f32 {
        self.0[channel.index()]
    }

    pub fn set(&mut self, channel: Channel, value: f32) {
        self.0[channel.index()] = value;
    }

    pub fn any_finite(&self) -> bool {
        self.0.iter().any(|v| v.is_finite())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, f32)> + '_ {
        Channel::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

/// Raw and smoothed value of one channel for on-screen debugging
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DisplayAngle {
    pub channel: Channel,
    pub raw: f32,
    pub smoothed: f32,
}

/// Smoothing state for every channel, owned by one engine session
#[derive(Clone, Debug)]
pub struct AngleBank {
    smoothers: [ChannelSmoother; Channel::COUNT],
    last_raw: ChannelValues,
}

impl AngleBank {
    pub fn new(config: &SmoothingConfig) -> Self {
        Self {
            smoothers: std::array::from_fn(|_| ChannelSmoother::new(config)),
            last_raw: ChannelValues::default(),
        }
    }

    /// Push one frame of raw values, returns the smoothed values
    pub fn update(&mut self, raw: &ChannelValues) -> ChannelValues {
        self.last_raw = *raw;
        let mut smoothed = ChannelValues::default();
        for channel in Channel::ALL {
            let value = self.smoothers[channel.index()].update(raw.get(channel));
            smoothed.set(channel, value);
        }
        smoothed
    }

    pub fn smoothed(&self, channel: Channel) -> f32 {
        self.smoothers[channel.index()].value()
    }

    pub fn values(&self) -> ChannelValues {
        let mut out = ChannelValues::default();
        for channel in Channel::ALL {
            out.set(channel, self.smoothed(channel));
        }
        out
    }

    /// Raw/smoothed pairs for the given channels
    pub fn display(&self, channels: &[Channel]) -> Vec<DisplayAngle> {
        channels
            .iter()
            .map(|c| DisplayAngle {
                channel: *c,
                raw: self.last_raw.get(*c),
                smoothed: self.smoothed(*c),
            })
            .collect()
    }

    pub fn reset(&mut self) {
        for smoother in self.smoothers.iter_mut() {
            smoother.reset();
        }
        self.last_raw = ChannelValues::default();
    }
}
