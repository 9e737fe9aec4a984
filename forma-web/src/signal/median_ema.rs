//! Two-stage angle smoothing: median then exponential moving average
//!
//! The median rejects single-frame spikes from mis-tracked joints without
//! the lag of a long window; the EMA afterwards removes residual jitter.

use std::collections::VecDeque;

use crate::config::SmoothingConfig;

/// Smoothing state for one angle channel
#[derive(Clone, Debug)]
pub struct ChannelSmoother {
    /// Ring buffer of recent raw values (finite only)
    history: VecDeque<f32>,
    capacity: usize,
    alpha: f32,
    /// None until the first finite sample arrives
    smoothed: Option<f32>,
}

impl ChannelSmoother {
    pub fn new(config: &SmoothingConfig) -> Self {
        let capacity = config.window.max(1);
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
            alpha: config.alpha,
            smoothed: None,
        }
    }

    /// Feed one raw sample, returns the smoothed value (NaN until first sample)
    ///
    /// A non-finite sample freezes the channel: history and smoothed value
    /// are left untouched and the last good smoothed value is returned.
    pub fn update(&mut self, raw: f32) -> f32 {
        if !raw.is_finite() {
            return self.value();
        }

        self.history.push_back(raw);
        if self.history.len() > self.capacity {
            self.history.pop_front();
        }

        let median = median(&self.history);
        let next = match self.smoothed {
            Some(previous) => self.alpha * median + (1.0 - self.alpha) * previous,
            None => median,
        };
        self.smoothed = Some(next);
        next
    }

    /// Current smoothed value, NaN if the channel never saw a finite sample
    pub fn value(&self) -> f32 {
        self.smoothed.unwrap_or(f32::NAN)
    }

    pub fn has_value(&self) -> bool {
        self.smoothed.is_some()
    }

    /// Clear history (used when a new set starts)
    pub fn reset(&mut self) {
        self.history.clear();
        self.smoothed = None;
    }
}

/// Median of a non-empty buffer; mean of the two middle values for even lengths
fn median(values: &VecDeque<f32>) -> f32 {
    let mut sorted: Vec<f32> = values.iter().copied().collect();
    sorted.sort_by(f32::total_cmp);

    let n = sorted.len();
    match n {
        0 => f32::NAN,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => (sorted[n / 2 - 1] + sorted[n / 2]) * 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother() -> ChannelSmoother {
        ChannelSmoother::new(&SmoothingConfig::default())
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut s = smoother();
        assert!(s.value().is_nan());
        assert_eq!(s.update(120.0), 120.0);
    }

    #[test]
    fn test_constant_input_converges_and_stays() {
        let mut s = smoother();
        s.update(90.0);
        for _ in 0..60 {
            s.update(150.0);
        }
        assert!((s.value() - 150.0).abs() < 0.01);

        let settled = s.value();
        s.update(150.0);
        assert!((s.value() - settled).abs() <= (settled - 150.0).abs());
        assert!((s.value() - 150.0).abs() < 0.01);
    }

    #[test]
    fn test_nan_freezes_value() {
        let mut s = smoother();
        for _ in 0..10 {
            s.update(100.0);
        }
        let before = s.value();
        for _ in 0..5 {
            let reported = s.update(f32::NAN);
            assert!(!reported.is_nan());
            assert_eq!(reported, before);
        }
        assert_eq!(s.value(), before);
    }

    #[test]
    fn test_infinite_sample_freezes_like_nan() {
        let mut s = smoother();
        for _ in 0..10 {
            s.update(100.0);
        }
        let before = s.value();
        for _ in 0..3 {
            assert_eq!(s.update(f32::INFINITY), before);
            assert_eq!(s.update(f32::NEG_INFINITY), before);
        }
        assert_eq!(s.update(100.0), before);
        assert!(s.value().is_finite());
    }

    #[test]
    fn test_nan_before_first_sample() {
        let mut s = smoother();
        assert!(s.update(f32::NAN).is_nan());
        assert!(!s.has_value());
    }

    #[test]
    fn test_single_spike_rejected() {
        let mut s = smoother();
        for _ in 0..10 {
            s.update(160.0);
        }
        let spiked = s.update(20.0);
        assert!((spiked - 160.0).abs() < 0.01, "median should hide a lone spike");
    }

    #[test]
    fn test_median_even_and_odd() {
        let odd: VecDeque<f32> = [3.0, 1.0, 2.0].into_iter().collect();
        let even: VecDeque<f32> = [4.0, 1.0, 3.0, 2.0].into_iter().collect();
        assert_eq!(median(&odd), 2.0);
        assert_eq!(median(&even), 2.5);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut s = smoother();
        s.update(100.0);
        s.reset();
        assert!(!s.has_value());
        assert_eq!(s.update(40.0), 40.0);
    }
}
