//! Engine configuration
//!
//! Every threshold, guard duration and penalty constant used by the state
//! machines and scorers lives here, so a new exercise table can be added
//! without touching the implementations. All tables deserialize over their
//! defaults: a JSON override only has to name the fields it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fsm::compensate;
use crate::scoring::{PenaltyCurve, TempoRule};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Validation(msg.to_string())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub smoothing: SmoothingConfig,
    pub orientation: OrientationConfig,
    pub stability: StabilityConfig,
    pub curl: CurlConfig,
    pub pushup: PushupConfig,
    pub generic: GenericConfig,
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.smoothing.validate()?;
        self.orientation.validate()?;
        self.stability.validate()?;
        self.curl.validate()?;
        self.pushup.validate()?;
        self.generic.validate()?;
        Ok(())
    }
}

// ============================================================================
// SIGNAL CONDITIONING
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Median window length (frames)
    pub window: usize,
    /// EMA weight of the new median
    pub alpha: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self { window: 5, alpha: 0.3 }
    }
}

impl SmoothingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 {
            return Err(invalid("smoothing.window must be >= 1"));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(invalid("smoothing.alpha must be in (0, 1]"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Slower than the joint channels to keep the zone from flapping
    pub alpha: f32,
    pub frontal_max_deg: f32,
    pub side_min_deg: f32,
    /// Shoulder depth difference below which neither side leads
    pub depth_epsilon: f32,
    pub visibility: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            alpha: 0.25,
            frontal_max_deg: 20.0,
            side_min_deg: 55.0,
            depth_epsilon: 0.05,
            visibility: 0.3,
        }
    }
}

impl OrientationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(invalid("orientation.alpha must be in (0, 1]"));
        }
        if !(0.0..=90.0).contains(&self.frontal_max_deg)
            || !(0.0..=90.0).contains(&self.side_min_deg)
            || self.frontal_max_deg >= self.side_min_deg
        {
            return Err(invalid(
                "orientation bands must satisfy 0 <= frontal_max_deg < side_min_deg <= 90",
            ));
        }
        if self.depth_epsilon < 0.0 {
            return Err(invalid("orientation.depth_epsilon must be non-negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Mean confidence a joint group must reach
    pub min_confidence: f32,
    /// Consecutive good frames before the gate opens
    pub warmup_frames: u32,
    /// Consecutive bad frames before an open gate closes again
    pub dropout_frames: u32,
    pub visibility: f32,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            warmup_frames: 8,
            dropout_frames: 15,
            visibility: 0.3,
        }
    }
}

impl StabilityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(invalid("stability.min_confidence must be in [0, 1]"));
        }
        if self.warmup_frames == 0 || self.dropout_frames == 0 {
            return Err(invalid("stability frame counts must be >= 1"));
        }
        Ok(())
    }
}

// ============================================================================
// BILATERAL CURL (two-limb variant)
// ============================================================================

/// Hysteresis bands on the elbow flexion angle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LimbThresholds {
    /// At or above: arm counts as extended (enter Rest)
    pub extended_enter: f32,
    /// Below: arm has left Rest
    pub extended_exit: f32,
    /// At or below: arm counts as flexed (enter Top)
    pub flexed_enter: f32,
    /// Above: arm has left Top
    pub flexed_exit: f32,
}

impl Default for LimbThresholds {
    fn default() -> Self {
        Self {
            extended_enter: 150.0,
            extended_exit: 140.0,
            flexed_enter: 75.0,
            flexed_exit: 85.0,
        }
    }
}

impl LimbThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.flexed_enter < self.flexed_exit
            && self.flexed_exit < self.extended_exit
            && self.extended_exit < self.extended_enter)
        {
            return Err(invalid(
                "limb thresholds must satisfy flexed_enter < flexed_exit < extended_exit < extended_enter",
            ));
        }
        Ok(())
    }
}

/// Foreshortening compensation, linear in the smoothed rotation angle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdCompensation {
    /// Extended thresholds move down this much per degree of rotation
    pub extended_shift_per_deg: f32,
    /// Flexed thresholds move up this much per degree of rotation
    pub flexed_shift_per_deg: f32,
}

impl Default for ThresholdCompensation {
    fn default() -> Self {
        Self {
            extended_shift_per_deg: 0.15,
            flexed_shift_per_deg: 0.2,
        }
    }
}

impl ThresholdCompensation {
    /// The shifted bands must stay ordered over the whole rotation range
    pub fn validate(&self, base: &LimbThresholds) -> Result<(), ConfigError> {
        if !(self.extended_shift_per_deg >= 0.0 && self.flexed_shift_per_deg >= 0.0) {
            return Err(invalid("compensation shifts must be non-negative"));
        }
        compensate(base, self, 90.0)
            .validate()
            .map_err(|_| invalid("compensation reorders the limb thresholds before 90 degrees of rotation"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlScoring {
    pub target_flexion: f32,
    pub target_extension: f32,
    pub flexion_shortfall: PenaltyCurve,
    pub extension_shortfall: PenaltyCurve,
    pub shoulder_takeover: PenaltyCurve,
    pub torso_sway: PenaltyCurve,
    pub concentric: TempoRule,
    pub eccentric: TempoRule,
    pub asymmetry: PenaltyCurve,
}

impl Default for CurlScoring {
    fn default() -> Self {
        Self {
            target_flexion: 55.0,
            target_extension: 160.0,
            flexion_shortfall: PenaltyCurve::new(10.0, 0.15, 25.0),
            extension_shortfall: PenaltyCurve::new(5.0, 0.1, 15.0),
            shoulder_takeover: PenaltyCurve::new(15.0, 0.05, 20.0),
            torso_sway: PenaltyCurve::new(5.0, 0.3, 25.0),
            concentric: TempoRule::new(0.2, PenaltyCurve::new(0.0, 400.0, 10.0)),
            eccentric: TempoRule::new(0.4, PenaltyCurve::new(0.0, 400.0, 15.0)),
            asymmetry: PenaltyCurve::new(10.0, 0.1, 15.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlFeedback {
    /// Peak flexion above this: curl not high enough
    pub max_top_angle: f32,
    /// Extension below this: arms not straightened
    pub min_lockout_angle: f32,
    pub min_range: f32,
    pub max_shoulder_swing: f32,
    pub max_torso_sway: f32,
    pub min_concentric_s: f32,
    pub min_eccentric_s: f32,
    pub max_asymmetry: f32,
}

impl Default for CurlFeedback {
    fn default() -> Self {
        Self {
            max_top_angle: 70.0,
            min_lockout_angle: 155.0,
            min_range: 90.0,
            max_shoulder_swing: 25.0,
            max_torso_sway: 12.0,
            min_concentric_s: 0.2,
            min_eccentric_s: 0.4,
            max_asymmetry: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlConfig {
    pub visibility: f32,
    pub thresholds: LimbThresholds,
    pub compensation: ThresholdCompensation,
    /// Shortest accepted Ascending phase
    pub min_phase_s: f32,
    /// Shortest accepted full cycle
    pub min_rep_s: f32,
    /// Max gap between the two limbs returning to Rest
    pub sync_window_s: f32,
    pub scoring: CurlScoring,
    pub feedback: CurlFeedback,
}

impl Default for CurlConfig {
    fn default() -> Self {
        Self {
            visibility: 0.3,
            thresholds: LimbThresholds::default(),
            compensation: ThresholdCompensation::default(),
            min_phase_s: 0.12,
            min_rep_s: 0.5,
            sync_window_s: 0.4,
            scoring: CurlScoring::default(),
            feedback: CurlFeedback::default(),
        }
    }
}

impl CurlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.compensation.validate(&self.thresholds)?;
        if self.min_phase_s < 0.0 || self.min_rep_s <= 0.0 || self.sync_window_s <= 0.0 {
            return Err(invalid("curl durations must be positive"));
        }
        let s = &self.scoring;
        let curves = [
            s.flexion_shortfall,
            s.extension_shortfall,
            s.shoulder_takeover,
            s.torso_sway,
            s.concentric.curve,
            s.eccentric.curve,
            s.asymmetry,
        ];
        if !curves.iter().all(PenaltyCurve::is_valid) {
            return Err(invalid("curl penalty curves must be non-negative"));
        }
        Ok(())
    }
}

// ============================================================================
// PUSH-UP (single-body four-phase variant)
// ============================================================================

/// Posture the body must hold before the machine arms itself
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlankArming {
    /// Shoulder-hip-ankle angle floor
    pub min_body_line: f32,
    /// Torso angle from vertical floor (90 = horizontal)
    pub min_inclination: f32,
    pub hold_s: f32,
    /// Time out of posture after which Plank falls back to Idle
    pub disarm_after_s: f32,
}

impl Default for PlankArming {
    fn default() -> Self {
        Self {
            min_body_line: 155.0,
            min_inclination: 55.0,
            hold_s: 1.0,
            disarm_after_s: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PushupThresholds {
    pub plank_enter: f32,
    pub plank_exit: f32,
    pub bottom_enter: f32,
    pub bottom_exit: f32,
}

impl Default for PushupThresholds {
    fn default() -> Self {
        Self {
            plank_enter: 150.0,
            plank_exit: 140.0,
            bottom_enter: 95.0,
            bottom_exit: 105.0,
        }
    }
}

impl PushupThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bottom_enter < self.bottom_exit
            && self.bottom_exit < self.plank_exit
            && self.plank_exit < self.plank_enter)
        {
            return Err(invalid(
                "push-up thresholds must satisfy bottom_enter < bottom_exit < plank_exit < plank_enter",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushupScoring {
    pub target_depth: f32,
    pub target_lockout: f32,
    pub depth_shortfall: PenaltyCurve,
    pub lockout_shortfall: PenaltyCurve,
    pub hip_line: PenaltyCurve,
    pub eccentric: TempoRule,
    pub concentric: TempoRule,
    pub asymmetry: PenaltyCurve,
}

impl Default for PushupScoring {
    fn default() -> Self {
        Self {
            target_depth: 80.0,
            target_lockout: 160.0,
            depth_shortfall: PenaltyCurve::new(10.0, 0.1, 30.0),
            lockout_shortfall: PenaltyCurve::new(5.0, 0.1, 15.0),
            hip_line: PenaltyCurve::new(8.0, 0.2, 25.0),
            eccentric: TempoRule::new(0.2, PenaltyCurve::new(0.0, 400.0, 15.0)),
            concentric: TempoRule::new(0.25, PenaltyCurve::new(0.0, 400.0, 10.0)),
            asymmetry: PenaltyCurve::new(10.0, 0.1, 15.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushupFeedback {
    pub max_bottom_angle: f32,
    pub min_lockout_angle: f32,
    pub min_range: f32,
    pub max_sag: f32,
    pub max_pike: f32,
    pub min_eccentric_s: f32,
    pub min_concentric_s: f32,
    pub max_asymmetry: f32,
}

impl Default for PushupFeedback {
    fn default() -> Self {
        Self {
            max_bottom_angle: 90.0,
            min_lockout_angle: 155.0,
            min_range: 60.0,
            max_sag: 12.0,
            max_pike: 12.0,
            min_eccentric_s: 0.2,
            min_concentric_s: 0.25,
            max_asymmetry: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushupConfig {
    pub visibility: f32,
    pub arming: PlankArming,
    pub thresholds: PushupThresholds,
    /// Descending phase shorter than this never counts as a partial rep
    pub min_descent_s: f32,
    pub min_rep_s: f32,
    pub scoring: PushupScoring,
    pub feedback: PushupFeedback,
}

impl Default for PushupConfig {
    fn default() -> Self {
        Self {
            visibility: 0.3,
            arming: PlankArming::default(),
            thresholds: PushupThresholds::default(),
            min_descent_s: 0.25,
            min_rep_s: 0.6,
            scoring: PushupScoring::default(),
            feedback: PushupFeedback::default(),
        }
    }
}

impl PushupConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.arming.hold_s < 0.0 || self.arming.disarm_after_s <= 0.0 {
            return Err(invalid("push-up arming durations must be positive"));
        }
        if self.min_descent_s < 0.0 || self.min_rep_s <= 0.0 {
            return Err(invalid("push-up durations must be positive"));
        }
        let s = &self.scoring;
        let curves = [
            s.depth_shortfall,
            s.lockout_shortfall,
            s.hip_line,
            s.eccentric.curve,
            s.concentric.curve,
            s.asymmetry,
        ];
        if !curves.iter().all(PenaltyCurve::is_valid) {
            return Err(invalid("push-up penalty curves must be non-negative"));
        }
        Ok(())
    }
}

// ============================================================================
// GENERIC DETECTOR
// ============================================================================

/// Two-phase counter band plus the depth/posture limits for form tiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TwoPhaseThresholds {
    /// Primary angle below this: contracted
    pub contracted_below: f32,
    /// Primary angle above this: extended (a rep completes here)
    pub extended_above: f32,
    /// Deepest angle at or below this earns full depth credit
    pub good_depth: f32,
    /// Torso lean beyond this costs a tier
    pub max_lean: f32,
}

impl TwoPhaseThresholds {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !(self.good_depth <= self.contracted_below && self.contracted_below < self.extended_above)
        {
            return Err(ConfigError::Validation(format!(
                "generic.{name} must satisfy good_depth <= contracted_below < extended_above"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericConfig {
    pub visibility: f32,
    /// Frames that must agree before a classification becomes current
    pub vote_window: usize,
    /// Elbow offset from the shoulder line, as a fraction of torso length
    pub curl_max_elbow_offset: f32,
    pub curl_max_inclination: f32,
    pub pushup_min_inclination: f32,
    /// Max |shoulder.y - hip.y| for a horizontal body
    pub pushup_max_level_gap: f32,
    pub squat_max_inclination: f32,
    pub curl: TwoPhaseThresholds,
    pub pushup: TwoPhaseThresholds,
    pub squat: TwoPhaseThresholds,
}

impl Default for GenericConfig {
    fn default() -> Self {
        Self {
            visibility: 0.3,
            vote_window: 2,
            curl_max_elbow_offset: 0.35,
            curl_max_inclination: 30.0,
            pushup_min_inclination: 60.0,
            pushup_max_level_gap: 0.15,
            squat_max_inclination: 60.0,
            curl: TwoPhaseThresholds {
                contracted_below: 60.0,
                extended_above: 150.0,
                good_depth: 45.0,
                max_lean: 12.0,
            },
            pushup: TwoPhaseThresholds {
                contracted_below: 100.0,
                extended_above: 150.0,
                good_depth: 85.0,
                max_lean: 15.0,
            },
            squat: TwoPhaseThresholds {
                contracted_below: 110.0,
                extended_above: 160.0,
                good_depth: 90.0,
                max_lean: 45.0,
            },
        }
    }
}

impl GenericConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vote_window == 0 {
            return Err(invalid("generic.vote_window must be >= 1"));
        }
        self.curl.validate("curl")?;
        self.pushup.validate("pushup")?;
        self.squat.validate("squat")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let config = EngineConfig::from_json(
            r#"{ "curl": { "sync_window_s": 0.6, "thresholds": { "flexed_enter": 70.0 } } }"#,
        )
        .unwrap();
        assert_eq!(config.curl.sync_window_s, 0.6);
        assert_eq!(config.curl.thresholds.flexed_enter, 70.0);
        assert_eq!(config.curl.thresholds.extended_enter, 150.0);
        assert_eq!(config.smoothing.window, 5);
    }

    #[test]
    fn test_inverted_band_rejected() {
        let err = EngineConfig::from_json(r#"{ "curl": { "thresholds": { "flexed_exit": 145.0 } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_compensation_that_crosses_bands_rejected() {
        let err = EngineConfig::from_json(r#"{ "curl": { "compensation": { "flexed_shift_per_deg": 1.0 } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = EngineConfig::from_json(r#"{ "curl": { "compensation": { "extended_shift_per_deg": -0.1 } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_default_compensation_keeps_bands_ordered() {
        let curl = CurlConfig::default();
        for rotation in [0.0, 30.0, 60.0, 90.0] {
            assert!(compensate(&curl.thresholds, &curl.compensation, rotation).validate().is_ok());
        }
    }

    #[test]
    fn test_bad_alpha_rejected() {
        let err = EngineConfig::from_json(r#"{ "smoothing": { "alpha": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
