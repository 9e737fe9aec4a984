//! Heuristic exercise detector
//!
//! Every candidate has mandatory posture gates and a strength in [0, 1].
//! The strongest passing candidate wins; ties go to the earlier entry of
//! `ExerciseKind::TIE_BREAK_ORDER`. A short majority vote then decides
//! which exercise is current.

use crate::config::GenericConfig;

use super::buffer::VoteBuffer;
use super::features::PostureFeatures;
use super::model::ExerciseKind;

/// Strengths closer than this count as a tie
const TIE_EPSILON: f32 = 1e-3;

/// Gate and score one candidate; None when a gate fails
pub fn candidate_strength(kind: ExerciseKind, f: &PostureFeatures, cfg: &GenericConfig) -> Option<f32> {
    match kind {
        ExerciseKind::BicepCurl => {
            let gated = f.elbow.is_finite()
                && f.elbow_below_shoulder
                && f.elbow_offset <= cfg.curl_max_elbow_offset
                && f.inclination <= cfg.curl_max_inclination;
            gated.then(|| {
                let near_body = 1.0 - f.elbow_offset / cfg.curl_max_elbow_offset.max(1e-3);
                let flexion = (180.0 - f.elbow) / 180.0;
                (near_body * 0.5 + flexion * 0.5).clamp(0.0, 1.0)
            })
        }
        ExerciseKind::PushUp => {
            let gated = f.elbow.is_finite()
                && f.inclination >= cfg.pushup_min_inclination
                && f.level_gap <= cfg.pushup_max_level_gap;
            gated.then(|| {
                let span = (90.0 - cfg.pushup_min_inclination).max(1.0);
                ((f.inclination - cfg.pushup_min_inclination) / span).clamp(0.0, 1.0)
            })
        }
        ExerciseKind::Squat => {
            let gated =
                f.knee.is_finite() && f.stacked && f.inclination <= cfg.squat_max_inclination;
            gated.then(|| {
                let bend = ((180.0 - f.knee) / 90.0).clamp(0.0, 1.0);
                0.3 + bend * 0.7
            })
        }
    }
}

/// Best passing candidate for one frame
pub fn classify(f: &PostureFeatures, cfg: &GenericConfig) -> Option<ExerciseKind> {
    let mut best: Option<(ExerciseKind, f32)> = None;
    for kind in ExerciseKind::TIE_BREAK_ORDER {
        let Some(strength) = candidate_strength(kind, f, cfg) else {
            continue;
        };
        match best {
            Some((_, top)) if strength <= top + TIE_EPSILON => {}
            _ => best = Some((kind, strength)),
        }
    }
    best.map(|(kind, _)| kind)
}

/// Vote-stabilized detector state
#[derive(Clone, Debug)]
pub struct ExerciseDetector {
    votes: VoteBuffer,
    current: Option<ExerciseKind>,
}

impl ExerciseDetector {
    pub fn new(cfg: &GenericConfig) -> Self {
        Self {
            votes: VoteBuffer::new(cfg.vote_window),
            current: None,
        }
    }

    /// Classify one frame; returns the current (vote-stable) exercise
    pub fn update(&mut self, f: &PostureFeatures, cfg: &GenericConfig) -> Option<ExerciseKind> {
        self.votes.push(classify(f, cfg));
        if let Some(winner) = self.votes.majority() {
            if self.current != Some(winner) {
                log::info!("detected exercise: {}", winner.as_str());
                self.current = Some(winner);
            }
        }
        self.current
    }

    pub fn current(&self) -> Option<ExerciseKind> {
        self.current
    }

    pub fn reset(&mut self) {
        self.votes.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> PostureFeatures {
        PostureFeatures {
            elbow: f32::NAN,
            knee: f32::NAN,
            inclination: f32::NAN,
            elbow_offset: f32::NAN,
            elbow_below_shoulder: false,
            level_gap: f32::NAN,
            stacked: false,
        }
    }

    fn curling() -> PostureFeatures {
        PostureFeatures {
            elbow: 60.0,
            knee: 175.0,
            inclination: 3.0,
            elbow_offset: 0.05,
            elbow_below_shoulder: true,
            level_gap: 0.3,
            stacked: true,
        }
    }

    fn plank() -> PostureFeatures {
        PostureFeatures {
            elbow: 160.0,
            knee: 175.0,
            inclination: 85.0,
            elbow_offset: 2.0,
            elbow_below_shoulder: true,
            level_gap: 0.03,
            stacked: false,
        }
    }

    fn squatting() -> PostureFeatures {
        PostureFeatures {
            elbow: 170.0,
            knee: 95.0,
            inclination: 35.0,
            elbow_offset: 0.1,
            elbow_below_shoulder: true,
            level_gap: 0.2,
            stacked: true,
        }
    }

    #[test]
    fn test_nothing_visible() {
        assert_eq!(classify(&features(), &GenericConfig::default()), None);
    }

    #[test]
    fn test_each_posture() {
        let cfg = GenericConfig::default();
        assert_eq!(classify(&curling(), &cfg), Some(ExerciseKind::BicepCurl));
        assert_eq!(classify(&plank(), &cfg), Some(ExerciseKind::PushUp));
        assert_eq!(classify(&squatting(), &cfg), Some(ExerciseKind::Squat));
    }

    #[test]
    fn test_tie_goes_to_earlier_candidate() {
        let cfg = GenericConfig::default();
        // curl: 0.5 * 1.0 + 0.5 * 0.0 = 0.5; squat: 0.3 + 0.7 * (2/7) = 0.5
        let f = PostureFeatures {
            elbow: 180.0,
            knee: 180.0 - 90.0 * 2.0 / 7.0,
            inclination: 0.0,
            elbow_offset: 0.0,
            elbow_below_shoulder: true,
            level_gap: 0.3,
            stacked: true,
        };
        let curl = candidate_strength(ExerciseKind::BicepCurl, &f, &cfg).unwrap();
        let squat = candidate_strength(ExerciseKind::Squat, &f, &cfg).unwrap();
        assert!((curl - squat).abs() < TIE_EPSILON);
        assert_eq!(classify(&f, &cfg), Some(ExerciseKind::Squat));
    }

    #[test]
    fn test_vote_suppresses_flicker() {
        let cfg = GenericConfig::default();
        let mut det = ExerciseDetector::new(&cfg);
        assert_eq!(det.update(&curling(), &cfg), None);
        assert_eq!(det.update(&curling(), &cfg), Some(ExerciseKind::BicepCurl));
        // a single stray frame does not switch
        assert_eq!(det.update(&squatting(), &cfg), Some(ExerciseKind::BicepCurl));
        assert_eq!(det.update(&curling(), &cfg), Some(ExerciseKind::BicepCurl));
        det.update(&squatting(), &cfg);
        assert_eq!(det.update(&squatting(), &cfg), Some(ExerciseKind::Squat));
    }
}
