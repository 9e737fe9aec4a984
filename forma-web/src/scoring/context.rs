//! Which limbs a rep was tracked with, and from what viewpoint

use serde::Serialize;

use crate::pose::Side;
use crate::tracking::OrientationZone;

/// Limbs participating in a rep, latched when the rep window opens
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbMode {
    Both,
    Single(Side),
}

impl LimbMode {
    pub fn sides(self) -> &'static [Side] {
        match self {
            LimbMode::Both => &[Side::Left, Side::Right],
            LimbMode::Single(Side::Left) => &[Side::Left],
            LimbMode::Single(Side::Right) => &[Side::Right],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScoringContext {
    pub zone: OrientationZone,
    pub mode: LimbMode,
}

impl ScoringContext {
    pub fn new(zone: OrientationZone, mode: LimbMode) -> Self {
        Self { zone, mode }
    }

    /// Left/right comparison needs both sides facing the camera
    pub fn symmetry_reliable(&self) -> bool {
        self.mode == LimbMode::Both && self.zone == OrientationZone::Frontal
    }

    /// Secondary-joint checks are suppressed side-on and in single-limb mode
    pub fn secondary_reliable(&self) -> bool {
        self.mode == LimbMode::Both && self.zone != OrientationZone::Side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides() {
        assert_eq!(LimbMode::Both.sides().len(), 2);
        assert_eq!(LimbMode::Single(Side::Right).sides(), &[Side::Right]);
    }

    #[test]
    fn test_reliability_by_zone() {
        let frontal = ScoringContext::new(OrientationZone::Frontal, LimbMode::Both);
        assert!(frontal.symmetry_reliable());
        assert!(frontal.secondary_reliable());

        let oblique = ScoringContext::new(OrientationZone::Oblique, LimbMode::Both);
        assert!(!oblique.symmetry_reliable());
        assert!(oblique.secondary_reliable());

        let single = ScoringContext::new(OrientationZone::Frontal, LimbMode::Single(Side::Left));
        assert!(!single.symmetry_reliable());
        assert!(!single.secondary_reliable());
    }
}
