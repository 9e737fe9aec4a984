//! Classifier module - generic multi-exercise detector
//!
//! Re-exports only. All logic in submodules.

mod buffer;
mod detector;
mod features;
mod model;
mod rep_counter;

pub use buffer::VoteBuffer;
pub use detector::{candidate_strength, classify, ExerciseDetector};
pub use features::{extract_features, PostureFeatures};
pub use model::{ExerciseKind, EXERCISE_COUNT};
pub use rep_counter::{CountedRep, MotionPhase, TwoPhaseCounter};
