//! Scoring module - rep window aggregation, continuous score, coaching cues
//!
//! Re-exports only. All logic in submodules.

mod context;
mod continuous;
mod cues;
mod feedback;
mod penalty;
mod window;

pub use context::{LimbMode, ScoringContext};
pub use continuous::{score_curl, score_pushup, Penalties};
pub use cues::{Cue, FormTier, RepKind, RepResult};
pub use feedback::{curl_cues, pushup_cues};
pub use penalty::{PenaltyCurve, TempoRule};
pub use window::{ClosedWindow, Extrema, RepWindow};
