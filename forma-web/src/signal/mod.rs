//! Signal module - per-channel angle conditioning
//!
//! Re-exports only. All logic in submodules.

mod channels;
mod median_ema;

pub use channels::{AngleBank, Channel, ChannelValues, DisplayAngle};
pub use median_ema::ChannelSmoother;
