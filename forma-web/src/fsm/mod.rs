//! Rep-cycle state machines
//!
//! Re-exports only. All logic in submodules.

mod bilateral;
mod floor_press;
mod limb;
mod outcome;

pub use bilateral::{choose_mode, ArmVisibility, BilateralMachine};
pub use floor_press::{tracked_elbow, PushupMachine, PushupPhase};
pub use limb::{compensate, LimbEvent, LimbGuards, LimbMachine, LimbPhase};
pub use outcome::{DiscardReason, RepOutcome};
