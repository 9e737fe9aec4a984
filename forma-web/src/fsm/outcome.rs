//! What a rep-cycle machine hands back when a rep window closes

use crate::scoring::{ClosedWindow, LimbMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    /// A limb returned to rest without a valid full cycle
    Aborted,
    /// One limb cycled while the other never left rest
    OneSided,
    /// The second limb missed the synchronization window
    OutOfSync,
    /// The descent was too short to count even as a partial rep
    TooShort,
    /// Tracking was lost mid-rep
    LostTracking,
}

#[derive(Clone, Debug)]
pub enum RepOutcome {
    /// A full rep: the window is ready for both scorers
    Credited { window: ClosedWindow, mode: LimbMode },
    /// Counted, but never scored; `turn` is where the descent reversed
    Partial { start: f64, turn: f64, end: f64 },
    /// Not a rep and not a fault; simply dropped
    Discarded(DiscardReason),
}
