//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod error;
mod frames;
mod messages;
mod session;

pub use error::BridgeError;
pub use frames::{frame_from_flat, FLOATS_PER_JOINT, FRAME_LEN};
pub use messages::{cue_text, rep_messages, GREAT_REP};
pub use session::{
    // WASM entry points
    end_session,
    last_rep,
    push_frame,
    rep_count,
    start_session,
    // Internal API
    end_session_inner,
    last_rep_inner,
    push_frame_inner,
    rep_count_inner,
    start_session_inner,
    RepView,
    SetSummary,
};
