//! Forma Web - rep segmentation and form scoring over pose landmarks
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points for process setup
//!
//! The core (`pose` through `engine`) is a pure per-frame update with no I/O;
//! `bridge` owns the JS-facing session store.

pub mod bridge;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod fsm;
pub mod kinematics;
pub mod pose;
pub mod scoring;
pub mod signal;
pub mod tracking;

use wasm_bindgen::prelude::*;

pub use bridge::{end_session, last_rep, push_frame, rep_count, start_session};
pub use config::EngineConfig;
pub use engine::{ExerciseEngine, FrameOutput, Session, SessionKind};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console
///
/// `level` is one of trace, debug, info, warn, error; anything else means info.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };
    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("forma-web initialized with log level {}", log_level);
}
