//! Errors surfaced to JavaScript by the bridge entry points

use thiserror::Error;
use wasm_bindgen::prelude::*;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("No active session, call start_session first")]
    NoSession,
    #[error("Invalid landmark data length: {got} (expected {expected})")]
    BadFrameLength { got: usize, expected: usize },
    #[error("Unknown exercise '{0}'")]
    UnknownExercise(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
