//! Error types for the keyboard controller.

use thiserror::Error;

/// Errors reported by the keyboard controller.
///
/// None of these are fatal; the controller keeps its previous state whenever
/// one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyboardError {
    #[error("keyboard has already been initialized")]
    AlreadyInitialized,

    #[error("unknown special key code: {0}")]
    UnknownKeyCode(String),

    #[error("no key labelled '{0}' on the keyboard surface")]
    UnknownKeyLabel(String),
}
