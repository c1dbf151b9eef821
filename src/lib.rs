//! Virtual keyboard input aggregation.
//!
//! Collects key activations from an on-screen keyboard (touch hosts) or from
//! physical keyboard and mouse polling (desktop hosts) and delivers them as
//! one ordered stream of text-editing calls to a pluggable target.

pub mod anchor;
pub mod clipboard;
pub mod config;
pub mod feedback;
pub mod input;
pub mod platform;

pub use config::Config;
pub use input::{InputTarget, KeyboardController, KeyboardError};
pub use platform::Platform;
