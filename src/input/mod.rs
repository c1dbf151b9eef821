//! Key event aggregation and dispatch.
//!
//! On touch hosts, on-screen key widgets report activations into a buffer
//! that the controller drains once per tick. On desktop hosts, the controller
//! polls keyboard and mouse state directly. Either way the result is a stream
//! of text-editing calls on a single [`InputTarget`].

pub mod buffer;
pub mod controller;
pub mod desktop;
pub mod error;
pub mod events;
pub mod layout;
pub mod registry;
pub mod surface;
pub mod target;

// Re-export commonly used types at module level
pub use buffer::EventBuffer;
pub use controller::{KeyboardController, KeyboardState};
pub use desktop::{DesktopInput, InputPoller};
pub use error::KeyboardError;
pub use events::{KeyEvent, SpecialKeyCode};
pub use layout::{Layout, PanelKind};
pub use surface::{CharacterKey, KeyId, KeyPanel, KeyWidget, KeyboardSurface, SpecialKey};
pub use target::{InputTarget, TargetCall, TextField};
