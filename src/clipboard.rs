//! Clipboard access for desktop paste.

use std::io::Read;
use std::process::{Command, Stdio};
use thiserror::Error;
use wl_clipboard_rs::paste::{self, ClipboardType, MimeType, Seat};

/// Errors raised while reading the system clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard is empty")]
    Empty,

    #[error("Clipboard read failed: {0}")]
    Read(String),

    #[error("Clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of text pasted on a secondary pointer press.
pub trait ClipboardSource {
    /// Current clipboard text. Empty when nothing can be read.
    fn read_text(&mut self) -> String;
}

/// Clipboard holding a fixed string.
#[derive(Debug, Default, Clone)]
pub struct StaticClipboard(pub String);

impl ClipboardSource for StaticClipboard {
    fn read_text(&mut self) -> String {
        self.0.clone()
    }
}

/// Wayland clipboard, read through wl-clipboard-rs with `wl-paste` as fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> String {
        match read_system_clipboard() {
            Ok(text) => text,
            Err(ClipboardError::Empty) => String::new(),
            Err(err) => {
                log::warn!("Paste failed: {err}");
                String::new()
            }
        }
    }
}

/// Reads plain text from the Wayland clipboard.
pub fn read_system_clipboard() -> Result<String, ClipboardError> {
    match read_via_library() {
        Ok(text) => Ok(text),
        Err(ClipboardError::Empty) => Err(ClipboardError::Empty),
        Err(lib_err) => {
            log::debug!("wl-clipboard-rs paste failed ({lib_err}), trying wl-paste");
            read_via_command().map_err(|cmd_err| {
                ClipboardError::Read(format!(
                    "wl-clipboard-rs failed: {lib_err} ; wl-paste failed: {cmd_err}"
                ))
            })
        }
    }
}

fn read_via_library() -> Result<String, ClipboardError> {
    let (mut pipe, _mime) =
        match paste::get_contents(ClipboardType::Regular, Seat::Unspecified, MimeType::Text) {
            Ok(contents) => contents,
            Err(paste::Error::NoSeats | paste::Error::ClipboardEmpty | paste::Error::NoMimeType) => {
                return Err(ClipboardError::Empty);
            }
            Err(err) => return Err(ClipboardError::Read(err.to_string())),
        };

    let mut bytes = Vec::new();
    pipe.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_via_command() -> Result<String, ClipboardError> {
    let output = Command::new("wl-paste")
        .arg("--no-newline")
        .stdin(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| ClipboardError::Read(format!("Failed to spawn wl-paste: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClipboardError::Read(format!("wl-paste failed: {}", stderr.trim())));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
