//! Raw keyboard/mouse polling for desktop hosts.

use serde::Deserialize;

/// Snapshot of the physical input state for one tick.
///
/// `*_pressed` fields are edge-triggered (went down this tick);
/// `backspace_held` is level-triggered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DesktopInput {
    pub return_pressed: bool,
    pub tab_pressed: bool,
    pub space_pressed: bool,
    pub backspace_held: bool,
    /// Printable text typed this tick
    pub text: String,
    /// Secondary pointer button (right mouse) went down this tick
    pub secondary_pressed: bool,
}

impl DesktopInput {
    /// Whether anything at all is down this tick.
    pub fn any(&self) -> bool {
        self.return_pressed
            || self.tab_pressed
            || self.space_pressed
            || self.backspace_held
            || !self.text.is_empty()
            || self.secondary_pressed
    }
}

/// Source of per-tick desktop input snapshots.
pub trait InputPoller {
    fn poll(&mut self) -> DesktopInput;
}

impl<F> InputPoller for F
where
    F: FnMut() -> DesktopInput,
{
    fn poll(&mut self) -> DesktopInput {
        self()
    }
}

/// Poller that never reports input.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputPoller for NoInput {
    fn poll(&mut self) -> DesktopInput {
        DesktopInput::default()
    }
}

/// Logical event chosen from a desktop snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopAction {
    Enter,
    Tab,
    Space,
    Backspace,
    Text(String),
    Paste,
}

/// Picks at most one action from `input`.
///
/// Priority, first match wins:
/// 1. Return
/// 2. Tab
/// 3. Space
/// 4. Backspace held and `backspace_ready`
/// 5. Non-empty text
/// 6. Secondary pointer press (paste)
pub fn select_action(input: &DesktopInput, backspace_ready: bool) -> Option<DesktopAction> {
    if !input.any() {
        return None;
    }

    if input.return_pressed {
        Some(DesktopAction::Enter)
    } else if input.tab_pressed {
        Some(DesktopAction::Tab)
    } else if input.space_pressed {
        Some(DesktopAction::Space)
    } else if input.backspace_held && backspace_ready {
        Some(DesktopAction::Backspace)
    } else if !input.text.is_empty() {
        Some(DesktopAction::Text(input.text.clone()))
    } else if input.secondary_pressed {
        Some(DesktopAction::Paste)
    } else {
        None
    }
}
