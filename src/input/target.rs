//! Consumers of dispatched text-editing events.

use std::cell::RefCell;
use std::rc::Rc;

/// Receiver of semantic text-editing calls.
///
/// The controller holds at most one target; when none is attached every
/// dispatch is a no-op.
pub trait InputTarget {
    fn on_backspace(&mut self);
    fn on_enter(&mut self);
    fn on_shift_toggled(&mut self);
    fn on_space(&mut self);
    fn on_tab(&mut self);
    fn on_symbol_toggled(&mut self);
    fn on_key(&mut self, text: &str);
}

/// Shared targets stay readable by the host while attached.
impl<T: InputTarget + ?Sized> InputTarget for Rc<RefCell<T>> {
    fn on_backspace(&mut self) {
        self.borrow_mut().on_backspace();
    }

    fn on_enter(&mut self) {
        self.borrow_mut().on_enter();
    }

    fn on_shift_toggled(&mut self) {
        self.borrow_mut().on_shift_toggled();
    }

    fn on_space(&mut self) {
        self.borrow_mut().on_space();
    }

    fn on_tab(&mut self) {
        self.borrow_mut().on_tab();
    }

    fn on_symbol_toggled(&mut self) {
        self.borrow_mut().on_symbol_toggled();
    }

    fn on_key(&mut self, text: &str) {
        self.borrow_mut().on_key(text);
    }
}

/// One call made on an [`InputTarget`], for logging and inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetCall {
    Backspace,
    Enter,
    ShiftToggled,
    Space,
    Tab,
    SymbolToggled,
    Key(String),
}

impl TargetCall {
    /// Replays this call on `target`.
    pub fn apply(&self, target: &mut dyn InputTarget) {
        match self {
            TargetCall::Backspace => target.on_backspace(),
            TargetCall::Enter => target.on_enter(),
            TargetCall::ShiftToggled => target.on_shift_toggled(),
            TargetCall::Space => target.on_space(),
            TargetCall::Tab => target.on_tab(),
            TargetCall::SymbolToggled => target.on_symbol_toggled(),
            TargetCall::Key(text) => target.on_key(text),
        }
    }
}

/// Editable text buffer driven by keyboard events.
///
/// Multi-line fields insert a newline on enter; single-line fields mark
/// themselves submitted instead. `max_length` caps the character count
/// (0 means unlimited); inserts that would exceed it are truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    multiline: bool,
    max_length: usize,
    submitted: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether enter was pressed on a single-line field.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.submitted = false;
    }

    fn insert(&mut self, text: &str) {
        if self.max_length == 0 {
            self.text.push_str(text);
            return;
        }

        let room = self.max_length.saturating_sub(self.text.chars().count());
        self.text.extend(text.chars().take(room));
    }
}

impl InputTarget for TextField {
    fn on_backspace(&mut self) {
        self.text.pop();
    }

    fn on_enter(&mut self) {
        if self.multiline {
            self.insert("\n");
        } else {
            self.submitted = true;
        }
    }

    // Case is applied by the keys themselves.
    fn on_shift_toggled(&mut self) {}

    fn on_space(&mut self) {
        self.insert(" ");
    }

    fn on_tab(&mut self) {
        self.insert("\t");
    }

    fn on_symbol_toggled(&mut self) {}

    fn on_key(&mut self, text: &str) {
        self.insert(text);
    }
}
