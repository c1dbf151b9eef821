use std::time::Duration;

use crate::input::desktop::{DesktopAction, select_action};
use crate::input::events::SpecialKeyCode;
use crate::input::target::InputTarget;
use crate::platform::Platform;

use super::KeyboardController;

impl KeyboardController {
    /// Runs one dispatch cycle. Call once per host tick.
    ///
    /// Does nothing before setup. `elapsed` is the time since the previous
    /// tick and only feeds the desktop backspace repeat timer.
    pub fn step(&mut self, elapsed: Duration) {
        if !self.state.initialized {
            return;
        }

        match self.state.mode {
            Some(Platform::Mobile) => self.dispatch_buffered(),
            Some(Platform::Desktop) => self.dispatch_desktop(elapsed),
            None => {}
        }
    }

    /// Drains the event buffer: every special code first, then every
    /// character, each in activation order, one feedback cue per entry.
    fn dispatch_buffered(&mut self) {
        let drained = self.buffer.drain();
        if drained.is_empty() {
            return;
        }

        log::debug!(
            "Dispatching {} special and {} character events",
            drained.specials.len(),
            drained.characters.len()
        );

        for code in drained.specials {
            self.dispatch_special(code);
            self.feedback.emit();
        }

        for text in drained.characters {
            self.call_target(|target| target.on_key(&text));
            self.feedback.emit();
        }
    }

    fn dispatch_special(&mut self, code: SpecialKeyCode) {
        match code {
            SpecialKeyCode::Backspace => self.call_target(|target| target.on_backspace()),
            SpecialKeyCode::Return => self.call_target(|target| target.on_enter()),
            SpecialKeyCode::Shift => {
                self.state.shift = !self.state.shift;
                self.broadcast_shift();
                self.call_target(|target| target.on_shift_toggled());
            }
            SpecialKeyCode::Space => self.call_target(|target| target.on_space()),
            SpecialKeyCode::Tab => self.call_target(|target| target.on_tab()),
            SpecialKeyCode::Symbol => {
                self.state.layout = self.state.layout.toggled();
                log::debug!("Layout switched to {:?}", self.state.layout);
                self.call_target(|target| target.on_symbol_toggled());
            }
            // Navigation keys are not wired to the target.
            SpecialKeyCode::Up
            | SpecialKeyCode::Down
            | SpecialKeyCode::Left
            | SpecialKeyCode::Right => {}
        }
    }

    fn broadcast_shift(&mut self) {
        let shift = self.state.shift;
        for &id in self.registry.bound() {
            if let Some(widget) = self.surface.widget_mut(id) {
                widget.on_shift_changed(shift);
            }
        }
    }

    /// Polls the physical input and dispatches at most one event.
    ///
    /// On-screen reports have no consumer on desktop and are discarded.
    fn dispatch_desktop(&mut self, elapsed: Duration) {
        let discarded = self.buffer.drain();
        if !discarded.is_empty() {
            log::debug!("Discarding {} on-screen events in desktop mode", discarded.len());
        }

        self.state.backspace_timer = self.state.backspace_timer.saturating_add(elapsed);

        let input = self.poller.poll();
        let backspace_ready = self.state.backspace_timer >= self.backspace_repeat;
        let Some(action) = select_action(&input, backspace_ready) else {
            return;
        };

        log::debug!("Desktop input dispatched as {action:?}");
        match action {
            DesktopAction::Enter => self.call_target(|target| target.on_enter()),
            DesktopAction::Tab => self.call_target(|target| target.on_tab()),
            DesktopAction::Space => self.call_target(|target| target.on_space()),
            DesktopAction::Backspace => {
                self.call_target(|target| target.on_backspace());
                self.state.backspace_timer = Duration::ZERO;
            }
            DesktopAction::Text(text) => self.call_target(|target| target.on_key(&text)),
            DesktopAction::Paste => {
                let text = self.clipboard.read_text();
                self.call_target(|target| target.on_key(&text));
            }
        }

        if self.desktop_feedback {
            self.feedback.emit();
        }
    }

    fn call_target(&mut self, call: impl FnOnce(&mut dyn InputTarget)) {
        if let Some(target) = self.target.as_deref_mut() {
            call(target);
        }
    }
}
