//! Keyboard controller: lifecycle, producers, and visibility.

use crate::anchor::Anchor;
use crate::clipboard::{ClipboardSource, SystemClipboard};
use crate::config::Config;
use crate::feedback::{self, FeedbackEmitter, SilentFeedback};
use crate::input::buffer::EventBuffer;
use crate::input::desktop::{InputPoller, NoInput};
use crate::input::events::SpecialKeyCode;
use crate::input::layout::Layout;
use crate::input::registry::KeyRegistry;
use crate::input::surface::{KeyId, KeyboardSurface};
use crate::input::target::InputTarget;
use crate::input::KeyboardError;
use crate::platform::{FixedPlatform, HostPlatform, Platform, PlatformOracle};
use std::time::Duration;

/// Default minimum time between repeated desktop backspaces.
pub const DEFAULT_BACKSPACE_REPEAT: Duration = Duration::from_millis(100);

/// Listener invoked with the new visibility on every transition.
pub type VisibilityListener = Box<dyn FnMut(bool)>;

/// Mutable state owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    /// Input path chosen at setup; `None` before setup
    pub(super) mode: Option<Platform>,
    pub(super) initialized: bool,
    pub(super) shift: bool,
    pub(super) layout: Layout,
    pub(super) visible: bool,
    /// Time accumulated since the last desktop backspace repeat
    pub(super) backspace_timer: Duration,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self {
            mode: None,
            initialized: false,
            shift: false,
            layout: Layout::Romaji,
            visible: true,
            backspace_timer: Duration::ZERO,
        }
    }
}

impl KeyboardState {
    pub fn mode(&self) -> Option<Platform> {
        self.mode
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn backspace_timer(&self) -> Duration {
        self.backspace_timer
    }
}

/// Aggregates on-screen key activations or desktop input into calls on an
/// [`InputTarget`].
///
/// The host drives it with [`KeyboardController::step`] once per tick. In
/// mobile mode, key activations reported between ticks are buffered and
/// dispatched in order; in desktop mode the physical input is polled each
/// tick and at most one event is dispatched.
pub struct KeyboardController {
    pub(super) state: KeyboardState,
    pub(super) buffer: EventBuffer,
    pub(super) surface: KeyboardSurface,
    pub(super) registry: KeyRegistry,
    pub(super) target: Option<Box<dyn InputTarget>>,
    pub(super) feedback: Box<dyn FeedbackEmitter>,
    pub(super) poller: Box<dyn InputPoller>,
    pub(super) clipboard: Box<dyn ClipboardSource>,
    pub(super) backspace_repeat: Duration,
    /// Play cues for desktop dispatches too
    pub(super) desktop_feedback: bool,
    oracle: Box<dyn PlatformOracle>,
    visibility_listeners: Vec<VisibilityListener>,
    anchor: Anchor,
    hide_on_start: bool,
}

impl KeyboardController {
    /// Creates an uninitialized controller over `surface`.
    ///
    /// Defaults: host platform detection, no feedback, no desktop input,
    /// system clipboard, no target.
    pub fn new(surface: KeyboardSurface) -> Self {
        Self {
            state: KeyboardState::default(),
            buffer: EventBuffer::new(),
            surface,
            registry: KeyRegistry::new(),
            target: None,
            feedback: Box::new(SilentFeedback),
            poller: Box::new(NoInput),
            clipboard: Box::new(SystemClipboard),
            backspace_repeat: DEFAULT_BACKSPACE_REPEAT,
            desktop_feedback: false,
            oracle: Box::new(HostPlatform),
            visibility_listeners: Vec::new(),
            anchor: Anchor::default(),
            hide_on_start: false,
        }
    }

    /// Creates a controller with the surface, feedback, anchor, and timing
    /// described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut controller = Self::new(KeyboardSurface::from_layout(&config.layout))
            .with_feedback(feedback::from_config(&config.feedback));

        if let Some(platform) = config.keyboard.platform {
            controller.oracle = Box::new(FixedPlatform(platform));
        }
        controller.backspace_repeat = config.keyboard.backspace_repeat_interval();
        controller.desktop_feedback = config.feedback.enabled && config.feedback.on_desktop;
        controller.hide_on_start = config.keyboard.hide_on_start;
        controller.anchor = Anchor::from_config(&config.anchor);
        controller
    }

    pub fn with_oracle(mut self, oracle: impl PlatformOracle + 'static) -> Self {
        self.oracle = Box::new(oracle);
        self
    }

    pub fn with_feedback(mut self, feedback: Box<dyn FeedbackEmitter>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_poller(mut self, poller: impl InputPoller + 'static) -> Self {
        self.poller = Box::new(poller);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl ClipboardSource + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_target(mut self, target: impl InputTarget + 'static) -> Self {
        self.target = Some(Box::new(target));
        self
    }

    pub fn with_backspace_repeat(mut self, interval: Duration) -> Self {
        self.backspace_repeat = interval;
        self
    }

    pub fn with_desktop_feedback(mut self, enabled: bool) -> Self {
        self.desktop_feedback = enabled;
        self
    }

    pub fn with_hide_on_start(mut self, hide: bool) -> Self {
        self.hide_on_start = hide;
        self
    }

    /// Detects the platform and prepares the selected input path.
    ///
    /// Mobile: binds every key of the surface and resets the layout to
    /// romaji. Desktop: hides the on-screen surface and binds nothing.
    ///
    /// # Errors
    /// [`KeyboardError::AlreadyInitialized`] if called a second time; the
    /// controller is left untouched.
    pub fn setup(&mut self) -> Result<(), KeyboardError> {
        if self.state.initialized {
            log::error!("Keyboard has already been initialized");
            return Err(KeyboardError::AlreadyInitialized);
        }

        self.initialize();
        Ok(())
    }

    fn initialize(&mut self) {
        let mode = self.oracle.detect();
        self.state.mode = Some(mode);

        match mode {
            Platform::Mobile => {
                self.state.layout = Layout::Romaji;
                let bound = self.registry.bind_all(&self.surface);
                log::info!("Keyboard set up for mobile input ({bound} keys bound)");
            }
            Platform::Desktop => {
                self.set_visibility(false);
                log::info!("Keyboard set up for desktop input");
            }
        }

        self.state.initialized = true;
    }

    /// Runs setup if it has not happened yet, then applies `hide_on_start`.
    pub fn start(&mut self) {
        if !self.state.initialized {
            self.initialize();
        }

        if self.hide_on_start {
            self.set_visibility(false);
        }
    }

    /// Queues a printable character activation for the next dispatch.
    pub fn report_character(&mut self, text: impl Into<String>) {
        self.buffer.push_character(text);
    }

    /// Queues a special key activation for the next dispatch.
    pub fn report_special(&mut self, code: SpecialKeyCode) {
        self.buffer.push_special(code);
    }

    /// Forwards a user activation of the key at `id`.
    ///
    /// Returns false, queuing nothing, when the key is unbound, sits on an
    /// inactive panel, or the surface is hidden.
    pub fn activate(&mut self, id: KeyId) -> bool {
        if !self.registry.is_bound(id) {
            log::debug!("Ignoring activation of unbound key {id:?}");
            return false;
        }
        if !self.state.visible {
            log::debug!("Ignoring activation of {id:?} while hidden");
            return false;
        }
        let active = self
            .surface
            .panel_kind(id)
            .is_some_and(|kind| kind.is_active(self.state.layout));
        if !active {
            log::debug!("Ignoring activation of {id:?} on inactive panel");
            return false;
        }

        let Some(widget) = self.surface.widget(id) else {
            return false;
        };
        let event = widget.on_press();
        log::debug!("Key {id:?} reported {event:?}");
        self.buffer.push(event);
        true
    }

    /// Activates the key currently showing `label`.
    ///
    /// # Errors
    /// [`KeyboardError::UnknownKeyLabel`] if no key shows `label`.
    pub fn activate_label(&mut self, label: &str) -> Result<bool, KeyboardError> {
        let id = self
            .surface
            .find_label(label, self.state.layout)
            .ok_or_else(|| KeyboardError::UnknownKeyLabel(label.to_string()))?;
        Ok(self.activate(id))
    }

    /// Shows or hides the on-screen surface, notifying listeners on change.
    pub fn set_visibility(&mut self, active: bool) {
        if active == self.state.visible {
            return;
        }

        self.state.visible = active;
        log::debug!("Keyboard visibility changed to {active}");
        for listener in &mut self.visibility_listeners {
            listener(active);
        }
    }

    pub fn toggle_visibility(&mut self) {
        self.set_visibility(!self.state.visible);
    }

    pub fn show(&mut self) {
        self.set_visibility(true);
    }

    pub fn hide(&mut self) {
        self.set_visibility(false);
    }

    /// Registers a listener called with the new value on every visibility
    /// transition.
    pub fn on_visibility_changed(&mut self, listener: impl FnMut(bool) + 'static) {
        self.visibility_listeners.push(Box::new(listener));
    }

    /// Replaces the input target, returning the previous one.
    pub fn switch_target(
        &mut self,
        target: Option<Box<dyn InputTarget>>,
    ) -> Option<Box<dyn InputTarget>> {
        std::mem::replace(&mut self.target, target)
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Moves the surface to `position`, facing `target`.
    pub fn set_transform(&mut self, position: [f32; 3], target: [f32; 3], world_up: [f32; 3]) {
        self.anchor.set_transform(position, target, world_up);
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Drops every key binding. Activations are ignored afterwards.
    pub fn release_bindings(&mut self) {
        self.registry.release();
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    pub fn mode(&self) -> Option<Platform> {
        self.state.mode
    }

    pub fn is_mobile(&self) -> bool {
        self.state.mode == Some(Platform::Mobile)
    }

    pub fn initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn shift(&self) -> bool {
        self.state.shift
    }

    pub fn layout(&self) -> Layout {
        self.state.layout
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Activations waiting for the next dispatch.
    pub fn pending(&self) -> &EventBuffer {
        &self.buffer
    }

    pub fn surface(&self) -> &KeyboardSurface {
        &self.surface
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }
}
