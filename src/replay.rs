//! Scripted replay of key activations through a keyboard controller.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use vkeyboard::clipboard::StaticClipboard;
use vkeyboard::input::{DesktopInput, InputTarget, SpecialKeyCode, TargetCall, TextField};
use vkeyboard::{Config, KeyboardController, Platform};

/// A replay script.
///
/// # Example TOML
/// ```toml
/// platform = "mobile"
///
/// [[tick]]
/// keys = ["h", "i"]
///
/// [[tick]]
/// specials = ["SHIFT"]
///
/// [[tick]]
/// repeat = 250
/// elapsed_ms = 1
/// desktop = { backspace_held = true }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Script {
    /// Input path to use unless overridden on the command line
    #[serde(default)]
    pub platform: Option<Platform>,

    /// Whether enter inserts a newline instead of submitting
    #[serde(default)]
    pub multiline: bool,

    /// Fixed clipboard contents for desktop paste (system clipboard if unset)
    #[serde(default)]
    pub clipboard: Option<String>,

    #[serde(default, rename = "tick")]
    pub ticks: Vec<Tick>,
}

/// Input applied before one (or `repeat`) host ticks.
#[derive(Debug, Deserialize)]
pub struct Tick {
    /// Time since the previous tick
    #[serde(default = "default_elapsed_ms")]
    pub elapsed_ms: u64,

    /// Number of identical ticks to run
    #[serde(default = "default_repeat")]
    pub repeat: u32,

    /// Labels of on-screen keys to activate, in order
    #[serde(default)]
    pub keys: Vec<String>,

    /// Raw character reports
    #[serde(default)]
    pub chars: Vec<String>,

    /// Raw special key reports
    #[serde(default)]
    pub specials: Vec<SpecialKeyCode>,

    /// Physical input state for desktop ticks
    #[serde(default)]
    pub desktop: Option<DesktopInput>,
}

fn default_elapsed_ms() -> u64 {
    16
}

fn default_repeat() -> u32 {
    1
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

/// Text field that also remembers every call it received.
#[derive(Debug, Default)]
pub struct RecordedField {
    pub field: TextField,
    pub calls: Vec<TargetCall>,
}

impl RecordedField {
    fn record(&mut self, call: TargetCall) {
        call.apply(&mut self.field);
        self.calls.push(call);
    }
}

impl InputTarget for RecordedField {
    fn on_backspace(&mut self) {
        self.record(TargetCall::Backspace);
    }

    fn on_enter(&mut self) {
        self.record(TargetCall::Enter);
    }

    fn on_shift_toggled(&mut self) {
        self.record(TargetCall::ShiftToggled);
    }

    fn on_space(&mut self) {
        self.record(TargetCall::Space);
    }

    fn on_tab(&mut self) {
        self.record(TargetCall::Tab);
    }

    fn on_symbol_toggled(&mut self) {
        self.record(TargetCall::SymbolToggled);
    }

    fn on_key(&mut self, text: &str) {
        self.record(TargetCall::Key(text.to_string()));
    }
}

/// Runs `script` through a controller built from `config`.
///
/// `platform` overrides both the script and the config.
pub fn run(script: &Script, config: &Config, platform: Option<Platform>) -> Result<RecordedField> {
    let mut config = config.clone();
    if let Some(platform) = platform.or(script.platform) {
        config.keyboard.platform = Some(platform);
    }

    let field = if script.multiline {
        TextField::multiline()
    } else {
        TextField::new()
    };
    let target = Rc::new(RefCell::new(RecordedField {
        field,
        calls: Vec::new(),
    }));

    let frame = Rc::new(RefCell::new(DesktopInput::default()));
    let poll_frame = frame.clone();

    let mut controller = KeyboardController::from_config(&config)
        .with_poller(move || poll_frame.borrow().clone())
        .with_target(target.clone());
    if let Some(text) = &script.clipboard {
        controller = controller.with_clipboard(StaticClipboard(text.clone()));
    }

    controller.start();
    log::info!(
        "Replaying {} ticks in {} mode",
        script.ticks.len(),
        controller.mode().map_or("unknown".to_string(), |m| m.to_string())
    );

    for (index, tick) in script.ticks.iter().enumerate() {
        apply_tick(&mut controller, tick, &frame).with_context(|| format!("tick {}", index + 1))?;
    }

    drop(controller);
    let recorded = Rc::try_unwrap(target)
        .map_err(|_| anyhow::anyhow!("text field still shared after replay"))?
        .into_inner();
    Ok(recorded)
}

fn apply_tick(
    controller: &mut KeyboardController,
    tick: &Tick,
    frame: &RefCell<DesktopInput>,
) -> Result<()> {
    for label in &tick.keys {
        if !controller.activate_label(label)? {
            log::warn!("Key '{label}' could not be pressed");
        }
    }
    for text in &tick.chars {
        controller.report_character(text.as_str());
    }
    for code in &tick.specials {
        controller.report_special(*code);
    }

    *frame.borrow_mut() = tick.desktop.clone().unwrap_or_default();

    let elapsed = Duration::from_millis(tick.elapsed_ms);
    for _ in 0..tick.repeat {
        controller.step(elapsed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mobile_config() -> Config {
        let mut config = Config::default();
        config.feedback.enabled = false;
        config.keyboard.platform = Some(Platform::Mobile);
        config
    }

    #[test]
    fn replays_mobile_keys() {
        let script: Script = toml::from_str(
            r#"
            [[tick]]
            keys = ["h", "i"]

            [[tick]]
            keys = ["SHIFT"]

            [[tick]]
            keys = ["O", "SPACE"]
            "#,
        )
        .unwrap();

        let recorded = run(&script, &mobile_config(), None).unwrap();
        assert_eq!(recorded.field.text(), "hi O");
        assert_eq!(recorded.calls[2], TargetCall::ShiftToggled);
    }

    #[test]
    fn replays_desktop_backspace_repeat() {
        let script: Script = toml::from_str(
            r#"
            platform = "desktop"

            [[tick]]
            desktop = { text = "abc" }

            [[tick]]
            repeat = 250
            elapsed_ms = 1
            desktop = { backspace_held = true }
            "#,
        )
        .unwrap();

        let recorded = run(&script, &mobile_config(), None).unwrap();
        assert_eq!(recorded.field.text(), "a");
    }

    #[test]
    fn command_line_platform_wins() {
        let script: Script = toml::from_str(
            r#"
            platform = "mobile"
            clipboard = "pasted"

            [[tick]]
            desktop = { secondary_pressed = true }
            "#,
        )
        .unwrap();

        let recorded = run(&script, &mobile_config(), Some(Platform::Desktop)).unwrap();
        assert_eq!(recorded.field.text(), "pasted");
    }

    #[test]
    fn unknown_key_label_names_the_tick() {
        let script: Script = toml::from_str(
            r#"
            [[tick]]
            keys = ["a"]

            [[tick]]
            keys = ["NOPE"]
            "#,
        )
        .unwrap();

        let err = run(&script, &mobile_config(), None).unwrap_err();
        assert_eq!(err.to_string(), "tick 2");
        assert!(format!("{err:#}").contains("NOPE"));
    }
}
