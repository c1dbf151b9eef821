use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use vkeyboard::input::{
    CharacterKey, DesktopInput, KeyPanel, KeyboardSurface, Layout, PanelKind, SpecialKey,
    SpecialKeyCode, TextField,
};
use vkeyboard::platform::FixedPlatform;
use vkeyboard::{Config, KeyboardController, KeyboardError, Platform};

const TICK: Duration = Duration::from_millis(16);

fn mobile_config() -> Config {
    let mut config = Config::default();
    config.keyboard.platform = Some(Platform::Mobile);
    config.feedback.enabled = false;
    config
}

#[test]
fn typing_on_the_default_layout_fills_a_text_field() {
    let field = Rc::new(RefCell::new(TextField::multiline()));
    let mut keyboard = KeyboardController::from_config(&mobile_config()).with_target(field.clone());
    keyboard.start();

    for label in ["h", "e", "y"] {
        assert!(keyboard.activate_label(label).unwrap());
    }
    keyboard.step(TICK);

    keyboard.activate_label("SHIFT").unwrap();
    keyboard.step(TICK);
    keyboard.activate_label("Y").unwrap();
    keyboard.activate_label("RETURN").unwrap();
    keyboard.step(TICK);

    // Specials of a cycle go out before its characters.
    assert_eq!(field.borrow().text(), "hey\nY");
}

#[test]
fn symbol_layout_exposes_the_symbol_panel() {
    let field = Rc::new(RefCell::new(TextField::new()));
    let mut keyboard = KeyboardController::from_config(&mobile_config()).with_target(field.clone());
    keyboard.setup().unwrap();

    keyboard.activate_label("SYMBOL").unwrap();
    keyboard.step(TICK);
    assert_eq!(keyboard.layout(), Layout::Symbol);

    assert!(keyboard.activate_label("7").unwrap());
    assert!(keyboard.activate_label("q").is_ok_and(|pressed| !pressed));
    keyboard.step(TICK);

    assert_eq!(field.borrow().text(), "7");
}

#[test]
fn custom_surface_and_fixed_oracle() {
    let surface = KeyboardSurface::new()
        .with_panel(
            KeyPanel::new(PanelKind::Operator).with_key(SpecialKey::new(SpecialKeyCode::Backspace)),
        )
        .with_panel(
            KeyPanel::new(PanelKind::Romaji)
                .with_key(CharacterKey::from_char('x'))
                .with_key(CharacterKey::from_char('y')),
        );
    let field = Rc::new(RefCell::new(TextField::new().with_max_length(1)));
    let mut keyboard = KeyboardController::new(surface)
        .with_oracle(FixedPlatform(Platform::Mobile))
        .with_target(field.clone());

    keyboard.setup().unwrap();
    assert_eq!(keyboard.registry().len(), 3);
    assert_eq!(keyboard.setup(), Err(KeyboardError::AlreadyInitialized));

    keyboard.activate_label("x").unwrap();
    keyboard.activate_label("y").unwrap();
    keyboard.step(TICK);
    assert_eq!(field.borrow().text(), "x");

    keyboard.activate_label("BACKSPACE").unwrap();
    keyboard.activate_label("y").unwrap();
    keyboard.step(TICK);
    assert_eq!(field.borrow().text(), "y");
}

#[test]
fn desktop_polling_drives_the_same_target() {
    let mut config = Config::default();
    config.keyboard.platform = Some(Platform::Desktop);
    config.feedback.enabled = false;

    let frames = Rc::new(RefCell::new(vec![
        DesktopInput {
            text: "ab".into(),
            ..Default::default()
        },
        DesktopInput {
            space_pressed: true,
            text: "c".into(),
            ..Default::default()
        },
        DesktopInput {
            return_pressed: true,
            ..Default::default()
        },
    ]));
    let source = frames.clone();
    let field = Rc::new(RefCell::new(TextField::new()));

    let mut keyboard = KeyboardController::from_config(&config)
        .with_poller(move || {
            let mut frames = source.borrow_mut();
            if frames.is_empty() {
                DesktopInput::default()
            } else {
                frames.remove(0)
            }
        })
        .with_target(field.clone());
    keyboard.start();
    assert!(!keyboard.is_visible());

    for _ in 0..4 {
        keyboard.step(TICK);
    }

    let field = field.borrow();
    assert_eq!(field.text(), "ab ");
    assert!(field.is_submitted());
}
