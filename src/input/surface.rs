//! On-screen key widgets and the panel tree they live in.
//!
//! Rendering is left to the host; the types here only carry what the
//! controller needs: what a key reports when pressed, how it reacts to the
//! shift state, and which panel it belongs to.

use super::events::{KeyEvent, SpecialKeyCode};
use super::layout::{Layout, PanelKind};
use crate::config::LayoutConfig;

/// Capability every on-screen key provides.
pub trait KeyWidget {
    /// Event reported when the user activates this key.
    fn on_press(&self) -> KeyEvent;

    /// Called on every bound key after the shift state flips.
    fn on_shift_changed(&mut self, shift: bool);

    /// Text currently shown on the key.
    fn label(&self) -> String;
}

/// Printable key with a lower-case and an upper-case face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterKey {
    lower: String,
    upper: String,
    shifted: bool,
}

impl CharacterKey {
    pub fn new(lower: impl Into<String>, upper: impl Into<String>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
            shifted: false,
        }
    }

    /// Builds a key whose upper face is the Unicode upper-case of `c`.
    pub fn from_char(c: char) -> Self {
        Self::new(c.to_string(), c.to_uppercase().collect::<String>())
    }

    /// Whether the upper-case face is showing.
    pub fn is_shifted(&self) -> bool {
        self.shifted
    }

    fn current(&self) -> &str {
        if self.shifted { &self.upper } else { &self.lower }
    }
}

impl KeyWidget for CharacterKey {
    fn on_press(&self) -> KeyEvent {
        KeyEvent::character(self.current())
    }

    fn on_shift_changed(&mut self, shift: bool) {
        self.shifted = shift;
    }

    fn label(&self) -> String {
        self.current().to_string()
    }
}

/// Operator key reporting a [`SpecialKeyCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialKey {
    code: SpecialKeyCode,
}

impl SpecialKey {
    pub fn new(code: SpecialKeyCode) -> Self {
        Self { code }
    }

    pub fn code(&self) -> SpecialKeyCode {
        self.code
    }
}

impl KeyWidget for SpecialKey {
    fn on_press(&self) -> KeyEvent {
        KeyEvent::Special(self.code)
    }

    // Operator faces do not change with case.
    fn on_shift_changed(&mut self, _shift: bool) {}

    fn label(&self) -> String {
        self.code.name().to_string()
    }
}

/// Position of a key inside a [`KeyboardSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId {
    pub panel: usize,
    pub index: usize,
}

/// A group of keys shown or hidden together.
pub struct KeyPanel {
    kind: PanelKind,
    keys: Vec<Box<dyn KeyWidget>>,
}

impl KeyPanel {
    pub fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            keys: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl KeyWidget + 'static) -> Self {
        self.keys.push(Box::new(key));
        self
    }

    pub fn push(&mut self, key: Box<dyn KeyWidget>) {
        self.keys.push(key);
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Root of the key widget tree.
#[derive(Default)]
pub struct KeyboardSurface {
    panels: Vec<KeyPanel>,
}

impl KeyboardSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_panel(mut self, panel: KeyPanel) -> Self {
        self.panels.push(panel);
        self
    }

    /// Builds the standard surface: one operator panel holding every special
    /// code, plus one character panel per layout built from the configured rows.
    pub fn from_layout(config: &LayoutConfig) -> Self {
        let mut operator = KeyPanel::new(PanelKind::Operator);
        for code in SpecialKeyCode::ALL {
            operator.push(Box::new(SpecialKey::new(code)));
        }

        Self::new()
            .with_panel(operator)
            .with_panel(character_panel(PanelKind::Romaji, &config.romaji_rows))
            .with_panel(character_panel(PanelKind::Symbol, &config.symbol_rows))
    }

    pub fn panels(&self) -> &[KeyPanel] {
        &self.panels
    }

    /// Total number of keys across all panels.
    pub fn key_count(&self) -> usize {
        self.panels.iter().map(KeyPanel::len).sum()
    }

    /// Walks every key in panel order.
    pub fn key_ids(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.panels.iter().enumerate().flat_map(|(panel, p)| {
            (0..p.keys.len()).map(move |index| KeyId { panel, index })
        })
    }

    pub fn panel_kind(&self, id: KeyId) -> Option<PanelKind> {
        self.panels.get(id.panel).map(KeyPanel::kind)
    }

    pub fn widget(&self, id: KeyId) -> Option<&dyn KeyWidget> {
        self.panels
            .get(id.panel)
            .and_then(|panel| panel.keys.get(id.index))
            .map(|key| key.as_ref())
    }

    pub fn widget_mut(&mut self, id: KeyId) -> Option<&mut (dyn KeyWidget + 'static)> {
        self.panels
            .get_mut(id.panel)
            .and_then(|panel| panel.keys.get_mut(id.index))
            .map(|key| key.as_mut())
    }

    /// Finds the key currently showing `label`, preferring panels that are
    /// pressable under `layout`.
    pub fn find_label(&self, label: &str, layout: Layout) -> Option<KeyId> {
        let matches = |id: &KeyId| self.widget(*id).is_some_and(|w| w.label() == label);
        let active = |id: &KeyId| {
            self.panel_kind(*id)
                .is_some_and(|kind| kind.is_active(layout))
        };

        self.key_ids()
            .filter(matches)
            .find(active)
            .or_else(|| self.key_ids().find(matches))
    }
}

fn character_panel(kind: PanelKind, rows: &[String]) -> KeyPanel {
    let mut panel = KeyPanel::new(kind);
    for c in rows.iter().flat_map(|row| row.chars()) {
        if c.is_whitespace() {
            continue;
        }
        panel.push(Box::new(CharacterKey::from_char(c)));
    }
    panel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_key_follows_shift_state() {
        let mut key = CharacterKey::from_char('q');
        assert_eq!(key.on_press(), KeyEvent::character("q"));
        assert_eq!(key.label(), "q");

        key.on_shift_changed(true);
        assert!(key.is_shifted());
        assert_eq!(key.on_press(), KeyEvent::character("Q"));
        assert_eq!(key.label(), "Q");

        key.on_shift_changed(false);
        assert_eq!(key.on_press(), KeyEvent::character("q"));
    }

    #[test]
    fn symbol_keys_have_identical_faces() {
        let mut key = CharacterKey::from_char('?');
        key.on_shift_changed(true);
        assert_eq!(key.label(), "?");
    }

    #[test]
    fn special_key_reports_its_code() {
        let mut key = SpecialKey::new(SpecialKeyCode::Return);
        key.on_shift_changed(true);
        assert_eq!(key.on_press(), KeyEvent::Special(SpecialKeyCode::Return));
        assert_eq!(key.label(), "RETURN");
    }

    #[test]
    fn standard_surface_has_three_panels() {
        let surface = KeyboardSurface::from_layout(&LayoutConfig::default());
        let kinds: Vec<_> = surface.panels().iter().map(KeyPanel::kind).collect();
        assert_eq!(
            kinds,
            vec![PanelKind::Operator, PanelKind::Romaji, PanelKind::Symbol]
        );
        assert_eq!(surface.panels()[0].len(), SpecialKeyCode::ALL.len());
        assert_eq!(surface.panels()[1].len(), 26);
        assert_eq!(surface.key_count(), surface.key_ids().count());
    }

    #[test]
    fn find_label_prefers_active_panel() {
        let surface = KeyboardSurface::new()
            .with_panel(KeyPanel::new(PanelKind::Romaji).with_key(CharacterKey::new("1", "1")))
            .with_panel(KeyPanel::new(PanelKind::Symbol).with_key(CharacterKey::new("1", "1")));

        assert_eq!(
            surface.find_label("1", Layout::Symbol),
            Some(KeyId { panel: 1, index: 0 })
        );
        assert_eq!(
            surface.find_label("1", Layout::Romaji),
            Some(KeyId { panel: 0, index: 0 })
        );
        assert_eq!(surface.find_label("z", Layout::Romaji), None);
    }
}
