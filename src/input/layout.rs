//! Key layout selection.

/// Character layout shown on the on-screen keyboard.
///
/// Exactly one of the two character panels is active at any time; the
/// exclusivity is carried by the enum itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Latin letters (default)
    #[default]
    Romaji,
    /// Digits and punctuation
    Symbol,
}

impl Layout {
    /// Returns the other layout.
    pub fn toggled(self) -> Self {
        match self {
            Layout::Romaji => Layout::Symbol,
            Layout::Symbol => Layout::Romaji,
        }
    }

    /// Whether the romaji panel is shown under this layout.
    pub fn romaji_active(self) -> bool {
        self == Layout::Romaji
    }

    /// Whether the symbol panel is shown under this layout.
    pub fn symbol_active(self) -> bool {
        self == Layout::Symbol
    }
}

/// Group of keys on the keyboard surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// Operator keys (shift, return, arrows, ...), always shown
    Operator,
    /// Letter keys, shown under [`Layout::Romaji`]
    Romaji,
    /// Digit/punctuation keys, shown under [`Layout::Symbol`]
    Symbol,
}

impl PanelKind {
    /// Whether keys in this panel can be pressed under `layout`.
    pub fn is_active(self, layout: Layout) -> bool {
        match self {
            PanelKind::Operator => true,
            PanelKind::Romaji => layout.romaji_active(),
            PanelKind::Symbol => layout.symbol_active(),
        }
    }
}
