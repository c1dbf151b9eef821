//! Per-cycle buffering of on-screen key activations.

use super::events::{KeyEvent, SpecialKeyCode};

/// Entries taken out of an [`EventBuffer`] for one dispatch cycle.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DrainedEvents {
    /// Special codes in activation order
    pub specials: Vec<SpecialKeyCode>,
    /// Character text in activation order
    pub characters: Vec<String>,
}

impl DrainedEvents {
    pub fn len(&self) -> usize {
        self.specials.len() + self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Two append-only FIFO queues filled by widget activations.
///
/// Special codes and characters are queued separately; the dispatch loop
/// takes both at once and the buffer is empty again afterwards.
#[derive(Debug, Default)]
pub struct EventBuffer {
    characters: Vec<String>,
    specials: Vec<SpecialKeyCode>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a printable character activation.
    pub fn push_character(&mut self, text: impl Into<String>) {
        self.characters.push(text.into());
    }

    /// Queues a special key activation.
    pub fn push_special(&mut self, code: SpecialKeyCode) {
        self.specials.push(code);
    }

    /// Queues an event into the queue matching its variant.
    pub fn push(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Character(text) => self.push_character(text),
            KeyEvent::Special(code) => self.push_special(code),
        }
    }

    /// Takes every queued entry, leaving both queues empty.
    pub fn drain(&mut self) -> DrainedEvents {
        DrainedEvents {
            specials: std::mem::take(&mut self.specials),
            characters: std::mem::take(&mut self.characters),
        }
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn special_count(&self) -> usize {
        self.specials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.specials.is_empty()
    }

    /// Pending characters, oldest first.
    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    /// Pending special codes, oldest first.
    pub fn specials(&self) -> &[SpecialKeyCode] {
        &self.specials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_routes_events_by_variant() {
        let mut buffer = EventBuffer::new();
        buffer.push(KeyEvent::character("a"));
        buffer.push(KeyEvent::Special(SpecialKeyCode::Shift));
        buffer.push(KeyEvent::character("b"));

        assert_eq!(buffer.characters(), ["a".to_string(), "b".to_string()]);
        assert_eq!(buffer.specials(), [SpecialKeyCode::Shift]);
    }

    #[test]
    fn drain_preserves_order_and_empties_both_queues() {
        let mut buffer = EventBuffer::new();
        buffer.push_character("x");
        buffer.push_special(SpecialKeyCode::Return);
        buffer.push_character("y");
        buffer.push_special(SpecialKeyCode::Backspace);

        let drained = buffer.drain();
        assert_eq!(drained.characters, vec!["x", "y"]);
        assert_eq!(
            drained.specials,
            vec![SpecialKeyCode::Return, SpecialKeyCode::Backspace]
        );
        assert_eq!(drained.len(), 4);

        assert!(buffer.is_empty());
        assert_eq!(buffer.character_count(), 0);
        assert_eq!(buffer.special_count(), 0);
    }

    #[test]
    fn drain_of_empty_buffer_is_empty() {
        let mut buffer = EventBuffer::new();
        assert!(buffer.drain().is_empty());
    }
}
