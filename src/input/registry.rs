//! Binding of on-screen keys to the controller.

use super::surface::{KeyId, KeyboardSurface};
use std::collections::HashSet;

/// Set of keys whose activations are forwarded to the event buffer.
///
/// Populated once by walking the surface during mobile setup. Keys that are
/// not bound (every key in desktop mode) never report events and never
/// receive shift notifications.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    bound: Vec<KeyId>,
    lookup: HashSet<KeyId>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every key currently in `surface`, in panel order.
    pub fn bind_all(&mut self, surface: &KeyboardSurface) -> usize {
        for id in surface.key_ids() {
            if self.lookup.insert(id) {
                self.bound.push(id);
            }
        }
        log::debug!("Bound {} keys", self.bound.len());
        self.bound.len()
    }

    pub fn is_bound(&self, id: KeyId) -> bool {
        self.lookup.contains(&id)
    }

    /// Bound keys in binding order.
    pub fn bound(&self) -> &[KeyId] {
        &self.bound
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Drops every binding.
    pub fn release(&mut self) {
        self.bound.clear();
        self.lookup.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    #[test]
    fn binds_every_key_once() {
        let surface = KeyboardSurface::from_layout(&LayoutConfig::default());
        let mut registry = KeyRegistry::new();

        assert_eq!(registry.bind_all(&surface), surface.key_count());
        assert_eq!(registry.bind_all(&surface), surface.key_count());
        assert!(surface.key_ids().all(|id| registry.is_bound(id)));
    }

    #[test]
    fn release_unbinds_everything() {
        let surface = KeyboardSurface::from_layout(&LayoutConfig::default());
        let mut registry = KeyRegistry::new();
        registry.bind_all(&surface);

        registry.release();
        assert!(registry.is_empty());
        assert!(!registry.is_bound(KeyId { panel: 0, index: 0 }));
    }
}
