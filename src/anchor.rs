//! Spatial pose of the keyboard surface.
//!
//! The controller only stores the pose; the host reads it back to place the
//! rendered keyboard.

use crate::config::AnchorConfig;

/// Vectors shorter than this are treated as zero.
const EPSILON: f32 = 1e-6;

/// Position and orientation of the keyboard surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Surface origin
    pub position: [f32; 3],
    /// Unit vector pointing from the surface towards its look-at target
    pub forward: [f32; 3],
    /// Unit vector orthogonal to `forward`
    pub up: [f32; 3],
}

impl Default for Anchor {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            forward: [0.0, 0.0, 1.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl Anchor {
    pub fn from_config(config: &AnchorConfig) -> Self {
        let mut anchor = Self::default();
        anchor.set_transform(config.position, config.look_at, config.world_up);
        anchor
    }

    /// Moves the surface to `position` and turns it to face `target`.
    ///
    /// `up` is `world_up` re-orthogonalized against the new forward vector.
    /// When `target` coincides with `position`, or `world_up` is parallel to
    /// the view direction, the previous orientation is kept.
    pub fn set_transform(&mut self, position: [f32; 3], target: [f32; 3], world_up: [f32; 3]) {
        self.position = position;

        let Some(forward) = normalize(sub(target, position)) else {
            log::debug!("Anchor target equals position, keeping orientation");
            return;
        };

        // Gram-Schmidt: remove the forward component from world_up.
        let along = dot(world_up, forward);
        let Some(up) = normalize(sub(world_up, scale(forward, along))) else {
            log::debug!("Anchor world_up parallel to view direction, keeping orientation");
            return;
        };

        self.forward = forward;
        self.up = up;
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(v: [f32; 3], s: f32) -> [f32; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: [f32; 3]) -> Option<[f32; 3]> {
    let length = dot(v, v).sqrt();
    if length < EPSILON {
        None
    } else {
        Some(scale(v, 1.0 / length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn faces_target() {
        let mut anchor = Anchor::default();
        anchor.set_transform([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(approx(anchor.forward, [1.0, 0.0, 0.0]));
        assert!(approx(anchor.up, [0.0, 1.0, 0.0]));
    }

    #[test]
    fn up_is_orthogonalized() {
        let mut anchor = Anchor::default();
        anchor.set_transform([0.0, 0.0, 0.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]);
        assert!(dot(anchor.forward, anchor.up).abs() < 1e-5);
        assert!((dot(anchor.up, anchor.up) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_target_keeps_orientation() {
        let mut anchor = Anchor::default();
        anchor.set_transform([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 0.0]);
        assert_eq!(anchor.position, [1.0, 1.0, 1.0]);
        assert_eq!(anchor.forward, Anchor::default().forward);
    }

    #[test]
    fn parallel_up_keeps_orientation() {
        let mut anchor = Anchor::default();
        anchor.set_transform([0.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(anchor.forward, Anchor::default().forward);
        assert_eq!(anchor.up, Anchor::default().up);
    }
}
