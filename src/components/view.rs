//! Visual state of an entity.
//!
//! The [`View`] component holds what a renderer needs to know about how
//! visible an entity is. Only opacity is modelled; `1.0` is fully opaque and
//! `0.0` fully transparent.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct View {
    opacity: f32,
}

impl View {
    /// Create a view with the given opacity, clamped to `[0.0, 1.0]`.
    pub fn new(opacity: f32) -> Self {
        let mut view = View { opacity: 1.0 };
        view.set_opacity(opacity);
        view
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the opacity, clamped to `[0.0, 1.0]`. NaN is ignored.
    pub fn set_opacity(&mut self, opacity: f32) {
        if !opacity.is_nan() {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View { opacity: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_opaque() {
        let v = View::default();
        assert_eq!(v.opacity(), 1.0);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut v = View::new(2.0);
        assert_eq!(v.opacity(), 1.0);
        v.set_opacity(-0.5);
        assert_eq!(v.opacity(), 0.0);
        v.set_opacity(0.5);
        assert_eq!(v.opacity(), 0.5);
    }

    #[test]
    fn test_nan_is_ignored() {
        let mut v = View::new(0.25);
        v.set_opacity(f32::NAN);
        assert_eq!(v.opacity(), 0.25);
    }
}
