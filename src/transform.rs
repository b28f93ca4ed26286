//! Surface transform output for renderers.
//!
//! The surface is drawn as `translate(offset) scale(scale)` with the scale
//! origin at the surface's top-left corner. HUD layers never receive this
//! transform.

use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Translate-then-scale transform from surface to viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub offset: Vec2,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self::new(Vec2::ZERO, 1.0);

    pub const fn new(offset: Vec2, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Surface point → viewport point.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    /// Viewport point → surface point.
    pub fn invert(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.scale
    }

    /// Column-major 2D affine matrix `[a, b, c, d, e, f]`, the argument order
    /// of CSS `matrix()` and canvas `setTransform()`.
    pub fn to_matrix(&self) -> [f64; 6] {
        [
            self.scale,
            0.0,
            0.0,
            self.scale,
            self.offset.x,
            self.offset.y,
        ]
    }

    /// CSS transform string, e.g. `translate(-9000px, -9000px) scale(1)`.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.offset.x, self.offset.y, self.scale
        )
    }
}

/// Rendering layer a transform is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// The pannable, zoomable virtual surface.
    Surface,
    /// Chrome drawn above the surface: taskbar, zoom controls, windows.
    Hud,
}

/// Hands out the surface transform and reports when it changed.
#[derive(Debug, Default)]
pub struct TransformPublisher {
    published: Option<Transform>,
}

impl TransformPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `current` if it differs from the last published transform.
    pub fn publish(&mut self, current: Transform) -> Option<Transform> {
        if self.published == Some(current) {
            return None;
        }
        self.published = Some(current);
        Some(current)
    }

    /// Last transform handed out by [`Self::publish`].
    pub fn published(&self) -> Option<Transform> {
        self.published
    }

    /// Scopes a surface transform to `layer`. HUD layers always get identity.
    pub fn for_layer(layer: Layer, surface: Transform) -> Transform {
        match layer {
            Layer::Surface => surface,
            Layer::Hud => Transform::IDENTITY,
        }
    }
}
