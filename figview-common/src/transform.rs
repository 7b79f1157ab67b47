use serde::{Deserialize, Serialize};

/// Live pan/zoom adjustment applied on top of a panel's base scales.
///
/// Follows the d3 zoom-transform convention: a projected pixel coordinate
/// `p` is displayed at `scale * p + translate`. The identity transform is
/// the reset state; `scale` must stay strictly positive so the transform
/// remains invertible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(translate_x: f32, translate_y: f32, scale: f32) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translate_x.abs() < 1e-6 && self.translate_y.abs() < 1e-6
            && (self.scale - 1.0).abs() < 1e-6
    }

    /// Maps an untransformed pixel x coordinate into view space
    pub fn apply_x(&self, px: f32) -> f32 {
        self.scale * px + self.translate_x
    }

    /// Maps an untransformed pixel y coordinate into view space
    pub fn apply_y(&self, px: f32) -> f32 {
        self.scale * px + self.translate_y
    }

    pub fn apply(&self, point: [f32; 2]) -> [f32; 2] {
        [self.apply_x(point[0]), self.apply_y(point[1])]
    }

    /// Maps a view-space pixel x coordinate back to untransformed space
    pub fn unapply_x(&self, px: f32) -> f32 {
        (px - self.translate_x) / self.scale
    }

    /// Maps a view-space pixel y coordinate back to untransformed space
    pub fn unapply_y(&self, px: f32) -> f32 {
        (px - self.translate_y) / self.scale
    }

    pub fn unapply(&self, point: [f32; 2]) -> [f32; 2] {
        [self.unapply_x(point[0]), self.unapply_y(point[1])]
    }

    /// Composes `delta` after `self`: the result maps `p` to
    /// `delta.apply(self.apply(p))`.
    pub fn then(&self, delta: &Transform) -> Transform {
        Transform {
            translate_x: delta.scale * self.translate_x + delta.translate_x,
            translate_y: delta.scale * self.translate_y + delta.translate_y,
            scale: delta.scale * self.scale,
        }
    }

    /// Solves for the delta transform `d` such that `prev.then(&d) == self`
    pub fn delta_from(&self, prev: &Transform) -> Transform {
        let scale = self.scale / prev.scale;
        Transform {
            translate_x: self.translate_x - scale * prev.translate_x,
            translate_y: self.translate_y - scale * prev.translate_y,
            scale,
        }
    }

    pub fn inverse(&self) -> Transform {
        Transform {
            translate_x: -self.translate_x / self.scale,
            translate_y: -self.translate_y / self.scale,
            scale: 1.0 / self.scale,
        }
    }

    /// Linear interpolation between two transforms, used by animated
    /// transitions. `t` is clamped to [0, 1].
    pub fn lerp(&self, other: &Transform, t: f32) -> Transform {
        let t = t.clamp(0.0, 1.0);
        Transform {
            translate_x: self.translate_x + (other.translate_x - self.translate_x) * t,
            translate_y: self.translate_y + (other.translate_y - self.translate_y) * t,
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }

    /// The untransformed pixel interval currently visible through a view
    /// extent `(start, end)` along x.
    pub fn visible_x(&self, extent: (f32, f32)) -> (f32, f32) {
        (self.unapply_x(extent.0), self.unapply_x(extent.1))
    }

    /// The untransformed pixel interval currently visible through a view
    /// extent `(start, end)` along y.
    pub fn visible_y(&self, extent: (f32, f32)) -> (f32, f32) {
        (self.unapply_y(extent.0), self.unapply_y(extent.1))
    }
}
