use glam::{vec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect {
            origin: vec2(x, y),
            size: vec2(w, h),
        }
    }

    pub fn centre(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect {
            origin: self.origin + delta,
            size: self.size,
        }
    }

    /// Scale the rect's size about its own centre. The centre stays fixed.
    pub fn scaled_about_centre(&self, factor: f32) -> Rect {
        let size = self.size * factor;
        let origin = self.origin + (self.size - size) * 0.5;
        Rect { origin, size }
    }
}

/// Mapping from detector-space coordinates to display-space coordinates.
///
/// Scales magnify detector coordinates into display units; `offset` is the
/// detector viewport's position within the display view and is added after
/// scaling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    pub x_scale: f32,
    pub y_scale: f32,
    pub offset: Vec2,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        CoordinateTransform {
            x_scale: 1.,
            y_scale: 1.,
            offset: Vec2::ZERO,
        }
    }
}

impl CoordinateTransform {
    pub fn new(x_scale: f32, y_scale: f32, offset: Vec2) -> CoordinateTransform {
        CoordinateTransform {
            x_scale,
            y_scale,
            offset,
        }
    }

    pub fn scale(&self) -> Vec2 {
        vec2(self.x_scale, self.y_scale)
    }

    /// Same transform with the offset shifted by `delta`.
    pub fn shifted(&self, delta: Vec2) -> CoordinateTransform {
        CoordinateTransform {
            offset: self.offset + delta,
            ..*self
        }
    }

    pub fn apply_point(&self, point: Vec2) -> Vec2 {
        point * self.scale() + self.offset
    }

    pub fn apply_rect(&self, rect: Rect) -> Rect {
        Rect {
            origin: rect.origin * self.scale(),
            size: rect.size * self.scale(),
        }
        .translated(self.offset)
    }
}
