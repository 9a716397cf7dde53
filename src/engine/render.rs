use crate::prelude::*;

/// rgba, each channel 0.0..=1.0
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}
impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// same color with the alpha channel replaced
    pub fn alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Border {
    pub color: Color,
    pub width: f32,
}
impl Border {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// draw primitives handed across the render boundary.
/// the renderer on the other side decides what these actually look like
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawItem {
    Circle {
        pos: Vec2,
        radius: f32,
        color: Color,
        border: Option<Border>,
    },
    /// unfilled outline, used for approach circles and spinner gauges
    Ring {
        pos: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    Line {
        p1: Vec2,
        p2: Vec2,
        width: f32,
        color: Color,
    },
}

/// coarse per-object transform exposed to animation/skin layers
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObjectTransform {
    pub pos: Vec2,
    pub scale: f32,
    /// radians, only nonzero for objects that spin
    pub rotation: f32,
    pub alpha: f32,
}
impl Default for ObjectTransform {
    fn default() -> Self {
        Self { pos: Vec2::ZERO, scale: 1.0, rotation: 0.0, alpha: 1.0 }
    }
}
