use crate::prelude::*;

mod note;
mod slider;
mod spinner;

pub use note::*;
pub use slider::*;
pub use spinner::*;

pub const NOTE_BORDER_SIZE: f32 = 2.0;
const APPROACH_CIRCLE_MULT: f32 = 4.0;

/// shrinking ring drawn around an object while it approaches its hit time
pub(crate) fn approach_circle(pos: Vec2, radius: f32, time_until_hit: f32, approach_time: f32, alpha: f32) -> DrawItem {
    let progress = (time_until_hit / approach_time.max(1.0)).clamp(0.0, 1.0);

    DrawItem::Ring {
        pos,
        radius: radius * (1.0 + APPROACH_CIRCLE_MULT * progress),
        width: NOTE_BORDER_SIZE,
        color: Color::WHITE.alpha(alpha),
    }
}
