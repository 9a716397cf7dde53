use crate::prelude::*;
use super::NOTE_BORDER_SIZE;

const SPINNER_RADIUS: f32 = 200.0;

/// hold a button and spin the cursor around the center. judged purely on
/// whether enough full rotations were accumulated before the spinner ends
pub struct Spinner {
    template: Arc<ObjectTemplate>,

    /// full rotations needed to clear the spinner
    rotations_required: u16,
    /// accumulated signed rotation in radians
    rotation: f32,
    /// cursor angle last frame, for the delta
    last_cursor_angle: Option<f32>,
    holding: bool,
}
impl Spinner {
    pub fn new(template: Arc<ObjectTemplate>, settings: &GameplaySettings) -> Self {
        let seconds = template.data().duration() / 1000.0;
        let rotations_required = (seconds * settings.spinner_rotation_rate).max(1.0) as u16;

        Self {
            template,
            rotations_required,
            rotation: 0.0,
            last_cursor_angle: None,
            holding: false,
        }
    }

    pub fn rotations_required(&self) -> u16 {
        self.rotations_required
    }
    /// spins in opposite directions cancel out
    pub fn rotations_completed(&self) -> u16 {
        (self.rotation.abs() / TAU) as u16
    }
}
impl ObjectBehavior for Spinner {
    fn activation_rule(&self, _state: HitObjectState) -> InteractionRule {
        InteractionRule::button(ButtonRule::HeldNoLock)
    }
    fn deactivation_rule(&self, _state: HitObjectState) -> InteractionRule {
        InteractionRule::button(ButtonRule::Released)
    }

    fn sof(&self, _ctx: &FrameContext) -> Sof {
        Sof {
            center: self.template.pos(),
            radius: SPINNER_RADIUS,
        }
    }

    fn on_reset(&mut self) {
        self.rotation = 0.0;
        self.last_cursor_angle = None;
        self.holding = false;
    }

    fn on_logic_update(&mut self, ctx: &FrameContext) {
        let data = self.template.data();
        let offset = ctx.input.cursor_pos - self.template.pos();
        let cursor_angle = offset.y.atan2(offset.x);

        if ctx.time >= data.start_time && ctx.time <= data.end_time {
            // only spins made while holding count
            if let (true, Some(last)) = (self.holding, self.last_cursor_angle) {
                let mut diff = cursor_angle - last;
                if diff > PI { diff -= TAU }
                else if diff < -PI { diff += TAU }

                self.rotation += diff;
            }
        }

        self.last_cursor_angle = Some(cursor_angle);
    }

    fn on_begin(&mut self, _time: f32) { self.holding = true; }
    fn on_press(&mut self, _time: f32) { self.holding = true; }
    fn on_raise(&mut self, _time: f32) { self.holding = false; }

    fn on_finish(&mut self, _ctx: &JudgementContext) -> HitResult {
        if self.rotations_completed() >= self.rotations_required {
            HitResult::Hit300
        } else {
            HitResult::Missed
        }
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn draw(&self, view: &ObjectView, list: &mut Vec<DrawItem>) {
        let pos = view.sof.center;

        list.push(DrawItem::Circle {
            pos,
            radius: SPINNER_RADIUS,
            color: Color::YELLOW.alpha(view.alpha),
            border: Some(Border::new(Color::BLACK.alpha(view.alpha), NOTE_BORDER_SIZE)),
        });

        // grows toward the rim as rotations accumulate
        let progress = (self.rotations_completed() as f32 / self.rotations_required.max(1) as f32).min(1.0);
        list.push(DrawItem::Ring {
            pos,
            radius: SPINNER_RADIUS * progress,
            width: NOTE_BORDER_SIZE,
            color: Color::WHITE.alpha(view.alpha),
        });

        // current spin direction
        let tip = pos + Vec2::new(self.rotation.cos(), self.rotation.sin()) * SPINNER_RADIUS;
        list.push(DrawItem::Line {
            p1: pos,
            p2: tip,
            width: 5.0,
            color: Color::GREEN.alpha(view.alpha),
        });
    }
}
