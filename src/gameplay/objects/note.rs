use crate::prelude::*;
use super::{ approach_circle, NOTE_BORDER_SIZE };

/// plain tap circle: press inside the circle within the window, judged on
/// how far from the nominal time the press landed
pub struct Note {
    template: Arc<ObjectTemplate>,
}
impl Note {
    pub fn new(template: Arc<ObjectTemplate>) -> Self {
        Self { template }
    }
}
impl ObjectBehavior for Note {
    fn activation_rule(&self, _state: HitObjectState) -> InteractionRule {
        InteractionRule::both(ButtonRule::Pressed, CursorRule::Enter)
    }
    fn deactivation_rule(&self, _state: HitObjectState) -> InteractionRule {
        InteractionRule::button(ButtonRule::Released)
    }

    fn sof(&self, ctx: &FrameContext) -> Sof {
        Sof {
            center: self.template.pos(),
            radius: ctx.windows.circle_radius,
        }
    }

    fn on_finish(&mut self, ctx: &JudgementContext) -> HitResult {
        match ctx.time_started {
            None => HitResult::Missed,
            Some(started) => HitResult::from_hit_delta(
                started - self.template.start_time(),
                ctx.windows.hit_window,
            ),
        }
    }

    fn draw(&self, view: &ObjectView, list: &mut Vec<DrawItem>) {
        let pos = view.sof.center;

        if view.state.is_approach_circle_visible() {
            list.push(approach_circle(
                pos,
                view.sof.radius,
                self.template.start_time() - view.time,
                view.windows.approach_time,
                view.alpha,
            ));
        }

        list.push(DrawItem::Circle {
            pos,
            radius: view.sof.radius,
            color: Color::WHITE.alpha(view.alpha),
            border: Some(Border::new(Color::BLACK.alpha(view.alpha), NOTE_BORDER_SIZE)),
        });
    }
}
