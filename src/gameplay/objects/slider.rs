use crate::prelude::*;
use super::{ approach_circle, NOTE_BORDER_SIZE };

const SLIDER_DOT_RADIUS: f32 = 8.0;
/// the follow region is more forgiving than the head circle
const FOLLOW_CIRCLE_MULT: f32 = 2.0;

/// press the head, then keep holding with the cursor on the ball as it
/// travels the path. the head press is judged like a note, then degraded
/// by how much of the slide was actually held
pub struct Slider {
    template: Arc<ObjectTemplate>,

    /// cumulative arc length at each path vertex
    lengths: Vec<f32>,
    total_length: f32,

    /// is the slide currently being held?
    holding: bool,
    /// ms of the slide spent held
    held_time: f32,
    last_logic_time: Option<f32>,
}
impl Slider {
    pub fn new(template: Arc<ObjectTemplate>) -> Self {
        let path: &[Vec2] = match &*template {
            ObjectTemplate::Slider { path, .. } => path,
            _ => &[],
        };

        let mut lengths = Vec::with_capacity(path.len());
        let mut total_length = 0.0;
        lengths.push(0.0);
        for segment in path.windows(2) {
            total_length += segment[0].distance(segment[1]);
            lengths.push(total_length);
        }

        Self {
            template,
            lengths,
            total_length,
            holding: false,
            held_time: 0.0,
            last_logic_time: None,
        }
    }

    fn path(&self) -> &[Vec2] {
        match &*self.template {
            ObjectTemplate::Slider { path, .. } => path,
            _ => &[],
        }
    }

    /// ball position at `time`, linear in arc length over the slide interval
    pub fn pos_at(&self, time: f32) -> Vec2 {
        let data = self.template.data();
        let path = self.path();
        let Some(&first) = path.first() else { return data.pos };

        if self.total_length <= 0.0 {
            return first;
        }

        let progress = ((time - data.start_time) / data.duration().max(1.0)).clamp(0.0, 1.0);
        let target = progress * self.total_length;

        for (i, segment) in path.windows(2).enumerate() {
            if target <= self.lengths[i + 1] {
                let length = self.lengths[i + 1] - self.lengths[i];
                let t = if length > 0.0 { (target - self.lengths[i]) / length } else { 0.0 };
                return segment[0].lerp(segment[1], t);
            }
        }

        path.last().copied().unwrap_or(first)
    }
}
impl ObjectBehavior for Slider {
    fn activation_rule(&self, state: HitObjectState) -> InteractionRule {
        match state {
            // the head wants a clean press
            HitObjectState::Ready => InteractionRule::both(ButtonRule::Pressed, CursorRule::Enter),
            // a dropped slide can be re-grabbed by just holding over the ball
            _ => InteractionRule::both(ButtonRule::HeldNoLock, CursorRule::Enter),
        }
    }
    fn deactivation_rule(&self, _state: HitObjectState) -> InteractionRule {
        InteractionRule::merged(ButtonRule::Released, CursorRule::Leave, MergeRule::Or)
    }

    fn sof(&self, ctx: &FrameContext) -> Sof {
        let radius = if ctx.time > self.template.start_time() {
            ctx.windows.circle_radius * FOLLOW_CIRCLE_MULT
        } else {
            ctx.windows.circle_radius
        };

        Sof { center: self.pos_at(ctx.time), radius }
    }

    fn on_reset(&mut self) {
        self.holding = false;
        self.held_time = 0.0;
        self.last_logic_time = None;
    }

    fn on_logic_update(&mut self, ctx: &FrameContext) {
        let data = self.template.data();

        // only the part of the frame that overlaps the slide counts
        if let Some(last) = self.last_logic_time {
            if self.holding {
                let from = last.max(data.start_time);
                let to = ctx.time.min(data.end_time);
                if to > from {
                    self.held_time += to - from;
                }
            }
        }
        self.last_logic_time = Some(ctx.time);
    }

    fn on_begin(&mut self, _time: f32) { self.holding = true; }
    fn on_press(&mut self, _time: f32) { self.holding = true; }
    fn on_raise(&mut self, _time: f32) { self.holding = false; }

    fn on_finish(&mut self, ctx: &JudgementContext) -> HitResult {
        let Some(started) = ctx.time_started else { return HitResult::Missed };

        let data = self.template.data();
        let head = HitResult::from_hit_delta(started - data.start_time, ctx.windows.hit_window);

        let held_fraction = self.held_time / data.duration().max(1.0);
        if held_fraction >= 0.9 {
            head
        } else if held_fraction >= 0.5 {
            head.downgraded()
        } else {
            HitResult::Hit50
        }
    }

    fn draw(&self, view: &ObjectView, list: &mut Vec<DrawItem>) {
        // body dots along the path
        for &point in self.path() {
            list.push(DrawItem::Circle {
                pos: point,
                radius: SLIDER_DOT_RADIUS,
                color: Color::WHITE.alpha(view.alpha * 0.5),
                border: None,
            });
        }

        let head = self.pos_at(self.template.start_time());
        if view.state.is_approach_circle_visible() {
            list.push(approach_circle(
                head,
                view.windows.circle_radius,
                self.template.start_time() - view.time,
                view.windows.approach_time,
                view.alpha,
            ));
        }

        // the ball
        list.push(DrawItem::Circle {
            pos: view.sof.center,
            radius: view.windows.circle_radius,
            color: Color::WHITE.alpha(view.alpha),
            border: Some(Border::new(Color::BLACK.alpha(view.alpha), NOTE_BORDER_SIZE)),
        });
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn windows() -> TimingWindows {
        TimingWindows { approach_time: 1000.0, hit_window: 300.0, fade_time: 300.0, circle_radius: 32.0 }
    }

    fn slider() -> Slider {
        // two equal segments, 200 units total, 1 second long
        Slider::new(Arc::new(ObjectTemplate::Slider {
            data: TemplateData {
                start_time: 10_000.0,
                end_time: 11_000.0,
                pos: Vec2::new(0.0, 0.0),
                combo_end: false,
            },
            path: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
            ],
        }))
    }

    #[test]
    fn ball_follows_the_path() {
        let slider = slider();

        assert_eq!(slider.pos_at(9_000.0), Vec2::new(0.0, 0.0));
        assert_eq!(slider.pos_at(10_000.0), Vec2::new(0.0, 0.0));
        assert_eq!(slider.pos_at(10_250.0), Vec2::new(50.0, 0.0));
        assert_eq!(slider.pos_at(10_500.0), Vec2::new(100.0, 0.0));
        assert_eq!(slider.pos_at(10_750.0), Vec2::new(100.0, 50.0));
        assert_eq!(slider.pos_at(11_000.0), Vec2::new(100.0, 100.0));
        assert_eq!(slider.pos_at(12_000.0), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn held_time_only_counts_the_slide() {
        let mut slider = slider();
        let windows = windows();
        let input = InputSnapshot::default();

        let mut logic = |time, slider: &mut Slider| {
            let ctx = FrameContext { time, windows: &windows, input: &input };
            slider.on_logic_update(&ctx);
        };

        // held before the slide starts: doesn't count
        slider.on_begin(9_900.0);
        logic(9_900.0, &mut slider);
        logic(10_000.0, &mut slider);
        assert_eq!(slider.held_time, 0.0);

        // held through the first half
        logic(10_500.0, &mut slider);
        assert_eq!(slider.held_time, 500.0);

        // dropped for the rest
        slider.on_raise(10_500.0);
        logic(11_000.0, &mut slider);
        assert_eq!(slider.held_time, 500.0);
    }

    #[test]
    fn judgement_degrades_with_dropped_hold() {
        let windows = windows();
        let judge = |held_time: f32, time_started: Option<f32>| {
            let mut s = slider();
            s.held_time = held_time;
            let ctx = JudgementContext { time_started, time_finished: 11_300.0, windows: &windows };
            s.on_finish(&ctx)
        };

        assert_eq!(judge(1000.0, None), HitResult::Missed);
        // clean head press, full hold
        assert_eq!(judge(1000.0, Some(10_000.0)), HitResult::Hit300);
        // clean head press, half the slide dropped
        assert_eq!(judge(500.0, Some(10_000.0)), HitResult::Hit100);
        // barely touched the slide
        assert_eq!(judge(100.0, Some(10_000.0)), HitResult::Hit50);
    }

    #[test]
    fn regrab_rule_is_softer_than_the_head() {
        let slider = slider();

        assert_eq!(
            slider.activation_rule(HitObjectState::Ready),
            InteractionRule::both(ButtonRule::Pressed, CursorRule::Enter),
        );
        assert_eq!(
            slider.activation_rule(HitObjectState::Inactive),
            InteractionRule::both(ButtonRule::HeldNoLock, CursorRule::Enter),
        );
        // release or slipping off the ball both drop the slide
        assert_eq!(
            slider.deactivation_rule(HitObjectState::Active),
            InteractionRule::merged(ButtonRule::Released, CursorRule::Leave, MergeRule::Or),
        );
    }
}
