use crate::prelude::*;

/// lifecycle of a single hit object. state only ever moves along:
/// Invisible -> Approaching -> Ready -> (Active <-> Inactive)
/// with Ready/Active/Inactive -> Pickup -> Fading -> Invisible(finished)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitObjectState {
    /// not yet on screen, or fully consumed
    Invisible,
    /// visible, approach circle closing in
    Approaching,
    /// inside the hit window, waiting for the first activation
    Ready,
    /// player interaction in progress
    Active,
    /// interaction lapsed; can be re-entered while the window lasts
    Inactive,
    /// interaction window over, judgement pending
    Pickup,
    /// judged, fading out
    Fading,
}
impl HitObjectState {
    /// is per-frame logic + input resolution running for this state?
    pub fn is_updating(self) -> bool {
        matches!(self, Self::Ready | Self::Active | Self::Inactive)
    }
    pub fn is_approach_circle_visible(self) -> bool {
        matches!(self, Self::Approaching | Self::Ready)
    }
    pub fn is_fading_in(self) -> bool {
        self == Self::Approaching
    }
    pub fn is_fading_out(self) -> bool {
        matches!(self, Self::Pickup | Self::Fading)
    }
}

/// circular cursor hit-test region (sphere of influence)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sof {
    pub center: Vec2,
    pub radius: f32,
}
impl Sof {
    /// the boundary itself counts as inside
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// read-only view of the frame the session is advancing through.
/// objects get everything through this instead of reaching back into the manager
#[derive(Copy, Clone)]
pub struct FrameContext<'a> {
    /// current session time in ms
    pub time: f32,
    pub windows: &'a TimingWindows,
    pub input: &'a InputSnapshot,
}

/// lifecycle facts handed to a variant when it produces its judgement
#[derive(Copy, Clone)]
pub struct JudgementContext<'a> {
    /// time of the first successful activation, if there ever was one
    pub time_started: Option<f32>,
    pub time_finished: f32,
    pub windows: &'a TimingWindows,
}

/// core lifecycle snapshot handed to variant draw code
#[derive(Copy, Clone)]
pub struct ObjectView<'a> {
    pub state: HitObjectState,
    pub sof: Sof,
    pub alpha: f32,
    pub time: f32,
    pub windows: &'a TimingWindows,
}

/// per-variant behavior plugged into the lifecycle core.
/// everything except the rules, the SOF and the judgement is optional
pub trait ObjectBehavior: Send {
    /// rule authorizing Ready -> Active and Inactive -> Active
    fn activation_rule(&self, state: HitObjectState) -> InteractionRule;
    /// rule authorizing Active -> Inactive
    fn deactivation_rule(&self, state: HitObjectState) -> InteractionRule;
    /// hit-test region this frame
    fn sof(&self, ctx: &FrameContext) -> Sof;
    /// judgement when the object is consumed
    fn on_finish(&mut self, ctx: &JudgementContext) -> HitResult;

    fn on_reset(&mut self) {}
    /// runs every frame while the object exists, whatever its state
    fn on_update(&mut self, _ctx: &FrameContext) {}
    /// runs only while the object is in an updating state
    fn on_logic_update(&mut self, _ctx: &FrameContext) {}
    /// fires on the first activation (Ready -> Active)
    fn on_begin(&mut self, _time: f32) {}
    /// fires on re-activation (Inactive -> Active)
    fn on_press(&mut self, _time: f32) {}
    /// fires when the interaction lapses (Active -> Inactive)
    fn on_raise(&mut self, _time: f32) {}
    /// current rotation for the object transform
    fn rotation(&self) -> f32 { 0.0 }
    fn draw(&self, _view: &ObjectView, _list: &mut Vec<DrawItem>) {}
}

/// one playable target. owns the state machine; variant-specific behavior
/// lives behind the [`ObjectBehavior`] vtable
pub struct HitObject {
    state: HitObjectState,
    finished: bool,
    /// time of the first successful activation
    time_started: Option<f32>,
    /// time the object was force-retired into Pickup
    time_finished: Option<f32>,
    sof: Sof,
    template: Arc<ObjectTemplate>,
    behavior: Box<dyn ObjectBehavior>,
}
impl HitObject {
    pub fn from_template(template: Arc<ObjectTemplate>, settings: &GameplaySettings) -> Self {
        let behavior: Box<dyn ObjectBehavior> = match &*template {
            ObjectTemplate::Note(_) => Box::new(Note::new(template.clone())),
            ObjectTemplate::Slider { .. } => Box::new(Slider::new(template.clone())),
            ObjectTemplate::Spinner(_) => Box::new(Spinner::new(template.clone(), settings)),
        };

        Self {
            state: HitObjectState::Invisible,
            finished: false,
            time_started: None,
            time_finished: None,
            sof: Sof { center: template.pos(), radius: 0.0 },
            template,
            behavior,
        }
    }

    pub fn state(&self) -> HitObjectState { self.state }
    pub fn is_finished(&self) -> bool { self.finished }
    pub fn time_started(&self) -> Option<f32> { self.time_started }
    pub fn time_finished(&self) -> Option<f32> { self.time_finished }
    pub fn sof(&self) -> Sof { self.sof }
    pub fn template(&self) -> &ObjectTemplate { &self.template }

    pub fn start_time(&self) -> f32 { self.template.start_time() }
    pub fn end_time(&self) -> f32 { self.template.end_time() }

    pub fn is_updating(&self) -> bool { self.state.is_updating() }
    pub fn is_approach_circle_visible(&self) -> bool { self.state.is_approach_circle_visible() }
    pub fn is_fading_in(&self) -> bool { self.state.is_fading_in() }
    pub fn is_fading_out(&self) -> bool { self.state.is_fading_out() }

    /// rule guarding Ready/Inactive -> Active this frame
    pub fn activation_rule(&self) -> InteractionRule {
        self.behavior.activation_rule(self.state)
    }
    /// rule guarding Active -> Inactive this frame
    pub fn deactivation_rule(&self) -> InteractionRule {
        self.behavior.deactivation_rule(self.state)
    }

    /// set this object back to defaults
    pub fn reset(&mut self) {
        self.state = HitObjectState::Invisible;
        self.finished = false;
        self.time_started = None;
        self.time_finished = None;
        self.behavior.on_reset();
    }

    /// advance the time-driven side of the state machine by one frame.
    /// at most one transition fires per call; a guard that fails simply
    /// leaves the object where it is until the next frame
    pub fn update(&mut self, ctx: &FrameContext) {
        self.sof = self.behavior.sof(ctx);
        self.behavior.on_update(ctx);

        let now = ctx.time;
        match self.state {
            HitObjectState::Invisible if !self.finished => {
                if now >= self.start_time() - ctx.windows.approach_time {
                    self.state = HitObjectState::Approaching;
                }
            }
            HitObjectState::Invisible => {}

            HitObjectState::Approaching => {
                if now >= self.start_time() - ctx.windows.hit_window {
                    self.state = HitObjectState::Ready;
                }
            }

            // variant logic gets one last look before the force-retire check
            HitObjectState::Ready | HitObjectState::Active | HitObjectState::Inactive => {
                self.behavior.on_logic_update(ctx);
                if now >= self.end_time() + ctx.windows.hit_window {
                    self.state = HitObjectState::Pickup;
                    self.finished = true;
                    self.time_finished = Some(now);
                }
            }

            HitObjectState::Pickup => {}

            HitObjectState::Fading => {
                let done_at = self.time_finished.unwrap_or(now) + ctx.windows.fade_time;
                if now >= done_at {
                    self.state = HitObjectState::Invisible;
                }
            }
        }
    }

    /// first activation. a no-op unless the object is Ready
    pub fn begin(&mut self, ctx: &FrameContext) {
        if self.state != HitObjectState::Ready { return }

        self.state = HitObjectState::Active;
        self.time_started = Some(ctx.time);
        self.behavior.on_begin(ctx.time);
    }

    /// re-activation. a no-op unless the object is Inactive
    pub fn press(&mut self, ctx: &FrameContext) {
        if self.state != HitObjectState::Inactive { return }

        self.state = HitObjectState::Active;
        self.behavior.on_press(ctx.time);
    }

    /// interaction lapsed. a no-op unless the object is Active
    pub fn raise(&mut self, ctx: &FrameContext) {
        if self.state != HitObjectState::Active { return }

        self.state = HitObjectState::Inactive;
        self.behavior.on_raise(ctx.time);
    }

    /// consume the object and produce its judgement. player input races
    /// frame timing, so calling this outside Pickup is a logged logic error
    /// that conservatively judges a miss instead of corrupting the state
    pub fn finish(&mut self, ctx: &FrameContext) -> HitResult {
        if self.state != HitObjectState::Pickup {
            warn!("finish() outside pickup (state: {:?})", self.state);
            return HitResult::Missed;
        }

        self.state = HitObjectState::Fading;
        let judgement_ctx = JudgementContext {
            time_started: self.time_started,
            time_finished: self.time_finished.unwrap_or(ctx.time),
            windows: ctx.windows,
        };
        self.behavior.on_finish(&judgement_ctx)
    }

    /// derived fade factor: ramps up across Approaching, holds at 1 while
    /// updating, ramps back down across Pickup/Fading
    pub fn alpha(&self, time: f32, windows: &TimingWindows) -> f32 {
        match self.state {
            HitObjectState::Invisible => 0.0,
            HitObjectState::Approaching => {
                let fade_start = self.start_time() - windows.approach_time;
                let span = (windows.approach_time - windows.hit_window).max(1.0);
                ((time - fade_start) / span).clamp(0.0, 1.0)
            }
            HitObjectState::Ready | HitObjectState::Active | HitObjectState::Inactive => 1.0,
            HitObjectState::Pickup | HitObjectState::Fading => {
                let Some(finished) = self.time_finished else { return 1.0 };
                (1.0 - (time - finished) / windows.fade_time.max(1.0)).clamp(0.0, 1.0)
            }
        }
    }

    pub fn object_transform(&self, time: f32, windows: &TimingWindows) -> ObjectTransform {
        ObjectTransform {
            pos: self.sof.center,
            scale: 1.0,
            rotation: self.behavior.rotation(),
            alpha: self.alpha(time, windows),
        }
    }

    /// emit this object's draw primitives. no-ops while Invisible
    pub fn draw(&self, time: f32, windows: &TimingWindows, list: &mut Vec<DrawItem>) {
        if self.state == HitObjectState::Invisible { return }

        let view = ObjectView {
            state: self.state,
            sof: self.sof,
            alpha: self.alpha(time, windows),
            time,
            windows,
        };
        self.behavior.draw(&view, list);
    }
}
