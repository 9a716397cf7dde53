use crate::prelude::*;

/// owns the ordered hit object collection for the current map and drives it:
/// advances time, walks the objects from a remembered cursor, resolves input
/// against whichever rule each object currently exposes, and collects the
/// judgements that fall out
pub struct GameManager {
    /// insertion order == appearance order (increasing end time)
    objects: Vec<HitObject>,
    /// scan start index. never moves backward outside an explicit seek, so a
    /// full play-through visits each object O(1) times amortized
    cursor: usize,
    /// current session time in ms
    time: f32,
    windows: TimingWindows,

    records: Vec<JudgementRecord>,
    tally: JudgementTally,
    /// (session time, activation offset) pairs for hit-error display
    hit_deltas: Vec<(f32, f32)>,
    completed: bool,
}
impl GameManager {
    /// build the session from an authored template list. corrupted templates
    /// are skipped with a warning and the rest of the map still loads
    pub fn load(
        templates: Vec<ObjectTemplate>,
        windows: TimingWindows,
        settings: &GameplaySettings,
    ) -> CircletResult<Self> {
        let mut valid = Vec::with_capacity(templates.len());
        for (i, template) in templates.into_iter().enumerate() {
            match template.validate() {
                Ok(()) => valid.push(template),
                Err(e) => warn!("skipping template {i}: {e:?}"),
            }
        }
        if valid.is_empty() {
            return Err(TemplateError::EmptyMap.into());
        }

        // the scan loop depends on appearance order
        valid.sort_by(|a, b| a.end_time().total_cmp(&b.end_time()));

        let objects = valid
            .into_iter()
            .map(|template| HitObject::from_template(Arc::new(template), settings))
            .collect();

        Ok(Self {
            objects,
            cursor: 0,
            time: 0.0,
            windows,
            records: Vec::new(),
            tally: JudgementTally::default(),
            hit_deltas: Vec::new(),
            completed: false,
        })
    }

    pub fn time(&self) -> f32 { self.time }
    pub fn cursor(&self) -> usize { self.cursor }
    pub fn objects(&self) -> &[HitObject] { &self.objects }
    pub fn windows(&self) -> &TimingWindows { &self.windows }
    pub fn results(&self) -> &[JudgementRecord] { &self.records }
    pub fn tally(&self) -> &JudgementTally { &self.tally }
    pub fn accuracy(&self) -> f64 { self.tally.accuracy() }
    pub fn hit_deltas(&self) -> &[(f32, f32)] { &self.hit_deltas }
    pub fn is_complete(&self) -> bool { self.completed }

    /// time the intro could be skipped to: just before the first object
    /// starts approaching. None once that point has passed
    pub fn skip_intro_target(&self) -> Option<f32> {
        let first = self.objects.first()?;
        let target = first.start_time() - self.windows.approach_time;
        (target > 0.0 && self.time < target).then_some(target)
    }

    /// advance the session by `delta` ms and run one scan over the relevant
    /// slice of the collection
    pub fn update(&mut self, delta: f32, input: &InputSnapshot) {
        self.time += delta;

        let windows = self.windows;
        let ctx = FrameContext { time: self.time, windows: &windows, input };

        let mut i = self.cursor;
        while i < self.objects.len() {
            self.objects[i].update(&ctx);

            match self.objects[i].state() {
                HitObjectState::Invisible => {
                    if !self.objects[i].is_finished() {
                        // ordered by time: nothing further can be interactive yet
                        break;
                    }

                    // fully consumed. the cursor may only skip it while the
                    // ordering invariant holds for its successor
                    let this_end = self.objects[i].end_time();
                    let in_order = self.objects.get(i + 1).map_or(true, |next| next.end_time() >= this_end);
                    if self.cursor == i && in_order {
                        self.cursor = i + 1;
                    }
                    i += 1;
                }

                HitObjectState::Ready => {
                    let object = &mut self.objects[i];
                    if object.activation_rule().resolve(input, object.sof()) {
                        object.begin(&ctx);
                        // one activation per frame
                        break;
                    }
                    i += 1;
                }

                HitObjectState::Active => {
                    let object = &mut self.objects[i];
                    if object.deactivation_rule().resolve(input, object.sof()) {
                        object.raise(&ctx);
                    }
                    i += 1;
                }

                HitObjectState::Inactive => {
                    let object = &mut self.objects[i];
                    if object.activation_rule().resolve(input, object.sof()) {
                        object.press(&ctx);
                    }
                    i += 1;
                }

                HitObjectState::Pickup => {
                    let object = &mut self.objects[i];
                    let result = object.finish(&ctx);
                    if result.is_miss() {
                        trace!("object {i} missed: {}-{}", ctx.time, object.end_time());
                    }
                    if let Some(started) = object.time_started() {
                        self.hit_deltas.push((ctx.time, started - object.start_time()));
                    }

                    self.records.push(JudgementRecord { object_index: i, result, time: ctx.time });
                    self.tally.add(result);
                    i += 1;
                }

                HitObjectState::Approaching | HitObjectState::Fading => i += 1,
            }
        }

        if !self.completed && self.cursor >= self.objects.len() {
            trace!("all objects consumed, session complete");
            self.completed = true;
        }
    }

    /// jump the session clock. the only operation allowed to move the cursor
    /// backward: every object is reset and given one zero-delta update at the
    /// new time so visibility flags are consistent before scanning resumes.
    /// idempotent - seeking to the same time twice lands in the same state
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
        self.cursor = 0;
        self.completed = false;

        let windows = self.windows;
        let input = InputSnapshot::default();
        let ctx = FrameContext { time, windows: &windows, input: &input };
        for object in self.objects.iter_mut() {
            object.reset();
            object.update(&ctx);
        }
    }

    /// back to a clean sheet: seek to zero and forget every judgement
    pub fn restart(&mut self) {
        self.records.clear();
        self.tally = JudgementTally::default();
        self.hit_deltas.clear();
        self.set_time(0.0);
    }

    /// emit draw primitives for every visible object, far-to-near so the
    /// object appearing soonest lands topmost
    pub fn draw(&self, list: &mut Vec<DrawItem>) {
        let mut end = self.cursor;
        while end < self.objects.len() {
            let object = &self.objects[end];
            if object.state() == HitObjectState::Invisible && !object.is_finished() {
                break;
            }
            end += 1;
        }

        for object in self.objects[self.cursor..end].iter().rev() {
            object.draw(self.time, &self.windows, list);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NOTE_POS: Vec2 = Vec2::new(256.0, 192.0);

    fn windows() -> TimingWindows {
        TimingWindows { approach_time: 1000.0, hit_window: 300.0, fade_time: 300.0, circle_radius: 32.0 }
    }

    fn note_template(start_time: f32, pos: Vec2) -> ObjectTemplate {
        ObjectTemplate::Note(TemplateData { start_time, end_time: start_time, pos, combo_end: false })
    }

    fn manager(templates: Vec<ObjectTemplate>) -> GameManager {
        GameManager::load(templates, windows(), &GameplaySettings::default()).unwrap()
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::idle(Vec2::ZERO)
    }

    fn press_at(pos: Vec2) -> InputSnapshot {
        let mut input = InputSnapshot::idle(pos);
        input.key1 = ButtonState { down: true, pressed_this_frame: true, released_this_frame: false };
        input
    }

    fn release_at(pos: Vec2) -> InputSnapshot {
        let mut input = InputSnapshot::idle(pos);
        input.key1 = ButtonState { down: false, pressed_this_frame: false, released_this_frame: true };
        input
    }

    #[test]
    fn end_to_end_hit() {
        let mut manager = manager(vec![note_template(10_000.0, NOTE_POS)]);

        manager.update(8_900.0, &idle());
        assert_eq!(manager.objects()[0].state(), HitObjectState::Invisible);

        manager.update(100.0, &idle());
        assert_eq!(manager.objects()[0].state(), HitObjectState::Approaching);

        manager.update(700.0, &idle());
        assert_eq!(manager.objects()[0].state(), HitObjectState::Ready);

        // activation inside the window
        manager.update(150.0, &press_at(NOTE_POS));
        assert_eq!(manager.objects()[0].state(), HitObjectState::Active);
        assert_eq!(manager.objects()[0].time_started(), Some(9_850.0));

        // raise on release
        manager.update(50.0, &release_at(NOTE_POS));
        assert_eq!(manager.objects()[0].state(), HitObjectState::Inactive);

        // window closes: force-retired, judged the same frame
        manager.update(400.0, &idle());
        assert_eq!(manager.time(), 10_300.0);
        assert_eq!(manager.objects()[0].state(), HitObjectState::Fading);
        assert_eq!(manager.results(), &[JudgementRecord {
            object_index: 0,
            result: HitResult::Hit100,
            time: 10_300.0,
        }]);
        assert_eq!(manager.hit_deltas(), &[(10_300.0, -150.0)]);

        // fade runs out, object is consumed, session is over
        manager.update(300.0, &idle());
        assert_eq!(manager.objects()[0].state(), HitObjectState::Invisible);
        assert!(manager.objects()[0].is_finished());
        assert_eq!(manager.cursor(), 1);
        assert!(manager.is_complete());
        assert_relative_eq!(manager.accuracy(), 100.0 / 300.0);
    }

    #[test]
    fn missed_when_never_activated() {
        let mut manager = manager(vec![note_template(10_000.0, NOTE_POS)]);

        manager.update(10_300.0, &idle());
        // cascades one state per frame until the window-close guard fires
        for _ in 0..3 {
            manager.update(0.0, &idle());
        }

        assert_eq!(manager.results().len(), 1);
        assert_eq!(manager.results()[0].result, HitResult::Missed);
        assert!(manager.hit_deltas().is_empty());
        assert_eq!(manager.tally().misses, 1);
    }

    #[test]
    fn one_activation_per_frame() {
        let mut manager = manager(vec![
            note_template(10_000.0, NOTE_POS),
            note_template(10_000.0, NOTE_POS),
        ]);

        manager.update(9_000.0, &idle());
        manager.update(700.0, &idle());
        manager.update(0.0, &idle());
        assert_eq!(manager.objects()[0].state(), HitObjectState::Ready);
        assert_eq!(manager.objects()[1].state(), HitObjectState::Ready);

        // both are Ready on the same circle; a single press takes the first only
        manager.update(100.0, &press_at(NOTE_POS));
        assert_eq!(manager.objects()[0].state(), HitObjectState::Active);
        assert_eq!(manager.objects()[1].state(), HitObjectState::Ready);
    }

    #[test]
    fn reactivation_keeps_first_activation_time() {
        let mut manager = manager(vec![note_template(10_000.0, NOTE_POS)]);

        manager.update(9_700.0, &idle());
        manager.update(0.0, &idle());
        manager.update(150.0, &press_at(NOTE_POS));
        assert_eq!(manager.objects()[0].state(), HitObjectState::Active);

        manager.update(50.0, &release_at(NOTE_POS));
        assert_eq!(manager.objects()[0].state(), HitObjectState::Inactive);

        manager.update(50.0, &press_at(NOTE_POS));
        assert_eq!(manager.objects()[0].state(), HitObjectState::Active);
        // re-pressing never restamps the activation
        assert_eq!(manager.objects()[0].time_started(), Some(9_850.0));
    }

    #[test]
    fn cursor_is_monotone() {
        let mut manager = manager(vec![
            note_template(10_000.0, NOTE_POS),
            note_template(11_000.0, NOTE_POS),
        ]);

        let mut last_cursor = 0;
        let mut time = 0.0;
        while time < 13_000.0 {
            manager.update(100.0, &idle());
            time += 100.0;

            assert!(manager.cursor() >= last_cursor);
            last_cursor = manager.cursor();
        }

        assert_eq!(manager.cursor(), 2);
        assert!(manager.is_complete());
        assert_eq!(manager.tally().misses, 2);
    }

    #[test]
    fn set_time_is_idempotent() {
        let mut manager = manager(vec![
            note_template(10_000.0, NOTE_POS),
            note_template(11_000.0, NOTE_POS),
        ]);

        // play partway in
        manager.update(10_400.0, &idle());
        manager.update(100.0, &idle());

        let observe = |m: &GameManager| {
            (m.cursor(), m.objects().iter().map(|o| (o.state(), o.is_finished())).collect::<Vec<_>>())
        };

        manager.set_time(9_500.0);
        let first = observe(&manager);
        manager.set_time(9_500.0);
        assert_eq!(observe(&manager), first);

        // and the seek actually rewound visibility
        assert_eq!(manager.cursor(), 0);
        assert_eq!(manager.objects()[0].state(), HitObjectState::Approaching);
        assert_eq!(manager.objects()[1].state(), HitObjectState::Invisible);
        assert!(!manager.objects()[1].is_finished());
    }

    #[test]
    fn seek_to_zero_rewinds_everything() {
        let mut manager = manager(vec![note_template(10_000.0, NOTE_POS)]);

        manager.update(9_500.0, &idle());
        manager.update(0.0, &idle());
        assert_ne!(manager.objects()[0].state(), HitObjectState::Invisible);

        manager.restart();
        assert_eq!(manager.time(), 0.0);
        assert_eq!(manager.cursor(), 0);
        assert_eq!(manager.objects()[0].state(), HitObjectState::Invisible);
        assert!(manager.results().is_empty());
        assert_eq!(manager.tally().total(), 0);
    }

    #[test]
    fn draw_is_far_to_near_and_skips_the_invisible() {
        let near = Vec2::new(100.0, 100.0);
        let far = Vec2::new(400.0, 300.0);
        let mut manager = manager(vec![
            note_template(10_000.0, near),
            note_template(10_200.0, far),
        ]);

        // only the first is approaching yet: the scan stops at the second
        manager.update(9_100.0, &idle());
        let mut list = Vec::new();
        manager.draw(&mut list);
        assert!(!list.is_empty());
        assert!(list.iter().all(|item| match *item {
            DrawItem::Circle { pos, .. } | DrawItem::Ring { pos, .. } => pos == near,
            DrawItem::Line { .. } => false,
        }));

        // both visible: the later object's primitives come first so the
        // nearer one paints on top
        manager.update(200.0, &idle());
        list.clear();
        manager.draw(&mut list);
        let positions: Vec<Vec2> = list.iter().map(|item| match *item {
            DrawItem::Circle { pos, .. } | DrawItem::Ring { pos, .. } => pos,
            DrawItem::Line { p1, .. } => p1,
        }).collect();
        assert_eq!(positions.first(), Some(&far));
        assert_eq!(positions.last(), Some(&near));

        // once everything is consumed nothing is drawn at all
        manager.update(10_000.0, &idle());
        for _ in 0..4 {
            manager.update(100.0, &idle());
        }
        assert!(manager.is_complete());
        list.clear();
        manager.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn load_sorts_and_skips_corrupt_templates() {
        let manager = manager(vec![
            note_template(11_000.0, NOTE_POS),
            ObjectTemplate::Note(TemplateData {
                start_time: f32::NAN,
                end_time: f32::NAN,
                pos: NOTE_POS,
                combo_end: false,
            }),
            note_template(10_000.0, NOTE_POS),
        ]);

        // the corrupt one is gone and the rest got ordered by end time
        assert_eq!(manager.objects().len(), 2);
        assert_eq!(manager.objects()[0].end_time(), 10_000.0);
        assert_eq!(manager.objects()[1].end_time(), 11_000.0);
    }

    #[test]
    fn load_rejects_an_empty_map() {
        let result = GameManager::load(Vec::new(), windows(), &GameplaySettings::default());
        assert!(matches!(result, Err(CircletError::Template(TemplateError::EmptyMap))));
    }

    #[test]
    fn skip_intro_target_points_at_the_first_approach() {
        let mut manager = manager(vec![note_template(10_000.0, NOTE_POS)]);
        assert_eq!(manager.skip_intro_target(), Some(9_000.0));

        manager.update(9_200.0, &idle());
        assert_eq!(manager.skip_intro_target(), None);
    }
}
