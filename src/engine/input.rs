use crate::prelude::*;

/// the two designated gameplay action buttons
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionButton {
    Key1,
    Key2,
}

/// per-button state for one frame
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// is the button currently down?
    pub down: bool,
    /// did the button transition to down this frame?
    pub pressed_this_frame: bool,
    /// did the button transition to up this frame?
    pub released_this_frame: bool,
}

/// read-only snapshot of the input devices for one frame.
/// cursor coordinates are in playfield space, the same space hit objects live in
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub key1: ButtonState,
    pub key2: ButtonState,
    pub cursor_pos: Vec2,
}
impl InputSnapshot {
    /// snapshot with no button activity, cursor parked at `cursor_pos`
    pub fn idle(cursor_pos: Vec2) -> Self {
        Self { cursor_pos, ..Self::default() }
    }
}

/// builds per-frame snapshots from raw device events.
/// press/release/move events are latched between frames so a press and
/// release landing inside the same frame still show both edges
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    cursor_pos: Vec2,
    down: [bool; 2],
    pressed_since: [bool; 2],
    released_since: [bool; 2],
}
impl InputTracker {
    pub fn new() -> Self { Self::default() }

    pub fn press(&mut self, button: ActionButton) {
        let i = button as usize;
        if !self.down[i] {
            self.down[i] = true;
            self.pressed_since[i] = true;
        }
    }
    pub fn release(&mut self, button: ActionButton) {
        let i = button as usize;
        if self.down[i] {
            self.down[i] = false;
            self.released_since[i] = true;
        }
    }
    pub fn cursor_moved(&mut self, pos: Vec2) {
        self.cursor_pos = pos;
    }

    /// consume the latched edges and produce this frame's snapshot.
    /// call exactly once per frame
    pub fn snapshot(&mut self) -> InputSnapshot {
        let button = |i: usize, t: &Self| ButtonState {
            down: t.down[i],
            pressed_this_frame: t.pressed_since[i],
            released_this_frame: t.released_since[i],
        };
        let snapshot = InputSnapshot {
            key1: button(0, self),
            key2: button(1, self),
            cursor_pos: self.cursor_pos,
        };

        self.pressed_since = [false; 2];
        self.released_since = [false; 2];
        snapshot
    }
}
