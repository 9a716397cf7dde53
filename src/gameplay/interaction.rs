use crate::prelude::*;

/// button half of an interaction rule.
/// the "lock" variants require exactly one of the two designated buttons,
/// the no-lock variants accept either
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonRule {
    Ignore,
    Pressed,
    Held,
    Released,
    PressedNoLock,
    HeldNoLock,
}

/// cursor half of an interaction rule, tested against the object's SOF
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CursorRule {
    Ignore,
    /// cursor inside the SOF
    Enter,
    /// cursor strictly outside the SOF
    Leave,
}

/// how the button and cursor halves combine when both are set
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MergeRule {
    And,
    Or,
    /// declared but unused by the built-in object set
    Xor,
}

/// declarative description of which input combination authorizes a state
/// transition. objects recompute this per state instead of mutating it
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InteractionRule {
    /// blocks the transition unconditionally
    NoActivation,
    When {
        button: ButtonRule,
        cursor: CursorRule,
        merge: MergeRule,
    },
}

const NO_ACTIVATION_BIT: u8 = 0b1000_0000;

impl InteractionRule {
    pub fn button(button: ButtonRule) -> Self {
        Self::When { button, cursor: CursorRule::Ignore, merge: MergeRule::And }
    }
    pub fn cursor(cursor: CursorRule) -> Self {
        Self::When { button: ButtonRule::Ignore, cursor, merge: MergeRule::And }
    }
    pub fn both(button: ButtonRule, cursor: CursorRule) -> Self {
        Self::When { button, cursor, merge: MergeRule::And }
    }
    pub fn merged(button: ButtonRule, cursor: CursorRule, merge: MergeRule) -> Self {
        Self::When { button, cursor, merge }
    }

    /// does the rule authorize its transition this frame?
    /// pure: same (rule, input, sof) always resolves the same way
    pub fn resolve(&self, input: &InputSnapshot, sof: Sof) -> bool {
        let Self::When { button, cursor, merge } = *self else { return false };

        let (k1, k2) = (input.key1, input.key2);
        let button_valid = match button {
            ButtonRule::Ignore => true,
            ButtonRule::Pressed => k1.pressed_this_frame != k2.pressed_this_frame,
            ButtonRule::PressedNoLock => k1.pressed_this_frame || k2.pressed_this_frame,
            ButtonRule::Held => k1.down != k2.down,
            ButtonRule::HeldNoLock => k1.down || k2.down,
            ButtonRule::Released => k1.released_this_frame || k2.released_this_frame,
        };

        let cursor_valid = match cursor {
            CursorRule::Ignore => true,
            CursorRule::Enter => sof.contains(input.cursor_pos),
            CursorRule::Leave => !sof.contains(input.cursor_pos),
        };

        // merge only applies when both halves are set; an ignored half
        // resolves true, which makes the And below collapse to the other half
        if button != ButtonRule::Ignore && cursor != CursorRule::Ignore {
            match merge {
                MergeRule::And => button_valid && cursor_valid,
                MergeRule::Or => button_valid || cursor_valid,
                MergeRule::Xor => button_valid != cursor_valid,
            }
        } else {
            button_valid && cursor_valid
        }
    }

    /// packed wire form: bits 0-2 button, 3-4 cursor, 5-6 merge, bit 7 = no activation
    pub fn bits(&self) -> u8 {
        let Self::When { button, cursor, merge } = *self else { return NO_ACTIVATION_BIT };

        let button = match button {
            ButtonRule::Ignore => 0,
            ButtonRule::Pressed => 1,
            ButtonRule::Held => 2,
            ButtonRule::Released => 3,
            ButtonRule::PressedNoLock => 4,
            ButtonRule::HeldNoLock => 5,
        };
        let cursor = match cursor {
            CursorRule::Ignore => 0u8,
            CursorRule::Enter => 1,
            CursorRule::Leave => 2,
        };
        let merge = match merge {
            MergeRule::And => 0u8,
            MergeRule::Or => 1,
            MergeRule::Xor => 2,
        };

        button | (cursor << 3) | (merge << 5)
    }

    /// decode a packed rule. unknown sub-field values fail open to their
    /// no-constraint interpretation rather than rejecting the rule
    pub fn from_bits(bits: u8) -> Self {
        if bits & NO_ACTIVATION_BIT != 0 {
            return Self::NoActivation;
        }

        let button = match bits & 0b111 {
            0 => ButtonRule::Ignore,
            1 => ButtonRule::Pressed,
            2 => ButtonRule::Held,
            3 => ButtonRule::Released,
            4 => ButtonRule::PressedNoLock,
            5 => ButtonRule::HeldNoLock,
            other => {
                warn!("unknown button rule bits {other}, treating as ignore");
                ButtonRule::Ignore
            }
        };
        let cursor = match (bits >> 3) & 0b11 {
            0 => CursorRule::Ignore,
            1 => CursorRule::Enter,
            2 => CursorRule::Leave,
            other => {
                warn!("unknown cursor rule bits {other}, treating as ignore");
                CursorRule::Ignore
            }
        };
        let merge = match (bits >> 5) & 0b11 {
            0 => MergeRule::And,
            1 => MergeRule::Or,
            2 => MergeRule::Xor,
            other => {
                warn!("unknown merge rule bits {other}, treating as and");
                MergeRule::And
            }
        };

        Self::When { button, cursor, merge }
    }
}
