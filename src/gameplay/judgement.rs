use crate::prelude::*;

/// rank assigned to a consumed hit object, exactly once per object
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitResult {
    Missed,
    Hit50,
    Hit100,
    Hit300,
}
impl HitResult {
    /// tap judgement: offset between the first activation and the object's
    /// nominal time, against the hit window.
    ///
    /// `3 - trunc(|3 * delta / window|)` clamped to 1..=3, so the window
    /// splits into thirds: the middle third is a 100, everything from
    /// two-thirds out (including the window edge, via the clamp) is a 50.
    /// a missed object never reaches this; the caller maps "never activated"
    /// to `Missed` directly
    pub fn from_hit_delta(delta: f32, hit_window: f32) -> Self {
        let ratio = (3.0 * delta as f64 / hit_window as f64).abs();
        let rank = (3 - ratio.trunc() as i64).clamp(1, 3);
        match rank {
            3 => Self::Hit300,
            2 => Self::Hit100,
            _ => Self::Hit50,
        }
    }

    pub fn is_miss(self) -> bool {
        self == Self::Missed
    }

    /// next rank down; 50 and miss stay where they are
    pub fn downgraded(self) -> Self {
        match self {
            Self::Hit300 => Self::Hit100,
            Self::Hit100 => Self::Hit50,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missed => "xmiss",
            Self::Hit50 => "x50",
            Self::Hit100 => "x100",
            Self::Hit300 => "x300",
        }
    }
}

/// one judged object
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JudgementRecord {
    /// position of the object in the session's ordered collection
    pub object_index: usize,
    pub result: HitResult,
    /// session time the judgement was produced at
    pub time: f32,
}

/// running per-rank counts for the session
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct JudgementTally {
    pub misses: u32,
    pub x50: u32,
    pub x100: u32,
    pub x300: u32,
}
impl JudgementTally {
    pub fn add(&mut self, result: HitResult) {
        match result {
            HitResult::Missed => self.misses += 1,
            HitResult::Hit50 => self.x50 += 1,
            HitResult::Hit100 => self.x100 += 1,
            HitResult::Hit300 => self.x300 += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.misses + self.x50 + self.x100 + self.x300
    }

    /// standard accuracy weighting; 1.0 before anything has been judged
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 { return 1.0 }

        let x50  = self.x50 as f64;
        let x100 = self.x100 as f64;
        let x300 = self.x300 as f64;

        (50.0 * x50 + 100.0 * x100 + 300.0 * x300) / (300.0 * total as f64)
    }
}
