use crate::prelude::*;

pub const CIRCLE_RADIUS_BASE: f32 = 64.0;
const PREEMPT_MIN: f32 = 450.0;

// stolen from peppy, /shrug
pub fn map_difficulty(diff: f32, min: f32, mid: f32, max: f32) -> f32 {
    if diff > 5.0 {
        mid + (max - mid) * (diff - 5.0) / 5.0
    } else if diff < 5.0 {
        mid - (mid - min) * (5.0 - diff) / 5.0
    } else {
        mid
    }
}

/// per-session timing values every hit object consults.
/// all times are milliseconds
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimingWindows {
    /// how long before its start time an object becomes visible
    pub approach_time: f32,
    /// half-width of the interval around an object's nominal time in which input is judged
    pub hit_window: f32,
    /// how long a judged object keeps rendering while it fades out
    pub fade_time: f32,
    /// hit circle radius in playfield units
    pub circle_radius: f32,
}
impl TimingWindows {
    /// derive windows from the map's AR/OD/CS difficulty values
    pub fn from_difficulty(ar: f32, od: f32, cs: f32, settings: &GameplaySettings) -> Self {
        let approach_time = map_difficulty(ar, 1800.0, 1200.0, PREEMPT_MIN);
        let hit_window = map_difficulty(od, 200.0, 150.0, 100.0);
        let circle_radius = CIRCLE_RADIUS_BASE * (1.0 - 0.7 * (cs - 5.0) / 5.0) / 2.0;

        Self {
            approach_time,
            hit_window,
            fade_time: settings.fade_time,
            circle_radius,
        }
    }
}

/// core gameplay tunables, loaded once per session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameplaySettings {
    /// ms a judged object keeps fading after judgement
    pub fade_time: f32,
    /// full spinner rotations required per second of spinner duration
    pub spinner_rotation_rate: f32,
}
impl GameplaySettings {
    pub fn from_json(s: &str) -> CircletResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            fade_time: 300.0,
            spinner_rotation_rate: 1.0,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_difficulty_is_piecewise_linear() {
        assert_eq!(map_difficulty(0.0, 1800.0, 1200.0, 450.0), 1800.0);
        assert_eq!(map_difficulty(5.0, 1800.0, 1200.0, 450.0), 1200.0);
        assert_eq!(map_difficulty(10.0, 1800.0, 1200.0, 450.0), 450.0);
        assert_eq!(map_difficulty(7.5, 1800.0, 1200.0, 450.0), 825.0);
    }

    #[test]
    fn windows_from_difficulty() {
        let windows = TimingWindows::from_difficulty(5.0, 5.0, 5.0, &GameplaySettings::default());
        assert_eq!(windows.approach_time, 1200.0);
        assert_eq!(windows.hit_window, 150.0);
        assert_eq!(windows.circle_radius, CIRCLE_RADIUS_BASE / 2.0);
        assert_eq!(windows.fade_time, 300.0);
    }

    #[test]
    fn settings_from_json_fills_defaults() {
        let settings = GameplaySettings::from_json(r#"{ "fade_time": 500.0 }"#).unwrap();
        assert_eq!(settings.fade_time, 500.0);
        assert_eq!(settings.spinner_rotation_rate, 1.0);

        assert!(GameplaySettings::from_json("not json").is_err());
    }
}
