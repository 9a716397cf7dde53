use crate::prelude::*;

/// authored data shared by every object kind. immutable once loaded;
/// hit objects hold a shared reference and never write back
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateData {
    /// nominal hit time in ms
    pub start_time: f32,
    /// end of the interaction interval; equals `start_time` for plain notes
    pub end_time: f32,
    /// playfield position
    pub pos: Vec2,
    /// the combo counter resets after this object (consumed by scoring)
    #[serde(default)]
    pub combo_end: bool,
}
impl TemplateData {
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }
}

/// one authored map object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObjectTemplate {
    Note(TemplateData),
    Slider {
        data: TemplateData,
        /// polyline the slider ball follows, in playfield space
        path: Vec<Vec2>,
    },
    Spinner(TemplateData),
}
impl ObjectTemplate {
    pub fn data(&self) -> &TemplateData {
        match self {
            Self::Note(data) => data,
            Self::Slider { data, .. } => data,
            Self::Spinner(data) => data,
        }
    }

    pub fn start_time(&self) -> f32 { self.data().start_time }
    pub fn end_time(&self) -> f32 { self.data().end_time }
    pub fn pos(&self) -> Vec2 { self.data().pos }

    /// reject templates the session can't do anything sensible with
    pub fn validate(&self) -> Result<(), TemplateError> {
        let data = self.data();
        if !data.start_time.is_finite() || !data.end_time.is_finite() {
            return Err(TemplateError::NonFiniteTime);
        }
        if data.end_time < data.start_time {
            return Err(TemplateError::EndBeforeStart);
        }

        match self {
            Self::Note(_) => {}
            Self::Slider { path, .. } => {
                if path.len() < 2 {
                    return Err(TemplateError::DegeneratePath);
                }
                if data.duration() <= 0.0 {
                    return Err(TemplateError::ZeroDuration);
                }
            }
            Self::Spinner(_) => {
                if data.duration() <= 0.0 {
                    return Err(TemplateError::ZeroDuration);
                }
            }
        }

        Ok(())
    }
}

/// parse an authored template list. ordering and per-template validation
/// happen at session load, not here
pub fn templates_from_json(s: &str) -> CircletResult<Vec<ObjectTemplate>> {
    Ok(serde_json::from_str(s).log_error_message("failed to parse template list")?)
}
