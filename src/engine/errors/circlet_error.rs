use std::{fmt::Display, io::Error as IOError};

use serde_json::Error as JsonError;

use super::*;

pub type CircletResult<T=()> = Result<T, CircletError>;

#[derive(Debug)]
pub enum CircletError {
    Template(TemplateError),
    IO(IOError),
    Serde(JsonError),

    String(String),
}
impl CircletError {
    pub fn from_err(e: impl std::error::Error) -> Self {
        Self::String(format!("{e}"))
    }
}

impl Display for CircletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::Template(e) => write!(f, "{:?}", e),
            Self::Serde(e) => write!(f, "{:?}", e),
            Self::IO(e) => write!(f, "{}", e),
            Self::String(e) => write!(f, "{:?}", e),
        }
    }
}

impl From<JsonError> for CircletError {
    fn from(e: JsonError) -> Self {Self::Serde(e)}
}
impl From<IOError> for CircletError {
    fn from(e: IOError) -> Self {Self::IO(e)}
}
impl From<TemplateError> for CircletError {
    fn from(e: TemplateError) -> Self {Self::Template(e)}
}
impl From<String> for CircletError {
    fn from(e: String) -> Self {Self::String(e)}
}
