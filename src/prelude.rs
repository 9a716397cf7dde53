// std imports
pub use std::fmt::Display;
pub use std::f32::consts::{ PI, TAU };
pub use std::sync::Arc;

// math imports
pub use glam::Vec2;

// log imports
pub use log::{ trace, debug, info, warn, error };

// serde imports
pub use serde::{ Serialize, Deserialize };

// general game imports
pub use crate::engine::*;
pub use crate::gameplay::*;
