//! Syllarank Core — error taxonomy and configuration.

pub mod config;
pub mod error;

pub use config::{DataPaths, EngineConfig};
pub use error::{Error, Result};
