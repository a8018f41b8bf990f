use std::fs::File;
use std::io::BufReader;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::graph::controlpoints::{
    MAX_POINT_COUNT,
    MIN_POINT_COUNT
};
use crate::math::curve::intersection::IntersectionSettings;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot open configuration: {0}")]
    IOError(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidSetting(String),
}

/// Session settings, read from JSON. Absent fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub default_point_count: usize,
    pub history_capacity: usize,
    pub remap_to_target: bool,
    pub intersection: IntersectionSettings,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            default_point_count: 5,
            history_capacity: 5,
            remap_to_target: false,
            intersection: IntersectionSettings::default(),
        }
    }
}

impl Configuration {
    pub fn from_reader(file_path: &str) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_json(json: &str) -> Result<Configuration, ConfigurationError> {
        let configuration: Configuration = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(MIN_POINT_COUNT..=MAX_POINT_COUNT).contains(&self.default_point_count) {
            return Err(ConfigurationError::InvalidSetting(format!(
                "default_point_count must be between {MIN_POINT_COUNT} and {MAX_POINT_COUNT}, got {}",
                self.default_point_count
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigurationError::InvalidSetting(
                "history_capacity must be positive".to_owned(),
            ));
        }
        let intersection = &self.intersection;
        if intersection.subdivisions == 0 || intersection.max_iterations == 0 {
            return Err(ConfigurationError::InvalidSetting(
                "intersection subdivisions and max_iterations must be positive".to_owned(),
            ));
        }
        if !(intersection.tolerance.is_finite() && intersection.tolerance > 0.0) {
            return Err(ConfigurationError::InvalidSetting(format!(
                "intersection tolerance must be positive, got {}",
                intersection.tolerance
            )));
        }
        Ok(())
    }
}
