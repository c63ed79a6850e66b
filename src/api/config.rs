use crate::api::polygon::Classifier;
use crate::core::constants::{
    DEFAULT_MIN_PRECISION, DEFAULT_PRECISION, MAX_POLYGON_PRECISION, MAX_PRECISION,
};
use crate::util::error::GeoCoverError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for a coverage call.
///
/// Circles and paths only read `precision`; polygons read the rest.
///
/// # Example
/// ```
/// use geocover_rs::CoverageConfig;
///
/// let config = CoverageConfig::default()
///     .with_precision_range(3, 7)
///     .with_cover(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Cell length for circle and path covers.
    pub precision: usize,
    /// Coarsest level the polygon refinement starts from.
    pub min_precision: usize,
    /// Finest level the polygon refinement reaches (capped at 9).
    pub max_precision: usize,
    /// Keep boundary cells at the finest level.
    pub cover: bool,
    /// Use the corner-sampling classifier.
    pub quick: bool,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            min_precision: DEFAULT_MIN_PRECISION,
            max_precision: DEFAULT_PRECISION,
            cover: false,
            quick: false,
        }
    }
}

impl CoverageConfig {
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_precision_range(mut self, min_precision: usize, max_precision: usize) -> Self {
        self.min_precision = min_precision;
        self.max_precision = max_precision;
        self
    }

    pub fn with_cover(mut self, cover: bool) -> Self {
        self.cover = cover;
        self
    }

    pub fn with_quick(mut self, quick: bool) -> Self {
        self.quick = quick;
        self
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::from_quick(self.quick)
    }

    /// Checks the precisions the same way the coverage calls will.
    pub fn validate(&self) -> Result<(), GeoCoverError> {
        for p in [self.precision, self.min_precision] {
            if p == 0 || p > MAX_PRECISION {
                return Err(GeoCoverError::InvalidPrecision(p));
            }
        }
        let max = self.max_precision.min(MAX_POLYGON_PRECISION);
        if self.min_precision > max {
            return Err(GeoCoverError::InvalidPrecisionRange {
                min: self.min_precision,
                max,
            });
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, GeoCoverError> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| GeoCoverError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GeoCoverError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GeoCoverError::IoError(e.to_string()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String, GeoCoverError> {
        serde_json::to_string_pretty(self).map_err(|e| GeoCoverError::ConfigError(e.to_string()))
    }
}
