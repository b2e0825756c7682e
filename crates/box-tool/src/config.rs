//! Configuration for the box measurement tool.

use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Largest width, depth or height accepted from any gesture (meters).
///
/// Oriented boxes are not curved, so very long spans drift away from the
/// surface they are drawn on.
pub const DEFAULT_MAX_SIZE: f64 = 20_000.0;

/// Smallest width or |depth| a face resize may produce (meters).
pub const DEFAULT_MIN_EXTENT: f64 = 0.01;

/// Cells per side of the refinement grid.
pub const DEFAULT_GRID_RESOLUTION: usize = 10;

/// Tunables for construction, editing and refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Clamp for width, depth and height.
    pub max_size: f64,
    /// Lower clamp for width and |depth| during face resize.
    pub min_extent: f64,
    /// N for the N x N empty-volume grid.
    pub grid_resolution: usize,
    /// Parameter-space slack when picking a face with a ray.
    pub pick_tolerance: f64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            min_extent: DEFAULT_MIN_EXTENT,
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            pick_tolerance: 1e-9,
        }
    }
}

impl ToolConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ToolError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ToolError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validated()
    }

    /// Default configuration with a different refinement grid.
    pub fn with_resolution(grid_resolution: usize) -> Self {
        Self {
            grid_resolution,
            ..Self::default()
        }
    }

    pub fn validated(self) -> Result<Self, ToolError> {
        if !(self.max_size.is_finite() && self.max_size > 0.0) {
            return Err(ToolError::InvalidConfig {
                reason: format!("max_size must be positive, got {}", self.max_size),
            });
        }
        if !(self.min_extent > 0.0 && self.min_extent < self.max_size) {
            return Err(ToolError::InvalidConfig {
                reason: format!(
                    "min_extent must lie in (0, {}), got {}",
                    self.max_size, self.min_extent
                ),
            });
        }
        if self.grid_resolution == 0 {
            return Err(ToolError::InvalidConfig {
                reason: "grid_resolution must be at least 1".to_string(),
            });
        }
        if !(self.pick_tolerance >= 0.0) {
            return Err(ToolError::InvalidConfig {
                reason: format!("pick_tolerance must be non-negative, got {}", self.pick_tolerance),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ToolConfig::default().validated().unwrap();
        assert_eq!(config.grid_resolution, DEFAULT_GRID_RESOLUTION);
        assert_eq!(config.min_extent, DEFAULT_MIN_EXTENT);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ToolConfig::from_json(r#"{ "grid_resolution": 4 }"#).unwrap();
        assert_eq!(config.grid_resolution, 4);
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let err = ToolConfig::with_resolution(0).validated().unwrap_err();
        assert!(matches!(err, ToolError::InvalidConfig { .. }));
    }

    #[test]
    fn test_rejects_min_extent_above_max() {
        let err = ToolConfig::from_json(r#"{ "max_size": 1.0, "min_extent": 2.0 }"#).unwrap_err();
        assert!(err.to_string().contains("min_extent"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(ToolConfig::from_json("{ not json").is_err());
    }
}
