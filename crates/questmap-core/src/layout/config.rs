use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spacing constants for the layout engine, in logical units.
///
/// The renderer applies pixel scaling and offsets; these values only fix the
/// relative geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Smallest horizontal gap between roots
    pub min_spacing: f64,

    /// Horizontal budget shared by all roots before `min_spacing` takes over
    pub root_budget: f64,

    /// Vertical distance from the roots to the first level
    pub vertical_spacing: f64,

    /// Factor applied to the vertical step for every further level
    pub vertical_decay: f64,

    /// Lower bound for the vertical step
    pub min_vertical_spacing: f64,

    /// Horizontal budget shared by the children of one node
    pub sibling_spread: f64,

    /// Minimum horizontal distance between two nodes on the same level
    pub min_distance: f64,

    /// Number of shifted positions tried before accepting a crowded one
    pub max_attempts: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_spacing: 200.0,
            root_budget: 600.0,
            vertical_spacing: 150.0,
            vertical_decay: 0.95,
            min_vertical_spacing: 90.0,
            sibling_spread: 600.0,
            min_distance: 120.0,
            max_attempts: 12,
        }
    }
}

/// A layout constant outside its valid range
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid layout configuration: {field} {reason}")]
pub struct LayoutConfigError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong with it
    pub reason: &'static str,
}

impl LayoutConfig {
    /// Check that every constant is usable
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        let positive = [
            ("min_spacing", self.min_spacing),
            ("root_budget", self.root_budget),
            ("vertical_spacing", self.vertical_spacing),
            ("min_vertical_spacing", self.min_vertical_spacing),
            ("sibling_spread", self.sibling_spread),
            ("min_distance", self.min_distance),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutConfigError {
                    field,
                    reason: "must be a positive finite number",
                });
            }
        }

        if !self.vertical_decay.is_finite() || self.vertical_decay <= 0.0 || self.vertical_decay > 1.0 {
            return Err(LayoutConfigError {
                field: "vertical_decay",
                reason: "must be in (0, 1]",
            });
        }

        if self.max_attempts == 0 {
            return Err(LayoutConfigError {
                field: "max_attempts",
                reason: "must be at least 1",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_distance() {
        let config = LayoutConfig {
            min_distance: 0.0,
            ..LayoutConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "min_distance");
    }

    #[test]
    fn test_rejects_growing_decay() {
        let config = LayoutConfig {
            vertical_decay: 1.5,
            ..LayoutConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "vertical_decay");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: LayoutConfig = serde_yaml::from_str("min_distance: 140\nmax_attempts: 15").unwrap();
        assert_eq!(config.min_distance, 140.0);
        assert_eq!(config.max_attempts, 15);
        assert_eq!(config.vertical_spacing, 150.0);
    }
}
