use crate::error::{InteractorError, Result};
use crate::math::is_valid_tolerance;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interactor tuning, loadable from a JSON file. Missing fields keep defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractorConfig {
    /// Camera transition length; 0 applies the final state at once
    pub transition_duration_ms: u64,
    /// Middle-button travel (px) below which a release counts as a click
    pub drag_distance_tolerance: i32,
    /// Orbit-snap increment
    pub snap_angle_deg: f64,
    pub light_calibration: LightCalibrationConfig,
}

impl Default for InteractorConfig {
    fn default() -> Self {
        Self {
            transition_duration_ms: 100,
            drag_distance_tolerance: 3,
            snap_angle_deg: 45.0,
            light_calibration: LightCalibrationConfig::default(),
        }
    }
}

impl InteractorConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.drag_distance_tolerance < 0 {
            return Err(InteractorError::InvalidConfig(format!(
                "drag_distance_tolerance must not be negative, got {}",
                self.drag_distance_tolerance
            )));
        }
        if !(self.snap_angle_deg.is_finite() && self.snap_angle_deg > 0.0) {
            return Err(InteractorError::InvalidConfig(format!(
                "snap_angle_deg must be positive, got {}",
                self.snap_angle_deg
            )));
        }
        self.light_calibration.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightCalibrationConfig {
    pub min_intensity: f64,
    pub max_intensity: f64,
    pub tolerance: f64,
    pub max_steps: Option<u32>,
    pub low_percentile: f64,
    pub high_percentile: f64,
    /// Weight of the intensity term that favours dimmer lights on ties
    pub tie_break: f64,
}

impl Default for LightCalibrationConfig {
    fn default() -> Self {
        Self {
            min_intensity: 0.5,
            max_intensity: 15.0,
            tolerance: 0.25,
            max_steps: None,
            low_percentile: 0.25,
            high_percentile: 0.75,
            tie_break: 0.001,
        }
    }
}

impl LightCalibrationConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| {
            Err(InteractorError::InvalidConfig(format!("light_calibration.{reason}")))
        };
        if !is_valid_tolerance(self.tolerance) {
            return invalid(format!("tolerance must be positive and finite, got {}", self.tolerance));
        }
        if !(self.min_intensity.is_finite() && self.max_intensity.is_finite()) {
            return invalid("intensity bounds must be finite".to_string());
        }
        if self.min_intensity < 0.0 || self.min_intensity >= self.max_intensity {
            return invalid(format!(
                "intensity range [{}, {}] is empty or negative",
                self.min_intensity, self.max_intensity
            ));
        }
        let percentiles = 0.0..=1.0;
        if !percentiles.contains(&self.low_percentile)
            || !percentiles.contains(&self.high_percentile)
            || self.low_percentile > self.high_percentile
        {
            return invalid(format!(
                "percentiles {} and {} must be ordered within [0, 1]",
                self.low_percentile, self.high_percentile
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: InteractorConfig =
            serde_json::from_str(r#"{"transition_duration_ms": 0, "light_calibration": {"tolerance": 0.1}}"#)
                .unwrap();
        assert_eq!(config.transition_duration_ms, 0);
        assert_eq!(config.drag_distance_tolerance, 3);
        assert_eq!(config.light_calibration.tolerance, 0.1);
        assert_eq!(config.light_calibration.max_intensity, 15.0);
    }

    #[test]
    fn test_zero_tolerance_rejected_on_load() {
        let path = std::env::temp_dir().join(format!("view-interactor-{}-zero-tol.json", std::process::id()));
        std::fs::write(&path, r#"{"light_calibration": {"tolerance": 0}}"#).unwrap();
        let result = InteractorConfig::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(InteractorError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(InteractorConfig::default().validate().is_ok());

        let mut config = InteractorConfig::default();
        config.light_calibration.min_intensity = 20.0;
        assert!(config.validate().is_err());

        let mut config = InteractorConfig::default();
        config.light_calibration.high_percentile = 1.5;
        assert!(config.validate().is_err());

        let mut config = InteractorConfig::default();
        config.drag_distance_tolerance = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = InteractorConfig::default();
        assert_eq!(config.transition_duration_ms, 100);
        assert_eq!(config.snap_angle_deg, 45.0);
        assert_eq!(config.light_calibration.max_steps, None);
    }
}
