//! Light intensity adjustments: banded percentage nudges and histogram-driven
//! auto-calibration.

use crate::config::LightCalibrationConfig;
use crate::error::Result;
use crate::math::{golden_section_search, SearchInterval};
use crate::options::{Options, LIGHT_INTENSITY};
use crate::traits::Window;

/// Step in percentage points for a nudge from `intensity`.
///
/// Bands are `< 0.5`, `< 1`, `< 5`, `< 10` and above. Going down, a value
/// sitting exactly on a band edge uses the lower band, so that a decrease
/// mirrors the increase that led to it.
pub fn light_step_pct(intensity: f64, down: bool) -> i64 {
    let reference = if down { intensity - 1e-6 } else { intensity };
    match reference {
        r if r < 0.5 => 1,
        r if r < 1.0 => 2,
        r if r < 5.0 => 5,
        r if r < 10.0 => 10,
        _ => 25,
    }
}

/// Intensity after one nudge, computed in whole percents and floored at zero
pub fn nudge_intensity(intensity: f64, down: bool) -> f64 {
    let step = light_step_pct(intensity, down);
    let current_pct = (intensity * 100.0).round() as i64;
    let next_pct = if down { current_pct - step } else { current_pct + step };
    next_pct.max(0) as f64 / 100.0
}

/// First bin whose cumulative count reaches `fraction` of the total
pub fn percentile_index(cumulative: &[u64], fraction: f64) -> usize {
    let total = cumulative.last().copied().unwrap_or(0) as f64;
    let target = fraction * total;
    cumulative
        .iter()
        .position(|&c| c as f64 >= target)
        .unwrap_or(cumulative.len().saturating_sub(1))
}

/// Exposure penalty of a luminance histogram: how far the low percentile
/// climbs from black or the high percentile falls short of white, whichever
/// is worse. Lower is better balanced.
pub fn exposure_score(histogram: &[u64], low_percentile: f64, high_percentile: f64) -> f64 {
    if histogram.is_empty() {
        return 0.0;
    }
    let cumulative: Vec<u64> = histogram
        .iter()
        .scan(0u64, |acc, &count| {
            *acc += count;
            Some(*acc)
        })
        .collect();
    let low = percentile_index(&cumulative, low_percentile);
    let high = percentile_index(&cumulative, high_percentile);
    low.max(histogram.len() - 1 - high) as f64
}

/// Picks the light intensity that best balances the rendered exposure
#[derive(Debug, Clone)]
pub struct LightCalibrator {
    config: LightCalibrationConfig,
}

impl LightCalibrator {
    pub fn new(config: LightCalibrationConfig) -> Self {
        Self { config }
    }

    /// Score of one trial intensity; the option is left set to `intensity`
    pub fn evaluate(&self, window: &mut dyn Window, options: &mut Options, intensity: f64) -> Result<f64> {
        options.set(LIGHT_INTENSITY, intensity)?;
        let histogram = window.render_to_image(options, false).luminance_histogram();
        let score = exposure_score(&histogram, self.config.low_percentile, self.config.high_percentile);
        Ok(score + intensity * self.config.tie_break)
    }

    /// Search the configured range, apply the low end of the final bracket
    /// and return it
    pub fn calibrate(&self, window: &mut dyn Window, options: &mut Options) -> Result<f64> {
        self.config.validate()?;
        let mut failure = None;
        let interval: SearchInterval = golden_section_search(
            |intensity| match self.evaluate(window, options, intensity) {
                Ok(score) => score,
                Err(e) => {
                    failure.get_or_insert(e);
                    f64::INFINITY
                }
            },
            self.config.min_intensity,
            self.config.max_intensity,
            self.config.tolerance,
            self.config.max_steps,
        );
        if let Some(e) = failure {
            return Err(e);
        }

        options.set(LIGHT_INTENSITY, interval.low)?;
        log::info!(
            "Light intensity calibrated to {:.3} (bracket {:.3}..{:.3})",
            interval.low,
            interval.low,
            interval.high
        );
        Ok(interval.low)
    }
}

impl Default for LightCalibrator {
    fn default() -> Self {
        Self::new(LightCalibrationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_bands_going_up() {
        assert_eq!(light_step_pct(0.3, false), 1);
        assert_eq!(light_step_pct(0.5, false), 2);
        assert_eq!(light_step_pct(1.0, false), 5);
        assert_eq!(light_step_pct(5.0, false), 10);
        assert_eq!(light_step_pct(10.0, false), 25);
    }

    #[test]
    fn test_step_band_edges_going_down() {
        assert_eq!(light_step_pct(0.5, true), 1);
        assert_eq!(light_step_pct(1.0, true), 2);
        assert_eq!(light_step_pct(5.0, true), 5);
        assert_eq!(light_step_pct(10.0, true), 10);
        assert_eq!(light_step_pct(10.01, true), 25);
    }

    #[test]
    fn test_nudge_up_then_down_returns() {
        let up = nudge_intensity(1.0, false);
        assert_eq!(up, 1.05);
        assert_eq!(nudge_intensity(up, true), 1.0);
    }

    #[test]
    fn test_nudge_across_band_edge() {
        assert_eq!(nudge_intensity(0.98, false), 1.0);
        assert_eq!(nudge_intensity(1.0, true), 0.98);
        assert_eq!(nudge_intensity(9.9, false), 10.0);
        assert_eq!(nudge_intensity(10.0, false), 10.25);
    }

    #[test]
    fn test_nudge_floors_at_zero() {
        assert_eq!(nudge_intensity(0.0, true), 0.0);
        assert_eq!(nudge_intensity(0.004, true), 0.0);
    }

    #[test]
    fn test_percentile_index() {
        let cumulative = [0, 1, 3, 4];
        assert_eq!(percentile_index(&cumulative, 0.25), 1);
        assert_eq!(percentile_index(&cumulative, 0.75), 2);
        assert_eq!(percentile_index(&cumulative, 1.0), 3);
    }

    #[test]
    fn test_exposure_score_single_peak_grows_away_from_middle() {
        let score_at = |peak: usize| {
            let mut histogram = vec![0u64; 256];
            histogram[peak] = 100;
            exposure_score(&histogram, 0.25, 0.75)
        };
        let mut previous = score_at(128);
        for peak in 129..256 {
            let score = score_at(peak);
            assert!(score >= previous, "overexposed peak {peak}");
            previous = score;
        }
        let mut previous = score_at(127);
        for peak in (0..127).rev() {
            let score = score_at(peak);
            assert!(score >= previous, "underexposed peak {peak}");
            previous = score;
        }
    }

    #[test]
    fn test_exposure_score_spread_histogram() {
        let histogram = vec![1u64; 256];
        // Quartiles of a flat histogram sit near bins 63 and 191
        assert_eq!(exposure_score(&histogram, 0.25, 0.75), 64.0);
    }
}
