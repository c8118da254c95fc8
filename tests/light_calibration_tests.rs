use view_interactor::config::LightCalibrationConfig;
use view_interactor::core::light::{exposure_score, nudge_intensity};
use view_interactor::core::LightCalibrator;
use view_interactor::headless::{HeadlessWindow, DEFAULT_ALBEDO};
use view_interactor::image::HISTOGRAM_BINS;
use view_interactor::options::{Options, LIGHT_INTENSITY};

/// Histogram with all the mass in one bin
fn single_peak(bin: usize) -> Vec<u64> {
    let mut histogram = vec![0; HISTOGRAM_BINS];
    histogram[bin] = 1000;
    histogram
}

#[test]
fn test_score_grows_with_distance_from_mid_band() {
    let scores: Vec<f64> = (0..HISTOGRAM_BINS)
        .map(|bin| exposure_score(&single_peak(bin), 0.25, 0.75))
        .collect();

    let best = (HISTOGRAM_BINS - 1) / 2;
    for bin in 0..best {
        assert!(scores[bin] >= scores[bin + 1], "under-exposed side at {bin}");
    }
    for bin in best + 1..HISTOGRAM_BINS - 1 {
        assert!(scores[bin] <= scores[bin + 1], "over-exposed side at {bin}");
    }
}

#[test]
fn test_nudges_walk_the_bands() {
    let mut intensity = 0.0;
    for _ in 0..50 {
        intensity = nudge_intensity(intensity, false);
    }
    assert!((intensity - 0.5).abs() < 1e-12);
    for _ in 0..25 {
        intensity = nudge_intensity(intensity, false);
    }
    assert!((intensity - 1.0).abs() < 1e-12);
    intensity = nudge_intensity(intensity, false);
    assert!((intensity - 1.05).abs() < 1e-12);
}

#[test]
fn test_calibration_balances_ramp() {
    let mut window = HeadlessWindow::new(256, 4);
    let mut options = Options::default();
    let calibrator = LightCalibrator::default();

    let intensity = calibrator.calibrate(&mut window, &mut options).unwrap();

    // The ramp starts to clip at 1 / albedo
    let balanced = 1.0 / DEFAULT_ALBEDO;
    assert!((intensity - balanced).abs() < 0.5, "calibrated to {intensity}");
    assert_eq!(options.get_as_double(LIGHT_INTENSITY).unwrap(), intensity);

    let mut score_at = |i: f64| {
        let mut scratch = options.clone();
        calibrator.evaluate(&mut window, &mut scratch, i).unwrap()
    };
    let best = score_at(intensity);
    assert!(best < score_at(1.0));
    assert!(best < score_at(10.0));
}

#[test]
fn test_calibration_respects_step_cap() {
    let mut window = HeadlessWindow::new(64, 1);
    let stats = window.stats();
    let mut options = Options::default();
    let calibrator = LightCalibrator::new(LightCalibrationConfig {
        max_steps: Some(3),
        ..LightCalibrationConfig::default()
    });

    let intensity = calibrator.calibrate(&mut window, &mut options).unwrap();
    assert_eq!(stats.offscreen_renders(), 4);
    assert!((0.5..=15.0).contains(&intensity));
}

#[test]
fn test_calibration_fails_on_mistyped_option() {
    let mut window = HeadlessWindow::new(8, 1);
    let mut options = Options::empty();
    options.set(LIGHT_INTENSITY, "bright").unwrap();

    assert!(LightCalibrator::default().calibrate(&mut window, &mut options).is_err());
    assert_eq!(options.get_as_string(LIGHT_INTENSITY).unwrap(), "bright");
}

#[test]
fn test_calibration_rejects_zero_tolerance() {
    let mut window = HeadlessWindow::new(8, 1);
    let stats = window.stats();
    let mut options = Options::default();
    let calibrator = LightCalibrator::new(LightCalibrationConfig {
        tolerance: 0.0,
        ..LightCalibrationConfig::default()
    });

    assert!(calibrator.calibrate(&mut window, &mut options).is_err());
    assert_eq!(stats.offscreen_renders(), 0);
    assert_eq!(options.get_as_double(LIGHT_INTENSITY).unwrap(), 1.0);
}
