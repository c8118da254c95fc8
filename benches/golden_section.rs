use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use view_interactor::core::light::exposure_score;
use view_interactor::core::LightCalibrator;
use view_interactor::headless::HeadlessWindow;
use view_interactor::image::HISTOGRAM_BINS;
use view_interactor::math::{from_spherical, golden_section_search, to_spherical};
use view_interactor::Options;

/// Golden-section search on a quadratic at several tolerances
fn bench_quadratic_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("golden_section");

    for tol in [1e-2, 1e-4, 1e-8].iter() {
        group.bench_with_input(BenchmarkId::new("quadratic", tol), tol, |b, &tol| {
            b.iter(|| {
                golden_section_search(
                    |x| (x - 3.0) * (x - 3.0),
                    black_box(0.0),
                    black_box(10.0),
                    tol,
                    None,
                )
            });
        });
    }

    group.finish();
}

fn bench_exposure_score(c: &mut Criterion) {
    let histogram: Vec<u64> = (0..HISTOGRAM_BINS as u64).map(|bin| (bin * 37) % 101).collect();

    c.bench_function("exposure_score", |b| {
        b.iter(|| exposure_score(black_box(&histogram), 0.25, 0.75));
    });
}

/// Full calibration against offscreen renders of different sizes
fn bench_light_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("light_calibration");

    for (width, height) in [(64u32, 16u32), (320, 240)].iter() {
        let label = format!("{width}x{height}");
        group.bench_function(BenchmarkId::new("headless", label), |b| {
            let mut window = HeadlessWindow::new(*width, *height);
            let calibrator = LightCalibrator::default();
            b.iter(|| {
                let mut options = Options::default();
                calibrator.calibrate(&mut window, &mut options)
            });
        });
    }

    group.finish();
}

fn bench_spherical_roundtrip(c: &mut Criterion) {
    let origin = DVec3::new(0.5, -1.0, 2.0);
    let point = DVec3::new(3.0, 4.0, -2.0);

    c.bench_function("spherical_roundtrip", |b| {
        b.iter(|| from_spherical(to_spherical(black_box(point), origin), origin));
    });
}

criterion_group!(
    benches,
    bench_quadratic_search,
    bench_exposure_score,
    bench_light_calibration,
    bench_spherical_roundtrip
);
criterion_main!(benches);
