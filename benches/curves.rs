//! Run these benches with `cargo bench --bench curves -- --verbose`
use criterion::{criterion_group, criterion_main, Criterion};
use metfor::Meters;
use skewt_diagram::{interpolate_at_height, CoordinateFrame, CurveFamily, Layout, ViewBounds};
use strum::IntoEnumIterator;

mod utils;

fn build_tester() -> Criterion {
    Criterion::default()
        .sample_size(200)
        .measurement_time(std::time::Duration::from_secs(10))
        .noise_threshold(0.03)
        .significance_level(0.01)
}

criterion_main!(curve_benches);

criterion_group!(
    name = curve_benches;
    config = build_tester();
    targets = reference_curves_bench, frame_bench, interpolate_at_height_bench
);

fn reference_curves_bench(c: &mut Criterion) {
    let profs = utils::load_all_test_files();
    let rect = Layout::default().plot_rect();

    c.bench_function("reference_curves", |b| {
        b.iter(|| {
            for prof in &profs {
                let frame = CoordinateFrame::new(ViewBounds::default(), rect, Some(prof));
                for family in CurveFamily::iter() {
                    for curve in family.curves(&frame) {
                        let _x = curve.segments();
                    }
                }
            }
        });
    });
}

fn frame_bench(c: &mut Criterion) {
    let profs = utils::load_all_test_files();
    let rect = Layout::default().plot_rect();

    c.bench_function("coordinate_frame", |b| {
        b.iter(|| {
            for prof in &profs {
                let _x = CoordinateFrame::new(ViewBounds::default(), rect, Some(prof));
            }
        });
    });
}

fn interpolate_at_height_bench(c: &mut Criterion) {
    let profs = utils::load_all_test_files();

    c.bench_function("interpolate_at_height", |b| {
        b.iter(|| {
            for prof in &profs {
                for i in 0..100 {
                    let _x = interpolate_at_height(prof, Meters(f64::from(i) * 150.0));
                }
            }
        });
    });
}
