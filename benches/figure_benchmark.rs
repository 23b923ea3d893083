//! Benchmark for full figure render passes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use trueno_figure::prelude::*;
use trueno_figure::ticks::make_ticks;

fn sine(n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
    let ys = xs.iter().map(|x| x.sin()).collect();
    (xs, ys)
}

fn line_render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("figure_line_render");

    for n in [100, 1_000, 10_000] {
        let (xs, ys) = sine(n);
        let mut fig = Figure::new(640, 480).expect("figure creation should succeed");
        fig.plot(xs, ys, Color::BLUE, 1.0, "sin");
        fig.grid(true);
        fig.legend(true, "northEast");

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                // force a full pass each iteration
                fig.grid(true);
                fig.render().expect("render should succeed");
            });
        });
    }

    group.finish();
}

fn scatter_render_benchmark(c: &mut Criterion) {
    let (xs, ys) = sine(5_000);
    let mut fig = Figure::new(640, 480).expect("figure creation should succeed");
    fig.scatter(xs, ys, Color::RED, 3.0, "points");

    c.bench_function("figure_scatter_render_5000", |b| {
        b.iter(|| {
            fig.grid(false);
            fig.render().expect("render should succeed");
        });
    });
}

fn translucent_shapes_benchmark(c: &mut Criterion) {
    let mut fig = Figure::new(640, 480).expect("figure creation should succeed");
    for i in 0..10 {
        let t = f64::from(i);
        fig.circle(t, t.sin(), 0.8, ShapeStyle::filled(Color::GREEN, 0.4).stroke_width(1.0), "");
    }

    c.bench_function("figure_translucent_circles_10", |b| {
        b.iter(|| {
            fig.grid(false);
            fig.render().expect("render should succeed");
        });
    });
}

fn ticks_benchmark(c: &mut Criterion) {
    c.bench_function("make_ticks", |b| {
        b.iter(|| make_ticks(black_box(-0.37), black_box(12.9), black_box(6)));
    });
}

criterion_group!(
    benches,
    line_render_benchmark,
    scatter_render_benchmark,
    translucent_shapes_benchmark,
    ticks_benchmark
);
criterion_main!(benches);
