//! Benchmarks for swatch resolution.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use swatch::builtin;
use swatch::prelude::*;

fn benchmark_resolve_name(c: &mut Criterion) {
    let mut session = Session::builder().schemes("x11 svg").build().unwrap();

    c.bench_function("resolve_name_cached", |b| {
        b.iter(|| black_box(session.resolve(black_box("cornflowerblue"))));
    });

    let names = ["red", "navy", "salmon", "gold", "teal", "crimson", "violet", "skyblue", "olive", "tomato"];
    c.bench_function("resolve_name_cycling", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % names.len();
            black_box(session.resolve(names[i]))
        });
    });

    c.bench_function("resolve_name_folded", |b| {
        b.iter(|| black_box(session.resolve(black_box("Cornflower Blue"))));
    });
}

fn benchmark_resolve_numeric(c: &mut Criterion) {
    let mut session = Session::builder().schemes("xterm256").build().unwrap();

    c.bench_function("resolve_hex", |b| {
        b.iter(|| black_box(session.resolve(black_box("#6495ed"))));
    });

    c.bench_function("resolve_hsv", |b| {
        b.iter(|| black_box(session.resolve(black_box("0.6 0.58 0.93"))));
    });

    c.bench_function("resolve_index", |b| {
        b.iter(|| black_box(session.resolve(black_box("196"))));
    });
}

fn benchmark_reverse(c: &mut Criterion) {
    let mut session = Session::builder().output("svg").build().unwrap();
    let values: Vec<Rgba> = builtin::dataset().values().map(|(_, v)| v.rgba()).collect();

    c.bench_function("display_uncached", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % values.len();
            let _ = session.resolve_exact(values[i]);
            black_box(session.display())
        });
    });
}

fn benchmark_dataset_build(c: &mut Criterion) {
    c.bench_function("dataset_build_small", |b| {
        b.iter(|| {
            black_box(
                Dataset::builder()
                    .named_scheme("a", "black")
                    .colors("a", &[("black", Rgba::opaque(0, 0, 0)), ("white", Rgba::opaque(255, 255, 255))])
                    .indexed_scheme("ramp", [Rgba::opaque(0, 0, 0), Rgba::opaque(9, 9, 9)])
                    .build(),
            )
        });
    });
}

criterion_group!(
    benches,
    benchmark_resolve_name,
    benchmark_resolve_numeric,
    benchmark_reverse,
    benchmark_dataset_build,
);
criterion_main!(benches);
