// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Benchmarks for the hot paths: the whole-image render, the escape
//! loop on member and non-member points, and the cheapest coloring.

use criterion::{criterion_group, criterion_main, Criterion};
use crossbeam::channel::unbounded;
use num::Complex;

use frakt::{colors, escapes, make_contexts, render, Parameters};

fn parameters() -> Parameters {
    Parameters {
        plane_min: Complex::new(-2.6, -2.1),
        plane_max: Complex::new(1.6, 2.1),
        image_width: 128,
        image_height: 128,
        output_width: 128,
        output_height: 128,
        max_iterations: 250,
        escape_radius: 4.0,
        power: 2,
        escape_algorithm: "mandelbrot".to_string(),
        color_strategy: "mono".to_string(),
        member_color: "#000000".to_string(),
    }
}

fn bench_render(c: &mut Criterion) {
    let p = parameters();
    let threads = num_cpus::get();
    c.bench_function("render 128x128", move |b| {
        b.iter(|| {
            let mut buffer = vec![colors::BLACK; p.image_width * p.image_height];
            let contexts = make_contexts(&mut buffer, threads, &p).unwrap();
            let (_tx, rx) = unbounded();
            render(threads, contexts, &rx).unwrap();
        })
    });
}

fn bench_escape_in(c: &mut Criterion) {
    c.bench_function("escape member point", |b| {
        let z = Complex::new(0.05, 0.05);
        b.iter(|| escapes::mandelbrot(z, 250, 2, 4.0))
    });
}

fn bench_escape_out(c: &mut Criterion) {
    c.bench_function("escape outside point", |b| {
        let z = Complex::new(2.0, 1.5);
        b.iter(|| escapes::mandelbrot(z, 250, 2, 4.0))
    });
}

fn bench_color_mono(c: &mut Criterion) {
    c.bench_function("color mono", |b| {
        let z = Complex::new(0.0, 0.0);
        b.iter(|| colors::mono(z, 17, 250, 2, 4.0, colors::BLACK))
    });
}

criterion_group!(
    benches,
    bench_render,
    bench_escape_in,
    bench_escape_out,
    bench_color_mono
);
criterion_main!(benches);
