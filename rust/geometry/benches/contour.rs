// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmarks for contour offsetting, board construction and UV rotation.
//!
//! Run with: cargo bench -p uvlab-geometry --bench contour

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use uvlab_geometry::{
    board_mesh, box_corners, complete_contour, offset_contour, planar_geometry_from_points,
    points_on_circle, rotate_uv_incremental, Point3,
};

/// Clockwise circle outline with `segments` distinct points
fn clockwise_circle(segments: usize) -> Vec<Point3<f64>> {
    let mut points = points_on_circle(10.0, 10.0, segments, 0.0, std::f64::consts::TAU, true)
        .expect("valid circle");
    points.pop();
    points
}

/// Zig-zag path of right-angle turns
fn staircase(steps: usize) -> Vec<Point3<f64>> {
    (0..=steps * 2)
        .map(|i| {
            let x = ((i + 1) / 2) as f64;
            let y = (i / 2) as f64;
            Point3::new(x, y, 0.0)
        })
        .collect()
}

fn bench_contours(c: &mut Criterion) {
    let mut group = c.benchmark_group("contour");

    for size in [16, 256, 4096] {
        let outline = clockwise_circle(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("offset", size), &outline, |b, outline| {
            b.iter(|| offset_contour(black_box(0.5), black_box(outline)))
        });

        let path = staircase(size / 2);
        group.bench_with_input(BenchmarkId::new("complete", size), &path, |b, path| {
            b.iter(|| complete_contour(black_box(0.25), black_box(path)))
        });
    }

    group.finish();
}

fn bench_meshes(c: &mut Criterion) {
    let corners = box_corners(Point3::origin(), Point3::new(2.0, 1.0, 0.1));
    c.bench_function("board_mesh", |b| b.iter(|| board_mesh(black_box(&corners))));

    let mut group = c.benchmark_group("rotate_uv");
    for size in [64, 1024] {
        let mut mesh = planar_geometry_from_points(&clockwise_circle(size)).expect("planar disc");
        group.throughput(Throughput::Elements(mesh.indices.len() as u64));
        group.bench_function(BenchmarkId::new("incremental", size), |b| {
            b.iter(|| rotate_uv_incremental(black_box(15.0), &mut mesh))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contours, bench_meshes);
criterion_main!(benches);
