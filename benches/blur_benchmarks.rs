//! Performance benchmarks for stackblur
//!
//! Measures the two-pass blur across image sizes, radii, and worker counts,
//! tracking the scaling behavior the partitioning scheme is meant to buy.

use criterion::*;
use itertools::iproduct;
use std::hint::black_box;
use stackblur::{pack_argb, BlurProcess, PixelBuffer, StackBlur};

/// Helper to create a test buffer with gradient + content
fn create_buffer(width: u32, height: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height);
    iproduct!(0..height, 0..width).for_each(|(y, x)| {
        let r = ((x * 255) / width) as u8;
        let g = ((y * 255) / height) as u8;
        let b = ((x + y) * 255 / (width + height)) as u8;
        let a = if (x + y) % 3 == 0 { 128 } else { 255 };
        buffer.set_pixel(x, y, pack_argb(a, r, g, b));
    });
    buffer
}

fn bench_radius_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_sweep");
    let engine = StackBlur::new().unwrap();
    let buffer = create_buffer(512, 512);
    group.throughput(Throughput::Elements(512 * 512));

    for radius in [2.0f32, 8.0, 32.0, 128.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(radius),
            &radius,
            |b, &radius| {
                b.iter(|| {
                    let mut scratch = buffer.clone();
                    engine.blur_in_place(&mut scratch, radius).unwrap();
                    black_box(scratch)
                })
            },
        );
    }
    group.finish();
}

fn bench_worker_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_scaling");
    let buffer = create_buffer(1024, 1024);
    group.throughput(Throughput::Elements(1024 * 1024));

    for workers in [1usize, 2, 4, 8] {
        let engine = StackBlur::with_workers(workers).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |b, _| {
                b.iter(|| {
                    let mut scratch = buffer.clone();
                    engine.blur_in_place(&mut scratch, 16.0).unwrap();
                    black_box(scratch)
                })
            },
        );
    }
    group.finish();
}

fn bench_image_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_sizes");
    let engine = StackBlur::new().unwrap();

    for (width, height) in [(128u32, 128u32), (512, 512), (1920, 1080)] {
        let buffer = create_buffer(width, height);
        group.throughput(Throughput::Elements(width as u64 * height as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &buffer,
            |b, buffer| {
                b.iter(|| {
                    let mut scratch = buffer.clone();
                    engine.blur_in_place(&mut scratch, 8.0).unwrap();
                    black_box(scratch)
                })
            },
        );
    }
    group.finish();
}

fn bench_alpha_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_modes");
    let buffer = create_buffer(512, 512);
    group.throughput(Throughput::Elements(512 * 512));

    for blur_alpha in [false, true] {
        let engine = StackBlur::new().unwrap().blur_alpha(blur_alpha);
        group.bench_with_input(
            BenchmarkId::from_parameter(if blur_alpha { "blur_alpha" } else { "passthrough" }),
            &blur_alpha,
            |b, _| {
                b.iter(|| {
                    let mut scratch = buffer.clone();
                    engine.blur_in_place(&mut scratch, 8.0).unwrap();
                    black_box(scratch)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_radius_sweep,
    bench_worker_scaling,
    bench_image_sizes,
    bench_alpha_modes,
);
criterion_main!(benches);
