//! Benchmarks for recoloring and palette extraction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use spriteswap::{extract_palette, recolor, Colour, PixelBuffer, ToleranceConfig};

/// A shaded sprite-like buffer: a red ramp with black outline rows.
fn shaded_sprite(size: u32) -> PixelBuffer {
    let pixels = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            if y == 0 || y == size - 1 {
                Colour::BLACK
            } else {
                let shade = 180 + (x * 60 / size) as u8;
                Colour::rgb(shade, shade / 12, shade / 12)
            }
        })
        .collect();
    PixelBuffer::from_pixels(size, size, pixels).unwrap()
}

fn bench_recolor(c: &mut Criterion) {
    let mut group = c.benchmark_group("recolor");
    let config = ToleranceConfig::new(40, true).unwrap();

    for size in [16u32, 64, 256] {
        let sprite = shaded_sprite(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &sprite, |b, sprite| {
            b.iter(|| {
                let mut buf = sprite.clone();
                recolor(
                    &mut buf,
                    black_box(Colour::rgb(210, 17, 17)),
                    black_box(Colour::rgb(30, 90, 200)),
                    &config,
                )
            })
        });
    }

    group.finish();
}

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");

    for size in [16u32, 64, 256] {
        let sprite = shaded_sprite(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &sprite, |b, sprite| {
            b.iter(|| extract_palette(black_box(sprite), 16))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recolor, bench_palette);
criterion_main!(benches);
