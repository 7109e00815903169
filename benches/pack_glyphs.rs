//! Benchmarks for bit packing and full table generation.
//!
//! The real-font benchmark uses the DejaVu Sans Mono fixture that ships with
//! the integration tests.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use termfont::{
    build_asset, emit_base, emit_extended, pack_pixels, test_support::SyntheticFont, unpack,
    Cell, EmitOptions, GeneratorConfig, TrueTypeFont,
};

const DEJAVU_MONO: &[u8] = include_bytes!("../crates/termfont/tests/fonts/DejaVuSansMono.ttf");

fn checkerboard(cell: Cell) -> Vec<bool> {
    (0..cell.width * cell.height)
        .map(|i| (i / cell.width + i % cell.width) % 2 == 0)
        .collect()
}

fn bench_packing(c: &mut Criterion) {
    let cell = Cell::default();
    let pixels = checkerboard(cell);
    let bytes = pack_pixels(&pixels, cell.width, cell.height);

    c.bench_function("pack_10x20", |b| {
        b.iter(|| black_box(pack_pixels(black_box(&pixels), cell.width, cell.height)))
    });
    c.bench_function("unpack_10x20", |b| {
        b.iter(|| black_box(unpack(black_box(&bytes), cell)))
    });
}

fn bench_generation(c: &mut Criterion) {
    let synthetic = SyntheticFont::new("synthetic");
    let ascii = GeneratorConfig::default();
    c.bench_function("build_ascii_synthetic", |b| {
        b.iter(|| black_box(build_asset(&synthetic, black_box(&ascii))))
    });

    let font = TrueTypeFont::from_bytes("DejaVuSansMono.ttf", DEJAVU_MONO)
        .expect("fixture font parses");
    c.bench_function("build_ascii_dejavu", |b| {
        b.iter(|| black_box(build_asset(&font, black_box(&ascii))))
    });

    let extended = GeneratorConfig::default()
        .with_range_spec("00A0-00FF,2500-257F,2580-259F")
        .expect("valid range spec");
    c.bench_function("build_extended_dejavu", |b| {
        b.iter(|| black_box(build_asset(&font, black_box(&extended))))
    });

    let asset = build_asset(&font, &extended).expect("fixture font fits");
    let options = EmitOptions::default();
    c.bench_function("emit_headers", |b| {
        b.iter(|| {
            let base = emit_base(black_box(&asset), &options);
            let ext = emit_extended(black_box(&asset), &options);
            black_box((base, ext))
        })
    });
}

criterion_group!(benches, bench_packing, bench_generation);
criterion_main!(benches);
