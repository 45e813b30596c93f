//! Criterion micro-benchmarks for world encoding and hashing.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hotplate_bench::reference_world;
use hotplate_io::{load_world, save_world, world_hash, WorldEncoding};

/// Benchmark: encode and decode the 128x128 plate in both encodings.
fn bench_codec_roundtrip(c: &mut Criterion) {
    let world = reference_world();
    for (name, encoding) in [("text", WorldEncoding::Text), ("binary", WorldEncoding::Binary)] {
        let mut encoded = Vec::new();
        save_world(&mut encoded, &world, encoding).unwrap();

        c.bench_function(&format!("codec_save_{name}_16k"), |b| {
            b.iter(|| {
                let mut buf = Vec::with_capacity(encoded.len());
                save_world(&mut buf, black_box(&world), encoding).unwrap();
                black_box(buf)
            });
        });
        c.bench_function(&format!("codec_load_{name}_16k"), |b| {
            b.iter(|| black_box(load_world(&mut black_box(encoded.as_slice())).unwrap()));
        });
    }
}

/// Benchmark: hash the 128x128 plate.
fn bench_world_hash(c: &mut Criterion) {
    let world = reference_world();
    c.bench_function("world_hash_16k", |b| {
        b.iter(|| black_box(world_hash(black_box(&world))));
    });
}

criterion_group!(benches, bench_codec_roundtrip, bench_world_hash);
criterion_main!(benches);
