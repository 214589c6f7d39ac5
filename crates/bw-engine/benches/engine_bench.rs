use std::hint::black_box;
use std::sync::Arc;

use bw_engine::{bridge, Engine, FrameImage, FrameMapper};
use bw_ir::{Command, FrameGeometry, MediaBuffer};
use criterion::{criterion_group, criterion_main, Criterion};

const BLOCK: usize = 512;

fn media() -> Arc<MediaBuffer> {
    let bytes = (0..64 * 128 * 64).map(|i| (i * 7 % 256) as u8).collect();
    Arc::new(MediaBuffer::new(bytes, FrameGeometry::new(64, 128)).unwrap())
}

fn render_block(c: &mut Criterion) {
    let (mut producer, mut control) = bridge(Engine::new(media(), 48_000, 24.0), 64);
    control.send(Command::SetRateMagnitude(3.5)).unwrap();
    let mut left = [0.0f32; BLOCK];
    let mut right = [0.0f32; BLOCK];
    c.bench_function("process_block_512", |b| {
        b.iter(|| producer.process(black_box(&mut left), black_box(&mut right)))
    });
}

fn map_tiled(c: &mut Criterion) {
    let media = media();
    let mapper = FrameMapper::new();
    let mut image = FrameImage::default();
    c.bench_function("map_tiled_8x4", |b| {
        b.iter(|| mapper.map_tiled(&media, black_box(3), 8, 4, &mut image))
    });
}

criterion_group!(benches, render_block, map_tiled);
criterion_main!(benches);
