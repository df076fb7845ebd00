use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use dst_texture_bc1::{decode_bc1_block, encode_bc1_block};
use dst_texture_common::{
    color_8888::Color8888, decoded_4x4_block::Decoded4x4Block, quality::CompressionQuality,
};
use std::hint::black_box;

fn make_blocks(count: usize) -> Vec<Decoded4x4Block> {
    (0..count)
        .map(|block| {
            let mut decoded = Decoded4x4Block::new(Color8888::default());
            for (index, pixel) in decoded.pixels.iter_mut().enumerate() {
                // Simple pattern; real textures have more variety but this keeps every
                // encoder path busy.
                let v = (block * 7 + index * 13) as u8;
                *pixel = Color8888::new(v, v.wrapping_mul(3), 255 - v, 255);
            }
            decoded
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    // 64K blocks = 1024x1024 pixels
    let blocks_count = 65536;
    let blocks = make_blocks(blocks_count);

    let mut group = c.benchmark_group("BC1 Encode Blocks");
    group.throughput(Throughput::Elements(blocks_count as u64));
    for quality in [CompressionQuality::Fast, CompressionQuality::Normal] {
        group.bench_function(quality.name(), |b| {
            b.iter(|| {
                for block in &blocks {
                    black_box(encode_bc1_block(black_box(block), quality));
                }
            })
        });
    }
    group.finish();

    // Set up the decode input - 8MB of BC1 blocks
    let bc1_size = 8388608;
    let input: Vec<u8> = (0..bc1_size).map(|i| (i % 255) as u8).collect();

    let mut group = c.benchmark_group("BC1 Decode Blocks");
    group.throughput(Throughput::Bytes(bc1_size as u64));
    group.bench_function("decode_bc1_blocks", |b| {
        b.iter(|| {
            for chunk in input.chunks_exact(8) {
                // SAFETY: chunks_exact yields 8 byte slices.
                black_box(unsafe { decode_bc1_block(chunk.as_ptr()) });
            }
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
