//! Performance benchmarks for oxnb-lzx.
//!
//! This suite measures decode throughput for the two stream shapes the
//! decoder spends its time in: Huffman-coded literal data and raw
//! uncompressed blocks. Streams are synthesized with `BitPacker`, so the
//! benchmarks run without fixture files.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxnb_core::cursor::BitPacker;
use oxnb_lzx::decode_lzx;
use std::hint::black_box;

/// Generate test data patterns for benchmarking.
mod test_data {
    /// Uniform data - all bytes are the same.
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - reproducible via a linear congruential generator.
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - realistic byte distribution.
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }
}

/// Emit 20 pretree nibbles giving one-bit codes to `symbols`.
fn push_pretree(packer: &mut BitPacker, symbols: &[usize]) {
    for i in 0..20 {
        let length = if symbols.contains(&i) {
            symbols.len().next_power_of_two().trailing_zeros().max(1)
        } else {
            0
        };
        packer.push(length, 4);
    }
}

/// Emit `count` zero lengths as symbol-18 runs (codes only symbol 18).
fn push_zero_lengths(packer: &mut BitPacker, mut count: usize) {
    while count > 0 {
        let mut chunk = count.min(51);
        if count - chunk > 0 && count - chunk < 20 {
            chunk = count - 20;
        }
        packer.push(0, 1); // symbol 18 in a single-symbol pretree
        packer.push((chunk - 20) as u32, 5);
        count -= chunk;
    }
}

/// One verbatim frame of pure literals: every literal at eight bits.
fn literal_frame(data: &[u8], first_frame: bool) -> Vec<u8> {
    let mut packer = BitPacker::new();
    if first_frame {
        packer.push(0, 1);
    }
    packer.push(1, 3);
    packer.push((data.len() >> 8) as u32, 16);
    packer.push((data.len() & 0xFF) as u32, 8);

    // Literal lengths: on the first frame 256 deltas of pretree symbol 9
    // turn zero into eight; later frames hold them there with symbol 0,
    // since deltas code against the previous frame's lengths.
    push_pretree(&mut packer, &[if first_frame { 9 } else { 0 }]);
    for _ in 0..256 {
        packer.push(0, 1);
    }
    // Match elements stay at zero (window bits 16: 256 entries).
    push_pretree(&mut packer, &[18]);
    push_zero_lengths(&mut packer, 256);
    // Length tree stays at zero.
    push_pretree(&mut packer, &[18]);
    push_zero_lengths(&mut packer, 249);

    // With all 256 literals at eight bits, each code equals its symbol.
    for &byte in data {
        packer.push(u32::from(byte), 8);
    }
    packer.finish()
}

/// One uncompressed frame holding `data` verbatim.
fn uncompressed_frame(data: &[u8], first_frame: bool) -> Vec<u8> {
    let mut packer = BitPacker::new();
    if first_frame {
        packer.push(0, 1);
    }
    packer.push(3, 3);
    packer.push((data.len() >> 8) as u32, 16);
    packer.push((data.len() & 0xFF) as u32, 8);
    packer.align();

    let mut bytes = packer.finish();
    for _ in 0..3 {
        bytes.extend_from_slice(&1i32.to_le_bytes());
    }
    bytes.extend_from_slice(data);
    bytes
}

/// Wrap frames into the orchestrated stream format.
fn build_stream(plaintext: &[u8], frame: fn(&[u8], bool) -> Vec<u8>) -> Vec<u8> {
    let mut stream = Vec::new();
    for (index, chunk) in plaintext.chunks(0x8000).enumerate() {
        let bytes = frame(chunk, index == 0);
        stream.push(0xFF);
        stream.push((chunk.len() >> 8) as u8);
        stream.push((chunk.len() & 0xFF) as u8);
        stream.push((bytes.len() >> 8) as u8);
        stream.push((bytes.len() & 0xFF) as u8);
        stream.extend_from_slice(&bytes);
    }
    stream
}

fn bench_literal_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal_decode");

    let patterns: [(&str, fn(usize) -> Vec<u8>); 3] = [
        ("uniform", test_data::uniform),
        ("random", test_data::random),
        ("text", test_data::text_like),
    ];

    let size = 128 * 1024;
    for (name, generator) in patterns {
        let plaintext = generator(size);
        let stream = build_stream(&plaintext, literal_frame);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &stream, |b, stream| {
            b.iter(|| {
                let decoded = decode_lzx(black_box(stream), size).unwrap();
                black_box(decoded);
            });
        });
    }

    group.finish();
}

fn bench_uncompressed_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncompressed_decode");

    let sizes = [("32KB", 32 * 1024), ("256KB", 256 * 1024)];
    for (name, size) in sizes {
        let plaintext = test_data::random(size);
        let stream = build_stream(&plaintext, uncompressed_frame);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &stream, |b, stream| {
            b.iter(|| {
                let decoded = decode_lzx(black_box(stream), size).unwrap();
                black_box(decoded);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_literal_decode, bench_uncompressed_decode);
criterion_main!(benches);
