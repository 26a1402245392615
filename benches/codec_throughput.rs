use criterion::{black_box, criterion_group, criterion_main, Criterion};
use static_huffman::HuffmanCodec;

fn sample_text(len: usize) -> Vec<u8> {
    b"Huffman encoding is a greedy algorithm that builds optimal prefix codes. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn huffman_encode(c: &mut Criterion) {
    let input = sample_text(64 * 1024);

    c.bench_function("huffman encode 64k", |b| {
        b.iter(|| HuffmanCodec::compress(black_box(&input)))
    });
}

fn huffman_decode(c: &mut Criterion) {
    let input = sample_text(64 * 1024);
    let compressed = HuffmanCodec::compress(&input).unwrap();

    c.bench_function("huffman decode 64k", |b| {
        b.iter(|| HuffmanCodec::decompress(black_box(&compressed.payload), &compressed.trie))
    });
}

criterion_group!(benches, huffman_encode, huffman_decode);
criterion_main!(benches);
