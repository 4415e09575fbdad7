use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hzip::{CompressedData, FrequencyTable, HuffmanCodec};

fn sample_text() -> Vec<u8> {
    "It was the best of times, it was the worst of times, it was the age of wisdom, \
     it was the age of foolishness, it was the epoch of belief, it was the epoch of incredulity.\n"
        .repeat(500)
        .into_bytes()
}

fn bench_build(c: &mut Criterion) {
    let text = sample_text();
    let mut group = c.benchmark_group("build");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("frequencies", |b| {
        b.iter(|| FrequencyTable::from_bytes(black_box(&text)))
    });

    let frequencies = FrequencyTable::from_bytes(&text);
    group.bench_function("codec", |b| {
        b.iter(|| HuffmanCodec::new(black_box(frequencies.clone())).unwrap())
    });
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let text = sample_text();
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(text.len() as u64));

    let codec = HuffmanCodec::from_bytes(&text).unwrap();
    group.bench_function("encode", |b| {
        b.iter(|| codec.encode(black_box(&text)).unwrap())
    });

    let compressed = codec.encode(&text).unwrap();
    group.bench_function("decode", |b| {
        b.iter(|| HuffmanCodec::decode(black_box(&compressed)).unwrap())
    });

    let bytes = compressed.serialize().unwrap();
    group.bench_function("deserialize", |b| {
        b.iter(|| CompressedData::deserialize(black_box(&bytes)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_codec);
criterion_main!(benches);
