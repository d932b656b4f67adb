use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hamming_secded::{
    BitVector, CodecConfig, ErrorCorrection, ErrorPattern, HammingCodec, Mode, Strategy,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_info(k: usize, seed: u64) -> BitVector {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let bits: Vec<u8> = (0..k).map(|_| rng.gen_range(0..=1)).collect();
    BitVector::from_bits(&bits).unwrap()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_encode");
    for k in [4, 26, 57, 120] {
        for strategy in [Strategy::Canonical, Strategy::Systematic] {
            let codec = HammingCodec::new(CodecConfig::new(k, strategy, Mode::SecDed)).unwrap();
            let info = random_info(k, k as u64);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), k),
                &info,
                |b, info| b.iter(|| codec.encode(black_box(info)).unwrap()),
            );
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_decode");
    for k in [4, 26, 57, 120] {
        let codec =
            HammingCodec::new(CodecConfig::new(k, Strategy::Canonical, Mode::SecDed)).unwrap();
        let codeword = codec.encode(&random_info(k, k as u64)).unwrap();
        for positions in [vec![], vec![3], vec![3, 5]] {
            let received = ErrorPattern::from_positions(&positions)
                .unwrap()
                .apply(&codeword)
                .unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("errors_{}", positions.len()), k),
                &received,
                |b, received| b.iter(|| codec.decode(black_box(received)).unwrap()),
            );
        }
    }
    group.finish();
}

fn bench_byte_stream(c: &mut Criterion) {
    let codec =
        HammingCodec::new(CodecConfig::new(57, Strategy::Canonical, Mode::SecDed)).unwrap();
    let data = vec![0xA5u8; 4096];
    let encoded = ErrorCorrection::encode(&codec, &data).unwrap();

    c.bench_function("hamming_byte_stream_encode_4k", |b| {
        b.iter(|| ErrorCorrection::encode(&codec, black_box(&data)).unwrap())
    });
    c.bench_function("hamming_byte_stream_decode_4k", |b| {
        b.iter(|| ErrorCorrection::decode(&codec, black_box(&encoded)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_byte_stream);
criterion_main!(benches);
