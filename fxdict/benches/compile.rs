//! 辞書構築のベンチマーク
//!
//! 擬似乱数で生成した単語リストを用いて、頻度なしと頻度付きの構築速度を計測します。

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fxdict::WeightedWord;

const ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'r', 's', 't',
    'u', 'é', 'ö', 'ß', 'ん',
];

/// 再現可能な単語リストを生成する
fn generate_words(n: usize) -> Vec<WeightedWord> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..n)
        .map(|_| {
            let len = 2 + (next() % 10) as usize;
            let word: String = (0..len)
                .map(|_| ALPHABET[(next() % ALPHABET.len() as u64) as usize])
                .collect();
            let frequency = (next() % 1000) as f64 / 1000.0;
            WeightedWord::new(word, frequency)
        })
        .collect()
}

fn benchmark_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compile");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for n in [1_000, 10_000, 100_000] {
        let weighted = generate_words(n);
        let plain: Vec<_> = weighted.iter().map(|w| w.word.clone()).collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("Plain", n), &plain, |b, words| {
            b.iter(|| fxdict::compile(words).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("Weighted", n), &weighted, |b, words| {
            b.iter(|| fxdict::compile_weighted(words).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_compile);
criterion_main!(benches);
