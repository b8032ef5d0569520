//! Benchmarks for dictionary compilation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tstdict_core::{compile, CompileConfig, DictReader, TernaryTree};

/// Deterministic pseudo-words with plenty of shared suffixes
fn word_list(size: usize) -> Vec<(String, u32)> {
    const STEMS: [&str; 8] = ["read", "writ", "play", "walk", "talk", "jump", "cook", "paint"];
    const SUFFIXES: [&str; 6] = ["", "s", "ed", "er", "ing", "able"];

    (0..size)
        .map(|i| {
            let stem = STEMS[i % STEMS.len()];
            let suffix = SUFFIXES[(i / STEMS.len()) % SUFFIXES.len()];
            let prefix: String = format!("{:x}", i / (STEMS.len() * SUFFIXES.len()))
                .chars()
                .map(|c| (b'a' + c.to_digit(16).unwrap_or(0) as u8) as char)
                .collect();
            (format!("{prefix}{stem}{suffix}"), 2 + (i % 250) as u32)
        })
        .collect()
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for size in [100, 1_000, 10_000].iter() {
        let words = word_list(*size);
        let config = CompileConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| black_box(compile(words.iter().cloned(), &config).unwrap()))
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let words = word_list(10_000);
    let mut group = c.benchmark_group("stages");

    group.bench_function("build", |b| {
        b.iter(|| black_box(TernaryTree::from_words(words.iter().cloned()).unwrap()))
    });

    group.bench_function("build_balance", |b| {
        b.iter(|| {
            let mut tree = TernaryTree::from_words(words.iter().cloned()).unwrap();
            tree.balance();
            black_box(tree)
        })
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let words = word_list(10_000);
    let dict = compile(words.iter().cloned(), &CompileConfig::default()).unwrap();
    let reader = DictReader::new(dict.bytes).unwrap();

    c.bench_function("frequency_of", |b| {
        b.iter(|| black_box(reader.frequency_of(&words[5_000].0).unwrap()))
    });
}

criterion_group!(benches, bench_compile, bench_stages, bench_lookup);

criterion_main!(benches);
