//! Benchmarks for pair generation and cosine scoring
//!
//! Run with: cargo bench --package pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::stages::{cosine_similarity, generate_pairs};
use pipeline::{RatingPairSample, UserHistory};

fn bench_generate_pairs(c: &mut Criterion) {
    // A heavy user: pair generation is quadratic in history length
    let history = UserHistory {
        user_id: "405".to_string(),
        ratings: (0..500).map(|m| (m, (m % 5 + 1) as f64)).collect(),
    };

    c.bench_function("generate_pairs_500", |b| {
        b.iter(|| {
            let pairs = generate_pairs(black_box(&history));
            black_box(pairs)
        })
    });
}

fn bench_cosine_similarity(c: &mut Criterion) {
    let samples: Vec<RatingPairSample> = (0..1000)
        .map(|i| RatingPairSample::new((i % 5 + 1) as f64, ((i + 2) % 5 + 1) as f64))
        .collect();

    c.bench_function("cosine_similarity_1000", |b| {
        b.iter(|| black_box(cosine_similarity(black_box(&samples))))
    });
}

criterion_group!(benches, bench_generate_pairs, bench_cosine_similarity);
criterion_main!(benches);
