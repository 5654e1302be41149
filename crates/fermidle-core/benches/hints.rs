use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fermidle_core::dataset::Dataset;
use fermidle_core::difficulty::rank_by_difficulty;
use fermidle_core::hint::{random_hint, HintConfig};
use fermidle_core::question::seeded_question;
use fermidle_core::seed::hint_rng;

fn bench_random_hint(c: &mut Criterion) {
    let dataset = Dataset::bundled().unwrap();
    let question = seeded_question(&dataset, 20240101).unwrap().clone();
    let config = HintConfig::default();
    let mut group = c.benchmark_group("random_hint");

    group.bench_function("correct", |b| {
        b.iter(|| {
            random_hint(
                black_box(&dataset),
                black_box(&question),
                black_box(question.answer),
                &mut hint_rng(1, 0),
                &config,
            )
        })
    });

    group.bench_function("off_by_three", |b| {
        let guess = question.answer / 1000.0;
        b.iter(|| {
            random_hint(
                black_box(&dataset),
                black_box(&question),
                black_box(guess),
                &mut hint_rng(1, 0),
                &config,
            )
        })
    });

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let dataset = Dataset::bundled().unwrap();
    c.bench_function("rank_by_difficulty", |b| {
        b.iter(|| rank_by_difficulty(black_box(dataset.questions())))
    });
}

criterion_group!(benches, bench_random_hint, bench_rank);
criterion_main!(benches);
