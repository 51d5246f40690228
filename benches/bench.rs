// Criterion benchmarks for Admit Algo

use admit_algo::core::{
    apply_safety_first_strategy, generate_random_scores, run_matching,
};
use admit_algo::models::{MatchingAlgorithm, School, Student};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_cohort(count: u32, school_count: u32) -> (Vec<Student>, Vec<School>) {
    let ids: Vec<u32> = (1..=count).collect();
    let scores = generate_random_scores(&ids, 0, 100, 7);

    let students = ids
        .iter()
        .map(|&id| {
            let mut preferences: Vec<u32> = (1..=school_count).collect();
            preferences.rotate_left(id as usize % school_count as usize);
            preferences.truncate(5);
            Student {
                id,
                score: scores[&id] as f64,
                preferences,
            }
        })
        .collect();

    let schools = (1..=school_count)
        .map(|id| School {
            id,
            capacity: count / school_count,
        })
        .collect();

    (students, schools)
}

fn bench_score_generation(c: &mut Criterion) {
    let ids: Vec<u32> = (1..=1000).collect();

    c.bench_function("generate_random_scores_1000", |b| {
        b.iter(|| generate_random_scores(black_box(&ids), black_box(0), black_box(100), black_box(42)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    for student_count in [10, 50, 100, 500, 1000].iter() {
        let (students, schools) = build_cohort(*student_count, 10);

        group.bench_with_input(
            BenchmarkId::new("baseline", student_count),
            student_count,
            |b, _| {
                b.iter(|| {
                    run_matching(
                        MatchingAlgorithm::Baseline,
                        black_box(&students),
                        black_box(&schools),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("da", student_count),
            student_count,
            |b, _| {
                b.iter(|| {
                    run_matching(
                        MatchingAlgorithm::Da,
                        black_box(&students),
                        black_box(&schools),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_safety_first_strategy(c: &mut Criterion) {
    let (students, schools) = build_cohort(500, 10);

    c.bench_function("safety_first_strategy_500", |b| {
        b.iter(|| apply_safety_first_strategy(black_box(&students), black_box(&schools)));
    });
}

criterion_group!(
    benches,
    bench_score_generation,
    bench_matching,
    bench_safety_first_strategy
);

criterion_main!(benches);
