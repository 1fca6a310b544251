use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use movies::{MoviePatch, build_update, build_update_at};

/// A patch setting the first `n` of the six mutable fields.
fn patch_with(n: usize) -> MoviePatch {
    let mut patch = MoviePatch::new();
    if n > 0 {
        patch = patch.name("Heat");
    }
    if n > 1 {
        patch = patch.genre("Crime");
    }
    if n > 2 {
        patch = patch.rating(4.5);
    }
    if n > 3 {
        patch = patch.release_date("1995-12-15");
    }
    if n > 4 {
        patch = patch.plot("A heist crew and a detective.");
    }
    if n > 5 {
        patch = patch.released(true);
    }
    patch
}

fn bench_build_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_builder/build_update");

    for n in [1, 3, 6] {
        let patch = patch_with(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &patch, |b, patch| {
            b.iter(|| black_box(build_update(black_box(7), patch)));
        });
    }

    group.finish();
}

fn bench_to_statement(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_builder/to_statement");
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for n in [1, 3, 6] {
        let patch = patch_with(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &patch, |b, patch| {
            b.iter(|| {
                let clause = build_update_at(7, patch, now).expect("non-empty patch");
                black_box(clause.to_statement("movies"))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_update, bench_to_statement);
criterion_main!(benches);
