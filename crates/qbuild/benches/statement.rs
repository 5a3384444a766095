use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qbuild::{bind, insert_into, select, Dialect, Predicate, Statement};

/// Build a statement with `n` columns and `n` bound conditions:
/// SELECT col0 , col1 , ... FROM t WHERE col0 = ? AND col1 = ? ...
fn build_select(n: usize) -> Statement {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let refs: Vec<&str> = columns.iter().map(String::as_str).collect();

    let mut predicate = Predicate::new();
    for i in 0..n {
        predicate = predicate.and(&format!("col{i} = ?"), [bind(i as i64)]);
    }

    select(&refs).from("t").where_(predicate)
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).sql().to_owned()));
        });
    }

    group.finish();
}

fn bench_postgres_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/postgres_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).dialect(Dialect::Postgres).sql().to_owned()));
        });
    }

    group.finish();
}

fn bench_value_tuples(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/value_tuples");

    for n in [5, 20, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let rows = (0..n).map(|i| [bind(i as i64)]);
                black_box(insert_into("t", &["v"]).value_tuples(rows).sql().to_owned())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_and_render,
    bench_postgres_render,
    bench_value_tuples
);
criterion_main!(benches);
