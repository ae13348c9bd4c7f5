//! # Registry Benchmarks
//!
//! Performance benchmarks for roster-core registry operations.
//!
//! Run with: `cargo bench -p roster-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use roster_core::{Amount, Employee, JsonSource, Month, NaiveDate, RaiseFactor, Registry};
use std::hint::black_box;

const ROLES: &[&str] = &["Operador", "Coordenador", "Diretor", "Gerente", "Contador"];

/// Create a registry with N employees spread over roles and birth months.
fn create_registry(size: usize) -> Registry {
    let employees = (0..size)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(1950 + (i % 50) as i32, 1 + (i % 12) as u32, 1)
                .expect("date");
            Employee::new(
                format!("Funcionário {}", size - i),
                date,
                Amount::from_hundredths(150_000 + (i as u64 * 37) % 2_000_000),
                ROLES[i % ROLES.len()],
            )
            .expect("employee")
        })
        .collect();
    Registry::from_employees(employees)
}

/// Serialize N records as a JSON record source.
fn create_source(size: usize) -> JsonSource {
    let records: Vec<String> = (0..size)
        .map(|i| {
            format!(
                r#"{{"nome":"Funcionário {i}","salario":{}.{:02},"dataNascimento":"1990-{:02}-15","funcao":"{}"}}"#,
                1000 + i,
                i % 100,
                1 + i % 12,
                ROLES[i % ROLES.len()]
            )
        })
        .collect();
    JsonSource::from_bytes(format!("[{}]", records.join(",")))
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_json");

    for size in [100, 1000, 10000].iter() {
        let source = create_source(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| {
                let mut registry = Registry::new();
                black_box(registry.load_from(source))
            });
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for size in [100, 1000, 10000].iter() {
        let registry = create_registry(*size);

        group.bench_with_input(BenchmarkId::new("group_by_role", size), &registry, |b, r| {
            b.iter(|| black_box(r.group_by_role()));
        });
        group.bench_with_input(BenchmarkId::new("sorted_by_name", size), &registry, |b, r| {
            b.iter(|| black_box(r.sorted_by_name()));
        });
        group.bench_with_input(BenchmarkId::new("birth_month", size), &registry, |b, r| {
            b.iter(|| black_box(r.filter_by_birth_month(Month::October, Month::December)));
        });
        group.bench_with_input(BenchmarkId::new("total_salary", size), &registry, |b, r| {
            b.iter(|| black_box(r.total_salary()));
        });
    }

    group.finish();
}

fn bench_raise(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_raise");
    let factor = RaiseFactor::parse("1.10").expect("factor");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_batched(
                || create_registry(size),
                |mut registry| {
                    registry.apply_raise(factor);
                    black_box(registry)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_queries, bench_raise);
criterion_main!(benches);
