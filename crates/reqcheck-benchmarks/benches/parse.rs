//! Manifest and version parsing performance benchmarks
//!
//! Benchmarks manifest parsing across different file sizes, plus version
//! and constraint string parsing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reqcheck_benchmarks::{criterion_config, synthetic_manifest};
use reqcheck_core::types::{Constraint, Version};
use reqcheck_manifest::parse_manifest;
use std::str::FromStr;

/// Benchmark manifest parsing performance
fn bench_manifest_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("manifest_parsing");
    group.measurement_time(std::time::Duration::from_secs(5));

    for decl_count in [10, 50, 100, 500].iter() {
        group.throughput(Throughput::Elements(*decl_count as u64));

        let content = synthetic_manifest(*decl_count);

        group.bench_with_input(
            BenchmarkId::new("declarations", decl_count),
            &content,
            |b, content| {
                b.iter(|| black_box(parse_manifest(content).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark version and constraint string parsing
fn bench_version_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_parsing");

    let versions: Vec<String> = (0..1000)
        .map(|i| match i % 3 {
            0 => format!("{}.{}.{}", i % 10, i % 100, i % 7),
            1 => format!("{}.{}", i % 10, i % 100),
            _ => format!("{}.{}.{}rc{}", i % 10, i % 100, i % 7, i % 5),
        })
        .collect();

    group.bench_function("version_from_str", |b| {
        let mut index = 0;

        b.iter(|| {
            let version = &versions[index % versions.len()];
            index += 1;
            black_box(Version::from_str(version))
        });
    });

    let constraints: Vec<String> = (0..1000)
        .map(|i| match i % 3 {
            0 => format!("=={}.{}.{}", i % 10, i % 100, i % 7),
            1 => format!(">={}.{}", i % 10, i % 100),
            _ => format!("~={}.{}.{}", i % 10, i % 100, i % 7),
        })
        .collect();

    group.bench_function("constraint_from_str", |b| {
        let mut index = 0;

        b.iter(|| {
            let constraint = &constraints[index % constraints.len()];
            index += 1;
            black_box(Constraint::from_str(constraint))
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_manifest_parsing, bench_version_parsing
}
criterion_main!(benches);
