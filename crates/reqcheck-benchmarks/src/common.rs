//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Build a synthetic manifest with the given number of declarations
pub fn synthetic_manifest(declarations: usize) -> String {
    let mut content = String::from("# generated for benchmarking\n\n");

    for i in 0..declarations {
        match i % 4 {
            0 => content.push_str(&format!("package-{}=={}.{}.0\n", i, i % 10, i % 7)),
            1 => content.push_str(&format!("package-{}>={}.{}\n", i, i % 10, i % 7)),
            2 => content.push_str(&format!("package-{}~={}.{}.1\n", i, i % 10 + 1, i % 7)),
            _ => content.push_str(&format!("package-{}\n", i)),
        }
    }

    content
}

/// Build a manifest where every package is declared twice
pub fn duplicated_manifest(packages: usize) -> String {
    let mut content = String::new();

    for i in 0..packages {
        content.push_str(&format!("package-{}>={}.0\n", i, i % 10));
    }
    for i in 0..packages {
        content.push_str(&format!("package-{}>={}.1\n", i, i % 10));
    }

    content
}
