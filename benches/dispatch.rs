//! Dispatch Benchmark for RidgeKV
//!
//! Measures the command path end to end: table lookup, arity check, batch
//! lifecycle, and handler execution against the in-memory backend.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ridgekv::commands::{CommandTable, Dispatcher};
use ridgekv::storage::MemoryBackend;
use std::sync::Arc;

fn args(values: &[String]) -> Vec<Bytes> {
    values
        .iter()
        .map(|value| Bytes::copy_from_slice(value.as_bytes()))
        .collect()
}

/// Benchmark read-only commands (no batch allocated)
fn bench_read_path(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(CommandTable::builtin(), Arc::new(MemoryBackend::new()));

    let mut group = c.benchmark_group("read_path");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ping", |b| {
        b.iter(|| black_box(dispatcher.dispatch("ping", &[]).unwrap()));
    });

    group.bench_function("echo", |b| {
        let argv = vec![Bytes::from_static(b"hello")];
        b.iter(|| black_box(dispatcher.dispatch("echo", &argv).unwrap()));
    });

    group.bench_function("unknown_command", |b| {
        b.iter(|| black_box(dispatcher.dispatch("nosuchcmd", &[]).unwrap()));
    });

    group.finish();
}

/// Benchmark write commands (batch allocated and committed)
fn bench_write_path(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(CommandTable::builtin(), Arc::new(MemoryBackend::new()));

    let mut group = c.benchmark_group("write_path");
    group.throughput(Throughput::Elements(1));

    group.bench_function("zadd_new_member", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let argv = args(&["board".to_string(), "1.5".to_string(), format!("member:{}", i)]);
            black_box(dispatcher.dispatch("zadd", &argv).unwrap());
            i += 1;
        });
    });

    group.bench_function("zadd_then_del", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("cycle:{}", i % 1000);
            let add = args(&[key.clone(), "1".to_string(), "member".to_string()]);
            dispatcher.dispatch("zadd", &add).unwrap();
            let del = args(&[key]);
            black_box(dispatcher.dispatch("del", &del).unwrap());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark range reads over a populated sorted set
fn bench_range(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(CommandTable::builtin(), Arc::new(MemoryBackend::new()));

    // Pre-populate one sorted set with 10k members
    for i in 0..10_000 {
        let argv = args(&[
            "board".to_string(),
            format!("{}", i as f64 / 7.0),
            format!("member:{}", i),
        ]);
        dispatcher.dispatch("zadd", &argv).unwrap();
    }

    let mut group = c.benchmark_group("range");
    group.throughput(Throughput::Elements(1));

    group.bench_function("zrange_first_100", |b| {
        let argv = args(&["board".to_string(), "0".to_string(), "99".to_string()]);
        b.iter(|| black_box(dispatcher.dispatch("zrange", &argv).unwrap()));
    });

    group.bench_function("zrevrange_first_100", |b| {
        let argv = args(&["board".to_string(), "0".to_string(), "99".to_string()]);
        b.iter(|| black_box(dispatcher.dispatch("zrevrange", &argv).unwrap()));
    });

    group.bench_function("zscore", |b| {
        let argv = args(&["board".to_string(), "member:5000".to_string()]);
        b.iter(|| black_box(dispatcher.dispatch("zscore", &argv).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_read_path, bench_write_path, bench_range);
criterion_main!(benches);
