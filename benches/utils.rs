use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use admin_utils::{byte_length, format_pattern, object_merge, parse_query, serialize_query, Padding, QueryMap};
use chrono::{Local, TimeZone};
use serde_json::json;

/// Benchmark byte length measurement across script mixes
fn bench_byte_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("byte_length");

    let ascii = "the quick brown fox jumps over the lazy dog".repeat(10);
    let cjk = "后台管理系统通用工具函数性能测试".repeat(25);
    let mixed = "order #42 已发货 — see https://example.com/track?id=42 ".repeat(8);

    for (name, input) in [("ascii", &ascii), ("cjk", &cjk), ("mixed", &mixed)] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| byte_length(black_box(input)))
        });
    }

    group.finish();
}

/// Benchmark query string round trips
fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let mut params = QueryMap::new();
    params.insert("page", "1".to_string());
    params.insert("page_size", "20".to_string());
    params.insert("keyword", "订单 查询".to_string());
    params.insert("status", "shipped".to_string());
    params.insert("sort", "created_at desc".to_string());
    let encoded = serialize_query(&params);
    let url = format!("https://example.com/api/orders?{encoded}");

    group.bench_function("serialize", |b| b.iter(|| serialize_query(black_box(&params))));

    group.bench_function("parse", |b| b.iter(|| parse_query(black_box(&url))));

    group.finish();
}

/// Benchmark recursive object merge at increasing depth
fn bench_object_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("object_merge");

    for depth in [1usize, 4, 16] {
        let mut target = json!({ "leaf": 1 });
        let mut source = json!({ "leaf": 2, "extra": true });
        for level in 0..depth {
            let key = format!("level{level}");
            target = json!({ (key.clone()): target, "sibling": level });
            source = json!({ (key): source });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(depth),
            &(target, source),
            |b, (target, source)| b.iter(|| object_merge(black_box(target.clone()), black_box(source))),
        );
    }

    group.finish();
}

/// Benchmark date pattern expansion
fn bench_format_pattern(c: &mut Criterion) {
    let dt = Local
        .with_ymd_and_hms(2024, 6, 1, 8, 9, 10)
        .single()
        .expect("valid timestamp");

    c.bench_function("format_pattern", |b| {
        b.iter(|| {
            format_pattern(
                black_box(&dt),
                black_box("{y}-{m}-{d} {h}:{i}:{s} 星期{a}"),
                Padding::Full,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_byte_length,
    bench_query,
    bench_object_merge,
    bench_format_pattern
);
criterion_main!(benches);
