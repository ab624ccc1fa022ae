//! Benchmarks for path resolution and full validation passes
//!
//! Copyright (c) 2025 Paramcheck Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paramcheck_core::{resolve, validate, Schema};
use serde_json::{json, Value};

fn create_request() -> Value {
    json!({
        "params": {"id": "1842"},
        "query": {"page": "3", "sort": "desc"},
        "headers": {"x-request-id": "b1f0c2"},
        "body": {
            "user": {
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "tags": ["math", "engines", "poetry"]
            },
            "items": [
                {"sku": "A-1", "qty": "2"},
                {"sku": "B-7", "qty": "1"}
            ]
        }
    })
}

fn create_schema() -> Schema {
    Schema::from_value(json!({
        "id": {"type": "number", "path": "params.id"},
        "page": {"type": "number", "path": "query.page", "default": 1},
        "sort": {"type": "string", "path": "query.sort", "regex": "/^(asc|desc)$/i"},
        "requestId": {"type": "string", "path": "headers.x-request-id", "includeInOutput": false},
        "name": {"type": "string", "path": "body.user.name"},
        "email": {"type": "string", "path": "body.user.email", "regex": "^[^@]+@[^@]+$"},
        "tags": {"type": "array", "path": "body.user.tags", "items": {"type": "string"}},
        "items": {"type": "array", "path": "body.items", "items": {"type": "object"}}
    }))
    .expect("benchmark schema is valid")
}

fn create_array_request(size: usize) -> Value {
    let values: Vec<Value> = (0..size).map(|i| json!(i.to_string())).collect();
    json!({"values": values})
}

fn bench_path_resolution(c: &mut Criterion) {
    let request = create_request();
    let mut group = c.benchmark_group("path_resolution");

    for path in ["params.id", "body.user.tags[2]", "body.items[1].qty", "missing.deep[3].x"] {
        group.bench_with_input(BenchmarkId::from_parameter(path), &path, |b, path| {
            b.iter(|| resolve(black_box(&request), black_box(path)))
        });
    }

    group.finish();
}

fn bench_request_validation(c: &mut Criterion) {
    let request = create_request();
    let schema = create_schema();

    c.bench_function("validate_request", |b| {
        b.iter(|| validate(black_box(&schema), black_box(&request)))
    });
}

fn bench_array_items(c: &mut Criterion) {
    let schema = Schema::from_value(json!({
        "values": {"type": "array", "items": {"type": "number"}}
    }))
    .expect("benchmark schema is valid");

    let mut group = c.benchmark_group("array_items");
    for size in [10, 100, 1000] {
        let request = create_array_request(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &request, |b, request| {
            b.iter(|| validate(black_box(&schema), black_box(request)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_path_resolution,
    bench_request_validation,
    bench_array_items
);
criterion_main!(benches);
