//! Record Operation Benchmarks
//!
//! ## Benchmark Groups
//!
//! | Benchmark | What It Covers |
//! |-----------|----------------|
//! | pipeline_execute/* | Queue N commands, one round trip, resolve N results |
//! | record_save/* | Validation + conversion + transaction batch |
//! | record_load/* | Batch of loads + decoding into the record |
//! | list_replace/* | Full replace of a list field of N elements |
//!
//! All runs use `MemoryStore`, so the numbers measure library overhead, not
//! network latency.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench record_ops
//! cargo bench --bench record_ops -- "record_save"  # specific group
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kvmodel::prelude::*;
use kvmodel::Pipeline;

// =============================================================================
// Models
// =============================================================================

struct Account;

impl Model for Account {
    const NAME: &'static str = "Account";

    fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
        Ok(builder
            .field(Field::new("id", Integer).primary_key())
            .field(Field::new("email", EmailAddress).required())
            .field(Field::new("balance", Number))
            .field(Field::new("active", Boolean))
            .field(Field::new("created", DateTime).default(DefaultValue::UtcNow))
            .field(Field::new("history", List::of(Text)?)))
    }
}

fn account(id: i64, history: usize) -> Record {
    let mut record = Account::new_record().unwrap();
    record.set("id", id).unwrap();
    record.set("email", "bench@example.com").unwrap();
    record.set("balance", 10.5).unwrap();
    record.set("active", true).unwrap();
    let items = (0..history)
        .map(|i| Value::from(format!("event-{:04}", i)))
        .collect();
    record.set("history", Value::List(items)).unwrap();
    record
}

// =============================================================================
// Pipeline
// =============================================================================

fn pipeline_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_execute");
    let store = MemoryStore::new();
    for i in 0..1_000 {
        store.hset("bench", &format!("f{}", i), b"value").unwrap();
    }

    for size in [1usize, 16, 256] {
        let fields: Vec<String> = (0..size).map(|i| format!("f{}", i)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("hget", size), &fields, |b, fields| {
            b.iter(|| {
                let mut p = Pipeline::new(&store);
                let pending: Vec<_> = fields.iter().map(|f| p.hget("bench", f)).collect();
                p.execute().unwrap();
                black_box(pending.last().map(|d| d.is_resolved()))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Records
// =============================================================================

fn record_benchmarks(c: &mut Criterion) {
    let store = MemoryStore::new();

    let mut group = c.benchmark_group("record_save");
    group.throughput(Throughput::Elements(1));
    group.bench_function("all_fields", |b| {
        let mut record = account(1, 8);
        b.iter(|| record.save(&store, &[]).unwrap());
    });
    group.bench_function("one_field", |b| {
        let mut record = account(2, 8);
        record.save(&store, &[]).unwrap();
        b.iter(|| record.save(&store, &["balance"]).unwrap());
    });
    group.finish();

    let mut group = c.benchmark_group("record_load");
    group.throughput(Throughput::Elements(1));
    account(3, 8).save(&store, &[]).unwrap();
    group.bench_function("all_fields", |b| {
        b.iter(|| black_box(Account::load(&store, 3, &[]).unwrap()));
    });
    group.bench_function("one_field", |b| {
        b.iter(|| black_box(Account::load(&store, 3, &["email"]).unwrap()));
    });
    group.finish();

    let mut group = c.benchmark_group("list_replace");
    for len in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(len as u64));
        let mut record = account(100 + len as i64, len);
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| record.save(&store, &["history"]).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, pipeline_benchmarks, record_benchmarks);
criterion_main!(benches);
