use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rowlite_core::Record;
use rowlite_storage::RecordStore;

const LAST_NAMES: &[&str] = &[
    "Adams", "Baker", "Clark", "Davis", "Evans", "Foster", "Garcia", "Harris", "Jones", "Smith",
    "Smithson", "Taylor", "Walker", "Young",
];

fn populated(n: i64) -> RecordStore {
    let mut store = RecordStore::new();
    for id in 0..n {
        let last = LAST_NAMES[(id as usize) % LAST_NAMES.len()];
        store
            .insert_record(Record::new(id, format!("first{}", id), last))
            .expect("insert");
    }
    store
}

fn bench_find_by_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_by_id");
    for n in [1_000i64, 10_000, 100_000] {
        let store = populated(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut id = 0;
            b.iter(|| {
                id = (id + 7919) % n;
                black_box(store.find_by_id(black_box(id)))
            });
        });
    }
    group.finish();
}

fn bench_range_by_id(c: &mut Criterion) {
    let store = populated(100_000);
    c.bench_function("range_by_id/100", |b| {
        b.iter(|| black_box(store.range_by_id(black_box(50_000), black_box(50_099))))
    });
}

fn bench_prefix_by_last(c: &mut Criterion) {
    let store = populated(10_000);
    c.bench_function("prefix_by_last/smi", |b| {
        b.iter(|| black_box(store.prefix_by_last(black_box("smi"))))
    });
}

criterion_group!(
    benches,
    bench_find_by_id,
    bench_range_by_id,
    bench_prefix_by_last
);
criterion_main!(benches);
