use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use setassoc::hash::IdentityHashGenerator;
use setassoc::policy::{Evictor, LruEvictor, MruEvictor, RandomEvictor};
use setassoc::{SetAssociativeCache, SetAssociativeCacheBuilder};

const CAPACITY: usize = 4096;

fn warm<E: Evictor<u64, u64>>(lines: usize, evictor: E) -> SetAssociativeCache<u64, u64, E> {
    let mut cache = SetAssociativeCacheBuilder::new()
        .capacity(CAPACITY)
        .lines_per_set(lines)
        .evictor(evictor)
        .build()
        .unwrap();
    for i in 0..CAPACITY as u64 {
        cache.put(i, i).unwrap();
    }
    cache
}

fn bench_get_hit_by_ways(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_associative_get");
    group.throughput(Throughput::Elements(CAPACITY as u64));
    for lines in [1_usize, 4, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, &lines| {
            let mut cache = warm(lines, LruEvictor);
            b.iter(|| {
                for i in 0..CAPACITY as u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            })
        });
    }
    group.finish();
}

fn bench_put_update(c: &mut Criterion) {
    c.bench_function("set_associative_put_update", |b| {
        let mut cache = warm(4, LruEvictor);
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                cache.put(std::hint::black_box(i), i + 1).unwrap();
            }
        })
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_associative_eviction_churn");
    group.bench_function("lru", |b| {
        b.iter_batched(
            || warm(4, LruEvictor),
            |mut cache| {
                for i in 0..4 * CAPACITY as u64 {
                    cache.put(std::hint::black_box(10_000 + i), i).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("mru", |b| {
        b.iter_batched(
            || warm(4, MruEvictor),
            |mut cache| {
                for i in 0..4 * CAPACITY as u64 {
                    cache.put(std::hint::black_box(10_000 + i), i).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("random", |b| {
        b.iter_batched(
            || warm(4, RandomEvictor::with_seed(42)),
            |mut cache| {
                for i in 0..4 * CAPACITY as u64 {
                    cache.put(std::hint::black_box(10_000 + i), i).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_identity_vs_generic_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_associative_hash");
    group.bench_function("generic_u64", |b| {
        let cache = warm(4, LruEvictor);
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                let _ = std::hint::black_box(cache.peek(&std::hint::black_box(i)));
            }
        })
    });
    group.bench_function("generic_string", |b| {
        let keys: Vec<String> = (0..CAPACITY).map(|i| format!("key-{i}")).collect();
        let mut cache = SetAssociativeCache::<String, usize>::try_new(CAPACITY, 4).unwrap();
        for (i, key) in keys.iter().enumerate() {
            cache.put(key.clone(), i).unwrap();
        }
        b.iter(|| {
            for key in &keys {
                let _ = std::hint::black_box(cache.peek(std::hint::black_box(key)));
            }
        })
    });
    group.bench_function("identity", |b| {
        let mut cache = SetAssociativeCacheBuilder::new()
            .capacity(CAPACITY)
            .lines_per_set(4)
            .hash_generator(IdentityHashGenerator)
            .build::<i64, u64>()
            .unwrap();
        for i in 0..CAPACITY as i64 {
            cache.put(i, i as u64).unwrap();
        }
        b.iter(|| {
            for i in 0..CAPACITY as i64 {
                let _ = std::hint::black_box(cache.peek(&std::hint::black_box(i)));
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit_by_ways,
    bench_put_update,
    bench_eviction_churn,
    bench_identity_vs_generic_hash
);
criterion_main!(benches);
