use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use recencycache::LruCache;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1kb_hit", |b| {
        let cache = LruCache::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        for i in 0..100u64 {
            cache.set(i, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let cache = LruCache::new(1000).unwrap();

        for i in 0..1000u64 {
            cache.set(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter.is_multiple_of(2) {
                black_box(cache.get(&(counter % 1000)));
            } else {
                black_box(cache.set(counter % 1500, counter));
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_always_evicts", |b| {
        let cache = LruCache::new(10).unwrap();

        // Every key is new, so every set evicts the tail
        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.set(counter, counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    group.sample_size(20);
    group.throughput(Throughput::Elements(4 * 10_000));

    group.bench_function("4_threads_mixed", |b| {
        let cache = Arc::new(LruCache::new(256).unwrap());

        b.iter(|| {
            let workers: Vec<_> = (0..4u64)
                .map(|t| {
                    let cache = Arc::clone(&cache);
                    thread::spawn(move || {
                        let mut rng = fastrand::Rng::with_seed(t);
                        for i in 0..10_000u64 {
                            let key = rng.u64(0..512);
                            if i % 4 == 0 {
                                cache.set(key, i);
                            } else {
                                black_box(cache.get(&key));
                            }
                        }
                    })
                })
                .collect();

            for worker in workers {
                worker.join().unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_eviction,
    bench_contended
);
criterion_main!(benches);
