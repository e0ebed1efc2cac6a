//! Per-thread load loop

use std::sync::Arc;

use recencycache::LruCache;

/// Shape of the load each worker generates
#[derive(Debug, Clone, Copy)]
pub struct Workload {
    pub ops: u64,
    pub keys: u64,
    pub read_ratio: f64,
}

/// What one worker observed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub gets: u64,
    pub hits: u64,
    pub sets: u64,
    pub overwrites: u64,
}

impl WorkerReport {
    pub fn merge(mut self, other: WorkerReport) -> Self {
        self.gets += other.gets;
        self.hits += other.hits;
        self.sets += other.sets;
        self.overwrites += other.overwrites;
        self
    }
}

pub fn key_name(n: u64) -> String {
    format!("key:{}", n)
}

/// Run `workload.ops` random gets/sets against the shared cache
pub fn run(cache: Arc<LruCache<String, u64>>, workload: Workload, seed: u64) -> WorkerReport {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut report = WorkerReport::default();

    for i in 0..workload.ops {
        let key = key_name(rng.u64(0..workload.keys));

        if rng.f64() < workload.read_ratio {
            report.gets += 1;
            if cache.get(key.as_str()).is_some() {
                report.hits += 1;
            }
        } else {
            report.sets += 1;
            if cache.set(key, i) {
                report.overwrites += 1;
            }
        }
    }

    report
}
