//! recencystress - hammer one shared LRU cache from many threads

mod worker;

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use recencycache::{CacheConfig, LruCache};
use tracing::{error, info};

use crate::worker::{WorkerReport, Workload};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 1024)]
    capacity: usize,

    /// Worker threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Operations per thread
    #[arg(short, long, default_value_t = 1_000_000)]
    ops: u64,

    /// Size of the key space shared by all threads
    #[arg(short, long, default_value_t = 4096)]
    keys: u64,

    /// Fraction of operations that are gets (0.0 to 1.0)
    #[arg(short, long, default_value_t = 0.8)]
    read_ratio: f64,

    /// Base RNG seed; thread n uses seed + n
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            bail!("--threads must be at least 1");
        }
        if self.keys == 0 {
            bail!("--keys must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.read_ratio) {
            bail!("--read-ratio must be between 0.0 and 1.0, got {}", self.read_ratio);
        }
        Ok(())
    }

    fn build_cache(&self) -> Result<Arc<LruCache<String, u64>>> {
        let cache = LruCache::with_config(CacheConfig::new(self.capacity))
            .context("creating cache")?;
        Ok(Arc::new(cache))
    }

    fn workload(&self) -> Workload {
        Workload {
            ops: self.ops,
            keys: self.keys,
            read_ratio: self.read_ratio,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    args.validate()?;

    info!("Starting recencystress v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);
    info!(
        "Workload: {} threads x {} ops over {} keys, read ratio {}",
        args.threads, args.ops, args.keys, args.read_ratio
    );

    let cache = args.build_cache()?;

    let workload = args.workload();
    let started = Instant::now();

    let workers: Vec<_> = (0..args.threads as u64)
        .map(|n| {
            let cache = Arc::clone(&cache);
            let seed = args.seed.wrapping_add(n);
            thread::Builder::new()
                .name(format!("worker-{}", n))
                .spawn(move || worker::run(cache, workload, seed))
                .context("spawning worker thread")
        })
        .collect::<Result<_>>()?;

    let mut total = WorkerReport::default();
    for (n, handle) in workers.into_iter().enumerate() {
        match handle.join() {
            Ok(report) => total = total.merge(report),
            Err(_) => bail!("worker-{} panicked", n),
        }
    }

    let elapsed = started.elapsed();
    let ops = total.gets + total.sets;
    info!(
        "Completed {} ops in {:.3}s ({:.0} ops/sec)",
        ops,
        elapsed.as_secs_f64(),
        ops as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    info!(
        "Workers saw {} gets ({} hits), {} sets ({} overwrites)",
        total.gets, total.hits, total.sets, total.overwrites
    );

    let stats = cache.stats().snapshot();
    info!(
        "Cache stats: hits={} misses={} inserts={} updates={} evictions={} hit_ratio={:.3}",
        stats.hits,
        stats.misses,
        stats.inserts,
        stats.updates,
        stats.evictions,
        stats.hit_ratio()
    );
    info!("Cache holds {}/{} entries", cache.len(), cache.capacity());

    if let Err(e) = cache.check_consistency() {
        error!("Consistency check failed: {}", e);
        return Err(e.into());
    }
    info!("Consistency check passed");

    Ok(())
}
