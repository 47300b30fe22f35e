//! Example demonstrating set-associative placement and per-set LRU eviction.
//!
//! Four slots split into two sets of two. Integer keys act as their own tag,
//! so keys 0, 1, 4, 5, ... land in set 0 and keys 2, 3, 6, 7, ... in set 1.
//!
//! Run with: RUST_LOG=setassoc=trace cargo run --example basic_set_associative

use setassoc::hash::IdentityHashGenerator;
use setassoc::metrics::{MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter};
use setassoc::SetAssociativeCacheBuilder;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Set-Associative Cache Example ===\n");

    let mut cache = SetAssociativeCacheBuilder::new()
        .capacity(4)
        .lines_per_set(2)
        .hash_generator(IdentityHashGenerator)
        .build::<i32, &str>()?;

    println!(
        "Created cache: capacity={}, lines_per_set={}, sets={}\n",
        cache.capacity(),
        cache.lines_per_set(),
        cache.set_count()
    );

    cache.put(0, "Test")?;
    cache.put(1, "Test2")?;
    println!("Inserted keys 0 and 1 (set 0 is now full)");

    cache.put(4, "Test3")?;
    println!("Inserted key 4 (maps to set 0, evicts least recent key 0)\n");

    println!("get(0) = {:?}", cache.get(&0));
    println!("get(4) = {:?}", cache.get(&4));
    println!("get(1) = {:?}", cache.get(&1));
    println!("get(2) = {:?} (set 1 is still empty)", cache.get(&2));

    println!(
        "\nhits={} misses={} evictions={} hit_ratio={:.2}",
        cache.hits(),
        cache.misses(),
        cache.evictions(),
        cache.hit_ratio()
    );

    println!("\n=== Slot Layout ===\n");
    for (index, entry) in cache.entries().iter().enumerate() {
        match entry.pair() {
            Some((key, value)) => println!(
                "  slot {}: key={} value={:?} ts={}",
                index,
                key,
                value,
                entry.timestamp()
            ),
            None => println!("  slot {}: <empty>", index),
        }
    }

    println!("\n=== Prometheus Export ===\n");
    let exporter = PrometheusTextExporter::new("setassoc", Vec::new());
    exporter.export(&cache.snapshot());
    print!("{}", String::from_utf8(exporter.into_inner())?);

    cache.clear_stats();
    println!("\nAfter clear_stats: hits={} len={}", cache.hits(), cache.len());

    Ok(())
}
