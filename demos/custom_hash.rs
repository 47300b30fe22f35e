//! Example demonstrating custom hash generators and evictors.
//!
//! One record type serves as both key and value; a closure hashes it by its
//! `id` field so two records with equal ids always share a set.
//!
//! Run with: cargo run --example custom_hash

use setassoc::entry::CacheEntry;
use setassoc::policy::Evictor;
use setassoc::SetAssociativeCacheBuilder;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Employee {
    id: i64,
    name: &'static str,
}

/// Always replaces the first way of the set.
struct FirstWay;

impl<K, V> Evictor<K, V> for FirstWay {
    fn evict(&mut self, _entries: &[CacheEntry<K, V>], start: usize, _end: usize) -> usize {
        start
    }
}

/// Returns a slot past the end of the set.
struct OffByOne;

impl<K, V> Evictor<K, V> for OffByOne {
    fn evict(&mut self, _entries: &[CacheEntry<K, V>], _start: usize, end: usize) -> usize {
        end + 1
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Custom Strategies Example ===\n");

    let mut cache = SetAssociativeCacheBuilder::new()
        .capacity(4)
        .lines_per_set(2)
        .evictor(FirstWay)
        .hash_generator(|e: &Employee| e.id)
        .build::<Employee, Employee>()?;

    let ada = Employee { id: 0, name: "Ada" };
    let grace = Employee { id: 1, name: "Grace" };
    let edsger = Employee { id: 2, name: "Edsger" };

    cache.put(ada.clone(), ada.clone())?;
    cache.put(grace.clone(), grace.clone())?;

    println!("get(ada)    = {:?}", cache.get(&ada));
    println!("get(grace)  = {:?}", cache.get(&grace));
    println!("get(edsger) = {:?}", cache.get(&edsger));
    println!(
        "hits={} misses={} evictions={}\n",
        cache.hits(),
        cache.misses(),
        cache.evictions()
    );

    let barbara = Employee { id: 4, name: "Barbara" };
    cache.put(barbara.clone(), barbara)?;
    println!("Inserted id 4 into full set 0; FirstWay replaced slot 0");
    println!("contains(ada)? {}\n", cache.contains(&ada));

    println!("=== Evictor Contract ===\n");
    let mut strict = SetAssociativeCacheBuilder::new()
        .capacity(4)
        .lines_per_set(2)
        .evictor(OffByOne)
        .hash_generator(|e: &Employee| e.id)
        .build::<Employee, &str>()?;

    strict.put(ada.clone(), ada.name)?;
    strict.put(grace.clone(), grace.name)?;
    match strict.put(edsger.clone(), edsger.name) {
        Ok(()) => println!("id 2 lands in set 1, no eviction needed"),
        Err(err) => println!("unexpected: {}", err),
    }
    let late = Employee { id: 4, name: "Late" };
    if let Err(err) = strict.put(late.clone(), late.name) {
        println!("put rejected: {}", err);
    }
    println!("contains(ada)? {} (untouched)", strict.contains(&ada));

    Ok(())
}
