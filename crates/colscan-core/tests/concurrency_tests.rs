//! Stress tests for concurrent encoding.
//!
//! Uses a fixed number of operations per thread rather than time-based
//! loops, so writers always finish.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread;

use colscan_core::{
    simd_equality, simd_prefix_scan, DictionaryEncoder, FanOut, KeyValueStore, ScanBackend,
    ScanOptions, VectorScanner,
};

/// Smoke test: 4 writers × 50 batches
#[test]
fn test_stress_smoke_4_threads() {
    run_encode_stress(4, 50, 16, 10);
}

/// Medium stress: 16 writers × 100 batches
#[test]
fn test_stress_medium_16_threads() {
    run_encode_stress(16, 100, 32, 50);
}

/// Heavy stress (ignored for CI)
#[test]
#[ignore = "Heavy stress test, run manually"]
fn test_stress_64_threads() {
    run_encode_stress(64, 500, 64, 1_000);
}

fn run_encode_stress(threads: usize, batches: usize, batch_len: usize, vocabulary: usize) {
    // Arrange
    let encoder = Arc::new(DictionaryEncoder::new());

    // Act: writers encode while one reader queries
    let writers: Vec<_> = (0..threads)
        .map(|t| {
            let encoder = Arc::clone(&encoder);
            thread::spawn(move || {
                for b in 0..batches {
                    let batch: Vec<String> = (0..batch_len)
                        .map(|i| format!("k{}", (t * 31 + b * 7 + i) % vocabulary))
                        .collect();
                    encoder.encode(&batch).expect("encode");
                }
            })
        })
        .collect();

    let reader = {
        let encoder = Arc::clone(&encoder);
        thread::spawn(move || {
            for i in 0..batches {
                // A key, once visible, keeps its code
                let key = format!("k{}", i % vocabulary);
                if let Some(code) = encoder.query(&key) {
                    assert_eq!(encoder.query(&key), Some(code));
                }
                let _ = encoder.prefix_scan("k1");
            }
        })
    };

    for handle in writers {
        handle.join().expect("writer panicked");
    }
    reader.join().expect("reader panicked");

    // Assert
    let snapshot = encoder.snapshot();
    assert_eq!(snapshot.len(), threads * batches * batch_len);
    assert!(snapshot.distinct_count() <= vocabulary);

    // Codes are dense and one per key
    let keys: HashSet<&String> = snapshot.keys().iter().collect();
    assert_eq!(keys.len(), snapshot.distinct_count());
    for (code, key) in snapshot.keys().iter().enumerate() {
        assert_eq!(encoder.query(key), Some(u32::try_from(code).expect("fits")));
    }

    // Every encoded code decodes
    assert!(snapshot.encoded().iter().all(|&c| snapshot.decode(c).is_some()));
}

#[test]
fn test_parallel_encode_then_scan_agrees() {
    // Arrange: a column with a known frequency per key
    let column: Vec<String> = (0..20_000).map(|i| format!("user/{}", i % 113)).collect();
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for key in &column {
        *frequency.entry(key.as_str()).or_default() += 1;
    }
    let encoder = DictionaryEncoder::new();

    // Act
    encoder
        .encode_parallel(&column, &FanOut::new(8).with_min_chunk_len(500))
        .expect("encode");
    let snapshot = encoder.into_snapshot();

    // Assert: vector equality counts match the input frequencies
    for backend in ScanBackend::available() {
        let scanner = VectorScanner::with_backend(ScanOptions::default(), backend);
        for (key, &count) in &frequency {
            let code = snapshot
                .keys()
                .iter()
                .position(|k| k == key)
                .expect("key encoded");
            let hits = scanner
                .equality(snapshot.encoded(), u32::try_from(code).expect("fits"))
                .expect("fallback");
            assert_eq!(hits.len(), count, "backend {backend} key {key}");
        }
    }

    assert_eq!(simd_prefix_scan(&column, "user/").len(), column.len());
    assert_eq!(simd_prefix_scan(snapshot.keys(), "user/1").len(), 1 + 10 + 13);
    assert!(simd_equality(snapshot.encoded(), 113).is_empty());
}

#[test]
fn test_kv_store_independent_of_encoder() {
    // The store's lock is separate: holding it never blocks encoding
    let store = Arc::new(KeyValueStore::new());
    let encoder = Arc::new(DictionaryEncoder::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            let encoder = Arc::clone(&encoder);
            thread::spawn(move || {
                for i in 0..100 {
                    store.put(format!("{t}:{i}"), "v");
                    encoder.encode(&[format!("{t}")]).expect("encode");
                    assert!(store.get(&format!("{t}:{i}")).is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert_eq!(store.len(), 800);
    assert_eq!(encoder.len(), 800);
    assert_eq!(encoder.distinct_count(), 8);
}
