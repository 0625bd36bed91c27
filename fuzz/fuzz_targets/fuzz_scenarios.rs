#![no_main]
use libfuzzer_sys::fuzz_target;

use num::bigint::BigInt;
use warren_prob::{binomial, ScenarioCache};

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }
    // Scenario counts gain roughly a factor-of-k digit count per cascade
    // level, so j and k stay small while n ranges widely.
    let j = 1 + (data[0] % 8) as u64;
    let k = (data[1] % 5) as u64;
    let n = (u16::from_le_bytes([data[2], data[3]]) % 1001) as u64;

    let mut cache = ScenarioCache::new();
    // Neither entry point may panic, in or out of the feasible domain.
    let count = cache.count(j, k, n);
    let normalizer = cache.normalization(j, k, n);
    assert!(count >= BigInt::from(0), "scenario count went negative");
    assert!(normalizer >= BigInt::from(0), "normalizer went negative");

    // Single-choice cascades grow linearly, so depth alone is exercised here.
    let deep_j = u16::from_le_bytes([data[4], data[5]]) as u64 % 301;
    let _ = cache.count(deep_j, 1, n);

    let _ = binomial(n, k);
    let _ = binomial(n, n / 2);
});
