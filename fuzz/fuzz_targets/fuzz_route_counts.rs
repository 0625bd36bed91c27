#![no_main]
use libfuzzer_sys::fuzz_target;

use warren_prob::{
    interception_probability, route_count_i2p, route_count_no_repeat, route_count_tor,
    route_count_with_repeat, success_probability, Policy,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }
    let n = u16::from_le_bytes([data[0], data[1]]) as u64;
    // The route length is capped so one iteration stays fast even for the
    // exponential formulas.
    let j = (u16::from_le_bytes([data[2], data[3]]) % 512) as u64;
    let m = u16::from_le_bytes([data[4], data[5]]) as u64;

    // None of the counting formulas may panic, whatever the inputs.
    let _ = route_count_tor(n, j);
    let _ = route_count_i2p(n, j);
    let _ = route_count_no_repeat(n, j);
    let _ = route_count_with_repeat(j, n);

    for policy in [
        Policy::Tor,
        Policy::I2p,
        Policy::NoRepeat,
        Policy::WithRepeat,
    ] {
        if let Ok(vp) = interception_probability(m, n, j, policy) {
            // The built-in models shrink monotonically with the pool, so the
            // exact ratio lands in the unit interval.
            assert!((0.0..=1.0).contains(&vp), "vp out of range: {vp}");
        }
        let _ = success_probability(m, n, j, policy);
    }
});
