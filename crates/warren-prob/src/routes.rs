use num::bigint::BigInt;
use num::traits::{One, Pow, Zero};
use num::Integer;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteCountError {
    #[error("Invalid route parameters: nodes n={n}, cascade length j={j}")]
    InvalidParameters { n: u64, j: u64 },
}

/// Number of distinct Tor-style routes through `k` relays drawn from `n` nodes.
///
/// The two endpoints are part of the `n` nodes but never relay, so the first
/// hop chooses among `n - 2` candidates and each later hop among one fewer:
/// the count is the falling product of `(n - i - 1)` for `i = 1..=k`.
///
/// # Parameters
/// - `n`: Total node count, endpoints included.
/// - `k`: Relay count (route length between the endpoints).
///
/// # Returns
/// Exact route count; zero when `n < 2` or `k > n - 2` (no such route exists).
/// `k = 0` is the direct connection and counts as the single empty route.
pub fn route_count_tor(n: u64, k: u64) -> BigInt {
    if n < 2 || k > n - 2 {
        return BigInt::zero();
    }
    let mut count = BigInt::one();
    for i in 1..=k {
        count *= BigInt::from(n - i - 1);
    }
    count
}

/// Number of distinct I2P-style routes: an outbound and an inbound tunnel
/// of `k` relays each, chosen independently, so the Tor count squared.
///
/// # Parameters
/// - `n`: Total node count, endpoints included.
/// - `k`: Relay count per tunnel.
///
/// # Returns
/// Exact route count (zero exactly when the Tor count is zero).
pub fn route_count_i2p(n: u64, k: u64) -> BigInt {
    let tunnel = route_count_tor(n, k);
    &tunnel * &tunnel
}

/// Number of round-trip cascades of length `j` that never revisit a node.
///
/// Closed forms per cascade-length band; the bands differ because short
/// cascades cannot distinguish "returns through the same relay" from
/// "returns through a fresh one".
///
/// # Parameters
/// - `n`: Total node count, endpoints included.
/// - `j`: Number of intermediate hops in the cascade.
///
/// # Returns
/// Exact route count. `n < j` yields zero (not enough distinct nodes);
/// `j = 0` is outside every band and reports
/// [`RouteCountError::InvalidParameters`].
pub fn route_count_no_repeat(n: u64, j: u64) -> Result<BigInt, RouteCountError> {
    // The feasibility cut comes before the band dispatch so that oversized
    // cascade lengths count as zero instead of erroring.
    if n < j {
        return Ok(BigInt::zero());
    }
    match j {
        1 => Ok(BigInt::from(n.saturating_sub(2))),
        2 => {
            let back = BigInt::from(n - 1);
            let fresh = BigInt::from(n - 2);
            Ok(back + &fresh * &fresh)
        }
        3 => {
            let n1 = BigInt::from(n - 1);
            let n2 = BigInt::from(n - 2);
            let n3 = BigInt::from(n - 3);
            Ok(&n2 * (n1 + &n2 + &n2 * n3))
        }
        _ if j >= 4 => {
            // inner = (n-1) + (j-2)(n-2) + (n-2)(n-j), scaled by the
            // falling product of (n-m) for m = 2..j.
            let n2 = BigInt::from(n - 2);
            let inner =
                BigInt::from(n - 1) + BigInt::from(j - 2) * &n2 + &n2 * BigInt::from(n - j);
            let mut falling = BigInt::one();
            for m in 2..j {
                falling *= BigInt::from(n - m);
            }
            Ok(inner * falling)
        }
        _ => Err(RouteCountError::InvalidParameters { n, j }),
    }
}

/// Number of round-trip cascades of length `j` through `n` nodes when
/// relays may repeat.
///
/// Closed form `((n-1)^(j+1) - (-1)^(j+1)) / n`; the numerator is always
/// divisible by `n` because `n - 1 ≡ -1 (mod n)`.
///
/// Note the historical argument order: cascade length first.
///
/// # Parameters
/// - `j`: Number of intermediate hops in the cascade.
/// - `n`: Total node count, endpoints included.
///
/// # Returns
/// Exact route count; zero for `n = 0`. The degenerate `n = 1` keeps the
/// alternating term, so odd `j` yields `-1`; documented callers stay at
/// `n >= 3` where the count is always non-negative.
pub fn route_count_with_repeat(j: u64, n: u64) -> BigInt {
    if n == 0 {
        return BigInt::zero();
    }
    let base = BigInt::from(n - 1);
    // (n-1)^(j+1) via one extra multiply keeps the exponent in u64 range.
    let power = Pow::pow(&base, j) * &base;
    let alternating = if j % 2 == 0 {
        -BigInt::one()
    } else {
        BigInt::one()
    };
    let (quotient, remainder) = (power - alternating).div_rem(&BigInt::from(n));
    debug_assert!(remainder.is_zero());
    quotient
}
