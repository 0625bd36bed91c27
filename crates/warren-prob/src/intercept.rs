use std::fmt;

use num::bigint::BigInt;
use num::rational::BigRational;
use num::traits::Zero;
use num::ToPrimitive;

use crate::routes::{
    route_count_i2p, route_count_no_repeat, route_count_tor, route_count_with_repeat,
    RouteCountError,
};

/// Route-counting model backing the probability derivations.
///
/// Every variant maps (n, j) to a total route count; the probability layer
/// is agnostic about which combinatorial family produced the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Unidirectional Tor-style circuit; `j` is read as the relay count.
    Tor,
    /// Independent outbound and inbound I2P-style tunnels of `j` relays.
    I2p,
    /// Round-trip cascades of length `j` that never revisit a node.
    NoRepeat,
    /// Round-trip cascades of length `j` with relay repetition allowed.
    #[default]
    WithRepeat,
    /// Caller-supplied counting function over `(n, j)`.
    Custom(fn(u64, u64) -> BigInt),
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Tor => "tor",
            Policy::I2p => "i2p",
            Policy::NoRepeat => "no-repeat",
            Policy::WithRepeat => "with-repeat",
            Policy::Custom(_) => "custom",
        };
        write!(f, "{name}")
    }
}

/// Total number of routes the adversary would have to cover.
///
/// # Parameters
/// - `n`: Total node count, endpoints included.
/// - `j`: Route length parameter, interpreted per policy.
/// - `policy`: Counting model to dispatch to.
///
/// # Returns
/// Exact route count; only [`Policy::NoRepeat`] can fail.
pub fn total_routes(n: u64, j: u64, policy: Policy) -> Result<BigInt, RouteCountError> {
    match policy {
        Policy::Tor => Ok(route_count_tor(n, j)),
        Policy::I2p => Ok(route_count_i2p(n, j)),
        Policy::NoRepeat => route_count_no_repeat(n, j),
        // Historical argument order: cascade length first.
        Policy::WithRepeat => Ok(route_count_with_repeat(j, n)),
        Policy::Custom(count) => Ok(count(n, j)),
    }
}

/// Number of routes that avoid all `m` compromised nodes.
///
/// A route is safe when every relay it uses is honest, so the safe count is
/// the same counting formula over the `n - m` honest nodes. Compromising all
/// but one node (or more) destroys every route.
pub fn safe_routes(n: u64, j: u64, m: u64, policy: Policy) -> Result<BigInt, RouteCountError> {
    if m == 0 {
        return total_routes(n, j, policy);
    }
    if n.saturating_sub(m) < 2 {
        return Ok(BigInt::zero());
    }
    total_routes(n - m, j, policy)
}

/// Number of routes touching at least one compromised node.
///
/// Clamped at zero so a custom policy that is not monotone in `n` can never
/// report a negative count.
pub fn intercepted_count(
    n: u64,
    j: u64,
    m: u64,
    policy: Policy,
) -> Result<BigInt, RouteCountError> {
    let total = total_routes(n, j, policy)?;
    let safe = safe_routes(n, j, m, policy)?;
    Ok(std::cmp::max(total - safe, BigInt::zero()))
}

/// Probability VP that a uniformly chosen route is intercepted.
///
/// Computed as the exact ratio intercepted/total and converted to `f64`
/// only at the end. An empty route space has nothing to intercept, so
/// VP is 0.0 there.
///
/// # Parameters
/// - `m`: Compromised node count.
/// - `n`: Total node count, endpoints included.
/// - `j`: Route length parameter, interpreted per policy.
/// - `policy`: Counting model.
///
/// # Returns
/// VP in `[0, 1]`.
pub fn interception_probability(
    m: u64,
    n: u64,
    j: u64,
    policy: Policy,
) -> Result<f64, RouteCountError> {
    let total = total_routes(n, j, policy)?;
    if total.is_zero() {
        return Ok(0.0);
    }
    let safe = safe_routes(n, j, m, policy)?;
    let intercepted = std::cmp::max(&total - safe, BigInt::zero());
    let ratio = BigRational::new(intercepted, total);
    Ok(ratio.to_f64().unwrap_or(0.0))
}

/// Probability VUS that a uniformly chosen route stays clear of the
/// adversary: the float complement of [`interception_probability`], so
/// VP + VUS is exactly 1.0.
pub fn success_probability(m: u64, n: u64, j: u64, policy: Policy) -> Result<f64, RouteCountError> {
    Ok(1.0 - interception_probability(m, n, j, policy)?)
}
