use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Need at least 3 nodes (two endpoints plus one relay), got n={n}")]
    NodeCountTooSmall { n: u64 },
    #[error("Relay count must satisfy 1 <= k <= n-2, got k={k} with n={n}")]
    RelayCountOutOfRange { k: u64, n: u64 },
    #[error("Cascade length must satisfy 1 <= j <= n, got j={j} with n={n}")]
    CascadeLengthOutOfRange { j: u64, n: u64 },
    #[error("Compromised count must satisfy m <= n-2, got m={m} with n={n}")]
    CompromisedCountOutOfRange { m: u64, n: u64 },
    #[error("Cascade length j={j} cannot be shorter than the relay count k={k}")]
    CascadeShorterThanRelays { j: u64, k: u64 },
}

/// Check a parameter set against the documented input domain.
///
/// The counting and probability functions themselves accept the full `u64`
/// range and apply their zero policies; this is the shared pre-flight check
/// an interactive caller runs before trusting the numbers. Parameters not
/// relevant to a given computation are passed as `None` and stay unchecked.
///
/// # Parameters
/// - `n`: Total node count, always checked (`n >= 3`).
/// - `k`: Relay count, `1 <= k <= n-2` when present.
/// - `j`: Cascade length, `1 <= j <= n` when present.
/// - `m`: Compromised node count, `m <= n-2` when present.
///
/// # Returns
/// `Ok(())` when every supplied parameter is in range, otherwise the first
/// violated rule in the order above, with `j >= k` checked last.
pub fn validate_params(
    n: u64,
    k: Option<u64>,
    j: Option<u64>,
    m: Option<u64>,
) -> Result<(), ValidationError> {
    if n < 3 {
        return Err(ValidationError::NodeCountTooSmall { n });
    }
    if let Some(k) = k {
        if !(1..=n - 2).contains(&k) {
            return Err(ValidationError::RelayCountOutOfRange { k, n });
        }
    }
    if let Some(j) = j {
        if !(1..=n).contains(&j) {
            return Err(ValidationError::CascadeLengthOutOfRange { j, n });
        }
    }
    if let Some(m) = m {
        if m > n - 2 {
            return Err(ValidationError::CompromisedCountOutOfRange { m, n });
        }
    }
    if let (Some(j), Some(k)) = (j, k) {
        if j < k {
            return Err(ValidationError::CascadeShorterThanRelays { j, k });
        }
    }
    Ok(())
}
