use num::bigint::BigInt;
use num::traits::Zero;
use thiserror::Error;

use crate::intercept::{interception_probability, total_routes, Policy};
use crate::mss::ScenarioCache;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SweepError {
    #[error("Sweep step must be positive")]
    ZeroStep,
    #[error("Sweep range is empty: start={start}, stop={stop}")]
    EmptyRange { start: u64, stop: u64 },
}

/// Inclusive arithmetic progression of sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRange {
    pub start: u64,
    pub stop: u64,
    pub step: u64,
}

impl SweepRange {
    /// Construct a validated range.
    pub fn new(start: u64, stop: u64, step: u64) -> Result<Self, SweepError> {
        let range = Self { start, stop, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        if self.step == 0 {
            return Err(SweepError::ZeroStep);
        }
        if self.stop < self.start {
            return Err(SweepError::EmptyRange {
                start: self.start,
                stop: self.stop,
            });
        }
        Ok(())
    }

    /// Iterate `start, start + step, ...` up to and including `stop`.
    ///
    /// A zero step is read as one so even an unvalidated range terminates.
    pub fn points(&self) -> impl Iterator<Item = u64> + '_ {
        (self.start..=self.stop).step_by(self.step.max(1) as usize)
    }
}

/// Axis swept by [`route_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteVariable {
    Nodes,
    Length,
}

/// Axis swept by [`interception_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptVariable {
    Nodes,
    Compromised,
}

/// Axis swept by [`scenario_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioVariable {
    Nodes,
    Length,
    Choices,
}

/// Which probability a point of [`interception_series`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Vp,
    Vus,
}

/// Route counts along one swept axis, the other held fixed.
///
/// When sweeping the node count the range start is clipped up to
/// `fixed_j + 2`, the smallest network that can host the cascade; the grid
/// keeps its phase from the clipped start. Points whose count is zero or
/// whose formula reports an error are left out of the series.
pub fn route_series(
    policy: Policy,
    vary: RouteVariable,
    range: SweepRange,
    fixed_n: u64,
    fixed_j: u64,
) -> Result<Vec<(u64, BigInt)>, SweepError> {
    range.validate()?;
    let mut range = range;
    if let RouteVariable::Nodes = vary {
        range.start = range.start.max(fixed_j.saturating_add(2));
        if range.start > range.stop {
            return Ok(Vec::new());
        }
    }
    let mut series = Vec::new();
    for x in range.points() {
        let (n, j) = match vary {
            RouteVariable::Nodes => (x, fixed_j),
            RouteVariable::Length => (fixed_n, x),
        };
        let count = match total_routes(n, j, policy) {
            Ok(count) => count,
            Err(err) => {
                tracing::debug!("dropping route point x={x}: {err}");
                continue;
            }
        };
        if count.is_zero() {
            continue;
        }
        series.push((x, count));
    }
    Ok(series)
}

/// VP or VUS along one swept axis, the others held fixed.
///
/// Node-count points below `fixed_j + 2` are dropped. A point whose
/// counting formula errors is kept and reported as zero risk, so the
/// series stays dense across mixed feasibility.
pub fn interception_series(
    policy: Policy,
    vary: InterceptVariable,
    range: SweepRange,
    fixed_n: u64,
    fixed_j: u64,
    fixed_m: u64,
    metric: Metric,
) -> Result<Vec<(u64, f64)>, SweepError> {
    range.validate()?;
    let mut series = Vec::new();
    for x in range.points() {
        let (n, m) = match vary {
            InterceptVariable::Nodes => (x, fixed_m),
            InterceptVariable::Compromised => (fixed_n, x),
        };
        if matches!(vary, InterceptVariable::Nodes) && n < fixed_j.saturating_add(2) {
            continue;
        }
        let vp = match interception_probability(m, n, fixed_j, policy) {
            Ok(vp) => vp,
            Err(err) => {
                tracing::debug!("treating route point x={x} as zero risk: {err}");
                0.0
            }
        };
        let value = match metric {
            Metric::Vp => vp,
            Metric::Vus => 1.0 - vp,
        };
        series.push((x, value));
    }
    Ok(series)
}

/// Cascade-scenario counts along one swept axis, the others held fixed.
///
/// Points where the choice parameter exceeds `n - 2` are infeasible and
/// skipped; every other point is kept, zeros included.
pub fn scenario_series(
    vary: ScenarioVariable,
    range: SweepRange,
    fixed_n: u64,
    fixed_j: u64,
    fixed_k: u64,
    cache: &mut ScenarioCache,
) -> Result<Vec<(u64, BigInt)>, SweepError> {
    range.validate()?;
    let mut series = Vec::new();
    for x in range.points() {
        let (j, k, n) = match vary {
            ScenarioVariable::Nodes => (fixed_j, fixed_k, x),
            ScenarioVariable::Length => (x, fixed_k, fixed_n),
            ScenarioVariable::Choices => (fixed_j, x, fixed_n),
        };
        if k > n.saturating_sub(2) {
            tracing::debug!("skipping infeasible scenario point x={x} (k={k}, n={n})");
            continue;
        }
        series.push((x, cache.count(j, k, n)));
    }
    Ok(series)
}
