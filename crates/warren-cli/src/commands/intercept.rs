// Command handlers for: Intercept, InterceptSweep
//
// These commands evaluate interception and success probabilities at a
// single parameter point and sweep one axis of either probability.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use serde::Serialize;
use tracing::info;

use warren_prob::{
    intercepted_count, interception_probability, interception_series, safe_routes, total_routes,
    validate_params, SweepRange,
};

use super::helpers::{
    exit_with_error, group_digits, parse_intercept_variable, parse_metric, parse_output_format,
    parse_policy, write_json_artifact,
};
use crate::OutputFormat;

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct InterceptReport {
    pub schema_version: u32,
    pub policy: String,
    pub nodes: u64,
    pub length: u64,
    pub compromised: u64,
    pub total_routes: String,
    pub safe_routes: String,
    pub intercepted_routes: String,
    pub vp: f64,
    pub vus: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct InterceptSweepPoint {
    pub x: u64,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct InterceptSweepReport {
    pub schema_version: u32,
    pub policy: String,
    pub metric: String,
    pub vary: String,
    pub fixed_nodes: u64,
    pub fixed_length: u64,
    pub fixed_compromised: u64,
    pub start: u64,
    pub stop: u64,
    pub step: u64,
    pub points: Vec<InterceptSweepPoint>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Run the `intercept` CLI command.
///
/// Reports the route pool, the intercepted share, and the VP/VUS pair at
/// a single `(n, j, m)` point.
pub(crate) fn run_intercept_command(
    policy: String,
    nodes: u64,
    length: u64,
    compromised: u64,
    format: String,
) -> miette::Result<()> {
    let policy = parse_policy(&policy);
    let output_format = parse_output_format(&format);
    if let Err(err) = validate_params(nodes, None, Some(length), Some(compromised)) {
        exit_with_error(err);
    }

    let total =
        total_routes(nodes, length, policy).unwrap_or_else(|err| exit_with_error(err));
    let safe = safe_routes(nodes, length, compromised, policy)
        .unwrap_or_else(|err| exit_with_error(err));
    let intercepted = intercepted_count(nodes, length, compromised, policy)
        .unwrap_or_else(|err| exit_with_error(err));
    let vp = interception_probability(compromised, nodes, length, policy)
        .unwrap_or_else(|err| exit_with_error(err));
    let vus = 1.0 - vp;

    match output_format {
        OutputFormat::Text => {
            println!("Interception analysis:");
            println!("  Model: {policy}");
            println!("  Nodes: {nodes} ({compromised} compromised)");
            println!("  Route length: {length}");
            println!("  Total routes: {}", group_digits(&total));
            println!("  Safe routes: {}", group_digits(&safe));
            println!("  Intercepted routes: {}", group_digits(&intercepted));
            println!("  VP (interception): {vp:.6}");
            println!("  VUS (success): {vus:.6}");
        }
        OutputFormat::Json => {
            let report = InterceptReport {
                schema_version: 1,
                policy: policy.to_string(),
                nodes,
                length,
                compromised,
                total_routes: total.to_string(),
                safe_routes: safe.to_string(),
                intercepted_routes: intercepted.to_string(),
                vp,
                vus,
            };
            let value = serde_json::to_value(&report).into_diagnostic()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&value).into_diagnostic()?
            );
        }
    }

    Ok(())
}

/// Run the `intercept-sweep` CLI command.
///
/// Sweeps one axis of VP or VUS, the other parameters held fixed.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_intercept_sweep_command(
    policy: String,
    metric: String,
    vary: String,
    start: u64,
    stop: u64,
    step: u64,
    fix_n: u64,
    fix_j: u64,
    fix_m: u64,
    format: String,
    out: Option<PathBuf>,
) -> miette::Result<()> {
    let policy = parse_policy(&policy);
    let chosen_metric = parse_metric(&metric);
    let axis = parse_intercept_variable(&vary);
    let range = SweepRange::new(start, stop, step).unwrap_or_else(|err| exit_with_error(err));

    let series = interception_series(policy, axis, range, fix_n, fix_j, fix_m, chosen_metric)
        .unwrap_or_else(|err| exit_with_error(err));
    info!(
        policy = %policy,
        metric = %metric,
        points = series.len(),
        "interception sweep complete"
    );

    let report = InterceptSweepReport {
        schema_version: 1,
        policy: policy.to_string(),
        metric: metric.clone(),
        vary: vary.clone(),
        fixed_nodes: fix_n,
        fixed_length: fix_j,
        fixed_compromised: fix_m,
        start,
        stop,
        step,
        points: series
            .into_iter()
            .map(|(x, value)| InterceptSweepPoint { x, value })
            .collect(),
    };

    match parse_output_format(&format) {
        OutputFormat::Text => {
            println!("{}", render_intercept_sweep_text(&report));
        }
        OutputFormat::Json => {
            let value = serde_json::to_value(&report).into_diagnostic()?;
            if let Some(path) = out {
                write_json_artifact(&path, &value)?;
                println!("Interception sweep report written to {}", path.display());
            } else {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&value).into_diagnostic()?
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn render_intercept_sweep_text(report: &InterceptSweepReport) -> String {
    let mut out = String::new();
    out.push_str("INTERCEPTION SWEEP\n");
    out.push_str(&format!("Model: {}\n", report.policy));
    out.push_str(&format!("Metric: {}\n", report.metric));
    out.push_str(&format!(
        "Varying {} over {}..={} step {}\n",
        report.vary, report.start, report.stop, report.step
    ));
    let fixed = match report.vary.as_str() {
        "n" => format!("j = {}, m = {}", report.fixed_length, report.fixed_compromised),
        _ => format!("n = {}, j = {}", report.fixed_nodes, report.fixed_length),
    };
    out.push_str(&format!("Fixed: {fixed}\n"));
    out.push_str("Points:\n");
    for point in &report.points {
        out.push_str(&format!(
            "  - {} = {} => {:.6}\n",
            report.vary, point.x, point.value
        ));
    }
    if report.points.is_empty() {
        out.push_str("  (no feasible points in range)\n");
    }
    out
}
