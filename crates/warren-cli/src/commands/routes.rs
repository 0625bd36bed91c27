// Command handlers for: Routes, RouteSweep
//
// These commands count the routes of a single topology point and sweep
// one axis of a counting formula across a parameter range.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use serde::Serialize;
use tracing::info;

use warren_prob::{route_series, total_routes, validate_params, SweepRange};

use super::helpers::{
    exit_with_error, group_digits, parse_output_format, parse_policy, parse_route_variable,
    write_json_artifact,
};
use crate::OutputFormat;

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct RouteCountReport {
    pub schema_version: u32,
    pub formula: String,
    pub nodes: u64,
    pub length: u64,
    pub count: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RouteSweepPoint {
    pub x: u64,
    pub count: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RouteSweepReport {
    pub schema_version: u32,
    pub formula: String,
    pub vary: String,
    pub fixed_nodes: u64,
    pub fixed_length: u64,
    pub start: u64,
    pub stop: u64,
    pub step: u64,
    pub points: Vec<RouteSweepPoint>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Run the `routes` CLI command.
///
/// Counts the routes of one topology at a single `(n, j)` point.
pub(crate) fn run_routes_command(
    formula: String,
    nodes: u64,
    length: u64,
    format: String,
) -> miette::Result<()> {
    let policy = parse_policy(&formula);
    let output_format = parse_output_format(&format);
    if let Err(err) = validate_params(nodes, None, Some(length), None) {
        exit_with_error(err);
    }

    let count = total_routes(nodes, length, policy).unwrap_or_else(|err| exit_with_error(err));

    match output_format {
        OutputFormat::Text => {
            println!("Route count:");
            println!("  Formula: {policy}");
            println!("  Nodes: {nodes}");
            println!("  Length: {length}");
            println!("  Routes: {}", group_digits(&count));
        }
        OutputFormat::Json => {
            let report = RouteCountReport {
                schema_version: 1,
                formula: policy.to_string(),
                nodes,
                length,
                count: count.to_string(),
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

/// Run the `route-sweep` CLI command.
///
/// Sweeps one axis of a counting formula and reports the nonzero points.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_route_sweep_command(
    formula: String,
    vary: String,
    start: u64,
    stop: u64,
    step: u64,
    fix_n: u64,
    fix_j: u64,
    format: String,
    out: Option<PathBuf>,
) -> miette::Result<()> {
    let policy = parse_policy(&formula);
    let axis = parse_route_variable(&vary);
    let range = SweepRange::new(start, stop, step).unwrap_or_else(|err| exit_with_error(err));

    let series =
        route_series(policy, axis, range, fix_n, fix_j).unwrap_or_else(|err| exit_with_error(err));
    info!(formula = %policy, points = series.len(), "route sweep complete");

    let report = RouteSweepReport {
        schema_version: 1,
        formula: policy.to_string(),
        vary: vary.clone(),
        fixed_nodes: fix_n,
        fixed_length: fix_j,
        start,
        stop,
        step,
        points: series
            .into_iter()
            .map(|(x, count)| RouteSweepPoint {
                x,
                count: count.to_string(),
            })
            .collect(),
    };

    match parse_output_format(&format) {
        OutputFormat::Text => {
            println!("{}", render_route_sweep_text(&report));
        }
        OutputFormat::Json => {
            let value = serde_json::to_value(&report).into_diagnostic()?;
            if let Some(path) = out {
                write_json_artifact(&path, &value)?;
                println!("Route sweep report written to {}", path.display());
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

pub(crate) fn render_route_sweep_text(report: &RouteSweepReport) -> String {
    let mut out = String::new();
    out.push_str("ROUTE SWEEP\n");
    out.push_str(&format!("Formula: {}\n", report.formula));
    out.push_str(&format!(
        "Varying {} over {}..={} step {}\n",
        report.vary, report.start, report.stop, report.step
    ));
    let fixed = match report.vary.as_str() {
        "n" => format!("j = {}", report.fixed_length),
        _ => format!("n = {}", report.fixed_nodes),
    };
    out.push_str(&format!("Fixed: {fixed}\n"));
    out.push_str("Points:\n");
    for point in &report.points {
        out.push_str(&format!("  - {} = {} => {}\n", report.vary, point.x, point.count));
    }
    if report.points.is_empty() {
        out.push_str("  (no feasible points in range)\n");
    }
    out
}
