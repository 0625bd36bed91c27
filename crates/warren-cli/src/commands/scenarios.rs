// Command handlers for: Scenarios, ScenarioSweep
//
// These commands evaluate the memoized cascade-scenario count at a
// single point and sweep one axis of it with a shared cache.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use serde::Serialize;
use tracing::info;

use warren_prob::{mss_scenario_count, scenario_series, validate_params, ScenarioCache, SweepRange};

use super::helpers::{
    exit_with_error, group_digits, parse_output_format, parse_scenario_variable,
    write_json_artifact,
};
use crate::OutputFormat;

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct ScenarioReport {
    pub schema_version: u32,
    pub nodes: u64,
    pub length: u64,
    pub choices: u64,
    pub count: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScenarioSweepPoint {
    pub x: u64,
    pub count: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScenarioSweepReport {
    pub schema_version: u32,
    pub vary: String,
    pub fixed_nodes: u64,
    pub fixed_length: u64,
    pub fixed_choices: u64,
    pub start: u64,
    pub stop: u64,
    pub step: u64,
    pub points: Vec<ScenarioSweepPoint>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Run the `scenarios` CLI command.
///
/// Counts the cascade scenarios at a single `(n, j, k)` point.
pub(crate) fn run_scenarios_command(
    nodes: u64,
    length: u64,
    choices: u64,
    format: String,
) -> miette::Result<()> {
    let output_format = parse_output_format(&format);
    // choices counts per-segment candidates, not relays along one route,
    // so the range rules apply but the j >= k route rule does not.
    if let Err(err) = validate_params(nodes, Some(choices), None, None) {
        exit_with_error(err);
    }
    if let Err(err) = validate_params(nodes, None, Some(length), None) {
        exit_with_error(err);
    }

    let count = mss_scenario_count(length, choices, nodes);

    match output_format {
        OutputFormat::Text => {
            println!("Cascade scenarios:");
            println!("  Nodes: {nodes}");
            println!("  Cascade length: {length}");
            println!("  Choices per segment: {choices}");
            println!("  Scenarios: {}", group_digits(&count));
        }
        OutputFormat::Json => {
            let report = ScenarioReport {
                schema_version: 1,
                nodes,
                length,
                choices,
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

/// Run the `scenario-sweep` CLI command.
///
/// Sweeps one axis of the cascade-scenario count; all points of the sweep
/// share one memo cache, so overlapping subproblems are solved once.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_scenario_sweep_command(
    vary: String,
    start: u64,
    stop: u64,
    step: u64,
    fix_n: u64,
    fix_j: u64,
    fix_k: u64,
    format: String,
    out: Option<PathBuf>,
) -> miette::Result<()> {
    let axis = parse_scenario_variable(&vary);
    let range = SweepRange::new(start, stop, step).unwrap_or_else(|err| exit_with_error(err));

    let mut cache = ScenarioCache::new();
    let series = scenario_series(axis, range, fix_n, fix_j, fix_k, &mut cache)
        .unwrap_or_else(|err| exit_with_error(err));
    info!(
        points = series.len(),
        cache_entries = cache.len(),
        "scenario sweep complete"
    );

    let report = ScenarioSweepReport {
        schema_version: 1,
        vary: vary.clone(),
        fixed_nodes: fix_n,
        fixed_length: fix_j,
        fixed_choices: fix_k,
        start,
        stop,
        step,
        points: series
            .into_iter()
            .map(|(x, count)| ScenarioSweepPoint {
                x,
                count: count.to_string(),
            })
            .collect(),
    };

    match parse_output_format(&format) {
        OutputFormat::Text => {
            println!("{}", render_scenario_sweep_text(&report));
        }
        OutputFormat::Json => {
            let value = serde_json::to_value(&report).into_diagnostic()?;
            if let Some(path) = out {
                write_json_artifact(&path, &value)?;
                println!("Scenario sweep report written to {}", path.display());
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

pub(crate) fn render_scenario_sweep_text(report: &ScenarioSweepReport) -> String {
    let mut out = String::new();
    out.push_str("SCENARIO SWEEP\n");
    out.push_str(&format!(
        "Varying {} over {}..={} step {}\n",
        report.vary, report.start, report.stop, report.step
    ));
    let fixed = match report.vary.as_str() {
        "n" => format!("j = {}, k = {}", report.fixed_length, report.fixed_choices),
        "j" => format!("n = {}, k = {}", report.fixed_nodes, report.fixed_choices),
        _ => format!("n = {}, j = {}", report.fixed_nodes, report.fixed_length),
    };
    out.push_str(&format!("Fixed: {fixed}\n"));
    out.push_str("Points:\n");
    for point in &report.points {
        out.push_str(&format!(
            "  - {} = {} => {}\n",
            report.vary, point.x, point.count
        ));
    }
    if report.points.is_empty() {
        out.push_str("  (no feasible points in range)\n");
    }
    out
}
