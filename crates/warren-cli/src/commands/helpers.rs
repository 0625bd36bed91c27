// Shared helper functions used across CLI command handlers.
//
// These parse/convert CLI string arguments into typed enum values
// and provide report-formatting and JSON-artifact utilities.

use std::fs;
use std::path::PathBuf;

use miette::IntoDiagnostic;
use num::bigint::BigInt;
use serde_json::Value;

use warren_prob::{InterceptVariable, Metric, Policy, RouteVariable, ScenarioVariable};

use crate::OutputFormat;

pub(crate) fn parse_policy(raw: &str) -> Policy {
    match raw {
        "tor" => Policy::Tor,
        "i2p" => Policy::I2p,
        "no-repeat" => Policy::NoRepeat,
        "with-repeat" => Policy::WithRepeat,
        other => {
            eprintln!(
                "Unknown route model: {other}. Use 'tor', 'i2p', 'no-repeat', or 'with-repeat'."
            );
            std::process::exit(1);
        }
    }
}

pub(crate) fn parse_metric(raw: &str) -> Metric {
    match raw {
        "vp" => Metric::Vp,
        "vus" => Metric::Vus,
        other => {
            eprintln!("Unknown metric: {other}. Use 'vp' or 'vus'.");
            std::process::exit(1);
        }
    }
}

pub(crate) fn parse_route_variable(raw: &str) -> RouteVariable {
    match raw {
        "n" => RouteVariable::Nodes,
        "j" => RouteVariable::Length,
        other => {
            eprintln!("Unknown sweep axis: {other}. Use 'n' or 'j'.");
            std::process::exit(1);
        }
    }
}

pub(crate) fn parse_intercept_variable(raw: &str) -> InterceptVariable {
    match raw {
        "n" => InterceptVariable::Nodes,
        "m" => InterceptVariable::Compromised,
        other => {
            eprintln!("Unknown sweep axis: {other}. Use 'n' or 'm'.");
            std::process::exit(1);
        }
    }
}

pub(crate) fn parse_scenario_variable(raw: &str) -> ScenarioVariable {
    match raw {
        "n" => ScenarioVariable::Nodes,
        "j" => ScenarioVariable::Length,
        "k" => ScenarioVariable::Choices,
        other => {
            eprintln!("Unknown sweep axis: {other}. Use 'n', 'j', or 'k'.");
            std::process::exit(1);
        }
    }
}

pub(crate) fn parse_output_format(raw: &str) -> OutputFormat {
    match raw {
        "text" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        other => {
            eprintln!("Unknown output format: {other}. Use 'text' or 'json'.");
            std::process::exit(1);
        }
    }
}

/// Print a domain error the way interactive users expect and exit nonzero.
pub(crate) fn exit_with_error(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

/// Decimal rendering with thousands separators, sign preserved.
pub(crate) fn group_digits(value: &BigInt) -> String {
    let raw = value.to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

pub(crate) fn write_json_artifact(path: &PathBuf, value: &Value) -> miette::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(path, serde_json::to_string_pretty(value).into_diagnostic()?).into_diagnostic()?;
    Ok(())
}
