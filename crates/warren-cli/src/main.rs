#![doc = include_str!("../README.md")]

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const CLI_LONG_ABOUT: &str =
    "Route-counting and interception-probability statistics for anonymity overlays.\n\n\
    Typical session:\n  \
    1. warren routes --formula tor -n 25 -j 3\n  \
    2. warren intercept -n 25 -j 3 -m 4\n  \
    3. warren intercept-sweep --vary m --start 0 --stop 20 --fix-n 25 --fix-j 3\n\n\
    Use --formula / --policy to pick the route model (tor, i2p, no-repeat, with-repeat).\n\
    Use --format json (and --out on sweeps) for machine-readable reports.";

#[derive(Parser)]
#[command(name = "warren")]
#[command(about = "Route-counting and interception-probability statistics for anonymity overlays")]
#[command(long_about = CLI_LONG_ABOUT)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the routes of one topology at a single parameter point
    #[command(display_order = 10)]
    Routes {
        /// Counting formula: tor | i2p | no-repeat | with-repeat
        #[arg(long, default_value = "with-repeat")]
        formula: String,

        /// Total node count n, endpoints included
        #[arg(short = 'n', long)]
        nodes: u64,

        /// Route length parameter j (relay count or cascade length)
        #[arg(short = 'j', long)]
        length: u64,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Sweep one axis of a route count and report the series
    #[command(display_order = 11)]
    RouteSweep {
        /// Counting formula: tor | i2p | no-repeat | with-repeat
        #[arg(long, default_value = "with-repeat")]
        formula: String,

        /// Swept axis: n | j
        #[arg(long, default_value = "n")]
        vary: String,

        /// Inclusive sweep start
        #[arg(long, default_value_t = 3)]
        start: u64,

        /// Inclusive sweep stop
        #[arg(long, default_value_t = 25)]
        stop: u64,

        /// Sweep step
        #[arg(long, default_value_t = 1)]
        step: u64,

        /// Node count held fixed while varying j
        #[arg(long, default_value_t = 25)]
        fix_n: u64,

        /// Length parameter held fixed while varying n
        #[arg(long, default_value_t = 3)]
        fix_j: u64,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,

        /// Optional JSON output path (used when --format json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Interception and success probabilities at a single parameter point
    #[command(display_order = 12)]
    Intercept {
        /// Route model: tor | i2p | no-repeat | with-repeat
        #[arg(long, default_value = "with-repeat")]
        policy: String,

        /// Total node count n, endpoints included
        #[arg(short = 'n', long)]
        nodes: u64,

        /// Route length parameter j (relay count or cascade length)
        #[arg(short = 'j', long)]
        length: u64,

        /// Compromised node count m
        #[arg(short = 'm', long)]
        compromised: u64,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Sweep one axis of VP or VUS and report the series
    #[command(display_order = 13)]
    InterceptSweep {
        /// Route model: tor | i2p | no-repeat | with-repeat
        #[arg(long, default_value = "with-repeat")]
        policy: String,

        /// Reported probability: vp | vus
        #[arg(long, default_value = "vp")]
        metric: String,

        /// Swept axis: n | m
        #[arg(long, default_value = "m")]
        vary: String,

        /// Inclusive sweep start
        #[arg(long, default_value_t = 0)]
        start: u64,

        /// Inclusive sweep stop
        #[arg(long, default_value_t = 20)]
        stop: u64,

        /// Sweep step
        #[arg(long, default_value_t = 1)]
        step: u64,

        /// Node count held fixed while varying m
        #[arg(long, default_value_t = 25)]
        fix_n: u64,

        /// Length parameter held fixed on both axes
        #[arg(long, default_value_t = 3)]
        fix_j: u64,

        /// Compromised count held fixed while varying n
        #[arg(long, default_value_t = 1)]
        fix_m: u64,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,

        /// Optional JSON output path (used when --format json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Count cascade scenarios N(j, k, n) at a single parameter point
    #[command(display_order = 14)]
    Scenarios {
        /// Total node count n, endpoints included
        #[arg(short = 'n', long)]
        nodes: u64,

        /// Cascade length j
        #[arg(short = 'j', long)]
        length: u64,

        /// Per-segment choice parameter k
        #[arg(short = 'k', long)]
        choices: u64,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Sweep one axis of the cascade-scenario count
    #[command(display_order = 15)]
    ScenarioSweep {
        /// Swept axis: n | j | k
        #[arg(long, default_value = "n")]
        vary: String,

        /// Inclusive sweep start
        #[arg(long, default_value_t = 3)]
        start: u64,

        /// Inclusive sweep stop
        #[arg(long, default_value_t = 25)]
        stop: u64,

        /// Sweep step
        #[arg(long, default_value_t = 1)]
        step: u64,

        /// Node count held fixed while varying j or k
        #[arg(long, default_value_t = 15)]
        fix_n: u64,

        /// Cascade length held fixed while varying n or k
        #[arg(long, default_value_t = 3)]
        fix_j: u64,

        /// Choice parameter held fixed while varying n or j
        #[arg(long, default_value_t = 2)]
        fix_k: u64,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,

        /// Optional JSON output path (used when --format json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate shell completions for the given shell
    #[command(display_order = 99)]
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, elvish, powershell)
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Output rendering selected by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Routes {
            formula,
            nodes,
            length,
            format,
        } => {
            commands::routes::run_routes_command(formula, nodes, length, format)?;
        }
        Commands::RouteSweep {
            formula,
            vary,
            start,
            stop,
            step,
            fix_n,
            fix_j,
            format,
            out,
        } => {
            commands::routes::run_route_sweep_command(
                formula, vary, start, stop, step, fix_n, fix_j, format, out,
            )?;
        }
        Commands::Intercept {
            policy,
            nodes,
            length,
            compromised,
            format,
        } => {
            commands::intercept::run_intercept_command(policy, nodes, length, compromised, format)?;
        }
        Commands::InterceptSweep {
            policy,
            metric,
            vary,
            start,
            stop,
            step,
            fix_n,
            fix_j,
            fix_m,
            format,
            out,
        } => {
            commands::intercept::run_intercept_sweep_command(
                policy, metric, vary, start, stop, step, fix_n, fix_j, fix_m, format, out,
            )?;
        }
        Commands::Scenarios {
            nodes,
            length,
            choices,
            format,
        } => {
            commands::scenarios::run_scenarios_command(nodes, length, choices, format)?;
        }
        Commands::ScenarioSweep {
            vary,
            start,
            stop,
            step,
            fix_n,
            fix_j,
            fix_k,
            format,
            out,
        } => {
            commands::scenarios::run_scenario_sweep_command(
                vary, start, stop, step, fix_n, fix_j, fix_k, format, out,
            )?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "warren", &mut std::io::stdout());
        }
    }

    Ok(())
}
