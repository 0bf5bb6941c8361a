//! KRP Sweep Binary
//!
//! Enumerates every graph on `KRP_NODES` nodes, simulates the Key Relay
//! Protocol on each, and prints the sweep report as JSON on stdout.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `KRP_NODES`: node count of the universe (default: 3, max: 6)
//! - `KRP_SEED`: base seed for local keys (default: 0)
//! - `KRP_KEY_WIDTH`: local key width in bits (default: 1)
//! - `KRP_PAIRS`: `first_two` | `all_pairs` (default: first_two)
//! - `KRP_ADVERSARY`: `passive` | `all_edges` | `every_subset` (default: all_edges)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! KRP_NODES=4 KRP_ADVERSARY=every_subset cargo run --bin krp_sweep > report.json
//! ```

use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use krp_verifier::{run_sweep, AdversaryModel, KeyWidth, PairSelection, SweepConfig};

/// Initialize the tracing subscriber with JSON or pretty format.
///
/// Logs go to stderr; stdout carries the report.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "krp_sweep=info,krp_verifier=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, String> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|_| format!("{key}: cannot parse {raw:?}")),
        _ => Ok(default),
    }
}

/// Load the sweep configuration from environment variables.
fn load_config() -> Result<SweepConfig, String> {
    let defaults = SweepConfig::default();

    let key_bits: u32 = env_parse("KRP_KEY_WIDTH", defaults.key_width.bits())?;
    let key_width = KeyWidth::new(key_bits).map_err(|e| e.to_string())?;

    let pairs = match std::env::var("KRP_PAIRS") {
        Ok(raw) => PairSelection::from_str(&raw).ok_or_else(|| format!("KRP_PAIRS: unknown selection {raw:?}"))?,
        Err(_) => defaults.pairs,
    };
    let adversary = match std::env::var("KRP_ADVERSARY") {
        Ok(raw) => AdversaryModel::from_str(&raw).ok_or_else(|| format!("KRP_ADVERSARY: unknown model {raw:?}"))?,
        Err(_) => defaults.adversary,
    };

    Ok(SweepConfig {
        n_nodes: env_parse("KRP_NODES", defaults.n_nodes)?,
        seed: env_parse("KRP_SEED", defaults.seed)?,
        key_width,
        pairs,
        adversary,
        ..defaults
    })
}

fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        n_nodes = config.n_nodes,
        seed = config.seed,
        pairs = %config.pairs,
        adversary = %config.adversary,
        params_hash = %config.params_hash(),
        "Starting KRP sweep"
    );

    let start = Instant::now();
    let report = match run_sweep(&config) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "sweep failed");
            return ExitCode::FAILURE;
        }
    };

    info!(
        latency_ms = start.elapsed().as_millis() as u64,
        report_hash = %report.report_hash,
        breached_graphs = report.breached_graphs().len(),
        "sweep finished"
    );

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to serialize report");
            ExitCode::FAILURE
        }
    }
}
