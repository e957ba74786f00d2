//! Online Portfolio Gym - main binary
//!
//! Runs one online portfolio selection backtest over a directory of
//! per-asset CSV price files and writes a report.
//!
//! # Configuration
//!
//! The run config is resolved in layers, later ones winning:
//!
//! ```text
//! defaults (EG + Dummy, 2000-01-01 .. 2017-08-31)
//!   -> --preset <name>  or  --config <file.toml>
//!   -> individual flags / OPS_* environment variables
//! ```

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use simulation::{MetricsHook, PriceSource, RunSummary, Simulation};
use storage::{ReportWriter, load_price_directory};
use tracing::info;
use types::NaiveDate;

pub use config::{Preset, RunConfig};

/// Online Portfolio Gym - expert-weighted portfolio backtests
#[derive(Parser, Debug)]
#[command(name = "online-portfolio")]
#[command(about = "Backtest online portfolio selection agents over daily price files")]
#[command(version)]
struct Args {
    /// TOML run config
    #[arg(long, env = "OPS_CONFIG", conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Named reference run
    #[arg(long, value_enum, env = "OPS_PRESET")]
    preset: Option<Preset>,

    /// Directory of <asset>.csv price files
    #[arg(long, env = "OPS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Price column to read from each file
    #[arg(long, env = "OPS_PRICE_COLUMN")]
    price_column: Option<String>,

    /// First date to simulate (YYYY-MM-DD)
    #[arg(long, env = "OPS_START", value_parser = parse_date_arg)]
    start: Option<NaiveDate>,

    /// Last date to simulate (YYYY-MM-DD)
    #[arg(long, env = "OPS_END", value_parser = parse_date_arg)]
    end: Option<NaiveDate>,

    /// Initial wealth
    #[arg(long, env = "OPS_WEALTH")]
    wealth: Option<f64>,

    /// Root directory for run reports
    #[arg(long, env = "OPS_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Skip writing report files
    #[arg(long, env = "OPS_NO_REPORT")]
    no_report: bool,

    /// Log per-period detail
    #[arg(short, long, env = "OPS_VERBOSE")]
    verbose: bool,
}

fn parse_date_arg(raw: &str) -> std::result::Result<NaiveDate, String> {
    types::parse_date(raw).map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Apply config file or preset, then individual overrides.
fn resolve_config(args: &Args) -> Result<RunConfig> {
    let mut config = match (&args.config, args.preset) {
        (Some(path), _) => RunConfig::load(path)?,
        (None, Some(preset)) => RunConfig::preset(preset),
        (None, None) => RunConfig::default(),
    };

    if let Some(dir) = &args.data_dir {
        config = config.data_dir(dir);
    }
    if let Some(column) = &args.price_column {
        config = config.price_column(column);
    }
    if let Some(start) = args.start {
        config = config.start(start);
    }
    if let Some(end) = args.end {
        config = config.end(end);
    }
    if let Some(wealth) = args.wealth {
        config = config.wealth(wealth);
    }
    if let Some(dir) = &args.output_dir {
        config = config.output_dir(dir);
    }
    if args.no_report {
        config = config.write_report(false);
    }
    Ok(config)
}

/// Run the backtest described by `config`, writing a report if enabled.
fn run(config: &RunConfig) -> Result<RunSummary> {
    let sources: Vec<Box<dyn PriceSource>> =
        load_price_directory(&config.data_dir, &config.price_column)
            .with_context(|| format!("failed to load prices from {}", config.data_dir.display()))?
            .into_iter()
            .map(|source| Box::new(source) as Box<dyn PriceSource>)
            .collect();

    let mut sim = Simulation::from_configs(
        sources,
        &config.expert,
        &config.agent,
        config.simulation.clone(),
    )
    .context("failed to set up simulation")?;

    let metrics = Arc::new(MetricsHook::new());
    sim.add_hook(metrics.clone());

    let started = Instant::now();
    let reason = sim.run().context("simulation aborted")?;
    let snapshot = metrics.snapshot();
    info!(
        %reason,
        periods = snapshot.total_periods,
        skipped = snapshot.skipped_periods,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run finished"
    );

    let summary = sim.summary();
    if config.write_report {
        let dir = ReportWriter::new(&config.output_dir)
            .write(&summary, sim.history())
            .context("failed to write report")?;
        eprintln!("Report written to {}", dir.display());
    }
    Ok(summary)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = resolve_config(&args)?;

    let date = |d: Option<NaiveDate>| d.map_or_else(|| "open".to_string(), |d| d.to_string());
    eprintln!("╔═══════════════════════════════════════════════════════════════════════╗");
    eprintln!("║  Online Portfolio Gym                                                 ║");
    eprintln!("╠═══════════════════════════════════════════════════════════════════════╣");
    eprintln!("  Data:    {} ({})", config.data_dir.display(), config.price_column);
    eprintln!("  Agent:   {:?}", config.agent);
    eprintln!("  Expert:  {:?}", config.expert);
    eprintln!(
        "  Dates:   {} .. {}",
        date(config.simulation.start_date),
        date(config.simulation.end_date)
    );
    eprintln!("  Wealth:  {}", config.simulation.initial_wealth);
    eprintln!("╚═══════════════════════════════════════════════════════════════════════╝");
    eprintln!();

    let summary = run(&config)?;

    eprintln!();
    eprintln!("╔═══════════════════════════════════════════════════════════════════════╗");
    eprintln!("║  Run Complete                                                         ║");
    eprintln!("╠═══════════════════════════════════════════════════════════════════════╣");
    for line in summary.to_string().lines() {
        eprintln!("  {line}");
    }
    eprintln!("╚═══════════════════════════════════════════════════════════════════════╝");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["online-portfolio"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_preset() {
        let config = resolve_config(&args(&[
            "--preset",
            "eg-mean-reversion",
            "--start",
            "2010-01-04",
            "--wealth",
            "10",
            "--no-report",
        ]))
        .unwrap();
        assert_eq!(config.expert, RunConfig::eg_mean_reversion().expert);
        assert_eq!(
            config.simulation.start_date,
            types::parse_date("2010-01-04").ok()
        );
        assert_eq!(config.simulation.initial_wealth, 10.0);
        assert!(!config.write_report);
    }

    #[test]
    fn test_rejects_bad_date() {
        let argv = ["online-portfolio", "--start", "01/04/2010"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_config_and_preset_conflict() {
        let argv = ["online-portfolio", "--config", "a.toml", "--preset", "buy-hold"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_end_to_end_run_writes_report() {
        let data = tempfile::tempdir().unwrap();
        fs::write(
            data.path().join("a.csv"),
            "date,adj_close\n2000-01-03,100\n2000-01-04,110\n2000-01-05,121\n",
        )
        .unwrap();
        fs::write(
            data.path().join("b.csv"),
            "date,adj_close\n2000-01-03,100\n2000-01-04,90\n2000-01-05,81\n",
        )
        .unwrap();
        let out = tempfile::tempdir().unwrap();

        let config = RunConfig::constant_rebalancer()
            .data_dir(data.path())
            .output_dir(out.path());
        let summary = run(&config).unwrap();

        assert!((summary.final_wealth - 1.0).abs() < 1e-12);
        assert_eq!(summary.periods, 3);
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
    }
}
