//! Timetable autoscheduler CLI.
//!
//! Reads a timetable document, fills its grid and writes
//! `<name>-result.json` plus `<name>-result-log.txt`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_timetable::diagnostics::DiagnosticLog;
use u_timetable::document::{load_context, output_paths, write_log, write_result};
use u_timetable::models::DayBoundary;
use u_timetable::scheduler::{run, RunOptions};
use u_timetable::validation::validate_input;
use u_timetable::{Policy, PolicyConfig};

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Fill a conference timetable grid with sessions and events")]
struct Cli {
    /// Input timetable document (JSON)
    input: PathBuf,

    /// Policy configuration (TOML); the conference policy when omitted
    policy: Option<PathBuf>,

    /// Clear every assignment instead of scheduling
    #[arg(long)]
    unschedule_all: bool,

    /// Re-attempt leftovers with relaxable conditions dropped one priority at a time
    #[arg(long, alias = "manage-left-sessions")]
    relax_remaining: bool,

    /// Compare calendar days in UTC instead of local time
    #[arg(long)]
    utc_days: bool,

    /// Directory for the result files (defaults to the working directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "u_timetable=debug" } else { "u_timetable=info" })
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let started = Instant::now();

    let config = PolicyConfig::load(cli.policy.as_deref()).context("loading policy configuration")?;
    let policy = Policy::from_config(&config)?;

    let mut ctx = load_context(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    if let Err(errors) = validate_input(&ctx) {
        for e in &errors {
            error!(kind = ?e.kind, "{}", e.message);
        }
        bail!("{} has {} invalid reference(s)", cli.input.display(), errors.len());
    }

    let options = RunOptions::default()
        .with_unschedule_all(cli.unschedule_all)
        .with_relax_remaining(cli.relax_remaining)
        .with_day_boundary(if cli.utc_days { DayBoundary::Utc } else { DayBoundary::Local });

    let mut log = DiagnosticLog::new();
    let outcome = run(&mut ctx, &policy, options, &mut log)?;

    let (result_path, log_path) = output_paths(&cli.input, cli.output_dir.as_deref());
    write_result(&result_path, &ctx.result())
        .with_context(|| format!("writing {}", result_path.display()))?;
    write_log(&log_path, &log).with_context(|| format!("writing {}", log_path.display()))?;

    let kpi = &outcome.kpi;
    info!(
        sessions_scheduled = kpi.sessions_scheduled,
        sessions_unscheduled = kpi.sessions_unscheduled,
        events_scheduled = kpi.events_scheduled,
        events_unscheduled = kpi.events_unscheduled,
        occupancy_rate = kpi.occupancy_rate,
        diagnostics = log.len(),
        "timetable written to {}",
        result_path.display()
    );
    println!("Elapsed: {:.3}s", started.elapsed().as_secs_f64());

    Ok(())
}
