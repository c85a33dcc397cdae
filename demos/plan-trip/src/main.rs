//! `plan-trip`: build a jet-lag plan for one itinerary and print it as JSON.
//!
//! The itinerary is a JSON array of segments or a CSV file with the header
//! `id,flight_number,origin,destination,departure_time,arrival_time,duration`.
//! Continuity warnings go to stderr; the plan goes to stdout.
//!
//! Run with:
//!   cargo run -p plan-trip -- demos/plan-trip/data/jfk-lhr-sin.json \
//!       --profile demos/plan-trip/data/profile.json \
//!       --config demos/plan-trip/data/planner.toml \
//!       --out ./plan
//!
//! `--out DIR` also writes the plan as two CSV tables (`schedule.csv` and
//! `recommendations.csv`) into `DIR`.
//!
//! `--sweep` plans the itinerary for every bio-profile (in parallel) and
//! prints a one-line summary instead of the plan.
//!
//! Set `RUST_LOG=debug` to see every pipeline stage.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jl_core::{BioProfile, Itinerary, PlannerConfig};
use jl_plan::{PlannerBuilder, ScienceLink, TracingObserver};
use jl_schedule::load_itinerary_csv;

mod export;

#[cfg(test)]
mod tests;

use export::{CsvExport, ExportObserver};

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "plan-trip", version)]
#[command(about = "Build a jet-lag plan for one itinerary and print it as JSON")]
struct Args {
    /// Itinerary: a JSON array of segments or a CSV file
    itinerary: PathBuf,

    /// Bio-profile JSON (defaults to the questionnaire's initial answers)
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Planner settings TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write schedule.csv and recommendations.csv into this directory
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Plan every bio-profile in parallel and print a one-line summary
    #[arg(long, conflicts_with = "out")]
    sweep: bool,
}

// ── Loading ───────────────────────────────────────────────────────────────────

fn load_itinerary(path: &Path) -> Result<Itinerary> {
    let is_csv = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        return load_itinerary_csv(path).with_context(|| format!("loading {}", path.display()));
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing itinerary {}", path.display()))
}

fn load_profile(path: Option<&Path>) -> Result<BioProfile> {
    let Some(path) = path else {
        return Ok(BioProfile::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing profile {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn science_links() -> Vec<ScienceLink> {
    vec![
        ScienceLink::new(
            "Light is the strongest clock signal",
            "https://en.wikipedia.org/wiki/Phase_response_curve",
            "Light before your body-clock minimum delays it; light after advances it.",
        ),
        ScienceLink::new(
            "Why eastbound is harder",
            "https://en.wikipedia.org/wiki/Jet_lag",
            "The clock delays more easily than it advances, so eastward trips take longer to adapt to.",
        ),
    ]
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let itinerary = load_itinerary(&args.itinerary)?;
    let profile = load_profile(args.profile.as_deref())?;
    let config = load_config(args.config.as_deref())?;

    let planner = PlannerBuilder::new()
        .config(config)
        .science_links(science_links())
        .build()
        .context("building planner")?;

    if args.sweep {
        let trips: Vec<_> = BioProfile::all().map(|p| (itinerary.clone(), p)).collect();
        let results = planner.plan_batch(&trips);
        let mut sizes = Vec::with_capacity(results.len());
        for result in results {
            sizes.push(result.context("planning sweep")?.plan.schedule.len());
        }
        let min = sizes.iter().min().copied().unwrap_or(0);
        let max = sizes.iter().max().copied().unwrap_or(0);
        println!("{} profiles planned, {min}..={max} events per plan", sizes.len());
        return Ok(());
    }

    let outcome = match &args.out {
        Some(dir) => {
            let mut observer = ExportObserver::new(CsvExport::create(dir)?);
            let outcome = planner.plan_observed(&itinerary, &profile, &mut observer)?;
            if let Some(e) = observer.take_error() {
                return Err(e.context("writing CSV export"));
            }
            tracing::info!(dir = %dir.display(), "plan exported");
            outcome
        }
        None => planner.plan_observed(&itinerary, &profile, &mut TracingObserver)?,
    };

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    println!("{}", serde_json::to_string_pretty(&outcome.plan)?);
    Ok(())
}
