//! console — operator front end for the emergency dispatch engine.
//!
//! Reads incidents interactively, then dispatches the whole batch in one run
//! against the built-in Delhi fleet and prints a route table per incident.
//! Routes come from an OSRM server unless `--offline` is given.
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); tables go to stdout.

mod prompt;

#[cfg(test)]
mod tests;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use er_core::DispatchConfig;
use er_dispatch::{DispatchEngine, DispatchObserver, DispatchReport, RunSummary};
use er_output::{CsvWriter, ReportObserver, TableObserver};
use er_registry::{ProximityIndex, delhi_fleet};
use er_routing::{
    OsrmClient, RouteAnnotator, RoutingService, StraightLineRouting, TimeoutRouting, UniformTraffic,
};

use prompt::Prompter;

const BANNER: &[&str] = &[
    "                           --------------------EMERGENCY RESPONSE SYSTEM---------------------",
    "   The Emergency Response System (ERS) is a software designed to assist individuals and organizations in responding",
    "   effectively to emergency situations. It aims to provide timely alerts, location tracking, and resource management",
    "                                to minimize the impact of disasters and emergency events",
];

// ── CLI ───────────────────────────────────────────────────────────────────────

fn cli() -> Command {
    Command::new("console")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Emergency Response System operator console")
        .arg(
            Arg::new("seed")
                .long("seed")
                .env("ER_SEED")
                .value_name("SEED")
                .help("Root seed for traffic factors")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .env("ER_ROUTE_TIMEOUT_MS")
                .value_name("MS")
                .help("Bound on a single routing call, in milliseconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("osrm-url")
                .long("osrm-url")
                .env("ER_OSRM_URL")
                .value_name("URL")
                .help("Base URL of the OSRM routing server"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .env("ER_OFFLINE")
                .help("Estimate straight-line routes at 40 km/h instead of calling OSRM")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv-dir")
                .long("csv-dir")
                .env("ER_CSV_DIR")
                .value_name("DIR")
                .help("Also write dispatches.csv and route_steps.csv to DIR")
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Defaults overridden by whatever flags were given.
fn build_config(matches: &ArgMatches) -> DispatchConfig {
    let mut config = DispatchConfig::default();
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = seed;
    }
    if let Some(&ms) = matches.get_one::<u64>("timeout-ms") {
        config.route_timeout_ms = ms;
    }
    if let Some(url) = matches.get_one::<String>("osrm-url") {
        config.osrm_base_url = url.clone();
    }
    config
}

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("initialise logging")?;
    Ok(())
}

fn routing_service(config: &DispatchConfig, offline: bool) -> Result<Box<dyn RoutingService>> {
    if offline {
        tracing::info!("offline mode: straight-line routing");
        return Ok(Box::new(StraightLineRouting::default()));
    }
    let client = OsrmClient::from_config(config).context("build OSRM client")?;
    tracing::info!(url = %config.osrm_base_url, timeout_ms = config.route_timeout_ms, "routing via OSRM");
    Ok(Box::new(TimeoutRouting::new(client, config.route_timeout())))
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Console tables, plus CSV files when requested.
struct ConsoleObserver<W: Write> {
    table: TableObserver<W>,
    csv:   Option<ReportObserver<CsvWriter>>,
}

impl<W: Write> ConsoleObserver<W> {
    fn new(out: W, csv_dir: Option<&Path>) -> Result<Self> {
        let csv = match csv_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("create output directory {}", dir.display()))?;
                let writer = CsvWriter::new(dir)
                    .with_context(|| format!("open CSV files in {}", dir.display()))?;
                Some(ReportObserver::new(writer))
            }
            None => None,
        };
        Ok(Self { table: TableObserver::new(out), csv })
    }

    /// Surface the first error either sink hit during the run.
    fn finish(mut self) -> Result<()> {
        if let Some(e) = self.table.take_error() {
            return Err(e).context("write dispatch tables");
        }
        if let Some(e) = self.csv.as_mut().and_then(|csv| csv.take_error()) {
            return Err(e).context("write CSV output");
        }
        Ok(())
    }
}

impl<W: Write> DispatchObserver for ConsoleObserver<W> {
    fn on_report(&mut self, report: &DispatchReport) {
        self.table.on_report(report);
        if let Some(csv) = &mut self.csv {
            csv.on_report(report);
        }
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        self.table.on_run_end(summary);
        if let Some(csv) = &mut self.csv {
            csv.on_run_end(summary);
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging()?;

    let config = build_config(&matches);
    let offline = matches.get_flag("offline");
    let csv_dir = matches.get_one::<PathBuf>("csv-dir").cloned();

    let registry = delhi_fleet().context("load resource fleet")?;
    let proximity = ProximityIndex::build(&registry, config.proximity_threshold_km);
    tracing::info!(
        resources = registry.len(),
        links = proximity.link_count(),
        threshold_km = proximity.threshold_km(),
        "resource fleet loaded"
    );
    let annotator = RouteAnnotator::new(
        routing_service(&config, offline)?,
        UniformTraffic::from_config(&config),
    );
    let mut engine = DispatchEngine::new(config, registry, annotator).context("invalid configuration")?;

    let stdout = io::stdout();
    {
        let mut out = stdout.lock();
        for line in BANNER {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
    }

    let incidents = Prompter::new(io::stdin().lock(), stdout.lock())
        .read_incidents()
        .context("read incidents")?;
    if incidents.is_empty() {
        tracing::info!("no incidents entered");
        return Ok(());
    }
    for incident in incidents {
        engine.add_incident(incident);
    }

    let mut observer = ConsoleObserver::new(stdout.lock(), csv_dir.as_deref())?;
    let run = engine.dispatch_all(&mut observer);
    observer.finish()?;

    if let Some(dir) = &csv_dir {
        tracing::info!(dir = %dir.display(), incidents = run.summary.total(), "CSV output written");
    }
    Ok(())
}
