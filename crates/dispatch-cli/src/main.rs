use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dispatch_cli::args::{parse_point, read_input};
use dispatch_cli::output::{render_eta_text, render_report_text, write_json, OutputFormat};
use dispatch_cli::terminal::ColorPalette;
use dispatch_lib::{
    assign_orders, estimate_trip, AssignmentRequest, GeoPoint, SolverDefaults,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Courier assignment and ETA utilities")]
struct Cli {
    /// Fallback location for records without coordinates, as LAT,LNG.
    #[arg(long, global = true, value_parser = parse_point)]
    depot: Option<GeoPoint>,

    /// Assumed travel speed in km/h.
    #[arg(long, global = true)]
    speed: Option<f64>,

    /// Capacity for couriers whose record has none.
    #[arg(long, global = true)]
    max_orders: Option<i64>,

    /// Upper bound on assignment rounds.
    #[arg(long, global = true)]
    max_rounds: Option<usize>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assign the orders in a request document to its couriers.
    Assign {
        /// Request file (JSON), or `-` for stdin.
        input: PathBuf,
    },
    /// Estimate distance and travel time between two points.
    Eta {
        /// Courier position as LAT,LNG.
        #[arg(long = "from", value_parser = parse_point)]
        from: GeoPoint,
        /// Order position as LAT,LNG.
        #[arg(long = "to", value_parser = parse_point)]
        to: GeoPoint,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let defaults = resolve_defaults(&cli)?;

    match &cli.command {
        Command::Assign { input } => handle_assign(input, &defaults, cli.format),
        Command::Eta { from, to } => handle_eta(*from, *to, &defaults, cli.format),
    }
}

/// Environment defaults with command-line overrides applied on top.
fn resolve_defaults(cli: &Cli) -> Result<SolverDefaults> {
    let mut defaults =
        SolverDefaults::from_env().context("invalid DISPATCH_* environment configuration")?;
    if let Some(depot) = cli.depot {
        defaults.depot = depot;
    }
    if let Some(speed) = cli.speed {
        defaults.speed_kmh = speed;
    }
    if let Some(max_orders) = cli.max_orders {
        defaults.max_orders_per_courier = max_orders;
    }
    if let Some(max_rounds) = cli.max_rounds {
        anyhow::ensure!(max_rounds > 0, "--max-rounds must be at least 1");
        defaults.max_rounds = max_rounds;
    }
    Ok(defaults)
}

fn handle_assign(input: &Path, defaults: &SolverDefaults, format: OutputFormat) -> Result<()> {
    let body = read_input(input)?;
    let request = AssignmentRequest::from_json_slice(&body)
        .with_context(|| format!("failed to decode assignment request from {}", input.display()))?;
    let report = assign_orders(&request, defaults);

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut stdout, &report)?,
        OutputFormat::Text => {
            stdout.write_all(render_report_text(&report, &ColorPalette::detect()).as_bytes())?
        }
    }
    Ok(())
}

fn handle_eta(
    from: GeoPoint,
    to: GeoPoint,
    defaults: &SolverDefaults,
    format: OutputFormat,
) -> Result<()> {
    let estimate = estimate_trip(from, to, defaults.speed_kmh);

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut stdout, &estimate)?,
        OutputFormat::Text => {
            stdout.write_all(render_eta_text(&estimate, &ColorPalette::detect()).as_bytes())?
        }
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
