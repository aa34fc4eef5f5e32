//! EcoRoute CLI
//!
//! Route lookup and CO₂ comparison from the command line.

#![allow(clippy::print_stdout)]

mod wiring;

use std::path::PathBuf;

use anyhow::Context;
use application::{CalculatedRoute, EmissionsService, RouteOutcome, Slot};
use clap::{Args, Parser, Subcommand};
use domain::{BoundingBox, Coordinate, SavingsResult, TravelMode, polyline};
use infrastructure::{AppConfig, MapSnapshot, init_logging};
use serde::Serialize;
use tracing::debug;

/// EcoRoute CLI
#[derive(Parser)]
#[command(name = "ecoroute")]
#[command(author, version, about = "EcoRoute route and CO₂ savings CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./ecoroute.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a route between two places
    ///
    /// Example: ecoroute route "Madison, WI" "Chicago, IL" --mode transit --savings
    Route(RouteArgs),

    /// Compare CO₂ emissions of travel modes over a distance in miles
    ///
    /// Example: ecoroute savings "5.3 mi" --mode driving
    Savings {
        /// Distance text; the leading number is read as miles
        #[arg(allow_hyphen_values = true)]
        distance: String,

        /// Mode actually taken
        #[arg(short, long, default_value = "driving")]
        mode: TravelMode,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decode an encoded polyline into coordinates
    Decode {
        /// Encoded polyline
        polyline: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the position the map would open on
    Locate {
        /// Current position instead of the configured source
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        here: Option<Coordinate>,
    },

    /// Suggest addresses for partial input
    Suggest {
        /// Partial address
        query: String,
    },

    /// Show the effective configuration
    Config {
        /// Validate and report problems instead of printing
        #[arg(long)]
        check: bool,
    },
}

#[derive(Args)]
struct RouteArgs {
    /// Where the route starts
    origin: String,

    /// Where the route ends
    destination: String,

    /// Travel mode (driving, walking, bicycling, transit)
    #[arg(short, long, default_value = "driving")]
    mode: TravelMode,

    /// Routing backend URL (overrides configuration)
    #[arg(short, long)]
    url: Option<String>,

    /// Current position instead of the configured source
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    here: Option<Coordinate>,

    /// Also compare CO₂ emissions for the route distance
    #[arg(long)]
    savings: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Determine log filter override from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[derive(Serialize)]
struct RouteReport<'a> {
    origin: &'a str,
    destination: &'a str,
    mode: TravelMode,
    distance: &'a str,
    duration: &'a str,
    points: usize,
    bounds: Option<BoundingBox>,
    center: Option<Coordinate>,
    zoom: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    savings: Option<SavingsResult>,
}

impl<'a> RouteReport<'a> {
    fn new(route: &'a CalculatedRoute, view: &MapSnapshot, savings: Option<SavingsResult>) -> Self {
        Self {
            origin: route.request.origin().as_str(),
            destination: route.request.destination().as_str(),
            mode: route.request.mode(),
            distance: &route.result.distance,
            duration: &route.result.duration,
            points: route.path.len(),
            bounds: view.fitted_bounds,
            center: view.center,
            zoom: view.zoom,
            savings,
        }
    }
}

fn print_savings(result: &SavingsResult) {
    println!(
        "🌱 CO₂ saved compared to {} over {:.2} km:",
        result.active_mode.label(),
        result.distance_km
    );
    for line in result.format_lines() {
        println!("   {line}");
    }
}

async fn run_route(mut config: AppConfig, args: RouteArgs) -> anyhow::Result<()> {
    let RouteArgs {
        origin,
        destination,
        mode,
        url,
        here,
        savings,
        json,
    } = args;
    if let Some(url) = url {
        config.routing.base_url = url;
    }
    let page = wiring::build_map_page(&config, here)?;
    if here.is_some() {
        page.session.start().await;
    }

    page.session.places().set_text(Slot::Origin, origin);
    page.session.places().set_text(Slot::Destination, destination);

    let route = match page.session.calculate(mode).await {
        Ok(RouteOutcome::Completed(route)) => route,
        Ok(RouteOutcome::Superseded { id, latest }) => {
            anyhow::bail!("route request {id} was superseded by {latest}")
        },
        Err(e) => {
            debug!(error = %e, "Route calculation failed");
            println!("❌ {}", e.user_message());
            std::process::exit(1);
        },
    };

    let emissions = EmissionsService::new();
    let comparison = if savings {
        page.session.hand_off(&emissions)
    } else {
        None
    };

    let view = page.map.snapshot();
    let report = RouteReport::new(&route, &view, comparison);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "🗺️  {} → {} ({})",
        report.origin,
        report.destination,
        report.mode.label()
    );
    println!("   Distance: {}", report.distance);
    println!("   Duration: {}", report.duration);
    match (report.center, report.zoom) {
        (Some(center), Some(zoom)) if report.points > 0 => {
            println!(
                "   Path: {} points, view centered on {center} at zoom {zoom}",
                report.points
            );
        },
        _ => println!("   Path: not available"),
    }

    if savings {
        match &report.savings {
            Some(result) => print_savings(result),
            None => println!("🌱 No CO₂ comparison: the distance has no usable number"),
        }
    }
    Ok(())
}

fn run_savings(distance: &str, mode: TravelMode, json: bool) -> anyhow::Result<()> {
    let service = EmissionsService::new();
    service.set_mode(mode);

    let Some(result) = service.set_distance(distance) else {
        println!("❌ Enter a positive distance in miles, e.g. \"5.3 mi\"");
        std::process::exit(1);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_savings(&result);
    }
    Ok(())
}

fn run_decode(encoded: &str, json: bool) -> anyhow::Result<()> {
    let path = polyline::decode(encoded).context("decoding polyline")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }

    for point in &path {
        println!("{point}");
    }
    if let Some(bounds) = path.bounds() {
        println!(
            "📐 {} points, bounds S {:.5} W {:.5} N {:.5} E {:.5}",
            path.len(),
            bounds.south,
            bounds.west,
            bounds.north,
            bounds.east
        );
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Route(args) => run_route(config, args).await?,

        Commands::Savings {
            distance,
            mode,
            json,
        } => run_savings(&distance, mode, json)?,

        Commands::Decode { polyline, json } => run_decode(&polyline, json)?,

        Commands::Locate { here } => {
            let locator = wiring::build_locator(&config, here)?;
            let position = locator.resolve_initial_position().await;
            println!("📍 {position} (zoom {})", config.geolocation.default_zoom);
        },

        Commands::Suggest { query } => {
            let resolver = wiring::build_place_resolver(&config)?;
            if !resolver.ensure_ready().await {
                println!("⚠️  Autocomplete unavailable, type the full address instead");
                return Ok(());
            }

            let suggestions = resolver.suggest(Slot::Origin, &query).await;
            if suggestions.is_empty() {
                println!("No suggestions for \"{query}\"");
            }
            for suggestion in suggestions {
                println!("• {suggestion}");
            }
        },

        Commands::Config { check } => {
            if check {
                config.validate()?;
                println!("✅ Configuration is valid");
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        },
    }

    Ok(())
}
