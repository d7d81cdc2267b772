use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use hub_route_planner::domain::ids::AirlineId;
use hub_route_planner::domain::route_comparison::RoutePlanner;
use hub_route_planner::domain::route_search::{NO_ROUTE_MESSAGE, PathResult, RouteOutcome};
use hub_route_planner::{load_network, logger};

const DEFAULT_DATA_PATH: &str = "data/airport_data.csv";

/// Airline-aware shortest flight path between two cities.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Source city, exact name from the city table.
    #[arg(short, long)]
    source: String,

    /// Destination city, exact name from the city table.
    #[arg(short, long)]
    dest: String,

    /// Airlines, comma-separated (e.g. "Qatar Airways,Emirates").
    #[arg(short, long, value_delimiter = ',')]
    airlines: Vec<String>,

    /// Path to the city table (CSV).
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: String,

    /// JSON airline rule file replacing the built-in rules.
    #[arg(long)]
    rules: Option<String>,

    /// Skip the comparison against the standard (all airlines) search.
    #[arg(long)]
    no_compare: bool,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let (catalog, rules) = load_network(&cli.data, cli.rules.as_deref()).with_context(|| format!("loading network from '{}'", cli.data))?;
    let planner = RoutePlanner::new(&catalog, &rules);

    let airlines: Vec<&str> = cli.airlines.iter().map(|a| a.trim()).filter(|a| !a.is_empty()).collect();
    let source = cli.source.trim();
    let dest = cli.dest.trim();

    let selection = rules.resolve(&airlines)?;
    let compare_standard = !cli.no_compare && selection != rules.airlines();

    if !compare_standard {
        let outcome = planner.plan(&airlines, source, dest)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print_header(&selection);
            print_outcome(&outcome);
        }
        return Ok(());
    }

    let comparison = planner.compare(&airlines, source, dest)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    print_header(&comparison.selected_airlines);
    if !print_outcome(&comparison.constrained) {
        return Ok(());
    }

    if let RouteOutcome::Found(standard) = &comparison.standard {
        println!("\n--- Comparison (standard Dijkstra, all airlines) ---");
        println!("Path: {}", standard.route_string());
        println!("Total distance (km): {:.2}", standard.total_distance_km);
        if let Some(summary) = comparison.summary() {
            println!("{}", summary.cyan());
        }
    }

    Ok(())
}

fn print_header(selection: &[AirlineId]) {
    let names: Vec<&str> = selection.iter().map(AirlineId::as_str).collect();
    println!("\n{}", "=".repeat(60));
    println!("SELECTED AIRLINE(S): {}", names.join(", ").bold());
    println!("{}", "=".repeat(60));
}

/// Prints the path or the no-route message; returns whether a path was found.
fn print_outcome(outcome: &RouteOutcome) -> bool {
    match outcome {
        RouteOutcome::Found(path) => {
            print_path(path);
            true
        }
        RouteOutcome::NoRoute => {
            println!("{}", NO_ROUTE_MESSAGE.red());
            false
        }
    }
}

fn print_path(path: &PathResult) {
    println!("PATH: {}", path.route_string().green());
    println!("TOTAL DISTANCE (km): {:.2}", path.total_distance_km);
    println!("\nLegs:");
    for leg in &path.legs {
        println!("  {} -> {}  [{}]  {:.2} km", leg.from, leg.to, leg.airline, leg.distance_km);
    }
}
