//! # u-tour CLI
//!
//! Reads places from CSV, asks for a start place, optimizes the visiting
//! order and appends the route to a GeoJSON file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info, warn};

use u_tour::anneal::{simulated_anneal, AnnealConfig, InitialTour};
use u_tour::constructive::{greedy_construct, TimeWindowContext};
use u_tour::distance::DistanceMatrix;
use u_tour::io::{append_route, read_places_from_path, resolve_start};
use u_tour::local_search::{two_opt_improve, TwoOptConfig};
use u_tour::models::{Coverage, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Nearest neighbor only (the only time-window aware algorithm)
    Greedy,
    /// Nearest neighbor followed by 2-opt
    #[value(name = "2opt")]
    TwoOpt,
    /// Nearest neighbor followed by simulated annealing
    SimulatedAnnealing,
}

/// Command-line interface for u-tour
#[derive(Parser)]
#[command(name = "u-tour")]
#[command(version)]
#[command(about = "City tour optimizer: finds a short visiting order for a list of places")]
struct Cli {
    /// CSV file with Name,Lat,Lon and optional Open,Close columns
    #[arg(long, default_value = "places.csv")]
    csv: PathBuf,

    /// Return to the starting place at the end of the tour
    #[arg(long = "return")]
    must_return_to_start: bool,

    /// Optimization algorithm
    #[arg(long, value_enum, default_value = "2opt")]
    algo: Algorithm,

    /// GeoJSON file the route is appended to
    #[arg(long, default_value = "route.geojson")]
    output: PathBuf,

    /// Start place name or 1-based number (prompted for when omitted)
    #[arg(long)]
    start: Option<String>,

    /// Average travel speed in km/h for time window checks
    #[arg(long, default_value_t = 40.0)]
    speed: f64,

    /// Enforce Open/Close times from the CSV (greedy only)
    #[arg(long)]
    enforce_time_windows: bool,

    /// Maximum 2-opt passes
    #[arg(long, default_value_t = 1000)]
    max_passes: usize,

    /// Random seed for simulated annealing
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated annealing start temperature
    #[arg(long, default_value_t = 1000.0)]
    initial_temp: f64,

    /// Simulated annealing cooling rate per temperature level
    #[arg(long, default_value_t = 0.995)]
    cooling_rate: f64,

    /// Simulated annealing stop temperature
    #[arg(long, default_value_t = 1e-3)]
    min_temp: f64,

    /// Simulated annealing moves per temperature level
    #[arg(long, default_value_t = 100)]
    iterations_per_temp: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let places = read_places_from_path(&cli.csv)
        .with_context(|| format!("could not load places from '{}'", cli.csv.display()))?;

    let start = match &cli.start {
        Some(answer) => resolve_start(&places, answer)
            .with_context(|| format!("start place '{answer}' not found"))?,
        None => prompt_start(&places)?,
    };

    if places.len() == 1 {
        let path = if cli.must_return_to_start { vec![0, 0] } else { vec![0] };
        return report(&cli, &places, &path, 0.0);
    }

    let dm = DistanceMatrix::from_points(&places);
    info!(
        "calculating route with {:?}, starting from '{}' ({})",
        cli.algo,
        places[start].name(),
        if cli.must_return_to_start { "returning to start" } else { "open path" }
    );

    let travel_times = if cli.enforce_time_windows {
        let tt = dm
            .travel_times(cli.speed)
            .context("--speed must be positive when --enforce-time-windows is used")?;
        info!("time windows enforced at {} km/h", cli.speed);
        if cli.algo != Algorithm::Greedy {
            warn!(
                "time windows are only respected by 'greedy'; the {:?} result may violate them",
                cli.algo
            );
        }
        Some(tt)
    } else {
        None
    };

    let (path, distance) = match cli.algo {
        Algorithm::Greedy => {
            let ctx = travel_times
                .as_ref()
                .map(|tt| TimeWindowContext::new(&places, tt))
                .transpose()?;
            let tour = greedy_construct(&dm, start, cli.must_return_to_start, ctx)?;
            match tour.coverage() {
                Coverage::Complete => {}
                Coverage::Partial { visited, total } => warn!(
                    "time windows allowed only {visited} of {total} places; the path is incomplete"
                ),
                Coverage::Unclosed => {
                    warn!("returning to the start would miss its closing time; the path stays open")
                }
            }
            tour.into_parts()
        }
        Algorithm::TwoOpt => {
            let initial = greedy_construct(&dm, start, cli.must_return_to_start, None)?;
            info!("initial greedy distance {:.2} km, improving with 2-opt", initial.distance());
            let config = TwoOptConfig::default().with_max_passes(cli.max_passes);
            let result = two_opt_improve(&dm, initial.path(), cli.must_return_to_start, &config)?;
            if !result.converged {
                warn!("2-opt stopped after {} passes without converging", result.passes);
            }
            (result.path, result.distance)
        }
        Algorithm::SimulatedAnnealing => {
            let initial = greedy_construct(&dm, start, cli.must_return_to_start, None)?;
            info!(
                "initial greedy distance {:.2} km, optimizing with simulated annealing",
                initial.distance()
            );
            let config = AnnealConfig::default()
                .with_initial_temperature(cli.initial_temp)
                .with_cooling_rate(cli.cooling_rate)
                .with_min_temperature(cli.min_temp)
                .with_iterations_per_temperature(cli.iterations_per_temp);
            let seed = cli.seed.unwrap_or_else(rand::random);
            info!("annealing seed {seed}");
            let mut rng = u_numflow::random::create_rng(seed);
            let result = simulated_anneal(
                &dm,
                InitialTour::Path(initial.path()),
                cli.must_return_to_start,
                &config,
                &mut rng,
            )?;
            (result.path, result.distance)
        }
    };

    if path.is_empty() {
        bail!("could not determine a tour");
    }
    report(&cli, &places, &path, distance)
}

/// Prints the tour and appends it to the GeoJSON output.
fn report(cli: &Cli, places: &[Point], path: &[usize], distance: f64) -> Result<()> {
    let route: Vec<&Point> = path.iter().map(|&i| &places[i]).collect();

    println!("{}", "-".repeat(30));
    println!("Optimal tour:");
    for (i, place) in route.iter().enumerate() {
        println!("{}) {}", i + 1, place.name());
    }
    println!("Total distance: {distance:.2} km");

    if append_route(&cli.output, &route)? {
        info!("route appended to '{}'", cli.output.display());
    }
    Ok(())
}

/// Asks on stdin for the start place until a valid answer is given.
fn prompt_start(places: &[Point]) -> Result<usize> {
    if places.len() == 1 {
        info!("only one place loaded: '{}'", places[0].name());
        return Ok(0);
    }

    println!("\nAvailable places:");
    for (i, p) in places.iter().enumerate() {
        println!("  {}) {}", i + 1, p.name());
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!(
            "Enter the name or number of the starting place (default: {}): ",
            places[0].name()
        );
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("no input received");
        }
        match resolve_start(places, &line) {
            Some(idx) => {
                println!("Selected starting place: {}", places[idx].name());
                return Ok(idx);
            }
            None => println!(
                "'{}' not found. Enter a name or a number between 1 and {}.",
                line.trim(),
                places.len()
            ),
        }
    }
}
