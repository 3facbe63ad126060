use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

use assam_floodrisk::analysis::groupings::{summarize_basins, summarize_stations};
use assam_floodrisk::basins::select_basins;
use assam_floodrisk::config::Config;
use assam_floodrisk::ingest::gauge_csv::{read_gauge_csv, station_json, write_station_json};
use assam_floodrisk::logging::{self, Component, LogLevel};
use assam_floodrisk::model::{Result, SimulationParameters};
use assam_floodrisk::risk::{assess, simulate_basins};
use assam_floodrisk::verify::verify_outcome;

#[derive(Parser)]
#[command(
    name = "floodrisk",
    version,
    about = "Assam flood-risk classification tools",
    long_about = None
)]
struct Cli {
    /// TOML config file (falls back to $FLOODRISK_CONFIG, then defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a gauge station table into the JSON station list
    Normalize {
        /// Delimited gauge table
        input: PathBuf,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify one slider set
    Assess {
        #[command(flatten)]
        sliders: Sliders,
    },
    /// Fan one slider set out across basins with per-basin jitter
    Simulate {
        #[command(flatten)]
        sliders: Sliders,
        /// Seed for reproducible output (overrides [simulation].seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Restrict to these basin ids (repeatable); default is every basin
        #[arg(long = "basin")]
        basins: Vec<String>,
    },
    /// Audit a gauge station table for gaps and duplicates
    Verify {
        /// Delimited gauge table
        input: PathBuf,
    },
}

#[derive(clap::Args)]
struct Sliders {
    /// Rainfall intensity, mm/h
    #[arg(long, allow_negative_numbers = true)]
    rainfall: f64,
    /// Drainage blockage, percent
    #[arg(long, allow_negative_numbers = true)]
    blockage: f64,
    /// Soil saturation, percent
    #[arg(long, allow_negative_numbers = true)]
    soil_saturation: f64,
}

impl From<&Sliders> for SimulationParameters {
    fn from(s: &Sliders) -> Self {
        SimulationParameters::new(s.rainfall, s.blockage, s.soil_saturation)
    }
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Config errors surface before the logger exists.
            if logging::is_initialized() {
                logging::error(Component::System, None, &e.to_string());
            } else {
                eprintln!("floodrisk: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref())?;

    let level = if cli.debug > 0 {
        LogLevel::Debug
    } else {
        config.logging.level
    };
    logging::init_logger(level, config.logging.file.as_deref(), config.logging.timestamps);
    logging::debug(Component::Config, None, &format!("{:?}", config));

    match cli.command {
        Commands::Normalize { input, output } => {
            let outcome = read_gauge_csv(&input, &config.csv_options())?;
            let summary = summarize_stations(&outcome.records);
            logging::info(
                Component::Normalizer,
                None,
                &format!(
                    "{} stations: {} high, {} medium, {} low",
                    summary.total, summary.high, summary.medium, summary.low
                ),
            );
            match output {
                Some(path) => write_station_json(&path, &outcome.records)?,
                None => println!("{}", station_json(&outcome.records)?),
            }
        }
        Commands::Assess { sliders } => {
            let params = SimulationParameters::from(&sliders);
            let assessment = assess(&params);
            logging::debug(
                Component::Classifier,
                None,
                &format!("{:?} -> {:?}", params, assessment),
            );
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        Commands::Simulate {
            sliders,
            seed,
            basins,
        } => {
            let params = SimulationParameters::from(&sliders);
            let selected = select_basins(&basins)?;
            let seed = config.simulation.resolve_seed(seed);
            logging::info(
                Component::Simulation,
                None,
                &format!("simulating {} basins with seed {}", selected.len(), seed),
            );

            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let results = simulate_basins(selected, &params, &mut rng);
            let output = json!({
                "seed": seed,
                "parameters": params,
                "summary": summarize_basins(&results),
                "basins": results,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Verify { input } => {
            let outcome = read_gauge_csv(&input, &config.csv_options())?;
            let report = verify_outcome(&outcome);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
