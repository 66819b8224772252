use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};
use rayon::prelude::*;

use household_occupancy::chronology::DayCountRule;
use household_occupancy::export;
use household_occupancy::{
    Datasets, Household, HouseholdSeeds, HouseholdSpec, SimulationConfig, SimulationError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "household_occupancy")]
#[command(about = "Generate yearly ten-minute household occupancy chains")]
struct Args {
    /// Directory holding households.json, appliances.json and clusters.json
    #[arg(short, long, default_value = "data/demo")]
    data: PathBuf,

    /// Year to simulate (overrides the config file)
    #[arg(short, long)]
    year: Option<i32>,

    /// Master seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of households; household i uses seed + i
    #[arg(short = 'n', long, default_value = "1")]
    count: usize,

    /// Keep every household's members, appliances and clusters as drawn from
    /// this seed, so the batch only varies in occupancy
    #[arg(long)]
    household_seed: Option<u64>,

    /// Fixed occupancy sampling seed for every household
    #[arg(long)]
    occupancy_seed: Option<u64>,

    /// Directory for result files
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Result file format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// JSON simulation config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON household spec with explicit members and/or appliances
    #[arg(long)]
    household: Option<PathBuf>,

    /// Household name prefix
    #[arg(long, default_value = "household")]
    name: String,

    /// Use the 355-day count for non-leap years
    #[arg(long)]
    legacy_day_count: bool,

    /// Reject days with runs shorter than the minimum run length
    #[arg(long)]
    min_duration: bool,
}

fn main() -> ExitCode {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Debug)
    } else {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("household_occupancy"), my_code_level)
        .parse_default_env()
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimulationError> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(year) = args.year {
        config.year = year;
    }
    if args.legacy_day_count {
        config.day_count_rule = DayCountRule::Legacy;
    }
    if args.min_duration {
        config.validation.require_min_duration = true;
    }
    config.check()?;

    let spec = match &args.household {
        Some(path) => HouseholdSpec::load(path)?,
        None => HouseholdSpec::default(),
    };
    let datasets = Datasets::load_from(&args.data)?;
    fs::create_dir_all(&args.output)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "simulating {} household(s) for {} with seed {}",
        args.count, config.year, seed
    );

    (0..args.count)
        .into_par_iter()
        .map(|i| {
            let name = format!("{}_{}", args.name, i);
            let seeds = household_seeds(args, seed.wrapping_add(i as u64));
            let household = Household::new(&name, &spec, &datasets, &config, seeds)?;
            let result = household.simulate(config.year)?;

            let path = output_path(&args.output, &name, args.format);
            match args.format {
                OutputFormat::Json => export::write_json(&result, &path)?,
                OutputFormat::Csv => export::write_csv(&result, &path)?,
            }
            info!("wrote {}", path.display());
            Ok(())
        })
        .collect::<Result<Vec<()>, SimulationError>>()?;

    Ok(())
}

fn household_seeds(args: &Args, master: u64) -> HouseholdSeeds {
    let mut builder = HouseholdSeeds::builder(master);
    if let Some(household_seed) = args.household_seed {
        builder = builder.same_household_as(household_seed);
    }
    if let Some(occupancy_seed) = args.occupancy_seed {
        builder = builder.occupancy(occupancy_seed);
    }
    builder.build()
}

fn output_path(dir: &Path, name: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", name, format.extension()))
}
