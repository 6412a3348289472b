use clap::Parser;
use color_eyre::eyre::{Context, Result};
use env_logger::Env;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use set_stats::config_loader::{self, CliOverrides};
use set_stats::{replay, stats};

const DEFAULT_OUTPUT: &str = "output.json";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Head-to-head statistics for a set of decoded Melee replays
#[derive(Parser, Debug)]
#[command(name = "set-stats", author, version, about, long_about = None)]
struct Args {
    /// Directory containing decoded replay records (*.json)
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Output path for the JSON report [default: output.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random highlight selection
    #[arg(long)]
    seed: Option<u64>,

    /// Number of randomly drawn highlights
    #[arg(long)]
    highlights: Option<usize>,

    /// Log level (trace, debug, info, warn, error) [default: info]
    #[arg(long)]
    log_level: Option<String>,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Also write a human-readable report to this path
    #[arg(long)]
    text_report: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Configuration is read before logging so its log level can apply
    let mut config = config_loader::load_or_default(args.config.as_deref())?;
    let overrides = CliOverrides {
        seed: args.seed,
        output: args.output.clone(),
        log_level: args.log_level.clone(),
        random_count: args.highlights,
    };
    config_loader::apply_overrides(&mut config, &overrides)?;

    let log_level = config.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    info!("Starting set-stats");
    info!("Replay directory: {:?}", args.dir);

    let records = replay::load_records(&args.dir)?;
    let selection = stats::select_series(records)?;
    if !selection.excluded.is_empty() {
        warn!("{} games excluded from the set", selection.excluded.len());
    }

    let mut rng = match config.seed {
        Some(seed) => {
            info!("Using highlight seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let report = stats::generate_output(&selection.series, &config.highlights, &mut rng);

    let output = config
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    stats::generate_json_report(&report, &output)?;

    if let Some(text_path) = &args.text_report {
        stats::generate_text_report(&report, text_path)?;
    }

    stats::report::print_summary(&report);

    Ok(())
}
