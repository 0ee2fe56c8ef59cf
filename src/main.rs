// =============================================================================
// ALMANAC — Point d'entrée : charger, résoudre, afficher le minimum
// =============================================================================
//
//   1. Lire la configuration (fichier optionnel) puis les options CLI
//   2. Charger l'almanach (format choisi par l'extension)
//   3. Résoudre les graines (valeurs ou intervalles)
//   4. Afficher la plus petite valeur terminale
//
// =============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use almanac::config::{Config, SeedMode};
use almanac::core::batch::Strategy;
use almanac::core::resolve;
use almanac::loader;
use almanac::solve::solve;

#[derive(Parser)]
#[command(name = "almanac")]
#[command(version)]
#[command(about = "Resolve seeds through a chain of category range maps")]
#[command(long_about = None)]
struct Cli {
    /// Almanac file (.toml for the structured format, text otherwise)
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "almanac.toml")]
    config: PathBuf,

    /// Read seeds as single values or as (start, length) pairs
    #[arg(short, long, value_enum)]
    mode: Option<SeedMode>,

    /// Reduction strategy for seed ranges
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Upper bound on values traced by the brute-force strategy
    #[arg(long, value_name = "N")]
    max_candidates: Option<u64>,

    /// Resolve on a single thread
    #[arg(long)]
    sequential: bool,

    /// Skip chain validation
    #[arg(long)]
    no_validate: bool,

    /// Print every step of every seed trace
    #[arg(long)]
    explain: bool,

    /// Log level
    #[arg(short = 'v', long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;

    // Override config with CLI arguments
    if let Some(input) = cli.input {
        config.input.path = input;
    }
    if let Some(mode) = cli.mode {
        config.resolve.mode = mode;
    }
    if let Some(strategy) = cli.strategy {
        config.resolve.strategy = strategy;
    }
    if cli.max_candidates.is_some() {
        config.resolve.max_candidates = cli.max_candidates;
    }
    if cli.sequential {
        config.resolve.parallel = false;
    }
    if cli.no_validate {
        config.resolve.validate = false;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    let log_filter = format!("almanac={}", config.logging.level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting almanac v{}", env!("CARGO_PKG_VERSION"));

    let almanac = loader::load_file(&config.input.path)
        .with_context(|| format!("loading {}", config.input.path.display()))?;
    info!(
        path = %config.input.path.display(),
        seeds = almanac.seeds.len(),
        maps = almanac.chain.len(),
        "almanac loaded"
    );

    if cli.explain {
        for &seed in &almanac.seeds.values {
            match resolve::trace_path(seed, &almanac.chain) {
                Ok(path) => {
                    let steps: Vec<String> =
                        path.iter().map(|(cat, v)| format!("{} {}", cat, v)).collect();
                    println!("{}", steps.join(" → "));
                }
                Err(e) => println!("seed {} ✗ {}", seed, e),
            }
        }
    }

    let solution = solve(&almanac, &config.resolve)?;
    debug!("\n{}", solution);
    println!("{}", solution.lowest);

    Ok(())
}
