//! MCCFR training loop (spec §4.8): alternates traverser and button each
//! iteration, checkpointing `cumulative_regrets`/`cumulative_strategies` to
//! disk every `checkpoint_interval` traversals until the wall-clock budget
//! runs out. Resumes from an existing checkpoint pair if present (spec
//! §4.10).

use clap::Parser;
use handsolver::abstraction::CentroidTable;
use handsolver::config::Config;
use handsolver::equity::montecarlo::MonteCarloOracle;
use handsolver::mccfr::Trainer;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
struct Args {
    /// path to the trained centroid table (spec §6.3 `centers.csv`),
    /// produced by the `cluster` binary
    #[arg(long, default_value = "centers.csv")]
    centroids: PathBuf,

    /// directory holding/receiving the two checkpoint files
    #[arg(long, default_value = ".")]
    data: PathBuf,

    /// wall-clock training budget in seconds (spec §6.5 default 28,000)
    #[arg(long)]
    runtime: Option<u64>,

    /// checkpoint every N traversals (spec §6.5 default 100)
    #[arg(long)]
    checkpoint_interval: Option<u64>,

    /// optional TOML config file overriding the reference defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// number of independent root traversals to run per batch via the
    /// `parallel` feature (spec §5); no effect unless the crate was built
    /// with `--features parallel`
    #[cfg(feature = "parallel")]
    #[arg(long, default_value_t = 1)]
    parallel_batch: usize,
}

fn main() -> anyhow::Result<()> {
    handsolver::init();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(runtime) = args.runtime {
        config.runtime_seconds = runtime;
    }
    if let Some(interval) = args.checkpoint_interval {
        config.checkpoint_interval = interval;
    }

    let centroids = CentroidTable::load(&args.centroids)?;
    let oracle = MonteCarloOracle::new(args.seed);
    let rng = SmallRng::seed_from_u64(args.seed);

    std::fs::create_dir_all(&args.data)?;
    let regrets_path = args.data.join("cumulative_regrets.json");
    let strategies_path = args.data.join("cumulative_strategies.json");

    let mut trainer = Trainer::new(
        &centroids,
        &oracle,
        rng,
        config.clone(),
        regrets_path,
        strategies_path,
    )
    .resume()?;

    log::info!(
        "resuming at {} traversals; training for up to {}s",
        trainer.traversals(),
        config.runtime_seconds
    );

    let budget = Duration::from_secs(config.runtime_seconds);
    let start = Instant::now();
    let bar = handsolver::progress(config.runtime_seconds as usize);
    let mut last_report = trainer.traversals();

    while start.elapsed() < budget {
        #[cfg(feature = "parallel")]
        trainer.step_parallel(args.parallel_batch.max(1))?;
        #[cfg(not(feature = "parallel"))]
        trainer.step()?;
        bar.set_position(start.elapsed().as_secs().min(config.runtime_seconds));
        if trainer.traversals() - last_report >= config.checkpoint_interval {
            log::info!("{} traversals completed", trainer.traversals());
            last_report = trainer.traversals();
        }
    }
    bar.finish();

    trainer.checkpoint()?;
    log::info!("ran {} traversals in {:?}", trainer.traversals(), start.elapsed());
    Ok(())
}
