//! Offline centroid training pipeline (spec §4.3): sample (hand, board)
//! combos, compute their 8-D equity feature vectors, and fit K centroids.

use clap::Parser;
use handsolver::abstraction::centroid::CentroidTable;
use handsolver::abstraction::postflop::equity_vector;
use handsolver::abstraction::ranges::{save_hand_to_range_map, save_range_to_hands_map};
use handsolver::cards::{Card, Deck, Hand};
use handsolver::config::Config;
use handsolver::equity::montecarlo::MonteCarloOracle;
use handsolver::equity::oracle::EquityOracle;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use std::io::Write as _;
use std::path::PathBuf;

#[derive(Parser)]
struct Args {
    /// number of centroids K (spec §6.5 default 50, overridable via
    /// `postflop_buckets` in `--config`)
    #[arg(long)]
    count: Option<usize>,

    /// number of (hand, board) points to sample and cluster (overridable via
    /// `kmeans_subsample` in `--config`)
    #[arg(long)]
    subsample: Option<usize>,

    /// k-means max iterations (overridable via `kmeans_max_iter`)
    #[arg(long)]
    max_iter: Option<usize>,

    /// number of k-means++ restarts, keeping the lowest-inertia result
    /// (overridable via `kmeans_n_init`)
    #[arg(long)]
    n_init: Option<usize>,

    /// directory to write combos.csv, points.csv, centers.csv into
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// optional TOML config file overriding the reference defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// overwrite existing output files instead of refusing to run
    #[arg(long, default_value_t = false)]
    force: bool,

    /// Monte-Carlo trials per range tier (spec §4.2 step 1, overridable via
    /// `equity_iterations`)
    #[arg(long)]
    equity_iterations: Option<u32>,

    /// also (re-)write HAND_TO_RANGE_MAP.json / RANGE_TO_HANDS_MAP.json from
    /// the built-in range dictionary (spec §4.4/§6.3), skipping the combo
    /// sampling and k-means stages
    #[arg(long, default_value_t = false)]
    dump_ranges: bool,
}

fn random_combo(rng: &mut SmallRng) -> (Hand, Vec<Card>) {
    let board_len = if rng.random_bool(0.5) { 3 } else { 4 };
    let deck = Deck::shuffled(rng);
    let cards = deck.peek(2 + board_len);
    let hand = Hand::try_from(&cards[0..2]).expect("2 hole cards");
    let board = cards[2..].to_vec();
    (hand, board)
}

fn main() -> anyhow::Result<()> {
    handsolver::init();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let count = args.count.unwrap_or(config.postflop_buckets);
    let subsample = args.subsample.unwrap_or(config.kmeans_subsample);
    let max_iter = args.max_iter.unwrap_or(config.kmeans_max_iter);
    let n_init = args.n_init.unwrap_or(config.kmeans_n_init);
    let equity_iterations = args.equity_iterations.unwrap_or(config.equity_iterations);

    std::fs::create_dir_all(&args.out)?;
    if args.dump_ranges {
        let hand_to_range = args.out.join("HAND_TO_RANGE_MAP.json");
        let range_to_hands = args.out.join("RANGE_TO_HANDS_MAP.json");
        save_hand_to_range_map(&hand_to_range)?;
        save_range_to_hands_map(&range_to_hands)?;
        log::info!("wrote {} and {}", hand_to_range.display(), range_to_hands.display());
        return Ok(());
    }

    let centers_path = args.out.join("centers.csv");
    if centers_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite (spec §4.3 failure modes)",
            centers_path.display()
        );
    }

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let oracle = MonteCarloOracle::new(args.seed);

    let combos_path = args.out.join("combos.csv");
    let points_path = args.out.join("points.csv");
    let mut combos_file = std::fs::File::create(&combos_path)?;
    let mut points_file = std::fs::File::create(&points_path)?;
    writeln!(combos_file, "hand,board")?;

    log::info!("sampling {} (hand, board) combos", subsample);
    let bar = handsolver::progress(subsample);
    let mut points = Vec::with_capacity(subsample);
    for _ in 0..subsample {
        let (hand, board) = random_combo(&mut rng);
        let hand_ids: Vec<String> = hand.cards().iter().map(|c| u8::from(*c).to_string()).collect();
        let board_ids: Vec<String> = board.iter().map(|c| u8::from(*c).to_string()).collect();
        writeln!(combos_file, "{},{}", hand_ids.join(" "), board_ids.join(" "))?;

        let vector = equity_vector(&hand, &board, &oracle, equity_iterations)?;
        writeln!(
            points_file,
            "{}",
            vector.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
        )?;
        points.push(vector);
        bar.inc(1);
    }
    bar.finish();

    log::info!("fitting {} centroids over {} points", count, points.len());
    let table = CentroidTable::train(&points, count, max_iter, n_init, &mut rng);
    table.save(&centers_path)?;
    log::info!("wrote {}", centers_path.display());
    Ok(())
}
