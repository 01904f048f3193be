pub mod abstraction;
pub mod cards;
pub mod config;
pub mod equity;
pub mod error;
pub mod gameplay;
pub mod kmeans;
pub mod mccfr;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random(rng: &mut impl rand::Rng) -> Self;
}

/// progress bar
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(1);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initialize logging. no file logger, no ctrl-c task: this crate has no
/// server process to keep alive, just batch binaries that exit on their own.
pub fn init() {
    env_logger::init();
}
