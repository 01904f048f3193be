use serde::{Deserialize, Serialize};

/// recognized configuration knobs (spec §6.5), overridable from an optional
/// TOML file loaded by the binaries; defaults match the reference values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub postflop_buckets: usize,
    pub starting_stack: i32,
    pub small_blind: i32,
    pub big_blind: i32,
    pub epsilon: f32,
    pub beta: f64,
    pub checkpoint_interval: u64,
    pub runtime_seconds: u64,
    pub kmeans_n_init: usize,
    pub kmeans_max_iter: usize,
    pub kmeans_subsample: usize,
    pub equity_iterations: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            postflop_buckets: 50,
            starting_stack: 200,
            small_blind: 1,
            big_blind: 2,
            epsilon: 0.05,
            beta: 1e6,
            checkpoint_interval: 100,
            runtime_seconds: 28_000,
            kmeans_n_init: 1,
            kmeans_max_iter: 100,
            kmeans_subsample: 3_000_000,
            equity_iterations: 100_000,
        }
    }
}

impl Config {
    pub fn load(path: Option<&std::path::Path>) -> crate::error::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text =
            std::fs::read_to_string(path).map_err(|source| crate::error::SolverError::Io {
                path: path.display().to_string(),
                source,
            })?;
        toml::from_str(&text)
            .map_err(|e| crate::error::SolverError::InvalidInput(format!("bad config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let cfg = Config::default();
        assert_eq!(cfg.postflop_buckets, 50);
        assert_eq!(cfg.starting_stack, 200);
        assert_eq!(cfg.small_blind, 1);
        assert_eq!(cfg.big_blind, 2);
        assert_eq!(cfg.checkpoint_interval, 100);
        assert_eq!(cfg.runtime_seconds, 28_000);
    }
}
