pub mod evaluator;
pub mod montecarlo;
pub mod oracle;

pub use oracle::{EquityOracle, EquityResult};
