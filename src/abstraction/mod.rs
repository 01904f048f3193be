pub mod centroid;
pub mod postflop;
pub mod preflop;
pub mod ranges;

pub use centroid::CentroidTable;
pub use postflop::abstract_postflop;
pub use preflop::abstract_preflop;
