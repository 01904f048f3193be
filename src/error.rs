use thiserror::Error;

/// the recoverable half of the error taxonomy: bad external input, missing
/// offline artifacts, and a misbehaving equity oracle. `InvariantViolation`s
/// are deliberately not part of this type -- they are bugs, and surface as
/// `assert!`/`panic!` at the point of violation instead (see DESIGN.md).
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error loading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing offline artifact at {0}; run the cluster pipeline first")]
    MissingArtifact(String),

    #[error("oracle returned non-normalized probabilities: {0:?}")]
    Oracle(Vec<f32>),

    #[error("malformed checkpoint: {0}")]
    Checkpoint(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;
