use thiserror::Error;

/// Failures the pure scene code can report. None of them are fatal to the
/// page: the host logs and skips whatever could not be set up.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("container element #{0} not found")]
    MissingContainer(String),
    #[error("viewport has zero area ({width}x{height})")]
    EmptyViewport { width: u32, height: u32 },
    #[error("a path needs at least two control points, got {0}")]
    TooFewControlPoints(usize),
    #[error("invalid config value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
}
