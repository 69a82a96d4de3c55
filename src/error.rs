// THEORY:
// One error type for the whole engine. A run either fully succeeds and returns a
// complete report, or fails atomically with one of these — there is no partial
// report and no retry policy inside the core (retries belong to the transport
// layer that feeds us images). `InvalidInput` and `UnsupportedConfig` are both
// rejected before any pixel work begins.

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors surfaced by the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The pixel buffer is structurally unusable: zero dimensions or a byte
    /// length that does not match the stated dimensions.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The classification config failed validation: hue bounds outside
    /// [0, 360), an empty hue span, or thresholds outside [0, 1].
    #[error("unsupported config: {0}")]
    UnsupportedConfig(String),

    /// The caller's cancellation flag was observed between pipeline stages.
    /// Nothing was reported; the run is discarded whole.
    #[error("analysis cancelled by caller")]
    Cancelled,

    /// The parallel worker pool is shut down and can no longer accept or
    /// answer tasks.
    #[error("worker pool unavailable")]
    WorkerUnavailable,
}
