use crate::text::FontLoadError;

/// Errors surfaced by [`Canvas`](super::Canvas) operations.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("window was closed")]
    Closed,

    #[error("frame rate {requested:.1} fps too high for monitor (limit {limit:.1} fps): decrease fps")]
    FrameRateTooHigh { requested: f64, limit: f64 },

    #[error("window backend failure: {0:#}")]
    Backend(#[from] anyhow::Error),

    #[error(transparent)]
    Font(#[from] FontLoadError),
}
