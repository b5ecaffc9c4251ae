use thiserror::Error;

/// Failures the visualizer recovers from locally.
///
/// None of these are fatal: audio problems fall back to the neutral frame,
/// backend problems are retried a bounded number of times and then left
/// blank. Nothing here ever surfaces as a user-visible dialog.
#[derive(Debug, Error)]
pub enum VizError {
    /// Decoding, permission or audio-graph wiring failed.
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),
    /// The rendering backend is not usable yet.
    #[error("rendering backend not ready")]
    BackendNotReady,
    /// Analyser transform sizes must be powers of two.
    #[error("invalid fft size {0}: must be a power of two >= 32")]
    InvalidFftSize(u32),
}
