//! Error types for the radar snapshot pipeline.

use thiserror::Error;

/// Result type alias using RadarError.
pub type RadarResult<T> = Result<T, RadarError>;

/// Primary error type for the acquisition pipeline.
///
/// The first four variants cover the data-acquisition stages and are
/// caught at the orchestration boundary, where they trigger the
/// synthetic fallback. `Internal` covers faults after that boundary
/// and is the only variant a client ever observes (as a 500).
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("No matching files in remote directory listing")]
    NoFilesFound,

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Failed to decompress payload: {0}")]
    Decompression(String),

    #[error("Failed to decode grid: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RadarError {
    /// Whether this error should be absorbed into the synthetic
    /// fallback rather than surfaced to the client.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RadarError::Internal(_))
    }

    /// HTTP status code for errors that do reach the client.
    pub fn http_status_code(&self) -> u16 {
        500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_errors_are_recoverable() {
        assert!(RadarError::NoFilesFound.is_recoverable());
        assert!(RadarError::Transport("timeout".into()).is_recoverable());
        assert!(RadarError::Decompression("bad gzip".into()).is_recoverable());
        assert!(RadarError::Decode("no message".into()).is_recoverable());
        assert!(!RadarError::Internal("cache poisoned".into()).is_recoverable());
    }
}
