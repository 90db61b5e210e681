//! Worker error types.

use thiserror::Error;

use upframe_media::MediaError;
use upframe_models::PlanError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Plan computation failed")]
    Plan(#[from] PlanError),

    #[error("Media operation failed")]
    Media(#[from] MediaError),

    #[error("Failed to relocate output to persistent storage")]
    Relocation(#[source] MediaError),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Render the error with its full source chain, one cause per line.
    ///
    /// This is the `traceback` field of the error response.
    pub fn render_chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\ncaused by: {cause}"));
            source = cause.source();
        }
        out
    }

    /// Top-line message for the error response.
    pub fn message(&self) -> String {
        match self {
            WorkerError::Validation(msg) => msg.clone(),
            WorkerError::Plan(e) => e.to_string(),
            WorkerError::Media(e) => e.to_string(),
            WorkerError::Relocation(e) => {
                format!("Failed to relocate output to persistent storage: {e}")
            }
            WorkerError::Io(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_chain_includes_causes() {
        let inner = MediaError::ffmpeg_failed("FFmpeg exited with non-zero status", None, Some(1));
        let err = WorkerError::Media(inner);

        let chain = err.render_chain();
        assert!(chain.starts_with("Media operation failed"));
        assert!(chain.contains("caused by: FFmpeg command failed"));
    }

    #[test]
    fn test_message_unwraps_media_error() {
        let err = WorkerError::Media(MediaError::FfmpegNotFound);
        assert_eq!(err.message(), "FFmpeg not found in PATH");
    }
}
