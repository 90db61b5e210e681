//! Job request and lifecycle definitions.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default target frame rate when the request omits one.
pub const DEFAULT_TARGET_FPS: f64 = 240.0;

/// Default interpolation model when the request omits one.
pub const DEFAULT_MODEL: &str = "rife-v4.6";

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a timestamp-derived job ID (the default when the caller
    /// supplies none).
    pub fn from_timestamp() -> Self {
        Self(Utc::now().format("%Y%m%d_%H%M%S_%6f").to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::from_timestamp()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An interpolation job request.
///
/// Exactly one of `video_url` / `video_path` must be set; the handler
/// rejects requests providing neither before any workspace is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Remote source to download
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Existing local source path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_path: Option<PathBuf>,

    /// Target frame rate
    #[serde(default = "default_target_fps")]
    pub target_fps: f64,

    /// Interpolation model name
    #[serde(default = "default_model")]
    pub ai_model: String,

    /// Final artifact filename; derived from the target rate and job id
    /// when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_filename: Option<String>,
}

fn default_target_fps() -> f64 {
    DEFAULT_TARGET_FPS
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl JobRequest {
    /// Create a request for a remote source with defaults.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            video_url: Some(url.into()),
            video_path: None,
            target_fps: DEFAULT_TARGET_FPS,
            ai_model: default_model(),
            output_filename: None,
        }
    }

    /// Create a request for a local source with defaults.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            video_url: None,
            video_path: Some(path.into()),
            target_fps: DEFAULT_TARGET_FPS,
            ai_model: default_model(),
            output_filename: None,
        }
    }

    /// Whether any source was supplied at all.
    pub fn has_source(&self) -> bool {
        self.video_url.is_some() || self.video_path.is_some()
    }

    /// Resolve the final artifact filename for a given job.
    pub fn resolved_output_filename(&self, job_id: &JobId) -> String {
        self.output_filename
            .clone()
            .unwrap_or_else(|| format!("output_{}fps_{}.mp4", self.target_fps, job_id))
    }
}

/// Request envelope as delivered to the worker: an optional caller
/// job id plus the job input payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEvent {
    /// Caller-supplied job id; timestamp-derived when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The job request
    pub input: JobRequest,
}

impl JobEvent {
    /// Resolve the job id, generating one when the caller supplied none.
    pub fn resolve_job_id(&self) -> JobId {
        self.id
            .clone()
            .map(JobId::from_string)
            .unwrap_or_else(JobId::from_timestamp)
    }
}

/// Stage of a job as it moves through the pipeline.
///
/// Any stage can transition to `Failed`; the rest advance strictly in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    Received,
    WorkspaceReady,
    Probed,
    Planned,
    Deduplicated,
    Extracted,
    Interpolated,
    Padded,
    Assembled,
    Relocated,
    CleanedUp,
    Failed,
}

impl JobStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStage::Received => "received",
            JobStage::WorkspaceReady => "workspace_ready",
            JobStage::Probed => "probed",
            JobStage::Planned => "planned",
            JobStage::Deduplicated => "deduplicated",
            JobStage::Extracted => "extracted",
            JobStage::Interpolated => "interpolated",
            JobStage::Padded => "padded",
            JobStage::Assembled => "assembled",
            JobStage::Relocated => "relocated",
            JobStage::CleanedUp => "cleaned_up",
            JobStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStage::CleanedUp | JobStage::Failed)
    }
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_from_empty_payload() {
        let request: JobRequest =
            serde_json::from_str(r#"{"video_url": "https://example.com/a.mp4"}"#).unwrap();

        assert_eq!(request.target_fps, 240.0);
        assert_eq!(request.ai_model, "rife-v4.6");
        assert!(request.output_filename.is_none());
        assert!(request.has_source());
    }

    #[test]
    fn test_request_without_source() {
        let request: JobRequest = serde_json::from_str(r#"{"target_fps": 120}"#).unwrap();
        assert!(!request.has_source());
        assert_eq!(request.target_fps, 120.0);
    }

    #[test]
    fn test_resolved_output_filename() {
        let job_id = JobId::from_string("20250101_120000_000001");
        let request = JobRequest::from_url("https://example.com/a.mp4");
        assert_eq!(
            request.resolved_output_filename(&job_id),
            "output_240fps_20250101_120000_000001.mp4"
        );

        let mut named = request.clone();
        named.output_filename = Some("final.mp4".to_string());
        assert_eq!(named.resolved_output_filename(&job_id), "final.mp4");
    }

    #[test]
    fn test_timestamp_job_id_shape() {
        let id = JobId::from_timestamp();
        // YYYYMMDD_HHMMSS_ffffff
        assert_eq!(id.as_str().len(), 22);
        assert_eq!(id.as_str().matches('_').count(), 2);
    }

    #[test]
    fn test_stage_terminality() {
        assert!(JobStage::CleanedUp.is_terminal());
        assert!(JobStage::Failed.is_terminal());
        assert!(!JobStage::Assembled.is_terminal());
        assert_eq!(JobStage::WorkspaceReady.as_str(), "workspace_ready");
    }
}
