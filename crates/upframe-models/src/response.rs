//! Wire shapes returned by the job handler.

use serde::{Deserialize, Serialize};

use crate::{InterpolationPlan, JobId};

/// Response returned for a job.
///
/// Three shapes exist on the wire:
/// - success, tagged `status: "success"` with the job record
/// - failure, tagged `status: "error"` with the message and source chain
/// - early rejection (before a job id/workspace exists), a bare `{ error }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobResponse {
    Success {
        status: String,
        output_path: String,
        job_id: String,
        original_fps: f64,
        original_frames: u64,
        target_fps: f64,
        multiplier: u32,
        frames_generated: u64,
        total_frames: u64,
    },
    Failure {
        status: String,
        error: String,
        traceback: String,
    },
    Rejected {
        error: String,
    },
}

impl JobResponse {
    /// Build the success record from the job's plan and final artifact path.
    pub fn success(job_id: &JobId, plan: &InterpolationPlan, target_fps: f64, output_path: impl Into<String>) -> Self {
        Self::Success {
            status: "success".to_string(),
            output_path: output_path.into(),
            job_id: job_id.to_string(),
            original_fps: plan.source_fps,
            original_frames: plan.source_frames,
            target_fps,
            multiplier: plan.multiplier,
            frames_generated: plan.frames_to_generate,
            total_frames: plan.total_frames_needed,
        }
    }

    /// Build the failure record from an error and its rendered source chain.
    pub fn failure(error: impl Into<String>, traceback: impl Into<String>) -> Self {
        Self::Failure {
            status: "error".to_string(),
            error: error.into(),
            traceback: traceback.into(),
        }
    }

    /// Build an early validation rejection.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobResponse::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan;

    #[test]
    fn test_success_shape() {
        let job_id = JobId::from_string("j1");
        let p = plan(24.0, 100, 240.0).unwrap();
        let response = JobResponse::success(&job_id, &p, 240.0, "/out/job_j1/final.mp4");

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["job_id"], "j1");
        assert_eq!(value["multiplier"], 10);
        assert_eq!(value["frames_generated"], 991);
        assert_eq!(value["total_frames"], 1000);
    }

    #[test]
    fn test_failure_shape() {
        let response = JobResponse::failure("probe failed", "probe failed\ncaused by: exit 1");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value["traceback"].as_str().unwrap().contains("caused by"));
    }

    #[test]
    fn test_rejected_shape_has_no_status() {
        let response = JobResponse::rejected("Either video_url or video_path must be provided");
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("status").is_none());
        assert!(value["error"].as_str().unwrap().contains("video_url"));
    }
}
