//! Interpolation plan arithmetic.
//!
//! `plan()` is the one pure computation in the system: given the probed
//! source rate/frame count and the requested target rate it derives how
//! many frames the interpolator must generate and how many hold frames
//! the padding step must append afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from plan computation.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("invalid plan input: {0}")]
    InvalidInput(String),

    #[error(
        "target frame rate {target_fps} is below source frame rate {source_fps}; \
         downsampling is not supported"
    )]
    TargetBelowSource { source_fps: f64, target_fps: f64 },
}

/// Derived interpolation parameters. Computed once per job, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolationPlan {
    /// Probed source frame rate
    pub source_fps: f64,
    /// Probed source frame count
    pub source_frames: u64,
    /// Integer rate multiplier (>= 1)
    pub multiplier: u32,
    /// Frames the interpolator must produce
    pub frames_to_generate: u64,
    /// Frames required to play the source duration at the target rate
    pub total_frames_needed: u64,
    /// Hold frames to append; <= 0 means no padding
    pub frames_to_pad: i64,
}

impl InterpolationPlan {
    /// Whether the padding step has any work to do.
    pub fn needs_padding(&self) -> bool {
        self.frames_to_pad > 0
    }
}

/// Compute the interpolation plan for a job.
///
/// The interpolator generates `multiplier`-fold frames while sharing
/// boundary frames between adjacent original-frame intervals, hence
/// `frames_to_generate = source_frames * multiplier - (multiplier - 1)`.
/// Rounding is `f64::round` (half away from zero).
pub fn plan(
    source_fps: f64,
    source_frames: u64,
    target_fps: f64,
) -> Result<InterpolationPlan, PlanError> {
    if !source_fps.is_finite() || source_fps <= 0.0 {
        return Err(PlanError::InvalidInput(format!(
            "source frame rate must be positive, got {source_fps}"
        )));
    }
    if !target_fps.is_finite() || target_fps <= 0.0 {
        return Err(PlanError::InvalidInput(format!(
            "target frame rate must be positive, got {target_fps}"
        )));
    }
    if source_frames == 0 {
        return Err(PlanError::InvalidInput(
            "source has no frames".to_string(),
        ));
    }

    let multiplier = (target_fps / source_fps).round();
    if multiplier < 1.0 {
        return Err(PlanError::TargetBelowSource {
            source_fps,
            target_fps,
        });
    }
    let multiplier = multiplier as u32;

    let frames_to_generate = source_frames * multiplier as u64 - (multiplier as u64 - 1);
    let total_frames_needed =
        ((source_frames as f64 / source_fps) * target_fps).round() as u64;
    let frames_to_pad = total_frames_needed as i64 - frames_to_generate as i64;

    Ok(InterpolationPlan {
        source_fps,
        source_frames,
        multiplier,
        frames_to_generate,
        total_frames_needed,
        frames_to_pad,
    })
}
