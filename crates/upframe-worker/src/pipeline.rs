//! Frame pipeline driver.
//!
//! Runs deduplicate → extract → interpolate → pad strictly in sequence,
//! each external call awaited to completion. The first failure aborts
//! the pipeline; nothing is retried at this layer.

use tracing::debug;

use upframe_media::{
    deduplicate_video, extract_frames, pad_frames, run_interpolation, FfmpegRunner,
    InterpolatorCommand,
};
use upframe_models::{InterpolationPlan, JobStage};

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::logging::JobLogger;
use crate::workspace::JobWorkspace;

/// Drive the frame pipeline for one job.
pub async fn run_pipeline(
    config: &WorkerConfig,
    workspace: &JobWorkspace,
    plan: &InterpolationPlan,
    model: &str,
    logger: &JobLogger,
) -> WorkerResult<()> {
    let runner = FfmpegRunner::new().with_timeout(config.tool_timeout_secs);

    // Deduplicate (ephemeral -> ephemeral)
    let source_duration_ms = (plan.source_frames as f64 / plan.source_fps * 1000.0) as i64;
    deduplicate_video(
        &workspace.input_video(),
        &workspace.deduped_video(),
        &runner,
        move |p| {
            debug!(
                "Dedupe progress: {:.1}%",
                p.percentage(source_duration_ms)
            );
        },
    )
    .await?;
    logger.log_stage(JobStage::Deduplicated);

    // Extract frames (ephemeral -> ephemeral)
    extract_frames(&workspace.deduped_video(), workspace.input_frames(), &runner).await?;
    logger.log_stage(JobStage::Extracted);

    // Interpolate
    let interpolate = InterpolatorCommand::new(
        &config.interpolator_bin,
        workspace.input_frames(),
        workspace.output_frames(),
        model,
        plan.frames_to_generate,
    )
    .gpu_id(config.gpu_id)
    .thread_spec(config.thread_spec.clone());

    run_interpolation(&interpolate, config.tool_timeout_secs).await?;
    logger.log_stage(JobStage::Interpolated);

    // Pad with hold frames
    let padded = pad_frames(workspace.output_frames(), plan.frames_to_pad).await?;
    logger.log_progress(&format!("Padded {padded} hold frames"));
    logger.log_stage(JobStage::Padded);

    Ok(())
}
