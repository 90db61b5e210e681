//! Top-level job orchestration.

use tokio::fs;
use tracing::debug;

use upframe_media::{assemble_video, download_video, move_file, probe_video, FfmpegRunner};
use upframe_models::{plan, JobEvent, JobId, JobRequest, JobResponse, JobStage};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::JobLogger;
use crate::pipeline::run_pipeline;
use crate::workspace::JobWorkspace;

/// Handle one job event end to end and produce the wire response.
///
/// Validation happens before any workspace is created; after that the
/// ephemeral workspace is torn down on every exit path, and no error
/// escapes as a panic — failures become structured error responses.
pub async fn handle_event(config: &WorkerConfig, event: JobEvent) -> JobResponse {
    // Validate input first: no workspace may exist for a rejected request
    if let Err(message) = validate_request(&event.input) {
        return JobResponse::rejected(message);
    }

    let job_id = event.resolve_job_id();
    let logger = JobLogger::new(&job_id, "interpolation");
    logger.log_start(&format!(
        "target_fps={} model={}",
        event.input.target_fps, event.input.ai_model
    ));

    let workspace = match JobWorkspace::create(config, &job_id).await {
        Ok(workspace) => workspace,
        Err(e) => {
            let err = WorkerError::from(e);
            logger.log_error(&err.message());
            return JobResponse::failure(err.message(), err.render_chain());
        }
    };
    logger.log_stage(JobStage::WorkspaceReady);

    let result = run_job(config, &event.input, &job_id, &workspace, &logger).await;

    // Best-effort cleanup on both paths; never overrides the result
    workspace.teardown().await;

    match result {
        Ok(response) => {
            logger.log_stage(JobStage::CleanedUp);
            logger.log_completion("Final output saved");
            response
        }
        Err(err) => {
            logger.log_stage(JobStage::Failed);
            logger.log_error(&err.render_chain());
            JobResponse::failure(err.message(), err.render_chain())
        }
    }
}

/// Reject requests with no usable source.
fn validate_request(request: &JobRequest) -> Result<(), String> {
    if !request.has_source() {
        return Err("Either video_url or video_path must be provided".to_string());
    }
    // A URL takes priority as the source, so a local path is only
    // checked when it is the one that will be used
    if let (None, Some(path)) = (&request.video_url, &request.video_path) {
        if !path.exists() {
            return Err(format!(
                "Provided video_path does not exist: {}",
                path.display()
            ));
        }
    }
    Ok(())
}

/// The fallible part of the job, run inside the workspace guard.
async fn run_job(
    config: &WorkerConfig,
    request: &JobRequest,
    job_id: &JobId,
    workspace: &JobWorkspace,
    logger: &JobLogger,
) -> WorkerResult<JobResponse> {
    // Acquire the source into the ephemeral workspace
    let input_video = workspace.input_video();
    if let Some(url) = &request.video_url {
        download_video(url, &input_video).await?;
    } else if let Some(path) = &request.video_path {
        logger.log_progress(&format!("Copying source from {}", path.display()));
        fs::copy(path, &input_video).await?;
    }

    // Probe
    let info = probe_video(&input_video).await?;
    logger.log_progress(&format!(
        "Source: {}x{} {} {:.3}fps, {} frames",
        info.width, info.height, info.codec, info.fps, info.frames
    ));
    logger.log_stage(JobStage::Probed);

    // Plan
    let plan = plan(info.fps, info.frames, request.target_fps)?;
    logger.log_progress(&format!(
        "Plan: {}x multiplier, generate {}, need {}, pad {}",
        plan.multiplier, plan.frames_to_generate, plan.total_frames_needed, plan.frames_to_pad
    ));
    logger.log_stage(JobStage::Planned);

    // Deduplicate, extract, interpolate, pad
    run_pipeline(config, workspace, &plan, &request.ai_model, logger).await?;

    // Assemble in ephemeral storage first
    let output_filename = request.resolved_output_filename(job_id);
    let ephemeral_output = workspace.ephemeral_output(&output_filename);
    let runner = FfmpegRunner::new().with_timeout(config.tool_timeout_secs);
    let total_frames = plan.total_frames_needed;
    assemble_video(
        workspace.output_frames(),
        request.target_fps,
        &input_video,
        &ephemeral_output,
        &runner,
        move |p| {
            debug!("Assembly progress: {:.1}%", p.frame_percentage(total_frames));
        },
    )
    .await?;
    logger.log_stage(JobStage::Assembled);

    // Relocate to persistent storage
    let persistent_output = workspace.persistent_output(&output_filename);
    logger.log_progress(&format!(
        "Moving final video to persistent storage: {}",
        persistent_output.display()
    ));
    move_file(&ephemeral_output, &persistent_output)
        .await
        .map_err(WorkerError::Relocation)?;
    logger.log_stage(JobStage::Relocated);

    Ok(JobResponse::success(
        job_id,
        &plan,
        request.target_fps,
        persistent_output.to_string_lossy(),
    ))
}
