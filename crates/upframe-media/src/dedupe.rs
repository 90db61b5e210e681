//! Duplicate-frame removal.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::progress::FfmpegProgress;

/// Filter chain for dropping temporally duplicate frames while keeping
/// presentation timestamps rate-adjusted. The interpolator must not waste
/// work on frames that are visually identical to their predecessor.
pub const DEDUPE_FILTER: &str = "mpdecimate,setpts=N/FRAME_RATE/TB";

/// Remove duplicate frames from `input`, writing the result to `output`
/// with audio stripped.
pub async fn deduplicate_video<P, F>(
    input: P,
    output: P,
    runner: &FfmpegRunner,
    progress_callback: F,
) -> MediaResult<()>
where
    P: AsRef<Path>,
    F: Fn(FfmpegProgress) + Send + 'static,
{
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        "Deduplicating frames: {} -> {}",
        input.display(),
        output.display()
    );

    let cmd = FfmpegCommand::new(input, output)
        .video_filter(DEDUPE_FILTER)
        .no_audio();

    runner.run_with_progress(&cmd, progress_callback).await?;

    info!("Deduplication complete: {}", output.display());
    Ok(())
}
