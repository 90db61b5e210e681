//! Final video assembly.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::progress::FfmpegProgress;

/// Mux the padded frame sequence with the original source's audio into
/// the final container.
///
/// Video comes from `frames_dir/%08d.png` re-encoded at `target_fps`
/// with H.264 / yuv420p; audio is stream-copied from `audio_source`.
/// The `1:a:0?` map makes the audio optional, so a silent source still
/// assembles cleanly.
pub async fn assemble_video<F>(
    frames_dir: impl AsRef<Path>,
    target_fps: f64,
    audio_source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    runner: &FfmpegRunner,
    progress_callback: F,
) -> MediaResult<()>
where
    F: Fn(FfmpegProgress) + Send + 'static,
{
    let frames_dir = frames_dir.as_ref();
    let output = output.as_ref();

    info!(
        "Assembling final video: {} @ {}fps -> {}",
        frames_dir.display(),
        target_fps,
        output.display()
    );

    let pattern = frames_dir.join("%08d.png");
    let cmd = FfmpegCommand::new(&pattern, output)
        .input_framerate(target_fps)
        .add_input(audio_source.as_ref())
        .video_codec("libx264")
        .pixel_format("yuv420p")
        .audio_codec("copy")
        .map("0:v:0")
        .map("1:a:0?");

    runner.run_with_progress(&cmd, progress_callback).await?;

    info!("Assembly complete: {}", output.display());
    Ok(())
}
