//! Frame sequence operations: extraction and padding.
//!
//! Frame files are named `NNNNNNNN.png` (8-digit zero-padded, starting
//! at 00000001), matching both the ffmpeg `%08d.png` pattern and the
//! interpolator's output numbering.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Decode `video` into a numbered PNG sequence under `output_dir`.
pub async fn extract_frames(
    video: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    let video = video.as_ref();
    let output_dir = output_dir.as_ref();

    info!(
        "Extracting frames: {} -> {}",
        video.display(),
        output_dir.display()
    );

    let pattern = output_dir.join("%08d.png");
    let cmd = FfmpegCommand::new(video, &pattern);
    runner.run(&cmd).await?;

    Ok(())
}

/// Append `frames_to_pad` copies of the last frame in `dir`, numbered
/// contiguously after it. A non-positive count is a no-op. Returns the
/// number of frames written.
pub async fn pad_frames(dir: impl AsRef<Path>, frames_to_pad: i64) -> MediaResult<u64> {
    let dir = dir.as_ref();

    if frames_to_pad <= 0 {
        info!("No padding needed");
        return Ok(0);
    }

    let (last_path, last_number) = last_frame(dir)
        .await?
        .ok_or_else(|| MediaError::NoFramesToPad(dir.to_path_buf()))?;

    info!(
        "Padding {} hold frames after {}",
        frames_to_pad,
        last_path.display()
    );

    for i in 1..=frames_to_pad as u64 {
        let padded = dir.join(format!("{:08}.png", last_number + i));
        fs::copy(&last_path, &padded).await?;
    }

    Ok(frames_to_pad as u64)
}

/// Find the highest-numbered frame file in `dir`.
///
/// Returns `None` when the directory holds no `NNNNNNNN.png` entries.
pub async fn last_frame(dir: impl AsRef<Path>) -> MediaResult<Option<(PathBuf, u64)>> {
    let dir = dir.as_ref();
    let mut entries = fs::read_dir(dir).await?;
    let mut last: Option<(PathBuf, u64)> = None;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if let Some(number) = frame_number(&path) {
            if last.as_ref().map_or(true, |(_, n)| number > *n) {
                last = Some((path, number));
            }
        }
    }

    Ok(last)
}

/// Parse the frame number out of an `NNNNNNNN.png` path.
fn frame_number(path: &Path) -> Option<u64> {
    if path.extension().and_then(|e| e.to_str()) != Some("png") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.len() != 8 {
        return None;
    }
    stem.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_frame(dir: &Path, number: u64, content: &[u8]) -> PathBuf {
        let path = dir.join(format!("{number:08}.png"));
        fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_pad_copies_last_frame_contiguously() {
        let dir = TempDir::new().unwrap();
        write_frame(dir.path(), 1, b"first").await;
        write_frame(dir.path(), 2, b"second").await;
        write_frame(dir.path(), 3, b"third").await;

        let written = pad_frames(dir.path(), 4).await.unwrap();
        assert_eq!(written, 4);

        for n in 4..=7u64 {
            let padded = dir.path().join(format!("{n:08}.png"));
            assert_eq!(fs::read(&padded).await.unwrap(), b"third");
        }
        assert!(!dir.path().join("00000008.png").exists());
    }

    #[tokio::test]
    async fn test_pad_zero_or_negative_is_noop() {
        let dir = TempDir::new().unwrap();
        write_frame(dir.path(), 1, b"only").await;

        assert_eq!(pad_frames(dir.path(), 0).await.unwrap(), 0);
        assert_eq!(pad_frames(dir.path(), -9).await.unwrap(), 0);

        let mut count = 0;
        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_pad_empty_dir_fails() {
        let dir = TempDir::new().unwrap();
        let err = pad_frames(dir.path(), 3).await.unwrap_err();
        assert!(matches!(err, MediaError::NoFramesToPad(_)));
    }

    #[tokio::test]
    async fn test_last_frame_ignores_foreign_files() {
        let dir = TempDir::new().unwrap();
        write_frame(dir.path(), 12, b"a").await;
        write_frame(dir.path(), 7, b"b").await;
        fs::write(dir.path().join("notes.txt"), b"x").await.unwrap();
        fs::write(dir.path().join("999.png"), b"short stem").await.unwrap();

        let (path, number) = last_frame(dir.path()).await.unwrap().unwrap();
        assert_eq!(number, 12);
        assert_eq!(path.file_name().unwrap(), "00000012.png");
    }

    #[test]
    fn test_frame_number_parsing() {
        assert_eq!(frame_number(Path::new("/x/00000042.png")), Some(42));
        assert_eq!(frame_number(Path::new("/x/00000042.jpg")), None);
        assert_eq!(frame_number(Path::new("/x/42.png")), None);
    }
}
