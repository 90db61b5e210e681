//! Source video download.

use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{MediaError, MediaResult};

/// Download a video from a direct URL to `output_path`, streaming the
/// body to disk.
pub async fn download_video(url: &str, output_path: impl AsRef<Path>) -> MediaResult<()> {
    let output_path = output_path.as_ref();

    info!("Downloading video from {} to {}", url, output_path.display());

    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(MediaError::download_failed(format!(
            "HTTP {} fetching {}",
            response.status(),
            url
        )));
    }

    let mut file = File::create(output_path).await?;
    let mut response = response;
    let mut written: u64 = 0;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    if written == 0 {
        return Err(MediaError::download_failed(format!(
            "Empty response body from {url}"
        )));
    }

    info!("Downloaded {} bytes to {}", written, output_path.display());
    Ok(())
}
