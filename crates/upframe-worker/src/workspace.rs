//! Job-scoped workspace management.
//!
//! Each job gets an ephemeral directory tree for intermediates (frames,
//! temp videos, the pre-relocation output) and a persistent directory
//! for the final artifact only. Both are namespaced by job id so
//! concurrently running jobs never collide.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use upframe_models::JobId;

use crate::config::WorkerConfig;

/// Paths for one job's working and output directories.
#[derive(Debug, Clone)]
pub struct JobWorkspace {
    /// Ephemeral root: `<ephemeral_root>/job_<id>`
    root: PathBuf,
    /// Extracted source frames
    input_frames: PathBuf,
    /// Interpolated (and padded) frames
    output_frames: PathBuf,
    /// Persistent output dir: `<persistent_root>/job_<id>`
    persistent_dir: PathBuf,
}

impl JobWorkspace {
    /// Create the ephemeral tree and the persistent output directory.
    ///
    /// All creates are `create_dir_all`, so an already-existing
    /// persistent directory is fine.
    pub async fn create(config: &WorkerConfig, job_id: &JobId) -> std::io::Result<Self> {
        let root = config.ephemeral_root.join(format!("job_{job_id}"));
        let input_frames = root.join("input_frames");
        let output_frames = root.join("output_frames");
        let persistent_dir = config.persistent_root.join(format!("job_{job_id}"));

        info!("Setting up ephemeral job workspace: {}", root.display());
        fs::create_dir_all(&input_frames).await?;
        fs::create_dir_all(&output_frames).await?;

        info!(
            "Preparing persistent output dir: {}",
            persistent_dir.display()
        );
        fs::create_dir_all(&persistent_dir).await?;

        Ok(Self {
            root,
            input_frames,
            output_frames,
            persistent_dir,
        })
    }

    /// Ephemeral workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of extracted source frames.
    pub fn input_frames(&self) -> &Path {
        &self.input_frames
    }

    /// Directory of interpolated frames.
    pub fn output_frames(&self) -> &Path {
        &self.output_frames
    }

    /// Ephemeral copy of the original source video.
    pub fn input_video(&self) -> PathBuf {
        self.root.join("input.mp4")
    }

    /// Ephemeral deduplicated video.
    pub fn deduped_video(&self) -> PathBuf {
        self.root.join("input-deduped.mp4")
    }

    /// Ephemeral location of the assembled output.
    pub fn ephemeral_output(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Final persistent location of the output.
    pub fn persistent_output(&self, filename: &str) -> PathBuf {
        self.persistent_dir.join(filename)
    }

    /// Remove the ephemeral tree. Best effort: a missing directory is a
    /// no-op and removal failures are logged, never raised. The
    /// persistent directory is untouched.
    pub async fn teardown(&self) {
        if !self.root.exists() {
            return;
        }

        info!("Cleaning up ephemeral workspace: {}", self.root.display());
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => info!("Ephemeral cleanup complete"),
            Err(e) => warn!(
                "Ephemeral cleanup encountered an error: {}: {}",
                self.root.display(),
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(base: &Path) -> WorkerConfig {
        WorkerConfig {
            ephemeral_root: base.join("tmp"),
            persistent_root: base.join("storage"),
            ..WorkerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_create_builds_both_trees() {
        let base = TempDir::new().unwrap();
        let config = test_config(base.path());
        let job_id = JobId::from_string("abc");

        let workspace = JobWorkspace::create(&config, &job_id).await.unwrap();

        assert!(workspace.input_frames().is_dir());
        assert!(workspace.output_frames().is_dir());
        assert!(base.path().join("storage/job_abc").is_dir());
        assert_eq!(
            workspace.input_video(),
            base.path().join("tmp/job_abc/input.mp4")
        );
        assert_eq!(
            workspace.persistent_output("out.mp4"),
            base.path().join("storage/job_abc/out.mp4")
        );
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let base = TempDir::new().unwrap();
        let config = test_config(base.path());
        let job_id = JobId::from_string("abc");

        JobWorkspace::create(&config, &job_id).await.unwrap();
        JobWorkspace::create(&config, &job_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_teardown_removes_ephemeral_only() {
        let base = TempDir::new().unwrap();
        let config = test_config(base.path());
        let job_id = JobId::from_string("abc");

        let workspace = JobWorkspace::create(&config, &job_id).await.unwrap();
        fs::write(workspace.input_video(), b"data").await.unwrap();

        workspace.teardown().await;

        assert!(!workspace.root().exists());
        assert!(base.path().join("storage/job_abc").is_dir());
    }

    #[tokio::test]
    async fn test_teardown_twice_is_noop() {
        let base = TempDir::new().unwrap();
        let config = test_config(base.path());
        let job_id = JobId::from_string("abc");

        let workspace = JobWorkspace::create(&config, &job_id).await.unwrap();
        workspace.teardown().await;
        workspace.teardown().await;
    }
}
