//! Worker configuration.

use std::path::PathBuf;

use upframe_media::interpolate::DEFAULT_THREAD_SPEC;

/// Worker configuration.
///
/// Filesystem roots and the interpolator binary are explicit
/// configuration here rather than ambient constants; everything is
/// overridable through `UPFRAME_*` environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Root for ephemeral job workspaces
    pub ephemeral_root: PathBuf,
    /// Root for persistent job outputs
    pub persistent_root: PathBuf,
    /// Interpolator binary (name resolved via PATH, or absolute path)
    pub interpolator_bin: PathBuf,
    /// GPU device index passed to the interpolator
    pub gpu_id: u32,
    /// Thread partition hint passed to the interpolator
    pub thread_spec: String,
    /// Timeout for each external tool invocation; None blocks until exit
    pub tool_timeout_secs: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            ephemeral_root: std::env::temp_dir(),
            persistent_root: PathBuf::from("/workspace/upframe-output"),
            interpolator_bin: PathBuf::from("rife-ncnn-vulkan"),
            gpu_id: 0,
            thread_spec: DEFAULT_THREAD_SPEC.to_string(),
            tool_timeout_secs: None,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ephemeral_root: std::env::var("UPFRAME_EPHEMERAL_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.ephemeral_root),
            persistent_root: std::env::var("UPFRAME_PERSISTENT_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.persistent_root),
            interpolator_bin: std::env::var("UPFRAME_INTERPOLATOR_BIN")
                .map(PathBuf::from)
                .unwrap_or(defaults.interpolator_bin),
            gpu_id: std::env::var("UPFRAME_GPU_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.gpu_id),
            thread_spec: std::env::var("UPFRAME_THREAD_SPEC")
                .unwrap_or(defaults.thread_spec),
            tool_timeout_secs: std::env::var("UPFRAME_TOOL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}
