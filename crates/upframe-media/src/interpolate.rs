//! AI interpolator invocation.
//!
//! The interpolator (rife-ncnn-vulkan compatible) reads a numbered PNG
//! sequence and writes a denser one. Its flags are positional-free and
//! stable across model versions: `-i <dir> -o <dir> -m <model>
//! -n <frames> -g <gpu> -j <load:proc:save> -x -z`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::command::check_interpolator;
use crate::error::{MediaError, MediaResult};

/// Default thread partition hint (load:proc:save).
pub const DEFAULT_THREAD_SPEC: &str = "4:8:4";

/// Builder for an interpolator invocation.
#[derive(Debug, Clone)]
pub struct InterpolatorCommand {
    /// Interpolator binary (name or absolute path)
    bin: PathBuf,
    /// Input frame directory
    input_dir: PathBuf,
    /// Output frame directory
    output_dir: PathBuf,
    /// Model name (e.g. "rife-v4.6")
    model: String,
    /// Total frames to generate
    frame_count: u64,
    /// GPU device index
    gpu_id: u32,
    /// Thread partition hint
    thread_spec: String,
}

impl InterpolatorCommand {
    pub fn new(
        bin: impl AsRef<Path>,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        model: impl Into<String>,
        frame_count: u64,
    ) -> Self {
        Self {
            bin: bin.as_ref().to_path_buf(),
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            model: model.into(),
            frame_count,
            gpu_id: 0,
            thread_spec: DEFAULT_THREAD_SPEC.to_string(),
        }
    }

    /// Set the GPU device index (default 0).
    pub fn gpu_id(mut self, gpu_id: u32) -> Self {
        self.gpu_id = gpu_id;
        self
    }

    /// Set the thread partition hint (default `4:8:4`).
    pub fn thread_spec(mut self, spec: impl Into<String>) -> Self {
        self.thread_spec = spec.into();
        self
    }

    /// Build the argument list.
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "-i".to_string(),
            self.input_dir.to_string_lossy().to_string(),
            "-o".to_string(),
            self.output_dir.to_string_lossy().to_string(),
            "-m".to_string(),
            self.model.clone(),
            "-n".to_string(),
            self.frame_count.to_string(),
            "-g".to_string(),
            self.gpu_id.to_string(),
            "-j".to_string(),
            self.thread_spec.clone(),
            "-x".to_string(),
            "-z".to_string(),
        ]
    }
}

/// Run the interpolator to completion, optionally bounded by a timeout.
pub async fn run_interpolation(
    cmd: &InterpolatorCommand,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let bin = check_interpolator(&cmd.bin)?;
    let args = cmd.build_args();

    info!(
        "Running interpolation: model={} frames={} gpu={}",
        cmd.model, cmd.frame_count, cmd.gpu_id
    );
    debug!("Interpolator command: {} {}", bin.display(), args.join(" "));

    let mut child = Command::new(&bin)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stderr = child.stderr.take().ok_or_else(|| {
        MediaError::interpolation_failed("stderr not captured", None, None)
    })?;
    let stderr_handle = tokio::spawn(async move {
        let mut buf = String::new();
        let mut reader = tokio::io::BufReader::new(stderr);
        let _ = tokio::io::AsyncReadExt::read_to_string(&mut reader, &mut buf).await;
        buf
    });

    // Keep ownership of the child so a timed-out process can be killed,
    // not just abandoned
    let status = if let Some(secs) = timeout_secs {
        match tokio::time::timeout(std::time::Duration::from_secs(secs), child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                warn!(
                    "Interpolator timed out after {} seconds, killing process",
                    secs
                );
                let _ = child.kill().await;
                return Err(MediaError::Timeout(secs));
            }
        }
    } else {
        child.wait().await?
    };

    let stderr = stderr_handle.await.unwrap_or_default();

    if !status.success() {
        return Err(MediaError::interpolation_failed(
            "Interpolator exited with non-zero status",
            (!stderr.is_empty()).then_some(stderr),
            status.code(),
        ));
    }

    info!("Interpolation complete: {}", cmd.output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolator_args() {
        let cmd = InterpolatorCommand::new(
            "rife-ncnn-vulkan",
            "/tmp/job/input_frames",
            "/tmp/job/output_frames",
            "rife-v4.6",
            991,
        );

        let args = cmd.build_args();
        assert_eq!(
            args,
            vec![
                "-i",
                "/tmp/job/input_frames",
                "-o",
                "/tmp/job/output_frames",
                "-m",
                "rife-v4.6",
                "-n",
                "991",
                "-g",
                "0",
                "-j",
                "4:8:4",
                "-x",
                "-z",
            ]
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_interpolator_process() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("survived");

        // Stand-in interpolator: sleeps past the timeout, then records
        // that it was still alive
        let bin = dir.path().join("fake-interpolator");
        std::fs::write(
            &bin,
            format!("#!/bin/sh\nsleep 3\ntouch {}\n", marker.display()),
        )
        .unwrap();
        let mut perms = std::fs::metadata(&bin).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&bin, perms).unwrap();

        let cmd = InterpolatorCommand::new(&bin, dir.path(), dir.path(), "rife-v4.6", 10);
        let err = run_interpolation(&cmd, Some(1)).await.unwrap_err();
        assert!(matches!(err, MediaError::Timeout(1)));

        // Give a leaked process time to reach the marker write; a killed
        // one never does
        tokio::time::sleep(std::time::Duration::from_secs(3)).await;
        assert!(
            !marker.exists(),
            "interpolator process must be killed when the timeout expires"
        );
    }

    #[test]
    fn test_gpu_and_thread_overrides() {
        let cmd = InterpolatorCommand::new("rife", "in", "out", "rife-v4", 10)
            .gpu_id(2)
            .thread_spec("2:4:2");

        let args = cmd.build_args();
        let g = args.iter().position(|a| a == "-g").unwrap();
        assert_eq!(args[g + 1], "2");
        let j = args.iter().position(|a| a == "-j").unwrap();
        assert_eq!(args[j + 1], "2:4:2");
    }
}
