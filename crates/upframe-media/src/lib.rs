#![deny(unreachable_patterns)]
//! FFmpeg and interpolator CLI wrappers for video frame-rate upsampling.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building (multi-input, argument-list based)
//! - Progress parsing from `-progress pipe:2`
//! - Optional timeouts on external tool invocations
//! - The pipeline operations: probe, deduplicate, extract, interpolate,
//!   pad, assemble
//! - Streaming HTTP download and cross-device file moves

pub mod assemble;
pub mod command;
pub mod dedupe;
pub mod download;
pub mod error;
pub mod frames;
pub mod fs_utils;
pub mod interpolate;
pub mod probe;
pub mod progress;

pub use assemble::assemble_video;
pub use command::{check_ffmpeg, check_ffprobe, check_interpolator, FfmpegCommand, FfmpegRunner};
pub use dedupe::{deduplicate_video, DEDUPE_FILTER};
pub use download::download_video;
pub use error::{MediaError, MediaResult};
pub use frames::{extract_frames, last_frame, pad_frames};
pub use fs_utils::move_file;
pub use interpolate::{run_interpolation, InterpolatorCommand};
pub use probe::{probe_video, VideoInfo};
pub use progress::{FfmpegProgress, ProgressCallback};
