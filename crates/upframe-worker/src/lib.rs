//! Frame interpolation job worker.
//!
//! Orchestrates a single job end to end: validate input, set up a
//! job-scoped workspace, probe the source, compute the interpolation
//! plan, drive the external tool pipeline, assemble the final video,
//! relocate it to persistent storage and clean up.

pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod pipeline;
pub mod workspace;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use handler::handle_event;
pub use logging::JobLogger;
pub use workspace::JobWorkspace;
