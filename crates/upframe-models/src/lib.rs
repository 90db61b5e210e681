//! Shared data models for the upframe interpolation worker.
//!
//! This crate provides Serde-serializable types for:
//! - Job requests and identifiers
//! - The derived interpolation plan
//! - Job lifecycle stages
//! - Success/error response shapes

pub mod job;
pub mod plan;
pub mod response;

// Re-export common types
pub use job::{JobEvent, JobId, JobRequest, JobStage, DEFAULT_MODEL, DEFAULT_TARGET_FPS};
pub use plan::{plan, InterpolationPlan, PlanError};
pub use response::JobResponse;
