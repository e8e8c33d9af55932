//! Gemini client library for Concept Forge.
//!
//! Provides the REST wrapper around the Gemini, Imagen and Veo endpoints,
//! the [`JobService`](job::JobService) seam for long-running jobs, the
//! bounded polling client that drives a video job to completion, and the
//! [`ConceptStudio`](studio::ConceptStudio) facade with one operation per
//! generation mode.

pub mod api;
pub mod config;
pub mod job;
pub mod lro;
pub mod studio;
pub mod veo;

pub use api::{GeminiApi, GeminiApiError, GeneratedImage};
pub use config::{ConfigError, GeminiConfig};
pub use job::{Credential, JobHandle, JobService, JobServiceError, JobStatus, ResultLocator};
pub use lro::{GenerationError, LongRunningJobClient, PollPolicy};
pub use studio::{ConceptStudio, StudioError};
