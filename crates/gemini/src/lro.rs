//! Bounded polling client for long-running generation jobs.
//!
//! [`LongRunningJobClient`] drives one job per [`generate`] call:
//! submit, check status immediately, then wait -> emit progress ->
//! re-check until `max_polls` status checks have been made. A job that
//! never finishes sees `max_polls` progress messages before the timeout. The first failure aborts the call.
//! Only "not yet done" is retried; a failed status check is fatal.
//!
//! [`generate`]: LongRunningJobClient::generate

use std::time::Duration;

use conceptforge_core::progress::{progress_message, DOWNLOADING_MESSAGE};
use tokio_util::sync::CancellationToken;

use crate::job::{Credential, JobHandle, JobService, JobServiceError, JobStatus, ResultLocator};

/// Default wait between status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Default number of waits before giving up (30 x 10s = 5 minutes).
pub const DEFAULT_MAX_POLLS: u32 = 30;

/// Cadence and cap of the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before each re-check.
    pub interval: Duration,
    /// Maximum number of re-checks after the initial one.
    pub max_polls: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

impl PollPolicy {
    /// Total time spent waiting when the job never completes.
    pub fn time_budget(&self) -> Duration {
        self.interval * self.max_polls
    }
}

/// Why a generation call failed.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The job was rejected or the service could not be reached.
    #[error("Failed to start generation: {0}")]
    Submission(String),

    /// The poll cap was reached before the job completed.
    #[error("Video generation timed out after {}.", describe_budget(.budget))]
    Timeout {
        /// Total time waited (`interval x max_polls`).
        budget: Duration,
        /// Number of re-checks performed.
        polls: u32,
    },

    /// No API key is configured to fetch the result.
    #[error("API key is missing: cannot download the generated asset")]
    MissingCredential,

    /// The result fetch returned a non-success status.
    #[error("Failed to download generated asset (HTTP {status})")]
    Download {
        /// HTTP status code of the fetch.
        status: u16,
    },

    /// A status check or fetch failed without a response.
    #[error("Lost contact with the generation service: {0}")]
    Transport(String),

    /// The job finished without a usable result.
    #[error("Generation job failed: {0}")]
    JobFailed(String),

    /// The caller's cancellation token fired.
    #[error("Generation was cancelled")]
    Cancelled,
}

/// Human-readable form of a wait budget, e.g. `5 minutes` or `45 seconds`.
pub fn describe_budget(budget: &Duration) -> String {
    let secs = budget.as_secs();
    match secs {
        60 => "1 minute".to_string(),
        s if s >= 60 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s if s > 0 => format!("{s} seconds"),
        _ => format!("{} ms", budget.as_millis()),
    }
}

/// Drives a single long-running job from submission to downloaded bytes.
pub struct LongRunningJobClient<S> {
    service: S,
    credential: Option<Credential>,
    policy: PollPolicy,
}

impl<S: JobService> LongRunningJobClient<S> {
    /// * `credential` - appended to the result locator before download.
    pub fn new(service: S, credential: Option<Credential>, policy: PollPolicy) -> Self {
        Self {
            service,
            credential,
            policy,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Submit a job and return its handle.
    pub async fn submit(&self, request: &S::Request) -> Result<JobHandle, GenerationError> {
        let handle = self.service.submit(request).await.map_err(|e| match e {
            JobServiceError::MissingCredential => GenerationError::MissingCredential,
            other => GenerationError::Submission(other.to_string()),
        })?;
        tracing::info!(job = %handle, "Generation job submitted");
        Ok(handle)
    }

    /// Poll `handle` until it reports done or the cap is reached.
    pub async fn poll_until_complete<F>(
        &self,
        handle: &JobHandle,
        on_progress: F,
    ) -> Result<ResultLocator, GenerationError>
    where
        F: FnMut(&str) + Send,
    {
        self.poll_until_complete_with_cancel(handle, on_progress, &CancellationToken::new())
            .await
    }

    /// Like [`poll_until_complete`](Self::poll_until_complete), aborting
    /// with [`GenerationError::Cancelled`] once `cancel` fires.
    pub async fn poll_until_complete_with_cancel<F>(
        &self,
        handle: &JobHandle,
        mut on_progress: F,
        cancel: &CancellationToken,
    ) -> Result<ResultLocator, GenerationError>
    where
        F: FnMut(&str) + Send,
    {
        let max_polls = self.policy.max_polls;
        let mut iteration = 0u32;

        loop {
            if cancel.is_cancelled() {
                tracing::info!(job = %handle, iteration, "Generation cancelled");
                return Err(GenerationError::Cancelled);
            }

            let status = self
                .service
                .check_status(handle)
                .await
                .map_err(|e| status_error(handle, e))?;

            if let JobStatus::Done(locator) = status {
                tracing::info!(job = %handle, iteration, "Generation job completed");
                return Ok(locator);
            }

            if iteration >= max_polls {
                return Err(self.timed_out(handle, iteration));
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(job = %handle, iteration, "Generation cancelled while waiting");
                    return Err(GenerationError::Cancelled);
                }
                _ = tokio::time::sleep(self.policy.interval) => {}
            }

            iteration += 1;
            tracing::debug!(job = %handle, iteration, max_polls, "Checking generation status");
            on_progress(&progress_message(iteration, max_polls));

            // The cap counts status checks: the last wait is not followed by one.
            if iteration >= max_polls {
                return Err(self.timed_out(handle, iteration));
            }
        }
    }

    fn timed_out(&self, handle: &JobHandle, polls: u32) -> GenerationError {
        tracing::warn!(job = %handle, max_polls = self.policy.max_polls, "Generation job timed out");
        GenerationError::Timeout {
            budget: self.policy.time_budget(),
            polls,
        }
    }

    /// Download the asset behind `locator` with the credential attached.
    pub async fn resolve_result(&self, locator: &ResultLocator) -> Result<Vec<u8>, GenerationError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(GenerationError::MissingCredential)?;
        let url = locator
            .authorized(credential)
            .map_err(GenerationError::Transport)?;

        let resource = self
            .service
            .fetch(&url)
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !resource.is_success() {
            tracing::warn!(status = resource.status, "Generated asset download failed");
            return Err(GenerationError::Download {
                status: resource.status,
            });
        }

        tracing::info!(bytes = resource.body.len(), "Generated asset downloaded");
        Ok(resource.body)
    }

    /// Submit, poll to completion and download in one call.
    pub async fn generate<F>(
        &self,
        request: &S::Request,
        on_progress: F,
    ) -> Result<Vec<u8>, GenerationError>
    where
        F: FnMut(&str) + Send,
    {
        self.generate_with_cancel(request, on_progress, &CancellationToken::new())
            .await
    }

    /// [`generate`](Self::generate) with a cancellation token.
    pub async fn generate_with_cancel<F>(
        &self,
        request: &S::Request,
        on_progress: F,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, GenerationError>
    where
        F: FnMut(&str) + Send,
    {
        let handle = self.submit(request).await?;
        let locator = self
            .poll_until_complete_with_cancel(&handle, on_progress, cancel)
            .await?;
        tracing::info!(job = %handle, "{DOWNLOADING_MESSAGE}");
        self.resolve_result(&locator).await
    }
}

fn status_error(handle: &JobHandle, err: JobServiceError) -> GenerationError {
    tracing::warn!(job = %handle, error = %err, "Status check failed");
    match err {
        JobServiceError::JobFailed(msg) => GenerationError::JobFailed(msg),
        JobServiceError::MissingCredential => GenerationError::MissingCredential,
        other => GenerationError::Transport(other.to_string()),
    }
}
