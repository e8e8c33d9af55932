//! Types and the service seam for long-running generation jobs.
//!
//! [`JobService`] is the upstream collaborator of
//! [`LongRunningJobClient`](crate::lro::LongRunningJobClient): it accepts a
//! submission, answers status checks keyed by a [`JobHandle`], and fetches
//! the bytes behind a result URL. The Veo implementation lives in
//! [`crate::veo`]; tests substitute scripted fakes.

use std::fmt;

use async_trait::async_trait;

/// API key for the generative service. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// Opaque reference to a submitted job (for Veo, the operation name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URI of a generated asset. Only fetchable with a credential attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLocator(String);

impl ResultLocator {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The locator with `key=<credential>` appended to its query string.
    pub fn authorized(&self, credential: &Credential) -> Result<String, String> {
        let mut url = reqwest::Url::parse(&self.0)
            .map_err(|e| format!("invalid result locator '{}': {e}", self.0))?;
        url.query_pairs_mut().append_pair("key", credential.expose());
        Ok(url.into())
    }
}

/// Completion state reported by a status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Done(ResultLocator),
}

/// Raw outcome of fetching a result URL.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// HTTP status code.
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedResource {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors surfaced by a [`JobService`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    /// The service answered with a non-2xx status.
    #[error("service rejected the request ({status}): {body}")]
    Rejected {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// The response could not be interpreted.
    #[error("unexpected service response: {0}")]
    Malformed(String),

    /// The job reached a terminal state without a usable result.
    #[error("{0}")]
    JobFailed(String),

    /// The service needs a credential that is not configured.
    #[error("no API key configured")]
    MissingCredential,
}

/// Upstream service that runs long-running generation jobs.
#[async_trait]
pub trait JobService: Send + Sync {
    /// What a submission carries (for Veo, the final prompt text).
    type Request: Send + Sync;

    async fn submit(&self, request: &Self::Request) -> Result<JobHandle, JobServiceError>;

    async fn check_status(&self, handle: &JobHandle) -> Result<JobStatus, JobServiceError>;

    /// Fetch `url` without interpreting the status code.
    async fn fetch(&self, url: &str) -> Result<FetchedResource, JobServiceError>;
}
