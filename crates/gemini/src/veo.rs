//! [`JobService`] backed by the Veo long-running video endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{GeminiApi, GeminiApiError};
use crate::job::{FetchedResource, JobHandle, JobService, JobServiceError, JobStatus, ResultLocator};

/// Submits video prompts to Veo and checks their operations.
pub struct VeoJobService {
    api: Arc<GeminiApi>,
    model: String,
}

impl VeoJobService {
    pub fn new(api: Arc<GeminiApi>, model: String) -> Self {
        Self { api, model }
    }
}

impl From<GeminiApiError> for JobServiceError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::Request(e) => JobServiceError::Unreachable(e.to_string()),
            GeminiApiError::ApiError { status, body } => JobServiceError::Rejected { status, body },
            GeminiApiError::MissingCredential => JobServiceError::MissingCredential,
            GeminiApiError::Malformed(msg) => JobServiceError::Malformed(msg),
        }
    }
}

#[async_trait]
impl JobService for VeoJobService {
    /// Final prompt text.
    type Request = String;

    async fn submit(&self, prompt: &Self::Request) -> Result<JobHandle, JobServiceError> {
        let name = self.api.submit_video(&self.model, prompt).await?;
        tracing::debug!(model = %self.model, operation = %name, "Veo operation started");
        Ok(JobHandle::new(name))
    }

    async fn check_status(&self, handle: &JobHandle) -> Result<JobStatus, JobServiceError> {
        let operation = self.api.get_operation(handle.as_str()).await?;
        if !operation.done {
            return Ok(JobStatus::Pending);
        }

        if let Some(error) = &operation.error {
            return Err(JobServiceError::JobFailed(format!(
                "(code {}) {}",
                error.code, error.message
            )));
        }

        operation
            .video_uri()
            .map(|uri| JobStatus::Done(ResultLocator::new(uri)))
            .ok_or_else(|| {
                JobServiceError::JobFailed("operation finished without a video sample".into())
            })
    }

    async fn fetch(&self, url: &str) -> Result<FetchedResource, JobServiceError> {
        let (status, body) = self.api.fetch(url).await?;
        Ok(FetchedResource { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn api_rejection_keeps_status_and_body() {
        let err: JobServiceError = GeminiApiError::ApiError {
            status: 429,
            body: "quota".into(),
        }
        .into();
        assert_matches!(err, JobServiceError::Rejected { status: 429, ref body } if body == "quota");
    }

    #[test]
    fn missing_key_maps_to_missing_credential() {
        let err: JobServiceError = GeminiApiError::MissingCredential.into();
        assert_matches!(err, JobServiceError::MissingCredential);
    }

    #[test]
    fn malformed_reply_stays_malformed() {
        let err: JobServiceError = GeminiApiError::Malformed("no name".into()).into();
        assert_matches!(err, JobServiceError::Malformed(msg) if msg == "no name");
    }
}
