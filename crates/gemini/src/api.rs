//! REST API client for the Gemini HTTP endpoints.
//!
//! Wraps structured text generation (`:generateContent`), Imagen image
//! generation (`:predict`), Veo video submission (`:predictLongRunning`),
//! operation status retrieval and raw asset download using [`reqwest`].
//! Authenticated calls send the key in the `x-goog-api-key` header.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::job::Credential;

/// Sampling temperature for structured text generation.
pub const TEXT_TEMPERATURE: f32 = 0.8;
/// Nucleus sampling cutoff for structured text generation.
pub const TEXT_TOP_P: f32 = 0.9;
/// MIME type requested from Imagen.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";
pub const IMAGE_ASPECT_RATIO: &str = "1:1";
pub const VIDEO_ASPECT_RATIO: &str = "16:9";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the Gemini API.
pub struct GeminiApi {
    client: reqwest::Client,
    /// Used only by [`GeminiApi::fetch`], with the download timeout.
    download_client: reqwest::Client,
    base_url: String,
    api_key: Option<Credential>,
}

/// Errors from the Gemini REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// An authenticated call was attempted without an API key.
    #[error("API_KEY environment variable not set")]
    MissingCredential,

    /// The response was well-formed HTTP but not the expected shape.
    #[error("Unexpected Gemini response: {0}")]
    Malformed(String),
}

/// A decoded image returned by Imagen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Render as a `data:` URL suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{encoded}", self.mime_type)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a, P> {
    instances: Vec<PromptInstance<'a>>,
    parameters: P,
}

#[derive(Debug, Serialize)]
struct PromptInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageParameters {
    sample_count: u8,
    output_mime_type: &'static str,
    aspect_ratio: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    aspect_ratio: &'static str,
    sample_count: u8,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<ImagePrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagePrediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

/// Reply from `:predictLongRunning`.
#[derive(Debug, Deserialize)]
struct OperationStarted {
    name: String,
}

/// State of a long-running operation as returned by `GET /{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub done: bool,
    pub response: Option<OperationResponse>,
    pub error: Option<OperationError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSample {
    pub video: Option<VideoRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoRef {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl Operation {
    /// URI of the first generated video sample, if any.
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .iter()
            .find_map(|sample| sample.video.as_ref().map(|v| v.uri.as_str()))
    }
}

impl GeminiApi {
    /// Create a client from configuration.
    ///
    /// REST calls are bounded by `request_timeout`. Asset downloads get a
    /// separate client bounded by `download_timeout`, connecting within
    /// `request_timeout`.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let download_client = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .timeout(config.download_timeout)
            .build()?;
        Ok(Self {
            client,
            download_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }


    /// Generate JSON text constrained by `schema`.
    ///
    /// Sends `POST models/{model}:generateContent` and returns the text of
    /// the first candidate, trimmed.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, GeminiApiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                temperature: TEXT_TEMPERATURE,
                top_p: TEXT_TOP_P,
            },
        };

        let response = self
            .authorized_post(&format!("models/{model}:generateContent"))?
            .json(&body)
            .send()
            .await?;
        let parsed: GenerateContentResponse = Self::parse_response(response).await?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .ok_or_else(|| GeminiApiError::Malformed("no candidates returned".into()))?;

        Ok(text.trim().to_string())
    }

    /// Generate `count` images for `prompt` via `POST models/{model}:predict`.
    ///
    /// Returns an empty vector when the service produced nothing (for
    /// example when every sample was filtered).
    pub async fn generate_images(
        &self,
        model: &str,
        prompt: &str,
        count: u8,
    ) -> Result<Vec<GeneratedImage>, GeminiApiError> {
        let body = PredictRequest {
            instances: vec![PromptInstance { prompt }],
            parameters: ImageParameters {
                sample_count: count,
                output_mime_type: IMAGE_MIME_TYPE,
                aspect_ratio: IMAGE_ASPECT_RATIO,
            },
        };

        let response = self
            .authorized_post(&format!("models/{model}:predict"))?
            .json(&body)
            .send()
            .await?;
        let parsed: PredictResponse = Self::parse_response(response).await?;

        parsed
            .predictions
            .into_iter()
            .filter_map(|p| p.bytes_base64_encoded.map(|b64| (b64, p.mime_type)))
            .map(|(b64, mime_type)| {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(b64.as_bytes())
                    .map_err(|e| GeminiApiError::Malformed(format!("invalid image data: {e}")))?;
                Ok(GeneratedImage {
                    mime_type: mime_type.unwrap_or_else(|| IMAGE_MIME_TYPE.to_string()),
                    bytes,
                })
            })
            .collect()
    }

    /// Start a video generation job via `POST models/{model}:predictLongRunning`.
    ///
    /// Returns the operation name used for subsequent status checks.
    pub async fn submit_video(&self, model: &str, prompt: &str) -> Result<String, GeminiApiError> {
        let body = PredictRequest {
            instances: vec![PromptInstance { prompt }],
            parameters: VideoParameters {
                aspect_ratio: VIDEO_ASPECT_RATIO,
                sample_count: 1,
            },
        };

        let response = self
            .authorized_post(&format!("models/{model}:predictLongRunning"))?
            .json(&body)
            .send()
            .await?;
        let started: OperationStarted = Self::parse_response(response).await?;
        Ok(started.name)
    }

    /// Retrieve the state of a long-running operation via `GET /{name}`.
    pub async fn get_operation(&self, name: &str) -> Result<Operation, GeminiApiError> {
        let key = self.api_key.as_ref().ok_or(GeminiApiError::MissingCredential)?;
        let response = self
            .client
            .get(self.endpoint(name))
            .header(API_KEY_HEADER, key.expose())
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch an absolute URL and return its status and body unchecked.
    ///
    /// No key header is sent; callers embed the credential in the URL.
    pub async fn fetch(&self, url: &str) -> Result<(u16, Vec<u8>), GeminiApiError> {
        let response = self.download_client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok((status, body))
    }

    // ---- private helpers ----

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized_post(&self, path: &str) -> Result<reqwest::RequestBuilder, GeminiApiError> {
        let key = self.api_key.as_ref().ok_or(GeminiApiError::MissingCredential)?;
        Ok(self
            .client
            .post(self.endpoint(path))
            .header(API_KEY_HEADER, key.expose()))
    }

    /// Ensure the response has a success status code, or return
    /// [`GeminiApiError::ApiError`] with the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GeminiApiError::Malformed(e.to_string()))
    }
}
