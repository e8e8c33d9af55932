//! One operation per generation mode, on top of [`GeminiApi`].
//!
//! Every operation validates its request first, so invalid input never
//! reaches the network. The video mode runs through
//! [`LongRunningJobClient`].

use std::sync::Arc;

use conceptforge_core::concept::{
    parse_concept, CharacterConcept, CharacterIntel, PlotOutline, VisualStyle,
};
use conceptforge_core::error::CoreError;
use conceptforge_core::request::{
    validate_request, CharacterRequest, ComicStripRequest, ConceptArtRequest, IntelRequest,
    PlotRequest, StyleRequest, VideoShotRequest,
};
use conceptforge_core::{prompt, schema};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::api::{GeminiApi, GeminiApiError, GeneratedImage};
use crate::config::GeminiConfig;
use crate::lro::{GenerationError, LongRunningJobClient};
use crate::veo::VeoJobService;

/// Errors returned by [`ConceptStudio`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// The request failed validation or the reply could not be parsed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A direct REST call failed.
    #[error(transparent)]
    Api(#[from] GeminiApiError),

    /// The long-running video job failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Image generation failed: No images were returned.")]
    NoImages,
}

/// Facade over the Gemini API offering every generation mode.
pub struct ConceptStudio {
    api: Arc<GeminiApi>,
    text_model: String,
    image_model: String,
    video: LongRunningJobClient<VeoJobService>,
}

impl ConceptStudio {
    pub fn new(config: GeminiConfig) -> Result<Self, StudioError> {
        let api = GeminiApi::new(&config)?;
        Ok(Self::with_api(api, config))
    }

    /// Build a studio around an existing API client.
    pub fn with_api(api: GeminiApi, config: GeminiConfig) -> Self {
        let api = Arc::new(api);
        let video = LongRunningJobClient::new(
            VeoJobService::new(Arc::clone(&api), config.video_model),
            config.api_key,
            config.poll,
        );
        Self {
            api,
            text_model: config.text_model,
            image_model: config.image_model,
            video,
        }
    }

    // ---- text modes ----

    pub async fn generate_character_concept(
        &self,
        req: &CharacterRequest,
    ) -> Result<CharacterConcept, StudioError> {
        validate_request(req)?;
        self.generate_json(&prompt::character_prompt(req), &schema::character_schema())
            .await
    }

    pub async fn generate_plot_outline(&self, req: &PlotRequest) -> Result<PlotOutline, StudioError> {
        validate_request(req)?;
        self.generate_json(&prompt::plot_prompt(req), &schema::plot_schema())
            .await
    }

    pub async fn generate_visual_style(&self, req: &StyleRequest) -> Result<VisualStyle, StudioError> {
        validate_request(req)?;
        self.generate_json(&prompt::style_prompt(req), &schema::style_schema())
            .await
    }

    pub async fn generate_character_intel(
        &self,
        req: &IntelRequest,
    ) -> Result<CharacterIntel, StudioError> {
        validate_request(req)?;
        self.generate_json(&prompt::intel_prompt(req), &schema::intel_schema())
            .await
    }

    // ---- image modes ----

    pub async fn generate_concept_art(
        &self,
        req: &ConceptArtRequest,
    ) -> Result<Vec<GeneratedImage>, StudioError> {
        validate_request(req)?;
        self.generate_images(&prompt::concept_art_prompt(req), 1).await
    }

    /// One image per panel, requested in a single call.
    pub async fn generate_comic_strip(
        &self,
        req: &ComicStripRequest,
    ) -> Result<Vec<GeneratedImage>, StudioError> {
        validate_request(req)?;
        self.generate_images(&prompt::comic_strip_prompt(req), req.panels)
            .await
    }

    // ---- video mode ----

    /// Generate a video clip, reporting poll progress through `on_progress`.
    pub async fn generate_video_shot<F>(
        &self,
        req: &VideoShotRequest,
        on_progress: F,
    ) -> Result<Vec<u8>, StudioError>
    where
        F: FnMut(&str) + Send,
    {
        self.generate_video_shot_with_cancel(req, on_progress, &CancellationToken::new())
            .await
    }

    pub async fn generate_video_shot_with_cancel<F>(
        &self,
        req: &VideoShotRequest,
        on_progress: F,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, StudioError>
    where
        F: FnMut(&str) + Send,
    {
        validate_request(req)?;
        let prompt = prompt::video_prompt(req);
        Ok(self
            .video
            .generate_with_cancel(&prompt, on_progress, cancel)
            .await?)
    }

    // ---- private helpers ----

    async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<T, StudioError> {
        let text = match self.api.generate_content(&self.text_model, prompt, schema).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(model = %self.text_model, error = %e, "Text generation failed");
                return Err(e.into());
            }
        };
        Ok(parse_concept(&text)?)
    }

    async fn generate_images(
        &self,
        prompt: &str,
        count: u8,
    ) -> Result<Vec<GeneratedImage>, StudioError> {
        let images = match self.api.generate_images(&self.image_model, prompt, count).await {
            Ok(images) => images,
            Err(e) => {
                tracing::error!(model = %self.image_model, error = %e, "Image generation failed");
                return Err(e.into());
            }
        };
        if images.is_empty() {
            return Err(StudioError::NoImages);
        }
        tracing::info!(count = images.len(), "Images generated");
        Ok(images)
    }
}
