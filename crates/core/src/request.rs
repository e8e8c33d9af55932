//! Per-mode generation requests and their validation rules.
//!
//! Constructors trim free-text input so that whitespace-only values fail
//! the `length(min = 1)` rules. [`validate_request`] must pass before any
//! request is turned into a prompt.

use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Comic strip options
// ---------------------------------------------------------------------------

/// Art styles offered for a comic strip.
pub const COMIC_STRIP_STYLES: &[&str] = &[
    "Classic Comic",
    "Manga",
    "Noir",
    "Gritty 90s",
    "Sci-Fi Comic",
    "Fantasy Comic",
    "Superhero Comic",
];

/// Default art style for a comic strip.
pub const DEFAULT_COMIC_STRIP_STYLE: &str = "Classic Comic";

/// Default panel count for a comic strip.
pub const DEFAULT_PANEL_COUNT: u8 = 2;

fn known_comic_style(style: &str) -> Result<(), ValidationError> {
    if COMIC_STRIP_STYLES.contains(&style) {
        Ok(())
    } else {
        Err(ValidationError::new("comic_style").with_message(Cow::Owned(format!(
            "Unknown comic strip style '{style}'. Must be one of: {}",
            COMIC_STRIP_STYLES.join(", ")
        ))))
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Validate)]
pub struct CharacterRequest {
    #[validate(length(min = 1, message = "Character idea must not be empty"))]
    pub idea: String,
}

impl CharacterRequest {
    pub fn new(idea: impl Into<String>) -> Self {
        Self { idea: trimmed(idea) }
    }
}

/// Hero, villain and theme are all required.
#[derive(Debug, Clone, Validate)]
pub struct PlotRequest {
    #[validate(length(min = 1, message = "Hero must be selected"))]
    pub hero: String,
    #[validate(length(min = 1, message = "Villain must be selected"))]
    pub villain: String,
    #[validate(length(min = 1, message = "Theme must be selected"))]
    pub theme: String,
}

impl PlotRequest {
    pub fn new(hero: impl Into<String>, villain: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            hero: trimmed(hero),
            villain: trimmed(villain),
            theme: trimmed(theme),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct StyleRequest {
    #[validate(length(min = 1, message = "Style direction must not be empty"))]
    pub direction: String,
}

impl StyleRequest {
    pub fn new(direction: impl Into<String>) -> Self {
        Self { direction: trimmed(direction) }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct IntelRequest {
    #[validate(length(min = 1, message = "Character name must not be empty"))]
    pub character: String,
}

impl IntelRequest {
    pub fn new(character: impl Into<String>) -> Self {
        Self { character: trimmed(character) }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ConceptArtRequest {
    #[validate(length(min = 1, message = "Concept art prompt must not be empty"))]
    pub prompt: String,
}

impl ConceptArtRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: trimmed(prompt) }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ComicStripRequest {
    #[validate(length(min = 1, message = "Comic strip scenario must not be empty"))]
    pub scenario: String,
    #[validate(range(min = 2, max = 4, message = "Panel count must be 2, 3 or 4"))]
    pub panels: u8,
    #[validate(custom(function = "known_comic_style"))]
    pub style: String,
}

impl ComicStripRequest {
    pub fn new(scenario: impl Into<String>, panels: u8, style: impl Into<String>) -> Self {
        Self {
            scenario: trimmed(scenario),
            panels,
            style: trimmed(style),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct VideoShotRequest {
    #[validate(length(min = 1, message = "Video shot prompt must not be empty"))]
    pub prompt: String,
}

impl VideoShotRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: trimmed(prompt) }
    }
}

/// Run the declarative rules for a request, mapping failures into
/// [`CoreError::Validation`].
pub fn validate_request<T: Validate>(request: &T) -> Result<(), CoreError> {
    request.validate().map_err(CoreError::from)
}

fn trimmed(value: impl Into<String>) -> String {
    value.into().trim().to_string()
}
