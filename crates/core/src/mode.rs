//! Generation modes offered by the studio.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the seven generation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    Character,
    Plot,
    Style,
    Intel,
    ConceptArt,
    ComicStrip,
    VideoShot,
}

impl GenerationMode {
    /// All modes in display order.
    pub const ALL: [GenerationMode; 7] = [
        Self::Character,
        Self::Plot,
        Self::Style,
        Self::Intel,
        Self::ConceptArt,
        Self::ComicStrip,
        Self::VideoShot,
    ];

    /// Stable identifier, e.g. `"concept-art"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Plot => "plot",
            Self::Style => "style",
            Self::Intel => "intel",
            Self::ConceptArt => "concept-art",
            Self::ComicStrip => "comic-strip",
            Self::VideoShot => "video-shot",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
