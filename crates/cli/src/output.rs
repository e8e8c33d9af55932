//! Rendering and saving generation results.

use std::io;
use std::path::{Component, Path, PathBuf};

use conceptforge_core::export::{
    comic_panel_file_name, TextExport, CONCEPT_ART_FILE_NAME, VIDEO_SHOT_FILE_NAME,
};
use conceptforge_gemini::GeneratedImage;

/// Result of one generation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A text blueprint.
    Text(TextExport),
    ConceptArt(GeneratedImage),
    ComicStrip(Vec<GeneratedImage>),
    /// Raw MP4 bytes.
    Video(Vec<u8>),
}

impl Outcome {
    /// Text printed to stdout.
    pub fn summary(&self) -> String {
        match self {
            Outcome::Text(export) => export.contents.clone(),
            Outcome::ConceptArt(image) => {
                format!("Generated concept art ({} bytes)", image.bytes.len())
            }
            Outcome::ComicStrip(panels) => format!("Generated {} comic panels", panels.len()),
            Outcome::Video(bytes) => format!("Generated video shot ({} bytes)", bytes.len()),
        }
    }

    /// File names and contents this outcome saves to.
    pub fn files(&self) -> Vec<(String, &[u8])> {
        match self {
            Outcome::Text(export) => {
                vec![(export.file_name.clone(), export.contents.as_bytes())]
            }
            Outcome::ConceptArt(image) => {
                vec![(CONCEPT_ART_FILE_NAME.to_string(), image.bytes.as_slice())]
            }
            Outcome::ComicStrip(panels) => panels
                .iter()
                .enumerate()
                .map(|(i, panel)| (comic_panel_file_name(i), panel.bytes.as_slice()))
                .collect(),
            Outcome::Video(bytes) => vec![(VIDEO_SHOT_FILE_NAME.to_string(), bytes.as_slice())],
        }
    }
}

/// Write every file of `outcome` into `dir`, creating it if needed.
///
/// Returns the written paths in order. A file name that is not a single
/// plain component fails with [`io::ErrorKind::InvalidInput`] before
/// anything is written.
pub async fn save(outcome: &Outcome, dir: &Path) -> io::Result<Vec<PathBuf>> {
    let files = outcome.files();
    for (name, _) in &files {
        ensure_plain_file_name(name)?;
    }

    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::new();
    for (name, bytes) in files {
        let path = dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved file");
        written.push(path);
    }
    Ok(written)
}

fn ensure_plain_file_name(name: &str) -> io::Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to save outside the output directory: '{name}'"),
        )),
    }
}
