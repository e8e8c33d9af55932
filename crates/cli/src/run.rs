//! Dispatch a parsed [`Command`] to the matching studio operation.

use conceptforge_core::concept::GeneratedConcept;
use conceptforge_core::export::export_concept;
use conceptforge_core::progress::INITIATING_MESSAGE;
use conceptforge_core::request::{
    CharacterRequest, ComicStripRequest, ConceptArtRequest, IntelRequest, PlotRequest,
    StyleRequest, VideoShotRequest,
};
use conceptforge_gemini::{ConceptStudio, StudioError};

use crate::args::Command;
use crate::output::Outcome;

pub async fn execute(studio: &ConceptStudio, command: &Command) -> Result<Outcome, StudioError> {
    let mode = command.mode();
    tracing::info!(mode = %mode, "Generating");

    let outcome = match command {
        Command::Character { idea } => {
            let concept = studio
                .generate_character_concept(&CharacterRequest::new(idea.as_str()))
                .await?;
            text(GeneratedConcept::Character(concept))
        }
        Command::Plot {
            hero,
            villain,
            theme,
        } => {
            let req = PlotRequest::new(hero.as_str(), villain.as_str(), theme.as_str());
            text(GeneratedConcept::Plot(studio.generate_plot_outline(&req).await?))
        }
        Command::Style { direction } => {
            let req = StyleRequest::new(direction.as_str());
            text(GeneratedConcept::Style(studio.generate_visual_style(&req).await?))
        }
        Command::Intel { character } => {
            let req = IntelRequest::new(character.as_str());
            text(GeneratedConcept::Intel(
                studio.generate_character_intel(&req).await?,
            ))
        }
        Command::ConceptArt { prompt } => {
            let image = studio
                .generate_concept_art(&ConceptArtRequest::new(prompt.as_str()))
                .await?
                .into_iter()
                .next()
                .ok_or(StudioError::NoImages)?;
            Outcome::ConceptArt(image)
        }
        Command::ComicStrip {
            scenario,
            panels,
            style,
        } => {
            let req = ComicStripRequest::new(scenario.as_str(), *panels, style.as_str());
            Outcome::ComicStrip(studio.generate_comic_strip(&req).await?)
        }
        Command::VideoShot { prompt } => {
            tracing::info!("{INITIATING_MESSAGE}");
            let bytes = studio
                .generate_video_shot(&VideoShotRequest::new(prompt.as_str()), |message| {
                    tracing::info!(progress = message, "Video generation in progress")
                })
                .await?;
            Outcome::Video(bytes)
        }
    };

    Ok(outcome)
}

fn text(concept: GeneratedConcept) -> Outcome {
    Outcome::Text(export_concept(&concept))
}
