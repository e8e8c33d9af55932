//! Prompt construction for every generation mode.

use crate::request::{
    CharacterRequest, ComicStripRequest, ConceptArtRequest, IntelRequest, PlotRequest,
    StyleRequest, VideoShotRequest,
};

pub fn character_prompt(req: &CharacterRequest) -> String {
    format!(
        "You are a lead character designer in a Marvel writers' room. \
         Develop an original character from this idea: \"{}\". \
         Give them a fitting name, a compelling origin story of two to three paragraphs, \
         a list of unique powers, meaningful weaknesses that create dramatic conflict, \
         and a detailed visual description suitable for concept art.",
        req.idea
    )
}

pub fn plot_prompt(req: &PlotRequest) -> String {
    format!(
        "You are a story editor for a Marvel animated series. \
         Write three distinct episode plot outlines in which {} faces {}, \
         exploring the theme of \"{}\". \
         Each outline needs a catchy title and three key plot points covering \
         the beginning, middle and end of the episode.",
        req.hero, req.villain, req.theme
    )
}

pub fn style_prompt(req: &StyleRequest) -> String {
    format!(
        "You are an art director defining the look of a new Marvel production. \
         Create a visual style guide based on this direction: \"{}\". \
         Name the style, then describe the overall aesthetic and mood, \
         the approach to character design, the color palette and its purpose, \
         and the treatment of backgrounds and environments.",
        req.direction
    )
}

pub fn intel_prompt(req: &IntelRequest) -> String {
    format!(
        "You are a S.H.I.E.L.D. intelligence analyst. \
         Compile a classified briefing on {}. \
         List known aliases, the primary base of operations, an assessment of abilities, \
         a psychological profile, and exploitable weaknesses.",
        req.character
    )
}

pub fn concept_art_prompt(req: &ConceptArtRequest) -> String {
    format!(
        "Marvel-style cinematic concept art, highly detailed, dramatic lighting, \
         dynamic composition: {}",
        req.prompt
    )
}

pub fn comic_strip_prompt(req: &ComicStripRequest) -> String {
    format!(
        "A {}-panel comic strip in a {} art style, each image one sequential panel \
         with clear storytelling and expressive characters. Scenario: {}",
        req.panels, req.style, req.scenario
    )
}

pub fn video_prompt(req: &VideoShotRequest) -> String {
    format!(
        "Cinematic, high-fidelity shot in the style of a Marvel Studios film, \
         smooth camera movement and dramatic lighting: {}",
        req.prompt
    )
}
