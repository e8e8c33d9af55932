//! Text blueprints and download file names.

use crate::concept::{
    CharacterConcept, CharacterIntel, GeneratedConcept, PlotOutline, VisualStyle,
};

// ---------------------------------------------------------------------------
// Asset file names
// ---------------------------------------------------------------------------

pub const CONCEPT_ART_FILE_NAME: &str = "concept-art.jpeg";
pub const VIDEO_SHOT_FILE_NAME: &str = "video-shot.mp4";
pub const PLOT_OUTLINES_FILE_NAME: &str = "plot-outlines.txt";

/// File name for comic panel `index` (zero-based), numbered from 1.
pub fn comic_panel_file_name(index: usize) -> String {
    format!("comic-panel-{}.jpeg", index + 1)
}

// ---------------------------------------------------------------------------
// Text export
// ---------------------------------------------------------------------------

/// A text file ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextExport {
    pub file_name: String,
    pub contents: String,
}

/// Replace each run of whitespace or path separators with a single
/// underscore, so the stem is always one path component.
pub fn file_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() || matches!(c, '/' | '\\' | ':') {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_concept(concept: &GeneratedConcept) -> TextExport {
    match concept {
        GeneratedConcept::Character(c) => export_character(c),
        GeneratedConcept::Plot(p) => export_plot(p),
        GeneratedConcept::Style(s) => export_style(s),
        GeneratedConcept::Intel(i) => export_intel(i),
    }
}

pub fn export_character(c: &CharacterConcept) -> TextExport {
    let mut contents = format!("Character Blueprint: {}\n\n", c.name);
    contents += &format!("== BACKSTORY ==\n{}\n\n", c.backstory);
    contents += &format!("== POWERS & ABILITIES ==\n{}\n\n", bullets(&c.powers));
    contents += &format!("== WEAKNESSES ==\n{}\n\n", bullets(&c.weaknesses));
    contents += &format!("== VISUAL DESCRIPTION ==\n{}", c.visual_description);

    TextExport {
        file_name: format!("character-{}.txt", file_stem(&c.name)),
        contents,
    }
}

pub fn export_plot(p: &PlotOutline) -> TextExport {
    let mut contents = String::from("Episode Plot Outlines\n\n");
    for (index, outline) in p.outlines.iter().enumerate() {
        contents += &format!("== OUTLINE {}: {} ==\n", index + 1, outline.title);
        contents += &format!("{}\n\n", bullets(&outline.plot_points));
    }

    TextExport {
        file_name: PLOT_OUTLINES_FILE_NAME.to_string(),
        contents,
    }
}

pub fn export_style(s: &VisualStyle) -> TextExport {
    let mut contents = format!("Visual Style Guide: {}\n\n", s.style_name);
    contents += &format!("== OVERALL AESTHETIC ==\n{}\n\n", s.aesthetic);
    contents += &format!("== CHARACTER DESIGN ==\n{}\n\n", s.character_design);
    contents += &format!("== COLOR PALETTE ==\n{}\n\n", s.color_palette);
    contents += &format!("== BACKGROUND & ENVIRONMENT STYLE ==\n{}", s.background_style);

    TextExport {
        file_name: format!("style-guide-{}.txt", file_stem(&s.style_name)),
        contents,
    }
}

pub fn export_intel(i: &CharacterIntel) -> TextExport {
    let mut contents = format!(
        "INTELLIGENCE BRIEFING: {}\n\n",
        i.character_name.to_uppercase()
    );
    contents += &format!("KNOWN ALIASES: {}\n", i.aliases.join(", "));
    contents += &format!("BASE OF OPERATIONS: {}\n\n", i.base_of_operations);
    contents += &format!("== ABILITIES ASSESSMENT ==\n{}\n\n", bullets(&i.abilities));
    contents += &format!("== PSYCHOLOGICAL PROFILE ==\n{}\n\n", i.psychological_profile);
    contents += &format!("== EXPLOITABLE WEAKNESSES ==\n{}", bullets(&i.weaknesses));

    TextExport {
        file_name: format!("intel-briefing-{}.txt", file_stem(&i.character_name)),
        contents,
    }
}
