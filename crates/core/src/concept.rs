//! Typed concepts produced by the text generation modes.
//!
//! Field names follow the camelCase wire format used by the structured
//! output schemas in [`crate::schema`], so a model reply deserializes
//! straight into these types.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A new hero or villain pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterConcept {
    pub name: String,
    pub backstory: String,
    pub powers: Vec<String>,
    pub weaknesses: Vec<String>,
    pub visual_description: String,
}

/// One episode outline inside a [`PlotOutline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinglePlotOutline {
    pub title: String,
    pub plot_points: Vec<String>,
}

/// Three alternative episode outlines for a hero/villain/theme triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotOutline {
    pub outlines: Vec<SinglePlotOutline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualStyle {
    pub style_name: String,
    pub aesthetic: String,
    pub character_design: String,
    pub color_palette: String,
    pub background_style: String,
}

/// An intelligence briefing on an existing character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterIntel {
    pub character_name: String,
    pub aliases: Vec<String>,
    pub base_of_operations: String,
    pub abilities: Vec<String>,
    pub psychological_profile: String,
    pub weaknesses: Vec<String>,
}

/// Any text-mode result, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeneratedConcept {
    Character(CharacterConcept),
    Plot(PlotOutline),
    Style(VisualStyle),
    Intel(CharacterIntel),
}

/// Parse a raw model reply into a concept type.
///
/// Models occasionally wrap JSON in whitespace; the text is trimmed first.
pub fn parse_concept<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Parse("empty response".into()));
    }
    serde_json::from_str(trimmed).map_err(|e| CoreError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn character_reply_deserializes_from_camel_case() {
        let raw = r#"
            {
              "name": "Resonance",
              "backstory": "Raised in a Wakandan outpost.",
              "powers": ["Sonic blasts", "Echolocation"],
              "weaknesses": ["Vacuum"],
              "visualDescription": "Vibranium-laced armour."
            }
        "#;
        let concept: CharacterConcept = parse_concept(raw).unwrap();
        assert_eq!(concept.name, "Resonance");
        assert_eq!(concept.powers.len(), 2);
        assert_eq!(concept.visual_description, "Vibranium-laced armour.");
    }

    #[test]
    fn plot_reply_deserializes_nested_outlines() {
        let raw = r#"{"outlines":[{"title":"Doom Rising","plotPoints":["a","b","c"]}]}"#;
        let plot: PlotOutline = parse_concept(raw).unwrap();
        assert_eq!(plot.outlines[0].plot_points, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_reply_is_a_parse_error() {
        assert_matches!(
            parse_concept::<VisualStyle>("   "),
            Err(CoreError::Parse(msg)) if msg == "empty response"
        );
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        assert_matches!(
            parse_concept::<CharacterIntel>(r#"{"characterName":"Doctor Doom"}"#),
            Err(CoreError::Parse(_))
        );
    }

    #[test]
    fn generated_concept_is_tagged_by_type() {
        let concept = GeneratedConcept::Style(VisualStyle {
            style_name: "Cosmic Flow".into(),
            aesthetic: "a".into(),
            character_design: "b".into(),
            color_palette: "c".into(),
            background_style: "d".into(),
        });
        let json = serde_json::to_value(&concept).unwrap();
        assert_eq!(json["type"], "style");
        assert_eq!(json["styleName"], "Cosmic Flow");
    }
}
