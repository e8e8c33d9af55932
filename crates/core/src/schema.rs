//! Structured-output response schemas for the text modes.
//!
//! Sent as `generationConfig.responseSchema` so the model replies with JSON
//! matching the types in [`crate::concept`].

use serde_json::{json, Value};

pub fn character_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "A creative and fitting name for the character." },
            "backstory": { "type": "STRING", "description": "A compelling 2-3 paragraph origin story." },
            "powers": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of unique powers and abilities."
            },
            "weaknesses": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of meaningful weaknesses or vulnerabilities that create conflict."
            },
            "visualDescription": { "type": "STRING", "description": "A detailed description for concept art, including costume and appearance." }
        },
        "required": ["name", "backstory", "powers", "weaknesses", "visualDescription"]
    })
}

pub fn plot_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "outlines": {
                "type": "ARRAY",
                "description": "An array of three distinct episode plot outlines.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "A catchy title for the episode outline." },
                        "plotPoints": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "A list of three key plot points for the story (e.g., beginning, middle, end)."
                        }
                    },
                    "required": ["title", "plotPoints"]
                }
            }
        },
        "required": ["outlines"]
    })
}

pub fn style_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "styleName": { "type": "STRING", "description": "A catchy name for this visual style." },
            "aesthetic": { "type": "STRING", "description": "The overall aesthetic and mood." },
            "characterDesign": { "type": "STRING", "description": "The approach to designing characters." },
            "colorPalette": { "type": "STRING", "description": "The primary color scheme and its purpose." },
            "backgroundStyle": { "type": "STRING", "description": "The style for backgrounds and environments." }
        },
        "required": ["styleName", "aesthetic", "characterDesign", "colorPalette", "backgroundStyle"]
    })
}

pub fn intel_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "characterName": { "type": "STRING", "description": "The character's best-known name." },
            "aliases": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Known aliases, codenames and titles."
            },
            "baseOfOperations": { "type": "STRING", "description": "Primary base of operations." },
            "abilities": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An assessment of powers, skills and resources."
            },
            "psychologicalProfile": { "type": "STRING", "description": "Motivations, temperament and behavioural patterns." },
            "weaknesses": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Exploitable weaknesses."
            }
        },
        "required": ["characterName", "aliases", "baseOfOperations", "abilities", "psychologicalProfile", "weaknesses"]
    })
}
