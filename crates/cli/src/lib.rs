//! Command-line shell for Concept Forge.
//!
//! Parses a generation mode and its inputs, runs it through
//! [`ConceptStudio`](conceptforge_gemini::ConceptStudio), prints the
//! result and optionally saves it to disk.

pub mod args;
pub mod output;
pub mod run;
