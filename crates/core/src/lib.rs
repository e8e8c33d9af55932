//! Domain types and pure helpers for Concept Forge.
//!
//! Everything in this crate is free of I/O: generation modes, the typed
//! concepts returned by the text modes, their structured-output schemas,
//! prompt construction, request validation, video progress text, and the
//! text/asset export formats.

pub mod concept;
pub mod error;
pub mod export;
pub mod mode;
pub mod progress;
pub mod prompt;
pub mod request;
pub mod schema;
