//! Dialect classification
//!
//! Each generative tool encodes overlapping information under different keys
//! and structures; a dialect names one such family of conventions.

use crate::chunk::TextChunks;

/// Top-level metadata-encoding families this engine understands.
///
/// The generic family branches again internally on workflow document shape
/// (see [`crate::workflow::WorkflowShape`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// ChatGPT image generation: a single JSON object in the `prompt` chunk.
    ChatGpt,
    /// ComfyUI node graphs, A1111 parameter text, plain key/value chunks.
    Generic,
}

/// Select the extraction heuristic family for one image.
///
/// The filename prefix is an authoritative, cheap signal: ChatGPT downloads
/// always start with `ChatGPT`, so no content sniffing is needed. Pure and
/// infallible.
pub fn classify(filename: &str, _chunks: &TextChunks) -> Dialect {
    if filename.starts_with("ChatGPT") {
        Dialect::ChatGpt
    } else {
        Dialect::Generic
    }
}
