//! Pnglore: provenance extraction for AI-generated PNG images
//!
//! Ingests image files produced by generative tools (ComfyUI, AUTOMATIC1111,
//! ChatGPT image generation) and extracts human-readable provenance — prompt
//! text, model name, generation notes, tags — from metadata embedded in PNG
//! text chunks.
//!
//! # Core concepts
//!
//! - **Chunk reader**: walks the length-prefixed PNG framing and collects
//!   keyword/text pairs.
//! - **Dialects**: per-tool metadata conventions, selected by a cheap
//!   filename signal and dispatched to schema-on-read extractors.
//! - **Candidates**: provisionally extracted prompt/model strings, ranked
//!   and deduplicated; the best guess wins.
//!
//! Extraction is pure and synchronous: no I/O, no identifiers, no
//! timestamps. Every failure mode degrades to "less metadata extracted"
//! rather than an error.
//!
//! # Example
//!
//! ```
//! use pnglore::extract;
//!
//! let extraction = extract(b"not a png at all", "holiday.png");
//! assert!(extraction.raw.is_empty());
//! assert_eq!(extraction.info.title, "holiday");
//! ```

mod api;
mod chatgpt;
mod chunk;
mod dialect;
mod error;
mod generic;
mod record;
pub mod workflow;

pub use api::{extract, Extraction};
pub use chatgpt::{extract_chatgpt, CHATGPT_FALLBACK_TAGS, CHATGPT_TAGS};
pub use chunk::{extract_text_chunks, TextChunks};
pub use dialect::{classify, Dialect};
pub use error::{ExtractError, ExtractResult};
pub use generic::{extract_generic, GENERIC_TAGS};
pub use record::{assemble, merge_preferring_existing, ExtractedInfo};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
