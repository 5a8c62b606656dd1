//! Consumer-facing entry point
//!
//! `extract` is the single operation the storage and transport collaborators
//! call: bytes and a filename in, a normalized record plus the raw chunk map
//! out. It holds no shared state and performs no I/O, so callers may invoke
//! it concurrently over independent buffers; batch sequencing is the
//! caller's concern.

use crate::chunk::{self, TextChunks};
use crate::dialect::{self, Dialect};
use crate::record::{self, ExtractedInfo};
use crate::{chatgpt, generic};
use serde::Serialize;
use tracing::debug;

/// Result of one extraction pass. Both parts cross the storage boundary:
/// the record is displayed and edited, the raw chunks are kept for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub info: ExtractedInfo,
    pub raw: TextChunks,
}

/// Extract provenance from one fully buffered image file.
///
/// Never fails: a foreign or malformed buffer simply yields less metadata.
/// Identical input bytes yield identical output — the engine generates no
/// identifiers, timestamps, or randomness.
pub fn extract(bytes: &[u8], filename: &str) -> Extraction {
    let raw = chunk::extract_text_chunks(bytes);
    let dialect = dialect::classify(filename, &raw);
    debug!(?dialect, chunk_count = raw.len(), filename, "classified image");

    let info = match dialect {
        Dialect::ChatGpt => chatgpt::extract_chatgpt(&raw),
        Dialect::Generic => generic::extract_generic(&raw),
    };

    Extraction {
        info: record::assemble(filename, info),
        raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::testutil::{png_with_chunks, text_chunk};
    use serde_json::json;

    fn png_with_text(pairs: &[(&str, &str)]) -> Vec<u8> {
        let datas: Vec<Vec<u8>> = pairs
            .iter()
            .map(|(keyword, text)| text_chunk(keyword, text))
            .collect();
        let mut chunks: Vec<(&[u8; 4], &[u8])> = vec![(b"IHDR", &[0u8; 13])];
        for data in &datas {
            chunks.push((b"tEXt", data));
        }
        chunks.push((b"IEND", &[]));
        png_with_chunks(&chunks)
    }

    #[test]
    fn chatgpt_image_end_to_end() {
        let payload = json!({ "prompt": "draw a cat", "tool": "DALL-E" }).to_string();
        let png = png_with_text(&[("prompt", &payload)]);

        let extraction = extract(&png, "ChatGPT-image-1.png");
        assert_eq!(extraction.info.model, "DALL-E");
        assert!(extraction.info.prompt.contains("USER PROMPT:\ndraw a cat"));
        assert_eq!(extraction.info.title, "ChatGPT-image-1");
        assert_eq!(
            extraction.raw.get("prompt").map(String::as_str),
            Some(payload.as_str())
        );
    }

    #[test]
    fn comfyui_image_end_to_end() {
        let workflow = json!({
            "nodes": [
                { "type": "CheckpointLoaderSimple", "widgets_values": ["SDXL/realisticVision_v5.safetensors"] },
                { "type": "CLIPTextEncode", "widgets_values": ["a cute calico cat"] }
            ]
        })
        .to_string();
        let png = png_with_text(&[("workflow", &workflow)]);

        let extraction = extract(&png, "ComfyUI_00042_.png");
        assert_eq!(extraction.info.prompt, "a cute calico cat");
        assert_eq!(extraction.info.model, "realisticVision v5");
        assert_eq!(extraction.info.tags, "ComfyUI,AI-Generated");
        assert_eq!(extraction.info.title, "ComfyUI_00042_");
    }

    #[test]
    fn foreign_buffer_still_yields_titled_record() {
        let extraction = extract(b"JFIF not a png", "holiday photo.jpg");
        assert!(extraction.raw.is_empty());
        assert_eq!(extraction.info.title, "holiday photo");
        assert!(extraction.info.prompt.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let workflow = json!({
            "nodes": [{ "type": "CLIPTextEncode", "widgets_values": ["the same input every time"] }]
        })
        .to_string();
        let png = png_with_text(&[("workflow", &workflow), ("Software", "ComfyUI")]);

        let first = extract(&png, "repeat.png");
        let second = extract(&png, "repeat.png");
        assert_eq!(first, second);
    }

    #[test]
    fn chatgpt_filename_without_chatgpt_payload_stays_sparse() {
        // The filename signal is authoritative even when the chunks are not
        // actually ChatGPT-shaped; the record degrades instead of falling
        // back to workflow heuristics.
        let png = png_with_text(&[("parameters", "some A1111 text")]);

        let extraction = extract(&png, "ChatGPT-reexport.png");
        assert!(extraction.info.prompt.is_empty());
        assert_eq!(extraction.info.title, "ChatGPT-reexport");
    }
}
