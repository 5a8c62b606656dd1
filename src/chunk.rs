//! PNG text chunk reader
//!
//! Walks the length-prefixed chunk framing of a PNG buffer and collects
//! tEXt keyword/text pairs into a flat mapping. This is where ComfyUI,
//! AUTOMATIC1111 and ChatGPT embed their generation metadata.

use std::collections::HashMap;
use tracing::debug;

/// Keyword → text mapping collected from a single image buffer.
///
/// Built once per buffer and immutable afterwards. Duplicate keywords keep
/// the last value written.
pub type TextChunks = HashMap<String, String>;

/// First four bytes of the PNG signature (`\x89PNG`).
const PNG_SIGNATURE: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

/// Collect textual metadata chunks from a PNG buffer.
///
/// A buffer that is not a PNG at all yields an empty map — foreign formats
/// are normal input, not an error. Malformed framing (a chunk length running
/// past the end of the buffer) stops the scan early and returns whatever was
/// collected up to that point. This function never fails and never reads out
/// of bounds.
///
/// `iTXt` and `zTXt` chunks are recognized as textual but carry
/// language/compression headers this engine does not decode; they are
/// skipped.
pub fn extract_text_chunks(bytes: &[u8]) -> TextChunks {
    let mut chunks = TextChunks::new();

    if bytes.len() < PNG_SIGNATURE.len() || bytes[..4] != PNG_SIGNATURE {
        return chunks;
    }

    // Skip the full 8-byte signature, then walk:
    // 4-byte big-endian length, 4-byte type, <length> data bytes, 4-byte CRC.
    let mut offset = 8usize;
    while offset + 8 <= bytes.len() {
        let length = u32::from_be_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ]) as usize;
        let chunk_type = &bytes[offset + 4..offset + 8];

        let data_start = offset + 8;
        let data_end = match data_start.checked_add(length) {
            Some(end) if end <= bytes.len() => end,
            _ => {
                debug!(length, offset, "chunk length runs past end of buffer, stopping scan");
                break;
            }
        };

        match chunk_type {
            b"tEXt" => {
                let data = &bytes[data_start..data_end];
                if let Some(null) = data.iter().position(|&b| b == 0) {
                    let keyword = String::from_utf8_lossy(&data[..null]).to_string();
                    let text = String::from_utf8_lossy(&data[null + 1..]).to_string();
                    chunks.insert(keyword, text);
                }
            }
            b"iTXt" | b"zTXt" => {
                debug!(
                    chunk_type = %String::from_utf8_lossy(chunk_type),
                    "skipping undecoded textual chunk variant"
                );
            }
            _ => {}
        }

        // data + CRC
        offset = data_end + 4;
    }

    chunks
}

#[cfg(test)]
pub(crate) mod testutil {
    /// Build a PNG buffer from raw chunk (type, data) pairs. CRCs are
    /// zeroed; the reader skips them anyway.
    pub(crate) fn png_with_chunks(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let mut buf = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        for (chunk_type, data) in chunks {
            buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
            buf.extend_from_slice(*chunk_type);
            buf.extend_from_slice(data);
            buf.extend_from_slice(&[0u8; 4]);
        }
        buf
    }

    /// tEXt payload: keyword, NUL separator, text.
    pub(crate) fn text_chunk(keyword: &str, text: &str) -> Vec<u8> {
        let mut data = keyword.as_bytes().to_vec();
        data.push(0);
        data.extend_from_slice(text.as_bytes());
        data
    }
}
