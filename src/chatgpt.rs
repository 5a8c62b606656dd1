//! ChatGPT dialect extraction
//!
//! ChatGPT image downloads embed a single JSON object in the `prompt` chunk
//! with the user prompt, the internal (rewritten) prompt, the generating
//! tool, and assorted generation details. Notes are rendered as fixed-order
//! single-line entries, one marker glyph per field.

use crate::chunk::TextChunks;
use crate::record::ExtractedInfo;
use serde_json::Value;
use tracing::debug;

/// Tag literal for successfully parsed ChatGPT metadata.
pub const CHATGPT_TAGS: &str = "ChatGPT,AI-Generated,Image-Gen";

/// Tag literal when ChatGPT data was present but unparsable.
pub const CHATGPT_FALLBACK_TAGS: &str = "ChatGPT,AI-Generated";

/// Extract provenance from a ChatGPT-dialect chunk map.
pub fn extract_chatgpt(chunks: &TextChunks) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    let Some(raw) = chunks.get("prompt") else {
        return info;
    };

    let data: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(%err, "ChatGPT prompt chunk is not valid JSON");
            info.notes = "🤖 ChatGPT data found but could not parse JSON\n".to_string();
            info.tags = CHATGPT_FALLBACK_TAGS.to_string();
            return info;
        }
    };

    let mut prompt = String::new();
    if let Some(user) = scalar_string(&data["prompt"]) {
        prompt.push_str(&format!("USER PROMPT:\n{}\n\n", user));
    }
    if let Some(internal) = scalar_string(&data["internal_prompt"]) {
        prompt.push_str(&format!("INTERNAL PROMPT:\n{}", internal));
    }
    info.prompt = prompt.trim().to_string();

    if let Some(tool) = scalar_string(&data["tool"]) {
        info.model = tool;
    }

    let mut notes = vec!["🤖 ChatGPT Image Generation".to_string()];
    notes.push(format!(
        "📅 Generated: {}",
        scalar_string(&data["date_generated"]).unwrap_or_else(|| "Unknown".to_string())
    ));
    if let Some(filename) = scalar_string(&data["filename"]) {
        notes.push(format!("📄 Original filename: {}", filename));
    }
    if let Some(style) = scalar_string(&data["style"]) {
        notes.push(format!("🎨 Style: {}", style));
    }
    if let Some(aspect_ratio) = scalar_string(&data["aspect_ratio"]) {
        notes.push(format!("📐 Aspect ratio: {}", aspect_ratio));
    }
    if let Some(resolution) = scalar_string(&data["resolution"]) {
        notes.push(format!("🔍 Resolution: {}", resolution));
    }
    if let Some(size) = scalar_string(&data["file_size_mb"]) {
        notes.push(format!("💾 File size: {} MB", size));
    }
    if let Some(source) = scalar_string(&data["source_image"]) {
        notes.push(format!("🖼️ Source image: {}", source));
    }
    info.notes = notes.join("\n") + "\n";
    info.tags = CHATGPT_TAGS.to_string();

    info
}

/// Render a JSON scalar for record text. Empty strings, containers and null
/// count as absent.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
