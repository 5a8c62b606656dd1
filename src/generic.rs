//! Generic dialect extraction
//!
//! Covers ComfyUI node graphs (`workflow` chunk), ComfyUI API prompts and
//! other JSON payloads (`prompt` chunk), A1111 parameter text
//! (`parameters` chunk), and plain `Software` key/value chunks. Every
//! malformed payload degrades to a note; partial metadata always beats
//! rejecting the image.

use crate::chunk::TextChunks;
use crate::record::ExtractedInfo;
use crate::workflow;
use serde_json::Value;
use tracing::debug;

/// Tag literal applied whenever workflow or prompt chunks were present.
pub const GENERIC_TAGS: &str = "ComfyUI,AI-Generated";

/// Extract provenance from a generic-dialect chunk map.
///
/// Pure function: always returns its best guess; override policy for
/// already-populated caller fields lives at the boundary
/// ([`crate::record::merge_preferring_existing`]).
pub fn extract_generic(chunks: &TextChunks) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();
    let mut notes: Vec<String> = Vec::new();

    if let Some(raw) = chunks.get("workflow") {
        match serde_json::from_str::<Value>(raw) {
            Ok(doc) => {
                let scan = workflow::scan(&doc);
                notes.push(format!(
                    "🔧 ComfyUI Workflow detected ({} nodes)",
                    scan.node_count
                ));
                if !scan.node_types.is_empty() {
                    notes.push(format!("🔗 Node Types: {}", scan.node_types.join(", ")));
                }
                if let Some(prompt) = scan.prompt {
                    info.prompt = prompt;
                }
                if let Some(model) = scan.model {
                    info.model = model;
                }
            }
            Err(err) => {
                debug!(%err, "workflow chunk is not valid JSON");
                notes.push("🔧 ComfyUI Workflow data found (raw)".to_string());
            }
        }
    }

    if info.prompt.is_empty() {
        if let Some(raw) = chunks.get("prompt") {
            if let Some(fallback) = prompt_fallback(raw) {
                info.prompt = fallback;
            }
        }
    }

    if let Some(parameters) = chunks.get("parameters") {
        if info.prompt.is_empty() {
            info.prompt = parameters.clone();
        }
        notes.push("🤖 A1111 Parameters detected".to_string());
    }

    // Software names the generating tool outright; case variants collapse to
    // one model value, lowercase key winning when both are present.
    if let Some(software) = chunks.get("Software") {
        info.model = software.clone();
    }
    if let Some(software) = chunks.get("software") {
        info.model = software.clone();
    }

    if chunks.contains_key("workflow") || chunks.contains_key("prompt") {
        info.tags = GENERIC_TAGS.to_string();
    }

    if !notes.is_empty() {
        info.notes = notes.join("\n") + "\n";
    }
    info
}

/// Fallback extraction from a standalone `prompt` chunk: the first long
/// string value of a JSON object, or the raw text itself when it is not
/// JSON at all.
fn prompt_fallback(raw: &str) -> Option<String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map
            .values()
            .find_map(|value| value.as_str().filter(|s| s.chars().count() > 10))
            .map(str::to_string),
        Ok(_) => None,
        Err(_) => (raw.chars().count() > 5).then(|| raw.to_string()),
    }
}
