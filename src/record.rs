//! Output record and boundary merge policies

use serde::{Deserialize, Serialize};

/// The normalized provenance record handed to the storage collaborator.
///
/// Every field defaults to the empty string; absence of metadata is normal,
/// not an error. The storage layer assigns its own identity and timestamp —
/// extraction never generates either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    pub title: String,
    pub prompt: String,
    /// Checkpoint/model name, possibly with count suffixes ("+ 2 LoRAs").
    pub model: String,
    /// Comma-joined tag list.
    pub tags: String,
    /// Newline-separated single-line entries, each with a marker glyph.
    pub notes: String,
}

impl ExtractedInfo {
    /// True when no extractor produced anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.prompt.is_empty()
            && self.model.is_empty()
            && self.tags.is_empty()
            && self.notes.is_empty()
    }
}

/// Fill an empty title with the filename minus its extension.
///
/// Extractors never see the final stored title; this fallback lives at the
/// boundary, at the point of record creation.
pub fn assemble(filename: &str, mut info: ExtractedInfo) -> ExtractedInfo {
    if info.title.is_empty() {
        info.title = strip_extension(filename).to_string();
    }
    info
}

/// Boundary merge policy: a field the caller already populated (for example
/// from a manual edit) is never clobbered by extracted values.
pub fn merge_preferring_existing(
    existing: ExtractedInfo,
    extracted: ExtractedInfo,
) -> ExtractedInfo {
    fn pick(existing: String, extracted: String) -> String {
        if existing.trim().is_empty() {
            extracted
        } else {
            existing
        }
    }

    ExtractedInfo {
        title: pick(existing.title, extracted.title),
        prompt: pick(existing.prompt, extracted.prompt),
        model: pick(existing.model, extracted.model),
        tags: pick(existing.tags, extracted.tags),
        notes: pick(existing.notes, extracted.notes),
    }
}

/// Drop the final `.ext` segment of a filename, if any.
fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_derives_title_from_filename() {
        let info = assemble("ComfyUI_00042_.png", ExtractedInfo::default());
        assert_eq!(info.title, "ComfyUI_00042_");
    }

    #[test]
    fn assemble_keeps_extracted_title() {
        let info = assemble(
            "whatever.png",
            ExtractedInfo {
                title: "A Sunset".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(info.title, "A Sunset");
    }

    #[test]
    fn strip_extension_handles_edge_cases() {
        assert_eq!(strip_extension("image.png"), "image");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("no_extension"), "no_extension");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn merge_never_clobbers_existing_fields() {
        let existing = ExtractedInfo {
            prompt: "hand-written prompt".to_string(),
            ..Default::default()
        };
        let extracted = ExtractedInfo {
            prompt: "extracted prompt".to_string(),
            model: "extracted model".to_string(),
            ..Default::default()
        };

        let merged = merge_preferring_existing(existing, extracted);
        assert_eq!(merged.prompt, "hand-written prompt");
        assert_eq!(merged.model, "extracted model");
    }

    #[test]
    fn default_record_is_empty() {
        assert!(ExtractedInfo::default().is_empty());
    }
}
