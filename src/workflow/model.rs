//! Model candidate scanning
//!
//! Loader nodes name the checkpoint, LoRAs, and auxiliary models a workflow
//! ran with. The same rule-list/rank/select discipline as prompt scanning
//! applies, with kind-aware count suffixes when several models took part.

use super::shape::NodeView;

/// What kind of model a loader node referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Checkpoint,
    Lora,
    Model,
}

/// A provisionally extracted model name competing for selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCandidate {
    pub name: String,
    pub kind: ModelKind,
    /// 1 = most preferred.
    pub priority: u8,
}

/// File extensions that mark a widget string as a model reference.
const MODEL_EXTENSIONS: [&str; 3] = [".safetensors", ".ckpt", ".pt"];

/// Loader-ish node types that never name a generation model.
const LOADER_EXCLUSIONS: [&str; 2] = ["ControlNetLoader", "VAELoader"];

type ModelRule = fn(&NodeView<'_>) -> Vec<ModelCandidate>;

const RULES: [ModelRule; 3] = [checkpoint_loaders, lora_loaders, other_loaders];

/// Run every rule over every node, in scan order.
pub fn scan_model_candidates(views: &[NodeView<'_>]) -> Vec<ModelCandidate> {
    let mut candidates = Vec::new();
    for view in views {
        for rule in RULES {
            candidates.extend(rule(view));
        }
    }
    candidates
}

/// Priority 1: the plain checkpoint loader, first widget is the name.
fn checkpoint_loaders(view: &NodeView<'_>) -> Vec<ModelCandidate> {
    if view.type_name != "CheckpointLoaderSimple" {
        return Vec::new();
    }
    first_widget_string(view)
        .map(|name| {
            vec![ModelCandidate {
                name: name.to_string(),
                kind: ModelKind::Checkpoint,
                priority: 1,
            }]
        })
        .unwrap_or_default()
}

/// Priority 2: LoRA loaders, first widget is the name.
fn lora_loaders(view: &NodeView<'_>) -> Vec<ModelCandidate> {
    if view.type_name != "LoraLoader" {
        return Vec::new();
    }
    first_widget_string(view)
        .map(|name| {
            vec![ModelCandidate {
                name: name.to_string(),
                kind: ModelKind::Lora,
                priority: 2,
            }]
        })
        .unwrap_or_default()
}

/// Priority 3: any other loader-flavored node whose widget strings look like
/// model files.
fn other_loaders(view: &NodeView<'_>) -> Vec<ModelCandidate> {
    let name = view.type_name;
    if name == "CheckpointLoaderSimple" || name == "LoraLoader" {
        return Vec::new();
    }
    if !(name.contains("Loader") || name.contains("Model")) {
        return Vec::new();
    }
    if LOADER_EXCLUSIONS.contains(&name) {
        return Vec::new();
    }
    view.widgets
        .iter()
        .filter_map(|widget| widget.as_str())
        .filter(|value| !value.is_empty() && has_model_extension(value))
        .map(|value| ModelCandidate {
            name: value.to_string(),
            kind: ModelKind::Model,
            priority: 3,
        })
        .collect()
}

/// Sort ascending by priority. Stable, so first-seen order breaks ties.
pub fn rank_model_candidates(mut candidates: Vec<ModelCandidate>) -> Vec<ModelCandidate> {
    candidates.sort_by_key(|candidate| candidate.priority);
    candidates
}

/// Fold the ranked candidate list into the final model field.
///
/// Several candidates collapse to the top name plus count suffixes for the
/// rest, e.g. `"dreamshaper v8 + 2 LoRAs + 1 additional model"`.
pub fn compose_model_name(ranked: &[ModelCandidate]) -> Option<String> {
    match ranked {
        [] => None,
        [only] => Some(clean_model_name(&only.name)),
        [first, rest @ ..] => {
            let mut text = clean_model_name(&first.name);
            let loras = rest
                .iter()
                .filter(|candidate| candidate.kind == ModelKind::Lora)
                .count();
            if loras > 0 {
                text.push_str(&format!(
                    " + {} LoRA{}",
                    loras,
                    if loras > 1 { "s" } else { "" }
                ));
            }
            let others = rest.len() - loras;
            if others > 0 {
                text.push_str(&format!(
                    " + {} additional model{}",
                    others,
                    if others > 1 { "s" } else { "" }
                ));
            }
            Some(text)
        }
    }
}

/// Turn a raw model filename into something readable: strip the file
/// extension, any path segments, a leading `SDXL` framework prefix, and
/// replace underscores with spaces.
pub fn clean_model_name(name: &str) -> String {
    let mut cleaned = name;

    for ext in MODEL_EXTENSIONS {
        if cleaned.len() >= ext.len()
            && cleaned.as_bytes()[cleaned.len() - ext.len()..].eq_ignore_ascii_case(ext.as_bytes())
        {
            cleaned = &cleaned[..cleaned.len() - ext.len()];
            break;
        }
    }

    if let Some(separator) = cleaned.rfind(['/', '\\']) {
        cleaned = &cleaned[separator + 1..];
    }

    if cleaned.len() >= 4 && cleaned.as_bytes()[..4].eq_ignore_ascii_case(b"SDXL") {
        cleaned = &cleaned[4..];
        cleaned = cleaned.strip_prefix(['/', '\\']).unwrap_or(cleaned);
    }

    cleaned.replace('_', " ").trim().to_string()
}

fn first_widget_string<'a>(view: &NodeView<'a>) -> Option<&'a str> {
    view.widgets.first().and_then(|widget| widget.as_str())
}

fn has_model_extension(value: &str) -> bool {
    MODEL_EXTENSIONS.iter().any(|ext| {
        value.len() >= ext.len()
            && value.as_bytes()[value.len() - ext.len()..].eq_ignore_ascii_case(ext.as_bytes())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::shape::node_views;
    use serde_json::json;

    fn models_for(doc: serde_json::Value) -> Vec<ModelCandidate> {
        let views = node_views(&doc);
        rank_model_candidates(scan_model_candidates(&views))
    }

    #[test]
    fn single_checkpoint_is_cleaned() {
        let doc = json!({
            "nodes": [
                { "type": "CheckpointLoaderSimple", "widgets_values": ["dreamshaper_v8.safetensors"] }
            ]
        });

        let ranked = models_for(doc);
        assert_eq!(compose_model_name(&ranked).as_deref(), Some("dreamshaper v8"));
    }

    #[test]
    fn clean_model_name_strips_extension_path_and_prefix() {
        assert_eq!(
            clean_model_name("SDXL/realisticVision_v5.safetensors"),
            "realisticVision v5"
        );
        assert_eq!(clean_model_name("models\\anything_v4.ckpt"), "anything v4");
        assert_eq!(clean_model_name("plain.pt"), "plain");
        assert_eq!(clean_model_name("SDXLturbo_fp16"), "turbo fp16");
    }

    #[test]
    fn multiple_models_get_count_suffixes() {
        let doc = json!({
            "nodes": [
                { "type": "LoraLoader", "widgets_values": ["detail_tweaker.safetensors"] },
                { "type": "CheckpointLoaderSimple", "widgets_values": ["dreamshaper_v8.safetensors"] },
                { "type": "LoraLoader", "widgets_values": ["add_brightness.safetensors"] },
                { "type": "UpscaleModelLoader", "widgets_values": ["4x_ultrasharp.pt"] }
            ]
        });

        let ranked = models_for(doc);
        assert_eq!(ranked[0].kind, ModelKind::Checkpoint, "checkpoint outranks scan order");
        assert_eq!(
            compose_model_name(&ranked).as_deref(),
            Some("dreamshaper v8 + 2 LoRAs + 1 additional model")
        );
    }

    #[test]
    fn excluded_loaders_produce_no_candidates() {
        let doc = json!({
            "nodes": [
                { "type": "VAELoader", "widgets_values": ["vae-ft-mse.safetensors"] },
                { "type": "ControlNetLoader", "widgets_values": ["control_openpose.safetensors"] }
            ]
        });

        assert!(models_for(doc).is_empty());
    }

    #[test]
    fn loader_widgets_without_model_extension_are_ignored() {
        let doc = json!({
            "nodes": [
                { "type": "UNETLoader", "widgets_values": ["fp8_e4m3fn", "flux1-dev.safetensors"] }
            ]
        });

        let ranked = models_for(doc);
        assert_eq!(ranked.len(), 1);
        assert_eq!(compose_model_name(&ranked).as_deref(), Some("flux1-dev"));
    }
}
