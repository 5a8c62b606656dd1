//! ComfyUI workflow (node-graph) scanning
//!
//! A workflow document describes the generation pipeline as typed nodes with
//! widget values. Scanning normalizes the two serialization shapes, then
//! runs candidate rules for prompt text and model names over the node list.

mod model;
mod shape;
mod text;

pub use model::{clean_model_name, ModelCandidate, ModelKind};
pub use shape::{detect_shape, node_type_set, node_views, NodeView, WorkflowShape};
pub use text::{clean_prompt_text, Candidate};

use serde_json::Value;

/// Everything one workflow document yields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowScan {
    pub node_count: usize,
    /// Distinct node type names, lexicographically sorted.
    pub node_types: Vec<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
}

/// Scan a parsed workflow document for prompt and model candidates.
///
/// Pure function of the document; candidate ranking and deduplication follow
/// the rules in [`text`] and [`model`].
pub fn scan(doc: &Value) -> WorkflowScan {
    let views = shape::node_views(doc);
    let prompts = text::rank_candidates(text::dedup_candidates(text::scan_candidates(&views)));
    let models = model::rank_model_candidates(model::scan_model_candidates(&views));

    WorkflowScan {
        node_count: views.len(),
        node_types: shape::node_type_set(&views),
        prompt: text::compose_prompt(&prompts),
        model: model::compose_model_name(&models),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scan_combines_counts_types_prompt_and_model() {
        let doc = json!({
            "nodes": [
                { "type": "CheckpointLoaderSimple", "widgets_values": ["dreamshaper_v8.safetensors"] },
                { "type": "CLIPTextEncode", "widgets_values": ["a lighthouse in a storm"] },
                { "type": "KSampler", "widgets_values": [42] }
            ]
        });

        let scan = scan(&doc);
        assert_eq!(scan.node_count, 3);
        assert_eq!(
            scan.node_types,
            vec!["CLIPTextEncode", "CheckpointLoaderSimple", "KSampler"]
        );
        assert_eq!(scan.prompt.as_deref(), Some("a lighthouse in a storm"));
        assert_eq!(scan.model.as_deref(), Some("dreamshaper v8"));
    }

    #[test]
    fn empty_document_scans_to_nothing() {
        let scan = scan(&json!({ "nodes": [] }));
        assert_eq!(scan.node_count, 0);
        assert!(scan.node_types.is_empty());
        assert!(scan.prompt.is_none());
        assert!(scan.model.is_none());
    }
}
