//! Workflow document shape detection
//!
//! ComfyUI has two incompatible workflow serializations: a newer document
//! with a `nodes` array (`type` + `widgets_values` per node) and an older
//! flat map of node-id → node object (`class_type` + `inputs`). The shape is
//! decided once per document; everything downstream works on a normalized
//! node view.

use serde_json::Value;
use std::collections::BTreeSet;

/// Node representation used by a workflow document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowShape {
    /// Document has a `nodes` array.
    NodeArray,
    /// Document is a flat node-id → node-object mapping.
    FlatMap,
    /// Not an object at all; nothing to scan.
    Unrecognized,
}

/// Decide the shape of a parsed workflow document.
pub fn detect_shape(doc: &Value) -> WorkflowShape {
    match doc {
        Value::Object(map) if map.get("nodes").map_or(false, Value::is_array) => {
            WorkflowShape::NodeArray
        }
        Value::Object(_) => WorkflowShape::FlatMap,
        _ => WorkflowShape::Unrecognized,
    }
}

/// A shape-normalized view of one workflow node: its type name and the
/// widget values candidate rules scan.
#[derive(Debug)]
pub struct NodeView<'a> {
    pub type_name: &'a str,
    pub widgets: Vec<&'a Value>,
}

/// Normalize a workflow document into a flat node list.
///
/// Old-format nodes expose their `inputs.text` value as the single widget;
/// it is the only free-text field that format carries.
pub fn node_views(doc: &Value) -> Vec<NodeView<'_>> {
    match detect_shape(doc) {
        WorkflowShape::NodeArray => doc["nodes"]
            .as_array()
            .map(|nodes| nodes.iter().map(array_node_view).collect())
            .unwrap_or_default(),
        WorkflowShape::FlatMap => doc
            .as_object()
            .map(|map| map.values().map(flat_node_view).collect())
            .unwrap_or_default(),
        WorkflowShape::Unrecognized => Vec::new(),
    }
}

fn array_node_view(node: &Value) -> NodeView<'_> {
    NodeView {
        type_name: node["type"].as_str().unwrap_or(""),
        widgets: node["widgets_values"]
            .as_array()
            .map(|widgets| widgets.iter().collect())
            .unwrap_or_default(),
    }
}

fn flat_node_view(node: &Value) -> NodeView<'_> {
    let text = &node["inputs"]["text"];
    NodeView {
        type_name: node["class_type"].as_str().unwrap_or(""),
        widgets: if text.is_string() { vec![text] } else { Vec::new() },
    }
}

/// Distinct node type names, lexicographically sorted so notes text is
/// reproducible.
pub fn node_type_set(views: &[NodeView<'_>]) -> Vec<String> {
    let set: BTreeSet<&str> = views
        .iter()
        .map(|view| view.type_name)
        .filter(|name| !name.is_empty())
        .collect();
    set.into_iter().map(str::to_string).collect()
}
