//! Prompt candidate scanning
//!
//! An ordered list of independent candidate-producing rules replaces the
//! usual tangle of first-match-wins conditionals: every rule returns zero or
//! more candidates, and a single ranking/dedup/selection step picks the
//! winner. Each step is a pure function.

use super::shape::NodeView;
use serde_json::Value;

/// A provisionally extracted string competing for selection as the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub text: String,
    /// 1 = most preferred.
    pub priority: u8,
    /// Node type name the text came from.
    pub source: String,
    pub label: &'static str,
}

type CandidateRule = fn(&NodeView<'_>) -> Vec<Candidate>;

/// Rules in priority order, applied node-major so dedup keeps the
/// first-encountered copy of a text.
const RULES: [CandidateRule; 5] = [
    custom_prompt_nodes,
    show_text_nodes,
    find_and_replace_nodes,
    clip_text_encode_nodes,
    other_text_nodes,
];

/// Run every rule over every node, in scan order.
pub fn scan_candidates(views: &[NodeView<'_>]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for view in views {
        for rule in RULES {
            candidates.extend(rule(view));
        }
    }
    candidates
}

/// Priority 1: custom prompt nodes (type name contains "prompt").
fn custom_prompt_nodes(view: &NodeView<'_>) -> Vec<Candidate> {
    if !view.type_name.to_lowercase().contains("prompt") {
        return Vec::new();
    }
    widget_strings(view, 20)
        .into_iter()
        .map(|text| Candidate {
            text: text.to_string(),
            priority: 1,
            source: view.type_name.to_string(),
            label: "Custom Prompt",
        })
        .collect()
}

/// Priority 2: the pysssss "show text" helper, which often holds the fully
/// processed prompt, sometimes one list level deep.
fn show_text_nodes(view: &NodeView<'_>) -> Vec<Candidate> {
    if view.type_name != "ShowText|pysssss" {
        return Vec::new();
    }
    let mut candidates = Vec::new();
    for widget in &view.widgets {
        match widget {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = long_string(item, 20) {
                        candidates.push(Candidate {
                            text: text.to_string(),
                            priority: 2,
                            source: view.type_name.to_string(),
                            label: "Processed Text",
                        });
                    }
                }
            }
            _ => {
                if let Some(text) = long_string(widget, 20) {
                    candidates.push(Candidate {
                        text: text.to_string(),
                        priority: 2,
                        source: view.type_name.to_string(),
                        label: "Processed Text",
                    });
                }
            }
        }
    }
    candidates
}

/// Priority 3: "find and replace" helpers. The second widget (the
/// replacement) is the useful one.
fn find_and_replace_nodes(view: &NodeView<'_>) -> Vec<Candidate> {
    if view.type_name != "Text Find and Replace" {
        return Vec::new();
    }
    view.widgets
        .get(1)
        .and_then(|widget| long_string(widget, 20))
        .map(|text| {
            vec![Candidate {
                text: text.to_string(),
                priority: 3,
                source: view.type_name.to_string(),
                label: "Replace Text",
            }]
        })
        .unwrap_or_default()
}

/// Priority 4: plain CLIP text encode nodes. Embedding references are
/// usually negative-prompt shorthand; skip them unless they carry real text.
fn clip_text_encode_nodes(view: &NodeView<'_>) -> Vec<Candidate> {
    if view.type_name != "CLIPTextEncode" {
        return Vec::new();
    }
    widget_strings(view, 10)
        .into_iter()
        .filter(|text| !text.contains("embedding:") || char_len(text) > 30)
        .map(|text| Candidate {
            label: if text.contains("embedding:") {
                "Negative Prompt"
            } else {
                "Positive Prompt"
            },
            text: text.to_string(),
            priority: 4,
            source: view.type_name.to_string(),
        })
        .collect()
}

/// Priority 5: anything else text-flavored.
fn other_text_nodes(view: &NodeView<'_>) -> Vec<Candidate> {
    if !view.type_name.contains("Text") {
        return Vec::new();
    }
    widget_strings(view, 20)
        .into_iter()
        .map(|text| Candidate {
            text: text.to_string(),
            priority: 5,
            source: view.type_name.to_string(),
            label: "Text Node",
        })
        .collect()
}

/// Drop candidates whose text is identical to, a substring of, or a
/// superstring of an already-accepted candidate's text. The
/// first-encountered member of each equivalence class survives.
pub fn dedup_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut unique: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let duplicate = unique.iter().any(|existing| {
            existing.text == candidate.text
                || existing.text.contains(&candidate.text)
                || candidate.text.contains(&existing.text)
        });
        if !duplicate {
            unique.push(candidate);
        }
    }
    unique
}

/// Sort ascending by priority, then descending by text length. Stable, so
/// scan order breaks remaining ties.
pub fn rank_candidates(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.text.len().cmp(&a.text.len()))
    });
    candidates
}

/// Fold the ranked candidate list into the final prompt text.
///
/// One candidate is used directly; several are laid out as a labeled
/// multi-prompt document with the top-ranked text repeated in a
/// `PRIMARY PROMPT` block.
pub fn compose_prompt(ranked: &[Candidate]) -> Option<String> {
    match ranked {
        [] => None,
        [only] => Some(clean_prompt_text(&only.text)),
        many => {
            let mut combined = String::from("=== MULTIPLE PROMPTS FOUND ===\n\n");
            for (index, candidate) in many.iter().enumerate() {
                combined.push_str(&format!(
                    "{}. {} ({}):\n{}\n\n",
                    index + 1,
                    candidate.label,
                    candidate.source,
                    clean_prompt_text(&candidate.text)
                ));
            }
            combined.push_str("=== END OF PROMPTS ===\n\n");
            combined.push_str(&format!(
                "PRIMARY PROMPT:\n{}",
                clean_prompt_text(&many[0].text)
            ));
            Some(combined)
        }
    }
}

/// Pipeline boilerplate some workflows prepend to every prompt.
const BOILERPLATE_PREFIX: &str = "aidma-niji, niji, anime style, sharp image";

/// Strip known boilerplate and collapse newline runs to single spaces.
pub fn clean_prompt_text(text: &str) -> String {
    let mut stripped = text;
    if stripped.len() >= BOILERPLATE_PREFIX.len()
        && stripped.as_bytes()[..BOILERPLATE_PREFIX.len()]
            .eq_ignore_ascii_case(BOILERPLATE_PREFIX.as_bytes())
    {
        stripped = stripped[BOILERPLATE_PREFIX.len()..].trim_start();
    }

    let mut collapsed = String::with_capacity(stripped.len());
    let mut in_newline_run = false;
    for ch in stripped.chars() {
        if ch == '\n' {
            if !in_newline_run {
                collapsed.push(' ');
            }
            in_newline_run = true;
        } else {
            collapsed.push(ch);
            in_newline_run = false;
        }
    }
    collapsed.trim().to_string()
}

/// String widgets longer than `min_chars` characters.
fn widget_strings<'a>(view: &NodeView<'a>, min_chars: usize) -> Vec<&'a str> {
    view.widgets
        .iter()
        .filter_map(|widget| long_string(widget, min_chars))
        .collect()
}

fn long_string(value: &Value, min_chars: usize) -> Option<&str> {
    value.as_str().filter(|s| char_len(s) > min_chars)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
