//! Bionic reading transform.
//!
//! [`apply`] wraps every eligible text node in a marker `span` whose children
//! bold the leading portion of each word; [`restore`] collapses every marker
//! back to a single plain text node. The marker attribute is the only signal
//! used to recognize already-transformed content, which makes both operations
//! idempotent and the pair a byte-identical round trip.

use crate::domain::document::{Document, Node, NodeId};

/// Attribute tagging a marker container.
pub const MARKER_ATTR: &str = "data-bionic";

const MARKER_TAG: &str = "span";
const EMPHASIS_TAG: &str = "b";

/// Containers whose text must never be transformed: interactive controls,
/// code/preformatted regions, and navigation.
const EXCLUDED_TAGS: [&str; 9] = [
    "button", "input", "textarea", "select", "script", "style", "code", "pre", "nav",
];

/// Minimum trimmed text length worth transforming.
const MIN_TEXT_LEN: usize = 2;

/// One piece of a text node: alternating word and whitespace runs.
#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Word(&'a str),
    Whitespace(&'a str),
}

/// Split text into alternating word and whitespace runs, preserving the
/// original bytes exactly.
fn segment_runs(text: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        let ws = first.is_whitespace();
        let end = rest
            .find(|c: char| c.is_whitespace() != ws)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        runs.push(if ws { Run::Whitespace(run) } else { Run::Word(run) });
        rest = tail;
    }
    runs
}

/// Byte offset splitting `word` after ceil(len/2) chars, so the emphasized
/// lead never cuts through a multi-byte char.
fn emphasis_cut(word: &str) -> usize {
    let cut = word.chars().count().div_ceil(2);
    word.char_indices().nth(cut).map_or(word.len(), |(i, _)| i)
}

/// True if the text node at `id` should be transformed: long enough once
/// trimmed, and not inside an excluded container or an existing marker.
fn is_transformable(doc: &Document, id: NodeId) -> bool {
    let Some(text) = doc.get(id).and_then(Node::as_text) else {
        return false;
    };
    if text.trim().chars().count() < MIN_TEXT_LEN {
        return false;
    }
    for ancestor in doc.ancestors(id) {
        let Some(elem) = doc.get(ancestor).and_then(Node::as_element) else {
            continue;
        };
        if EXCLUDED_TAGS.contains(&elem.tag_name.as_str()) {
            return false;
        }
        if doc.attribute(ancestor, MARKER_ATTR).is_some() {
            return false;
        }
    }
    true
}

/// Wrap every eligible text node under `root` in a marker container that
/// bolds the first half of each word. Whitespace passes through unchanged, so
/// the visible text stays byte-identical. No-op on already-transformed
/// content.
pub fn apply(doc: &mut Document, root: NodeId) {
    // Collect before mutating so the walk never observes its own rewrites.
    let targets: Vec<NodeId> = doc
        .descendants(root)
        .into_iter()
        .filter(|&id| is_transformable(doc, id))
        .collect();

    for id in targets {
        let Some(text) = doc.get(id).and_then(Node::as_text).map(String::from) else {
            log::debug!("skipping text node that changed shape mid-walk");
            continue;
        };

        let marker = doc.create_element(MARKER_TAG);
        doc.set_attribute(marker, MARKER_ATTR, "true");

        for run in segment_runs(&text) {
            match run {
                Run::Whitespace(ws) => {
                    let node = doc.create_text(ws);
                    doc.append_child(marker, node);
                }
                Run::Word(word) => {
                    let cut = emphasis_cut(word);
                    let bold = doc.create_element(EMPHASIS_TAG);
                    let lead = doc.create_text(&word[..cut]);
                    doc.append_child(bold, lead);
                    doc.append_child(marker, bold);
                    if cut < word.len() {
                        let tail = doc.create_text(&word[cut..]);
                        doc.append_child(marker, tail);
                    }
                }
            }
        }

        doc.replace_child(marker, id);
    }
}

/// Collapse every marker container under `root` back to a single plain text
/// node holding its full text content. No-op on a clean tree.
pub fn restore(doc: &mut Document, root: NodeId) {
    let markers: Vec<NodeId> = doc
        .descendants(root)
        .into_iter()
        .filter(|&id| doc.attribute(id, MARKER_ATTR).is_some())
        .collect();

    for marker in markers {
        let text = doc.text_content(marker);
        let restored = doc.create_text(&text);
        doc.replace_child(restored, marker);
    }
}

/// Marker containers currently present under `root`.
pub fn marker_count(doc: &Document, root: NodeId) -> usize {
    doc.descendants(root)
        .iter()
        .filter(|&&id| doc.attribute(id, MARKER_ATTR).is_some())
        .count()
}
