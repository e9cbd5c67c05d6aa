//! Recursive mutations over document trees.
//!
//! Responsibilities:
//! - Assign values at dotted paths, creating intermediate mappings (`set_path`).
//! - Answer presence queries for a full path or for its parent mappings.
//! - Replace `${key}` placeholders in string values (`substitute_placeholder`).
//! - Apply ordered literal substring rewrites to string values (`replace_substrings`).
//!
//! Does NOT handle:
//! - Encoding-specific addressing of flat documents (see `properties`).
//!
//! Invariants:
//! - Only mappings are descended into. Sequences, numbers, booleans, nulls and tagged
//!   values pass through unchanged.
//! - A non-mapping value in the middle of a path is replaced by an empty mapping.

use super::{Mapping, Node};

fn key(segment: &str) -> Node {
    Node::String(segment.to_string())
}

/// Set `value` at `dotted_path`, creating or overwriting intermediate mappings.
///
/// The final segment is assigned unconditionally, replacing a scalar or a whole subtree.
pub fn set_path(document: &mut Mapping, dotted_path: &str, value: Node) {
    let segments: Vec<&str> = dotted_path.split('.').collect();
    set_segments(document, &segments, value);
}

fn set_segments(map: &mut Mapping, segments: &[&str], value: Node) {
    match segments {
        [] => {}
        [leaf] => {
            map.insert(key(leaf), value);
        }
        [head, rest @ ..] => {
            let slot = map
                .entry(key(head))
                .or_insert_with(|| Node::Mapping(Mapping::new()));
            if let Node::Mapping(child) = slot {
                set_segments(child, rest, value);
            } else {
                let mut child = Mapping::new();
                set_segments(&mut child, rest, value);
                *slot = Node::Mapping(child);
            }
        }
    }
}

/// Whether every segment of `dotted_path`, including the last, is present.
pub fn contains_path(document: &Mapping, dotted_path: &str) -> bool {
    let mut current = document;
    let mut segments = dotted_path.split('.').peekable();

    while let Some(segment) = segments.next() {
        match current.get(segment) {
            None => return false,
            Some(_) if segments.peek().is_none() => return true,
            Some(Node::Mapping(child)) => current = child,
            Some(_) => return false,
        }
    }
    false
}

/// Whether every segment of `dotted_path` above the leaf resolves to a mapping.
///
/// The leaf itself may be absent. A single-segment path always qualifies, since the
/// document root is a mapping.
pub fn contains_parent(document: &Mapping, dotted_path: &str) -> bool {
    let Some((parent, _leaf)) = dotted_path.rsplit_once('.') else {
        return true;
    };
    let mut current = document;
    for segment in parent.split('.') {
        match current.get(segment) {
            Some(Node::Mapping(child)) => current = child,
            _ => return false,
        }
    }
    true
}

/// Replace every `${key}` in every string value with `replacement`.
///
/// Returns the number of string values that changed.
pub fn substitute_placeholder(document: &mut Mapping, key: &str, replacement: &str) -> usize {
    let token = format!("${{{}}}", key);
    rewrite_strings(document, &mut |text: &str| {
        text.contains(&token)
            .then(|| text.replace(&token, replacement))
    })
}

/// Apply `(old, new)` pairs in order to every string value.
///
/// Each pair replaces all occurrences present after the previous pairs ran, so a later
/// pair can match text produced by an earlier one. Empty `old` patterns are skipped.
/// Returns the number of string values that changed.
pub fn replace_substrings(document: &mut Mapping, replacements: &[(&str, &str)]) -> usize {
    rewrite_strings(document, &mut |text: &str| {
        let rewritten = replacements
            .iter()
            .filter(|(old, _)| !old.is_empty())
            .fold(text.to_string(), |acc, &(old, new)| acc.replace(old, new));
        (rewritten != text).then_some(rewritten)
    })
}

/// Walk every string value under `map`, replacing it with `rewrite`'s result when `Some`.
fn rewrite_strings(map: &mut Mapping, rewrite: &mut dyn FnMut(&str) -> Option<String>) -> usize {
    let mut changed = 0;
    for value in map.values_mut() {
        match value {
            Node::String(text) => {
                if let Some(updated) = rewrite(text) {
                    *text = updated;
                    changed += 1;
                }
            }
            Node::Mapping(child) => changed += rewrite_strings(child, rewrite),
            _ => {}
        }
    }
    changed
}
