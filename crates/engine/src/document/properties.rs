//! Flat (Java properties) document codec.
//!
//! Responsibilities:
//! - Decode `application*.properties` text into a one-level mapping of dotted keys.
//! - Encode that mapping back as `key=value` lines with properties escaping.
//! - Address flat documents by direct key lookup and assignment.
//!
//! Does NOT handle:
//! - Preserving comments, blank lines or separator style (the backup keeps the original).
//! - Writing a timestamp header; output is deterministic.
//!
//! Invariants:
//! - Every decoded value is a `Node::String`.
//! - Duplicate keys keep their first position and the last value.
//! - `encode` output decodes back to the same keys and values.

use std::path::Path;

use super::{DocumentCodec, DocumentFormat, Mapping, Node};
use crate::error::EngineError;

/// Codec for `application*.properties` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesCodec;

impl DocumentCodec for PropertiesCodec {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Flat
    }

    fn decode(&self, _path: &Path, text: &str) -> Result<Vec<Mapping>, EngineError> {
        let mut document = Mapping::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            document.insert(Node::String(key), Node::String(value));
        }
        Ok(vec![document])
    }

    fn encode(&self, _path: &Path, documents: &[Mapping]) -> Result<String, EngineError> {
        let mut out = String::new();
        for (key, value) in documents.iter().flat_map(|document| document.iter()) {
            escape_into(&mut out, &scalar_text(key), true);
            out.push('=');
            escape_into(&mut out, &scalar_text(value), false);
            out.push('\n');
        }
        Ok(out)
    }

    fn set_value(&self, document: &mut Mapping, key_path: &str, value: Node) {
        document.insert(
            Node::String(key_path.to_string()),
            Node::String(scalar_text(&value)),
        );
    }

    fn contains_path(&self, document: &Mapping, key_path: &str) -> bool {
        let prefix = format!("{}.", key_path);
        document
            .keys()
            .filter_map(Node::as_str)
            .any(|key| key == key_path || key.starts_with(&prefix))
    }

    fn contains_parent(&self, document: &Mapping, key_path: &str) -> bool {
        match key_path.rsplit_once('.') {
            Some((parent, _)) => self.contains_path(document, parent),
            None => true,
        }
    }
}

/// Render a node as the text stored in a properties file.
fn scalar_text(node: &Node) -> String {
    match node {
        Node::String(text) => text.clone(),
        Node::Bool(flag) => flag.to_string(),
        Node::Number(number) => number.to_string(),
        Node::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Join continued natural lines and drop blank and comment lines.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim_start_matches(is_blank);
        if pending.is_none() && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        let trailing_backslashes = line.chars().rev().take_while(|&c| c == '\\').count();
        let continued = trailing_backslashes % 2 == 1;
        let body = if continued { &line[..line.len() - 1] } else { line };

        let mut logical = pending.take().unwrap_or_default();
        logical.push_str(body);
        if continued {
            pending = Some(logical);
        } else {
            lines.push(logical);
        }
    }

    if let Some(logical) = pending {
        lines.push(logical);
    }
    lines
}

/// Split a logical line into its unescaped key and value.
fn split_entry(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    let mut key_end = 0;
    let mut has_separator = false;
    while key_end < len {
        match chars[key_end] {
            '\\' => key_end += 2,
            '=' | ':' => {
                has_separator = true;
                break;
            }
            c if is_blank(c) => break,
            _ => key_end += 1,
        }
    }
    let key_end = key_end.min(len);

    let mut value_start = key_end;
    if has_separator {
        value_start += 1;
    } else {
        while value_start < len && is_blank(chars[value_start]) {
            value_start += 1;
        }
        if value_start < len && matches!(chars[value_start], '=' | ':') {
            value_start += 1;
        }
    }
    while value_start < len && is_blank(chars[value_start]) {
        value_start += 1;
    }

    (
        unescape(&chars[..key_end]),
        unescape(&chars[value_start.min(len)..]),
    )
}

/// Resolve `\t \n \r \f \uXXXX` and `\<c>` escapes.
fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut units: Vec<u16> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() {
            let escaped = chars[i + 1];
            if escaped == 'u'
                && let Some(unit) = hex_unit(chars.get(i + 2..i + 6))
            {
                units.push(unit);
                i += 6;
                continue;
            }
            flush_units(&mut out, &mut units);
            out.push(match escaped {
                't' => '\t',
                'n' => '\n',
                'r' => '\r',
                'f' => '\x0c',
                other => other,
            });
            i += 2;
        } else {
            flush_units(&mut out, &mut units);
            if chars[i] != '\\' {
                out.push(chars[i]);
            }
            i += 1;
        }
    }
    flush_units(&mut out, &mut units);
    out
}

fn hex_unit(digits: Option<&[char]>) -> Option<u16> {
    let digits: String = digits?.iter().collect();
    u16::from_str_radix(&digits, 16).ok()
}

fn flush_units(out: &mut String, units: &mut Vec<u16>) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..))
            .map(|decoded| decoded.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

/// Append `text` with properties escaping. Keys escape every space, values only a leading one.
fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (index, c) in text.chars().enumerate() {
        match c {
            ' ' => {
                if index == 0 || is_key {
                    out.push('\\');
                }
                out.push(' ');
            }
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (' '..='~').contains(&c) => out.push(c),
            c => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
}
