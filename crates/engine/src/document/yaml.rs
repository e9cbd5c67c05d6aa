//! Hierarchical (YAML) document codec.
//!
//! Responsibilities:
//! - Decode a possibly multi-document YAML file into root mappings.
//! - Encode root mappings back in block style, separated by `---`.
//!
//! Does NOT handle:
//! - Preserving comments or original formatting (the backup keeps the original bytes).
//!
//! Invariants:
//! - Empty files and empty documents decode to empty mappings.
//! - A document with a non-mapping root is rejected.

use std::path::Path;

use serde::Deserialize;

use super::{DocumentCodec, DocumentFormat, Mapping, Node, tree};
use crate::error::EngineError;

const DOCUMENT_SEPARATOR: &str = "---\n";

/// Codec for `application*.yml` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl DocumentCodec for YamlCodec {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Hierarchical
    }

    fn decode(&self, path: &Path, text: &str) -> Result<Vec<Mapping>, EngineError> {
        let mut documents = Vec::new();

        for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
            let value = Node::deserialize(document).map_err(|source| EngineError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;
            match value {
                Node::Mapping(map) => documents.push(map),
                Node::Null => documents.push(Mapping::new()),
                _ => {
                    return Err(EngineError::NotAMapping {
                        path: path.to_path_buf(),
                        index,
                    });
                }
            }
        }

        if documents.is_empty() {
            documents.push(Mapping::new());
        }
        Ok(documents)
    }

    fn encode(&self, path: &Path, documents: &[Mapping]) -> Result<String, EngineError> {
        let mut out = String::new();
        for (index, document) in documents.iter().enumerate() {
            if index > 0 {
                out.push_str(DOCUMENT_SEPARATOR);
            }
            let text = serde_yaml::to_string(document).map_err(|source| {
                EngineError::YamlSerialize {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            out.push_str(&text);
        }
        Ok(out)
    }

    fn set_value(&self, document: &mut Mapping, key_path: &str, value: Node) {
        tree::set_path(document, key_path, value);
    }

    fn contains_path(&self, document: &Mapping, key_path: &str) -> bool {
        tree::contains_path(document, key_path)
    }

    fn contains_parent(&self, document: &Mapping, key_path: &str) -> bool {
        tree::contains_parent(document, key_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Vec<Mapping> {
        YamlCodec.decode(Path::new("test.yml"), text).unwrap()
    }

    #[test]
    fn test_decode_single_document() {
        let docs = decode("server:\n  port: 8080\n");
        assert_eq!(docs.len(), 1);
        assert!(YamlCodec.contains_path(&docs[0], "server.port"));
    }

    #[test]
    fn test_decode_multiple_documents() {
        let docs = decode("a: 1\n---\nb: 2\n---\nc: 3\n");
        assert_eq!(docs.len(), 3);
        assert!(docs[2].contains_key("c"));
    }

    #[test]
    fn test_decode_empty_file_yields_one_empty_document() {
        let docs = decode("");
        assert_eq!(docs, vec![Mapping::new()]);
    }

    #[test]
    fn test_decode_rejects_sequence_root() {
        let err = YamlCodec
            .decode(Path::new("list.yml"), "a: 1\n---\n- x\n- y\n")
            .unwrap_err();
        assert!(matches!(err, EngineError::NotAMapping { index: 1, .. }));
    }

    #[test]
    fn test_decode_reports_syntax_errors_with_path() {
        let err = YamlCodec
            .decode(Path::new("broken.yml"), "a: [1, 2\n")
            .unwrap_err();
        assert!(matches!(err, EngineError::YamlParse { .. }));
        assert!(err.to_string().contains("broken.yml"));
    }

    #[test]
    fn test_encode_single_document_has_no_separator() {
        let docs = decode("a: 1\n");
        let text = YamlCodec.encode(Path::new("a.yml"), &docs).unwrap();
        assert_eq!(text, "a: 1\n");
    }

    #[test]
    fn test_encode_uses_block_style_and_separators() {
        let docs = decode("a:\n  b: x\n---\nc: [1, 2]\n");
        let text = YamlCodec.encode(Path::new("a.yml"), &docs).unwrap();
        assert_eq!(text, "a:\n  b: x\n---\nc:\n- 1\n- 2\n");
    }

    #[test]
    fn test_encoded_text_decodes_to_same_documents() {
        let docs = decode("spring:\n  application:\n    name: demo\n---\nkafka:\n  listener:\n    enabled: true\n");
        let text = YamlCodec.encode(Path::new("a.yml"), &docs).unwrap();
        assert_eq!(decode(&text), docs);
    }
}
