//! Decoded document tree model.
//!
//! The generic binary-tree decoder is an external collaborator; its JSON
//! output deserializes directly into [`TreeNode`] (the serde aliases match
//! the decoder's field names). The pipeline treats nodes as opaque apart
//! from the surface documented here.
//!
//! Content conventions, as produced by the decoder:
//! - `OCTET_STRING` content is the hex dump of the value
//! - `INTEGER` content is decimal text
//! - `BIT_STRING` content is the bit string itself (e.g. `"00000100…"`)
//! - a named-curve parameter node carries `OID\nname` as content

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WitnessError};

/// One node of the decoded document tree.
///
/// Invariant (guaranteed by the decoder): `raw_span` contains the
/// `raw_span` of every descendant as a contiguous substring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeNode {
    /// Kind label, e.g. "OCTET_STRING", "SEQUENCE", "[0]"
    #[serde(alias = "name")]
    pub kind: String,
    /// Decoded scalar text or summary, absent for pure containers
    #[serde(default)]
    pub content: Option<String>,
    /// Ordered child nodes (empty for leaves)
    #[serde(default, alias = "sub")]
    pub children: Vec<TreeNode>,
    /// Full sub-encoding covering this node and its descendants, as hex
    #[serde(default, alias = "dump")]
    pub raw_span: String,
}

impl TreeNode {
    /// Child at `idx`, or a structure error naming the component that
    /// expected it.
    pub fn child(&self, idx: usize, component: &str) -> Result<&TreeNode> {
        self.children
            .get(idx)
            .ok_or_else(|| WitnessError::structure(component, format!("child #{idx} of {}", self.kind)))
    }

    /// Last child, or a structure error.
    pub fn last_child(&self, component: &str) -> Result<&TreeNode> {
        self.children
            .last()
            .ok_or_else(|| WitnessError::structure(component, format!("non-empty {}", self.kind)))
    }

    /// Content string, or a malformed-value error.
    pub fn content_str(&self, context: &str) -> Result<&str> {
        self.content
            .as_deref()
            .ok_or_else(|| WitnessError::value(context, format!("{} node has no content", self.kind)))
    }

    /// Content interpreted as a hex dump, decoded to bytes.
    pub fn content_bytes(&self, context: &str) -> Result<Vec<u8>> {
        let text = self.content_str(context)?;
        decode_hex(text, context)
    }

    /// Byte length of the content hex dump. Used to recover digest output
    /// lengths from the size of embedded hash values.
    pub fn content_byte_len(&self, context: &str) -> Result<usize> {
        let text = self.content_str(context)?;
        let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        Ok(stripped.len() / 2)
    }

    /// Content interpreted as decimal text, parsed to an unsigned integer.
    pub fn content_uint(&self, context: &str) -> Result<BigUint> {
        let text = self.content_str(context)?;
        BigUint::parse_bytes(text.trim().as_bytes(), 10)
            .ok_or_else(|| WitnessError::value(context, format!("not a decimal integer: {text:?}")))
    }

    /// Content interpreted as a hex dump, parsed to an unsigned integer.
    pub fn content_hex_uint(&self, context: &str) -> Result<BigUint> {
        let text = self.content_str(context)?;
        let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        BigUint::parse_bytes(stripped.as_bytes(), 16)
            .ok_or_else(|| WitnessError::value(context, format!("not a hex integer: {text:?}")))
    }

    /// Raw sub-encoding of this node as bytes.
    pub fn raw_bytes(&self, context: &str) -> Result<Vec<u8>> {
        decode_hex(&self.raw_span, context)
    }
}

/// Decode a hex string, tolerating embedded whitespace.
pub fn decode_hex(text: &str, context: &str) -> Result<Vec<u8>> {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&stripped)
        .map_err(|e| WitnessError::value(context, format!("invalid hex: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_decoder_field_names() {
        // The external decoder emits name/sub/dump; both spellings must work.
        let json = r#"{
            "name": "SEQUENCE",
            "sub": [
                {"name": "OCTET_STRING", "content": "DE AD BE EF", "dump": "0404deadbeef"}
            ],
            "dump": "30060404deadbeef"
        }"#;
        let node: TreeNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, "SEQUENCE");
        assert_eq!(node.children.len(), 1);
        let leaf = &node.children[0];
        assert_eq!(leaf.content_bytes("test").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(leaf.content_byte_len("test").unwrap(), 4);
    }

    #[test]
    fn missing_content_is_a_visible_error() {
        let node = TreeNode {
            kind: "SEQUENCE".into(),
            ..Default::default()
        };
        assert!(matches!(
            node.content_str("test"),
            Err(WitnessError::MalformedValue { .. })
        ));
        assert!(matches!(
            node.child(0, "test"),
            Err(WitnessError::StructureNotFound { .. })
        ));
    }

    #[test]
    fn parses_decimal_and_hex_integers() {
        let node = TreeNode {
            kind: "INTEGER".into(),
            content: Some("65537".into()),
            ..Default::default()
        };
        assert_eq!(node.content_uint("test").unwrap(), BigUint::from(65537u32));

        let node = TreeNode {
            kind: "OCTET_STRING".into(),
            content: Some("10001".into()),
            ..Default::default()
        };
        assert_eq!(
            node.content_hex_uint("test").unwrap(),
            BigUint::from(0x10001u32)
        );
    }
}
