//! Input document record.
//!
//! One JSON record per document: the externally-decoded security-object
//! tree, the optional data-group payloads, and (when DG15 is present) its
//! decoded tree. Payload strings are accepted as hex or base64, detected
//! by pattern.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use crate::error::{Result, WitnessError};
use crate::tree::TreeNode;

/// One document's worth of input, as loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct InputDocument {
    /// Decoded security-object tree (the external decoder's JSON output)
    pub sod_tree: TreeNode,
    /// Data-group-1 payload (biographic data), hex or base64
    #[serde(default)]
    pub dg1: Option<String>,
    /// Data-group-15 payload (active-authentication key), hex or base64
    #[serde(default)]
    pub dg15: Option<String>,
    /// Decoded DG15 tree, present iff `dg15` is
    #[serde(default)]
    pub dg15_tree: Option<TreeNode>,
}

impl InputDocument {
    /// Load a document record from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let doc = serde_json::from_reader(BufReader::new(file))?;
        Ok(doc)
    }

    /// DG1 payload bytes, empty when absent.
    pub fn dg1_bytes(&self) -> Result<Vec<u8>> {
        self.dg1.as_deref().map_or(Ok(Vec::new()), |s| decode_payload(s, "dg1"))
    }

    /// DG15 payload bytes, empty when absent.
    pub fn dg15_bytes(&self) -> Result<Vec<u8>> {
        self.dg15.as_deref().map_or(Ok(Vec::new()), |s| decode_payload(s, "dg15"))
    }
}

/// Decode a payload given as hex or base64. Hex is detected as an
/// even-length all-hex-digit string (whitespace tolerated); anything else
/// is treated as base64.
pub fn decode_payload(text: &str, context: &str) -> Result<Vec<u8>> {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Ok(Vec::new());
    }
    if stripped.len() % 2 == 0 && stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return hex::decode(&stripped)
            .map_err(|e| WitnessError::MalformedEncoding(format!("{context}: bad hex: {e}")));
    }
    BASE64
        .decode(&stripped)
        .map_err(|e| WitnessError::MalformedEncoding(format!("{context}: bad base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_payloads_are_detected() {
        assert_eq!(decode_payload("deadbeef", "t").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_payload("DE AD BE EF", "t").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn base64_payloads_are_detected() {
        // "3q2+7w==" is base64 for de ad be ef; '+' and '=' rule out hex
        assert_eq!(decode_payload("3q2+7w==", "t").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn empty_payload_is_empty_bytes() {
        assert!(decode_payload("", "t").unwrap().is_empty());
        assert!(decode_payload("  ", "t").unwrap().is_empty());
    }

    #[test]
    fn garbage_is_a_malformed_encoding() {
        assert!(matches!(
            decode_payload("!!not-anything!!", "t"),
            Err(WitnessError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn record_without_data_groups_loads() {
        let json = r#"{"sod_tree": {"name": "SEQUENCE", "dump": "3000"}}"#;
        let doc: InputDocument = serde_json::from_str(json).unwrap();
        assert!(doc.dg1_bytes().unwrap().is_empty());
        assert!(doc.dg15_bytes().unwrap().is_empty());
        assert!(doc.dg15_tree.is_none());
    }
}
