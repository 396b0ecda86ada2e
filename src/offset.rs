//! Byte-offset discovery via digest-then-substring search.
//!
//! The downstream circuit works over flat byte buffers and needs the static
//! position of each embedded digest inside its container, so positions are
//! recovered by recomputing the digest and locating its hex encoding in the
//! container's hex encoding. A miss means the declared hash type or the
//! supplied sub-document bytes are inconsistent with the signed document and
//! must surface as `OffsetNotFound`, never default to 0.

use crate::digest::digest_by_len;
use crate::error::{Result, WitnessError};

/// Byte offset of `Hash(sub_document)` inside `container`.
///
/// The digest algorithm is selected by `digest_len`. `component` names the
/// caller for diagnostics.
pub fn digest_offset(
    container: &[u8],
    sub_document: &[u8],
    digest_len: usize,
    component: &str,
) -> Result<usize> {
    let digest = digest_by_len(digest_len, sub_document)?;
    let haystack = hex::encode(container);
    let needle = hex::encode(digest);
    hex_substring_offset(&haystack, &needle)
        .ok_or_else(|| WitnessError::OffsetNotFound {
            component: component.to_string(),
        })
}

/// Byte offset of an already-hex-encoded needle inside `container_hex`.
/// Used for the DG15 active-authentication key, whose raw material (not a
/// digest of it) is located inside the DG15 encoding.
pub fn raw_offset(container_hex: &str, needle_hex: &str, component: &str) -> Result<usize> {
    let haystack = container_hex.to_lowercase();
    let needle = needle_hex.to_lowercase();
    hex_substring_offset(&haystack, &needle).ok_or_else(|| WitnessError::OffsetNotFound {
        component: component.to_string(),
    })
}

/// First byte-aligned occurrence of `needle` in `haystack`, both lowercase
/// hex, returned as a byte offset. Only even nibble indices are probed; a
/// digest embedded in a DER encoding always starts on a byte boundary, and
/// an odd-aligned occurrence must not hide an overlapping aligned one.
fn hex_substring_offset(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    (0..haystack.len())
        .step_by(2)
        .find(|&i| haystack[i..].starts_with(needle))
        .map(|i| i / 2)
}
