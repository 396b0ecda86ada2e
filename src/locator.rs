//! Structural searches over the decoded document tree.
//!
//! The security object has no fixed schema across issuers, so every
//! substructure is located by a structural predicate rather than a fixed
//! path. All searches are depth-first pre-order and terminate on the first
//! match; a miss is a hard [`StructureNotFound`](crate::WitnessError)
//! failure, never a silent default.

use crate::error::{Result, WitnessError};
use crate::tree::TreeNode;
use crate::config::UNCOMPRESSED_POINT_PREFIX;

/// First "OCTET_STRING" node in pre-order. This is the encapsulated-content
/// container of the security object.
pub fn first_octet_string(root: &TreeNode) -> Result<&TreeNode> {
    find_first(root, &|node| node.kind == "OCTET_STRING")
        .ok_or_else(|| WitnessError::structure("encapsulated content", "an OCTET_STRING node"))
}

/// The signed-attributes container: the first context-tag-0 node whose last
/// child is a two-element SEQUENCE of an object identifier and a SET holding
/// exactly one OCTET_STRING (the message digest attribute). The extra shape
/// checks disambiguate it from other `[0]` occurrences in the document.
pub fn signed_attributes(root: &TreeNode) -> Result<&TreeNode> {
    find_first(root, &is_signed_attributes)
        .ok_or_else(|| WitnessError::structure("signed attributes", "a [0] node ending in a digest attribute"))
}

fn is_signed_attributes(node: &TreeNode) -> bool {
    if node.kind != "[0]" {
        return false;
    }
    let Some(seq) = node.children.last() else {
        return false;
    };
    if seq.kind != "SEQUENCE" || seq.children.len() != 2 {
        return false;
    }
    if seq.children[0].kind != "OBJECT_IDENTIFIER" {
        return false;
    }
    let set = &seq.children[1];
    set.kind == "SET" && set.children.len() == 1 && set.children[0].kind == "OCTET_STRING"
}

/// Last "OCTET_STRING" node in encoding order together with its immediate
/// parent. The signature value is always the final octet-string leaf, and
/// the parent carries the signature algorithm parameters beside it.
pub fn last_octet_string_with_parent(root: &TreeNode) -> Result<(&TreeNode, &TreeNode)> {
    let mut found: Option<(&TreeNode, &TreeNode)> = None;
    scan_last_octet_string(root, None, &mut found);
    found.ok_or_else(|| WitnessError::structure("signature", "a nested OCTET_STRING node"))
}

fn scan_last_octet_string<'a>(
    node: &'a TreeNode,
    parent: Option<&'a TreeNode>,
    found: &mut Option<(&'a TreeNode, &'a TreeNode)>,
) {
    if node.kind == "OCTET_STRING" {
        if let Some(parent) = parent {
            *found = Some((node, parent));
        }
    }
    for child in &node.children {
        scan_last_octet_string(child, Some(node), found);
    }
}

/// First node whose second child is a BIT_STRING starting with the
/// uncompressed-point marker (`00000100`). This is the elliptic-curve
/// subject-public-key container.
pub fn ec_key_container(root: &TreeNode) -> Result<&TreeNode> {
    find_first(root, &|node| {
        node.children.len() >= 2
            && node.children[1].kind == "BIT_STRING"
            && node.children[1]
                .content
                .as_deref()
                .is_some_and(|c| c.starts_with(UNCOMPRESSED_POINT_PREFIX))
    })
    .ok_or_else(|| WitnessError::structure("EC public key", "a BIT_STRING with an uncompressed point"))
}

/// First BIT_STRING node wrapping a two-INTEGER SEQUENCE (modulus, exponent).
/// This is the RSA subject-public-key container.
pub fn rsa_key_container(root: &TreeNode) -> Result<&TreeNode> {
    find_first(root, &|node| {
        node.kind == "BIT_STRING"
            && node.children.iter().any(|child| {
                child.kind == "SEQUENCE"
                    && child.children.len() == 2
                    && child.children.iter().all(|n| n.kind == "INTEGER")
            })
    })
    .ok_or_else(|| WitnessError::structure("RSA public key", "a BIT_STRING over (modulus, exponent)"))
}

/// Generic first-match pre-order search.
fn find_first<'a>(node: &'a TreeNode, pred: &dyn Fn(&TreeNode) -> bool) -> Option<&'a TreeNode> {
    if pred(node) {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_first(child, pred))
}
