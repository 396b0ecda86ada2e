//! Witness assembly: the full derivation pipeline.
//!
//! Composes the locator, classifier, offset locator, field encoder and
//! identity commitment builder into the immutable [`WitnessRecord`] handed
//! to the circuit compiler. The pipeline is a pure function of the input
//! document; every fatal condition aborts with component context, and only
//! an unknown signature scheme degrades to a best-effort result.

use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::commitment::{build_identity_commitment, FieldElement};
use crate::error::Result;
use crate::extract::{self, ActiveAuthKey};
use crate::input::InputDocument;
use crate::limbs::{chunked_params, ChunkedParams};
use crate::offset::digest_offset;
use crate::types::{SigAlgorithm, Signature};

/// The complete witness record for one document.
///
/// Constructed once, immutable thereafter; emitted as artifacts and then
/// discarded.
#[derive(Debug, Clone)]
pub struct WitnessRecord {
    /// Data-group-1 payload bytes (empty when absent)
    pub dg1: Vec<u8>,
    /// Data-group-15 payload bytes (empty when absent)
    pub dg15: Vec<u8>,
    /// Encapsulated-content bytes
    pub encapsulated_content: Vec<u8>,
    /// Signed-attributes bytes (re-tagged as SET)
    pub signed_attributes: Vec<u8>,
    /// Digest length used for data-group hashes
    pub dg_hash_len: usize,
    /// Digest length used for the signed-attributes message digest
    pub sa_hash_len: usize,
    /// Chunked key/signature/reduction operands
    pub chunked: ChunkedParams,
    /// Byte offset of Hash(dg1) inside the encapsulated content
    pub dg1_offset: usize,
    /// Byte offset of Hash(dg15) inside the encapsulated content (0 when absent)
    pub dg15_offset: usize,
    /// Byte offset of Hash(encapsulated content) inside the signed attributes
    pub ec_offset: usize,
    /// Document-signer algorithm identifier (0 = unknown)
    pub sig_algorithm: SigAlgorithm,
    /// Active-authentication algorithm identifier (0 when DG15 absent)
    pub aa_algorithm: SigAlgorithm,
    /// Byte offset of the active-authentication key inside DG15
    pub aa_offset: usize,
    /// Derived secret identity value
    pub secret: FieldElement,
    /// Placeholder registry commitment root
    pub commitment_root: FieldElement,
    /// All-zero placeholder inclusion path (length 80)
    pub inclusion_path: Vec<FieldElement>,
}

/// Derive the full witness record for one input document.
pub fn derive_witness(doc: &InputDocument) -> Result<WitnessRecord> {
    let tree = &doc.sod_tree;
    let dg1 = doc.dg1_bytes()?;
    let dg15 = doc.dg15_bytes()?;

    let ec = extract::encapsulated_content(tree)?;
    let sa = extract::signed_attributes(tree)?;
    debug!(
        ec_len = ec.bytes.len(),
        sa_len = sa.bytes.len(),
        dg_hash_len = ec.dg_hash_len,
        sa_hash_len = sa.hash_len,
        "recovered signed containers"
    );

    let sig = extract::signature(tree)?;
    // The signature family decides which key container to look for.
    let pk = match &sig {
        Signature::Rsa { .. } => extract::rsa_public_key(tree)?,
        Signature::Ecdsa { .. } => extract::ec_public_key(tree)?,
    };

    let sig_algorithm = classify(&pk, &sig, sa.hash_len);
    if sig_algorithm.is_unknown() {
        // Non-fatal: limb encoding still proceeds from the structural shape.
        warn!(
            key_family = if pk.is_ec() { "EC" } else { "RSA" },
            hash_len = sa.hash_len,
            "signature scheme not in the classification table, continuing with identifier 0"
        );
    }

    let dg1_offset = if dg1.is_empty() {
        0
    } else {
        digest_offset(&ec.bytes, &dg1, ec.dg_hash_len, "dg1")?
    };
    let dg15_offset = if dg15.is_empty() {
        0
    } else {
        digest_offset(&ec.bytes, &dg15, ec.dg_hash_len, "dg15")?
    };
    let ec_offset = digest_offset(&sa.bytes, &ec.bytes, sa.hash_len, "encapsulated content")?;

    let aux = match &doc.dg15_tree {
        Some(dg15_tree) => extract::active_auth_key(dg15_tree)?,
        None => ActiveAuthKey::default(),
    };

    let chunked = chunked_params(&pk, &sig)?;
    let identity = build_identity_commitment(&ec.bytes, &pk)?;

    info!(
        algorithm = %sig_algorithm,
        aa_algorithm = %aux.algorithm,
        limbs = chunked.limb_count,
        dg1_offset,
        dg15_offset,
        ec_offset,
        "witness derived"
    );

    Ok(WitnessRecord {
        dg1,
        dg15,
        encapsulated_content: ec.bytes,
        signed_attributes: sa.bytes,
        dg_hash_len: ec.dg_hash_len,
        sa_hash_len: sa.hash_len,
        chunked,
        dg1_offset,
        dg15_offset,
        ec_offset,
        sig_algorithm,
        aa_algorithm: aux.algorithm,
        aa_offset: aux.offset,
        secret: identity.secret,
        commitment_root: identity.commitment_root,
        inclusion_path: identity.inclusion_path,
    })
}
