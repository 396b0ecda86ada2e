//! Extraction of cryptographic material from located substructures.
//!
//! Sits on top of [`locator`](crate::locator): once a container is found
//! structurally, these functions pull out the typed values (byte segments,
//! hash lengths, keys, signatures) the rest of the pipeline consumes.

use num_bigint::BigUint;
use tracing::warn;

use crate::config::{ACTIVE_AUTH_CURVES, SET_TAG_HEX, UNCOMPRESSED_POINT_PREFIX};
use crate::error::{Result, WitnessError};
use crate::locator;
use crate::offset::raw_offset;
use crate::tree::{decode_hex, TreeNode};
use crate::types::{PublicKey, SigAlgorithm, Signature};

/// The encapsulated-content payload and the digest length its data-group
/// hashes use.
#[derive(Debug, Clone)]
pub struct EncapsulatedContent {
    /// Raw payload bytes (the signed container of data-group hashes)
    pub bytes: Vec<u8>,
    /// Byte length of the embedded data-group digests
    pub dg_hash_len: usize,
}

/// Recover the encapsulated content from the security object. The digest
/// length is read off the first data-group hash entry inside the payload.
pub fn encapsulated_content(root: &TreeNode) -> Result<EncapsulatedContent> {
    const CTX: &str = "encapsulated content";
    let container = locator::first_octet_string(root)?;
    let bytes = container.content_bytes(CTX)?;

    // First data-group hash value: lds → (version, algorithms, hash list)
    // → first entry → its digest octet string.
    let dg_hash_len = container
        .child(0, CTX)?
        .child(2, CTX)?
        .child(0, CTX)?
        .child(1, CTX)?
        .content_byte_len(CTX)?;

    Ok(EncapsulatedContent { bytes, dg_hash_len })
}

/// The signed-attributes block and the digest length of its message-digest
/// attribute.
#[derive(Debug, Clone)]
pub struct SignedAttributes {
    /// Attribute bytes with the implicit `[0]` tag rewritten to SET (0x31),
    /// the exact bytes the document signature was computed over
    pub bytes: Vec<u8>,
    /// Byte length of the message-digest attribute value
    pub hash_len: usize,
}

/// Recover the signed attributes from the security object.
pub fn signed_attributes(root: &TreeNode) -> Result<SignedAttributes> {
    const CTX: &str = "signed attributes";
    let container = locator::signed_attributes(root)?;
    if container.raw_span.len() < 2 {
        return Err(WitnessError::value(CTX, "raw span shorter than its tag"));
    }
    // CMS: signing happens over the attributes re-tagged as an explicit SET.
    let retagged = format!("{SET_TAG_HEX}{}", &container.raw_span[2..]);
    let bytes = decode_hex(&retagged, CTX)?;

    let hash_len = container
        .last_child(CTX)?
        .last_child(CTX)?
        .child(0, CTX)?
        .content_byte_len(CTX)?;

    Ok(SignedAttributes { bytes, hash_len })
}

/// Recover the document signature. ECDSA when the final octet string wraps
/// a decoded (r, s) SEQUENCE; otherwise RSA, with the PSS salt length dug
/// out of the algorithm parameters beside the signature when present.
pub fn signature(root: &TreeNode) -> Result<Signature> {
    const CTX: &str = "signature";
    let (octet, parent) = locator::last_octet_string_with_parent(root)?;

    if !octet.children.is_empty() {
        let rs = octet.child(0, CTX)?;
        let r = rs.child(0, CTX)?.content_uint("signature r")?;
        let s = rs.child(1, CTX)?.content_uint("signature s")?;
        return Ok(Signature::Ecdsa { r, s });
    }

    let value = octet.content_hex_uint("signature value")?;
    Ok(Signature::Rsa {
        value,
        salt_len: pss_salt_len(parent),
    })
}

/// PSS salt length from the signature-algorithm parameters: the second-to-
/// last child of the signature's parent is the AlgorithmIdentifier; when it
/// carries PSS parameters their last field holds the salt as an INTEGER.
/// Any missing link in that chain means no salt (PKCS#1 v1.5).
fn pss_salt_len(parent: &TreeNode) -> Option<u32> {
    let n = parent.children.len();
    let algorithm = parent.children.get(n.checked_sub(2)?)?;
    let params = algorithm.children.last()?;
    let salt_field = params.children.last()?;
    let salt = salt_field.children.first()?;
    salt.content.as_deref()?.trim().parse::<u32>().ok()
}

/// Recover the RSA public key (modulus, exponent as decoded INTEGERs).
pub fn rsa_public_key(root: &TreeNode) -> Result<PublicKey> {
    const CTX: &str = "RSA public key";
    let container = locator::rsa_key_container(root)?;
    let seq = container.child(0, CTX)?;
    Ok(PublicKey::Rsa {
        modulus: seq.child(0, CTX)?.content_uint("RSA modulus")?,
        exponent: seq.child(1, CTX)?.content_uint("RSA exponent")?,
    })
}

/// Recover the elliptic-curve public key: coordinates from the uncompressed
/// point bit string, and the curve identifier from either explicit domain
/// parameters (coefficient `a`) or a named-curve annotation.
pub fn ec_public_key(root: &TreeNode) -> Result<PublicKey> {
    const CTX: &str = "EC public key";
    let container = locator::ec_key_container(root)?;

    let bit_string = container.child(1, CTX)?.content_str(CTX)?;
    let point_bits = &bit_string[UNCOMPRESSED_POINT_PREFIX.len()..];
    let (x, y) = split_point_bits(point_bits, CTX)?;

    let params = container.child(0, CTX)?.child(1, CTX)?;
    let curve_id = if params.children.is_empty() {
        // Named curve: the decoder annotates the OID node as "OID\nname".
        let content = params.content_str(CTX)?;
        content.lines().nth(1).unwrap_or(content).trim().to_string()
    } else {
        // Explicit domain parameters: coefficient `a` sits in the third
        // field of the curve SEQUENCE.
        params
            .child(2, CTX)?
            .child(0, CTX)?
            .content_str(CTX)?
            .trim()
            .to_string()
    };

    Ok(PublicKey::Ec { x, y, curve_id })
}

/// Split an uncompressed point's bit string into its two coordinates.
fn split_point_bits(bits: &str, context: &str) -> Result<(BigUint, BigUint)> {
    if bits.is_empty() || bits.len() % 2 != 0 {
        return Err(WitnessError::value(context, "odd-length point bit string"));
    }
    let (x_bits, y_bits) = bits.split_at(bits.len() / 2);
    let x = BigUint::parse_bytes(x_bits.as_bytes(), 2)
        .ok_or_else(|| WitnessError::value(context, "x coordinate is not binary"))?;
    let y = BigUint::parse_bytes(y_bits.as_bytes(), 2)
        .ok_or_else(|| WitnessError::value(context, "y coordinate is not binary"))?;
    Ok((x, y))
}

/// Classification and location of the optional DG15 active-authentication
/// key. Zero values mean DG15 was absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveAuthKey {
    /// Algorithm identifier of the embedded key (0 when absent or unknown)
    pub algorithm: SigAlgorithm,
    /// Byte offset of the key material inside the DG15 encoding
    pub offset: usize,
}

/// Classify the DG15 active-authentication key and find its byte offset.
///
/// EC keys are recognized by their explicit field prime; RSA keys by their
/// modulus size and exponent. An unrecognized key yields identifier 0 with
/// a warning, like the main classifier.
pub fn active_auth_key(dg15: &TreeNode) -> Result<ActiveAuthKey> {
    const CTX: &str = "DG15 key";
    let key_info = dg15.child(0, CTX)?;
    let bit_string = key_info.child(1, CTX)?;
    let content = bit_string.content_str(CTX)?;

    if content.starts_with(UNCOMPRESSED_POINT_PREFIX) {
        let point_bits = &content[UNCOMPRESSED_POINT_PREFIX.len()..];
        let (x, _y) = split_point_bits(point_bits, CTX)?;

        // Field prime from the explicit domain parameters.
        let prime = key_info
            .child(0, CTX)?
            .child(1, CTX)?
            .child(4, CTX)?
            .content_uint("DG15 field prime")?;
        let prime_hex = prime.to_str_radix(16);

        let algorithm = ACTIVE_AUTH_CURVES
            .iter()
            .find(|row| row.prime_hex == prime_hex)
            .map(|row| SigAlgorithm(row.algorithm))
            .unwrap_or(SigAlgorithm::UNKNOWN);
        if algorithm.is_unknown() {
            warn!(prime = %prime_hex, "DG15 curve not in the active-authentication table");
        }

        let offset = raw_offset(&dg15.raw_span, &x.to_str_radix(16), CTX)?;
        return Ok(ActiveAuthKey { algorithm, offset });
    }

    // RSA key: modulus and exponent decoded inside the bit string.
    let key_seq = bit_string.child(0, CTX)?;
    let modulus = key_seq.child(0, CTX)?.content_uint("DG15 modulus")?;
    let exponent = key_seq.child(1, CTX)?.content_uint("DG15 exponent")?;

    let algorithm = match crate::limbs::nibble_len(&modulus) {
        384 => SigAlgorithm(3),
        256 => {
            if exponent == BigUint::from(3u8) {
                SigAlgorithm(2)
            } else {
                SigAlgorithm(1)
            }
        }
        nibbles => {
            warn!(nibbles, "DG15 RSA modulus size not in the active-authentication table");
            SigAlgorithm::UNKNOWN
        }
    };

    let offset = raw_offset(&dg15.raw_span, &modulus.to_str_radix(16), CTX)?;
    Ok(ActiveAuthKey { algorithm, offset })
}
