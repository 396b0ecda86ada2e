//! Signature-scheme classification.
//!
//! A pure decision table from (public key shape, signature shape, hash
//! output length) to the canonical algorithm identifier shared with the
//! circuit. No row matching is non-fatal: the caller keeps going with
//! identifier 0 because the key family is still known structurally.

use num_bigint::BigUint;

use crate::config::SIGNER_CURVES;
use crate::limbs::nibble_len;
use crate::types::{PublicKey, SigAlgorithm, Signature};

/// One RSASSA-PSS table row.
struct PssRow {
    modulus_bits: usize,
    exponent: u32,
    salt_len: u32,
    hash_len: usize,
    algorithm: u32,
}

/// One RSA PKCS#1 v1.5 table row.
struct Pkcs1Row {
    modulus_bits: usize,
    exponent: u32,
    hash_len: usize,
    algorithm: u32,
}

const PSS_ROWS: [PssRow; 5] = [
    PssRow { modulus_bits: 2048, exponent: 3, salt_len: 32, hash_len: 32, algorithm: 10 },
    PssRow { modulus_bits: 2048, exponent: 65537, salt_len: 32, hash_len: 32, algorithm: 11 },
    PssRow { modulus_bits: 2048, exponent: 65537, salt_len: 64, hash_len: 32, algorithm: 12 },
    PssRow { modulus_bits: 2048, exponent: 65537, salt_len: 48, hash_len: 48, algorithm: 13 },
    PssRow { modulus_bits: 3072, exponent: 65537, salt_len: 32, hash_len: 32, algorithm: 14 },
];

const PKCS1_ROWS: [Pkcs1Row; 3] = [
    Pkcs1Row { modulus_bits: 2048, exponent: 65537, hash_len: 32, algorithm: 1 },
    Pkcs1Row { modulus_bits: 4096, exponent: 65537, hash_len: 32, algorithm: 2 },
    Pkcs1Row { modulus_bits: 2048, exponent: 65537, hash_len: 20, algorithm: 3 },
];

/// Classify a (key, signature, hash length) tuple.
///
/// Modulus bit length is measured in whole nibbles (hex digits × 4).
/// Exponent and salt comparisons are numeric, so leading-zero variation in
/// the source encoding cannot change the result.
pub fn classify(pk: &PublicKey, sig: &Signature, hash_len: usize) -> SigAlgorithm {
    match (pk, sig) {
        (PublicKey::Rsa { modulus, exponent }, Signature::Rsa { salt_len: Some(salt), .. }) => {
            let bits = nibble_len(modulus) * 4;
            PSS_ROWS
                .iter()
                .find(|row| {
                    row.modulus_bits == bits
                        && BigUint::from(row.exponent) == *exponent
                        && row.salt_len == *salt
                        && row.hash_len == hash_len
                })
                .map(|row| SigAlgorithm(row.algorithm))
                .unwrap_or(SigAlgorithm::UNKNOWN)
        }
        (PublicKey::Rsa { modulus, exponent }, Signature::Rsa { salt_len: None, .. }) => {
            let bits = nibble_len(modulus) * 4;
            PKCS1_ROWS
                .iter()
                .find(|row| {
                    row.modulus_bits == bits
                        && BigUint::from(row.exponent) == *exponent
                        && row.hash_len == hash_len
                })
                .map(|row| SigAlgorithm(row.algorithm))
                .unwrap_or(SigAlgorithm::UNKNOWN)
        }
        (PublicKey::Ec { curve_id, .. }, Signature::Ecdsa { .. }) => classify_curve(curve_id),
        // Structurally inconsistent pair: no table can apply
        _ => SigAlgorithm::UNKNOWN,
    }
}

/// Match a curve identifier against the signer-curve table. The identifier
/// is either an explicit parameter in hex (compared case-insensitively) or
/// a named-curve string.
pub fn classify_curve(curve_id: &str) -> SigAlgorithm {
    let trimmed = curve_id.trim();
    let lowered = trimmed.to_lowercase();
    SIGNER_CURVES
        .iter()
        .find(|row| row.name == trimmed || row.param_hex == Some(lowered.as_str()))
        .map(|row| SigAlgorithm(row.algorithm))
        .unwrap_or(SigAlgorithm::UNKNOWN)
}
