//! Fixed-width limb encoding for circuit operands.
//!
//! Recovered arbitrary-precision integers are re-encoded as little-endian
//! 120-bit limbs so the circuit can do modular arithmetic on bounded-width
//! values, together with the Barrett reduction constant that lets it reduce
//! modulo an RSA modulus without division.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::config::{LIMB_HEX_DIGITS, LIMB_WIDTH_BITS};
use crate::error::{Result, WitnessError};
use crate::types::{PublicKey, Signature};

/// The chunked operand set handed to the circuit compiler.
///
/// Invariants: `pk_limbs` and `sig_limbs` are the same length; for EC keys
/// both are coordinate concatenations (x‖y, r‖s), `reduction_limbs` is
/// all-zero of length `limb_count`, and `ec_field_size_bits` is non-zero.
/// For RSA keys `reduction_limbs` holds the Barrett constant and
/// `ec_field_size_bits` is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedParams {
    /// Number of limbs per circuit operand (doubled for EC concatenations)
    pub limb_count: usize,
    /// Curve field size in bits, 0 for RSA
    pub ec_field_size_bits: usize,
    /// Public key limbs (modulus, or x‖y)
    pub pk_limbs: Vec<u128>,
    /// Signature limbs (value, or r‖s)
    pub sig_limbs: Vec<u128>,
    /// Barrett reduction limbs (all-zero for EC)
    pub reduction_limbs: Vec<u128>,
}

/// Hex-digit (nibble) count of a value. Bit lengths throughout the pipeline
/// are measured in whole nibbles, matching the circuit's view of operands.
pub fn nibble_len(value: &BigUint) -> usize {
    (value.bits() as usize).div_ceil(4)
}

/// Limb count for an operand of `nibbles` hex digits
/// (30 hex digits = one 120-bit limb).
pub fn limb_count_for(nibbles: usize) -> usize {
    nibbles.div_ceil(LIMB_HEX_DIGITS).max(1)
}

/// Encode `value` as `count` little-endian limbs of `width` bits, such that
/// `Σ limb[i] · 2^(width·i) = value`. Bits beyond the limb capacity are
/// dropped, mirroring the fixed-shape circuit operand.
pub fn to_limbs(value: &BigUint, width: u32, count: usize) -> Vec<u128> {
    debug_assert!(width <= 128);
    let mask = (BigUint::one() << width) - BigUint::one();
    let mut rest = value.clone();
    let mut limbs = Vec::with_capacity(count);
    for _ in 0..count {
        let limb = &rest & &mask;
        limbs.push(biguint_to_u128(&limb));
        rest >>= width;
    }
    limbs
}

/// Inverse of [`to_limbs`]: `Σ limb[i] · 2^(width·i)`.
pub fn from_limbs(limbs: &[u128], width: u32) -> BigUint {
    let mut acc = BigUint::zero();
    for &limb in limbs.iter().rev() {
        acc = (acc << width) + BigUint::from(limb);
    }
    acc
}

fn biguint_to_u128(value: &BigUint) -> u128 {
    let mut out: u128 = 0;
    for (i, b) in value.to_bytes_le().iter().enumerate() {
        out |= (*b as u128) << (8 * i);
    }
    out
}

/// Barrett reduction constant for `modulus`: `floor(2^(2b+2) / n)` where
/// `b` is the modulus bit length measured in whole nibbles. The circuit
/// multiplies by this constant instead of dividing.
pub fn barrett_constant(modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(WitnessError::value("barrett constant", "zero modulus"));
    }
    let bits = nibble_len(modulus) * 4;
    Ok((BigUint::one() << (2 * bits + 2)) / modulus)
}

/// Field size in bits implied by a curve identifier: hex parameters encode
/// it as their nibble count × 4, named curves embed it as the first digit
/// run of the name (e.g. `secp521r1` → 521).
pub fn ec_field_size_bits(curve_id: &str) -> Result<usize> {
    let trimmed = curve_id.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(trimmed.len() * 4);
    }
    let digits: String = trimmed
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<usize>()
        .map_err(|_| WitnessError::value("curve identifier", format!("no field size in {trimmed:?}")))
}

/// Build the chunked operand set for a (key, signature) pair.
///
/// The key and signature must be from the same family; the pipeline
/// guarantees this by construction, so a mismatch is a malformed document.
pub fn chunked_params(pk: &PublicKey, sig: &Signature) -> Result<ChunkedParams> {
    match (pk, sig) {
        (PublicKey::Rsa { modulus, .. }, Signature::Rsa { value, .. }) => {
            let k = limb_count_for(nibble_len(modulus));
            let reduction = barrett_constant(modulus)?;
            Ok(ChunkedParams {
                limb_count: k,
                ec_field_size_bits: 0,
                pk_limbs: to_limbs(modulus, LIMB_WIDTH_BITS, k),
                sig_limbs: to_limbs(value, LIMB_WIDTH_BITS, k),
                reduction_limbs: to_limbs(&reduction, LIMB_WIDTH_BITS, k),
            })
        }
        (PublicKey::Ec { x, y, curve_id }, Signature::Ecdsa { r, s }) => {
            // Coordinate operands share one limb geometry; size from the
            // wider coordinate so a short leading byte cannot shrink it.
            let k = limb_count_for(nibble_len(x).max(nibble_len(y)));
            let mut pk_limbs = to_limbs(x, LIMB_WIDTH_BITS, k);
            pk_limbs.extend(to_limbs(y, LIMB_WIDTH_BITS, k));
            let mut sig_limbs = to_limbs(r, LIMB_WIDTH_BITS, k);
            sig_limbs.extend(to_limbs(s, LIMB_WIDTH_BITS, k));
            Ok(ChunkedParams {
                limb_count: 2 * k,
                ec_field_size_bits: ec_field_size_bits(curve_id)?,
                pk_limbs,
                sig_limbs,
                reduction_limbs: vec![0u128; 2 * k],
            })
        }
        _ => Err(WitnessError::value(
            "chunked params",
            "key and signature families disagree",
        )),
    }
}
