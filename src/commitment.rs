//! Identity commitment derivation.
//!
//! Derives the secret identity value and the placeholder registry
//! commitment from the encapsulated content and the signer public key,
//! using Poseidon over the Pallas base field. Constants are cached for
//! performance.
//!
//! The root/inclusion-path pair is explicitly a single-leaf placeholder:
//! `root = Poseidon(kc, kc, 1)` with an all-zero path of fixed length 80,
//! to be overwritten by the external registry anchoring system.

use ff::{Field, PrimeField};
use generic_array::typenum::{U2, U3, U5};
use neptune::poseidon::{Poseidon, PoseidonConstants};
use num_bigint::BigUint;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use crate::config::{
    COMMITMENT_ELEMENT_COUNT, COMMITMENT_LIMB_COUNT, COMMITMENT_LIMB_WIDTH_BITS,
    FIELD_TRUNCATION_HEX_DIGITS, INCLUSION_PATH_LEN,
};
use crate::error::{Result, WitnessError};
use crate::limbs::to_limbs;
use crate::types::PublicKey;

/// The field the arithmetic hash operates over.
pub type FieldElement = pasta_curves::Fp;

/// Cached Poseidon constants per arity
static POSEIDON_2: Lazy<PoseidonConstants<FieldElement, U2>> = Lazy::new(PoseidonConstants::new);
static POSEIDON_3: Lazy<PoseidonConstants<FieldElement, U3>> = Lazy::new(PoseidonConstants::new);
static POSEIDON_5: Lazy<PoseidonConstants<FieldElement, U5>> = Lazy::new(PoseidonConstants::new);

/// Poseidon hash of two field elements.
pub fn poseidon_hash2(a: FieldElement, b: FieldElement) -> FieldElement {
    Poseidon::new_with_preimage(&[a, b], &POSEIDON_2).hash()
}

/// Poseidon hash of three field elements.
pub fn poseidon_hash3(a: FieldElement, b: FieldElement, c: FieldElement) -> FieldElement {
    Poseidon::new_with_preimage(&[a, b, c], &POSEIDON_3).hash()
}

/// Poseidon hash of five field elements.
pub fn poseidon_hash5(elems: &[FieldElement; 5]) -> FieldElement {
    Poseidon::new_with_preimage(elems, &POSEIDON_5).hash()
}

/// Interpret a big integer as a field element. Fails if the value does not
/// fit below the field modulus; callers truncate first where needed.
pub fn fe_from_biguint(value: &BigUint, context: &str) -> Result<FieldElement> {
    let bytes = value.to_bytes_le();
    if bytes.len() > 32 {
        return Err(WitnessError::value(context, "value exceeds 256 bits"));
    }
    let mut repr = <FieldElement as PrimeField>::Repr::default();
    repr.as_mut()[..bytes.len()].copy_from_slice(&bytes);
    Option::from(FieldElement::from_repr(repr))
        .ok_or_else(|| WitnessError::value(context, "value exceeds the field modulus"))
}

/// Parse a hex string into a field element.
pub fn fe_from_hex(hex_str: &str, context: &str) -> Result<FieldElement> {
    let value = BigUint::parse_bytes(hex_str.as_bytes(), 16)
        .ok_or_else(|| WitnessError::value(context, format!("not hex: {hex_str:?}")))?;
    fe_from_biguint(&value, context)
}

/// The derived identity material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityCommitment {
    /// Secret identity value (first 62 hex chars of SHA-256 over the
    /// encapsulated content)
    pub secret: FieldElement,
    /// Placeholder single-leaf registry root
    pub commitment_root: FieldElement,
    /// All-zero placeholder inclusion path of fixed length 80
    pub inclusion_path: Vec<FieldElement>,
}

/// Derive the secret and the placeholder commitment for a document.
pub fn build_identity_commitment(
    encapsulated_content: &[u8],
    pk: &PublicKey,
) -> Result<IdentityCommitment> {
    let digest_hex = hex::encode(Sha256::digest(encapsulated_content));
    let secret = fe_from_hex(&digest_hex[..FIELD_TRUNCATION_HEX_DIGITS], "identity secret")?;

    let key_commitment = hash_public_key(pk)?;
    let commitment_root = poseidon_hash3(key_commitment, key_commitment, FieldElement::ONE);

    Ok(IdentityCommitment {
        secret,
        commitment_root,
        inclusion_path: vec![FieldElement::ZERO; INCLUSION_PATH_LEN],
    })
}

/// Hash a public key into a single field element.
///
/// EC: Poseidon over the two coordinates, each truncated to its low 62 hex
/// digits when either is too wide for one field element. RSA: the modulus
/// is cut into 15 x 64-bit limbs, regrouped three-at-a-time into 5 field
/// elements (`e[i] = l[3i]·2^128 + l[3i+1]·2^64 + l[3i+2]`) and hashed.
pub fn hash_public_key(pk: &PublicKey) -> Result<FieldElement> {
    match pk {
        PublicKey::Ec { x, y, .. } => {
            let x_hex = x.to_str_radix(16);
            let y_hex = y.to_str_radix(16);
            let (fx, fy) = if x_hex.len() > FIELD_TRUNCATION_HEX_DIGITS
                || y_hex.len() > FIELD_TRUNCATION_HEX_DIGITS
            {
                (
                    fe_from_biguint(&truncate_low(x), "key commitment x")?,
                    fe_from_biguint(&truncate_low(y), "key commitment y")?,
                )
            } else {
                (
                    fe_from_biguint(x, "key commitment x")?,
                    fe_from_biguint(y, "key commitment y")?,
                )
            };
            Ok(poseidon_hash2(fx, fy))
        }
        PublicKey::Rsa { modulus, .. } => {
            let limbs = to_limbs(modulus, COMMITMENT_LIMB_WIDTH_BITS, COMMITMENT_LIMB_COUNT);
            let mut elems = [FieldElement::ZERO; COMMITMENT_ELEMENT_COUNT];
            for (i, elem) in elems.iter_mut().enumerate() {
                let grouped = (BigUint::from(limbs[3 * i]) << 128)
                    + (BigUint::from(limbs[3 * i + 1]) << 64)
                    + BigUint::from(limbs[3 * i + 2]);
                *elem = fe_from_biguint(&grouped, "key commitment limb group")?;
            }
            Ok(poseidon_hash5(&elems))
        }
    }
}

/// Keep the low 62 hex digits (248 bits) of a value.
fn truncate_low(value: &BigUint) -> BigUint {
    use num_traits::One;
    let mask = (BigUint::one() << (FIELD_TRUNCATION_HEX_DIGITS * 4)) - BigUint::one();
    value & mask
}
