//! Core data types recovered from the security object.
//!
//! The key and signature families are explicit tagged unions fixed at
//! extraction time, so downstream stages dispatch on the variant instead of
//! probing optional fields.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// A document-signer public key recovered from the security object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// RSA public key
    Rsa {
        modulus: BigUint,
        exponent: BigUint,
    },
    /// Elliptic-curve public key (uncompressed point)
    Ec {
        x: BigUint,
        y: BigUint,
        /// Either the explicit curve parameter `a` as hex, or a named-curve
        /// identifier, exactly as the decoder presented it
        curve_id: String,
    },
}

impl PublicKey {
    /// True for the elliptic-curve variant.
    pub fn is_ec(&self) -> bool {
        matches!(self, PublicKey::Ec { .. })
    }
}

/// A document-signer signature recovered from the security object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// RSA signature. `salt_len` present means RSASSA-PSS (0 is a valid
    /// present value); absent means PKCS#1 v1.5.
    Rsa {
        value: BigUint,
        salt_len: Option<u32>,
    },
    /// ECDSA signature
    Ecdsa { r: BigUint, s: BigUint },
}

/// Canonical algorithm identifier shared with the downstream circuit.
///
/// The value space is a closed enumeration; `0` means no table row matched
/// (non-fatal: limb encoding still proceeds from the structural key shape).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SigAlgorithm(pub u32);

impl SigAlgorithm {
    pub const UNKNOWN: Self = Self(0);

    // RSA PKCS#1 v1.5
    pub const RSA_2048_SHA256: Self = Self(1);
    pub const RSA_4096_SHA256: Self = Self(2);
    pub const RSA_2048_SHA1: Self = Self(3);

    // RSASSA-PSS (modulus bits / exponent / salt / hash)
    pub const RSA_PSS_2048_E3_SALT32_SHA256: Self = Self(10);
    pub const RSA_PSS_2048_E65537_SALT32_SHA256: Self = Self(11);
    pub const RSA_PSS_2048_E65537_SALT64_SHA256: Self = Self(12);
    pub const RSA_PSS_2048_E65537_SALT48_SHA384: Self = Self(13);
    pub const RSA_PSS_3072_E65537_SALT32_SHA256: Self = Self(14);

    // ECDSA by curve
    pub const ECDSA_SECP256R1: Self = Self(20);
    pub const ECDSA_BRAINPOOL_P256R1: Self = Self(21);
    pub const ECDSA_BRAINPOOL_P320R1: Self = Self(22);
    pub const ECDSA_SECP192R1: Self = Self(23);
    pub const ECDSA_BRAINPOOL_P384R1: Self = Self(25);
    pub const ECDSA_BRAINPOOL_P512R1: Self = Self(26);
    pub const ECDSA_SECP521R1: Self = Self(27);

    /// True when no table row matched.
    pub fn is_unknown(&self) -> bool {
        self.0 == 0
    }
}

impl Default for SigAlgorithm {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl std::fmt::Display for SigAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
