//! Centralized protocol constants for the witness pipeline.
//!
//! Every magic number here is a protocol constant shared with the downstream
//! arithmetic circuit, not an incidental choice. Changing any of them changes
//! the circuit interface.

// --- Limb Encoding Parameters ---

/// Width of one limb in the chunked big-integer representation.
/// The circuit performs modular arithmetic on 120-bit limbs so that limb
/// products fit comfortably below the ~254-bit field modulus.
pub const LIMB_WIDTH_BITS: u32 = 120;

/// Hex digits covered by one limb (30 hex digits = 120 bits).
/// Limb counts are derived as `ceil(nibbles / LIMB_HEX_DIGITS)`.
pub const LIMB_HEX_DIGITS: usize = 30;

// --- Identity Commitment Parameters ---

/// Limb width used when folding an RSA modulus into field elements for the
/// key commitment.
pub const COMMITMENT_LIMB_WIDTH_BITS: u32 = 64;

/// Number of 64-bit limbs taken from the modulus for the key commitment
/// (15 x 64 = 960 bits, regrouped three-at-a-time into 5 field elements).
pub const COMMITMENT_LIMB_COUNT: usize = 15;

/// Number of field elements the RSA key commitment is hashed over.
pub const COMMITMENT_ELEMENT_COUNT: usize = 5;

/// Hex digits kept when truncating a value to fit a single field element
/// (62 hex digits = 248 bits, below the 255-bit Pallas base field modulus).
pub const FIELD_TRUNCATION_HEX_DIGITS: usize = 62;

/// Fixed length of the placeholder registry inclusion path. The real path is
/// produced by the external anchoring system; this slot is emitted all-zero.
pub const INCLUSION_PATH_LEN: usize = 80;

// --- Digest Parameters ---

/// Digest output lengths the pipeline recognizes, in bytes
/// (SHA-1, SHA-224, SHA-256, SHA-384, SHA-512).
pub const SUPPORTED_DIGEST_LENS: [usize; 5] = [20, 28, 32, 48, 64];

// --- Encoding Markers ---

/// Bit-string prefix marking an uncompressed elliptic-curve point (0x04).
pub const UNCOMPRESSED_POINT_PREFIX: &str = "00000100";

/// DER tag byte of a SET. The signed-attributes block is re-tagged from the
/// implicit context tag `[0]` (0xA0) to SET (0x31) before hashing, per CMS.
pub const SET_TAG_HEX: &str = "31";

// --- Curve Tables ---

/// A known document-signer curve, keyed by either its explicit `a`
/// coefficient (hex) or its named-curve identifier.
#[derive(Debug, Clone, Copy)]
pub struct SignerCurve {
    /// Algorithm identifier assigned to ECDSA over this curve
    pub algorithm: u32,
    /// Named-curve identifier as emitted by the decoder
    pub name: &'static str,
    /// Explicit curve parameter `a` in lowercase hex, when issuers emit
    /// explicit domain parameters instead of a named curve
    pub param_hex: Option<&'static str>,
}

/// Closed table of document-signer curves. Rows match on either
/// representation so issuers emitting named curves and issuers emitting
/// explicit parameters both classify.
pub const SIGNER_CURVES: [SignerCurve; 5] = [
    SignerCurve {
        algorithm: 20,
        name: "secp256r1",
        param_hex: Some("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
    },
    SignerCurve {
        algorithm: 21,
        name: "brainpoolP256r1",
        param_hex: Some("7d5a0975fc2c3057eef67530417affe7fb8055c126dc5c6ce94a4b44f330b5d9"),
    },
    SignerCurve {
        algorithm: 25,
        name: "brainpoolP384r1",
        param_hex: Some(
            "7bc382c63d8c150c3c72080ace05afa0c2bea28e4fb22787139165efba91f90f8aa5814a503ad4eb04a8c7dd22ce2826",
        ),
    },
    SignerCurve {
        algorithm: 26,
        name: "brainpoolP512r1",
        param_hex: Some(
            "7830a3318b603b89e2327145ac234cc594cbdd8d3df91610a83441caea9863bc2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a72bf2c7b9e7c1ac4d77fc94ca",
        ),
    },
    SignerCurve {
        algorithm: 27,
        name: "secp521r1",
        param_hex: None,
    },
];

/// A known active-authentication curve, keyed by its field prime `p` because
/// DG15 carries explicit domain parameters with the prime at a fixed slot.
#[derive(Debug, Clone, Copy)]
pub struct ActiveAuthCurve {
    /// Algorithm identifier assigned to the active-authentication key
    pub algorithm: u32,
    /// Field prime `p` in lowercase hex
    pub prime_hex: &'static str,
}

/// Closed table of active-authentication curves found in DG15.
pub const ACTIVE_AUTH_CURVES: [ActiveAuthCurve; 4] = [
    ActiveAuthCurve {
        // secp256r1
        algorithm: 20,
        prime_hex: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    },
    ActiveAuthCurve {
        // brainpoolP256r1
        algorithm: 21,
        prime_hex: "a9fb57dba1eea9bc3e660a909d838d718c397aa3b561a6f7901e0e82974856a7",
    },
    ActiveAuthCurve {
        // brainpoolP320r1
        algorithm: 22,
        prime_hex: "d35e472036bc4fb7e13c785ed201e065f98fcfa6f6f40def4f92b9ec7893ec28fcd412b1f1b32e27",
    },
    ActiveAuthCurve {
        // secp192r1
        algorithm: 23,
        prime_hex: "fffffffffffffffffffffffffffffffeffffffffffffffff",
    },
];
