//! Shared fixtures: synthetic security-object documents with known key
//! material and digest placement.

#![allow(dead_code)]

use mrtd_witness::{InputDocument, TreeNode};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};

/// Leaf node with content.
pub fn leaf(kind: &str, content: &str) -> TreeNode {
    TreeNode {
        kind: kind.into(),
        content: Some(content.into()),
        children: Vec::new(),
        raw_span: String::new(),
    }
}

/// Container node.
pub fn branch(kind: &str, children: Vec<TreeNode>) -> TreeNode {
    TreeNode {
        kind: kind.into(),
        content: None,
        children,
        raw_span: String::new(),
    }
}

/// Deterministic big integer with the top bit pinned so the bit length is
/// exactly `bits`.
pub fn random_uint(bits: usize, seed: u64) -> BigUint {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = vec![0u8; bits / 8];
    rng.fill_bytes(&mut bytes);
    bytes[0] |= 0x80;
    BigUint::from_bytes_be(&bytes)
}

/// Everything a test needs to check a synthetic RSA document against.
pub struct RsaFixture {
    pub doc: InputDocument,
    pub modulus: BigUint,
    pub sig_value: BigUint,
    pub dg1: Vec<u8>,
    pub dg15: Vec<u8>,
    pub ec_bytes: Vec<u8>,
    pub dg1_offset: usize,
    pub dg15_offset: usize,
    pub ec_offset: usize,
    pub aa_offset: usize,
}

/// Encapsulated-content container: an OCTET_STRING whose content embeds the
/// data-group digests at known offsets, with the nested entry that reveals
/// the data-group hash length.
fn encapsulated_node(ec_bytes: &[u8], dg1_digest: &[u8]) -> TreeNode {
    let hash_list = branch(
        "SEQUENCE",
        vec![branch(
            "SEQUENCE",
            vec![
                leaf("INTEGER", "1"),
                leaf("OCTET_STRING", &hex::encode(dg1_digest)),
            ],
        )],
    );
    let lds = branch(
        "SEQUENCE",
        vec![leaf("INTEGER", "0"), branch("SEQUENCE", vec![]), hash_list],
    );
    TreeNode {
        kind: "OCTET_STRING".into(),
        content: Some(hex::encode(ec_bytes)),
        children: vec![lds],
        raw_span: hex::encode(ec_bytes),
    }
}

/// Signed-attributes `[0]` node whose raw span embeds the digest of the
/// encapsulated content at a known offset.
fn signed_attributes_node(ec_digest: &[u8], sa_prefix: &[u8]) -> TreeNode {
    let mut raw = vec![0xa0u8];
    raw.extend_from_slice(sa_prefix);
    raw.extend_from_slice(ec_digest);
    raw.extend_from_slice(&[0x05, 0x00]);

    let digest_attr = branch(
        "SEQUENCE",
        vec![
            leaf("OBJECT_IDENTIFIER", "1.2.840.113549.1.9.4"),
            branch("SET", vec![leaf("OCTET_STRING", &hex::encode(ec_digest))]),
        ],
    );
    TreeNode {
        kind: "[0]".into(),
        content: None,
        children: vec![branch("SEQUENCE", vec![]), digest_attr],
        raw_span: hex::encode(&raw),
    }
}

/// RSA subject-public-key container: BIT_STRING over (modulus, exponent).
fn rsa_key_node(modulus: &BigUint, exponent: u32) -> TreeNode {
    branch(
        "BIT_STRING",
        vec![branch(
            "SEQUENCE",
            vec![
                leaf("INTEGER", &modulus.to_str_radix(10)),
                leaf("INTEGER", &exponent.to_string()),
            ],
        )],
    )
}

/// SignerInfo tail: algorithm identifier beside the final signature octet.
/// `pss_salt` adds RSASSA-PSS parameters carrying the salt length.
fn signer_info_node(sig_value: &BigUint, pss_salt: Option<u32>) -> TreeNode {
    let alg = match pss_salt {
        None => branch(
            "SEQUENCE",
            vec![leaf("OBJECT_IDENTIFIER", "1.2.840.113549.1.1.11")],
        ),
        Some(salt) => branch(
            "SEQUENCE",
            vec![
                leaf("OBJECT_IDENTIFIER", "1.2.840.113549.1.1.10"),
                branch(
                    "SEQUENCE",
                    vec![
                        branch("[0]", vec![]),
                        branch("[1]", vec![]),
                        branch("[2]", vec![leaf("INTEGER", &salt.to_string())]),
                    ],
                ),
            ],
        ),
    };
    let sig_hex = hex::encode(sig_value.to_bytes_be());
    branch("SEQUENCE", vec![alg, leaf("OCTET_STRING", &sig_hex)])
}

/// DG15 tree holding a 1024-bit RSA active-authentication key whose modulus
/// hex is planted in the raw span at byte offset 2.
fn dg15_rsa_tree(aa_modulus: &BigUint) -> TreeNode {
    let key_seq = branch(
        "SEQUENCE",
        vec![
            leaf("INTEGER", &aa_modulus.to_str_radix(10)),
            leaf("INTEGER", "65537"),
        ],
    );
    let bit_string = TreeNode {
        kind: "BIT_STRING".into(),
        content: Some("00110000".into()),
        children: vec![key_seq],
        raw_span: String::new(),
    };
    let key_info = branch("SEQUENCE", vec![branch("SEQUENCE", vec![]), bit_string]);
    TreeNode {
        kind: "SEQUENCE".into(),
        content: None,
        children: vec![key_info],
        raw_span: format!("6182{}aabb", aa_modulus.to_str_radix(16)),
    }
}

/// Synthetic RSA-2048 / e=65537 / SHA-256 document with known digest
/// placement. `with_dg15` adds a DG15 payload and its decoded tree;
/// `pss_salt` switches the signature algorithm parameters to RSASSA-PSS.
pub fn rsa_document(with_dg15: bool, pss_salt: Option<u32>) -> RsaFixture {
    let modulus = random_uint(2048, 101);
    let sig_value = random_uint(2048, 102);
    let dg1: Vec<u8> = (0u8..88).collect();
    let dg15: Vec<u8> = if with_dg15 {
        (100u8..180).collect()
    } else {
        Vec::new()
    };

    let dg1_digest = Sha256::digest(&dg1);
    let dg15_digest = Sha256::digest(&dg15);

    // Encapsulated content: 13-byte prefix, dg1 digest, 7-byte gap,
    // dg15 digest, short tail.
    let mut ec_bytes = vec![0x30u8; 13];
    let dg1_offset = ec_bytes.len();
    ec_bytes.extend_from_slice(&dg1_digest);
    ec_bytes.extend_from_slice(&[0x42; 7]);
    let dg15_offset = ec_bytes.len();
    if with_dg15 {
        ec_bytes.extend_from_slice(&dg15_digest);
    }
    ec_bytes.extend_from_slice(&[0x00, 0x01]);

    let ec_digest = Sha256::digest(&ec_bytes);
    let sa_prefix = [0x11u8; 5];
    let ec_offset = 1 + sa_prefix.len();

    let sod_tree = branch(
        "SEQUENCE",
        vec![
            encapsulated_node(&ec_bytes, &dg1_digest),
            branch("SEQUENCE", vec![rsa_key_node(&modulus, 65537)]),
            signed_attributes_node(&ec_digest, &sa_prefix),
            signer_info_node(&sig_value, pss_salt),
        ],
    );

    let aa_modulus = random_uint(1024, 103);
    let (dg15_field, dg15_tree) = if with_dg15 {
        (Some(hex::encode(&dg15)), Some(dg15_rsa_tree(&aa_modulus)))
    } else {
        (None, None)
    };

    RsaFixture {
        doc: InputDocument {
            sod_tree,
            dg1: Some(hex::encode(&dg1)),
            dg15: dg15_field,
            dg15_tree,
        },
        modulus,
        sig_value,
        dg1,
        dg15,
        ec_bytes,
        dg1_offset,
        dg15_offset: if with_dg15 { dg15_offset } else { 0 },
        ec_offset,
        aa_offset: 2,
    }
}

/// Everything a test needs to check a synthetic ECDSA document against.
pub struct EcFixture {
    pub doc: InputDocument,
    pub x: BigUint,
    pub y: BigUint,
    pub r: BigUint,
    pub s: BigUint,
}

fn bits_padded(value: &BigUint, width: usize) -> String {
    let raw = value.to_str_radix(2);
    format!("{}{}", "0".repeat(width - raw.len()), raw)
}

/// Synthetic ECDSA / secp256r1 (named curve) / SHA-256 document.
pub fn ec_document() -> EcFixture {
    let x = random_uint(256, 111);
    let y = random_uint(256, 112);
    let r = random_uint(256, 113);
    let s = random_uint(256, 114);

    let point_bits = format!("00000100{}{}", bits_padded(&x, 256), bits_padded(&y, 256));
    let key_alg = branch(
        "SEQUENCE",
        vec![
            leaf("OBJECT_IDENTIFIER", "1.2.840.10045.2.1"),
            leaf("OBJECT_IDENTIFIER", "1.2.840.10045.3.1.7\nsecp256r1"),
        ],
    );
    let key_container = branch("SEQUENCE", vec![key_alg, leaf("BIT_STRING", &point_bits)]);

    let dg1: Vec<u8> = (0u8..88).collect();
    let dg1_digest = Sha256::digest(&dg1);
    let mut ec_bytes = vec![0x30u8; 9];
    ec_bytes.extend_from_slice(&dg1_digest);
    ec_bytes.extend_from_slice(&[0x00]);
    let ec_digest = Sha256::digest(&ec_bytes);

    let rs = branch(
        "SEQUENCE",
        vec![
            leaf("INTEGER", &r.to_str_radix(10)),
            leaf("INTEGER", &s.to_str_radix(10)),
        ],
    );
    let sig_octet = TreeNode {
        kind: "OCTET_STRING".into(),
        content: None,
        children: vec![rs],
        raw_span: String::new(),
    };
    let signer_info = branch(
        "SEQUENCE",
        vec![
            branch(
                "SEQUENCE",
                vec![leaf("OBJECT_IDENTIFIER", "1.2.840.10045.4.3.2")],
            ),
            sig_octet,
        ],
    );

    let sod_tree = branch(
        "SEQUENCE",
        vec![
            encapsulated_node(&ec_bytes, &dg1_digest),
            key_container,
            signed_attributes_node(&ec_digest, &[0x11; 5]),
            signer_info,
        ],
    );

    EcFixture {
        doc: InputDocument {
            sod_tree,
            dg1: Some(hex::encode(&dg1)),
            dg15: None,
            dg15_tree: None,
        },
        x,
        y,
        r,
        s,
    }
}
