//! Circuit artifact generation.
//!
//! Renders the two textual artifacts consumed by the external circuit
//! compiler: the parameterized source unit (fixed array lengths, algorithm
//! constants, verification entry-point invocation) and the witness-value
//! file binding every input parameter to literals. Both are regenerated in
//! full on every run; there is no incremental update.

use ff::PrimeField;
use num_bigint::BigUint;

use crate::commitment::FieldElement;
use crate::witness::WitnessRecord;

/// Hex rendering of a field element, `0x`-prefixed and left-stripped.
fn fe_hex(element: &FieldElement) -> String {
    let value = BigUint::from_bytes_le(element.to_repr().as_ref());
    format!("0x{}", value.to_str_radix(16))
}

/// Hex rendering of one limb.
fn limb_hex(limb: u128) -> String {
    format!("0x{limb:x}")
}

/// Byte slice as a bracketed decimal list: `[1, 2, 3]`.
fn byte_list(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Limb slice as a bracketed hex list: `[0x1, 0x2]`.
fn limb_list(limbs: &[u128]) -> String {
    let items: Vec<String> = limbs.iter().map(|l| limb_hex(*l)).collect();
    format!("[{}]", items.join(", "))
}

/// Items rendered as a TOML array of strings: `["1", "2"]`.
fn quoted_list<I: IntoIterator<Item = String>>(items: I) -> String {
    let quoted: Vec<String> = items.into_iter().map(|s| format!("\"{s}\"")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Circuit profile name encoding the full parameter shape, kept for
/// compatibility with the naming scheme of previously compiled circuits.
pub fn profile_name(record: &WitnessRecord) -> String {
    // Blocks of the compression function covering the encapsulated content
    // (64-byte blocks up to SHA-256, 128-byte blocks beyond), plus padding.
    let block = |hash_len: usize, data_len: usize| {
        if hash_len <= 32 {
            (data_len + 8).div_ceil(64)
        } else {
            (data_len + 8).div_ceil(128)
        }
    };
    // TD1 documents carry a 93-byte DG1
    let doc_type = if record.dg1.len() == 93 { 3 } else { 1 };
    let ec_blocks = block(record.sa_hash_len, record.encapsulated_content.len());

    let aa_part = if record.dg15.is_empty() {
        "NA".to_string()
    } else {
        format!(
            "{}_{}_{}_{}",
            record.aa_algorithm,
            record.dg15_offset * 8,
            block(record.dg_hash_len, record.dg15.len()),
            record.aa_offset * 8
        )
    };

    format!(
        "registerIdentity_{}_{}_{}_{}_{}_{}_{}",
        record.sig_algorithm,
        record.dg_hash_len * 8,
        doc_type,
        ec_blocks,
        record.ec_offset * 8,
        record.dg1_offset * 8,
        aa_part
    )
}

/// Render the parameterized circuit source unit, including the generated
/// test entry point binding this document's literal inputs.
pub fn circuit_source(record: &WitnessRecord) -> String {
    let n = record.chunked.limb_count;
    format!(
        "//{name}\n\
         pub mod sigver;\n\
         pub mod big_curve;\n\
         pub mod rsa;\n\
         pub mod sha1;\n\
         pub mod sha224;\n\
         pub mod sha384;\n\
         pub mod rsa_pss;\n\
         pub mod jubjub;\n\
         pub mod smt;\n\
         pub mod utils;\n\
         mod not_passports_zk_circuits;\n\
         use not_passports_zk_circuits::register_identity;\n\
         \n\
         fn main(\n\
         \tdg1: [u8; {dg1_len}],\n\
         \tdg15: [u8; {dg15_len}],\n\
         \tec: [u8; {ec_len}],\n\
         \tsa: [u8; {sa_len}],\n\
         \tpk: [Field; {n}],\n\
         \treduction_pk: [Field; {n}],\n\
         \tsig: [Field; {n}],\n\
         \tsk_identity: Field,\n\
         \ticao_root: pub Field,\n\
         \tinclusion_branches: [Field; {path_len}]) -> pub (Field, Field, Field, Field){{\n\
         \tlet tmp = register_identity::<\n\
         \t\t{dg1_len},\n\
         \t\t{dg15_len},\n\
         \t\t{ec_len},\n\
         \t\t{sa_len},\n\
         \t\t{n},\n\
         \t\t{ec_field_size},\n\
         \t\t{dg_hash_type},\n\
         \t\t{hash_type},\n\
         \t\t{sig_type},\n\
         \t\t{dg1_shift},\n\
         \t\t{dg15_shift},\n\
         \t\t{ec_shift},\n\
         \t\t{aa_sig_type},\n\
         \t\t{aa_shift}>(\n\
         \tdg1, dg15, ec, sa, pk, reduction_pk, sig, sk_identity, icao_root, inclusion_branches);\n\
         \t(tmp.0, tmp.1, tmp.2, tmp.3)\n\
         }}\n\
         \n\
         #[test]\n\
         fn test_main() {{\n\
         \tlet dg1: [u8; {dg1_len}] = {dg1};\n\
         \tlet dg15: [u8; {dg15_len}] = {dg15};\n\
         \tlet ec: [u8; {ec_len}] = {ec};\n\
         \tlet sa: [u8; {sa_len}] = {sa};\n\
         \tlet pk: [Field; {n}] = {pk};\n\
         \tlet reduction_pk: [Field; {n}] = {reduction};\n\
         \tlet sig: [Field; {n}] = {sig};\n\
         \tlet sk_identity = {sk_identity};\n\
         \tlet icao_root = {icao_root};\n\
         \tlet inclusion_branches = [0; {path_len}];\n\
         \tlet _ = main(dg1, dg15, ec, sa, pk, reduction_pk, sig, sk_identity, icao_root, inclusion_branches);\n\
         }}\n",
        name = profile_name(record),
        dg1_len = record.dg1.len(),
        dg15_len = record.dg15.len(),
        ec_len = record.encapsulated_content.len(),
        sa_len = record.signed_attributes.len(),
        n = n,
        path_len = record.inclusion_path.len(),
        ec_field_size = record.chunked.ec_field_size_bits,
        dg_hash_type = record.dg_hash_len,
        hash_type = record.sa_hash_len,
        sig_type = record.sig_algorithm,
        dg1_shift = record.dg1_offset,
        dg15_shift = record.dg15_offset,
        ec_shift = record.ec_offset,
        aa_sig_type = record.aa_algorithm,
        aa_shift = record.aa_offset,
        dg1 = byte_list(&record.dg1),
        dg15 = byte_list(&record.dg15),
        ec = byte_list(&record.encapsulated_content),
        sa = byte_list(&record.signed_attributes),
        pk = limb_list(&record.chunked.pk_limbs),
        reduction = limb_list(&record.chunked.reduction_limbs),
        sig = limb_list(&record.chunked.sig_limbs),
        sk_identity = fe_hex(&record.secret),
        icao_root = fe_hex(&record.commitment_root),
    )
}

/// Render the witness-value file binding every parameter to literals.
pub fn witness_values(record: &WitnessRecord) -> String {
    let bytes_toml = |bytes: &[u8]| quoted_list(bytes.iter().map(|b| b.to_string()));
    let limbs_toml = |limbs: &[u128]| quoted_list(limbs.iter().map(|l| limb_hex(*l)));

    let dg15 = if record.dg15.is_empty() {
        "[]".to_string()
    } else {
        bytes_toml(&record.dg15)
    };
    let branches = quoted_list(record.inclusion_path.iter().map(|_| "0".to_string()));

    format!(
        "dg1={dg1}\n\
         dg15={dg15}\n\
         ec={ec}\n\
         icao_root=\"{icao_root}\"\n\
         inclusion_branches={branches}\n\
         pk={pk}\n\
         reduction_pk={reduction}\n\
         sa={sa}\n\
         sig={sig}\n\
         sk_identity=\"{sk_identity}\"\n",
        dg1 = bytes_toml(&record.dg1),
        dg15 = dg15,
        ec = bytes_toml(&record.encapsulated_content),
        icao_root = fe_hex(&record.commitment_root),
        branches = branches,
        pk = limbs_toml(&record.chunked.pk_limbs),
        reduction = limbs_toml(&record.chunked.reduction_limbs),
        sa = bytes_toml(&record.signed_attributes),
        sig = limbs_toml(&record.chunked.sig_limbs),
        sk_identity = fe_hex(&record.secret),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limbs::ChunkedParams;
    use crate::types::SigAlgorithm;
    use ff::Field;

    fn sample_record() -> WitnessRecord {
        WitnessRecord {
            dg1: vec![1, 2, 3],
            dg15: vec![],
            encapsulated_content: vec![4, 5],
            signed_attributes: vec![6, 7, 8],
            dg_hash_len: 32,
            sa_hash_len: 32,
            chunked: ChunkedParams {
                limb_count: 2,
                ec_field_size_bits: 0,
                pk_limbs: vec![0xab, 0xcd],
                sig_limbs: vec![0x11, 0x22],
                reduction_limbs: vec![0x1, 0x0],
            },
            dg1_offset: 10,
            dg15_offset: 0,
            ec_offset: 20,
            sig_algorithm: SigAlgorithm::RSA_2048_SHA256,
            aa_algorithm: SigAlgorithm::UNKNOWN,
            aa_offset: 0,
            secret: FieldElement::from(5u64),
            commitment_root: FieldElement::from(9u64),
            inclusion_path: vec![FieldElement::ZERO; 3],
        }
    }

    #[test]
    fn source_unit_declares_shape_constants() {
        let src = circuit_source(&sample_record());
        assert!(src.contains("dg1: [u8; 3]"));
        assert!(src.contains("pk: [Field; 2]"));
        assert!(src.contains("inclusion_branches: [Field; 3]"));
        assert!(src.contains("register_identity::<"));
        // sig_type constant appears in the generic argument list
        assert!(src.contains("\t\t1,\n"));
    }

    #[test]
    fn source_unit_embeds_literal_test_block() {
        let src = circuit_source(&sample_record());
        assert!(src.contains("#[test]\nfn test_main() {"));
        assert!(src.contains("let dg1: [u8; 3] = [1, 2, 3];"));
        assert!(src.contains("let pk: [Field; 2] = [0xab, 0xcd];"));
        assert!(src.contains("let sk_identity = 0x5;"));
        assert!(src.contains("let icao_root = 0x9;"));
        assert!(src.contains("let inclusion_branches = [0; 3];"));
    }

    #[test]
    fn witness_file_binds_every_parameter() {
        let toml = witness_values(&sample_record());
        assert!(toml.contains("dg1=[\"1\", \"2\", \"3\"]"));
        assert!(toml.contains("dg15=[]"));
        assert!(toml.contains("pk=[\"0xab\", \"0xcd\"]"));
        assert!(toml.contains("sk_identity=\"0x5\""));
        assert!(toml.contains("icao_root=\"0x9\""));
        assert!(toml.contains("inclusion_branches=[\"0\", \"0\", \"0\"]"));
    }

    #[test]
    fn profile_name_encodes_shape() {
        let name = profile_name(&sample_record());
        // sig 1, dg hash 256 bits, passport doc type, 1 block, shifts in bits
        assert_eq!(name, "registerIdentity_1_256_1_1_160_80_NA");
    }
}
