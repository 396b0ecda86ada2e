//! Digest selection by output length.
//!
//! The security object never names its hash algorithm where the pipeline
//! needs it; the algorithm is implied by the byte length of the embedded
//! digest values (20/28/32/48/64).

use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::{Result, WitnessError};

/// Compute the digest whose output length is `out_len` bytes.
///
/// Supported lengths are 20 (SHA-1), 28 (SHA-224), 32 (SHA-256),
/// 48 (SHA-384) and 64 (SHA-512); anything else is a fatal
/// `UnsupportedDigestLength`.
pub fn digest_by_len(out_len: usize, data: &[u8]) -> Result<Vec<u8>> {
    let digest = match out_len {
        20 => Sha1::digest(data).to_vec(),
        28 => Sha224::digest(data).to_vec(),
        32 => Sha256::digest(data).to_vec(),
        48 => Sha384::digest(data).to_vec(),
        64 => Sha512::digest(data).to_vec(),
        len => return Err(WitnessError::UnsupportedDigestLength { len }),
    };
    debug_assert_eq!(digest.len(), out_len);
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SUPPORTED_DIGEST_LENS;

    #[test]
    fn produces_requested_lengths() {
        for len in SUPPORTED_DIGEST_LENS {
            let digest = digest_by_len(len, b"abc").unwrap();
            assert_eq!(digest.len(), len);
        }
    }

    #[test]
    fn sha256_known_answer() {
        let digest = digest_by_len(32, b"abc").unwrap();
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn unsupported_length_fails() {
        for len in [0, 16, 24, 33, 128] {
            assert!(matches!(
                digest_by_len(len, b"abc"),
                Err(WitnessError::UnsupportedDigestLength { len: l }) if l == len
            ));
        }
    }
}
