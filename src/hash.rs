//! SHA-256 and MGF1, the hash collaborator from `spec.md` §6.
//!
//! `spec.md` fixes SHA-256 as the only supported hash (Non-goals: "support
//! for hash functions other than SHA-256"), so unlike
//! `examples/dennisss-dacha/pkg/crypto/src/hasher.rs`'s generic
//! `HasherFactory`/`Hasher` trait object machinery (built to support MD5
//! through SHA-512 interchangeably), this module hard-codes `sha2::Sha256`.
//! The distillation is intentional, not an oversight: see `DESIGN.md`.

use sha2::{Digest, Sha256};

/// Output size of SHA-256, in bytes. `L1` in `spec.md` §4.3 is this times 8.
pub const HASH_LEN: usize = 32;

pub fn sha256(data: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// MGF1 mask generation function (RFC 8017 Appendix B.2.1), fixed to
/// SHA-256 as the underlying hash.
///
/// Grounded on `examples/dennisss-dacha/pkg/crypto/src/rsa.rs`'s `mgf1`,
/// including its optimization of hashing the seed once and reusing that
/// partial state across counter values — `sha2`'s `Sha256` is `Clone`, so
/// the same trick applies directly.
pub fn mgf1(seed: &[u8], mask_len: usize) -> Vec<u8> {
    let mut output = Vec::with_capacity(mask_len + HASH_LEN);

    let mut prefix_hasher = Sha256::new();
    prefix_hasher.update(seed);

    let iterations = (mask_len + HASH_LEN - 1) / HASH_LEN;
    for counter in 0..iterations {
        let mut hasher = prefix_hasher.clone();
        hasher.update((counter as u32).to_be_bytes());
        output.extend_from_slice(&hasher.finalize());
    }

    output.truncate(mask_len);
    output
}

/// XORs `mask` into `data` in place. Both slices must have equal length.
pub fn xor_inplace(mask: &[u8], data: &mut [u8]) {
    for (d, m) in data.iter_mut().zip(mask.iter()) {
        *d ^= m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn mgf1_mask_length() {
        let mask = mgf1(b"seed", 50);
        assert_eq!(mask.len(), 50);
    }
}
