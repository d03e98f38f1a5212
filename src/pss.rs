//! EMSA-PSS encoding and verification (RFC 8017 §9.1), fixed to SHA-256.
//!
//! Ported from `examples/original_source/src/crypto-tss-rsa/emsa_pss.cpp`,
//! which itself follows RFC 3447 §9.1 with the salt-length convention from
//! Go's `crypto/rsa` package (`SaltLength::AutoLength` / `EqualToHash`) —
//! see that file's header comment.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Error, Result};
use crate::hash::{mgf1, sha256, xor_inplace, HASH_LEN};
use crate::types::SaltMode;

/// `EMSA-PSS-ENCODE` (RFC 8017 §9.1.1), per `spec.md` §6's public signature:
/// `encode_pss(m, keyBits, saltMode) → EM`. The salt is drawn fresh from the
/// process RNG on every call, matching `emsa_pss.cpp`'s
/// `safeheron::rand::RandomBytes(salt.get(), sLen)` — this is why encoding
/// the same message twice produces two different (both valid) encodings.
pub fn encode_pss(message: &[u8], key_bits: usize, salt_mode: SaltMode) -> Result<Vec<u8>> {
    let em_bits = key_bits - 1;
    let em_len = (em_bits + 7) / 8;
    if em_len < HASH_LEN + 2 {
        return Err(Error::invalid_parameter("key_bits too small for EMSA-PSS with SHA-256"));
    }

    let s_len = salt_len_for(salt_mode, em_len);
    let mut salt = vec![0u8; s_len];
    if s_len > 0 {
        OsRng.fill_bytes(&mut salt);
    }

    encode_pss_with_salt(message, key_bits, salt_mode, &salt)
}

/// `EMSA-PSS-ENCODE` with an explicit salt, for testability (known-answer
/// tests need to pin the salt rather than let the RNG choose it).
/// `encode_pss` above is the public-API entry point; this is its core.
pub fn encode_pss_with_salt(message: &[u8], key_bits: usize, salt_mode: SaltMode, salt: &[u8]) -> Result<Vec<u8>> {
    let em_bits = key_bits - 1;
    let em_len = (em_bits + 7) / 8;

    if em_len < HASH_LEN + 2 {
        return Err(Error::invalid_parameter("key_bits too small for EMSA-PSS with SHA-256"));
    }

    let s_len = salt_len_for(salt_mode, em_len);
    if salt.len() != s_len {
        return Err(Error::invalid_parameter("salt length does not match the requested salt mode"));
    }
    if em_len < HASH_LEN + s_len + 2 {
        return Err(Error::invalid_parameter("key_bits too small for the requested salt length"));
    }

    let m_hash = sha256(message);

    let mut m_prime = Vec::with_capacity(8 + HASH_LEN + s_len);
    m_prime.extend_from_slice(&[0u8; 8]);
    m_prime.extend_from_slice(&m_hash);
    m_prime.extend_from_slice(salt);
    let h = sha256(&m_prime);

    let ps_len = em_len - HASH_LEN - s_len - 2;
    let mut db = Vec::with_capacity(em_len - HASH_LEN - 1);
    db.extend(std::iter::repeat(0u8).take(ps_len));
    db.push(0x01);
    db.extend_from_slice(salt);

    let db_mask = mgf1(&h, em_len - HASH_LEN - 1);
    xor_inplace(&db_mask, &mut db);
    let mut masked_db = db;

    let top_zero_bits = em_len * 8 - em_bits;
    masked_db[0] &= 0xffu8 >> top_zero_bits;

    let mut em = Vec::with_capacity(em_len);
    em.extend_from_slice(&masked_db);
    em.extend_from_slice(&h);
    em.push(0xbc);

    Ok(em)
}

/// `EMSA-PSS-VERIFY` (RFC 8017 §9.1.2).
pub fn verify_pss(message: &[u8], key_bits: usize, salt_mode: SaltMode, em: &[u8]) -> bool {
    let em_bits = key_bits - 1;
    let em_len = (em_bits + 7) / 8;

    if em.len() != em_len {
        return false;
    }
    if em_len < HASH_LEN + 2 {
        return false;
    }

    let s_len = salt_len_for(salt_mode, em_len);
    if em_len < HASH_LEN + s_len + 2 {
        return false;
    }

    if em[em.len() - 1] != 0xbc {
        return false;
    }

    let masked_db = &em[..em_len - HASH_LEN - 1];
    let h = &em[em_len - HASH_LEN - 1..em_len - 1];

    let top_zero_bits = em_len * 8 - em_bits;
    let top_mask = 0xffu8 >> top_zero_bits;
    if masked_db[0] & !top_mask != 0 {
        return false;
    }

    let db_mask = mgf1(h, em_len - HASH_LEN - 1);
    let mut db = masked_db.to_vec();
    xor_inplace(&db_mask, &mut db);
    db[0] &= top_mask;

    let ps_len = em_len - HASH_LEN - s_len - 2;
    if db[..ps_len].iter().any(|&b| b != 0) {
        return false;
    }
    if db[ps_len] != 0x01 {
        return false;
    }

    let salt = &db[em_len - HASH_LEN - 1 - s_len..];

    let m_hash = sha256(message);
    let mut m_prime = Vec::with_capacity(8 + HASH_LEN + s_len);
    m_prime.extend_from_slice(&[0u8; 8]);
    m_prime.extend_from_slice(&m_hash);
    m_prime.extend_from_slice(salt);
    let h_prime = sha256(&m_prime);

    h == h_prime
}

fn salt_len_for(mode: SaltMode, em_len: usize) -> usize {
    match mode {
        SaltMode::AutoLength => em_len - 2 - HASH_LEN,
        SaltMode::EqualToHash => HASH_LEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_verify_roundtrip_equal_to_hash() {
        let message = b"the quick brown fox";
        let salt = [7u8; HASH_LEN];
        let em = encode_pss_with_salt(message, 1024, SaltMode::EqualToHash, &salt).unwrap();
        assert!(verify_pss(message, 1024, SaltMode::EqualToHash, &em));
    }

    #[test]
    fn encode_then_verify_roundtrip_auto_length() {
        let message = b"the quick brown fox";
        let em_len = (1023 + 7) / 8;
        let s_len = em_len - 2 - HASH_LEN;
        let salt = vec![9u8; s_len];
        let em = encode_pss_with_salt(message, 1024, SaltMode::AutoLength, &salt).unwrap();
        assert!(verify_pss(message, 1024, SaltMode::AutoLength, &em));
    }

    #[test]
    fn tampered_encoding_fails_verification() {
        let message = b"the quick brown fox";
        let salt = [7u8; HASH_LEN];
        let mut em = encode_pss_with_salt(message, 1024, SaltMode::EqualToHash, &salt).unwrap();
        let last = em.len() - 2;
        em[last] ^= 0x01;
        assert!(!verify_pss(message, 1024, SaltMode::EqualToHash, &em));
    }

    #[test]
    fn rejects_key_too_small() {
        assert!(encode_pss_with_salt(b"x", 200, SaltMode::EqualToHash, &[0u8; HASH_LEN]).is_err());
    }

    #[test]
    fn public_entry_point_self_salts_and_verifies() {
        let message = b"12345678123456781234567812345678";
        let em = encode_pss(message, 1024, SaltMode::AutoLength).unwrap();
        assert!(verify_pss(message, 1024, SaltMode::AutoLength, &em));

        // Two calls draw independent salts, so the encodings differ even
        // though both verify.
        let em2 = encode_pss(message, 1024, SaltMode::AutoLength).unwrap();
        assert_ne!(em, em2);
    }
}
