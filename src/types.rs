//! Domain records (`spec.md` §3): the public key, per-party private share,
//! key metadata, signature share, and key-generation parameters.
//!
//! Grounded field-for-field on `examples/original_source/src/crypto-tss-rsa/
//! RSAPublicKey.h`, `RSAPrivateKeyShare.h`, `RSAKeyMeta.h`, `RSASigShare.h`,
//! `KeyGenParam.h` — the Rust types below carry the same fields the C++
//! classes do, minus the protobuf/JSON plumbing (handled separately in
//! `serialize.rs`).

use std::fmt;

use num_bigint::BigUint;

use crate::bigint::Modulo;

/// `e = 65537` (the fourth Fermat number), the default public exponent —
/// `f4` in `tss_rsa.cpp`.
pub const DEFAULT_E: u32 = 65537;

/// The shared RSA public key: `n = pq`, plus the public exponent `e`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

impl PublicKey {
    pub fn new(n: BigUint, e: BigUint) -> Self {
        PublicKey { n, e }
    }

    /// Checks `sig^e mod n == x mod n`, where `x` is the message
    /// representative (already PSS-encoded and `OS2IP`'d by the caller, or
    /// a raw small-integer representative — this function makes no
    /// assumption about how `doc` was produced, matching
    /// `RSAPublicKey::InternalVerifySignature`).
    pub fn verify_signature(&self, doc: &[u8], sig: &BigUint) -> bool {
        let x = crate::bigint::os2ip(doc);
        let m = Modulo::new(&self.n);
        m.pow(sig, &self.e) == (&x % &self.n)
    }
}

/// One party's share `s_i` of the shared private exponent `d`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateShare {
    pub i: u32,
    pub s_i: BigUint,
}

/// Redacts `s_i` — this is the secret every other party must learn nothing
/// about, so it must never reach a `{:?}` format or a log line.
impl fmt::Debug for PrivateShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateShare").field("i", &self.i).field("s_i", &"<redacted>").finish()
    }
}

/// Key metadata shared by every party and the combiner: threshold `k`,
/// party count `l`, the verification base `vkv`, each party's verification
/// key `vki_arr[i-1]`, and the Jacobi fix-up base `vku`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMeta {
    pub k: u32,
    pub l: u32,
    pub vkv: BigUint,
    pub vki_arr: Vec<BigUint>,
    pub vku: BigUint,
}

impl KeyMeta {
    /// `vki` for 1-based party index `index`, i.e. `vki_arr[index - 1]`.
    pub fn vki(&self, index: u32) -> &BigUint {
        &self.vki_arr[(index - 1) as usize]
    }
}

/// A single party's signature share, plus its non-interactive proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigShare {
    pub index: u32,
    pub sig_share: BigUint,
    pub z: BigUint,
    pub c: BigUint,
}

impl SigShare {
    pub fn proof(&self) -> crate::proof::Proof {
        crate::proof::Proof {
            z: self.z.clone(),
            c: self.c.clone(),
        }
    }
}

/// Explicit key-generation parameters for `keygen::generate_key_ex`.
///
/// `e = 0` means "use the default" (`DEFAULT_E`), matching the original's
/// use of `0` as a sentinel for "not supplied" across every field here.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyGenParam {
    pub e: u32,
    pub p: BigUint,
    pub q: BigUint,
    pub f: BigUint,
    pub vku: BigUint,
}

/// Redacts `p` and `q` — the two safe primes that everything else in the
/// scheme (`m`, `d`, every `s_i`) derives from. `f` and `vku` are public
/// bases, not secrets, and are printed as-is.
impl fmt::Debug for KeyGenParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyGenParam")
            .field("e", &self.e)
            .field("p", &"<redacted>")
            .field("q", &"<redacted>")
            .field("f", &self.f)
            .field("vku", &self.vku)
            .finish()
    }
}

impl KeyGenParam {
    /// All-zero/default parameters, equivalent to letting `generate_key_ex`
    /// pick every value itself.
    pub fn unspecified() -> Self {
        KeyGenParam {
            e: 0,
            p: BigUint::from(0u32),
            q: BigUint::from(0u32),
            f: BigUint::from(0u32),
            vku: BigUint::from(0u32),
        }
    }
}

/// Salt length policy for EMSA-PSS encoding (`spec.md` §4.3), named after
/// the original's `SaltLength` enum (`emsa_pss.h`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaltMode {
    /// `sLen = emLen - hLen - 2` — the largest salt the modulus allows.
    AutoLength,
    /// `sLen = hLen` (32 bytes for SHA-256) — RFC 8017's suggested default.
    EqualToHash,
}
