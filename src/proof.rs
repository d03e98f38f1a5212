//! Non-interactive zero-knowledge proof of correct exponentiation
//! (`spec.md` §4.4), ported from
//! `examples/original_source/src/crypto-tss-rsa/RSASigShareProof.cpp`.
//!
//! The transcript fed to the Fiat-Shamir hash is `v, x̃, v_i, sig_i², v', x'`
//! — six big-endian, minimal-length, unprefixed byte strings concatenated
//! in that exact order. `Prove` and `Verify` must agree on it byte-for-byte
//! or every proof fails to verify; see `DESIGN.md` for why no length
//! prefixes are inserted (the original doesn't, and prepending them would
//! change every test vector carried over from `pure-tss-rsa-test.cpp`).

use num_bigint::BigUint;
use zeroize::Zeroize;

use crate::bigint::{self, Modulo};
use crate::error::Result;
use crate::hash::sha256;

/// Output length of SHA-256, in bits — `L1` in `spec.md` §4.4.
const L1_BITS: u64 = 256;

/// A `(z, c)` proof pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    pub z: BigUint,
    pub c: BigUint,
}

/// Produces a proof that `sig_i = x^(2 s_i) mod n` given the dealer-chosen
/// verification base `v`, the party's public verification key `vi = v^{s_i}`,
/// the message representative `x`, and the already-computed signature share
/// `sig_i` (the caller, `signer::sign`, computes `x^(2 s_i)` itself — this
/// only proves the exponent relationship, it doesn't recompute the share).
///
/// `r` is sampled uniformly in `[0, 2^(L(n) + 2*L1 + 1))`, matching the
/// upper bound `BN::TWO << (n.BitLength() + L1 * 2)` from the original.
pub fn prove(s_i: &BigUint, v: &BigUint, vi: &BigUint, x: &BigUint, n: &BigUint, sig_i: &BigUint) -> Proof {
    let m = Modulo::new(n);

    let upper_bits = n.bits() + 2 * L1_BITS + 1;
    let upper_bound = BigUint::from(1u32) << upper_bits;
    let mut r = bigint::random_below(&upper_bound);

    let vp = m.pow(v, &r);
    let x_tilde = m.pow(x, &BigUint::from(4u32));
    let xp = m.pow(&x_tilde, &r);
    let sig2 = m.pow(&sig_i, &BigUint::from(2u32));

    let c = fiat_shamir_challenge(v, &x_tilde, vi, &sig2, &vp, &xp);
    let z = s_i * &c + &r;
    r.zeroize();

    Proof { z, c }
}

/// Checks a proof that `sig_i = x^(2 s_i) mod n`, per `spec.md` §4.4.
/// `sig_i` comes in on the wire as part of the signature share; this never
/// recomputes it, only checks the proof's consistency with it.
pub fn verify(proof: &Proof, v: &BigUint, vi: &BigUint, x: &BigUint, n: &BigUint, sig_i: &BigUint) -> Result<bool> {
    let m = Modulo::new(n);

    let vi_inv = m.inv(vi)?;
    let vp = m.mul(&m.pow(v, &proof.z), &m.pow(&vi_inv, &proof.c));

    let x_tilde = m.pow(x, &BigUint::from(4u32));

    let sig_i_inv = m.inv(sig_i)?;
    let two_c = BigUint::from(2u32) * &proof.c;
    let xp = m.mul(&m.pow(&x_tilde, &proof.z), &m.pow(&sig_i_inv, &two_c));

    let sig2 = m.pow(sig_i, &BigUint::from(2u32));

    let c = fiat_shamir_challenge(v, &x_tilde, vi, &sig2, &vp, &xp);
    Ok(c == proof.c)
}

fn fiat_shamir_challenge(v: &BigUint, x_tilde: &BigUint, vi: &BigUint, sig2: &BigUint, vp: &BigUint, xp: &BigUint) -> BigUint {
    let mut buf = Vec::new();
    for part in [v, x_tilde, vi, sig2, vp, xp] {
        buf.extend_from_slice(&part.to_bytes_be());
    }
    BigUint::from_bytes_be(&sha256(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn honest_proof_verifies() {
        let n = BigUint::from(100000000003u64);
        let v = BigUint::from(12345u32);
        let s_i = BigUint::from(777u32);
        let m = Modulo::new(&n);
        let vi = m.pow(&v, &s_i);
        let x = BigUint::from(99999u32);
        let sig_i = m.pow(&x, &(BigUint::from(2u32) * &s_i));

        let proof = prove(&s_i, &v, &vi, &x, &n, &sig_i);
        assert!(verify(&proof, &v, &vi, &x, &n, &sig_i).unwrap());
    }

    #[test]
    fn tampered_share_fails_verification() {
        let n = BigUint::from(100000000003u64);
        let v = BigUint::from(12345u32);
        let s_i = BigUint::from(777u32);
        let m = Modulo::new(&n);
        let vi = m.pow(&v, &s_i);
        let x = BigUint::from(99999u32);
        let sig_i = m.pow(&x, &(BigUint::from(2u32) * &s_i));

        let proof = prove(&s_i, &v, &vi, &x, &n, &sig_i);
        let forged_sig_i = (&sig_i + BigUint::from(1u32)) % &n;
        assert!(!verify(&proof, &v, &vi, &x, &n, &forged_sig_i).unwrap());
    }
}
