//! Verifiable secret sharing over a bounded modulus — the VSSS collaborator
//! from `spec.md` §6: "Given (secret d, threshold k, indices {1..l}, modulus
//! m), produce Shamir points {(i, y_i)}; given a subset of ≥k points and m,
//! recover the secret."
//!
//! `spec.md` §9's Open Question notes the dealer discards the commitments a
//! true VSSS scheme would produce, so this module only implements the
//! Shamir splitting/recovery half — no commitment generation or
//! verification is attempted here, matching that note's instruction not to
//! invent a trust model the source doesn't have.
//!
//! No published crate shares over an arbitrary `BigUint` modulus the way
//! this scheme needs (the pack's VSSS crates, e.g.
//! `examples/other_examples/manifests/mikelodder7-vsss-rs`, share over a
//! fixed prime field tied to an elliptic curve's scalar field); this module
//! borrows that crate's `split_secret`/`combine_shares` naming but is
//! otherwise a direct port of the polynomial-evaluation algorithm used in
//! `examples/original_source/src/crypto-tss-rsa/tss_rsa.cpp`'s call into
//! `sss::vsss::MakeShares`/`RecoverSecret`.

use num_bigint::BigUint;
use zeroize::Zeroize;

use crate::bigint::Modulo;
use crate::error::{Error, Result};

/// One Shamir point `(i, y_i)`.
#[derive(Clone, Debug)]
pub struct SharePoint {
    pub index: u32,
    pub y: BigUint,
}

/// Evaluates a uniformly random degree `k-1` polynomial over `Z_modulus`
/// with constant term `secret`, at each index in `indices`.
///
/// The polynomial's non-constant coefficients are zeroized on return; only
/// the evaluations are kept, matching `spec.md` §5's requirement that VSSS
/// polynomial coefficients be scrubbed once their owning scope ends.
pub fn split_secret(secret: &BigUint, k: usize, indices: &[u32], modulus: &BigUint) -> Vec<SharePoint> {
    assert!(k >= 1, "threshold must be at least 1");

    let m = Modulo::new(modulus);

    let mut coefficients: Vec<BigUint> = Vec::with_capacity(k);
    coefficients.push(secret.clone());
    for _ in 1..k {
        coefficients.push(crate::bigint::random_below(modulus));
    }

    let points = indices
        .iter()
        .map(|&i| {
            let x = BigUint::from(i);
            let mut y = BigUint::from(0u32);
            let mut x_pow = BigUint::from(1u32);
            for c in &coefficients {
                y = m.add(&y, &m.mul(c, &x_pow));
                x_pow = m.mul(&x_pow, &x);
            }
            SharePoint { index: i, y }
        })
        .collect();

    coefficients.iter_mut().for_each(|c| c.zeroize());

    points
}

/// Recovers the secret from `>= k` points via Lagrange interpolation at
/// `x = 0`, reducing modulo `modulus`.
///
/// Unlike `lambda::lambda` (used by the combiner, which never learns
/// `modulus`), this function inverts the Lagrange denominators directly
/// mod `modulus` — safe here because the caller (the key generator) is the
/// only party that ever knows `modulus` in full.
pub fn recover_secret(points: &[SharePoint], modulus: &BigUint) -> Result<BigUint> {
    if points.is_empty() {
        return Err(Error::invalid_parameter("no points to recover from"));
    }

    let m = Modulo::new(modulus);
    let mut secret = BigUint::from(0u32);

    for (j, pj) in points.iter().enumerate() {
        let mut num = BigUint::from(1u32);
        let mut den = BigUint::from(1u32);

        for (t, pt) in points.iter().enumerate() {
            if t == j {
                continue;
            }

            let xi = BigUint::from(pt.index);
            num = m.mul(&num, &xi);

            let xj = BigUint::from(pj.index);
            let diff = m.sub(&xj, &xi);
            den = m.mul(&den, &diff);
        }

        let den_inv = m.inv(&den)?;
        let lambda_j = m.mul(&num, &den_inv);
        secret = m.add(&secret, &m.mul(&lambda_j, &pj.y));
    }

    Ok(secret)
}
