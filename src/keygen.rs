//! Distributed key generation (`spec.md` §4.1), ported from
//! `examples/original_source/src/crypto-tss-rsa/tss_rsa.cpp`'s
//! `InternalGenerateKey`/`GenerateKey`/`GenerateKeyEx`.
//!
//! The dealer here is a single trusted process holding `p`, `q`, and the
//! derived `m = φ(n)/4` and `d` in full — `spec.md` §9's Open Question notes
//! this crate doesn't implement a distributed dealer-less keygen protocol,
//! only the centralized-dealer variant the original provides.

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroize;

use crate::bigint::{self, Modulo};
use crate::error::{Error, Result};
use crate::types::{KeyGenParam, KeyMeta, PrivateShare, PublicKey, DEFAULT_E};
use crate::vsss;

const SUPPORTED_KEY_BITS: [usize; 4] = [1024, 2048, 3072, 4096];

fn check_l_k(l: u32, k: u32) -> Result<()> {
    if l <= 1 {
        return Err(Error::invalid_parameter("l must be greater than 1"));
    }
    if k == 0 || k < l / 2 + 1 || k > l {
        return Err(Error::invalid_parameter("k must satisfy l/2+1 <= k <= l"));
    }
    Ok(())
}

/// Generates fresh `p`, `q` and picks every other parameter itself, then
/// calls `generate_key_ex`'s internal machinery.
pub fn generate_key(key_bits_length: usize, l: u32, k: u32) -> Result<(Vec<PrivateShare>, PublicKey, KeyMeta)> {
    debug!("generate_key: key_bits_length={key_bits_length} l={l} k={k}");

    if !SUPPORTED_KEY_BITS.contains(&key_bits_length) {
        return Err(Error::invalid_parameter("key_bits_length must be one of 1024, 2048, 3072, 4096"));
    }
    check_l_k(l, k)?;

    trace!("searching for a safe prime pair (this is the slow step)");
    let p = bigint::random_safe_prime(key_bits_length / 2);
    let q = loop {
        let candidate = bigint::random_safe_prime(key_bits_length / 2 - 1);
        if candidate != p {
            break candidate;
        }
    };

    let n = &p * &q;
    let f = bigint::random_coprime_below(&n);
    let vku = random_vku(&n);

    let param = KeyGenParam { e: DEFAULT_E, p, q, f, vku };
    internal_generate_key(l, k, param)
}

/// Generates a key using caller-supplied parameters, validating any that
/// are non-zero and filling in the rest, per `GenerateKeyEx`.
pub fn generate_key_ex(key_bits_length: usize, l: u32, k: u32, param: KeyGenParam) -> Result<(Vec<PrivateShare>, PublicKey, KeyMeta)> {
    debug!("generate_key_ex: key_bits_length={key_bits_length} l={l} k={k}");
    check_l_k(l, k)?;

    let e = if param.e == 0 {
        DEFAULT_E
    } else {
        if param.e == 2 || param.e % 2 == 0 || !bigint::is_probably_prime(&BigUint::from(param.e)) {
            return Err(Error::invalid_parameter("e must be an odd prime"));
        }
        param.e
    };

    let p = if param.p.is_zero() {
        bigint::random_safe_prime(key_bits_length / 2)
    } else {
        validate_safe_prime(&param.p)?;
        param.p
    };

    let q = if param.q.is_zero() {
        loop {
            let candidate = bigint::random_safe_prime(key_bits_length / 2 - 1);
            if candidate != p {
                break candidate;
            }
        }
    } else {
        validate_safe_prime(&param.q)?;
        if param.q == p {
            return Err(Error::invalid_parameter("q must differ from p"));
        }
        param.q
    };

    let n = &p * &q;

    let f = if param.f.is_zero() {
        bigint::random_coprime_below(&n)
    } else {
        if param.f.is_zero() || param.f >= n || !bigint::gcd(&param.f, &n).is_one_value() {
            return Err(Error::invalid_parameter("f must satisfy 0 < f < n and gcd(f, n) = 1"));
        }
        param.f
    };

    let vku = if param.vku.is_zero() {
        random_vku(&n)
    } else {
        if param.vku.is_zero() || param.vku >= n || !bigint::gcd(&param.vku, &n).is_one_value() || bigint::jacobi(&param.vku, &n) != -1 {
            return Err(Error::invalid_parameter("vku must satisfy 0 < vku < n, gcd(vku, n) = 1, jacobi(vku, n) = -1"));
        }
        param.vku
    };

    internal_generate_key(l, k, KeyGenParam { e, p, q, f, vku })
}

fn random_vku(n: &BigUint) -> BigUint {
    loop {
        let candidate = bigint::random_coprime_below(n);
        if bigint::jacobi(&candidate, n) == -1 {
            return candidate;
        }
    }
}

fn validate_safe_prime(p: &BigUint) -> Result<()> {
    let half = (p - 1u32) / 2u32;
    if !bigint::is_probably_prime(p) || !bigint::is_probably_prime(&half) {
        return Err(Error::invalid_parameter("p is not a safe prime"));
    }
    Ok(())
}

trait IsOneValue {
    fn is_one_value(&self) -> bool;
}

impl IsOneValue for BigUint {
    fn is_one_value(&self) -> bool {
        use num_traits::One;
        self.is_one()
    }
}

fn internal_generate_key(l: u32, k: u32, param: KeyGenParam) -> Result<(Vec<PrivateShare>, PublicKey, KeyMeta)> {
    let KeyGenParam { e, mut p, mut q, f, vku } = param;
    let e_big = BigUint::from(e);

    let n = &p * &q;

    let mut m = (&p - 1u32) * (&q - 1u32) / 4u32;
    let mut d = bigint::mod_inverse(&e_big, &m)?;

    p.zeroize();
    q.zeroize();

    let indices: Vec<u32> = (1..=l).collect();
    let points = vsss::split_secret(&d, k as usize, &indices, &m);

    let mut delta = BigUint::from(1u32);
    for i in 1..=l {
        delta *= BigUint::from(i);
    }
    let delta_inv = bigint::mod_inverse(&delta, &m)?;

    let share_modulo = Modulo::new(&m);
    let mut private_key_share_arr = Vec::with_capacity(l as usize);
    for pt in &points {
        let s_i = share_modulo.mul(&pt.y, &delta_inv);
        private_key_share_arr.push(PrivateShare { i: pt.index, s_i });
    }

    let n_modulo = Modulo::new(&n);
    let vkv = n_modulo.mul(&f, &f);
    let vki_arr: Vec<BigUint> = private_key_share_arr.iter().map(|share| n_modulo.pow(&vkv, &share.s_i)).collect();

    d.zeroize();
    m.zeroize();

    trace!("n has {} bits; {l} shares cut at threshold {k}", n.bits());

    let public_key = PublicKey::new(n, e_big);
    let key_meta = KeyMeta { k, l, vkv, vki_arr, vku };

    Ok((private_key_share_arr, public_key, key_meta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_signs_and_combines() {
        let (shares, pub_key, key_meta) = generate_key(1024, 3, 2).unwrap();
        assert_eq!(shares.len(), 3);
        assert_eq!(key_meta.k, 2);
        assert_eq!(key_meta.l, 3);
        assert_eq!(key_meta.vki_arr.len(), 3);
        assert!(pub_key.n.bits() >= 1000);
    }

    #[test]
    fn rejects_bad_threshold() {
        assert!(generate_key(1024, 3, 1).is_err());
        assert!(generate_key(1024, 3, 4).is_err());
    }

    #[test]
    fn rejects_bad_key_bits() {
        assert!(generate_key(777, 3, 2).is_err());
    }

    #[test]
    fn rejects_even_e() {
        let mut param = KeyGenParam::unspecified();
        param.e = 2;
        assert!(generate_key_ex(1024, 3, 2, param).is_err());
    }
}
