//! The `BigInt` / prime-generation collaborator contracts from `spec.md` §6.
//!
//! `spec.md` treats arbitrary-precision arithmetic, primality testing and
//! safe-prime generation as an external library the core merely consumes.
//! This module is that library boundary: everything upstream of it is
//! `num-bigint`/`num-integer`/`num-prime`/`rand`, and everything downstream
//! only ever sees the functions below. Grounded on the shape of
//! `examples/dennisss-dacha/pkg/math/src/big/modulo.rs`'s `Modulo` helper
//! (a struct wrapping a modulus with `add`/`sub`/`mul`/`pow`/`inv` methods),
//! extended with the operations that crate doesn't provide (Jacobi symbol,
//! extended Euclidean over signed integers, primality testing, safe-prime
//! search) using the crates `examples/other_examples/manifests/
//! TheFrozenFire-rabin-williams-signatures` depends on for the same job.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_prime::nt_funcs::is_prime;
use num_prime::RandPrime;
use num_traits::{One, Signed, Zero};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Error, Result};

/// A set of operations that all produce a result reduced `mod n`.
///
/// Mirrors the teacher's `Modulo<'a>` helper one-for-one; `num-bigint`
/// already provides a constant-ish-time `modpow`, so `pow` here is a thin
/// pass-through rather than the teacher's own square-and-multiply loop.
pub struct Modulo<'a> {
    pub n: &'a BigUint,
}

impl<'a> Modulo<'a> {
    pub fn new(n: &'a BigUint) -> Self {
        Modulo { n }
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % self.n
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = a % self.n;
        let b = b % self.n;
        if a >= b {
            a - b
        } else {
            (a + self.n) - b
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % self.n
    }

    /// Computes `a^b mod n`.
    pub fn pow(&self, a: &BigUint, b: &BigUint) -> BigUint {
        a.modpow(b, self.n)
    }

    /// Computes `a^-1 mod n`. Fails if `a` is not invertible mod `n`.
    pub fn inv(&self, a: &BigUint) -> Result<BigUint> {
        mod_inverse(a, self.n)
    }
}

/// Computes `a^-1 mod n` via the extended Euclidean algorithm.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    let (g, x, _y) = extended_euclidean(&BigInt::from(a.clone()), &BigInt::from(n.clone()));
    if g != BigInt::one() {
        return Err(Error::invalid_parameter("value is not invertible mod n"));
    }

    let n_signed = BigInt::from(n.clone());
    let x = ((x % &n_signed) + &n_signed) % &n_signed;
    Ok(x.to_biguint().expect("reduced value is non-negative"))
}

/// Extended Euclidean algorithm: returns `(gcd, x, y)` such that
/// `a*x + b*y == gcd`.
///
/// Ported from `num_integer::Integer::extended_gcd`, which already
/// implements exactly this over `BigInt`; kept as a named free function
/// because the threshold-signature math (`combiner::combine`) calls it by
/// this name, matching `BN::ExtendedEuclidean` in
/// `examples/original_source/src/crypto-tss-rsa/tss_rsa.cpp`.
pub fn extended_euclidean(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let result = a.extended_gcd(b);
    (result.gcd, result.x, result.y)
}

/// Greatest common divisor of two non-negative integers.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Jacobi symbol `(a/n)` for odd `n > 0`. Returns `-1`, `0`, or `1`.
///
/// `num-bigint` has no Jacobi symbol of its own; this is the standard
/// algorithm (e.g. HAC §2.4.5), not a novel construction.
pub fn jacobi(a: &BigUint, n: &BigUint) -> i32 {
    assert!(n.is_odd(), "jacobi symbol requires an odd modulus");

    let mut a = a % n;
    let mut n = n.clone();
    let mut result = 1i32;

    while !a.is_zero() {
        while a.is_even() {
            a >>= 1usize;
            let r = (&n % BigUint::from(8u32)).to_u32_digit();
            if r == 3 || r == 5 {
                result = -result;
            }
        }

        core::mem::swap(&mut a, &mut n);

        if (&a % BigUint::from(4u32)).to_u32_digit() == 3 && (&n % BigUint::from(4u32)).to_u32_digit() == 3 {
            result = -result;
        }

        a %= &n;
    }

    if n.is_one() {
        result
    } else {
        0
    }
}

trait ToU32Digit {
    fn to_u32_digit(&self) -> u32;
}

impl ToU32Digit for BigUint {
    fn to_u32_digit(&self) -> u32 {
        self.to_u32_digits().first().copied().unwrap_or(0)
    }
}

/// Probabilistic primality test (Baillie-PSW + Miller-Rabin via `num-prime`).
pub fn is_probably_prime(n: &BigUint) -> bool {
    is_prime(n, None).probably()
}

/// Samples a safe prime `p = 2p' + 1` (with `p'` also prime) of exactly
/// `bits` bits, using `num_prime`'s rejection-sampling search driven by the
/// process RNG.
pub fn random_safe_prime(bits: usize) -> BigUint {
    let mut rng = OsRng;
    rng.gen_safe_prime_exact(bits)
}

/// Samples a uniformly random integer in `[0, upper)`.
pub fn random_below(upper: &BigUint) -> BigUint {
    assert!(!upper.is_zero(), "upper bound must be positive");

    let bits = upper.bits() as usize;
    let bytes = (bits + 7) / 8;
    let mut rng = OsRng;

    loop {
        let mut buf = vec![0u8; bytes];
        rng.fill_bytes(&mut buf);
        if bits % 8 != 0 {
            buf[0] &= (1u8 << (bits % 8)) - 1;
        }
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < upper {
            return candidate;
        }
    }
}

/// Samples a uniformly random integer in `[1, n)` that is coprime to `n`.
pub fn random_coprime_below(n: &BigUint) -> BigUint {
    loop {
        let candidate = random_below(n);
        if candidate.is_zero() {
            continue;
        }
        if gcd(&candidate, n).is_one() {
            return candidate;
        }
    }
}

/// `I2OSP`: left-pads `x`'s big-endian byte representation to `len` bytes.
///
/// Mirrors `examples/dennisss-dacha/pkg/crypto/src/rsa.rs`'s `i2osp`, built
/// on `common::LeftPad`; `num-bigint` already strips leading zero bytes in
/// `to_bytes_be`, so the padding has to be re-applied here.
pub fn i2osp(x: &BigUint, len: usize) -> Vec<u8> {
    let raw = x.to_bytes_be();
    assert!(raw.len() <= len, "integer too large for requested length");

    let mut out = vec![0u8; len - raw.len()];
    out.extend_from_slice(&raw);
    out
}

/// `OS2IP`: big-endian byte string to integer.
pub fn os2ip(data: &[u8]) -> BigUint {
    BigUint::from_bytes_be(data)
}

/// Sign-aware conversion used by the Lagrange step, where intermediate
/// coefficients can go negative (`spec.md` §4.2).
pub fn to_signed(x: &BigUint) -> BigInt {
    BigInt::from_biguint(Sign::Plus, x.clone())
}

/// `base^exponent mod n`, where `exponent` may be negative — the combiner's
/// Lagrange exponents (`spec.md` §4.5) and its Bezout coefficients `a, b`
/// both can be. A negative exponent is handled as `inv(base)^|exponent|`.
pub fn modpow_signed(base: &BigUint, exponent: &BigInt, n: &BigUint) -> Result<BigUint> {
    if exponent.is_negative() {
        let inv = mod_inverse(base, n)?;
        let abs_exp = (-exponent).to_biguint().expect("negation of a negative value is non-negative");
        Ok(inv.modpow(&abs_exp, n))
    } else {
        let exp = exponent.to_biguint().expect("non-negative BigInt converts to BigUint");
        Ok(base.modpow(&exp, n))
    }
}
