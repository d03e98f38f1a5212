//! The Δ = l! Lagrange-coefficient trick (`spec.md` §4.2).
//!
//! Direct port of `examples/original_source/src/crypto-tss-rsa/common.h`'s
//! `lambda()` free function. The combiner never learns `m = φ(n)/4` (only
//! the dealer does), so Lagrange interpolation at `x = 0` has to avoid
//! dividing mod `m`; multiplying by `Δ = l!` first guarantees the division
//! below is always exact over the integers, for whichever `k`-subset `S` is
//! chosen — that's Shoup's trick.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Computes `λ_{i,j}^S · Δ`, exactly, over the integers.
///
/// `S` is the set of participating indices; `delta` is `l!`. The division
/// at the end is exact by construction (see module docs) and panics if it
/// ever isn't — that would indicate a bug in the caller, not a recoverable
/// runtime condition.
pub fn lambda(i: &BigInt, j: &BigInt, s: &[BigInt], delta: &BigInt) -> BigInt {
    let mut num = BigInt::one();
    let mut den = BigInt::one();

    for t in s {
        if t != j {
            num *= i - t;
            den *= j - t;
        }
    }

    let scaled = delta * &num;
    let (q, r) = Integer::div_rem(&scaled, &den);
    assert!(r.is_zero(), "delta did not divide the Lagrange denominator exactly");
    q
}

/// Computes `Δ = l!` for `l` participants.
pub fn delta(l: u32) -> BigInt {
    let mut d = BigInt::one();
    for i in 1..=l {
        d *= BigInt::from(i);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_factorial() {
        assert_eq!(delta(5), BigInt::from(120));
    }

    #[test]
    fn lambda_zero_one_is_delta_scaled_identity() {
        // With S = {1}, lambda(0, 1, {1}, delta) == delta (single-point "interpolation").
        let s = vec![BigInt::from(1)];
        let d = delta(3);
        let result = lambda(&BigInt::from(0), &BigInt::from(1), &s, &d);
        assert_eq!(result, d);
    }
}
