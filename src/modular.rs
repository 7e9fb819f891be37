use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::error::{Result, ThresholdError};

/// Reduce a signed integer into [0, m).
pub fn reduce(a: &BigInt, m: &BigUint) -> BigUint {
    let m_i = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut r = a % &m_i;
    if r.sign() == Sign::Minus {
        r += &m_i;
    }
    r.magnitude().clone()
}

pub fn add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

pub fn sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    ((a % m) + m - (b % m)) % m
}

pub fn mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

pub fn neg(a: &BigUint, m: &BigUint) -> BigUint {
    (m - (a % m)) % m
}

pub fn pow(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    base.modpow(exp, m)
}

// Returns (g, x) with a*x ≡ g (mod b).
fn egcd(a: BigInt, b: BigInt) -> (BigInt, BigInt) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }
    (old_r, old_s)
}

/// Multiplicative inverse of `a` modulo `m`.
pub fn inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    let a = a % m;
    if a.is_zero() {
        return Err(ThresholdError::NotInvertible);
    }
    let (g, x) = egcd(
        BigInt::from_biguint(Sign::Plus, a),
        BigInt::from_biguint(Sign::Plus, m.clone()),
    );
    if !g.is_one() {
        return Err(ThresholdError::NotInvertible);
    }
    Ok(reduce(&x, m))
}
