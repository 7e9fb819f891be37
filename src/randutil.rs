use num_bigint::BigUint;
use num_traits::One;
use rand::RngCore;

// Extra bytes drawn beyond the bound's width so the reduction bias is below 2^-128.
const WIDE_BYTES: usize = 16;

/// r ∈ [0, bound)
pub fn random_below(bound: &BigUint) -> BigUint {
    let mut rng = rand::rng();
    let mut buf = vec![0u8; (bound.bits() as usize).div_ceil(8) + WIDE_BYTES];
    rng.fill_bytes(&mut buf);
    BigUint::from_bytes_be(&buf) % bound
}

/// r ∈ [1, bound - 1]
pub fn random_nonzero_below(bound: &BigUint) -> BigUint {
    random_below(&(bound - BigUint::one())) + BigUint::one()
}
