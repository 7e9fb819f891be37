use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};

use crate::scalar::{Scalar, ScalarField};

/// Minimal big-endian encoding; zero encodes as the empty string.
fn enc_int(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// SHA-256 of the integer's bytes, reduced mod q.
pub fn hash_to_scalar(field: &ScalarField, value: &BigUint) -> Scalar {
    let digest = Sha256::digest(enc_int(value));
    field.from_biguint(&BigUint::from_bytes_be(&digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_matches_sha256_of_bytes() {
        let field = ScalarField::new(BigUint::from(1_000_003u32)).unwrap();
        let value = BigUint::from(0x0102_0304u32);
        let expected = BigUint::from_bytes_be(&Sha256::digest([1u8, 2, 3, 4])) % 1_000_003u32;
        assert_eq!(hash_to_scalar(&field, &value).value(), &expected);
    }

    #[test]
    fn test_hash_of_zero_is_empty_digest() {
        let field = ScalarField::new(BigUint::from(1_000_003u32)).unwrap();
        let expected = BigUint::from_bytes_be(&Sha256::digest(b"")) % 1_000_003u32;
        assert_eq!(hash_to_scalar(&field, &BigUint::zero()).value(), &expected);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let field = ScalarField::new(BigUint::from(1_000_003u32)).unwrap();
        let a = hash_to_scalar(&field, &BigUint::from(5234583490578210874u64));
        let b = hash_to_scalar(&field, &BigUint::from(5234583490578210874u64));
        assert_eq!(a, b);
    }
}
