use std::collections::HashSet;

use crate::curve::{point_sum, Point};
use crate::error::{Result, ThresholdError};
use crate::params::SystemParams;
use crate::scalar::{Scalar, ScalarField};

/// Degree-(t-1) polynomial represented by coefficients [c0, c1, ..., c_{t-1}]
#[derive(Clone, Debug)]
pub struct Poly {
    pub coeffs: Vec<Scalar>,
}

impl Poly {
    /// Sample t coefficients uniformly from [1, q-1]; coefficient i is the degree-i term.
    pub fn sample(field: &ScalarField, t: usize) -> Self {
        Poly {
            coeffs: (0..t).map(|_| field.random_nonzero()).collect(),
        }
    }

    /// Horner evaluation mod q.
    pub fn eval(&self, field: &ScalarField, x: &Scalar) -> Scalar {
        self.coeffs
            .iter()
            .rev()
            .fold(field.zero(), |acc, c| field.add(&field.mul(&acc, x), c))
    }

    /// Eta[i] = G * coeffs[i]. Eta[0] commits to the constant term.
    pub fn commit(&self, g: &Point) -> Result<Vec<Point>> {
        self.coeffs.iter().map(|c| g.mul_scalar(c)).collect()
    }
}

/// Check G * share == Σ Eta[i] * id^i. Any arithmetic failure counts as a mismatch.
pub fn verify_share(params: &SystemParams, share: &Scalar, id: &Scalar, eta: &[Point]) -> bool {
    let field = params.field();
    let rhs: Result<Vec<Point>> = eta
        .iter()
        .enumerate()
        .map(|(i, e)| e.mul_scalar(&field.pow(id, i as u64)))
        .collect();
    let rhs = match rhs.and_then(|terms| point_sum(&terms)) {
        Ok(p) => p,
        Err(_) => return false,
    };
    match params.generator().mul_scalar(share) {
        Ok(lhs) => lhs == rhs,
        Err(_) => false,
    }
}

/// Lagrange coefficient at zero: χ_i = Π_{j≠i} (-id_j) / (id_i - id_j) (mod q)
pub fn lagrange_coeff(field: &ScalarField, id: &Scalar, ids: &[Scalar]) -> Result<Scalar> {
    let distinct: HashSet<&Scalar> = ids.iter().collect();
    if distinct.len() != ids.len() {
        return Err(ThresholdError::InvalidParameters(
            "duplicate party id in interpolation set".to_string(),
        ));
    }

    let mut num = field.one();
    let mut den = field.one();
    for other in ids.iter().filter(|other| *other != id) {
        num = field.mul(&num, &field.neg(other));
        den = field.mul(&den, &field.sub(id, other));
    }
    Ok(field.mul(&num, &field.inverse(&den)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn small_field() -> ScalarField {
        ScalarField::new(BigUint::from(7919u32)).unwrap()
    }

    fn ids(field: &ScalarField, raw: &[u64]) -> Vec<Scalar> {
        raw.iter().map(|i| field.from_u64(*i)).collect()
    }

    #[test]
    fn test_eval_horner() {
        let f = small_field();
        // 3 + 2x + 5x^2
        let poly = Poly {
            coeffs: ids(&f, &[3, 2, 5]),
        };
        assert_eq!(poly.eval(&f, &f.zero()), f.from_u64(3));
        assert_eq!(poly.eval(&f, &f.from_u64(2)), f.from_u64(3 + 4 + 20));
        assert_eq!(poly.eval(&f, &f.from_u64(100)), f.from_u64((3 + 200 + 50_000) % 7919));
    }

    #[test]
    fn test_sample_nonzero_coefficients() {
        let f = small_field();
        let poly = Poly::sample(&f, 5);
        assert_eq!(poly.coeffs.len(), 5);
        assert!(poly.coeffs.iter().all(|c| !c.is_zero()));
    }

    #[test]
    fn test_interpolation_recovers_constant_term() {
        let f = small_field();
        let poly = Poly::sample(&f, 3);
        let secret = poly.eval(&f, &f.zero());

        for subset in [&[1u64, 2, 3][..], &[2, 5, 7], &[1, 2, 3, 4], &[3, 4, 5, 6, 7]] {
            let set = ids(&f, subset);
            let mut acc = f.zero();
            for id in &set {
                let chi = lagrange_coeff(&f, id, &set).unwrap();
                acc = f.add(&acc, &f.mul(&poly.eval(&f, id), &chi));
            }
            assert_eq!(acc, secret, "subset {:?}", subset);
        }
    }

    #[test]
    fn test_interpolation_below_threshold_is_wrong() {
        let f = small_field();
        let poly = Poly {
            coeffs: ids(&f, &[11, 4, 9]),
        };
        let set = ids(&f, &[1, 2]);
        let mut acc = f.zero();
        for id in &set {
            let chi = lagrange_coeff(&f, id, &set).unwrap();
            acc = f.add(&acc, &f.mul(&poly.eval(&f, id), &chi));
        }
        assert_ne!(acc, f.from_u64(11));
    }

    #[test]
    fn test_lagrange_duplicate_ids() {
        let f = small_field();
        let set = ids(&f, &[1, 2, 2]);
        assert!(matches!(
            lagrange_coeff(&f, &f.from_u64(1), &set),
            Err(ThresholdError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_verify_share() {
        let params = SystemParams::secp256k1(3).unwrap();
        let f = params.field();
        let poly = Poly::sample(f, 3);
        let eta = poly.commit(params.generator()).unwrap();
        assert_eq!(eta.len(), 3);
        assert_eq!(eta[0], params.generator().mul_scalar(&poly.coeffs[0]).unwrap());

        let id = f.from_u64(4);
        let share = poly.eval(f, &id);
        assert!(verify_share(&params, &share, &id, &eta));

        let tampered = f.add(&share, &f.one());
        assert!(!verify_share(&params, &tampered, &id, &eta));
        assert!(!verify_share(&params, &share, &f.from_u64(5), &eta));
    }
}
