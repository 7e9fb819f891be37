use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::error::{Result, ThresholdError};
use crate::modular;
use crate::randutil::{random_below, random_nonzero_below};

/// An integer modulo the group order q, always kept in [0, q).
///
/// Only a [`ScalarField`] can produce one, so a coordinate reduced mod p can
/// never be mistaken for a scalar reduced mod q.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scalar(BigUint);

impl Scalar {
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_bigint(&self) -> BigInt {
        BigInt::from_biguint(Sign::Plus, self.0.clone())
    }
}

/// Arithmetic modulo the (prime) group order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarField {
    order: BigUint,
}

impl ScalarField {
    pub fn new(order: BigUint) -> Result<Self> {
        if order < BigUint::from(2u32) {
            return Err(ThresholdError::InvalidParameters(format!(
                "group order must be at least 2, got {}",
                order
            )));
        }
        Ok(Self { order })
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    pub fn zero(&self) -> Scalar {
        Scalar(BigUint::zero())
    }

    pub fn one(&self) -> Scalar {
        Scalar(BigUint::one() % &self.order)
    }

    pub fn from_u64(&self, x: u64) -> Scalar {
        Scalar(BigUint::from(x) % &self.order)
    }

    pub fn from_biguint(&self, x: &BigUint) -> Scalar {
        Scalar(x % &self.order)
    }

    pub fn from_bigint(&self, x: &BigInt) -> Scalar {
        Scalar(modular::reduce(x, &self.order))
    }

    pub fn add(&self, a: &Scalar, b: &Scalar) -> Scalar {
        Scalar(modular::add(&a.0, &b.0, &self.order))
    }

    pub fn sub(&self, a: &Scalar, b: &Scalar) -> Scalar {
        Scalar(modular::sub(&a.0, &b.0, &self.order))
    }

    pub fn mul(&self, a: &Scalar, b: &Scalar) -> Scalar {
        Scalar(modular::mul(&a.0, &b.0, &self.order))
    }

    pub fn neg(&self, a: &Scalar) -> Scalar {
        Scalar(modular::neg(&a.0, &self.order))
    }

    pub fn pow(&self, base: &Scalar, exp: u64) -> Scalar {
        Scalar(modular::pow(&base.0, &BigUint::from(exp), &self.order))
    }

    pub fn inverse(&self, a: &Scalar) -> Result<Scalar> {
        modular::inverse(&a.0, &self.order).map(Scalar)
    }

    pub fn sum<'a, I>(&self, values: I) -> Scalar
    where
        I: IntoIterator<Item = &'a Scalar>,
    {
        values
            .into_iter()
            .fold(self.zero(), |acc, v| self.add(&acc, v))
    }

    /// Uniform in [0, q).
    pub fn random(&self) -> Scalar {
        Scalar(random_below(&self.order))
    }

    /// Uniform in [1, q-1].
    pub fn random_nonzero(&self) -> Scalar {
        Scalar(random_nonzero_below(&self.order))
    }
}
