use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};

use crate::error::{Result, ThresholdError};
use crate::modular;
use crate::scalar::Scalar;

/// Short Weierstrass curve y^2 = x^3 + ax + b over F_p.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    p: BigUint,
    a: BigUint,
    b: BigUint,
}

impl CurveParams {
    /// Coefficients may be negative; they are reduced into [0, p).
    pub fn new(p: BigUint, a: &BigInt, b: &BigInt) -> Result<Arc<Self>> {
        if p < BigUint::from(3u32) {
            return Err(ThresholdError::InvalidParameters(format!(
                "field prime must be at least 3, got {}",
                p
            )));
        }
        let a = modular::reduce(a, &p);
        let b = modular::reduce(b, &p);
        Ok(Arc::new(Self { p, a, b }))
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        let p = &self.p;
        let lhs = modular::mul(y, y, p);
        let x3 = modular::pow(x, &BigUint::from(3u32), p);
        let rhs = modular::add(&modular::add(&x3, &modular::mul(&self.a, x, p), p), &self.b, p);
        lhs == rhs
    }

    /// Construct a finite point, checking the curve equation.
    pub fn point(self: &Arc<Self>, x: &BigUint, y: &BigUint) -> Result<Point> {
        let x = x % &self.p;
        let y = y % &self.p;
        if !self.contains(&x, &y) {
            return Err(ThresholdError::NotOnCurve);
        }
        Ok(Point::Affine(AffinePoint {
            x,
            y,
            curve: Arc::clone(self),
        }))
    }
}

/// A finite point. Only `CurveParams::point` and the group operations build one,
/// so the coordinates are always reduced and on the curve.
#[derive(Clone, Debug)]
pub struct AffinePoint {
    x: BigUint,
    y: BigUint,
    curve: Arc<CurveParams>,
}

impl AffinePoint {
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    pub fn curve(&self) -> &Arc<CurveParams> {
        &self.curve
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && same_curve(&self.curve, &other.curve)
    }
}

impl Eq for AffinePoint {}

/// A point of the curve group. `Infinity` is the identity and belongs to every curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine(AffinePoint),
}

fn same_curve(c1: &Arc<CurveParams>, c2: &Arc<CurveParams>) -> bool {
    Arc::ptr_eq(c1, c2) || c1 == c2
}

impl Point {
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Affine coordinates, `None` for the point at infinity.
    pub fn coordinates(&self) -> Option<(&BigUint, &BigUint)> {
        match self {
            Point::Infinity => None,
            Point::Affine(pt) => Some((&pt.x, &pt.y)),
        }
    }

    pub fn add(&self, other: &Point) -> Result<Point> {
        let (x1, y1, curve, x2, y2) = match (self, other) {
            (Point::Infinity, _) => return Ok(other.clone()),
            (_, Point::Infinity) => return Ok(self.clone()),
            (Point::Affine(a), Point::Affine(b)) => {
                if !same_curve(&a.curve, &b.curve) {
                    return Err(ThresholdError::CurveMismatch);
                }
                (&a.x, &a.y, &a.curve, &b.x, &b.y)
            }
        };
        let p = curve.p();

        // vertical line: P + (-P), or doubling a point of order two
        if x1 == x2 && (y1 != y2 || y1.is_zero()) {
            return Ok(Point::Infinity);
        }

        let m = if x1 == x2 {
            // tangent: (3x^2 + a) / 2y
            let num = modular::add(
                &modular::mul(&BigUint::from(3u32), &modular::mul(x1, x1, p), p),
                curve.a(),
                p,
            );
            let den = modular::inverse(&modular::mul(&BigUint::from(2u32), y1, p), p)?;
            modular::mul(&num, &den, p)
        } else {
            // chord: (y2 - y1) / (x2 - x1)
            let den = modular::inverse(&modular::sub(x2, x1, p), p)?;
            modular::mul(&modular::sub(y2, y1, p), &den, p)
        };

        let x3 = modular::sub(&modular::mul(&m, &m, p), &modular::add(x1, x2, p), p);
        let y3 = modular::sub(&modular::mul(&m, &modular::sub(x1, &x3, p), p), y1, p);
        curve.point(&x3, &y3)
    }

    pub fn double(&self) -> Result<Point> {
        self.add(self)
    }

    pub fn negate(&self) -> Point {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine(pt) => Point::Affine(AffinePoint {
                x: pt.x.clone(),
                y: modular::neg(&pt.y, pt.curve.p()),
                curve: Arc::clone(&pt.curve),
            }),
        }
    }

    pub fn sub(&self, other: &Point) -> Result<Point> {
        self.add(&other.negate())
    }

    /// Double-and-add over |k|, negating the base first when k < 0.
    /// k is used as given: no reduction by the group order.
    pub fn mul(&self, k: &BigInt) -> Result<Point> {
        if k.is_negative() {
            self.negate().mul_unsigned(k.magnitude())
        } else {
            self.mul_unsigned(k.magnitude())
        }
    }

    pub fn mul_scalar(&self, k: &Scalar) -> Result<Point> {
        self.mul_unsigned(k.value())
    }

    fn mul_unsigned(&self, k: &BigUint) -> Result<Point> {
        let mut acc = Point::Infinity;
        for i in (0..k.bits()).rev() {
            acc = acc.double()?;
            if k.bit(i) {
                acc = acc.add(self)?;
            }
        }
        Ok(acc)
    }
}

/// Left fold of `add` starting at infinity.
pub fn point_sum<'a, I>(points: I) -> Result<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    points
        .into_iter()
        .try_fold(Point::Infinity, |acc, pt| acc.add(pt))
}
