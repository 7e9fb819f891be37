use std::sync::Arc;

use num_bigint::{BigInt, BigUint, Sign};

use crate::curve::{CurveParams, Point};
use crate::error::{Result, ThresholdError};
use crate::scalar::ScalarField;

pub const SECP256K1_P: &str = "0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";
pub const SECP256K1_N: &str = "0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";
pub const SECP256K1_GX: &str = "0x79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798";
pub const SECP256K1_GY: &str = "0x483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8";

/// Parse a hex (`0x` prefix) or decimal literal, optionally negative.
pub fn parse_int(literal: &str) -> Result<BigInt> {
    let s = literal.trim();
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, s),
    };
    let (radix, digits) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, s),
    };
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| {
        ThresholdError::InvalidParameters(format!("not an integer literal: {:?}", literal))
    })?;
    Ok(BigInt::from_biguint(sign, magnitude))
}

fn parse_uint(literal: &str) -> Result<BigUint> {
    parse_int(literal)?.to_biguint().ok_or_else(|| {
        ThresholdError::InvalidParameters(format!("expected a non-negative literal: {:?}", literal))
    })
}

/// Generator, group order and threshold shared read-only by every party of one instance.
#[derive(Clone, Debug)]
pub struct SystemParams {
    curve: Arc<CurveParams>,
    generator: Point,
    field: ScalarField,
    threshold: usize,
}

impl SystemParams {
    pub fn new(
        curve: Arc<CurveParams>,
        gx: &BigUint,
        gy: &BigUint,
        order: BigUint,
        threshold: usize,
    ) -> Result<Self> {
        let generator = curve.point(gx, gy).map_err(|_| {
            ThresholdError::InvalidParameters("generator is not on the curve".to_string())
        })?;
        if threshold == 0 {
            return Err(ThresholdError::InvalidParameters(
                "threshold must be at least 1".to_string(),
            ));
        }
        let field = ScalarField::new(order)?;
        Ok(Self {
            curve,
            generator,
            field,
            threshold,
        })
    }

    /// Build parameters from literal big-integer strings.
    pub fn from_literals(
        p: &str,
        a: &str,
        b: &str,
        gx: &str,
        gy: &str,
        order: &str,
        threshold: usize,
    ) -> Result<Self> {
        let curve = CurveParams::new(parse_uint(p)?, &parse_int(a)?, &parse_int(b)?)?;
        Self::new(curve, &parse_uint(gx)?, &parse_uint(gy)?, parse_uint(order)?, threshold)
    }

    pub fn secp256k1(threshold: usize) -> Result<Self> {
        Self::from_literals(
            SECP256K1_P,
            "0",
            "7",
            SECP256K1_GX,
            SECP256K1_GY,
            SECP256K1_N,
            threshold,
        )
    }

    pub fn curve(&self) -> &Arc<CurveParams> {
        &self.curve
    }

    pub fn generator(&self) -> &Point {
        &self.generator
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    pub fn order(&self) -> &BigUint {
        self.field.order()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Rejects a party count the threshold cannot be met by.
    pub fn check_party_count(&self, n: usize) -> Result<()> {
        if self.threshold > n {
            return Err(ThresholdError::InvalidParameters(format!(
                "threshold ({}) exceeds party count ({})",
                self.threshold, n
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("0x1F").unwrap(), BigInt::from(31));
        assert_eq!(parse_int("0Xff").unwrap(), BigInt::from(255));
        assert_eq!(parse_int(" 124353464568757742342366456234 ").unwrap().to_string(), "124353464568757742342366456234");
        assert_eq!(parse_int("-3").unwrap(), BigInt::from(-3));
        assert!(parse_int("0xZZ").is_err());
        assert!(parse_int("").is_err());
    }

    #[test]
    fn test_secp256k1_preset() {
        let params = SystemParams::secp256k1(3).unwrap();
        assert_eq!(params.threshold(), 3);
        assert_eq!(params.order(), &parse_uint(SECP256K1_N).unwrap());
        assert!(!params.generator().is_infinity());
        assert!(params.check_party_count(7).is_ok());
        assert!(matches!(
            params.check_party_count(2),
            Err(ThresholdError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_generator_off_curve_rejected() {
        let res = SystemParams::from_literals(SECP256K1_P, "0", "7", SECP256K1_GX, "0x1", SECP256K1_N, 3);
        assert!(matches!(res, Err(ThresholdError::InvalidParameters(_))));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        assert!(matches!(
            SystemParams::secp256k1(0),
            Err(ThresholdError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_negative_coefficient() {
        // y^2 = x^3 - x + 0 over F_97, generator (0, 0)
        let params = SystemParams::from_literals("97", "-1", "0", "0", "0", "2", 1).unwrap();
        assert_eq!(params.curve().a(), &BigUint::from(96u32));
    }
}
