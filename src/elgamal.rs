use crate::curve::{point_sum, Point};
use crate::error::{Result, ThresholdError};
use crate::params::SystemParams;
use crate::scalar::Scalar;
use crate::shamir::{lagrange_coeff, Poly};

#[derive(Clone, Debug)]
pub struct KeyShare {
    pub id: Scalar,
    pub secret: Scalar,
    pub public: Point,
}

#[derive(Clone, Debug)]
pub struct DealtKeys {
    pub shares: Vec<KeyShare>,
    /// Σ Pk_i * χ_i over all ids, i.e. G * f(0)
    pub public_key: Point,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: Point,
    pub c2: Point,
}

/// Dealer key generation:
/// - sample one degree-(t-1) polynomial f
/// - share_i = f(id_i), Pk_i = G * share_i
/// - aggregate key = Σ Pk_i * χ(id_i, ids), assembled in the exponent
pub fn generate_keys(ids: &[Scalar], params: &SystemParams) -> Result<DealtKeys> {
    params.check_party_count(ids.len())?;
    // f(0) is the dealer secret itself
    if ids.iter().any(Scalar::is_zero) {
        return Err(ThresholdError::InvalidParameters(
            "party id must be nonzero".to_string(),
        ));
    }
    let field = params.field();
    let poly = Poly::sample(field, params.threshold());

    let shares = ids
        .iter()
        .map(|id| {
            let secret = poly.eval(field, id);
            let public = params.generator().mul_scalar(&secret)?;
            Ok(KeyShare {
                id: id.clone(),
                secret,
                public,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let weighted = shares
        .iter()
        .map(|s| s.public.mul_scalar(&lagrange_coeff(field, &s.id, ids)?))
        .collect::<Result<Vec<_>>>()?;
    let public_key = point_sum(&weighted)?;

    Ok(DealtKeys { shares, public_key })
}

/// c1 = G * alpha, c2 = Pk * alpha + P
pub fn encrypt(params: &SystemParams, plaintext: &Point, public_key: &Point) -> Result<Ciphertext> {
    let alpha = params.field().random();
    let c1 = params.generator().mul_scalar(&alpha)?;
    let c2 = public_key
        .mul_scalar(&alpha)
        .and_then(|mask| mask.add(plaintext))
        .map_err(|_| ThresholdError::PlaintextNotOnCurve)?;
    Ok(Ciphertext { c1, c2 })
}

pub fn partial_decrypt(ciphertext: &Ciphertext, secret: &Scalar) -> Result<Point> {
    ciphertext.c1.mul_scalar(secret)
}

/// P = c2 - Σ D_i * χ(id_i, participants), where `shares[i]` came from `participant_ids[i]`.
pub fn decrypt(
    params: &SystemParams,
    shares: &[Point],
    ciphertext: &Ciphertext,
    participant_ids: &[Scalar],
) -> Result<Point> {
    if shares.is_empty() || shares.len() != participant_ids.len() {
        return Err(ThresholdError::InvalidShares);
    }
    let field = params.field();

    let weighted = shares
        .iter()
        .zip(participant_ids)
        .map(|(share, id)| {
            let chi = lagrange_coeff(field, id, participant_ids)?;
            share.mul_scalar(&chi).map_err(|_| ThresholdError::InvalidShares)
        })
        .collect::<Result<Vec<_>>>()?;
    let c1_prime = point_sum(&weighted).map_err(|_| ThresholdError::InvalidShares)?;

    ciphertext
        .c2
        .add(&c1_prime.negate())
        .map_err(|_| ThresholdError::InvalidCiphertext)
}
