use std::collections::HashSet;

use num_bigint::BigUint;

use crate::curve::{point_sum, Point};
use crate::error::{Result, ThresholdError};
use crate::hash::hash_to_scalar;
use crate::params::SystemParams;
use crate::scalar::Scalar;
use crate::shamir::{lagrange_coeff, verify_share, Poly};

/// Secret share f_j(id_i) sent from party j to party i, together with j's commitments.
#[derive(Clone, Debug)]
pub struct ShareMessage {
    pub sender: Scalar,
    pub share: Scalar,
    pub commitments: Vec<Point>,
}

/// Partial or combined signature (R, l, beta).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r_point: Point,
    pub l: Scalar,
    pub beta: Scalar,
}

/// Ciphertext bound to a tag; opens only with a combined signature over that tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: Point,
    pub c2: Scalar,
    pub c3: Point,
    pub c4: Point,
}

/// One key holder. Owns its polynomial and secret key exclusively.
///
/// Lifecycle: `new` (polynomial + commitments) → `share_message` to every peer →
/// `set_personal_keys` with the n shares received → `set_system_key` → signing.
#[derive(Clone, Debug)]
pub struct Party {
    id: Scalar,
    poly: Poly,
    eta: Vec<Point>,
    sk: Option<Scalar>,
    pk: Option<Point>,
    q: Option<Point>,
    params: SystemParams,
}

impl Party {
    pub fn new(params: &SystemParams, id: Scalar) -> Result<Self> {
        if id.is_zero() {
            return Err(ThresholdError::InvalidParameters(
                "party id must be nonzero".to_string(),
            ));
        }
        let poly = Poly::sample(params.field(), params.threshold());
        let eta = poly.commit(params.generator())?;
        Ok(Party {
            id,
            poly,
            eta,
            sk: None,
            pk: None,
            q: None,
            params: params.clone(),
        })
    }

    pub fn id(&self) -> &Scalar {
        &self.id
    }

    /// Eta[i] = G * a_i
    pub fn commitments(&self) -> &[Point] {
        &self.eta
    }

    /// Eta[0], this party's contribution to the system public key.
    pub fn public_commitment(&self) -> &Point {
        &self.eta[0]
    }

    pub fn personal_public_key(&self) -> Option<&Point> {
        self.pk.as_ref()
    }

    pub fn system_public_key(&self) -> Option<&Point> {
        self.q.as_ref()
    }

    /// f(peer): the share this party sends to `peer`.
    pub fn secret_share(&self, peer: &Scalar) -> Scalar {
        self.poly.eval(self.params.field(), peer)
    }

    pub fn share_message(&self, peer: &Scalar) -> ShareMessage {
        ShareMessage {
            sender: self.id.clone(),
            share: self.secret_share(peer),
            commitments: self.eta.clone(),
        }
    }

    pub fn verify_share(&self, msg: &ShareMessage) -> bool {
        verify_share(&self.params, &msg.share, &self.id, &msg.commitments)
    }

    /// sk = Σ shares from every party (this one included), Pk = G * sk.
    /// Every share is checked against its sender's commitments first; a single
    /// failure, an empty set or a repeated sender aborts and leaves the keys unset.
    pub fn set_personal_keys(&mut self, shares: &[ShareMessage]) -> Result<()> {
        if shares.is_empty() {
            return Err(ThresholdError::ShareVerificationFailed(format!(
                "no shares for party {}",
                self.id.value()
            )));
        }
        let mut senders = HashSet::with_capacity(shares.len());
        if let Some(dup) = shares.iter().find(|msg| !senders.insert(msg.sender.clone())) {
            return Err(ThresholdError::ShareVerificationFailed(format!(
                "party {} sent more than one share to party {}",
                dup.sender.value(),
                self.id.value()
            )));
        }
        if let Some(bad) = shares.iter().find(|msg| !self.verify_share(msg)) {
            return Err(ThresholdError::ShareVerificationFailed(format!(
                "share from party {} to party {}",
                bad.sender.value(),
                self.id.value()
            )));
        }

        let field = self.params.field();
        let sk = field.sum(shares.iter().map(|msg| &msg.share));
        let pk = self.params.generator().mul_scalar(&sk)?;
        self.sk = Some(sk);
        self.pk = Some(pk);
        Ok(())
    }

    /// Q = Σ Eta_j[0] over all parties.
    pub fn set_system_key(&mut self, eta0: &[Point]) -> Result<()> {
        self.q = Some(point_sum(eta0)?);
        Ok(())
    }

    /// Schnorr-style partial signature with multiplicative blinding:
    /// - k, beta ← [1, q-1], R = G*k, r = R.x mod q (1 if zero)
    /// - e = H(m), alpha = (k - beta*m) / r
    /// - l = alpha*r + e*χ_i*sk_i
    pub fn partial_signature(&self, message: &BigUint, signer_ids: &[Scalar]) -> Result<Signature> {
        let sk = self
            .sk
            .as_ref()
            .ok_or(ThresholdError::MissingKeyMaterial("personal secret key"))?;
        if !signer_ids.contains(&self.id) {
            return Err(ThresholdError::InvalidParameters(format!(
                "party {} is not in the signer set",
                self.id.value()
            )));
        }
        let field = self.params.field();

        let k = field.random_nonzero();
        let e = hash_to_scalar(field, message);
        let r_point = self.params.generator().mul_scalar(&k)?;

        let r = match r_point.coordinates() {
            Some((x, _)) => field.from_biguint(x),
            None => field.zero(),
        };
        let r = if r.is_zero() { field.one() } else { r };

        let beta = field.random_nonzero();
        let m = field.from_biguint(message);
        let alpha = field.mul(
            &field.sub(&k, &field.mul(&beta, &m)),
            &field.inverse(&r)?,
        );

        let chi = lagrange_coeff(field, &self.id, signer_ids)?;
        let l = field.add(
            &field.mul(&alpha, &r),
            &field.mul(&field.mul(&e, &chi), sk),
        );

        Ok(Signature { r_point, l, beta })
    }

    /// Check one signer's partial signature: G*(l + beta*m) - Pk*(e*χ) == R.
    pub fn verify_partial_signature(
        &self,
        message: &BigUint,
        sig: &Signature,
        pk: &Point,
        id: &Scalar,
        signer_ids: &[Scalar],
    ) -> bool {
        let field = self.params.field();
        let e = hash_to_scalar(field, message);
        let chi = match lagrange_coeff(field, id, signer_ids) {
            Ok(chi) => chi,
            Err(_) => return false,
        };
        check_signature_equation(&self.params, pk, &field.mul(&e, &chi), message, sig)
    }

    /// Verify a combined signature against this party's view of Q.
    pub fn verify_signature(&self, message: &BigUint, sig: &Signature) -> bool {
        match &self.q {
            Some(q) => verify_signature(&self.params, q, message, sig),
            None => false,
        }
    }
}

// G*(l + beta*m) - key*weight == R
fn check_signature_equation(
    params: &SystemParams,
    key: &Point,
    weight: &Scalar,
    message: &BigUint,
    sig: &Signature,
) -> bool {
    let field = params.field();
    let m = field.from_biguint(message);
    let gamma = field.add(&sig.l, &field.mul(&sig.beta, &m));

    let lhs = params
        .generator()
        .mul_scalar(&gamma)
        .and_then(|g| key.mul_scalar(weight).and_then(|k| g.sub(&k)));
    match lhs {
        Ok(point) => point == sig.r_point,
        Err(_) => false,
    }
}

/// Combine partial signatures from exactly the quorum named in each `signer_ids`:
/// R = Σ R_i, l = Σ l_i, beta = Σ beta_i (mod q).
pub fn combine_signatures(params: &SystemParams, partials: &[Signature]) -> Result<Signature> {
    if partials.is_empty() {
        return Err(ThresholdError::InvalidPartialSignatures);
    }
    let field = params.field();
    let r_point = point_sum(partials.iter().map(|s| &s.r_point))
        .map_err(|_| ThresholdError::InvalidPartialSignatures)?;
    let l = field.sum(partials.iter().map(|s| &s.l));
    let beta = field.sum(partials.iter().map(|s| &s.beta));
    Ok(Signature { r_point, l, beta })
}

/// Verify: G*(l + beta*m) - Q*e == R, with e = H(m).
pub fn verify_signature(params: &SystemParams, q: &Point, message: &BigUint, sig: &Signature) -> bool {
    let e = hash_to_scalar(params.field(), message);
    check_signature_equation(params, q, &e, message, sig)
}

/// Encrypt a curve point so that only a combined signature over `tag` opens it:
/// - alpha ← [0, q), e = H(tag)
/// - c1 = Q*(alpha*e) + P, c2 = -alpha, c3 = G*alpha, c4 = c3*tag
pub fn encrypt(params: &SystemParams, plaintext: &Point, tag: &BigUint, q: &Point) -> Result<Ciphertext> {
    let field = params.field();
    let alpha = field.random();
    let e = hash_to_scalar(field, tag);

    let c1 = q
        .mul_scalar(&field.mul(&alpha, &e))
        .and_then(|mask| mask.add(plaintext))
        .map_err(|_| ThresholdError::PlaintextNotOnCurve)?;
    let c2 = field.neg(&alpha);
    let c3 = params.generator().mul_scalar(&alpha)?;
    // c4 carries the same tag scalar the signer blinds with (beta*m), not e = H(tag).
    // With c3*e the beta terms only cancel when H(tag) == tag mod q, so decryption
    // under a valid signature would fail.
    let c4 = c3.mul_scalar(&field.from_biguint(tag))?;

    Ok(Ciphertext { c1, c2, c3, c4 })
}

/// P = c1 - (R*c2 + c3*l + c4*beta)
pub fn decrypt(ciphertext: &Ciphertext, signature: &Signature) -> Result<Point> {
    let terms = [
        signature.r_point.mul_scalar(&ciphertext.c2),
        ciphertext.c3.mul_scalar(&signature.l),
        ciphertext.c4.mul_scalar(&signature.beta),
    ]
    .into_iter()
    .collect::<Result<Vec<Point>>>()
    .map_err(|_| ThresholdError::InvalidCiphertext)?;

    let dot = point_sum(&terms).map_err(|_| ThresholdError::InvalidCiphertext)?;
    ciphertext
        .c1
        .add(&dot.negate())
        .map_err(|_| ThresholdError::InvalidCiphertext)
}
