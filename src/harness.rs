//! Common Setup / Encrypt / Decrypt lifecycle so both protocols can be
//! benchmarked interchangeably.

use std::time::{Duration, Instant};

use num_bigint::{BigInt, BigUint, Sign};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::bc_ectss::{self, Party, ShareMessage, Signature};
use crate::curve::Point;
use crate::elgamal::{self, DealtKeys};
use crate::error::{Result, ThresholdError};
use crate::params::SystemParams;
use crate::scalar::Scalar;

pub trait ThresholdCryptosystem {
    type Ciphertext;

    fn name(&self) -> &'static str;

    fn params(&self) -> &SystemParams;

    /// Produce per-party key material and the aggregate public key.
    fn setup(&mut self) -> Result<()>;

    fn encrypt(&self, message: &BigUint) -> Result<Self::Ciphertext>;

    /// Recover the plaintext point with the configured decrypter quorum.
    fn decrypt(&self, ciphertext: &Self::Ciphertext) -> Result<Point>;
}

/// Map an integer onto the curve as G * message (not reduced by the order).
pub fn encode_message(params: &SystemParams, message: &BigUint) -> Result<Point> {
    params
        .generator()
        .mul(&BigInt::from_biguint(Sign::Plus, message.clone()))
}

fn check_quorum(params: &SystemParams, ids: &[Scalar], decrypter_ids: &[Scalar]) -> Result<()> {
    params.check_party_count(ids.len())?;
    if let Some(unknown) = decrypter_ids.iter().find(|d| !ids.contains(d)) {
        return Err(ThresholdError::InvalidParameters(format!(
            "decrypter {} is not a registered party",
            unknown.value()
        )));
    }
    if decrypter_ids.len() < params.threshold() {
        warn!(
            quorum = decrypter_ids.len(),
            threshold = params.threshold(),
            "decrypter quorum is below the threshold; decryption will not recover the plaintext"
        );
    }
    Ok(())
}

/// BC-ECTSS: decryption is a quorum signature over the tag.
pub struct BcEctssSystem {
    params: SystemParams,
    ids: Vec<Scalar>,
    decrypter_ids: Vec<Scalar>,
    tag: BigUint,
    parties: Vec<Party>,
}

impl BcEctssSystem {
    pub fn new(
        params: SystemParams,
        ids: Vec<Scalar>,
        decrypter_ids: Vec<Scalar>,
        tag: BigUint,
    ) -> Result<Self> {
        check_quorum(&params, &ids, &decrypter_ids)?;
        Ok(Self {
            params,
            ids,
            decrypter_ids,
            tag,
            parties: Vec::new(),
        })
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    fn party(&self, id: &Scalar) -> Result<&Party> {
        self.parties
            .iter()
            .find(|p| p.id() == id)
            .ok_or(ThresholdError::MissingKeyMaterial("party has not been set up"))
    }

    /// Partial signatures over the tag from every decrypter, combined.
    pub fn sign_tag(&self) -> Result<Signature> {
        let partials = self
            .decrypter_ids
            .par_iter()
            .map(|id| self.party(id)?.partial_signature(&self.tag, &self.decrypter_ids))
            .collect::<Result<Vec<_>>>()?;
        debug!(signers = partials.len(), "combining partial signatures");
        bc_ectss::combine_signatures(&self.params, &partials)
    }
}

impl ThresholdCryptosystem for BcEctssSystem {
    type Ciphertext = bc_ectss::Ciphertext;

    fn name(&self) -> &'static str {
        "BCECTSS"
    }

    fn params(&self) -> &SystemParams {
        &self.params
    }

    fn setup(&mut self) -> Result<()> {
        let mut parties = self
            .ids
            .par_iter()
            .map(|id| Party::new(&self.params, id.clone()))
            .collect::<Result<Vec<_>>>()?;

        let eta0: Vec<Point> = parties.iter().map(|p| p.public_commitment().clone()).collect();
        // inbox[i] holds the share every party sends to party i
        let inbox: Vec<Vec<ShareMessage>> = parties
            .par_iter()
            .map(|receiver| parties.iter().map(|s| s.share_message(receiver.id())).collect())
            .collect();

        parties
            .par_iter_mut()
            .zip(inbox.into_par_iter())
            .try_for_each(|(party, shares)| {
                party.set_personal_keys(&shares).inspect_err(|err| {
                    warn!(party = %party.id().value(), %err, "key derivation aborted");
                })?;
                party.set_system_key(&eta0)
            })?;

        info!(
            parties = parties.len(),
            threshold = self.params.threshold(),
            "BC-ECTSS keys derived"
        );
        self.parties = parties;
        Ok(())
    }

    fn encrypt(&self, message: &BigUint) -> Result<Self::Ciphertext> {
        let q = self
            .parties
            .first()
            .and_then(|p| p.system_public_key())
            .ok_or(ThresholdError::MissingKeyMaterial("system public key"))?;
        let plaintext = encode_message(&self.params, message)?;
        bc_ectss::encrypt(&self.params, &plaintext, &self.tag, q)
    }

    fn decrypt(&self, ciphertext: &Self::Ciphertext) -> Result<Point> {
        let signature = self.sign_tag()?;
        bc_ectss::decrypt(ciphertext, &signature)
    }
}

/// Threshold ElGamal with a single simulated dealer.
pub struct ElGamalSystem {
    params: SystemParams,
    ids: Vec<Scalar>,
    decrypter_ids: Vec<Scalar>,
    keys: Option<DealtKeys>,
}

impl ElGamalSystem {
    pub fn new(params: SystemParams, ids: Vec<Scalar>, decrypter_ids: Vec<Scalar>) -> Result<Self> {
        check_quorum(&params, &ids, &decrypter_ids)?;
        Ok(Self {
            params,
            ids,
            decrypter_ids,
            keys: None,
        })
    }

    pub fn keys(&self) -> Option<&DealtKeys> {
        self.keys.as_ref()
    }

    fn dealt(&self) -> Result<&DealtKeys> {
        self.keys
            .as_ref()
            .ok_or(ThresholdError::MissingKeyMaterial("dealt key shares"))
    }
}

impl ThresholdCryptosystem for ElGamalSystem {
    type Ciphertext = elgamal::Ciphertext;

    fn name(&self) -> &'static str {
        "Elgamal"
    }

    fn params(&self) -> &SystemParams {
        &self.params
    }

    fn setup(&mut self) -> Result<()> {
        let keys = elgamal::generate_keys(&self.ids, &self.params)?;
        info!(
            parties = keys.shares.len(),
            threshold = self.params.threshold(),
            "ElGamal key shares dealt"
        );
        self.keys = Some(keys);
        Ok(())
    }

    fn encrypt(&self, message: &BigUint) -> Result<Self::Ciphertext> {
        let keys = self.dealt()?;
        let plaintext = encode_message(&self.params, message)?;
        elgamal::encrypt(&self.params, &plaintext, &keys.public_key)
    }

    fn decrypt(&self, ciphertext: &Self::Ciphertext) -> Result<Point> {
        let keys = self.dealt()?;
        let shares = self
            .decrypter_ids
            .par_iter()
            .map(|id| {
                let share = keys
                    .shares
                    .iter()
                    .find(|s| &s.id == id)
                    .ok_or(ThresholdError::InvalidShares)?;
                elgamal::partial_decrypt(ciphertext, &share.secret)
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(shares = shares.len(), "combining partial decryptions");
        elgamal::decrypt(&self.params, &shares, ciphertext, &self.decrypter_ids)
    }
}

#[derive(Default, Clone, Debug)]
pub struct Timings {
    pub setup: Duration,
    pub encrypt: Duration,
    pub decrypt: Duration,
}

#[derive(Clone, Debug)]
pub struct BenchReport {
    pub name: &'static str,
    pub reps: usize,
    /// Every decryption reproduced G * message.
    pub ok: bool,
    pub avg: Timings,
}

fn avg(d: Duration, n: usize) -> Duration {
    if n == 0 {
        d
    } else {
        Duration::from_nanos((d.as_nanos() / n as u128) as u64)
    }
}

/// Run Setup → Encrypt → Decrypt `reps` times and average the wall time of each phase.
pub fn benchmark<S: ThresholdCryptosystem>(
    sys: &mut S,
    reps: usize,
    message: &BigUint,
) -> Result<BenchReport> {
    let expected = encode_message(sys.params(), message)?;
    let mut sum = Timings::default();
    let mut ok = true;

    for rep in 0..reps {
        let t = Instant::now();
        sys.setup()?;
        sum.setup += t.elapsed();

        let t = Instant::now();
        let ct = sys.encrypt(message)?;
        sum.encrypt += t.elapsed();

        let t = Instant::now();
        let recovered = sys.decrypt(&ct);
        sum.decrypt += t.elapsed();

        let good = matches!(&recovered, Ok(p) if *p == expected);
        if !good {
            warn!(system = sys.name(), rep, "decryption did not recover the plaintext");
        }
        ok &= good;
    }

    Ok(BenchReport {
        name: sys.name(),
        reps,
        ok,
        avg: Timings {
            setup: avg(sum.setup, reps),
            encrypt: avg(sum.encrypt, reps),
            decrypt: avg(sum.decrypt, reps),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(params: &SystemParams, raw: &[u64]) -> Vec<Scalar> {
        raw.iter().map(|i| params.field().from_u64(*i)).collect()
    }

    fn tag() -> BigUint {
        BigUint::parse_bytes(b"124353464568757742342366456234", 10).unwrap()
    }

    #[test]
    fn test_bc_ectss_lifecycle() {
        let params = SystemParams::secp256k1(3).unwrap();
        let mut sys = BcEctssSystem::new(
            params.clone(),
            ids(&params, &[1, 2, 3, 4, 5]),
            ids(&params, &[2, 3, 5]),
            tag(),
        )
        .unwrap();

        let message = BigUint::from(5234583490578210874u64);
        assert!(matches!(
            sys.encrypt(&message),
            Err(ThresholdError::MissingKeyMaterial(_))
        ));

        sys.setup().unwrap();
        assert_eq!(sys.parties().len(), 5);
        let ct = sys.encrypt(&message).unwrap();
        assert_eq!(sys.decrypt(&ct).unwrap(), encode_message(&params, &message).unwrap());
    }

    #[test]
    fn test_elgamal_lifecycle() {
        let params = SystemParams::secp256k1(3).unwrap();
        let mut sys = ElGamalSystem::new(
            params.clone(),
            ids(&params, &[1, 2, 3, 4, 5, 6, 7]),
            ids(&params, &[1, 2, 3, 4]),
        )
        .unwrap();
        sys.setup().unwrap();
        assert_eq!(sys.keys().unwrap().shares.len(), 7);

        let message = BigUint::from(5234583490578210874u64);
        let ct = sys.encrypt(&message).unwrap();
        assert_eq!(sys.decrypt(&ct).unwrap(), encode_message(&params, &message).unwrap());
    }

    #[test]
    fn test_benchmark_reports_success() {
        let params = SystemParams::secp256k1(2).unwrap();
        let mut sys = ElGamalSystem::new(
            params.clone(),
            ids(&params, &[1, 2, 3]),
            ids(&params, &[1, 3]),
        )
        .unwrap();
        let report = benchmark(&mut sys, 2, &BigUint::from(77u32)).unwrap();
        assert!(report.ok);
        assert_eq!(report.reps, 2);
        assert_eq!(report.name, "Elgamal");
    }

    #[test]
    fn test_benchmark_flags_short_quorum() {
        let params = SystemParams::secp256k1(3).unwrap();
        let mut sys = ElGamalSystem::new(
            params.clone(),
            ids(&params, &[1, 2, 3, 4]),
            ids(&params, &[1, 2]),
        )
        .unwrap();
        let report = benchmark(&mut sys, 1, &BigUint::from(77u32)).unwrap();
        assert!(!report.ok);
    }

    #[test]
    fn test_unknown_decrypter_rejected() {
        let params = SystemParams::secp256k1(2).unwrap();
        let res = ElGamalSystem::new(params.clone(), ids(&params, &[1, 2, 3]), ids(&params, &[1, 9]));
        assert!(matches!(res, Err(ThresholdError::InvalidParameters(_))));

        let res = BcEctssSystem::new(params.clone(), ids(&params, &[1]), ids(&params, &[1]), tag());
        assert!(matches!(res, Err(ThresholdError::InvalidParameters(_))));
    }
}
