//! Threshold elliptic-curve cryptography over short Weierstrass curves.
//!
//! Two protocols share one curve engine:
//! - [`bc_ectss`]: threshold signatures that double as decryption capabilities
//!   for ciphertexts bound to a tag.
//! - [`elgamal`]: threshold ElGamal with Lagrange-combined partial decryptions.
//!
//! Every party is an in-process value; all parameters are passed explicitly.

pub mod bc_ectss;
pub mod curve;
pub mod elgamal;
pub mod error;
pub mod harness;
pub mod hash;
pub mod modular;
pub mod params;
pub mod randutil;
pub mod scalar;
pub mod shamir;

pub use error::{Result, ThresholdError};
