//! UOV verification: evaluate the public map and compare with the target.

use super::{PublicKey, Signature};
use crate::error::{MqError, Result, VerificationFailure};
use crate::mq::QuadraticMap;

/// Verifies that `sig` is a preimage of the m-byte `target`.
///
/// # Returns
/// `Ok(())` if P(sig) = target, otherwise
/// [`MqError::VerificationFailed`] with the reason.
pub fn verify(pk: &PublicKey, target: &[u8], sig: &Signature) -> Result<()> {
    if target.len() != pk.params.m {
        return Err(MqError::InvalidInput {
            field: "target",
            reason: "must be exactly m bytes",
        });
    }
    if sig.x.len() != pk.params.n {
        return Err(MqError::VerificationFailed(
            VerificationFailure::InvalidLength,
        ));
    }

    let image = pk.eval(&sig.x)?;
    let diff = image
        .iter()
        .zip(target)
        .fold(0u8, |acc, (e, &t)| acc | (e.value() ^ t));
    if diff != 0 {
        return Err(MqError::VerificationFailed(
            VerificationFailure::ImageMismatch,
        ));
    }
    Ok(())
}

/// Verifies a signature, returning a boolean.
pub fn verify_bool(pk: &PublicKey, target: &[u8], sig: &Signature) -> bool {
    verify(pk, target, sig).is_ok()
}
