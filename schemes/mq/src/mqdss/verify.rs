//! MQDSS verification.
//!
//! Both challenges are re-derived from the signature itself. For every round
//! the verifier recomputes the commitment on the opened side:
//!
//! - bit 0: com0 = H(r0 ‖ α·r0 − t1 ‖ α·F(r0) − e1)
//! - bit 1: com1 = H(r1 ‖ α·(v − F(r1)) − G(r1, t1) − e1)
//!
//! and takes the other commitment from the opening. The signature is valid
//! iff the rebuilt transcript hashes to σ0.

use super::keygen::PublicKey;
use super::sign::Signature;
use super::{alphas, challenge_bits, commit0, commit1, scale_sub};
use crate::error::{MqError, Result, VerificationFailure};
use crate::expand::{hash, HASH_BYTES};
use crate::mq::QuadraticMap;

/// Verifies an MQDSS signature.
///
/// # Returns
/// `Ok(())` if the signature is valid, otherwise
/// [`MqError::VerificationFailed`] with the reason.
pub fn verify<M: QuadraticMap>(
    pk: &PublicKey<M>,
    message: &[u8],
    sig: &Signature<M::Elem>,
) -> Result<()> {
    let params = &pk.params;
    let (n, m, rounds) = (params.n, params.m, params.rounds);

    let shape_ok = sig.t1.len() == rounds
        && sig.e1.len() == rounds
        && sig.openings.len() == rounds
        && sig.t1.iter().all(|t| t.len() == n)
        && sig.e1.iter().all(|e| e.len() == m)
        && sig.openings.iter().all(|o| o.r.len() == n);
    if !shape_ok {
        return Err(MqError::VerificationFailed(
            VerificationFailure::InvalidLength,
        ));
    }

    let d = hash(&[&sig.commitment, message]);
    let alpha: Vec<M::Elem> = alphas(&d, &sig.sigma0, rounds);
    let bits = challenge_bits(&d, &sig.sigma0, &sig.sigma1(), rounds);

    let mut transcript = Vec::with_capacity(2 * HASH_BYTES * rounds);
    for i in 0..rounds {
        let (a, opening) = (alpha[i], &sig.openings[i]);
        let (t1, e1) = (&sig.t1[i], &sig.e1[i]);

        if bits[i] {
            let r1 = &opening.r;
            let f_r1 = pk.system.eval(r1)?;
            let g_r1_t1 = pk.system.polar(r1, t1)?;
            let v_minus: Vec<M::Elem> = pk.v.iter().zip(&f_r1).map(|(&v, &f)| v - f).collect();
            let g: Vec<M::Elem> = scale_sub(a, &v_minus, &g_r1_t1)
                .into_iter()
                .zip(e1)
                .map(|(x, &e)| x - e)
                .collect();
            transcript.extend_from_slice(&opening.commitment);
            transcript.extend_from_slice(&commit1(r1, &g));
        } else {
            let r0 = &opening.r;
            let t0 = scale_sub(a, r0, t1);
            let e0 = scale_sub(a, &pk.system.eval(r0)?, e1);
            transcript.extend_from_slice(&commit0(r0, &t0, &e0));
            transcript.extend_from_slice(&opening.commitment);
        }
    }

    if hash(&[&transcript]) != sig.sigma0 {
        return Err(MqError::VerificationFailed(
            VerificationFailure::CommitmentMismatch,
        ));
    }
    Ok(())
}

/// Verifies a signature, returning a boolean.
pub fn verify_bool<M: QuadraticMap>(
    pk: &PublicKey<M>,
    message: &[u8],
    sig: &Signature<M::Elem>,
) -> bool {
    verify(pk, message, sig).is_ok()
}

/// Decodes and verifies a serialized signature.
///
/// Undecodable input is reported as
/// [`VerificationFailure::Malformed`].
pub fn verify_bytes<M: QuadraticMap>(
    pk: &PublicKey<M>,
    message: &[u8],
    bytes: &[u8],
) -> Result<()> {
    let sig = Signature::from_bytes(&pk.params, bytes)
        .map_err(|_| MqError::VerificationFailed(VerificationFailure::Malformed))?;
    verify(pk, message, &sig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, Gf256, Gf31};
    use crate::mqdss::{expand_keypair, sign};
    use crate::params::{MqdssParams, MQDSS_DEMO};

    #[test]
    fn test_verify_gf256() {
        let (pk, sk) = expand_keypair::<Gf256>(MQDSS_DEMO, &[1u8; 32], &[2u8; 32]).unwrap();
        let sig = sign(&sk, b"hello").unwrap();
        assert!(verify(&pk, b"hello", &sig).is_ok());
        assert_eq!(
            verify(&pk, b"hellp", &sig),
            Err(MqError::VerificationFailed(
                VerificationFailure::CommitmentMismatch
            ))
        );
    }

    #[test]
    fn test_verify_gf31() {
        let params = MqdssParams::new(16, 16, 24).unwrap();
        let (pk, sk) = expand_keypair::<Gf31>(params, &[3u8; 32], &[4u8; 32]).unwrap();
        let sig = sign(&sk, b"q-ary").unwrap();
        assert!(verify_bool(&pk, b"q-ary", &sig));
        assert!(verify_bytes(&pk, b"q-ary", &sig.to_bytes()).is_ok());
    }

    #[test]
    fn test_tampered_t1_rejected() {
        let (pk, sk) = expand_keypair::<Gf256>(MQDSS_DEMO, &[5u8; 32], &[6u8; 32]).unwrap();
        let mut sig = sign(&sk, b"msg").unwrap();
        sig.t1[3][0] += Gf256::ONE;
        assert!(!verify_bool(&pk, b"msg", &sig));
    }

    #[test]
    fn test_missing_round_rejected() {
        let (pk, sk) = expand_keypair::<Gf256>(MQDSS_DEMO, &[5u8; 32], &[6u8; 32]).unwrap();
        let mut sig = sign(&sk, b"msg").unwrap();
        sig.openings.pop();
        assert_eq!(
            verify(&pk, b"msg", &sig),
            Err(MqError::VerificationFailed(VerificationFailure::InvalidLength))
        );
    }

    #[test]
    fn test_verify_bytes_reports_malformed() {
        let (pk, _) = expand_keypair::<Gf256>(MQDSS_DEMO, &[5u8; 32], &[6u8; 32]).unwrap();
        assert_eq!(
            verify_bytes(&pk, b"msg", &[0u8; 10]),
            Err(MqError::VerificationFailed(VerificationFailure::Malformed))
        );
    }

    #[test]
    fn test_wrong_key_rejected() {
        let (_, sk) = expand_keypair::<Gf256>(MQDSS_DEMO, &[5u8; 32], &[6u8; 32]).unwrap();
        let (other, _) = expand_keypair::<Gf256>(MQDSS_DEMO, &[7u8; 32], &[6u8; 32]).unwrap();
        let sig = sign(&sk, b"msg").unwrap();
        assert!(!verify_bool(&other, b"msg", &sig));
    }
}
