//! MQDSS: a Fiat-Shamir signature from the 5-pass MQ identification scheme.
//!
//! The signer proves knowledge of a preimage s of v = F(s) under a public
//! quadratic map F. Each of the R rounds splits s = r0 + r1 and masks
//! r0 = t0 + t1, F(r0) = e0 + e1 with an α-dependent offset; the verifier
//! may open one side of every round and recompute the matching commitment.
//!
//! The scheme is generic over [`QuadraticMap`], so it runs over GF(256) or
//! GF(31) and over any system, including the blinded MQAT system. Signing is
//! deterministic given (secret key, message).
//!
//! ## Byte layout
//!
//! `C(32) ‖ σ0(32) ‖ σ1 ‖ (pack(r) ‖ com(32)) × R`, where
//! `σ1 = pack(t1_0 ‖ … ‖ t1_{R-1} ‖ e1_0 ‖ … ‖ e1_{R-1})`.

pub mod keygen;
pub mod sign;
pub mod verify;

pub use keygen::{expand_keypair, keygen, PublicKey, SecretKey, SeededSystem};
pub use sign::{sign, Opening, Signature};
pub use verify::{verify, verify_bool, verify_bytes};

use crate::expand::{expand_bits, expand_secret, hash, HASH_BYTES};
use crate::field::Field;
use crate::packing::pack;

/// Commitment to the r0 side of a round: H(r0 ‖ t0 ‖ e0).
pub(crate) fn commit0<F: Field>(r0: &[F], t0: &[F], e0: &[F]) -> [u8; HASH_BYTES] {
    hash(&[&pack(r0), &pack(t0), &pack(e0)])
}

/// Commitment to the r1 side of a round: H(r1 ‖ G(t0, r1) + e0).
pub(crate) fn commit1<F: Field>(r1: &[F], g: &[F]) -> [u8; HASH_BYTES] {
    hash(&[&pack(r1), &pack(g)])
}

/// First challenge: one field element α per round.
pub(crate) fn alphas<F: Field>(d: &[u8], sigma0: &[u8], rounds: usize) -> Vec<F> {
    expand_secret(&[d, sigma0], rounds)
}

/// Second challenge: which half of each round is opened.
pub(crate) fn challenge_bits(d: &[u8], sigma0: &[u8], sigma1: &[u8], rounds: usize) -> Vec<bool> {
    expand_bits(&[d, sigma0, sigma1], rounds)
}

/// α·a − b, element-wise.
pub(crate) fn scale_sub<F: Field>(alpha: F, a: &[F], b: &[F]) -> Vec<F> {
    a.iter().zip(b).map(|(&x, &y)| alpha * x - y).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Gf256, Gf31};

    #[test]
    fn test_scale_sub() {
        let a = [Gf31::new(3), Gf31::new(10)];
        let b = [Gf31::new(1), Gf31::new(2)];
        assert_eq!(
            scale_sub(Gf31::new(4), &a, &b),
            vec![Gf31::new(11), Gf31::new(7)]
        );
    }

    #[test]
    fn test_commitments_separate_inputs() {
        let x = [Gf256(1), Gf256(2)];
        let y = [Gf256(3)];
        assert_ne!(commit0(&x, &y, &y), commit0(&y, &x, &y));
        assert_ne!(commit1(&x, &y), commit1(&y, &x));
    }

    #[test]
    fn test_challenges_depend_on_transcript() {
        let a: Vec<Gf256> = alphas(b"d", b"s0", 16);
        let b: Vec<Gf256> = alphas(b"d", b"s1", 16);
        assert_eq!(a.len(), 16);
        assert_ne!(a, b);
        assert_ne!(
            challenge_bits(b"d", b"s0", b"x", 64),
            challenge_bits(b"d", b"s0", b"y", 64)
        );
    }
}
