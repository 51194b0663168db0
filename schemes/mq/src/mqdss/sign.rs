//! MQDSS signing.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use zeroize::Zeroize;

use super::keygen::SecretKey;
use super::{alphas, challenge_bits, commit0, commit1, scale_sub};
use crate::error::{MqError, Result};
use crate::expand::{expand_secret, hash, HASH_BYTES};
use crate::field::Field;
use crate::mq::QuadraticMap;
use crate::packing::{pack, packed_len, unpack};
use crate::params::MqdssParams;

/// The disclosed half of one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opening<F: Field> {
    /// r0 if the round's challenge bit is 0, otherwise r1.
    pub r: Vec<F>,
    /// The commitment of the half that is not recomputable: com1 for bit 0,
    /// com0 for bit 1.
    pub commitment: [u8; HASH_BYTES],
}

/// MQDSS signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature<F: Field> {
    /// C = H(prf_key ‖ message).
    pub commitment: [u8; HASH_BYTES],
    /// σ0 = H(com0_0 ‖ com1_0 ‖ … ‖ com0_{R-1} ‖ com1_{R-1}).
    pub sigma0: [u8; HASH_BYTES],
    /// Masked t-values, one n-vector per round.
    pub t1: Vec<Vec<F>>,
    /// Masked e-values, one m-vector per round.
    pub e1: Vec<Vec<F>>,
    /// One opening per round, in round order.
    pub openings: Vec<Opening<F>>,
}

impl<F: Field> Signature<F> {
    /// The packed σ1 component: all t1 vectors followed by all e1 vectors.
    pub fn sigma1(&self) -> Vec<u8> {
        let flat: Vec<F> = self
            .t1
            .iter()
            .chain(self.e1.iter())
            .flat_map(|v| v.iter().copied())
            .collect();
        pack(&flat)
    }

    /// Serializes the signature.
    ///
    /// Format: C ‖ σ0 ‖ σ1 ‖ (pack(r) ‖ com) for each round
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.commitment);
        bytes.extend_from_slice(&self.sigma0);
        bytes.extend(self.sigma1());
        for opening in &self.openings {
            bytes.extend(pack(&opening.r));
            bytes.extend_from_slice(&opening.commitment);
        }
        bytes
    }

    /// Deserializes a signature for the given parameters.
    ///
    /// Rejects wrong lengths and non-canonical element encodings.
    pub fn from_bytes(params: &MqdssParams, bytes: &[u8]) -> Result<Self> {
        let (n, m, rounds) = (params.n, params.m, params.rounds);
        if bytes.len() != params.signature_size::<F>() {
            return Err(MqError::DecodingError {
                context: "MQDSS signature length",
            });
        }

        let (commitment, rest) = bytes.split_at(HASH_BYTES);
        let (sigma0, rest) = rest.split_at(HASH_BYTES);
        let (sigma1, rest) = rest.split_at(params.sigma1_size::<F>());

        let flat: Vec<F> = unpack(sigma1, rounds * (n + m))?;
        let (t1_flat, e1_flat) = flat.split_at(rounds * n);

        let r_len = packed_len::<F>(n);
        let openings = rest
            .chunks_exact(params.opening_size::<F>())
            .map(|chunk| {
                let (r, com) = chunk.split_at(r_len);
                Ok(Opening {
                    r: unpack(r, n)?,
                    commitment: to_digest(com)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Signature {
            commitment: to_digest(commitment)?,
            sigma0: to_digest(sigma0)?,
            t1: t1_flat.chunks_exact(n).map(<[F]>::to_vec).collect(),
            e1: e1_flat.chunks_exact(m).map(<[F]>::to_vec).collect(),
            openings,
        })
    }
}

fn to_digest(bytes: &[u8]) -> Result<[u8; HASH_BYTES]> {
    bytes.try_into().map_err(|_| MqError::DecodingError {
        context: "digest length",
    })
}

/// Secret per-round values. Wiped on drop.
struct Round<F: Field> {
    r0: Vec<F>,
    t0: Vec<F>,
    e0: Vec<F>,
    r1: Vec<F>,
    f_r0: Vec<F>,
    com0: [u8; HASH_BYTES],
    com1: [u8; HASH_BYTES],
}

impl<F: Field> Drop for Round<F> {
    fn drop(&mut self) {
        self.r0.zeroize();
        self.t0.zeroize();
        self.e0.zeroize();
        self.r1.zeroize();
        self.f_r0.zeroize();
    }
}

/// Commits to round `index`: derives (r0, t0, e0) from (prf_key, D, index)
/// and computes both commitments.
fn commit_round<M: QuadraticMap>(
    sk: &SecretKey<M>,
    d: &[u8],
    index: u32,
) -> Result<Round<M::Elem>> {
    let (n, m) = (sk.params().n, sk.params().m);
    let system = &sk.public.system;

    let mut stream: Vec<M::Elem> =
        expand_secret(&[&sk.prf_key, d, &index.to_le_bytes()], 2 * n + m);
    let e0 = stream.split_off(2 * n);
    let t0 = stream.split_off(n);
    let r0 = stream;

    let r1: Vec<M::Elem> = sk.secret.iter().zip(&r0).map(|(&s, &r)| s - r).collect();
    let g: Vec<M::Elem> = system
        .polar(&t0, &r1)?
        .into_iter()
        .zip(&e0)
        .map(|(a, &b)| a + b)
        .collect();

    Ok(Round {
        com0: commit0(&r0, &t0, &e0),
        com1: commit1(&r1, &g),
        f_r0: system.eval(&r0)?,
        r0,
        t0,
        e0,
        r1,
    })
}

/// Signs a message.
///
/// Signing is deterministic: the per-round randomness is derived from the
/// PRF key and the message digest, so it never fails for valid keys.
///
/// # Arguments
/// * `sk` - Secret key
/// * `message` - Message to sign
pub fn sign<M: QuadraticMap>(sk: &SecretKey<M>, message: &[u8]) -> Result<Signature<M::Elem>> {
    let params = sk.params();
    let rounds = params.rounds;

    let commitment = hash(&[&sk.prf_key, message]);
    let d = hash(&[&commitment, message]);

    #[cfg(not(feature = "parallel"))]
    let states = (0..rounds as u32)
        .map(|i| commit_round(sk, &d, i))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let states = (0..rounds as u32)
        .into_par_iter()
        .map(|i| commit_round(sk, &d, i))
        .collect::<Result<Vec<_>>>()?;

    let mut transcript = Vec::with_capacity(2 * HASH_BYTES * rounds);
    for round in &states {
        transcript.extend_from_slice(&round.com0);
        transcript.extend_from_slice(&round.com1);
    }
    let sigma0 = hash(&[&transcript]);

    let alpha: Vec<M::Elem> = alphas(&d, &sigma0, rounds);
    let (t1, e1): (Vec<_>, Vec<_>) = states
        .iter()
        .zip(&alpha)
        .map(|(round, &a)| {
            (
                scale_sub(a, &round.r0, &round.t0),
                scale_sub(a, &round.f_r0, &round.e0),
            )
        })
        .unzip();

    let mut signature = Signature {
        commitment,
        sigma0,
        t1,
        e1,
        openings: Vec::with_capacity(rounds),
    };

    let bits = challenge_bits(&d, &sigma0, &signature.sigma1(), rounds);
    signature.openings = states
        .iter()
        .zip(&bits)
        .map(|(round, &bit)| {
            if bit {
                Opening {
                    r: round.r1.clone(),
                    commitment: round.com0,
                }
            } else {
                Opening {
                    r: round.r0.clone(),
                    commitment: round.com1,
                }
            }
        })
        .collect();

    log::debug!(
        "MQDSS signature over {} rounds ({} r1 openings)",
        rounds,
        bits.iter().filter(|&&b| b).count()
    );
    Ok(signature)
}
