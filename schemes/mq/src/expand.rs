//! Hashing and deterministic seed expansion.
//!
//! - [`hash`]: SHA3-256, used for commitments and Fiat-Shamir transcripts.
//! - [`expand_public`]: SHAKE128 stream mapped to field elements, for
//!   structure anyone may re-derive (public systems).
//! - [`expand_secret`]: SHAKE256 stream mapped to field elements, for
//!   secret or per-signature values (oil space, vinegar, round masks).
//! - [`expand_bits`]: SHAKE128 stream mapped to challenge bits.
//!
//! Every input is given as a list of byte strings absorbed in order, so
//! `[a, b]` and `[a || b]` expand identically.
//!
//! Bytes that do not map to a field element are discarded rather than
//! reduced, keeping the output uniform for fields smaller than 256.

use rand::{CryptoRng, RngCore};
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Sha3_256, Shake128, Shake256,
};

use crate::error::{MqError, Result};
use crate::field::{Field, Gf31};

/// Size in bytes of every hash digest.
pub const HASH_BYTES: usize = 32;

/// Bytes squeezed from the XOF per read.
const SQUEEZE_BLOCK: usize = 136;

/// SHA3-256 over the concatenation of `parts`.
pub fn hash(parts: &[&[u8]]) -> [u8; HASH_BYTES] {
    use sha3::Digest;

    let mut hasher = Sha3_256::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    hasher.finalize().into()
}

fn shake128(parts: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake128::default();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize_xof()
}

fn shake256(parts: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake256::default();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize_xof()
}

/// Fills `len` elements from the reader, dropping bytes the field rejects.
fn sample_uniform<F: Field, R: XofReader>(reader: &mut R, len: usize) -> Vec<F> {
    let mut out = Vec::with_capacity(len);
    let mut block = [0u8; SQUEEZE_BLOCK];

    while out.len() < len {
        reader.read(&mut block);
        for &byte in block.iter() {
            if let Some(elem) = F::from_uniform_byte(byte) {
                out.push(elem);
                if out.len() == len {
                    break;
                }
            }
        }
    }
    out
}

/// Expands `parts` into `len` uniform field elements with SHAKE128.
pub fn expand_public<F: Field>(parts: &[&[u8]], len: usize) -> Vec<F> {
    sample_uniform(&mut shake128(parts), len)
}

/// Expands `parts` into `len` uniform field elements with SHAKE256.
pub fn expand_secret<F: Field>(parts: &[&[u8]], len: usize) -> Vec<F> {
    sample_uniform(&mut shake256(parts), len)
}

/// Expands `parts` into `len` centred GF(31) residues in `[-15, 15]`.
///
/// Uses the same SHAKE128 stream and rejection rule as
/// `expand_public::<Gf31>`, shifting each residue down by 15.
pub fn expand_signed_gf31(parts: &[&[u8]], len: usize) -> Vec<i8> {
    sample_uniform::<Gf31, _>(&mut shake128(parts), len)
        .into_iter()
        .map(|e| e.value() as i8 - 15)
        .collect()
}

/// Draws a fresh `len`-byte seed from `rng`.
///
/// Generator failures surface as [`MqError::RandomnessFailure`].
pub(crate) fn random_seed<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut seed = vec![0u8; len];
    rng.try_fill_bytes(&mut seed).map_err(|e| {
        log::error!("random generator failed: {}", e);
        MqError::RandomnessFailure
    })?;
    Ok(seed)
}

/// Expands `parts` into `count` challenge bits, one per squeezed byte.
pub fn expand_bits(parts: &[&[u8]], count: usize) -> Vec<bool> {
    let mut bytes = vec![0u8; count];
    shake128(parts).read(&mut bytes);
    bytes.into_iter().map(|b| b & 1 == 1).collect()
}
