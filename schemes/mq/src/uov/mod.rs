//! UOV (Unbalanced Oil and Vinegar) trapdoor signatures over GF(256).
//!
//! The public map P in n = v + m variables is split into three blocks per
//! output form: P1 (vinegar × vinegar, upper triangular), P2 (vinegar × oil)
//! and P3 (oil × oil, upper triangular). The secret oil space O is a v×m
//! matrix such that P vanishes on every point (O·y, y).
//!
//! P1 and P2 are expanded from a short public seed; P3 depends on O and is
//! published explicitly. The secret key is re-derivable from its two seeds.
//!
//! Targets ("messages") are exactly m bytes. Use [`hash_message`] to map an
//! arbitrary message to a target.

pub mod keygen;
pub mod sign;
pub mod verify;

pub use keygen::{expand_keypair, keygen};
pub use sign::sign;
pub use verify::{verify, verify_bool};

use std::fmt;

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};
use zeroize::Zeroize;

use crate::error::{check_len, MqError, Result};
use crate::field::{Field, Gf256};
use crate::matrix::{dot, quadratic_form, vec_mul, Matrix, View};
use crate::mq::QuadraticMap;
use crate::params::UovParams;

/// Hashes an arbitrary message to an m-byte UOV target.
pub fn hash_message(params: &UovParams, msg: &[u8]) -> Vec<u8> {
    let mut h = Shake256::default();
    h.update(b"pqsigs-mq-uov-v1");
    h.update(msg);
    let mut out = vec![0u8; params.m];
    h.finalize_xof().read(&mut out);
    out
}

/// UOV public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// Parameter set.
    pub params: UovParams,
    /// Seed from which P1 and P2 are expanded.
    pub seed_pk: Vec<u8>,
    /// m packed v×v upper triangular blocks.
    pub p1: Vec<Gf256>,
    /// m row-major v×m blocks.
    pub p2: Vec<Gf256>,
    /// m packed m×m upper triangular blocks.
    pub p3: Vec<Gf256>,
}

impl PublicKey {
    /// P1 block of form `k`.
    pub fn p1_block(&self, k: usize) -> Result<View<'_, Gf256>> {
        let len = self.params.p1_len();
        View::upper_triangular(self.params.v(), &self.p1[k * len..(k + 1) * len])
    }

    /// P2 block of form `k`.
    pub fn p2_block(&self, k: usize) -> Result<View<'_, Gf256>> {
        let len = self.params.p2_len();
        View::dense(self.params.v(), self.params.m, &self.p2[k * len..(k + 1) * len])
    }

    /// P3 block of form `k`.
    pub fn p3_block(&self, k: usize) -> Result<View<'_, Gf256>> {
        let len = self.params.p3_len();
        View::upper_triangular(self.params.m, &self.p3[k * len..(k + 1) * len])
    }

    /// Serializes the key as seed_pk ‖ P3.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.params.public_key_size());
        bytes.extend_from_slice(&self.seed_pk);
        bytes.extend(self.p3.iter().map(|c| c.value()));
        bytes
    }

    /// Deserializes a key, re-expanding P1 and P2 from the seed.
    pub fn from_bytes(params: UovParams, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.public_key_size() {
            return Err(MqError::DecodingError {
                context: "UOV public key length",
            });
        }
        let (seed_pk, p3) = bytes.split_at(params.pk_seed_len);
        let (p1, p2) = keygen::expand_public_blocks(&params, seed_pk);
        Ok(PublicKey {
            params,
            seed_pk: seed_pk.to_vec(),
            p1,
            p2,
            p3: p3.iter().map(|&b| Gf256(b)).collect(),
        })
    }
}

impl QuadraticMap for PublicKey {
    type Elem = Gf256;

    fn num_vars(&self) -> usize {
        self.params.n
    }

    fn num_forms(&self) -> usize {
        self.params.m
    }

    /// P_k(x) = x_vᵗ·P1_k·x_v + x_vᵗ·P2_k·x_o + x_oᵗ·P3_k·x_o.
    fn eval(&self, x: &[Gf256]) -> Result<Vec<Gf256>> {
        check_len("uov::PublicKey::eval", self.params.n, x.len())?;
        let (vin, oil) = x.split_at(self.params.v());

        (0..self.params.m)
            .map(|k| -> Result<Gf256> {
                let vv = quadratic_form(&self.p1_block(k)?, vin)?;
                let vo = dot(&vec_mul(vin, &self.p2_block(k)?)?, oil)?;
                let oo = quadratic_form(&self.p3_block(k)?, oil)?;
                Ok(vv + vo + oo)
            })
            .collect()
    }
}

/// UOV secret key.
///
/// # Security
///
/// This struct implements `Drop` to zeroize the secret seed and the
/// matrices derived from it. Its `Debug` output omits all secret fields.
///
/// The derived blocks are only built by [`expand_keypair`], so a key is
/// always consistent with its seeds.
#[derive(Clone)]
pub struct SecretKey {
    /// Parameter set.
    pub params: UovParams,
    /// Secret seed from which O is expanded.
    pub(crate) seed_sk: Vec<u8>,
    /// Public seed (kept to re-derive P1).
    pub seed_pk: Vec<u8>,
    /// Oil space O (v×m).
    pub(crate) o: Matrix<Gf256>,
    /// S_k = (P1_k + P1_kᵗ)·O + P2_k for each form (v×m each).
    pub(crate) s: Vec<Matrix<Gf256>>,
    /// m packed v×v upper triangular blocks (same as the public P1).
    pub(crate) p1: Vec<Gf256>,
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("params", &self.params)
            .field("seed_pk", &self.seed_pk)
            .finish_non_exhaustive()
    }
}

impl SecretKey {
    /// The secret seed.
    pub fn seed_sk(&self) -> &[u8] {
        &self.seed_sk
    }

    /// The oil space O (v×m).
    pub fn oil_space(&self) -> &Matrix<Gf256> {
        &self.o
    }

    /// P1 block of form `k`.
    pub fn p1_block(&self, k: usize) -> Result<View<'_, Gf256>> {
        let len = self.params.p1_len();
        View::upper_triangular(self.params.v(), &self.p1[k * len..(k + 1) * len])
    }

    /// The n×m matrix [O; I] whose column space is the oil subspace.
    pub fn oil_basis(&self) -> Matrix<Gf256> {
        let (v, m) = (self.params.v(), self.params.m);
        let mut basis = Matrix::zeros(self.params.n, m);
        for i in 0..v {
            for j in 0..m {
                basis.set(i, j, self.o.row(i)[j]);
            }
        }
        for j in 0..m {
            basis.set(v + j, j, Gf256::ONE);
        }
        basis
    }

    /// Serializes the key as seed_sk ‖ seed_pk.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.params.secret_key_size());
        bytes.extend_from_slice(&self.seed_sk);
        bytes.extend_from_slice(&self.seed_pk);
        bytes
    }

    /// Deserializes a key, re-deriving O, S and P1 from the seeds.
    pub fn from_bytes(params: UovParams, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.secret_key_size() {
            return Err(MqError::DecodingError {
                context: "UOV secret key length",
            });
        }
        let (seed_sk, seed_pk) = bytes.split_at(params.sk_seed_len);
        let (_, sk) = expand_keypair(params, seed_sk, seed_pk)?;
        Ok(sk)
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.seed_sk.zeroize();
        self.o.zeroize();
        for s in self.s.iter_mut() {
            s.zeroize();
        }
    }
}

/// A UOV signature: a preimage of the target under the public map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The n-element preimage.
    pub x: Vec<Gf256>,
}

impl Signature {
    /// Serializes the signature (one byte per element).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.x.iter().map(|e| e.value()).collect()
    }

    /// Deserializes a signature for the given parameters.
    pub fn from_bytes(params: &UovParams, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.signature_size() {
            return Err(MqError::DecodingError {
                context: "UOV signature length",
            });
        }
        Ok(Signature {
            x: bytes.iter().map(|&b| Gf256(b)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::UOV_DEMO;

    #[test]
    fn test_hash_message_length_and_determinism() {
        let a = hash_message(&UOV_DEMO, b"msg");
        assert_eq!(a.len(), UOV_DEMO.m);
        assert_eq!(a, hash_message(&UOV_DEMO, b"msg"));
        assert_ne!(a, hash_message(&UOV_DEMO, b"msh"));
    }

    #[test]
    fn test_signature_bytes_roundtrip() {
        let sig = Signature {
            x: (0..UOV_DEMO.n as u8).map(Gf256).collect(),
        };
        let bytes = sig.to_bytes();
        assert_eq!(Signature::from_bytes(&UOV_DEMO, &bytes).unwrap(), sig);
        assert!(Signature::from_bytes(&UOV_DEMO, &bytes[1..]).is_err());
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let (_, sk) = expand_keypair(UOV_DEMO, &[0x77u8; 32], &[2u8; 16]).unwrap();
        let shown = format!("{:?}", sk);
        assert!(shown.contains("seed_pk"));
        assert!(!shown.contains("seed_sk"));
        assert!(!shown.contains("119"));
    }
}
