//! MQDSS keys.
//!
//! A standalone key pair uses a random [`DenseSystem`] derived from a public
//! 32-byte seed and a secret derived from a second seed. Any other
//! [`QuadraticMap`] with a known preimage can be turned into a key with
//! [`SecretKey::from_preimage`].

use std::fmt;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{check_len, MqError, Result};
use crate::expand::{expand_secret, random_seed};
use crate::field::Field;
use crate::mq::{DenseSystem, QuadraticMap};
use crate::packing::{pack, unpack};
use crate::params::{MqdssParams, MQDSS_SEED_BYTES};

/// A [`DenseSystem`] together with the public seed it was expanded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededSystem<F: Field> {
    seed: Vec<u8>,
    system: DenseSystem<F>,
}

impl<F: Field> SeededSystem<F> {
    /// Expands an m-form system in n variables from `seed`.
    pub fn from_seed(seed: &[u8], n: usize, m: usize) -> Self {
        SeededSystem {
            seed: seed.to_vec(),
            system: DenseSystem::from_seed(seed, n, m),
        }
    }

    /// The public seed.
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// The expanded system.
    pub fn system(&self) -> &DenseSystem<F> {
        &self.system
    }
}

impl<F: Field> QuadraticMap for SeededSystem<F> {
    type Elem = F;

    fn num_vars(&self) -> usize {
        self.system.num_vars()
    }

    fn num_forms(&self) -> usize {
        self.system.num_forms()
    }

    fn eval(&self, x: &[F]) -> Result<Vec<F>> {
        self.system.eval(x)
    }
}

/// MQDSS public key: a quadratic map F and the image v = F(s).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey<M: QuadraticMap> {
    /// Parameter set.
    pub params: MqdssParams,
    /// The public map.
    pub system: M,
    /// The public image of the secret.
    pub v: Vec<M::Elem>,
}

impl<M: QuadraticMap> PublicKey<M> {
    /// Assembles a public key, checking that all dimensions agree.
    pub fn new(params: MqdssParams, system: M, v: Vec<M::Elem>) -> Result<Self> {
        check_len("mqdss::PublicKey (n)", params.n, system.num_vars())?;
        check_len("mqdss::PublicKey (m)", params.m, system.num_forms())?;
        check_len("mqdss::PublicKey (v)", params.m, v.len())?;
        Ok(PublicKey { params, system, v })
    }
}

impl<F: Field> PublicKey<SeededSystem<F>> {
    /// Serializes the key as system seed ‖ pack(v).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.params.public_key_size::<F>());
        bytes.extend_from_slice(self.system.seed());
        bytes.extend(pack(&self.v));
        bytes
    }

    /// Deserializes a key, re-expanding the system from its seed.
    pub fn from_bytes(params: MqdssParams, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.public_key_size::<F>() {
            return Err(MqError::DecodingError {
                context: "MQDSS public key length",
            });
        }
        let (seed, v) = bytes.split_at(MQDSS_SEED_BYTES);
        Ok(PublicKey {
            params,
            system: SeededSystem::from_seed(seed, params.n, params.m),
            v: unpack(v, params.m)?,
        })
    }
}

/// MQDSS secret key: a preimage of the public image.
///
/// # Security
///
/// This struct implements `Drop` to zeroize the secret vector and the
/// PRF key when dropped. Its `Debug` output shows only the public key.
#[derive(Clone)]
pub struct SecretKey<M: QuadraticMap> {
    /// The secret preimage s (n elements).
    pub(crate) secret: Vec<M::Elem>,
    /// Key for deriving per-message randomness.
    pub(crate) prf_key: Vec<u8>,
    /// The matching public key.
    pub public: PublicKey<M>,
}

impl<M: QuadraticMap> SecretKey<M> {
    /// Builds a key from any map and a known preimage.
    ///
    /// The public image is computed as F(secret) and the PRF key is the
    /// packed secret.
    pub fn from_preimage(params: MqdssParams, system: M, secret: Vec<M::Elem>) -> Result<Self> {
        check_len("mqdss::SecretKey::from_preimage", params.n, secret.len())?;
        let v = system.eval(&secret)?;
        let public = PublicKey::new(params, system, v)?;
        Ok(SecretKey {
            prf_key: pack(&secret),
            secret,
            public,
        })
    }

    /// The parameter set.
    pub fn params(&self) -> MqdssParams {
        self.public.params
    }

    /// The secret preimage s.
    pub fn secret(&self) -> &[M::Elem] {
        &self.secret
    }
}

impl<M: QuadraticMap + fmt::Debug> fmt::Debug for SecretKey<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl<M: QuadraticMap> Drop for SecretKey<M> {
    fn drop(&mut self) {
        self.secret.zeroize();
        self.prf_key.zeroize();
    }
}

impl<F: Field> SecretKey<SeededSystem<F>> {
    /// Serializes the key as secret seed ‖ system seed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 * MQDSS_SEED_BYTES);
        bytes.extend_from_slice(&self.prf_key);
        bytes.extend_from_slice(self.public.system.seed());
        bytes
    }

    /// Deserializes a key, re-deriving the secret and the system.
    pub fn from_bytes(params: MqdssParams, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 2 * MQDSS_SEED_BYTES {
            return Err(MqError::DecodingError {
                context: "MQDSS secret key length",
            });
        }
        let (sk_seed, system_seed) = bytes.split_at(MQDSS_SEED_BYTES);
        let (_, sk) = expand_keypair(params, sk_seed, system_seed)?;
        Ok(sk)
    }
}

/// Generates a standalone MQDSS key pair over the field `F`.
///
/// # Errors
/// Returns [`MqError::InvalidParams`] for inconsistent parameters and
/// [`MqError::RandomnessFailure`] if the generator fails.
pub fn keygen<F: Field, R: RngCore + CryptoRng>(
    rng: &mut R,
    params: MqdssParams,
) -> Result<(PublicKey<SeededSystem<F>>, SecretKey<SeededSystem<F>>)> {
    let params = MqdssParams::new(params.n, params.m, params.rounds)?;

    let system_seed = random_seed(rng, MQDSS_SEED_BYTES)?;
    let mut sk_seed = random_seed(rng, MQDSS_SEED_BYTES)?;

    let keys = expand_keypair(params, &sk_seed, &system_seed);
    sk_seed.zeroize();
    keys
}

/// Deterministically derives a standalone key pair from its two seeds.
pub fn expand_keypair<F: Field>(
    params: MqdssParams,
    sk_seed: &[u8],
    system_seed: &[u8],
) -> Result<(PublicKey<SeededSystem<F>>, SecretKey<SeededSystem<F>>)> {
    if sk_seed.len() != MQDSS_SEED_BYTES || system_seed.len() != MQDSS_SEED_BYTES {
        return Err(MqError::InvalidInput {
            field: "seed",
            reason: "MQDSS seeds must be 32 bytes",
        });
    }

    let system = SeededSystem::from_seed(system_seed, params.n, params.m);
    let secret: Vec<F> = expand_secret(&[sk_seed], params.n);
    let v = system.eval(&secret)?;
    let public = PublicKey::new(params, system, v)?;

    log::debug!(
        "expanded MQDSS key pair (n={}, m={}, {}-bit elements)",
        params.n,
        params.m,
        F::BITS
    );

    let sk = SecretKey {
        secret,
        prf_key: sk_seed.to_vec(),
        public: public.clone(),
    };
    Ok((public, sk))
}
