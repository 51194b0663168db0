//! MQAT: anonymous token issuance from UOV and MQDSS.
//!
//! The issuer holds a UOV key pair (public map P in n variables) and
//! publishes a random blinding system R with m forms in m variables. A token
//! is bound to the value w = H(t ‖ salt):
//!
//! 1. [`user0`]: the user samples t, salt and a blinding vector z*, and sends
//!    the blinded target w̃ = w − R(z*).
//! 2. [`sign0`]: the issuer returns a UOV preimage y of w̃, so P(y) = w̃.
//! 3. [`user1`]: the user checks P(y) + R(z*) = w. Then x = y ‖ z* is a
//!    preimage of w under the blinded map B(x) = P(x_P) + R(x_R), and the user
//!    signs w with MQDSS over B using x as the secret.
//! 4. [`verify`]: anyone holding the issuer's public key recomputes w and
//!    checks the MQDSS signature against (B, w).
//!
//! The issuer sees only w̃ and never learns t, salt, w or z*.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{check_len, MqError, Result, VerificationFailure};
use crate::expand::{expand_secret, random_seed};
use crate::field::Gf256;
use crate::mq::{DenseSystem, QuadraticMap};
use crate::mqdss;
use crate::params::MqatParams;
use crate::uov;

/// Length of the seed z* is expanded from.
const BLINDING_SEED_BYTES: usize = 32;

/// Issuer public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// Parameter set.
    pub params: MqatParams,
    /// The issuer's UOV public key.
    pub uov: uov::PublicKey,
    /// Seed from which the blinding system R is expanded.
    pub system_seed: Vec<u8>,
    /// The blinding system R (m forms in m variables).
    pub blinding: DenseSystem<Gf256>,
}

impl PublicKey {
    /// The blinded system B(x) = P(x[..n]) + R(x[n..]) that tokens are
    /// signed over.
    pub fn blinded_system(&self) -> BlindedSystem<'_> {
        BlindedSystem {
            issuer: &self.uov,
            blinding: &self.blinding,
        }
    }

    /// Serializes the key as UOV public key ‖ system seed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.uov.to_bytes();
        bytes.extend_from_slice(&self.system_seed);
        bytes
    }

    /// Deserializes a key, re-expanding R from its seed.
    pub fn from_bytes(params: MqatParams, bytes: &[u8]) -> Result<Self> {
        let uov_len = params.uov.public_key_size();
        if bytes.len() != uov_len + params.system_seed_len {
            return Err(MqError::DecodingError {
                context: "MQAT public key length",
            });
        }
        let (uov_bytes, system_seed) = bytes.split_at(uov_len);
        Ok(PublicKey {
            params,
            uov: uov::PublicKey::from_bytes(params.uov, uov_bytes)?,
            system_seed: system_seed.to_vec(),
            blinding: blinding_system(&params, system_seed),
        })
    }
}

/// Issuer secret key.
#[derive(Clone, Debug)]
pub struct SecretKey {
    /// The issuer's UOV secret key.
    pub uov: uov::SecretKey,
}

/// The map B(x) = P(x[..n]) + R(x[n..]) in n + m variables.
#[derive(Clone, Copy, Debug)]
pub struct BlindedSystem<'a> {
    issuer: &'a uov::PublicKey,
    blinding: &'a DenseSystem<Gf256>,
}

impl QuadraticMap for BlindedSystem<'_> {
    type Elem = Gf256;

    fn num_vars(&self) -> usize {
        self.issuer.num_vars() + self.blinding.num_vars()
    }

    fn num_forms(&self) -> usize {
        self.issuer.num_forms()
    }

    fn eval(&self, x: &[Gf256]) -> Result<Vec<Gf256>> {
        check_len("BlindedSystem::eval", self.num_vars(), x.len())?;
        let (x_p, x_r) = x.split_at(self.issuer.num_vars());
        let p = self.issuer.eval(x_p)?;
        let r = self.blinding.eval(x_r)?;
        Ok(p.into_iter().zip(r).map(|(a, b)| a + b).collect())
    }
}

/// Client state kept between [`user0`] and [`user1`]. Never sent.
///
/// # Security
///
/// This struct implements `Drop` to zeroize the blinding vector and the
/// token value.
#[derive(Clone, Debug)]
pub struct Session {
    /// The token value t.
    pub t: Vec<u8>,
    /// The salt.
    pub salt: Vec<u8>,
    /// The committed value w = H(t ‖ salt).
    pub w: Vec<Gf256>,
    /// The blinding vector z*.
    pub z_star: Vec<Gf256>,
}

impl Drop for Session {
    fn drop(&mut self) {
        self.t.zeroize();
        self.salt.zeroize();
        self.w.zeroize();
        self.z_star.zeroize();
    }
}

/// The blinded query sent to the issuer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    /// w̃ = w − R(z*) as an m-byte UOV target.
    pub blinded: Vec<u8>,
}

/// The issuer's answer: a UOV signature on the blinded query.
pub type Response = uov::Signature;

/// An issued token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The token value t.
    pub t: Vec<u8>,
    /// The salt.
    pub salt: Vec<u8>,
    /// MQDSS signature on w over the blinded system.
    pub signature: mqdss::Signature<Gf256>,
}

impl Token {
    /// Serializes the token.
    ///
    /// Format: t ‖ salt ‖ MQDSS signature
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.t.len() + self.salt.len());
        bytes.extend_from_slice(&self.t);
        bytes.extend_from_slice(&self.salt);
        bytes.extend(self.signature.to_bytes());
        bytes
    }

    /// Deserializes a token for the given parameters.
    pub fn from_bytes(params: &MqatParams, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.token_size::<Gf256>() {
            return Err(MqError::DecodingError {
                context: "MQAT token length",
            });
        }
        let (t, rest) = bytes.split_at(params.token_len);
        let (salt, sig) = rest.split_at(params.salt_len);
        Ok(Token {
            t: t.to_vec(),
            salt: salt.to_vec(),
            signature: mqdss::Signature::from_bytes(&params.mqdss(), sig)?,
        })
    }
}

/// The value a token is bound to: w = H(t ‖ salt) as m field elements.
pub fn commitment_value(params: &MqatParams, t: &[u8], salt: &[u8]) -> Vec<Gf256> {
    expand_secret(&[t, salt], params.uov.m)
}

fn blinding_system(params: &MqatParams, seed: &[u8]) -> DenseSystem<Gf256> {
    DenseSystem::from_seed(seed, params.uov.m, params.uov.m)
}

/// Generates the issuer's key pair.
///
/// # Errors
/// Returns [`MqError::InvalidParams`] for inconsistent parameters and
/// [`MqError::RandomnessFailure`] if the generator fails.
pub fn keygen<R: RngCore + CryptoRng>(
    rng: &mut R,
    params: MqatParams,
) -> Result<(PublicKey, SecretKey)> {
    let params = MqatParams::new(
        params.uov,
        params.rounds,
        params.token_len,
        params.salt_len,
        params.system_seed_len,
    )?;

    let (uov_pk, uov_sk) = uov::keygen(rng, params.uov)?;
    let system_seed = random_seed(rng, params.system_seed_len)?;

    log::debug!(
        "generated MQAT issuer key (n={}, m={}, R={})",
        params.uov.n,
        params.uov.m,
        params.rounds
    );

    let pk = PublicKey {
        params,
        uov: uov_pk,
        blinding: blinding_system(&params, &system_seed),
        system_seed,
    };
    Ok((pk, SecretKey { uov: uov_sk }))
}

/// Starts an issuance session: samples t, salt and z*, and blinds w.
///
/// Returns the private [`Session`] and the [`Query`] to send to the issuer.
pub fn user0<R: RngCore + CryptoRng>(rng: &mut R, pk: &PublicKey) -> Result<(Session, Query)> {
    let params = &pk.params;

    let t = random_seed(rng, params.token_len)?;
    let salt = random_seed(rng, params.salt_len)?;
    let w = commitment_value(params, &t, &salt);

    let mut z_seed = random_seed(rng, BLINDING_SEED_BYTES)?;
    let z_star: Vec<Gf256> = expand_secret(&[&z_seed], params.uov.m);
    z_seed.zeroize();

    let w_star = pk.blinding.eval(&z_star)?;
    let blinded = w.iter().zip(&w_star).map(|(&a, &b)| (a - b).value()).collect();

    let session = Session { t, salt, w, z_star };
    Ok((session, Query { blinded }))
}

/// Issuer step: signs the blinded query with UOV.
pub fn sign0(sk: &SecretKey, query: &Query) -> Result<Response> {
    uov::sign(&sk.uov, &query.blinded)
}

/// Finishes a session: unblinds the response and signs w.
///
/// # Errors
/// Returns [`MqError::ProtocolBindingFailure`] if the response does not map
/// back to the session's w. The session must then be restarted from
/// [`user0`].
pub fn user1(pk: &PublicKey, session: &Session, response: &Response) -> Result<Token> {
    let params = &pk.params;
    if response.x.len() != params.uov.n {
        log::warn!(
            "MQAT response has {} elements, expected {}",
            response.x.len(),
            params.uov.n
        );
        return Err(MqError::ProtocolBindingFailure);
    }

    let mut secret = response.x.clone();
    secret.extend_from_slice(&session.z_star);

    let system = pk.blinded_system();
    let image = system.eval(&secret)?;
    let diff = image
        .iter()
        .zip(&session.w)
        .fold(0u8, |acc, (a, b)| acc | (*a - *b).value());
    if diff != 0 {
        secret.zeroize();
        log::warn!("MQAT issuer response does not unblind to the committed value");
        return Err(MqError::ProtocolBindingFailure);
    }

    let sk = mqdss::SecretKey::from_preimage(params.mqdss(), system, secret)?;
    let signature = mqdss::sign(&sk, &token_message(&session.w))?;

    Ok(Token {
        t: session.t.clone(),
        salt: session.salt.clone(),
        signature,
    })
}

/// Verifies a token against the issuer's public key.
pub fn verify(pk: &PublicKey, token: &Token) -> Result<()> {
    let params = &pk.params;
    if token.t.len() != params.token_len || token.salt.len() != params.salt_len {
        return Err(MqError::VerificationFailed(
            VerificationFailure::InvalidLength,
        ));
    }

    let w = commitment_value(params, &token.t, &token.salt);
    let message = token_message(&w);
    let mqdss_pk = mqdss::PublicKey::new(params.mqdss(), pk.blinded_system(), w)?;
    mqdss::verify(&mqdss_pk, &message, &token.signature)
}

/// Verifies a token, returning a boolean.
pub fn verify_bool(pk: &PublicKey, token: &Token) -> bool {
    verify(pk, token).is_ok()
}

/// The MQDSS message for a token: the bytes of w.
fn token_message(w: &[Gf256]) -> Vec<u8> {
    w.iter().map(|e| e.value()).collect()
}
