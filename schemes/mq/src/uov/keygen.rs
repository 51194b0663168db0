//! UOV key generation.
//!
//! The secret oil space O is expanded from `seed_sk`, the public blocks P1
//! and P2 from `seed_pk`. From these the signer derives
//!
//! - S_k = (P1_k + P1_kᵗ)·O + P2_k, the linear map used while signing, and
//! - P3_k = Upper(Oᵗ·P1_k·O + Oᵗ·P2_k), the oil-oil block that makes P
//!   vanish on the oil subspace.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::{PublicKey, SecretKey};
use crate::error::{MqError, Result};
use crate::expand::{expand_public, expand_secret, random_seed};
use crate::field::Gf256;
use crate::matrix::{add, mul, Matrix, MatrixRef, View, ViewMut};
use crate::params::UovParams;

/// Generates a fresh UOV key pair.
///
/// # Arguments
/// * `rng` - Cryptographically secure random number generator
/// * `params` - Parameter set
///
/// # Errors
/// Returns [`MqError::InvalidParams`] for inconsistent parameters and
/// [`MqError::RandomnessFailure`] if the generator fails.
pub fn keygen<R: RngCore + CryptoRng>(
    rng: &mut R,
    params: UovParams,
) -> Result<(PublicKey, SecretKey)> {
    let params = UovParams::new(params.n, params.m, params.pk_seed_len, params.sk_seed_len)?;

    let mut seed_sk = random_seed(rng, params.sk_seed_len)?;
    let seed_pk = random_seed(rng, params.pk_seed_len)?;

    let keys = expand_keypair(params, &seed_sk, &seed_pk);
    seed_sk.zeroize();
    keys
}

/// Deterministically derives a key pair from its two seeds.
pub fn expand_keypair(
    params: UovParams,
    seed_sk: &[u8],
    seed_pk: &[u8],
) -> Result<(PublicKey, SecretKey)> {
    if seed_sk.len() != params.sk_seed_len {
        return Err(MqError::InvalidInput {
            field: "seed_sk",
            reason: "length does not match parameters",
        });
    }
    if seed_pk.len() != params.pk_seed_len {
        return Err(MqError::InvalidInput {
            field: "seed_pk",
            reason: "length does not match parameters",
        });
    }

    let (v, m) = (params.v(), params.m);
    let (p1, p2) = expand_public_blocks(&params, seed_pk);
    let o = Matrix::from_vec(v, m, expand_secret(&[seed_sk], v * m))?;

    let mut s = Vec::with_capacity(m);
    let mut p3 = vec![Gf256(0); m * params.p3_len()];

    for (k, p3_k) in p3.chunks_exact_mut(params.p3_len()).enumerate() {
        let p1_k = View::upper_triangular(v, &p1[k * params.p1_len()..(k + 1) * params.p1_len()])?;
        let p2_k = View::dense(v, m, &p2[k * params.p2_len()..(k + 1) * params.p2_len()])?;

        s.push(derive_s(&p1_k, &p2_k, &o)?);
        derive_p3(&p1_k, &p2_k, &o, ViewMut::upper_triangular(m, p3_k)?)?;
    }

    log::debug!("expanded UOV key pair (n={}, m={})", params.n, params.m);

    let pk = PublicKey {
        params,
        seed_pk: seed_pk.to_vec(),
        p1: p1.clone(),
        p2,
        p3,
    };
    let sk = SecretKey {
        params,
        seed_sk: seed_sk.to_vec(),
        seed_pk: seed_pk.to_vec(),
        o,
        s,
        p1,
    };
    Ok((pk, sk))
}

/// Expands P1 and P2 for all m forms from the public seed.
pub(crate) fn expand_public_blocks(
    params: &UovParams,
    seed_pk: &[u8],
) -> (Vec<Gf256>, Vec<Gf256>) {
    let p1_total = params.m * params.p1_len();
    let mut p1 = expand_public(&[seed_pk], p1_total + params.m * params.p2_len());
    let p2 = p1.split_off(p1_total);
    (p1, p2)
}

/// S = (P1 + P1ᵗ)·O + P2.
fn derive_s(
    p1: &View<'_, Gf256>,
    p2: &View<'_, Gf256>,
    o: &Matrix<Gf256>,
) -> Result<Matrix<Gf256>> {
    let sym = add(p1, &p1.t())?;
    add(&mul(&sym, o)?, p2)
}

/// Writes Upper(Oᵗ·P1·O + Oᵗ·P2) into `out`.
///
/// Upper folds the strictly lower triangle onto the upper one, so that
/// yᵗ·Upper(M)·y = yᵗ·M·y for every y.
fn derive_p3(
    p1: &View<'_, Gf256>,
    p2: &View<'_, Gf256>,
    o: &Matrix<Gf256>,
    mut out: ViewMut<'_, Gf256>,
) -> Result<()> {
    let ot = o.t();
    let full = add(&mul(&mul(&ot, p1)?, o)?, &mul(&ot, p2)?)?;

    let (rows, _) = full.dims();
    for i in 0..rows {
        out.set(i, i, full.at(i, i))?;
        for j in i + 1..rows {
            out.set(i, j, full.at(i, j) + full.at(j, i))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::expand_public;
    use crate::matrix::{mul_vec, quadratic_form, vec_mul};
    use crate::mq::QuadraticMap;
    use crate::params::UOV_DEMO;

    fn demo_keys() -> (PublicKey, SecretKey) {
        expand_keypair(UOV_DEMO, &[7u8; 32], &[3u8; 16]).unwrap()
    }

    #[test]
    fn test_expand_keypair_deterministic() {
        let (pk1, sk1) = demo_keys();
        let (pk2, sk2) = demo_keys();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1.o, sk2.o);
        assert_eq!(sk1.s, sk2.s);
    }

    #[test]
    fn test_expand_keypair_rejects_seed_lengths() {
        assert!(expand_keypair(UOV_DEMO, &[0u8; 31], &[0u8; 16]).is_err());
        assert!(expand_keypair(UOV_DEMO, &[0u8; 32], &[0u8; 17]).is_err());
    }

    #[test]
    fn test_key_shapes() {
        let (pk, sk) = demo_keys();
        assert_eq!(pk.p1.len(), UOV_DEMO.m * UOV_DEMO.p1_len());
        assert_eq!(pk.p2.len(), UOV_DEMO.m * UOV_DEMO.p2_len());
        assert_eq!(pk.p3.len(), UOV_DEMO.m * UOV_DEMO.p3_len());
        assert_eq!(sk.o.dims(), (UOV_DEMO.v(), UOV_DEMO.m));
        assert_eq!(sk.s.len(), UOV_DEMO.m);
        assert_eq!(pk.p1, sk.p1);
    }

    #[test]
    fn test_public_map_vanishes_on_oil_space() {
        let (pk, sk) = demo_keys();
        let basis = sk.oil_basis();
        for s in 0u8..16 {
            let y: Vec<Gf256> = expand_public(&[b"oil", &[s]], UOV_DEMO.m);
            let x = mul_vec(&basis, &y).unwrap();
            assert_eq!(pk.eval(&x).unwrap(), vec![Gf256(0); UOV_DEMO.m]);
        }
    }

    #[test]
    fn test_s_linearizes_vinegar_shift() {
        // P((v, 0) + (O·y, y)) - P(v, 0) = vᵗ·S·y
        let (pk, sk) = demo_keys();
        let (v, m) = (UOV_DEMO.v(), UOV_DEMO.m);
        let vin: Vec<Gf256> = expand_public(&[b"vinegar"], v);
        let y: Vec<Gf256> = expand_public(&[b"oil"], m);

        let mut base = vin.clone();
        base.resize(UOV_DEMO.n, Gf256(0));
        let oil_point = mul_vec(&sk.oil_basis(), &y).unwrap();
        let shifted: Vec<Gf256> = base.iter().zip(&oil_point).map(|(&a, &b)| a + b).collect();

        let lhs = pk.eval(&shifted).unwrap();
        let f_base = pk.eval(&base).unwrap();
        for k in 0..m {
            let linear = crate::matrix::dot(&vec_mul(&vin, &sk.s[k]).unwrap(), &y).unwrap();
            assert_eq!(lhs[k] - f_base[k], linear);
            assert_eq!(
                f_base[k],
                quadratic_form(&sk.p1_block(k).unwrap(), &vin).unwrap()
            );
        }
    }

    #[test]
    fn test_keygen_random_keys_differ() {
        let mut rng = rand::rngs::OsRng;
        let (pk1, _) = keygen(&mut rng, UOV_DEMO).unwrap();
        let (pk2, _) = keygen(&mut rng, UOV_DEMO).unwrap();
        assert_ne!(pk1.seed_pk, pk2.seed_pk);
    }

    #[test]
    fn test_keygen_rejects_bad_params() {
        let bad = UovParams::new_unchecked(10, 8, 16, 32);
        assert!(matches!(
            keygen(&mut rand::rngs::OsRng, bad),
            Err(MqError::InvalidParams { .. })
        ));
    }
}
