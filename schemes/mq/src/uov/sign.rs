//! UOV signing.
//!
//! For a target t the signer fixes vinegar values v, which turns P into an
//! affine map on the oil subspace:
//!
//! P(v + O·x, x) = vᵗ·P1·v + (vᵗ·S)·x
//!
//! so x solves the m×m system L·x = t - vᵗ·P1·v with rows L_k = vᵗ·S_k. When
//! L is singular another vinegar vector is tried.
//!
//! Vinegar is derived from (t, seed_sk, ctr), so signing is deterministic
//! and needs no RNG.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use zeroize::Zeroize;

use super::{SecretKey, Signature};
use crate::error::{MqError, Result};
use crate::expand::expand_secret;
use crate::field::Gf256;
use crate::matrix::{mul_vec, quadratic_form, solve, vec_mul, Matrix};
use crate::params::UOV_MAX_TRIALS;

/// Signs an m-byte target.
///
/// # Arguments
/// * `sk` - Secret key
/// * `target` - Exactly m bytes, e.g. the output of [`super::hash_message`]
///
/// # Returns
/// A preimage x with P(x) = target.
///
/// # Errors
/// Returns [`MqError::SigningFailed`] if all vinegar trials give a
/// singular system.
pub fn sign(sk: &SecretKey, target: &[u8]) -> Result<Signature> {
    if target.len() != sk.params.m {
        return Err(MqError::InvalidInput {
            field: "target",
            reason: "must be exactly m bytes",
        });
    }
    let t: Vec<Gf256> = target.iter().map(|&b| Gf256(b)).collect();

    #[cfg(not(feature = "parallel"))]
    let found = (0..UOV_MAX_TRIALS)
        .map(|ctr| (ctr, try_vinegar(sk, target, &t, ctr)))
        .find(|(_, r)| !matches!(r, Err(MqError::SingularSystem)));

    #[cfg(feature = "parallel")]
    let found = (0..UOV_MAX_TRIALS)
        .into_par_iter()
        .map(|ctr| (ctr, try_vinegar(sk, target, &t, ctr)))
        .find_first(|(_, r)| !matches!(r, Err(MqError::SingularSystem)));

    match found {
        Some((ctr, Ok(x))) => {
            log::debug!("UOV signature found after {} attempt(s)", ctr + 1);
            Ok(Signature { x })
        }
        Some((_, Err(e))) => Err(e),
        None => {
            log::warn!("UOV signing gave up after {} vinegar trials", UOV_MAX_TRIALS);
            Err(MqError::SigningFailed {
                attempts: UOV_MAX_TRIALS,
            })
        }
    }
}

/// One signing attempt with the vinegar vector selected by `ctr`.
fn try_vinegar(sk: &SecretKey, target: &[u8], t: &[Gf256], ctr: u32) -> Result<Vec<Gf256>> {
    let (v, m) = (sk.params.v(), sk.params.m);
    let mut vinegar: Vec<Gf256> = expand_secret(&[target, &sk.seed_sk, &[ctr as u8]], v);

    let mut rows = Vec::with_capacity(m * m);
    let mut rhs = Vec::with_capacity(m);
    for k in 0..m {
        rows.extend(vec_mul(&vinegar, &sk.s[k])?);
        rhs.push(t[k] - quadratic_form(&sk.p1_block(k)?, &vinegar)?);
    }
    let mut l = Matrix::from_vec(m, m, rows)?;

    let solved = solve(&l, &rhs);
    l.zeroize();
    let oil = match solved {
        Ok(oil) => oil,
        Err(e) => {
            vinegar.zeroize();
            return Err(e);
        }
    };

    let shift = mul_vec(&sk.o, &oil)?;
    let mut x: Vec<Gf256> = vinegar.iter().zip(&shift).map(|(&a, &b)| a + b).collect();
    x.extend_from_slice(&oil);
    vinegar.zeroize();
    Ok(x)
}
