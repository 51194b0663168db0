//! Parameter sets for UOV, MQDSS and MQAT.
//!
//! Parameters are plain `Copy` values passed to every constructor, so
//! several security levels can be used side by side in one process.
//!
//! UOV uses `n` variables of which the last `m` are oil variables; the
//! first `v = n - m` are vinegar variables. It produces `m` equations.

use crate::error::{MqError, Result};
use crate::expand::HASH_BYTES;
use crate::field::Field;
use crate::matrix::ut_len;
use crate::packing::packed_len;

/// Target security level λ in bits.
pub const SECURITY_BITS: usize = 128;

/// Maximum number of vinegar trials during UOV signing.
pub const UOV_MAX_TRIALS: u32 = 256;

/// Seed length for MQDSS systems and secret keys, in bytes.
pub const MQDSS_SEED_BYTES: usize = 32;

// ============================================================================
// UOV
// ============================================================================

/// Parameters for the UOV trapdoor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UovParams {
    /// Total number of variables.
    pub n: usize,
    /// Number of oil variables (also the number of equations).
    pub m: usize,
    /// Length of the public seed in bytes.
    pub pk_seed_len: usize,
    /// Length of the secret seed in bytes.
    pub sk_seed_len: usize,
}

impl UovParams {
    /// Creates new parameters with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `m` is zero
    /// - `n < 2m` (UOV requires at least as many vinegar as oil variables)
    /// - either seed length is zero
    pub fn new(n: usize, m: usize, pk_seed_len: usize, sk_seed_len: usize) -> Result<Self> {
        if m == 0 {
            return Err(MqError::InvalidParams {
                reason: "oil count m must be positive",
            });
        }
        if n < 2 * m {
            return Err(MqError::InvalidParams {
                reason: "UOV requires n - m >= m vinegar variables",
            });
        }
        if pk_seed_len == 0 || sk_seed_len == 0 {
            return Err(MqError::InvalidParams {
                reason: "seed lengths must be positive",
            });
        }
        Ok(UovParams {
            n,
            m,
            pk_seed_len,
            sk_seed_len,
        })
    }

    /// Creates parameters without validation (for use with known-good constants).
    #[inline]
    pub const fn new_unchecked(n: usize, m: usize, pk_seed_len: usize, sk_seed_len: usize) -> Self {
        UovParams {
            n,
            m,
            pk_seed_len,
            sk_seed_len,
        }
    }

    /// Number of vinegar variables v = n - m.
    #[inline]
    pub const fn v(&self) -> usize {
        self.n - self.m
    }

    /// Coefficients of one packed vinegar-vinegar block P1.
    #[inline]
    pub const fn p1_len(&self) -> usize {
        ut_len(self.v())
    }

    /// Coefficients of one vinegar-oil block P2 (v×m).
    #[inline]
    pub const fn p2_len(&self) -> usize {
        self.v() * self.m
    }

    /// Coefficients of one packed oil-oil block P3.
    #[inline]
    pub const fn p3_len(&self) -> usize {
        ut_len(self.m)
    }

    /// Total coefficients of the public system:
    /// m·[(n−m)(n−m+1)/2 + (n−m)m + m(m+1)/2].
    #[inline]
    pub const fn system_len(&self) -> usize {
        self.m * (self.p1_len() + self.p2_len() + self.p3_len())
    }

    /// Serialized public key size in bytes (seed_pk ‖ P3).
    #[inline]
    pub const fn public_key_size(&self) -> usize {
        self.pk_seed_len + self.m * self.p3_len()
    }

    /// Serialized secret key size in bytes (seed_sk ‖ seed_pk).
    #[inline]
    pub const fn secret_key_size(&self) -> usize {
        self.sk_seed_len + self.pk_seed_len
    }

    /// Signature size in bytes.
    #[inline]
    pub const fn signature_size(&self) -> usize {
        self.n
    }
}

/// Demo parameters for testing (NOT for production use).
pub const UOV_DEMO: UovParams = UovParams::new_unchecked(24, 8, 16, 32);

/// Level 1 parameters (n=112, m=44).
pub const UOV_L1: UovParams = UovParams::new_unchecked(112, 44, 16, 32);

/// Level 3 parameters (n=244, m=96).
pub const UOV_L3: UovParams = UovParams::new_unchecked(244, 96, 24, 48);

/// Level 5 parameters (n=404, m=160).
pub const UOV_L5: UovParams = UovParams::new_unchecked(404, 160, 32, 64);

// ============================================================================
// MQDSS
// ============================================================================

/// Parameters for the MQDSS Fiat-Shamir signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MqdssParams {
    /// Number of variables.
    pub n: usize,
    /// Number of quadratic forms.
    pub m: usize,
    /// Number of parallel protocol rounds R.
    pub rounds: usize,
}

impl MqdssParams {
    /// Creates new parameters with validation.
    pub fn new(n: usize, m: usize, rounds: usize) -> Result<Self> {
        if n == 0 || m == 0 {
            return Err(MqError::InvalidParams {
                reason: "n and m must be positive",
            });
        }
        if m > n {
            return Err(MqError::InvalidParams {
                reason: "MQDSS requires m <= n",
            });
        }
        if rounds == 0 {
            return Err(MqError::InvalidParams {
                reason: "round count must be positive",
            });
        }
        Ok(MqdssParams { n, m, rounds })
    }

    /// Creates parameters without validation (for use with known-good constants).
    #[inline]
    pub const fn new_unchecked(n: usize, m: usize, rounds: usize) -> Self {
        MqdssParams { n, m, rounds }
    }

    /// Coefficients of the public system: m·n(n+1)/2.
    #[inline]
    pub const fn system_len(&self) -> usize {
        self.m * ut_len(self.n)
    }

    /// Byte length of sigma1 (all t1 then all e1, packed together).
    #[inline]
    pub const fn sigma1_size<F: Field>(&self) -> usize {
        packed_len::<F>(self.rounds * (self.n + self.m))
    }

    /// Byte length of one disclosed round opening (vector plus commitment).
    #[inline]
    pub const fn opening_size<F: Field>(&self) -> usize {
        packed_len::<F>(self.n) + HASH_BYTES
    }

    /// Signature size in bytes: C ‖ σ0 ‖ σ1 ‖ σ2.
    #[inline]
    pub const fn signature_size<F: Field>(&self) -> usize {
        2 * HASH_BYTES + self.sigma1_size::<F>() + self.rounds * self.opening_size::<F>()
    }

    /// Serialized public key size (system seed ‖ packed v).
    #[inline]
    pub const fn public_key_size<F: Field>(&self) -> usize {
        MQDSS_SEED_BYTES + packed_len::<F>(self.m)
    }
}

/// Demo parameters over GF(256) for testing (NOT for production use).
pub const MQDSS_DEMO: MqdssParams = MqdssParams::new_unchecked(24, 8, 32);

/// GF(256) parameters sized to match the MQAT level 1 system (n=156, m=44).
pub const MQDSS_256_L1: MqdssParams = MqdssParams::new_unchecked(156, 44, 150);

/// GF(31) parameters with n = m = 48.
pub const MQDSS_31_48: MqdssParams = MqdssParams::new_unchecked(48, 48, 135);

/// GF(31) parameters with n = m = 64.
pub const MQDSS_31_64: MqdssParams = MqdssParams::new_unchecked(64, 64, 202);

// ============================================================================
// MQAT
// ============================================================================

/// Parameters for the MQAT issuance protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MqatParams {
    /// The issuer's UOV parameters.
    pub uov: UovParams,
    /// MQDSS rounds used for token signatures.
    pub rounds: usize,
    /// Length of the token value t in bytes.
    pub token_len: usize,
    /// Length of the salt in bytes.
    pub salt_len: usize,
    /// Length of the seed deriving the blinding system R.
    pub system_seed_len: usize,
}

impl MqatParams {
    /// Creates new parameters with validation.
    pub fn new(
        uov: UovParams,
        rounds: usize,
        token_len: usize,
        salt_len: usize,
        system_seed_len: usize,
    ) -> Result<Self> {
        UovParams::new(uov.n, uov.m, uov.pk_seed_len, uov.sk_seed_len)?;
        if rounds == 0 {
            return Err(MqError::InvalidParams {
                reason: "round count must be positive",
            });
        }
        if token_len == 0 || salt_len == 0 || system_seed_len == 0 {
            return Err(MqError::InvalidParams {
                reason: "token, salt and seed lengths must be positive",
            });
        }
        Ok(MqatParams {
            uov,
            rounds,
            token_len,
            salt_len,
            system_seed_len,
        })
    }

    /// Creates parameters without validation (for use with known-good constants).
    #[inline]
    pub const fn new_unchecked(
        uov: UovParams,
        rounds: usize,
        token_len: usize,
        salt_len: usize,
        system_seed_len: usize,
    ) -> Self {
        MqatParams {
            uov,
            rounds,
            token_len,
            salt_len,
            system_seed_len,
        }
    }

    /// MQDSS parameters for the blinded system: the issuer's n variables
    /// plus m blinding variables, m forms.
    #[inline]
    pub const fn mqdss(&self) -> MqdssParams {
        MqdssParams::new_unchecked(self.uov.n + self.uov.m, self.uov.m, self.rounds)
    }

    /// Serialized token size in bytes (t ‖ salt ‖ signature).
    #[inline]
    pub const fn token_size<F: Field>(&self) -> usize {
        self.token_len + self.salt_len + self.mqdss().signature_size::<F>()
    }
}

/// Demo parameters for testing (NOT for production use).
pub const MQAT_DEMO: MqatParams = MqatParams::new_unchecked(UOV_DEMO, 32, SECURITY_BITS / 8, 16, 16);

/// Level 1 parameters.
pub const MQAT_L1: MqatParams = MqatParams::new_unchecked(UOV_L1, 150, SECURITY_BITS / 8, 16, 16);
