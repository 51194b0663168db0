//! Finite fields used by the multivariate schemes.
//!
//! - [`Gf256`]: GF(2^8) with the AES polynomial, used by UOV, MQDSS and MQAT.
//! - [`Gf31`]: the prime field Z/31Z, used by the q-ary MQDSS instantiation.
//!
//! Both implement [`Field`], so the quadratic-map evaluator, the linear
//! algebra and MQDSS are written once for either field.

mod gf256;
mod gf31;

pub use gf256::Gf256;
pub use gf31::{mod31, Gf31};

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use zeroize::Zeroize;

use crate::expand;

/// Arithmetic and encoding capabilities shared by the supported fields.
pub trait Field:
    Copy
    + Clone
    + Default
    + Debug
    + PartialEq
    + Eq
    + Zeroize
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
{
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;
    /// Number of elements in the field.
    const ORDER: u16;
    /// Width in bits of one packed element.
    const BITS: u32;

    /// Returns true if this is the zero element.
    fn is_zero(self) -> bool;

    /// Squares the element.
    fn square(self) -> Self;

    /// Multiplicative inverse. Callers must not pass zero.
    fn inverse(self) -> Self;

    /// Maps one uniformly random byte to an element, or `None` when the byte
    /// must be discarded to keep the output uniform.
    fn from_uniform_byte(byte: u8) -> Option<Self>;

    /// Canonical integer representative, as used by the packed encoding.
    fn to_bits(self) -> u8;

    /// Inverse of [`Field::to_bits`]; `None` for out-of-range values.
    fn from_bits(bits: u8) -> Option<Self>;

    /// Derives the coefficients of a public quadratic system from a seed.
    fn expand_system(parts: &[&[u8]], len: usize) -> Vec<Self> {
        expand::expand_public(parts, len)
    }
}
