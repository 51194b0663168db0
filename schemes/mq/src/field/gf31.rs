//! Arithmetic in the prime field Z/31Z.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use zeroize::Zeroize;

use super::Field;
use crate::expand;

const Q: u16 = 31;

/// Reduces `x` modulo 31.
///
/// Since 32 = 1 (mod 31), summing the 5-bit digits of `x` preserves its
/// residue; two more folds bring the sum below 32 and 31 itself maps to 0.
#[inline]
pub fn mod31(mut x: u16) -> u8 {
    let mut t = x & Q;
    x >>= 5;
    t += x & Q;
    x >>= 5;
    t += x & Q;
    x >>= 5;
    t += x & Q;
    t = (t >> 5) + (t & Q);
    t = (t >> 5) + (t & Q);
    if t == Q {
        0
    } else {
        t as u8
    }
}

/// An element of GF(31), stored as its representative in `0..31`.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash, Zeroize)]
pub struct Gf31(u8);

impl Gf31 {
    /// Creates an element from any byte, reducing modulo 31.
    #[inline]
    pub fn new(val: u8) -> Self {
        Gf31(mod31(val as u16))
    }

    /// Returns the representative in `0..31`.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Lifts a signed coefficient (any `i8`) into the field.
    #[inline]
    pub fn from_signed(val: i8) -> Self {
        let shifted = val as i16 + 31 * 5;
        Gf31(mod31(shifted as u16))
    }

    /// Returns the centred representative in `[-15, 15]`.
    #[inline]
    pub fn centered(self) -> i8 {
        if self.0 > 15 {
            self.0 as i8 - 31
        } else {
            self.0 as i8
        }
    }
}

impl Field for Gf31 {
    const ZERO: Gf31 = Gf31(0);
    const ONE: Gf31 = Gf31(1);
    const ORDER: u16 = Q;
    const BITS: u32 = 5;

    #[inline]
    fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    fn square(self) -> Gf31 {
        self * self
    }

    /// a^29 = a^-1 by Fermat; 29 = 16 + 8 + 4 + 1.
    #[inline]
    fn inverse(self) -> Gf31 {
        let a2 = self.square();
        let a4 = a2.square();
        let a8 = a4.square();
        let a16 = a8.square();
        a16 * a8 * a4 * self
    }

    #[inline]
    fn from_uniform_byte(byte: u8) -> Option<Gf31> {
        let low = byte & Q as u8;
        if low == Q as u8 {
            None
        } else {
            Some(Gf31(low))
        }
    }

    #[inline]
    fn to_bits(self) -> u8 {
        self.0
    }

    #[inline]
    fn from_bits(bits: u8) -> Option<Gf31> {
        if (bits as u16) < Q {
            Some(Gf31(bits))
        } else {
            None
        }
    }

    /// Public systems over GF(31) are sampled as centred coefficients.
    fn expand_system(parts: &[&[u8]], len: usize) -> Vec<Gf31> {
        expand::expand_signed_gf31(parts, len)
            .into_iter()
            .map(Gf31::from_signed)
            .collect()
    }
}

impl Add for Gf31 {
    type Output = Gf31;

    #[inline]
    fn add(self, rhs: Gf31) -> Gf31 {
        Gf31(mod31(self.0 as u16 + rhs.0 as u16))
    }
}

impl AddAssign for Gf31 {
    #[inline]
    fn add_assign(&mut self, rhs: Gf31) {
        *self = *self + rhs;
    }
}

impl Sub for Gf31 {
    type Output = Gf31;

    #[inline]
    fn sub(self, rhs: Gf31) -> Gf31 {
        Gf31(mod31(self.0 as u16 + Q - rhs.0 as u16))
    }
}

impl SubAssign for Gf31 {
    #[inline]
    fn sub_assign(&mut self, rhs: Gf31) {
        *self = *self - rhs;
    }
}

impl Neg for Gf31 {
    type Output = Gf31;

    #[inline]
    fn neg(self) -> Gf31 {
        Gf31::ZERO - self
    }
}

impl Mul for Gf31 {
    type Output = Gf31;

    #[inline]
    fn mul(self, rhs: Gf31) -> Gf31 {
        Gf31(mod31(self.0 as u16 * rhs.0 as u16))
    }
}

impl MulAssign for Gf31 {
    #[inline]
    fn mul_assign(&mut self, rhs: Gf31) {
        *self = *self * rhs;
    }
}
