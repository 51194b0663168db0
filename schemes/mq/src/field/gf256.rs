//! GF(2^8) arithmetic using the AES polynomial x^8 + x^4 + x^3 + x + 1 (0x11B).

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use zeroize::Zeroize;

use super::Field;

/// An element of the finite field GF(2^8).
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash, Zeroize)]
pub struct Gf256(pub u8);

impl Gf256 {
    /// Creates a new field element from a byte.
    #[inline]
    pub const fn new(val: u8) -> Self {
        Gf256(val)
    }

    /// Returns the underlying byte value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Squaring is GF(2)-linear, so each input bit maps to a fixed byte:
    /// bits 0..3 land on the even positions 0..6, bits 4..7 on the
    /// reductions of x^8, x^10, x^12 and x^14.
    #[inline]
    fn square_linear(a: u8) -> u8 {
        let mut r = a & 1;
        r ^= (a << 1) & (1 << 2);
        r ^= (a << 2) & (1 << 4);
        r ^= (a << 3) & (1 << 6);

        r ^= ((a >> 4) & 1) * 0x1b;
        r ^= ((a >> 5) & 1) * (0x1b << 2);
        r ^= ((a >> 6) & 1) * 0xab;
        r ^= ((a >> 7) & 1) * 0x9a;
        r
    }
}

impl Field for Gf256 {
    const ZERO: Gf256 = Gf256(0);
    const ONE: Gf256 = Gf256(1);
    const ORDER: u16 = 256;
    const BITS: u32 = 8;

    #[inline]
    fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    fn square(self) -> Gf256 {
        Gf256(Self::square_linear(self.0))
    }

    /// Computes a^254 = a^-1 with seven squarings and four multiplications:
    /// squarings give a^2, a^4, a^8; a^6 = a^4·a^2; a^14 = a^6·a^8;
    /// three squarings give a^112; a^126 = a^112·a^14; one squaring gives
    /// a^252; a^254 = a^252·a^2.
    ///
    /// Returns zero for zero input.
    #[inline]
    fn inverse(self) -> Gf256 {
        let a2 = self.square();
        let a4 = a2.square();
        let a8 = a4.square();
        let a6 = a4 * a2;
        let a14 = a6 * a8;
        let a112 = a14.square().square().square();
        let a126 = a112 * a14;
        let a252 = a126.square();
        a2 * a252
    }

    #[inline]
    fn from_uniform_byte(byte: u8) -> Option<Gf256> {
        Some(Gf256(byte))
    }

    #[inline]
    fn to_bits(self) -> u8 {
        self.0
    }

    #[inline]
    fn from_bits(bits: u8) -> Option<Gf256> {
        Some(Gf256(bits))
    }
}

/// Addition in GF(2^8) is XOR.
#[allow(clippy::suspicious_arithmetic_impl)]
impl Add for Gf256 {
    type Output = Gf256;

    #[inline]
    fn add(self, rhs: Gf256) -> Gf256 {
        Gf256(self.0 ^ rhs.0)
    }
}

#[allow(clippy::suspicious_op_assign_impl)]
impl AddAssign for Gf256 {
    #[inline]
    fn add_assign(&mut self, rhs: Gf256) {
        self.0 ^= rhs.0;
    }
}

/// Subtraction in GF(2^8) is the same as addition (XOR).
#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Gf256 {
    type Output = Gf256;

    #[inline]
    fn sub(self, rhs: Gf256) -> Gf256 {
        Gf256(self.0 ^ rhs.0)
    }
}

#[allow(clippy::suspicious_op_assign_impl)]
impl SubAssign for Gf256 {
    #[inline]
    fn sub_assign(&mut self, rhs: Gf256) {
        self.0 ^= rhs.0;
    }
}

/// Every element is its own additive inverse.
impl Neg for Gf256 {
    type Output = Gf256;

    #[inline]
    fn neg(self) -> Gf256 {
        self
    }
}

/// Multiplication by repeated doubling with reduction by 0x11B.
///
/// Always runs 8 iterations and uses masks instead of data-dependent branches.
impl Mul for Gf256 {
    type Output = Gf256;

    #[inline]
    fn mul(self, rhs: Gf256) -> Gf256 {
        let mut result = 0u8;
        let mut a = self.0;
        let mut b = rhs.0;

        for _ in 0..8 {
            let mask = 0u8.wrapping_sub(b & 1);
            result ^= a & mask;

            let high_bit_mask = 0u8.wrapping_sub((a >> 7) & 1);
            a = (a << 1) ^ (0x1b & high_bit_mask);

            b >>= 1;
        }

        Gf256(result)
    }
}

impl MulAssign for Gf256 {
    #[inline]
    fn mul_assign(&mut self, rhs: Gf256) {
        *self = *self * rhs;
    }
}

impl From<u8> for Gf256 {
    #[inline]
    fn from(val: u8) -> Self {
        Gf256(val)
    }
}

impl From<Gf256> for u8 {
    #[inline]
    fn from(f: Gf256) -> u8 {
        f.0
    }
}
