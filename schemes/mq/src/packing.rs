//! Fixed-width packing of field-element vectors.
//!
//! Elements are written least-significant bit first, `F::BITS` bits each,
//! into a little-endian bit stream padded with zero bits to a whole byte.
//! For GF(256) this is one byte per element; for GF(31) it is 5 bits.

use crate::error::{MqError, Result};
use crate::field::Field;

/// Number of bytes needed to pack `count` elements.
#[inline]
pub const fn packed_len<F: Field>(count: usize) -> usize {
    (count * F::BITS as usize + 7) / 8
}

/// Packs `elems` into bytes.
pub fn pack<F: Field>(elems: &[F]) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed_len::<F>(elems.len()));
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;

    for &e in elems {
        acc |= (e.to_bits() as u32) << acc_bits;
        acc_bits += F::BITS;
        while acc_bits >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push(acc as u8);
    }
    out
}

/// Unpacks exactly `count` elements from `bytes`.
///
/// Rejects inputs of the wrong length, out-of-range element values and
/// non-zero padding bits, so every accepted encoding is canonical.
pub fn unpack<F: Field>(bytes: &[u8], count: usize) -> Result<Vec<F>> {
    if bytes.len() != packed_len::<F>(count) {
        return Err(MqError::DecodingError {
            context: "packed vector length",
        });
    }

    let mask: u32 = (1 << F::BITS) - 1;
    let mut out = Vec::with_capacity(count);
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;
    let mut iter = bytes.iter();

    while out.len() < count {
        while acc_bits < F::BITS {
            let byte = iter.next().ok_or(MqError::DecodingError {
                context: "packed vector truncated",
            })?;
            acc |= (*byte as u32) << acc_bits;
            acc_bits += 8;
        }
        let elem = F::from_bits((acc & mask) as u8).ok_or(MqError::DecodingError {
            context: "field element out of range",
        })?;
        out.push(elem);
        acc >>= F::BITS;
        acc_bits -= F::BITS;
    }

    if acc != 0 {
        return Err(MqError::DecodingError {
            context: "non-zero padding bits",
        });
    }
    Ok(out)
}
