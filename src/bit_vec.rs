use bitvec::prelude::*;

use crate::error::{HuffmanError, Result};

/// Bit order used for every code and payload: first bit in the high bit.
pub type Bits = BitVec<u8, Msb0>;
pub type BitsRef = BitSlice<u8, Msb0>;

/// Code bits packed eight to a byte, with the exact number of meaningful
/// bits kept alongside.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    bits: Bits,
}

impl PackedBits {
    pub fn new() -> Self {
        PackedBits { bits: Bits::new() }
    }

    pub fn with_capacity(bit_count: usize) -> Self {
        PackedBits {
            bits: Bits::with_capacity(bit_count),
        }
    }

    /// Rebuild from packed bytes. Bits past `bit_count` are padding and are
    /// dropped.
    pub fn from_bytes(bytes: Vec<u8>, bit_count: usize) -> Result<Self> {
        if bytes.len() != packed_len(bit_count) {
            return Err(HuffmanError::malformed(format!(
                "{} payload bits need {} bytes, found {}",
                bit_count,
                packed_len(bit_count),
                bytes.len()
            )));
        }
        let mut bits = Bits::from_vec(bytes);
        bits.truncate(bit_count);
        Ok(PackedBits { bits })
    }

    pub fn push_code(&mut self, code: &BitsRef) {
        self.bits.extend_from_bitslice(code);
    }

    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    pub fn as_bitslice(&self) -> &BitsRef {
        &self.bits
    }

    /// Packed bytes with the padding in the last byte zeroed.
    pub fn to_bytes(&self) -> Vec<u8> {
        to_packed_bytes(&self.bits)
    }
}

/// Number of bytes needed to hold `bit_count` bits.
pub fn packed_len(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

pub(crate) fn to_packed_bytes(bits: &BitsRef) -> Vec<u8> {
    let mut bytes = vec![0u8; packed_len(bits.len())];
    bytes.view_bits_mut::<Msb0>()[..bits.len()].copy_from_bitslice(bits);
    bytes
}
