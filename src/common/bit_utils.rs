use std::{fmt::Display, mem};

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

/// Bits packed most significant first, bounded by a capacity fixed at creation. Iterating
/// consumes bits from the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    bytes: Vec<u8>,
    len: usize,
    capacity: usize,
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { bytes: Vec::with_capacity((capacity + 7) >> 3), len: 0, capacity, cursor: 0 }
    }

    #[cfg(test)]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len() << 3;
        Self { bytes: bytes.to_vec(), len, capacity: len, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Codewords written so far, last one zero padded
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends the low `size` bits of `bits`.
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        debug_assert!(
            size >= mem::size_of::<T>() * 8 - bits.leading_zeros() as usize,
            "Bits don't fit in bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            let bit = !((bits >> i) & T::one()).is_zero();
            let offset = self.len & 7;
            if offset == 0 {
                self.bytes.push(0);
            }
            if let (true, Some(last)) = (bit, self.bytes.last_mut()) {
                *last |= 0x80 >> offset;
            }
            self.len += 1;
        }
    }

    /// Appends whole codewords. The stream must be byte aligned.
    pub fn extend(&mut self, codewords: &[u8]) {
        debug_assert!((self.len & 7) == 0, "Stream isn't byte aligned: Length {}", self.len);
        debug_assert!(
            self.len + (codewords.len() << 3) <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + (codewords.len() << 3)
        );
        self.bytes.extend_from_slice(codewords);
        self.len += codewords.len() << 3;
    }
}

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.len {
            return None;
        }
        let bit = ((self.bytes[self.cursor >> 3] << (self.cursor & 7)) & 0x80) != 0;
        self.cursor += 1;
        Some(bit)
    }
}
