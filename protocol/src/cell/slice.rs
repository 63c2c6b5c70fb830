//! Forward-only read cursor over a [`Cell`].
//!
//! A [`Slice`] borrows its cell and tracks two positions: the next data
//! bit and the next reference. Reads only ever move forward. To look ahead
//! without disturbing a cursor, call [`Slice::fork`] and read from the
//! fork; the original keeps its position.
//!
//! Every read is bounds-checked and reports [`CellError::Underflow`]
//! instead of panicking on short input.

use super::{Cell, CellError};

/// Read cursor over a borrowed cell.
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> Slice<'a> {
    /// Opens a cursor at the start of `cell`.
    pub fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    /// Independent view at the current position.
    ///
    /// The fork and the original share the underlying cell but not their
    /// positions: reads through one never move the other.
    pub fn fork(&self) -> Slice<'a> {
        *self
    }

    /// Data bits left to read.
    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len - self.bit_pos
    }

    /// References left to load.
    pub fn remaining_refs(&self) -> usize {
        self.cell.refs.len() - self.ref_pos
    }

    fn ensure_bits(&self, requested: usize) -> Result<(), CellError> {
        let remaining = self.remaining_bits();
        if requested > remaining {
            return Err(CellError::Underflow {
                requested,
                remaining,
            });
        }
        Ok(())
    }

    fn take_bit(&mut self) -> bool {
        let i = self.bit_pos;
        self.bit_pos += 1;
        (self.cell.data[i / 8] >> (7 - i % 8)) & 1 == 1
    }

    /// Reads one bit.
    pub fn load_bit(&mut self) -> Result<bool, CellError> {
        self.ensure_bits(1)?;
        Ok(self.take_bit())
    }

    /// Reads a big-endian unsigned integer of `bits` width (at most 64).
    pub fn load_uint(&mut self, bits: usize) -> Result<u64, CellError> {
        if bits > 64 {
            return Err(CellError::InvalidWidth(bits));
        }
        self.ensure_bits(bits)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.take_bit());
        }
        Ok(value)
    }

    /// Reads a big-endian unsigned integer of up to 128 bits.
    pub fn load_uint_u128(&mut self, bits: usize) -> Result<u128, CellError> {
        if bits > 128 {
            return Err(CellError::InvalidWidth(bits));
        }
        self.ensure_bits(bits)?;
        let mut value = 0u128;
        for _ in 0..bits {
            value = (value << 1) | u128::from(self.take_bit());
        }
        Ok(value)
    }

    /// Reads a 32-bit big-endian unsigned integer.
    pub fn load_u32(&mut self) -> Result<u32, CellError> {
        // Width is fixed at 32, so the narrowing cannot truncate.
        Ok(self.load_uint(32)? as u32)
    }

    /// Reads `len` whole bytes.
    pub fn load_bytes(&mut self, len: usize) -> Result<Vec<u8>, CellError> {
        let bits = len.checked_mul(8).ok_or(CellError::Underflow {
            requested: usize::MAX,
            remaining: self.remaining_bits(),
        })?;
        self.ensure_bits(bits)?;
        if self.bit_pos % 8 == 0 {
            let start = self.bit_pos / 8;
            self.bit_pos += bits;
            return Ok(self.cell.data[start..start + len].to_vec());
        }
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            let mut byte = 0u8;
            for _ in 0..8 {
                byte = (byte << 1) | u8::from(self.take_bit());
            }
            out.push(byte);
        }
        Ok(out)
    }

    /// Loads the next child reference.
    pub fn load_ref(&mut self) -> Result<&'a Cell, CellError> {
        let cell = self
            .cell
            .refs
            .get(self.ref_pos)
            .ok_or(CellError::RefUnderflow)?;
        self.ref_pos += 1;
        Ok(&**cell)
    }

    /// Reads every remaining whole byte, then keeps going through the first
    /// child reference (snake layout) until the chain ends.
    ///
    /// Leftover bits that do not form a whole byte are skipped, in this
    /// cell and in every continuation cell.
    pub fn load_bytes_tail(&mut self) -> Result<Vec<u8>, CellError> {
        let mut out = self.load_bytes(self.remaining_bits() / 8)?;
        self.bit_pos = self.cell.bit_len;

        let mut next = self.next_ref();
        while let Some(cell) = next {
            let mut cursor = cell.as_slice();
            out.extend(cursor.load_bytes(cursor.remaining_bits() / 8)?);
            next = cursor.next_ref();
        }
        Ok(out)
    }

    fn next_ref(&mut self) -> Option<&'a Cell> {
        self.load_ref().ok()
    }
}
