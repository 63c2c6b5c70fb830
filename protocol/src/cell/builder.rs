//! Cell construction.
//!
//! [`CellBuilder`] appends bits and references MSB-first and checks the
//! 1023-bit / 4-reference limits on every write, so `build()` itself cannot
//! fail. Writes take `&mut self` and return `Result<&mut Self, _>`, which
//! keeps chains short with `?`:
//!
//! ```
//! use ton_txfields::cell::CellBuilder;
//!
//! let mut b = CellBuilder::new();
//! b.store_uint(0, 32)?.store_bytes(b"gm")?;
//! let cell = b.build();
//! assert_eq!(cell.bit_len(), 48);
//! # Ok::<(), ton_txfields::cell::CellError>(())
//! ```

use std::sync::Arc;

use super::{Cell, CellError};
use crate::config::{CELL_MAX_BITS, CELL_MAX_REFS};

/// Incremental builder for a single [`Cell`].
#[derive(Debug, Clone, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl CellBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits still free in the cell under construction.
    pub fn available_bits(&self) -> usize {
        CELL_MAX_BITS - self.bit_len
    }

    /// Reference slots still free.
    pub fn available_refs(&self) -> usize {
        CELL_MAX_REFS - self.refs.len()
    }

    fn ensure_bits(&self, requested: usize) -> Result<(), CellError> {
        let available = self.available_bits();
        if requested > available {
            return Err(CellError::Overflow {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = self.bit_len % 8;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            if let Some(last) = self.data.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bit_len += 1;
    }

    /// Appends a single bit.
    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, CellError> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Appends `value` as a big-endian unsigned integer of `bits` width
    /// (at most 64).
    pub fn store_uint(&mut self, value: u64, bits: usize) -> Result<&mut Self, CellError> {
        if bits > 64 {
            return Err(CellError::InvalidWidth(bits));
        }
        if bits < 64 && value >> bits != 0 {
            return Err(CellError::ValueOutOfRange {
                value: value as u128,
                bits,
            });
        }
        self.ensure_bits(bits)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Appends raw bytes.
    pub fn store_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CellError> {
        let bits = bytes.len().checked_mul(8).ok_or(CellError::Overflow {
            requested: usize::MAX,
            available: self.available_bits(),
        })?;
        self.ensure_bits(bits)?;
        if self.bit_len % 8 == 0 {
            self.data.extend_from_slice(bytes);
            self.bit_len += bits;
        } else {
            for byte in bytes {
                for i in (0..8).rev() {
                    self.push_bit((byte >> i) & 1 == 1);
                }
            }
        }
        Ok(self)
    }

    /// Attaches a child reference.
    pub fn store_ref(&mut self, cell: impl Into<Arc<Cell>>) -> Result<&mut Self, CellError> {
        if self.refs.len() >= CELL_MAX_REFS {
            return Err(CellError::TooManyRefs { max: CELL_MAX_REFS });
        }
        self.refs.push(cell.into());
        Ok(self)
    }

    /// Appends a UTF-8 string in snake layout: as many whole bytes as fit
    /// here, the rest continued in a single child reference, recursively.
    pub fn store_string_tail(&mut self, text: &str) -> Result<&mut Self, CellError> {
        self.store_bytes_tail(text.as_bytes())
    }

    /// Byte-level version of [`store_string_tail`](Self::store_string_tail).
    pub fn store_bytes_tail(&mut self, bytes: &[u8]) -> Result<&mut Self, CellError> {
        let fit = self.available_bits() / 8;
        if bytes.len() <= fit {
            return self.store_bytes(bytes);
        }
        if self.available_refs() == 0 {
            return Err(CellError::TooManyRefs { max: CELL_MAX_REFS });
        }
        let (head, rest) = bytes.split_at(fit);
        self.store_bytes(head)?;
        let mut child = CellBuilder::new();
        child.store_bytes_tail(rest)?;
        self.store_ref(child.build())
    }

    /// Finishes the cell.
    pub fn build(&self) -> Cell {
        Cell {
            data: self.data.clone(),
            bit_len: self.bit_len,
            refs: self.refs.clone(),
        }
    }
}
