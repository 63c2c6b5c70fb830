//! # Cells
//!
//! Every TON message body is a tree of cells: up to 1023 data bits plus up
//! to four references to child cells. This module provides just enough of
//! that model for the decoders to read bodies without pulling in a full
//! BoC codec.
//!
//! ```text
//! mod.rs     — Cell, CellError, representation hash
//! builder.rs — CellBuilder for assembling bodies (tests, fixtures, CLI)
//! slice.rs   — Slice, the forward-only read cursor with explicit forking
//! ```
//!
//! Cells are immutable once built and children are shared through `Arc`,
//! so a single body can be read from any number of places at once. All
//! reading state lives in [`Slice`], never in the cell itself.

pub mod builder;
pub mod slice;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::{CELL_MAX_BITS, CELL_MAX_REFS};

pub use builder::CellBuilder;
pub use slice::Slice;

// ---------------------------------------------------------------------------
// CellError
// ---------------------------------------------------------------------------

/// Errors raised while building or reading cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    /// A write would push the cell past its bit capacity.
    #[error("cell overflow: tried to store {requested} bits, {available} available")]
    Overflow {
        /// Bits the caller tried to store.
        requested: usize,
        /// Bits still free in the cell.
        available: usize,
    },

    /// A write would attach more than four references.
    #[error("cell overflow: a cell holds at most {max} references")]
    TooManyRefs {
        /// Reference capacity of a cell.
        max: usize,
    },

    /// A read asked for more bits than the cursor has left.
    #[error("cell underflow: tried to read {requested} bits, {remaining} remaining")]
    Underflow {
        /// Bits the caller tried to read.
        requested: usize,
        /// Bits left in the cursor.
        remaining: usize,
    },

    /// A read asked for a reference when none are left.
    #[error("cell underflow: no references left to load")]
    RefUnderflow,

    /// Integer width outside what the called method supports.
    #[error("unsupported integer width: {0} bits")]
    InvalidWidth(usize),

    /// The value does not fit in the requested number of bits.
    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange {
        /// Value the caller tried to store.
        value: u128,
        /// Width it was supposed to fit in.
        bits: usize,
    },

    /// Raw cell data is inconsistent (wrong length, bad hex, ...).
    #[error("invalid cell data: {0}")]
    InvalidData(String),
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// An immutable TON cell.
///
/// Data bits are stored MSB-first in `data`; bits past `bit_len` in the
/// last byte are always zero. This normalisation matters because the
/// representation hash covers whole bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CellRepr", into = "CellRepr")]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl Cell {
    /// Creates a cell from raw parts, validating the cell limits.
    ///
    /// `data` must be exactly `ceil(bit_len / 8)` bytes long. Any stray bits
    /// after `bit_len` are cleared.
    pub fn new(mut data: Vec<u8>, bit_len: usize, refs: Vec<Arc<Cell>>) -> Result<Self, CellError> {
        if bit_len > CELL_MAX_BITS {
            return Err(CellError::Overflow {
                requested: bit_len,
                available: CELL_MAX_BITS,
            });
        }
        if refs.len() > CELL_MAX_REFS {
            return Err(CellError::TooManyRefs { max: CELL_MAX_REFS });
        }
        let expected = bit_len.div_ceil(8);
        if data.len() != expected {
            return Err(CellError::InvalidData(format!(
                "{} data bytes for {} bits (expected {})",
                data.len(),
                bit_len,
                expected
            )));
        }
        let tail = bit_len % 8;
        if tail != 0 {
            if let Some(last) = data.last_mut() {
                *last &= 0xFFu8 << (8 - tail);
            }
        }
        Ok(Self {
            data,
            bit_len,
            refs,
        })
    }

    /// Creates a byte-aligned cell with no references.
    ///
    /// Handy for bodies that arrive as a plain byte string. Fails when the
    /// bytes do not fit in a single cell (more than 127 bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CellError> {
        Self::new(bytes.to_vec(), bytes.len().saturating_mul(8), Vec::new())
    }

    /// The empty cell: no bits, no references.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of data bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Raw data bytes (the last one may be partially used).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Child references, in order.
    pub fn refs(&self) -> &[Arc<Cell>] {
        &self.refs
    }

    /// `true` if the cell has neither bits nor references.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0 && self.refs.is_empty()
    }

    /// Opens a fresh read cursor at the start of this cell.
    pub fn as_slice(&self) -> Slice<'_> {
        Slice::new(self)
    }

    /// Depth of the tree rooted at this cell. Leaves have depth 0.
    pub fn depth(&self) -> u16 {
        self.refs
            .iter()
            .map(|r| r.depth().saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Representation hash of an ordinary (level 0) cell.
    ///
    /// `sha256(d1 || d2 || padded data || child depths || child hashes)`,
    /// where `d1` is the reference count and `d2` is
    /// `ceil(bits/8) + floor(bits/8)`. A partial last byte carries a
    /// single `1` completion bit right after the data.
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        let d1 = self.refs.len() as u8;
        let d2 = (self.bit_len.div_ceil(8) + self.bit_len / 8) as u8;
        hasher.update([d1, d2]);

        let tail = self.bit_len % 8;
        match self.data.split_last() {
            Some((last, head)) if tail != 0 => {
                hasher.update(head);
                hasher.update([last | (1u8 << (7 - tail))]);
            }
            _ => hasher.update(&self.data),
        }

        for r in &self.refs {
            hasher.update(r.depth().to_be_bytes());
        }
        for r in &self.refs {
            hasher.update(r.hash());
        }
        hasher.finalize().into()
    }

    /// Hex-encoded representation hash.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }
}

// ---------------------------------------------------------------------------
// Serde representation
// ---------------------------------------------------------------------------

/// Wire shape of a cell in JSON fixtures:
/// `{ "data": "<hex>", "bits": <n>, "refs": [ ... ] }`.
#[derive(Serialize, Deserialize)]
struct CellRepr {
    data: String,
    bits: usize,
    #[serde(default)]
    refs: Vec<Cell>,
}

impl From<Cell> for CellRepr {
    fn from(cell: Cell) -> Self {
        Self {
            data: hex::encode(&cell.data),
            bits: cell.bit_len,
            refs: cell.refs.iter().map(|r| (**r).clone()).collect(),
        }
    }
}

impl TryFrom<CellRepr> for Cell {
    type Error = CellError;

    fn try_from(repr: CellRepr) -> Result<Self, Self::Error> {
        let data = hex::decode(&repr.data).map_err(|e| CellError::InvalidData(e.to_string()))?;
        let refs = repr.refs.into_iter().map(Arc::new).collect();
        Cell::new(data, repr.bits, refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_hash_is_well_known() {
        assert_eq!(
            Cell::empty().hash_hex(),
            "96a296d224f285c67bee93c30f8a309157f0daa35dc5b87e410b78630a09cfc7"
        );
    }

    #[test]
    fn new_clears_stray_trailing_bits() {
        let cell = Cell::new(vec![0b1011_1111], 3, Vec::new()).unwrap();
        assert_eq!(cell.data(), &[0b1010_0000]);
    }

    #[test]
    fn new_rejects_mismatched_length() {
        let err = Cell::new(vec![0, 0], 3, Vec::new()).unwrap_err();
        assert!(matches!(err, CellError::InvalidData(_)));
    }

    #[test]
    fn new_rejects_oversized_cells() {
        let err = Cell::new(vec![0; 128], 1024, Vec::new()).unwrap_err();
        assert!(matches!(err, CellError::Overflow { .. }));

        let child = Arc::new(Cell::empty());
        let err = Cell::new(Vec::new(), 0, vec![child; 5]).unwrap_err();
        assert_eq!(err, CellError::TooManyRefs { max: 4 });
    }

    #[test]
    fn from_bytes_limits_to_one_cell() {
        assert!(Cell::from_bytes(&[0u8; 127]).is_ok());
        assert!(Cell::from_bytes(&[0u8; 128]).is_err());
    }

    #[test]
    fn depth_counts_longest_reference_chain() {
        let leaf = Arc::new(Cell::empty());
        let mid = Arc::new(Cell::new(Vec::new(), 0, vec![leaf.clone()]).unwrap());
        let root = Cell::new(Vec::new(), 0, vec![leaf, mid]).unwrap();
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn hash_depends_on_children() {
        let a = Cell::new(Vec::new(), 0, vec![Arc::new(Cell::from_bytes(b"a").unwrap())]).unwrap();
        let b = Cell::new(Vec::new(), 0, vec![Arc::new(Cell::from_bytes(b"b").unwrap())]).unwrap();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn json_representation_survives_a_trip() {
        let child = Arc::new(Cell::from_bytes(b"tail").unwrap());
        let cell = Cell::new(vec![0xAB, 0xC0], 10, vec![child]).unwrap();
        let json = serde_json::to_string(&cell).unwrap();
        assert!(json.contains("\"bits\":10"));
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
    }

    #[test]
    fn json_with_bad_hex_is_rejected() {
        let err = serde_json::from_str::<Cell>(r#"{"data":"zz","bits":8}"#).unwrap_err();
        assert!(err.to_string().contains("invalid cell data"));
    }
}
