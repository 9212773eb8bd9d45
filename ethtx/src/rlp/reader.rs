//! Zero-copy RLP reader.
//!
//! An [`RlpItem`] is a view over the header and payload of one item inside
//! a borrowed buffer. Splitting a list walks the child headers and hands
//! out sub-slices of the parent payload, so children can never extend past
//! their parent and nothing is copied.
//!
//! Declared lengths are always bounds-checked. Canonical form (no leading
//! zeros in long length prefixes, no long form for short payloads, no
//! header on a single byte below 0x80) is not re-validated on read.

use alloy_primitives::{Address, B256, U256};
use ethtx_common::RlpError;

use super::{LIST_OFFSET, STRING_OFFSET};

/// Classification of an RLP item by its leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A single byte below 0x80, encoded as itself.
    Byte,
    /// A byte string with a header.
    String,
    /// A list of items.
    List,
}

/// A borrowed view of a single RLP item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpItem<'a> {
    /// Header and payload of this item.
    raw: &'a [u8],
    /// Length of the header within `raw`.
    header_len: usize,
    kind: ItemKind,
}

impl<'a> RlpItem<'a> {
    /// Parses the leading item of `buf`. Bytes after the item are ignored.
    pub fn new(buf: &'a [u8]) -> Result<Self, RlpError> {
        let first = *buf.first().ok_or(RlpError::EmptyInput)?;

        let (kind, header_len, payload_len) = match first {
            // Single byte
            0x00..=0x7f => (ItemKind::Byte, 0, 1),

            // Short string (0-55 bytes)
            0x80..=0xb7 => (ItemKind::String, 1, (first - STRING_OFFSET) as usize),

            // Long string (56+ bytes)
            0xb8..=0xbf => {
                let len_of_len = (first - 0xb7) as usize;
                (ItemKind::String, 1 + len_of_len, read_length(buf, len_of_len)?)
            }

            // Short list (0-55 bytes total)
            0xc0..=0xf7 => (ItemKind::List, 1, (first - LIST_OFFSET) as usize),

            // Long list (56+ bytes total)
            0xf8..=0xff => {
                let len_of_len = (first - 0xf7) as usize;
                (ItemKind::List, 1 + len_of_len, read_length(buf, len_of_len)?)
            }
        };

        let total = header_len
            .checked_add(payload_len)
            .ok_or(RlpError::LengthOverflow)?;
        let raw = buf.get(..total).ok_or(RlpError::UnexpectedEof)?;

        Ok(Self {
            raw,
            header_len,
            kind,
        })
    }

    /// Parses the item starting at `offset` within `buf`.
    pub fn at(buf: &'a [u8], offset: usize) -> Result<Self, RlpError> {
        let tail = buf.get(offset..).ok_or(RlpError::UnexpectedEof)?;
        Self::new(tail)
    }

    /// Parses an item that must span the whole of `buf`.
    pub fn exact(buf: &'a [u8]) -> Result<Self, RlpError> {
        let item = Self::new(buf)?;
        if item.len() != buf.len() {
            return Err(RlpError::TrailingData);
        }
        Ok(item)
    }

    #[inline]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Returns true if this is a list item.
    #[inline]
    pub fn is_list(&self) -> bool {
        self.kind == ItemKind::List
    }

    /// Returns true if this is a byte string (including the single byte form).
    #[inline]
    pub fn is_string(&self) -> bool {
        !self.is_list()
    }

    /// Total encoded length: header plus payload.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn header_length(&self) -> usize {
        self.header_len
    }

    #[inline]
    pub fn payload_length(&self) -> usize {
        self.raw.len() - self.header_len
    }

    /// The payload bytes (for a single byte item, the byte itself).
    #[inline]
    pub fn payload(&self) -> &'a [u8] {
        &self.raw[self.header_len..]
    }

    /// Returns the payload of a string item.
    pub fn to_bytes(&self) -> Result<&'a [u8], RlpError> {
        if self.is_list() {
            return Err(RlpError::ExpectedString);
        }
        Ok(self.payload())
    }

    /// Interprets a string payload as a big-endian unsigned integer.
    ///
    /// An empty payload is zero.
    pub fn to_uint(&self) -> Result<U256, RlpError> {
        let data = self.to_bytes()?;
        if data.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::try_from_be_slice(data).ok_or(RlpError::IntegerOverflow(data.len()))
    }

    /// Interprets a string payload as a big-endian `u64`.
    pub fn to_u64(&self) -> Result<u64, RlpError> {
        let data = self.to_bytes()?;
        if data.len() > 8 {
            return Err(RlpError::IntegerOverflow(data.len()));
        }
        Ok(data.iter().fold(0u64, |acc, &b| acc << 8 | b as u64))
    }

    /// Converts a 20-byte string payload to an address.
    pub fn to_address(&self) -> Result<Address, RlpError> {
        let data = self.to_bytes()?;
        if data.len() != 20 {
            return Err(RlpError::InvalidAddressLength(data.len()));
        }
        Ok(Address::from_slice(data))
    }

    /// Converts a string payload of exactly 32 bytes to a word.
    pub fn to_bytes32(&self) -> Result<B256, RlpError> {
        let data = self.to_bytes()?;
        if data.len() != 32 {
            return Err(RlpError::InvalidWordLength(data.len()));
        }
        Ok(B256::from_slice(data))
    }

    /// Iterates over the children of a list item.
    pub fn iter(&self) -> Result<RlpListIter<'a>, RlpError> {
        if !self.is_list() {
            return Err(RlpError::ExpectedList);
        }
        Ok(RlpListIter {
            payload: self.payload(),
            offset: 0,
        })
    }

    /// Splits a list item into its ordered children.
    pub fn to_list(&self) -> Result<Vec<RlpItem<'a>>, RlpError> {
        self.iter()?.collect()
    }

    /// Walks the whole item tree, checking every declared length and
    /// rejecting lists nested deeper than `max_depth`.
    ///
    /// The walk keeps its own stack, so its call depth does not grow with
    /// the nesting of the input.
    pub fn validate(&self, max_depth: usize) -> Result<(), RlpError> {
        if !self.is_list() {
            return Ok(());
        }
        if max_depth == 0 {
            return Err(RlpError::TooDeep);
        }

        let mut stack = vec![self.iter()?];
        while let Some(children) = stack.last_mut() {
            match children.next() {
                None => {
                    stack.pop();
                }
                Some(child) => {
                    let child = child?;
                    if child.is_list() {
                        if stack.len() >= max_depth {
                            return Err(RlpError::TooDeep);
                        }
                        stack.push(child.iter()?);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Iterator over the children of a list item.
///
/// Yields an error and then stops if a child header is malformed.
#[derive(Debug, Clone)]
pub struct RlpListIter<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for RlpListIter<'a> {
    type Item = Result<RlpItem<'a>, RlpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.payload.len() {
            return None;
        }
        match RlpItem::at(self.payload, self.offset) {
            Ok(item) => {
                self.offset += item.len();
                Some(Ok(item))
            }
            Err(e) => {
                self.offset = self.payload.len();
                Some(Err(e))
            }
        }
    }
}

/// Reads the big-endian length that follows a long-form header byte.
fn read_length(buf: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    let bytes = buf.get(1..1 + len_of_len).ok_or(RlpError::UnexpectedEof)?;
    if bytes.len() > core::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }
    Ok(bytes.iter().fold(0usize, |acc, &b| acc << 8 | b as usize))
}
