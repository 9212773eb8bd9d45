//! Canonical RLP encoder.
//!
//! One function per primitive, all sharing the same header rules as the
//! reader. Integers are minimal big-endian (zero is the empty string),
//! addresses are always 20 bytes, and a single byte below 0x80 is encoded
//! as itself.

use alloy_primitives::{Address, U256};

use super::{LIST_OFFSET, SHORT_PAYLOAD_LIMIT, STRING_OFFSET};

/// Encodes an unsigned 256-bit integer.
pub fn encode_uint(value: U256) -> Vec<u8> {
    let mut out = Vec::with_capacity(33);
    put_uint(&mut out, value);
    out
}

/// Encodes a u64 as RLP bytes.
pub fn encode_u64(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    put_u64(&mut out, value);
    out
}

/// Encodes a byte slice as RLP.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 9);
    put_bytes(&mut out, data);
    out
}

/// Encodes an address as a fixed 20-byte string.
pub fn encode_address(address: &Address) -> Vec<u8> {
    encode_bytes(address.as_slice())
}

/// Encodes a list from its already-encoded children.
pub fn encode_list(items: &[Vec<u8>]) -> Vec<u8> {
    let payload_len = items.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(payload_len + 9);
    put_header(&mut out, payload_len, LIST_OFFSET);
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

/// Encodes a list from the concatenation of its already-encoded children.
pub fn encode_list_payload(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    put_header(&mut out, payload.len(), LIST_OFFSET);
    out.extend_from_slice(payload);
    out
}

/// Builds an RLP list field by field.
///
/// ```
/// use ethtx::rlp::ListEncoder;
///
/// let mut list = ListEncoder::new();
/// list.u64(1024).bytes(b"cat");
/// assert_eq!(list.finish(), vec![0xc7, 0x82, 0x04, 0x00, 0x83, b'c', b'a', b't']);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListEncoder {
    payload: Vec<u8>,
}

impl ListEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uint(&mut self, value: U256) -> &mut Self {
        put_uint(&mut self.payload, value);
        self
    }

    pub fn u64(&mut self, value: u64) -> &mut Self {
        put_u64(&mut self.payload, value);
        self
    }

    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        put_bytes(&mut self.payload, data);
        self
    }

    pub fn address(&mut self, address: &Address) -> &mut Self {
        put_bytes(&mut self.payload, address.as_slice());
        self
    }

    /// Appends an item that is already RLP-encoded (e.g. a nested list).
    pub fn raw(&mut self, encoded: &[u8]) -> &mut Self {
        self.payload.extend_from_slice(encoded);
        self
    }

    /// Length of the list payload written so far.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Prefixes the list header and returns the encoding.
    pub fn finish(self) -> Vec<u8> {
        encode_list_payload(&self.payload)
    }
}

fn put_uint(out: &mut Vec<u8>, value: U256) {
    let bytes = value.to_be_bytes::<32>();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    put_bytes(out, &bytes[start..]);
}

fn put_u64(out: &mut Vec<u8>, value: u64) {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    put_bytes(out, &bytes[start..]);
}

fn put_bytes(out: &mut Vec<u8>, data: &[u8]) {
    if data.len() == 1 && data[0] < STRING_OFFSET {
        out.push(data[0]);
        return;
    }
    put_header(out, data.len(), STRING_OFFSET);
    out.extend_from_slice(data);
}

/// Writes a string or list header for a payload of `len` bytes.
fn put_header(out: &mut Vec<u8>, len: usize, offset: u8) {
    if len < SHORT_PAYLOAD_LIMIT {
        out.push(offset + len as u8);
    } else {
        let len_bytes = len.to_be_bytes();
        let start = len_bytes.iter().position(|&b| b != 0).unwrap_or(len_bytes.len());
        let significant = &len_bytes[start..];
        out.push(offset + SHORT_PAYLOAD_LIMIT as u8 - 1 + significant.len() as u8);
        out.extend_from_slice(significant);
    }
}
