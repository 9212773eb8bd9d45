//! RLP (Recursive Length Prefix) reading and encoding.
//!
//! # Encoding rules
//!
//! Header byte ranges:
//! - Single byte [0x00, 0x7f]: itself
//! - String [0x80, 0xb7]: 0x80 + len, then data
//! - String [0xb8, 0xbf]: 0xb7 + len_of_len, then len, then data
//! - List [0xc0, 0xf7]: 0xc0 + len, then items
//! - List [0xf8, 0xff]: 0xf7 + len_of_len, then len, then items
//!
//! The reader hands out borrowed views into the input buffer and never
//! copies payloads. The encoder produces canonical output.

pub mod encoder;
pub mod reader;

pub use encoder::{
    encode_address, encode_bytes, encode_list, encode_list_payload, encode_u64, encode_uint,
    ListEncoder,
};
pub use reader::{ItemKind, RlpItem, RlpListIter};

/// Header base for byte strings.
pub(crate) const STRING_OFFSET: u8 = 0x80;

/// Header base for lists.
pub(crate) const LIST_OFFSET: u8 = 0xc0;

/// Payloads shorter than this use the single-byte header form.
pub(crate) const SHORT_PAYLOAD_LIMIT: usize = 56;
