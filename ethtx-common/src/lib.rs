//! Common types for the ethtx transaction codec.
//!
//! This crate provides the types shared by the codec library and the
//! command-line front end: transaction type tags, access-list tuples,
//! signature components, size limits and the error enums.

pub mod error;
pub mod types;

pub use error::{RlpError, TxError};
pub use types::*;

pub use alloy_primitives::{Address, B256, U256};

/// Maximum accepted size of a raw transaction (128KB).
///
/// Matches the devp2p ceiling for a single non-blob transaction.
pub const MAX_TX_SIZE: usize = 128 * 1024;

/// Maximum RLP nesting depth accepted by the reader.
pub const MAX_RLP_DEPTH: usize = 16;
