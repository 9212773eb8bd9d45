//! Core types shared by the codec and its front ends.

use alloy_primitives::{Address, B256, U256};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Transaction Type
// =============================================================================

/// EIP-2718 transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum TxType {
    /// Untyped legacy transaction (no type byte on the wire).
    Legacy = 0x00,
    /// EIP-2930 access list transaction.
    AccessList = 0x01,
    /// EIP-1559 dynamic fee transaction.
    DynamicFee = 0x02,
    /// EIP-4844 blob transaction (classified, never encoded).
    Blob = 0x03,
}

impl TxType {
    /// Returns the EIP-2718 type byte.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true for types carried behind a type byte.
    #[inline]
    pub fn is_typed(self) -> bool {
        !matches!(self, TxType::Legacy)
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxType::Legacy => write!(f, "legacy"),
            TxType::AccessList => write!(f, "eip2930"),
            TxType::DynamicFee => write!(f, "eip1559"),
            TxType::Blob => write!(f, "eip4844"),
        }
    }
}

// =============================================================================
// Access List
// =============================================================================

/// A single access list entry: an address and the storage slots it touches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccessTuple {
    /// Accessed account.
    pub address: Address,
    /// Storage keys, in wire order.
    pub storage_keys: Vec<B256>,
}

impl AccessTuple {
    /// Creates a new tuple.
    pub fn new(address: Address, storage_keys: Vec<B256>) -> Self {
        Self {
            address,
            storage_keys,
        }
    }
}

/// An EIP-2930 access list.
pub type AccessList = Vec<AccessTuple>;

// =============================================================================
// Signature
// =============================================================================

/// ECDSA signature components as carried on the wire.
///
/// `v` is either a raw parity (0/1, typed transactions), a Frontier parity
/// (27/28) or an EIP-155 value folding in the chain id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

impl Signature {
    /// Creates a signature from its components.
    pub const fn new(v: u64, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// Returns true for pre-EIP-155 legacy parities (27/28).
    #[inline]
    pub fn is_frontier(&self) -> bool {
        self.v == 27 || self.v == 28
    }

    /// Returns true if both `r` and `s` are zero (unsigned placeholder).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.r.is_zero() && self.s.is_zero()
    }
}
