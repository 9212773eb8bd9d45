//! EIP-4844 blob transactions (type 0x03).
//!
//! Held only so that blob transactions supplied field by field can be
//! classified. There is no wire codec: encoding, hashing, signing and
//! decoding all fail with [`ethtx_common::TxError::UnsupportedTransactionType`].

use alloy_primitives::{Address, Bytes, B256, U256};
use ethtx_common::{AccessList, Signature};

/// An EIP-4844 blob transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxEip4844 {
    pub chain_id: u64,
    pub nonce: U256,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: U256,
    /// Recipient; `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: AccessList,
    pub max_fee_per_blob_gas: U256,
    pub blob_versioned_hashes: Vec<B256>,
    pub signature: Signature,
    pub from: Address,
}
