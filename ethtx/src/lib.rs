//! Ethereum transaction codec.
//!
//! Turns raw wire bytes into a strongly-typed [`Tx`] and back, and computes
//! the two hashes every consumer needs: the type-specific signing hash used
//! to recover the sender, and the transaction hash of the signed encoding.
//!
//! Supported layouts:
//! - Legacy transactions, Frontier and EIP-155 signatures
//! - EIP-2930 access list transactions (type 0x01)
//! - EIP-1559 dynamic fee transactions (type 0x02)
//!
//! EIP-4844 blob transactions (type 0x03) can be represented and classified
//! but every wire operation on them fails with
//! [`TxError::UnsupportedTransactionType`].
//!
//! All operations are pure functions over borrowed input and may be run
//! from any number of threads at once.

pub mod crypto;
pub mod rlp;
pub mod transaction;

pub use ethtx_common::{
    AccessList, AccessTuple, Address, RlpError, Signature, TxError, TxType, B256, MAX_RLP_DEPTH,
    MAX_TX_SIZE, U256,
};
pub use transaction::{
    decode, decode_with, encode, signing_hash, tx_hash, tx_type, DecodeConfig, Tx, TxEip1559,
    TxEip2930, TxEip4844, TxFields, TxLegacy,
};
