//! Error types for the transaction codec.
//!
//! Every failure is terminal for the call that produced it: the codec has
//! no fallback paths and never returns partial results.

use thiserror::Error;

/// RLP reading errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RlpError {
    /// Input is empty when data expected.
    #[error("empty input")]
    EmptyInput,

    /// Input too short for declared length.
    #[error("input shorter than declared length")]
    UnexpectedEof,

    /// Length field does not fit in a machine word.
    #[error("length field overflow")]
    LengthOverflow,

    /// Exceeded maximum nesting depth.
    #[error("nesting too deep")]
    TooDeep,

    /// Expected list but got string.
    #[error("expected list")]
    ExpectedList,

    /// Expected string but got list.
    #[error("expected string")]
    ExpectedString,

    /// Extra data after RLP item.
    #[error("trailing data after item")]
    TrailingData,

    /// Integer payload wider than 256 bits (or the requested width).
    #[error("integer payload of {0} bytes does not fit")]
    IntegerOverflow(usize),

    /// Address payload is neither empty nor 20 bytes.
    #[error("address payload of {0} bytes")]
    InvalidAddressLength(usize),

    /// 32-byte word payload of another width.
    #[error("word payload of {0} bytes")]
    InvalidWordLength(usize),
}

impl RlpError {
    /// Returns a stable numeric code for diagnostics.
    #[inline]
    pub fn code(self) -> u32 {
        match self {
            RlpError::EmptyInput => 0x01,
            RlpError::UnexpectedEof => 0x02,
            RlpError::LengthOverflow => 0x03,
            RlpError::TooDeep => 0x04,
            RlpError::ExpectedList => 0x05,
            RlpError::ExpectedString => 0x06,
            RlpError::TrailingData => 0x07,
            RlpError::IntegerOverflow(_) => 0x08,
            RlpError::InvalidAddressLength(_) => 0x09,
            RlpError::InvalidWordLength(_) => 0x0a,
        }
    }
}

/// Transaction codec errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TxError {
    /// Transaction data is empty.
    #[error("empty transaction")]
    EmptyTransaction,

    /// Transaction larger than the configured ceiling.
    #[error("transaction of {0} bytes exceeds size limit")]
    TransactionTooLarge(usize),

    /// Unknown type tag, or the blob tag (0x03).
    #[error("unsupported transaction type 0x{0:02x}")]
    UnsupportedTransactionType(u8),

    /// Typed transaction list has the wrong number of fields.
    #[error("unexpected list length {0}")]
    UnexpectedListLength(usize),

    /// Buffer is structurally invalid RLP.
    #[error("malformed RLP: {0}")]
    MalformedRlp(#[from] RlpError),

    /// A field payload does not fit its type.
    #[error("invalid field `{0}`")]
    InvalidField(&'static str),

    /// Signature `s` above the secp256k1 half curve order.
    #[error("signature s value is not canonical")]
    InvalidSignatureS,

    /// Signature does not recover to an address.
    #[error("signature recovery failed")]
    SignatureRecoveryFailed,

    /// Producing a signature with the supplied key failed.
    #[error("signing failed")]
    SigningFailed,
}

impl TxError {
    /// Returns a stable numeric code for diagnostics.
    #[inline]
    pub fn code(self) -> u32 {
        match self {
            TxError::EmptyTransaction => 0x10,
            TxError::TransactionTooLarge(_) => 0x11,
            TxError::UnsupportedTransactionType(_) => 0x12,
            TxError::UnexpectedListLength(_) => 0x13,
            TxError::MalformedRlp(_) => 0x14,
            TxError::InvalidField(_) => 0x15,
            TxError::InvalidSignatureS => 0x16,
            TxError::SignatureRecoveryFailed => 0x17,
            TxError::SigningFailed => 0x18,
        }
    }

    /// Returns true if the error concerns the signature rather than the
    /// encoding.
    #[inline]
    pub fn is_signature_error(self) -> bool {
        matches!(
            self,
            TxError::InvalidSignatureS | TxError::SignatureRecoveryFailed
        )
    }
}
