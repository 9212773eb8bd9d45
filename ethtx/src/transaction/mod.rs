//! Transaction codec.
//!
//! [`decode`] dispatches on the first byte of the wire encoding:
//! - `>= 0xc0`: legacy RLP list, no type byte
//! - `0x01`: EIP-2930, `0x01 || rlp(fields)`
//! - `0x02`: EIP-1559, `0x02 || rlp(fields)`
//! - anything else (including the blob tag `0x03`): unsupported
//!
//! Decoding always recovers the sender from the signature; a wire-supplied
//! sender is never trusted.

mod access_list;
mod eip1559;
mod eip2930;
mod eip4844;
mod fields;
mod legacy;

pub use access_list::{decode_access_list, encode_access_list};
pub use eip1559::TxEip1559;
pub use eip2930::TxEip2930;
pub use eip4844::TxEip4844;
pub use fields::TxFields;
pub use legacy::{chain_id_from_v, TxLegacy};

use alloy_primitives::{Address, Bytes, B256, U256};
use ethtx_common::{AccessTuple, Signature, TxError, TxType, MAX_RLP_DEPTH, MAX_TX_SIZE};
use k256::ecdsa::SigningKey;

use crate::crypto::{compute_v, keccak256, recover_signer, sign_hash, Keccak256Hasher};
use crate::rlp::{ListEncoder, RlpItem, LIST_OFFSET};

/// Expands `$body` once per variant with `$inner` bound to the body struct.
macro_rules! each_variant {
    ($tx:expr, $inner:ident => $body:expr) => {
        match $tx {
            Tx::Legacy($inner) => $body,
            Tx::AccessList($inner) => $body,
            Tx::DynamicFee($inner) => $body,
            Tx::Blob($inner) => $body,
        }
    };
}

// =============================================================================
// Transaction
// =============================================================================

/// A decoded transaction, one variant per EIP-2718 type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tx {
    Legacy(TxLegacy),
    AccessList(TxEip2930),
    DynamicFee(TxEip1559),
    /// Representable so callers can classify it; never encoded or hashed.
    Blob(TxEip4844),
}

impl Tx {
    pub fn tx_type(&self) -> TxType {
        match self {
            Tx::Legacy(_) => TxType::Legacy,
            Tx::AccessList(_) => TxType::AccessList,
            Tx::DynamicFee(_) => TxType::DynamicFee,
            Tx::Blob(_) => TxType::Blob,
        }
    }

    pub fn nonce(&self) -> U256 {
        each_variant!(self, tx => tx.nonce)
    }

    pub fn gas_limit(&self) -> U256 {
        each_variant!(self, tx => tx.gas_limit)
    }

    /// Recipient, or `None` for contract creation.
    pub fn to(&self) -> Option<Address> {
        each_variant!(self, tx => tx.to)
    }

    pub fn value(&self) -> U256 {
        each_variant!(self, tx => tx.value)
    }

    /// Call data or init code.
    pub fn input(&self) -> &Bytes {
        each_variant!(self, tx => &tx.input)
    }

    /// Chain id; `None` for Frontier legacy transactions.
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Tx::Legacy(tx) => tx.chain_id(),
            Tx::AccessList(tx) => Some(tx.chain_id),
            Tx::DynamicFee(tx) => Some(tx.chain_id),
            Tx::Blob(tx) => Some(tx.chain_id),
        }
    }

    pub fn signature(&self) -> &Signature {
        each_variant!(self, tx => &tx.signature)
    }

    /// Sender recovered at decode time.
    pub fn sender(&self) -> Address {
        each_variant!(self, tx => tx.from)
    }

    /// Access list; always empty for legacy transactions.
    pub fn access_list(&self) -> &[AccessTuple] {
        match self {
            Tx::Legacy(_) => &[],
            Tx::AccessList(tx) => &tx.access_list,
            Tx::DynamicFee(tx) => &tx.access_list,
            Tx::Blob(tx) => &tx.access_list,
        }
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to().is_none()
    }

    /// First four bytes of call data, if any.
    pub fn selector(&self) -> Option<[u8; 4]> {
        if self.is_contract_creation() {
            return None;
        }
        self.input().get(..4)?.try_into().ok()
    }

    /// Signed wire encoding, with the type byte for typed transactions.
    pub fn encode(&self) -> Result<Vec<u8>, TxError> {
        let tx_type = self.tx_type();
        let body = match self {
            Tx::Legacy(tx) => tx.encode_signed(),
            Tx::AccessList(tx) => tx.encode_signed(),
            Tx::DynamicFee(tx) => tx.encode_signed(),
            Tx::Blob(_) => return Err(unsupported(tx_type)),
        };
        if !tx_type.is_typed() {
            return Ok(body);
        }

        let mut out = Vec::with_capacity(body.len() + 1);
        out.push(tx_type.as_u8());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Hash of the unsigned preimage, the value the sender signed.
    pub fn signing_hash(&self) -> Result<B256, TxError> {
        match self {
            Tx::Legacy(tx) => Ok(tx.signing_hash()),
            Tx::AccessList(tx) => Ok(tx.signing_hash()),
            Tx::DynamicFee(tx) => Ok(tx.signing_hash()),
            Tx::Blob(_) => Err(unsupported(TxType::Blob)),
        }
    }

    /// Keccak-256 of the signed wire encoding.
    pub fn tx_hash(&self) -> Result<B256, TxError> {
        Ok(keccak256(&self.encode()?))
    }

    /// Recovers the sender from the signature, ignoring the stored `from`.
    ///
    /// Typed transactions carry a bare parity, so their `v` must be 0 or 1.
    pub fn recover_sender(&self) -> Result<Address, TxError> {
        let hash = self.signing_hash()?;
        let signature = self.signature();
        if self.tx_type().is_typed() && signature.v > 1 {
            return Err(TxError::InvalidField("v"));
        }
        recover_signer(&hash, signature, self.chain_id())
    }

    /// Signs the transaction and fills in `from`.
    ///
    /// A legacy body signs for the chain id folded into its current `v`
    /// (see [`TxLegacy::with_chain_id`]), or Frontier-style without one.
    pub fn sign(mut self, signing_key: &SigningKey) -> Result<Self, TxError> {
        let hash = self.signing_hash()?;
        let (r, s, parity) = sign_hash(signing_key, &hash)?;
        let v = compute_v(parity, self.chain_id(), self.tx_type())?;
        *self.signature_mut() = Signature::new(v, r, s);

        let from = self.recover_sender()?;
        self.set_from(from);
        Ok(self)
    }

    fn signature_mut(&mut self) -> &mut Signature {
        each_variant!(self, tx => &mut tx.signature)
    }

    fn set_from(&mut self, from: Address) {
        each_variant!(self, tx => tx.from = from)
    }
}

impl From<TxLegacy> for Tx {
    fn from(tx: TxLegacy) -> Self {
        Tx::Legacy(tx)
    }
}

impl From<TxEip2930> for Tx {
    fn from(tx: TxEip2930) -> Self {
        Tx::AccessList(tx)
    }
}

impl From<TxEip1559> for Tx {
    fn from(tx: TxEip1559) -> Self {
        Tx::DynamicFee(tx)
    }
}

impl From<TxEip4844> for Tx {
    fn from(tx: TxEip4844) -> Self {
        Tx::Blob(tx)
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Limits applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Largest accepted wire encoding, in bytes.
    pub max_tx_size: usize,
    /// Deepest accepted list nesting.
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_tx_size: MAX_TX_SIZE,
            max_depth: MAX_RLP_DEPTH,
        }
    }
}

/// Decodes a signed transaction and recovers its sender.
pub fn decode(data: &[u8]) -> Result<Tx, TxError> {
    decode_with(data, &DecodeConfig::default())
}

/// Like [`decode`], with explicit limits.
pub fn decode_with(data: &[u8], config: &DecodeConfig) -> Result<Tx, TxError> {
    let first = *data.first().ok_or(TxError::EmptyTransaction)?;
    if data.len() > config.max_tx_size {
        return Err(TxError::TransactionTooLarge(data.len()));
    }

    let mut tx = if first >= LIST_OFFSET {
        Tx::Legacy(TxLegacy::decode_fields(&list_fields(data, config)?)?)
    } else {
        let body = &data[1..];
        match first {
            0x01 => Tx::AccessList(TxEip2930::decode_fields(&list_fields(body, config)?)?),
            0x02 => Tx::DynamicFee(TxEip1559::decode_fields(&list_fields(body, config)?)?),
            tag => return Err(TxError::UnsupportedTransactionType(tag)),
        }
    };

    let from = tx.recover_sender()?;
    tx.set_from(from);

    log::debug!(
        "decoded {} transaction: {} bytes, from {}",
        tx.tx_type(),
        data.len(),
        from
    );
    Ok(tx)
}

/// Signed wire encoding of `tx`.
pub fn encode(tx: &Tx) -> Result<Vec<u8>, TxError> {
    tx.encode()
}

/// Signing hash of `tx`.
pub fn signing_hash(tx: &Tx) -> Result<B256, TxError> {
    tx.signing_hash()
}

/// Transaction hash of `tx`.
pub fn tx_hash(tx: &Tx) -> Result<B256, TxError> {
    tx.tx_hash()
}

/// Type of `tx`.
pub fn tx_type(tx: &Tx) -> TxType {
    tx.tx_type()
}

/// Parses `body` as exactly one RLP list and returns its children.
fn list_fields<'a>(body: &'a [u8], config: &DecodeConfig) -> Result<Vec<RlpItem<'a>>, TxError> {
    let item = RlpItem::exact(body)?;
    item.validate(config.max_depth)?;
    Ok(item.to_list()?)
}

// =============================================================================
// Field helpers shared by the per-type layouts
// =============================================================================

fn unsupported(tx_type: TxType) -> TxError {
    TxError::UnsupportedTransactionType(tx_type.as_u8())
}

/// `keccak256(type || rlp)` for typed transactions.
fn typed_hash(tx_type: TxType, preimage: &[u8]) -> B256 {
    log::trace!("{} signing preimage: {} bytes", tx_type, preimage.len() + 1);
    let mut hasher = Keccak256Hasher::new();
    hasher.update(&[tx_type.as_u8()]);
    hasher.update(preimage);
    hasher.finalize()
}

fn expect_len(fields: &[RlpItem<'_>], expected: usize) -> Result<(), TxError> {
    if fields.len() != expected {
        return Err(TxError::UnexpectedListLength(fields.len()));
    }
    Ok(())
}

fn field_uint(item: &RlpItem<'_>, name: &'static str) -> Result<U256, TxError> {
    item.to_uint().map_err(|_| TxError::InvalidField(name))
}

fn field_u64(item: &RlpItem<'_>, name: &'static str) -> Result<u64, TxError> {
    item.to_u64().map_err(|_| TxError::InvalidField(name))
}

fn field_bytes(item: &RlpItem<'_>, name: &'static str) -> Result<Bytes, TxError> {
    item.to_bytes()
        .map(Bytes::copy_from_slice)
        .map_err(|_| TxError::InvalidField(name))
}

/// An empty payload means contract creation.
fn decode_to(item: &RlpItem<'_>) -> Result<Option<Address>, TxError> {
    if item.is_string() && item.payload_length() == 0 {
        return Ok(None);
    }
    item.to_address()
        .map(Some)
        .map_err(|_| TxError::InvalidField("to"))
}

fn encode_to(list: &mut ListEncoder, to: Option<&Address>) {
    match to {
        Some(to) => list.address(to),
        None => list.bytes(&[]),
    };
}

/// Reads the trailing `[v, r, s]` fields.
fn decode_signature(fields: &[RlpItem<'_>]) -> Result<Signature, TxError> {
    match fields {
        [v, r, s] => Ok(Signature::new(
            field_u64(v, "v")?,
            field_uint(r, "r")?,
            field_uint(s, "s")?,
        )),
        _ => Err(TxError::UnexpectedListLength(fields.len())),
    }
}
