//! Legacy (pre-EIP-2718) transactions.
//!
//! Wire layout: `rlp([nonce, gasPrice, gasLimit, to, value, data, v, r, s])`.
//!
//! There is no chain id field on the wire. With an EIP-155 signature the
//! chain id is folded into `v`; Frontier signatures (`v` of 27 or 28) carry
//! none, and their signing hash covers only the first six fields.

use alloy_primitives::{Address, Bytes, B256, U256};
use ethtx_common::{Signature, TxError, TxType};

use super::{decode_signature, decode_to, encode_to, expect_len, field_bytes, field_uint};
use crate::crypto::{compute_v, keccak256};
use crate::rlp::{ListEncoder, RlpItem};

/// A legacy transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxLegacy {
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
    /// Recipient; `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub signature: Signature,
    /// Sender recovered from the signature.
    pub from: Address,
}

impl TxLegacy {
    /// Number of fields in the signed encoding.
    pub const FIELD_COUNT: usize = 9;

    /// Chain id derived from `v`, or `None` for Frontier signatures.
    pub fn chain_id(&self) -> Option<u64> {
        chain_id_from_v(self.signature.v)
    }

    /// Sets a placeholder `v` so that [`crate::Tx::sign`] signs for
    /// `chain_id` (EIP-155) or, with `None`, produces a Frontier signature.
    pub fn with_chain_id(mut self, chain_id: Option<u64>) -> Result<Self, TxError> {
        self.signature.v = compute_v(0, chain_id, TxType::Legacy)?;
        Ok(self)
    }

    pub(crate) fn decode_fields(fields: &[RlpItem<'_>]) -> Result<Self, TxError> {
        expect_len(fields, Self::FIELD_COUNT)?;

        Ok(Self {
            nonce: field_uint(&fields[0], "nonce")?,
            gas_price: field_uint(&fields[1], "gasPrice")?,
            gas_limit: field_uint(&fields[2], "gasLimit")?,
            to: decode_to(&fields[3])?,
            value: field_uint(&fields[4], "value")?,
            input: field_bytes(&fields[5], "data")?,
            signature: decode_signature(&fields[6..])?,
            from: Address::ZERO,
        })
    }

    fn encode_unsigned_fields(&self, list: &mut ListEncoder) {
        list.uint(self.nonce)
            .uint(self.gas_price)
            .uint(self.gas_limit);
        encode_to(list, self.to.as_ref());
        list.uint(self.value).bytes(&self.input);
    }

    /// Signed wire encoding.
    pub(crate) fn encode_signed(&self) -> Vec<u8> {
        let mut list = ListEncoder::new();
        self.encode_unsigned_fields(&mut list);
        list.u64(self.signature.v)
            .uint(self.signature.r)
            .uint(self.signature.s);
        list.finish()
    }

    /// The unsigned preimage: six fields for Frontier, plus
    /// `[chainId, 0, 0]` for EIP-155.
    pub fn signing_preimage(&self) -> Vec<u8> {
        let mut list = ListEncoder::new();
        self.encode_unsigned_fields(&mut list);
        if let Some(chain_id) = self.chain_id() {
            list.u64(chain_id).u64(0).u64(0);
        }
        list.finish()
    }

    pub fn signing_hash(&self) -> B256 {
        let preimage = self.signing_preimage();
        log::trace!("legacy signing preimage: {} bytes", preimage.len());
        keccak256(&preimage)
    }
}

/// Derives the EIP-155 chain id folded into a legacy `v`.
///
/// Odd `v` is `chainId * 2 + 35`, even `v` is `chainId * 2 + 36`. Frontier
/// parities (27/28) and raw parities (0/1) carry no chain id.
pub fn chain_id_from_v(v: u64) -> Option<u64> {
    if v < 35 {
        return None;
    }
    Some(if v % 2 == 1 { (v - 35) / 2 } else { (v - 36) / 2 })
}
