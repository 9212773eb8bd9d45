//! EIP-2930 access list transactions (type 0x01).
//!
//! Wire layout: `0x01 || rlp([chainId, nonce, gasPrice, gasLimit, to, value,
//! data, accessList, v, r, s])`. The signing hash is
//! `keccak256(0x01 || rlp([chainId, ..., accessList]))`.

use alloy_primitives::{Address, Bytes, B256, U256};
use ethtx_common::{AccessList, Signature, TxError, TxType};

use super::access_list::{decode_access_list, encode_access_list};
use super::{
    decode_signature, decode_to, encode_to, expect_len, field_bytes, field_u64, field_uint,
    typed_hash,
};
use crate::rlp::{ListEncoder, RlpItem};

/// An EIP-2930 access list transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxEip2930 {
    pub chain_id: u64,
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
    /// Recipient; `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: AccessList,
    pub signature: Signature,
    /// Sender recovered from the signature.
    pub from: Address,
}

impl TxEip2930 {
    /// Number of fields in the signed encoding.
    pub const FIELD_COUNT: usize = 11;

    pub(crate) fn decode_fields(fields: &[RlpItem<'_>]) -> Result<Self, TxError> {
        expect_len(fields, Self::FIELD_COUNT)?;

        Ok(Self {
            chain_id: field_u64(&fields[0], "chainId")?,
            nonce: field_uint(&fields[1], "nonce")?,
            gas_price: field_uint(&fields[2], "gasPrice")?,
            gas_limit: field_uint(&fields[3], "gasLimit")?,
            to: decode_to(&fields[4])?,
            value: field_uint(&fields[5], "value")?,
            input: field_bytes(&fields[6], "data")?,
            access_list: decode_access_list(&fields[7])?,
            signature: decode_signature(&fields[8..])?,
            from: Address::ZERO,
        })
    }

    fn encode_unsigned_fields(&self, list: &mut ListEncoder) {
        list.u64(self.chain_id)
            .uint(self.nonce)
            .uint(self.gas_price)
            .uint(self.gas_limit);
        encode_to(list, self.to.as_ref());
        list.uint(self.value).bytes(&self.input);
        encode_access_list(list, &self.access_list);
    }

    /// Signed RLP body, without the type byte.
    pub(crate) fn encode_signed(&self) -> Vec<u8> {
        let mut list = ListEncoder::new();
        self.encode_unsigned_fields(&mut list);
        list.u64(self.signature.v)
            .uint(self.signature.r)
            .uint(self.signature.s);
        list.finish()
    }

    /// Unsigned RLP body (eight fields), without the type byte.
    pub fn signing_preimage(&self) -> Vec<u8> {
        let mut list = ListEncoder::new();
        self.encode_unsigned_fields(&mut list);
        list.finish()
    }

    pub fn signing_hash(&self) -> B256 {
        typed_hash(TxType::AccessList, &self.signing_preimage())
    }
}
