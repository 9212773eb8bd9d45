//! Flat, field-by-field transaction shape.
//!
//! JSON-RPC responses such as `eth_getTransactionByHash` carry every field
//! of every type in one object, with inapplicable fields absent or zero.
//! [`TxFields`] mirrors that shape and converts to and from [`Tx`].

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use ethtx_common::{AccessList, Signature, TxError, TxType};

use super::{Tx, TxEip1559, TxEip2930, TxEip4844, TxLegacy};
use crate::crypto::compute_v;

/// Every transaction field, flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct TxFields {
    pub chain_id: Option<U64>,
    pub nonce: U256,
    pub gas_price: U256,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    #[cfg_attr(feature = "serde", serde(alias = "gas"))]
    pub gas_limit: U256,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    #[cfg_attr(feature = "serde", serde(alias = "data"))]
    pub input: Bytes,
    pub access_list: AccessList,
    pub max_fee_per_blob_gas: U256,
    pub blob_versioned_hashes: Vec<B256>,
    pub v: U64,
    pub r: U256,
    pub s: U256,
    pub from: Address,
}

impl TxFields {
    /// Classifies by which field groups are populated, checked in order:
    /// blob fields, fee-market fields, a non-empty access list.
    pub fn tx_type(&self) -> TxType {
        if !self.max_fee_per_blob_gas.is_zero() || !self.blob_versioned_hashes.is_empty() {
            TxType::Blob
        } else if !self.max_fee_per_gas.is_zero() || !self.max_priority_fee_per_gas.is_zero() {
            TxType::DynamicFee
        } else if !self.access_list.is_empty() {
            TxType::AccessList
        } else {
            TxType::Legacy
        }
    }

    fn signature(&self) -> Signature {
        Signature::new(self.v.to::<u64>(), self.r, self.s)
    }

    fn chain_id(&self) -> Option<u64> {
        self.chain_id.map(|id| id.to::<u64>())
    }

    fn typed_chain_id(&self) -> Result<u64, TxError> {
        self.chain_id().ok_or(TxError::InvalidField("chainId"))
    }
}

impl TryFrom<TxFields> for Tx {
    type Error = TxError;

    /// Builds the variant selected by [`TxFields::tx_type`].
    ///
    /// Signed transactions get `from` recovered from the signature. An
    /// unsigned legacy transaction with a chain id gets a placeholder EIP-155
    /// `v` so that [`Tx::sign`] binds it to that chain. Blob transactions are
    /// taken as given.
    fn try_from(fields: TxFields) -> Result<Self, Self::Error> {
        let mut signature = fields.signature();
        let to = fields.to;

        let mut tx = match fields.tx_type() {
            TxType::Legacy => {
                if signature.is_empty() && signature.v == 0 && fields.chain_id.is_some() {
                    signature.v = compute_v(0, fields.chain_id(), TxType::Legacy)?;
                }
                Tx::Legacy(TxLegacy {
                    nonce: fields.nonce,
                    gas_price: fields.gas_price,
                    gas_limit: fields.gas_limit,
                    to,
                    value: fields.value,
                    input: fields.input,
                    signature,
                    from: fields.from,
                })
            }
            TxType::AccessList => Tx::AccessList(TxEip2930 {
                chain_id: fields.typed_chain_id()?,
                nonce: fields.nonce,
                gas_price: fields.gas_price,
                gas_limit: fields.gas_limit,
                to,
                value: fields.value,
                input: fields.input,
                access_list: fields.access_list,
                signature,
                from: fields.from,
            }),
            TxType::DynamicFee => Tx::DynamicFee(TxEip1559 {
                chain_id: fields.typed_chain_id()?,
                nonce: fields.nonce,
                max_priority_fee_per_gas: fields.max_priority_fee_per_gas,
                max_fee_per_gas: fields.max_fee_per_gas,
                gas_limit: fields.gas_limit,
                to,
                value: fields.value,
                input: fields.input,
                access_list: fields.access_list,
                signature,
                from: fields.from,
            }),
            TxType::Blob => {
                return Ok(Tx::Blob(TxEip4844 {
                    chain_id: fields.typed_chain_id()?,
                    nonce: fields.nonce,
                    max_priority_fee_per_gas: fields.max_priority_fee_per_gas,
                    max_fee_per_gas: fields.max_fee_per_gas,
                    gas_limit: fields.gas_limit,
                    to,
                    value: fields.value,
                    input: fields.input,
                    access_list: fields.access_list,
                    max_fee_per_blob_gas: fields.max_fee_per_blob_gas,
                    blob_versioned_hashes: fields.blob_versioned_hashes,
                    signature,
                    from: fields.from,
                }))
            }
        };

        if !tx.signature().is_empty() {
            let from = tx.recover_sender()?;
            tx.set_from(from);
        }
        Ok(tx)
    }
}

impl From<&Tx> for TxFields {
    fn from(tx: &Tx) -> Self {
        let signature = tx.signature();
        let mut fields = TxFields {
            chain_id: tx.chain_id().map(U64::from),
            nonce: tx.nonce(),
            gas_limit: tx.gas_limit(),
            to: tx.to(),
            value: tx.value(),
            input: tx.input().clone(),
            access_list: tx.access_list().to_vec(),
            v: U64::from(signature.v),
            r: signature.r,
            s: signature.s,
            from: tx.sender(),
            ..Default::default()
        };

        match tx {
            Tx::Legacy(inner) => fields.gas_price = inner.gas_price,
            Tx::AccessList(inner) => fields.gas_price = inner.gas_price,
            Tx::DynamicFee(inner) => {
                fields.max_priority_fee_per_gas = inner.max_priority_fee_per_gas;
                fields.max_fee_per_gas = inner.max_fee_per_gas;
            }
            Tx::Blob(inner) => {
                fields.max_priority_fee_per_gas = inner.max_priority_fee_per_gas;
                fields.max_fee_per_gas = inner.max_fee_per_gas;
                fields.max_fee_per_blob_gas = inner.max_fee_per_blob_gas;
                fields.blob_versioned_hashes = inner.blob_versioned_hashes.clone();
            }
        }
        fields
    }
}
