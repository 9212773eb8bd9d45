//! Cryptographic operations for the transaction codec.
//!
//! This module provides:
//! - Keccak256 hashing (Ethereum's hash function)
//! - Signer recovery with low-S enforcement
//! - ECDSA signing with secp256k1 (synthetic transactions, tests)
//! - `v` value normalization (Frontier, EIP-155, typed)
//! - EIP-55 address formatting

use alloy_primitives::{Address, B256, U256};
use ethtx_common::{Signature, TxError, TxType};
use k256::{
    ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
    PublicKey,
};
use tiny_keccak::{Hasher as KeccakHasher, Keccak};

/// Half of the secp256k1 group order.
///
/// `0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0`.
/// Signatures with a larger `s` are malleable duplicates and are rejected.
pub const SECP256K1_HALF_ORDER: U256 = U256::from_limbs([
    0xDFE9_2F46_681B_20A0,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
]);

// =============================================================================
// Keccak256
// =============================================================================

/// Keccak256 hash function as used by Ethereum.
pub fn keccak256(data: &[u8]) -> B256 {
    let mut hasher = Keccak256Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Streaming Keccak256 hasher, used to hash a type byte and an RLP body
/// without concatenating them first.
pub struct Keccak256Hasher {
    inner: Keccak,
}

impl Keccak256Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self {
            inner: Keccak::v256(),
        }
    }

    /// Updates the hasher with data.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalizes and returns the hash.
    pub fn finalize(self) -> B256 {
        let mut output = [0u8; 32];
        self.inner.finalize(&mut output);
        B256::from(output)
    }
}

impl Default for Keccak256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Addresses
// =============================================================================

/// Get Ethereum address from public key.
///
/// Address = keccak256(pubkey[1..])[12..32]
/// (Skip the 0x04 prefix of uncompressed key, take last 20 bytes of hash)
pub fn public_key_to_address(pubkey: &PublicKey) -> Address {
    let encoded = pubkey.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Address controlled by a signing key.
pub fn signing_key_address(signing_key: &SigningKey) -> Address {
    let pubkey: PublicKey = signing_key.verifying_key().into();
    public_key_to_address(&pubkey)
}

/// Format address with EIP-55 checksum.
pub fn to_checksum_address(address: &Address) -> String {
    let hex_lower = hex::encode(address.as_slice());
    let hash = keccak256(hex_lower.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in hex_lower.chars().enumerate() {
        let hash_byte = hash[i / 2];
        let nibble = if i % 2 == 0 {
            hash_byte >> 4
        } else {
            hash_byte & 0x0F
        };

        if c.is_ascii_alphabetic() && nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

// =============================================================================
// V Value Computation
// =============================================================================

/// Reduces a wire `v` to the recovery parity (0 or 1).
///
/// - `v` in {0, 1}: itself (typed transactions)
/// - `v` in {27, 28}: `v - 27` (Frontier)
/// - otherwise: `v - chain_id * 2 - 35` (EIP-155)
pub fn recovery_parity(v: u64, chain_id: Option<u64>) -> Result<u8, TxError> {
    match v {
        0 | 1 => Ok(v as u8),
        27 | 28 => Ok((v - 27) as u8),
        _ => {
            let chain_id = chain_id.ok_or(TxError::InvalidField("v"))?;
            let base = chain_id
                .checked_mul(2)
                .and_then(|x| x.checked_add(35))
                .ok_or(TxError::InvalidField("v"))?;
            match v.checked_sub(base) {
                Some(parity @ (0 | 1)) => Ok(parity as u8),
                _ => Err(TxError::InvalidField("v")),
            }
        }
    }
}

/// Compute the v value from recovery ID.
///
/// - Legacy with chain ID (EIP-155): v = chain_id * 2 + 35 + recovery_id
/// - Legacy without chain ID: v = 27 + recovery_id
/// - Typed transactions (EIP-2930/EIP-1559): v = recovery_id (0 or 1)
pub fn compute_v(recovery_id: u8, chain_id: Option<u64>, tx_type: TxType) -> Result<u64, TxError> {
    match tx_type {
        TxType::Legacy => match chain_id {
            Some(cid) => cid
                .checked_mul(2)
                .and_then(|x| x.checked_add(35))
                .and_then(|x| x.checked_add(recovery_id as u64))
                .ok_or(TxError::InvalidField("chainId")),
            None => Ok(27 + recovery_id as u64),
        },
        TxType::AccessList | TxType::DynamicFee => Ok(recovery_id as u64),
        TxType::Blob => Err(TxError::UnsupportedTransactionType(TxType::Blob.as_u8())),
    }
}

// =============================================================================
// Recovery
// =============================================================================

/// Recovers the signer of `hash`.
///
/// Rejects `s` above [`SECP256K1_HALF_ORDER`] before touching the curve.
pub fn recover_signer(
    hash: &B256,
    signature: &Signature,
    chain_id: Option<u64>,
) -> Result<Address, TxError> {
    if signature.s > SECP256K1_HALF_ORDER {
        log::warn!("rejecting signature with high s value");
        return Err(TxError::InvalidSignatureS);
    }

    let parity = recovery_parity(signature.v, chain_id)?;

    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(&signature.r.to_be_bytes::<32>());
    rs[32..].copy_from_slice(&signature.s.to_be_bytes::<32>());

    let sig = K256Signature::from_slice(&rs).map_err(|_| TxError::SignatureRecoveryFailed)?;
    let recid = RecoveryId::from_byte(parity).ok_or(TxError::SignatureRecoveryFailed)?;

    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &sig, recid).map_err(|_| {
        log::warn!("signature recovery failed");
        TxError::SignatureRecoveryFailed
    })?;

    let address = public_key_to_address(&PublicKey::from(&key));
    if address.is_zero() {
        return Err(TxError::SignatureRecoveryFailed);
    }
    Ok(address)
}

// =============================================================================
// Signing
// =============================================================================

/// Signs a 32-byte hash, returning `(r, s, parity)` with `s` in the lower
/// half of the curve order.
pub fn sign_hash(signing_key: &SigningKey, hash: &B256) -> Result<(U256, U256, u8), TxError> {
    let (mut sig, mut recid) = signing_key
        .sign_prehash_recoverable(hash.as_slice())
        .map_err(|_| TxError::SigningFailed)?;

    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
        recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
    }

    let bytes = sig.to_bytes();
    let r = U256::from_be_slice(&bytes[..32]);
    let s = U256::from_be_slice(&bytes[32..]);

    Ok((r, s, recid.to_byte() & 1))
}
