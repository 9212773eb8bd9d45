//! Golden vector tests for the transaction codec.
//!
//! Vectors come from:
//! - The EIP-155 reference transaction
//! - Sepolia-shaped transactions of every supported type, signed with the
//!   EIP-155 example key (`0x4646...46`)
//!
//! Run with: cargo test --test golden_vectors

use ethtx::crypto::keccak256;
use ethtx::rlp::ListEncoder;
use ethtx::{
    decode, encode, signing_hash, tx_hash, tx_type, AccessTuple, Address, Tx, TxEip1559,
    TxEip2930, TxError, TxLegacy, TxType, B256, U256,
};
use hex_literal::hex;

/// Sender for every vector below.
const SENDER: Address = Address::new(hex!("9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"));

const SEPOLIA: u64 = 0xaa36a7;

const RECIPIENT: Address = Address::new(hex!("f6b11c29307d230668536721537250e35124973c"));

fn test_key() -> k256::ecdsa::SigningKey {
    k256::ecdsa::SigningKey::from_slice(&[0x46u8; 32]).unwrap()
}

// =============================================================================
// Legacy
// =============================================================================

mod legacy {
    use super::*;

    const EIP155_REFERENCE: [u8; 110] = hex!(
        "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
    );

    /// ERC-20 `transfer(0x1f04...49b6, 1000)` on Sepolia.
    const SEPOLIA_TRANSFER: [u8; 176] = hex!(
        "f8ae0585067d17cbe4830f424094f6b11c29307d230668536721537250e35124973c80b844a9059cbb0000000000000000000000001f04a27318db3ec532e517dd0396f9a0c40349b600000000000000000000000000000000000000000000000000000000000003e88401546d72a0b6e1aa9a504853693bf936053b1b6d3dec7de2ae861d109cd5320df1356f07f0a03614eca9d0dc3cfa4d6675d2efc96a50d12034dad43b3724d23f120de643e2b9"
    );

    const FRONTIER: [u8; 110] = hex!(
        "f86c808504a817c800825208943535353535353535353535353535353535353535880de0b6b3a7640000801ca0ae4ec29e5426516043e3bbfd7950486f0301c1b640f1173c05928ac063e1bcdba03006963cacd3ec33bfc3c37a8f56187a33a333b01a7e11e405424aaedcdbc3f4"
    );

    /// [`FRONTIER`] with `s` replaced by `n - s` and the parity flipped.
    const FRONTIER_HIGH_S: [u8; 110] = hex!(
        "f86c808504a817c800825208943535353535353535353535353535353535353535880de0b6b3a7640000801ba0ae4ec29e5426516043e3bbfd7950486f0301c1b640f1173c05928ac063e1bcdba0cff969c3532c13cc403c3c8570a9e784870ba93694ca8e57ba9013ddf35a7d4d"
    );

    #[test]
    fn test_eip155_reference() {
        let tx = decode(&EIP155_REFERENCE).unwrap();
        assert_eq!(tx_type(&tx), TxType::Legacy);
        assert_eq!(tx.chain_id(), Some(1));
        assert_eq!(tx.signature().v, 37);
        assert_eq!(tx.sender(), SENDER);
        assert_eq!(
            signing_hash(&tx).unwrap(),
            B256::from(hex!(
                "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
            ))
        );
        assert_eq!(
            tx_hash(&tx).unwrap(),
            B256::from(hex!(
                "33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788"
            ))
        );
    }

    #[test]
    fn test_sepolia_transfer() {
        let tx = decode(&SEPOLIA_TRANSFER).unwrap();
        let Tx::Legacy(inner) = &tx else {
            panic!("expected legacy, got {}", tx.tx_type());
        };
        assert_eq!(inner.nonce, U256::from(5));
        assert_eq!(inner.gas_price, U256::from(0x67d17cbe4u64));
        assert_eq!(inner.gas_limit, U256::from(0xf4240));
        assert_eq!(inner.to, Some(RECIPIENT));
        assert_eq!(inner.value, U256::ZERO);
        assert_eq!(inner.signature.v, 0x1546d72);
        assert_eq!(inner.chain_id(), Some(SEPOLIA));
        assert_eq!(tx.selector(), Some(hex!("a9059cbb")));
        assert_eq!(tx.sender(), SENDER);
        assert_eq!(
            tx.signing_hash().unwrap(),
            B256::from(hex!(
                "cee1eb2e92519a3f1f60526083328cd34865a15bedadea4c6286453c0d9e0b07"
            ))
        );
        assert_eq!(
            tx.tx_hash().unwrap(),
            B256::from(hex!(
                "0adfe32f694e4f72f3825ad726326a45f182ffefee58937e67eceadd9920549f"
            ))
        );
        assert_eq!(encode(&tx).unwrap(), SEPOLIA_TRANSFER.to_vec());
    }

    #[test]
    fn test_frontier() {
        let tx = decode(&FRONTIER).unwrap();
        assert_eq!(tx.chain_id(), None);
        assert!(tx.signature().is_frontier());
        assert_eq!(tx.sender(), SENDER);
        assert_eq!(
            tx.signing_hash().unwrap(),
            B256::from(hex!(
                "597779acf7a80f7bd5089cbfe09ee7bb0749dc593e38b85d17c5f4ab81c34600"
            ))
        );
        assert_eq!(
            tx.tx_hash().unwrap(),
            B256::from(hex!(
                "c353f8510f1f9769ce8d57f51cdff5cf090c3fcb31a97f784e7f6f5dfe803280"
            ))
        );
    }

    #[test]
    fn test_high_s_rejected() {
        assert_eq!(decode(&FRONTIER_HIGH_S), Err(TxError::InvalidSignatureS));
    }

    #[test]
    fn test_resign_reproduces_reference() {
        let tx = decode(&EIP155_REFERENCE).unwrap();
        let Tx::Legacy(mut body) = tx.clone() else {
            unreachable!();
        };
        body.signature = Default::default();
        body.from = Address::ZERO;
        let body = body.with_chain_id(Some(1)).unwrap();
        assert_eq!(Tx::Legacy(body).sign(&test_key()).unwrap(), tx);
    }

    #[test]
    fn test_changed_data_changes_sender() {
        let tx = decode(&SEPOLIA_TRANSFER).unwrap();
        let Tx::Legacy(mut body) = tx else {
            unreachable!();
        };
        let mut input = body.input.to_vec();
        *input.last_mut().unwrap() ^= 0x01;
        body.input = input.into();

        match Tx::Legacy(body).recover_sender() {
            Ok(sender) => assert_ne!(sender, SENDER),
            Err(err) => assert!(err.is_signature_error()),
        }
    }

    #[test]
    fn test_recovery_is_deterministic() {
        let tx = decode(&SEPOLIA_TRANSFER).unwrap();
        assert_eq!(tx.recover_sender().unwrap(), tx.recover_sender().unwrap());
    }

    #[test]
    fn test_unsigned_legacy_round_trip() {
        let body = TxLegacy {
            nonce: U256::from(1),
            gas_price: U256::from(1),
            gas_limit: U256::from(21000),
            to: Some(RECIPIENT),
            ..Default::default()
        };
        let body = body.with_chain_id(Some(SEPOLIA)).unwrap();
        let tx = Tx::Legacy(body).sign(&test_key()).unwrap();
        let encoded = encode(&tx).unwrap();
        assert_eq!(decode(&encoded).unwrap(), tx);
    }

    fn contains_zero_recipient(encoded: &[u8]) -> bool {
        let mut field = vec![0x94];
        field.extend_from_slice(&[0u8; 20]);
        encoded.windows(field.len()).any(|w| w == field.as_slice())
    }

    #[test]
    fn test_zero_address_recipient() {
        let body = TxLegacy {
            nonce: U256::from(2),
            gas_price: U256::from(1_000_000_000u64),
            gas_limit: U256::from(21000),
            to: Some(Address::ZERO),
            value: U256::from(1),
            ..Default::default()
        }
        .with_chain_id(Some(1))
        .unwrap();
        let tx = Tx::Legacy(body).sign(&test_key()).unwrap();
        let encoded = encode(&tx).unwrap();
        assert!(contains_zero_recipient(&encoded));

        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded.to(), Some(Address::ZERO));
        assert!(!decoded.is_contract_creation());
        assert_eq!(decoded.sender(), SENDER);
        assert_eq!(decoded.tx_hash().unwrap(), keccak256(&encoded));
        assert_eq!(encode(&decoded).unwrap(), encoded);
    }

    #[test]
    fn test_raw_parity_v() {
        let tx = Tx::Legacy(TxLegacy {
            nonce: U256::from(5),
            gas_price: U256::from(1),
            gas_limit: U256::from(21000),
            to: Some(RECIPIENT),
            ..Default::default()
        })
        .sign(&test_key())
        .unwrap();
        let Tx::Legacy(mut body) = tx else {
            panic!("expected legacy");
        };
        assert!(body.signature.is_frontier());
        body.signature.v -= 27;

        let encoded = encode(&Tx::Legacy(body.clone())).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert!(decoded.signature().v <= 1);
        assert_eq!(decoded.chain_id(), None);
        assert_eq!(decoded.sender(), SENDER);
        assert_eq!(decoded.signing_hash().unwrap(), body.signing_hash());
        assert_eq!(encode(&decoded).unwrap(), encoded);
    }
}

// =============================================================================
// EIP-2930
// =============================================================================

mod eip2930 {
    use super::*;

    const ACCESS_LIST_CALL: [u8; 166] = hex!(
        "01f8a301018506fc23ac0082c35094f6b11c29307d230668536721537250e35124973c8084deadbeeff838f794f6b11c29307d230668536721537250e35124973ce1a0000000000000000000000000000000000000000000000000000000000000000101a0d30de499d37d050c73683341b26268b25d0e297e3ab7842fa4ee5b6c881168f9a06f1c4047d3e59b393111d7bdf19dcf05ae2dde903e6836a88a11f699b00a6b9b"
    );

    #[test]
    fn test_access_list_call() {
        let tx = decode(&ACCESS_LIST_CALL).unwrap();
        let Tx::AccessList(inner) = &tx else {
            panic!("expected eip2930, got {}", tx.tx_type());
        };
        assert_eq!(inner.chain_id, 1);
        assert_eq!(inner.nonce, U256::from(1));
        assert_eq!(inner.gas_price, U256::from(30_000_000_000u64));
        assert_eq!(inner.gas_limit, U256::from(50_000));
        assert_eq!(&inner.input[..], &hex!("deadbeef"));
        assert_eq!(
            inner.access_list,
            vec![AccessTuple::new(RECIPIENT, vec![B256::with_last_byte(1)])]
        );
        assert_eq!(inner.signature.v, 1);
        assert_eq!(tx.sender(), SENDER);
        assert_eq!(
            tx.signing_hash().unwrap(),
            B256::from(hex!(
                "d34e66985ccb7795af8c5b8263a31a8bae46e234c620131997d45ac82a1fe2ed"
            ))
        );
        assert_eq!(
            tx.tx_hash().unwrap(),
            B256::from(hex!(
                "6d74384c4fbd3b8a55af945e0c062f748ef405bbc63bc5e0abfed69b1e94c84e"
            ))
        );
        assert_eq!(encode(&tx).unwrap(), ACCESS_LIST_CALL.to_vec());
    }

    fn typed_with_fields(count: usize) -> Vec<u8> {
        let mut list = ListEncoder::new();
        for _ in 0..count {
            list.u64(1);
        }
        let mut out = vec![0x01];
        out.extend_from_slice(&list.finish());
        out
    }

    #[test]
    fn test_wrong_field_counts() {
        assert_eq!(
            decode(&typed_with_fields(10)),
            Err(TxError::UnexpectedListLength(10))
        );
        assert_eq!(
            decode(&typed_with_fields(12)),
            Err(TxError::UnexpectedListLength(12))
        );
    }

    #[test]
    fn test_access_list_survives_round_trip() {
        let key = B256::from(hex!(
            "0000000000000000000000000000000000000000000000000000000000000007"
        ));
        let tx = Tx::AccessList(TxEip2930 {
            chain_id: SEPOLIA,
            gas_limit: U256::from(30_000),
            to: Some(RECIPIENT),
            access_list: vec![AccessTuple::new(RECIPIENT, vec![key])],
            ..Default::default()
        })
        .sign(&test_key())
        .unwrap();

        let decoded = decode(&encode(&tx).unwrap()).unwrap();
        let list = decoded.access_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].address, RECIPIENT);
        assert_eq!(list[0].storage_keys, vec![key]);
    }

    fn with_storage_key(key: &[u8]) -> Vec<u8> {
        let mut keys = ListEncoder::new();
        keys.bytes(key);
        let mut entry = ListEncoder::new();
        entry.address(&RECIPIENT).raw(&keys.finish());
        let mut access_list = ListEncoder::new();
        access_list.raw(&entry.finish());

        let mut list = ListEncoder::new();
        list.u64(1).u64(0).u64(1).u64(30_000).address(&RECIPIENT);
        list.u64(0).bytes(&[]).raw(&access_list.finish());
        list.u64(0).u64(1).u64(1);
        let mut out = vec![0x01];
        out.extend_from_slice(&list.finish());
        out
    }

    #[test]
    fn test_storage_key_must_be_a_full_word() {
        assert_eq!(
            decode(&with_storage_key(&[0x07])),
            Err(TxError::InvalidField("accessList"))
        );
        assert_eq!(
            decode(&with_storage_key(&[0x07; 31])),
            Err(TxError::InvalidField("accessList"))
        );
        // A full word gets past the access list and fails on the dummy signature.
        assert_ne!(
            decode(&with_storage_key(&[0x07; 32])),
            Err(TxError::InvalidField("accessList"))
        );
    }
}

// =============================================================================
// EIP-1559
// =============================================================================

mod eip1559 {
    use super::*;

    const TRANSFER: [u8; 119] = hex!(
        "02f87483aa36a707843b9aca00843ba964dc82520894f6b11c29307d230668536721537250e35124973c87038d7ea4c6800080c080a0344c373497ade834b74e009c246b6f6b207ff1e3893ef9b6a0026a447dd42933a07fce4f59214f336f2785d10459b3e29b4edbec8537c44d5a69bf0f51246b7786"
    );

    const CREATE: [u8; 145] = hex!(
        "02f88e83aa36a7038459682f00850a9b6263d8830208388080b36080604052348015600f57600080fd5b50603f80601d6000396000f3fe6080604052600080fdfea164736f6c6343000818000ac001a0e40e52819167e56c72facbefd94fd582ab55ef0bd1e8b5ed9a8682100b98a64ca01e180311a4ea65b68ff6274960c3551387e0625eb2aa8beb78d810dcb5115f12"
    );

    #[test]
    fn test_transfer() {
        let tx = decode(&TRANSFER).unwrap();
        let Tx::DynamicFee(inner) = &tx else {
            panic!("expected eip1559, got {}", tx.tx_type());
        };
        assert_eq!(inner.chain_id, SEPOLIA);
        assert_eq!(inner.nonce, U256::from(7));
        assert_eq!(inner.max_priority_fee_per_gas, U256::from(0x3b9aca00u64));
        assert_eq!(inner.max_fee_per_gas, U256::from(0x3ba964dcu64));
        assert_eq!(inner.gas_limit, U256::from(21000));
        assert_eq!(inner.to, Some(RECIPIENT));
        assert_eq!(inner.value, U256::from(1_000_000_000_000_000u64));
        assert!(inner.access_list.is_empty());
        assert_eq!(tx.sender(), SENDER);
        assert_eq!(
            tx.signing_hash().unwrap(),
            B256::from(hex!(
                "ec95c7e42a24cc4234986d6fd57390a8f153308eb24e42574ce6efd9904964f4"
            ))
        );
        assert_eq!(
            tx.tx_hash().unwrap(),
            B256::from(hex!(
                "aaf2f14e9375822b5e3498e5fe136e68f3dee648ecd804d5cb5e989161588ad1"
            ))
        );
        assert_eq!(encode(&tx).unwrap(), TRANSFER.to_vec());
    }

    #[test]
    fn test_contract_creation() {
        let tx = decode(&CREATE).unwrap();
        let Tx::DynamicFee(inner) = &tx else {
            panic!("expected eip1559, got {}", tx.tx_type());
        };
        assert_eq!(inner.nonce, U256::from(3));
        assert_eq!(inner.to, None);
        assert_eq!(inner.gas_limit, U256::from(0x20838));
        assert_eq!(inner.max_priority_fee_per_gas, U256::from(0x59682f00u64));
        assert_eq!(inner.max_fee_per_gas, U256::from(0xa9b6263d8u64));
        assert_eq!(inner.chain_id, SEPOLIA);
        assert!(tx.is_contract_creation());
        assert_eq!(tx.to(), None);
        assert_eq!(tx.sender(), SENDER);
        assert_eq!(
            tx.signing_hash().unwrap(),
            B256::from(hex!(
                "5b0652e06fb3edecb254d2bb28cab1888019c9071c80fae975eb1c24b402911e"
            ))
        );
        assert_eq!(
            tx.tx_hash().unwrap(),
            B256::from(hex!(
                "381ccd83d19ce17fd54618ffbddbc0c048243e4db65db5bc8ea169efaf301e40"
            ))
        );
        assert_eq!(encode(&tx).unwrap(), CREATE.to_vec());
    }

    #[test]
    fn test_wrong_field_count() {
        let mut body = TRANSFER[1..].to_vec();
        // Drop `s` (33 bytes) and shrink the list header accordingly.
        body.truncate(body.len() - 33);
        body[1] -= 33;
        let mut data = vec![0x02];
        data.extend_from_slice(&body);
        assert_eq!(decode(&data), Err(TxError::UnexpectedListLength(11)));
    }
}

// =============================================================================
// Rejections
// =============================================================================

mod rejections {
    use super::*;

    #[test]
    fn test_blob_tag() {
        assert_eq!(
            decode(&hex!("03c0")),
            Err(TxError::UnsupportedTransactionType(0x03))
        );
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            decode(&hex!("04c0")),
            Err(TxError::UnsupportedTransactionType(0x04))
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(decode(&[]), Err(TxError::EmptyTransaction));
    }
}

// =============================================================================
// Round trips
// =============================================================================

mod round_trip {
    use super::*;
    use proptest::prelude::*;

    fn any_u256() -> impl Strategy<Value = U256> {
        any::<[u64; 4]>().prop_map(U256::from_limbs)
    }

    fn any_address() -> impl Strategy<Value = Address> {
        any::<[u8; 20]>().prop_map(Address::new)
    }

    fn any_access_list() -> impl Strategy<Value = Vec<AccessTuple>> {
        proptest::collection::vec(
            (
                any_address(),
                proptest::collection::vec(any::<[u8; 32]>().prop_map(B256::new), 0..3),
            )
                .prop_map(|(address, keys)| AccessTuple::new(address, keys)),
            0..3,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_eip1559_round_trip(
            chain_id in 1u64..u64::MAX / 4,
            nonce in any_u256(),
            fees in (any_u256(), any_u256()),
            gas_limit in any_u256(),
            to in proptest::option::of(any_address()),
            value in any_u256(),
            input in proptest::collection::vec(any::<u8>(), 0..200),
            access_list in any_access_list(),
        ) {
            let tx = Tx::DynamicFee(TxEip1559 {
                chain_id,
                nonce,
                max_priority_fee_per_gas: fees.0,
                max_fee_per_gas: fees.1,
                gas_limit,
                to,
                value,
                input: input.into(),
                access_list,
                ..Default::default()
            })
            .sign(&test_key())
            .unwrap();

            let encoded = encode(&tx).unwrap();
            let decoded = decode(&encoded).unwrap();
            prop_assert_eq!(&decoded, &tx);
            prop_assert_eq!(decoded.sender(), SENDER);
            prop_assert_eq!(encode(&decoded).unwrap(), encoded);
        }

        #[test]
        fn prop_legacy_round_trip(
            chain_id in proptest::option::of(1u64..u64::MAX / 4),
            nonce in any_u256(),
            gas_price in any_u256(),
            to in any_address(),
            input in proptest::collection::vec(any::<u8>(), 0..200),
        ) {
            let body = TxLegacy {
                nonce,
                gas_price,
                gas_limit: U256::from(21000),
                to: Some(to),
                input: input.into(),
                ..Default::default()
            }
            .with_chain_id(chain_id)
            .unwrap();
            let tx = Tx::Legacy(body).sign(&test_key()).unwrap();

            let decoded = decode(&encode(&tx).unwrap()).unwrap();
            prop_assert_eq!(decoded.chain_id(), chain_id);
            prop_assert_eq!(&decoded, &tx);
        }
    }
}
