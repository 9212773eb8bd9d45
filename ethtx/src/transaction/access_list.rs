//! EIP-2930 access list encoding: `[[address, [storageKey, ...]], ...]`.

use ethtx_common::{AccessList, AccessTuple, RlpError, TxError};

use crate::rlp::{ListEncoder, RlpItem};

fn invalid(_: RlpError) -> TxError {
    TxError::InvalidField("accessList")
}

/// Decodes an access list item.
pub fn decode_access_list(item: &RlpItem<'_>) -> Result<AccessList, TxError> {
    item.iter()
        .map_err(invalid)?
        .map(|entry| decode_tuple(&entry.map_err(invalid)?))
        .collect()
}

fn decode_tuple(entry: &RlpItem<'_>) -> Result<AccessTuple, TxError> {
    let parts = entry.to_list().map_err(invalid)?;
    let [address, keys] = parts.as_slice() else {
        return Err(TxError::InvalidField("accessList"));
    };

    let address = address.to_address().map_err(invalid)?;
    let storage_keys = keys
        .iter()
        .map_err(invalid)?
        .map(|key| key.and_then(|key| key.to_bytes32()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid)?;

    Ok(AccessTuple::new(address, storage_keys))
}

/// Appends `access_list` to `list` as a nested list item.
pub fn encode_access_list(list: &mut ListEncoder, access_list: &[AccessTuple]) {
    let mut outer = ListEncoder::new();
    for tuple in access_list {
        let mut keys = ListEncoder::new();
        for key in &tuple.storage_keys {
            keys.bytes(key.as_slice());
        }

        let mut entry = ListEncoder::new();
        entry.address(&tuple.address).raw(&keys.finish());
        outer.raw(&entry.finish());
    }
    list.raw(&outer.finish());
}
