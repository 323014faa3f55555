//! Applying a transaction's inputs and outputs to state.

use keystone_store::{ChainState, StoreError, Utxo};
use keystone_transactions::{Lock, TransferableInput, TransferableOutput, UtxoId};
use keystone_types::{LockState, TxId};

/// Remove every UTXO spent by `ins`.
pub fn consume(state: &mut dyn ChainState, ins: &[TransferableInput]) -> Result<(), StoreError> {
    for input in ins {
        state.delete_utxo(&input.utxo_id)?;
    }
    Ok(())
}

/// Add `outs` as UTXOs of `tx_id`, lock tags unchanged.
pub fn produce(
    state: &mut dyn ChainState,
    tx_id: TxId,
    outs: &[TransferableOutput],
) -> Result<(), StoreError> {
    for (index, out) in outs.iter().enumerate() {
        state.add_utxo(to_utxo(tx_id, index, out, out.lock)?)?;
    }
    Ok(())
}

/// Add `outs` as UTXOs of `tx_id`, binding the `applied` lock slots that
/// reference the producing transaction to `tx_id`.
pub fn produce_locked(
    state: &mut dyn ChainState,
    tx_id: TxId,
    outs: &[TransferableOutput],
    applied: LockState,
) -> Result<(), StoreError> {
    for (index, out) in outs.iter().enumerate() {
        let lock = match out.lock {
            Lock::Ids(ids) => Lock::Ids(ids.resolve(tx_id, applied)),
            other => other,
        };
        state.add_utxo(to_utxo(tx_id, index, out, lock)?)?;
    }
    Ok(())
}

fn to_utxo(
    tx_id: TxId,
    index: usize,
    out: &TransferableOutput,
    lock: Lock,
) -> Result<Utxo, StoreError> {
    let output_index = u32::try_from(index)
        .map_err(|_| StoreError::Backend(format!("output index {index} out of range")))?;
    Ok(Utxo {
        id: UtxoId { tx_id, output_index },
        asset_id: out.asset_id,
        amount: out.amount,
        owners: out.owners.clone(),
        lock,
    })
}
