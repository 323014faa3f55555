//! Unspent outputs and multisig aliases.

use keystone_transactions::{Lock, OutputOwners, UtxoId};
use keystone_types::{Address, AssetId, LockState};
use serde::{Deserialize, Serialize};

/// An unspent output. Consumed whole, never partially.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub id: UtxoId,
    pub asset_id: AssetId,
    pub amount: u64,
    pub owners: OutputOwners,
    #[serde(default)]
    pub lock: Lock,
}

impl Utxo {
    pub fn lock_state(&self) -> LockState {
        self.lock
            .lock_ids()
            .map_or(LockState::Unlocked, |ids| ids.lock_state())
    }
}

/// An address standing for a threshold group of other addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigAlias {
    pub id: Address,
    pub owners: OutputOwners,
    #[serde(default)]
    pub memo: Vec<u8>,
}
