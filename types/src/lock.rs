//! Bond and deposit lock states.
//!
//! A locked UTXO carries up to two lock ids: the deposit transaction that
//! deposited it and the staking transaction that bonded it. The lock state is
//! derived from which of the two ids is set.

use crate::TxId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lock state of a UTXO, encoded as a two-bit set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LockState {
    Unlocked = 0b00,
    Deposited = 0b01,
    Bonded = 0b10,
    DepositedBonded = 0b11,
}

impl LockState {
    pub fn is_deposited(&self) -> bool {
        (*self as u8) & (LockState::Deposited as u8) != 0
    }

    pub fn is_bonded(&self) -> bool {
        (*self as u8) & (LockState::Bonded as u8) != 0
    }

    pub fn is_locked(&self) -> bool {
        *self != LockState::Unlocked
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LockState::Unlocked => "unlocked",
            LockState::Deposited => "deposited",
            LockState::Bonded => "bonded",
            LockState::DepositedBonded => "deposited+bonded",
        };
        f.write_str(name)
    }
}

/// Lock ids attached to a locked input, output or UTXO.
///
/// An empty id means "not locked in this way".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LockIds {
    pub deposit_tx_id: TxId,
    pub bond_tx_id: TxId,
}

impl LockIds {
    pub const UNLOCKED: Self = Self {
        deposit_tx_id: TxId::EMPTY,
        bond_tx_id: TxId::EMPTY,
    };

    /// Ids of a fresh output locked by the producing transaction itself.
    pub fn this_tx(state: LockState) -> Self {
        let mut ids = Self::UNLOCKED;
        if state.is_deposited() {
            ids.deposit_tx_id = TxId::THIS_TX;
        }
        if state.is_bonded() {
            ids.bond_tx_id = TxId::THIS_TX;
        }
        ids
    }

    pub fn lock_state(&self) -> LockState {
        match (self.deposit_tx_id.is_empty(), self.bond_tx_id.is_empty()) {
            (true, true) => LockState::Unlocked,
            (false, true) => LockState::Deposited,
            (true, false) => LockState::Bonded,
            (false, false) => LockState::DepositedBonded,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_state().is_locked()
    }

    /// Whether the slot selected by `state` references the producing transaction.
    pub fn is_new_lock(&self, state: LockState) -> bool {
        (state.is_deposited() && self.deposit_tx_id == TxId::THIS_TX)
            || (state.is_bonded() && self.bond_tx_id == TxId::THIS_TX)
    }

    /// Replace the [`TxId::THIS_TX`] placeholder in the slots selected by
    /// `applied` with `tx_id`.
    pub fn resolve(&self, tx_id: TxId, applied: LockState) -> Self {
        let mut ids = *self;
        if applied.is_deposited() && ids.deposit_tx_id == TxId::THIS_TX {
            ids.deposit_tx_id = tx_id;
        }
        if applied.is_bonded() && ids.bond_tx_id == TxId::THIS_TX {
            ids.bond_tx_id = tx_id;
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_state_from_ids() {
        let dep = TxId::new([1u8; 32]);
        let bond = TxId::new([2u8; 32]);
        assert_eq!(LockIds::UNLOCKED.lock_state(), LockState::Unlocked);
        let ids = LockIds { deposit_tx_id: dep, bond_tx_id: TxId::EMPTY };
        assert_eq!(ids.lock_state(), LockState::Deposited);
        let ids = LockIds { deposit_tx_id: TxId::EMPTY, bond_tx_id: bond };
        assert_eq!(ids.lock_state(), LockState::Bonded);
        let ids = LockIds { deposit_tx_id: dep, bond_tx_id: bond };
        assert_eq!(ids.lock_state(), LockState::DepositedBonded);
    }

    #[test]
    fn resolve_only_touches_applied_slot() {
        let tx_id = TxId::new([9u8; 32]);
        let ids = LockIds::this_tx(LockState::DepositedBonded);
        let resolved = ids.resolve(tx_id, LockState::Bonded);
        assert_eq!(resolved.bond_tx_id, tx_id);
        assert_eq!(resolved.deposit_tx_id, TxId::THIS_TX);
    }

    #[test]
    fn this_tx_marks_new_lock() {
        let ids = LockIds::this_tx(LockState::Deposited);
        assert!(ids.is_new_lock(LockState::Deposited));
        assert!(!ids.is_new_lock(LockState::Bonded));
    }
}
