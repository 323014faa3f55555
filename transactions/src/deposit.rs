//! Deposit payloads.

use crate::components::{BaseTx, OutputOwners};
use crate::error::TxError;
use keystone_types::{LockState, OfferId};
use serde::{Deserialize, Serialize};

/// Opens a deposit against an offer by deposit-locking outputs to itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositTx {
    pub base: BaseTx,
    pub deposit_offer_id: OfferId,
    pub deposit_duration: u32,
    pub rewards_owner: OutputOwners,
}

impl DepositTx {
    /// Sum of the outputs this transaction deposit-locks to itself.
    pub fn deposit_amount(&self) -> Result<u64, TxError> {
        self.base
            .outs
            .iter()
            .filter(|out| {
                out.lock
                    .lock_ids()
                    .is_some_and(|ids| ids.is_new_lock(LockState::Deposited))
            })
            .try_fold(0u64, |total, out| {
                total.checked_add(out.amount).ok_or(TxError::Overflow)
            })
    }
}

/// Releases deposited value; which deposits and how much is derived from
/// the consumed inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockDepositTx {
    pub base: BaseTx,
}
