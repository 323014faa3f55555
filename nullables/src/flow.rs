//! Nullable flow checker with programmable results.

use crate::CallLog;
use keystone_store::ChainState;
use keystone_transactions::{Credential, TransferableInput, TransferableOutput, UnsignedTx};
use keystone_utxo::{FlowChecker, FlowError, Unlocked};
use keystone_types::{AssetId, LockState, TxId};
use std::collections::BTreeMap;

/// One recorded [`FlowChecker`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowCall {
    VerifyLock {
        fee: u64,
        fee_asset: AssetId,
        lock_state: LockState,
        credentials: usize,
    },
    VerifySpend {
        fees: BTreeMap<AssetId, u64>,
        credentials: usize,
    },
    Unlock {
        tx_ids: Vec<TxId>,
        lock_state: LockState,
    },
    VerifyUnlockDeposit {
        fee: u64,
        credentials: usize,
    },
}

/// A flow checker that accepts everything unless told to fail.
///
/// `unlock` and `verify_unlock_deposit` return whatever was programmed.
#[derive(Debug, Default)]
pub struct NullFlowChecker {
    failure: Option<String>,
    unlocked: Unlocked,
    unlocked_amounts: BTreeMap<TxId, u64>,
    calls: CallLog<FlowCall>,
}

impl NullFlowChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every verification with `reason`.
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    pub fn with_unlock(
        mut self,
        ins: Vec<TransferableInput>,
        outs: Vec<TransferableOutput>,
    ) -> Self {
        self.unlocked = (ins, outs);
        self
    }

    pub fn with_unlocked_amounts(mut self, amounts: BTreeMap<TxId, u64>) -> Self {
        self.unlocked_amounts = amounts;
        self
    }

    /// Handle on the calls made after the checker is boxed.
    pub fn calls(&self) -> CallLog<FlowCall> {
        self.calls.clone()
    }

    fn outcome(&self) -> Result<(), FlowError> {
        match &self.failure {
            Some(reason) => Err(FlowError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

impl FlowChecker for NullFlowChecker {
    fn verify_lock(
        &self,
        _tx: &UnsignedTx,
        _state: &dyn ChainState,
        _ins: &[TransferableInput],
        _outs: &[TransferableOutput],
        creds: &[Credential],
        fee: u64,
        fee_asset: AssetId,
        lock_state: LockState,
    ) -> Result<(), FlowError> {
        self.calls.record(FlowCall::VerifyLock {
            fee,
            fee_asset,
            lock_state,
            credentials: creds.len(),
        });
        self.outcome()
    }

    fn verify_spend(
        &self,
        _tx: &UnsignedTx,
        _state: &dyn ChainState,
        _ins: &[TransferableInput],
        _outs: &[TransferableOutput],
        creds: &[Credential],
        fees: &BTreeMap<AssetId, u64>,
    ) -> Result<(), FlowError> {
        self.calls.record(FlowCall::VerifySpend {
            fees: fees.clone(),
            credentials: creds.len(),
        });
        self.outcome()
    }

    fn unlock(
        &self,
        _state: &dyn ChainState,
        tx_ids: &[TxId],
        lock_state: LockState,
    ) -> Result<Unlocked, FlowError> {
        self.calls.record(FlowCall::Unlock {
            tx_ids: tx_ids.to_vec(),
            lock_state,
        });
        self.outcome()?;
        Ok(self.unlocked.clone())
    }

    fn verify_unlock_deposit(
        &self,
        _state: &dyn ChainState,
        _tx: &UnsignedTx,
        _ins: &[TransferableInput],
        _outs: &[TransferableOutput],
        creds: &[Credential],
        fee: u64,
        _fee_asset: AssetId,
    ) -> Result<BTreeMap<TxId, u64>, FlowError> {
        self.calls.record(FlowCall::VerifyUnlockDeposit {
            fee,
            credentials: creds.len(),
        });
        self.outcome()?;
        Ok(self.unlocked_amounts.clone())
    }
}
