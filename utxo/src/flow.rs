//! Value-flow verification.

use crate::FlowError;
use keystone_store::ChainState;
use keystone_transactions::{Credential, TransferableInput, TransferableOutput, UnsignedTx};
use keystone_types::{AssetId, LockState, TxId};
use std::collections::BTreeMap;

/// Produced-by-unlock inputs and outputs.
pub type Unlocked = (Vec<TransferableInput>, Vec<TransferableOutput>);

/// Proves that a transaction's inputs pay for its outputs plus fee, that the
/// spender owns the inputs, and that lock states move only in allowed ways.
pub trait FlowChecker {
    /// Verify a flow that locks value as `lock_state` (or spends, for
    /// [`LockState::Unlocked`]), burning `fee` of `fee_asset`.
    #[allow(clippy::too_many_arguments)]
    fn verify_lock(
        &self,
        tx: &UnsignedTx,
        state: &dyn ChainState,
        ins: &[TransferableInput],
        outs: &[TransferableOutput],
        creds: &[Credential],
        fee: u64,
        fee_asset: AssetId,
        lock_state: LockState,
    ) -> Result<(), FlowError>;

    /// Verify a plain spend with per-asset fees and no lock change.
    fn verify_spend(
        &self,
        tx: &UnsignedTx,
        state: &dyn ChainState,
        ins: &[TransferableInput],
        outs: &[TransferableOutput],
        creds: &[Credential],
        fees: &BTreeMap<AssetId, u64>,
    ) -> Result<(), FlowError>;

    /// Inputs and outputs that release the `lock_state` locks held by
    /// `tx_ids`. The result is fully determined by state.
    fn unlock(
        &self,
        state: &dyn ChainState,
        tx_ids: &[TxId],
        lock_state: LockState,
    ) -> Result<Unlocked, FlowError>;

    /// Verify a deposit unlock and return the newly unlocked amount per
    /// deposit tx id.
    #[allow(clippy::too_many_arguments)]
    fn verify_unlock_deposit(
        &self,
        state: &dyn ChainState,
        tx: &UnsignedTx,
        ins: &[TransferableInput],
        outs: &[TransferableOutput],
        creds: &[Credential],
        fee: u64,
        fee_asset: AssetId,
    ) -> Result<BTreeMap<TxId, u64>, FlowError>;
}
