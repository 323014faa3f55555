//! Proposal execution: settling an expired staker on both branches.

use crate::{Backend, ExecutorError};
use keystone_store::{ChainState, Staker};
use keystone_transactions::staking::BondedRewardValidatorTx;
use keystone_transactions::{LockModeVariant, RewardValidatorVariant, Tx, UnsignedTx};
use keystone_types::{LockState, TxId, PRIMARY_NETWORK_ID};
use keystone_utxo::{consume, produce};
use tracing::{debug, warn};

/// Executes a proposal transaction against the commit and abort branches.
///
/// Both branches receive identical mutations; which one survives is decided
/// outside the executor.
pub struct ProposalTxExecutor<'a> {
    pub backend: &'a Backend,
    pub on_commit: &'a mut dyn ChainState,
    pub on_abort: &'a mut dyn ChainState,
    pub tx: &'a Tx,
}

impl<'a> ProposalTxExecutor<'a> {
    pub fn new(
        backend: &'a Backend,
        on_commit: &'a mut dyn ChainState,
        on_abort: &'a mut dyn ChainState,
        tx: &'a Tx,
    ) -> Self {
        Self {
            backend,
            on_commit,
            on_abort,
            tx,
        }
    }

    pub fn execute(&mut self) -> Result<(), ExecutorError> {
        let tx = self.tx;
        match &tx.unsigned {
            UnsignedTx::RewardValidator(variant) => self.reward_validator(variant)?,
            other => return Err(ExecutorError::WrongTxType { kind: other.kind() }),
        }
        debug!(tx_id = %tx.id(), kind = tx.unsigned.kind(), "proposal accepted");
        Ok(())
    }

    fn reward_validator(&mut self, variant: &RewardValidatorVariant) -> Result<(), ExecutorError> {
        let lock_mode = self.on_commit.chain_config().lock_mode_bond_deposit;
        let body = match variant.resolve(lock_mode)? {
            LockModeVariant::Legacy(body) => {
                return self.backend.base.reward_validator(
                    self.backend,
                    &mut *self.on_commit,
                    &mut *self.on_abort,
                    self.tx,
                    body,
                )
            }
            LockModeVariant::Bonded(body) => body,
        };

        let target = body.reward.tx_id;
        if target.is_empty() {
            return Err(ExecutorError::InvalidId);
        }
        if !self.tx.auth.is_empty() {
            return Err(ExecutorError::WrongNumberOfCredentials {
                got: self.tx.auth.len(),
            });
        }

        let (ins, outs) =
            self.backend
                .flow_checker
                .unlock(&*self.on_commit, &[target], LockState::Bonded)?;
        let expected = BondedRewardValidatorTx {
            reward: body.reward,
            ins,
            outs,
        };
        if *body != expected {
            warn!(tx_id = %self.tx.id(), staker_tx_id = %target, "reward body differs from state");
            return Err(ExecutorError::InvalidSystemTxBody);
        }

        let staker = self
            .on_commit
            .current_stakers()?
            .next()
            .ok_or(ExecutorError::StakerNotFound)?;
        if staker.tx_id != target {
            return Err(ExecutorError::RemoveWrongValidator {
                requested: target,
                next: staker.tx_id,
            });
        }
        let now = self.on_commit.timestamp();
        if staker.end_time != now {
            return Err(ExecutorError::RemoveValidatorTooEarly {
                tx_id: target,
                now,
                end: staker.end_time,
            });
        }

        // Primary network validators are removed last, so this must exist.
        if self
            .on_commit
            .get_current_validator(&PRIMARY_NETWORK_ID, &staker.node_id)?
            .is_none()
        {
            warn!(node_id = %staker.node_id, staker_tx_id = %target, "primary network validator missing");
            return Err(ExecutorError::PrimaryValidatorMissing {
                node_id: staker.node_id,
            });
        }

        let staker_tx = self
            .on_commit
            .get_tx(&staker.tx_id)?
            .ok_or(ExecutorError::TxNotFound(staker.tx_id))?;
        if !staker_tx.unsigned.is_validator_tx() {
            warn!(staker_tx_id = %target, kind = staker_tx.unsigned.kind(), "non-validator staker left at its end time");
            return Err(ExecutorError::ShouldBePermissionlessStaker { tx_id: target });
        }

        let tx_id = self.tx.id();
        settle(&mut *self.on_commit, &staker, tx_id, body)?;
        settle(&mut *self.on_abort, &staker, tx_id, body)?;
        Ok(())
    }
}

/// Remove `staker` and release its bond on one branch.
fn settle(
    state: &mut dyn ChainState,
    staker: &Staker,
    tx_id: TxId,
    body: &BondedRewardValidatorTx,
) -> Result<(), ExecutorError> {
    state.delete_current_validator(staker)?;
    consume(state, &body.ins)?;
    produce(state, tx_id, &body.outs)?;
    Ok(())
}
