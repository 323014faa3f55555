//! Primary network validator admission.

use crate::signatures::{get_owner, get_validator, verify_addrs_owner};
use crate::{ExecutorError, StandardTxExecutor};
use keystone_store::Staker;
use keystone_transactions::locked::verify_lock_mode;
use keystone_transactions::staking::BondedAddValidatorTx;
use keystone_transactions::{syntactic_verify, AddValidatorVariant, LockModeVariant};
use keystone_types::{LockState, PRIMARY_NETWORK_ID};
use keystone_utxo::{consume, produce_locked};

impl StandardTxExecutor<'_> {
    pub(crate) fn add_validator(
        &mut self,
        variant: &AddValidatorVariant,
    ) -> Result<(), ExecutorError> {
        let lock_mode = self.lock_mode();
        match variant.resolve(lock_mode)? {
            LockModeVariant::Legacy(body) => {
                verify_lock_mode(&body.base.ins, &body.base.outs, lock_mode)?;
                self.backend
                    .base
                    .add_validator(self.backend, &mut *self.state, self.tx, body)
            }
            LockModeVariant::Bonded(body) => self.add_bonded_validator(body),
        }
    }

    /// Admit a consortium member's node, bonding its stake in place.
    fn add_bonded_validator(&mut self, body: &BondedAddValidatorTx) -> Result<(), ExecutorError> {
        let ins = &body.base.ins;
        let outs = &body.base.outs;
        verify_lock_mode(ins, outs, true)?;
        syntactic_verify(self.tx, &self.backend.ctx)?;

        let node_id = body.validator.node_id;
        let member = self
            .state
            .get_node_consortium_member(&node_id)?
            .ok_or_else(|| {
                ExecutorError::NotConsortiumMember(format!("node {node_id} has no consortium member"))
            })?;

        let signers = self
            .backend
            .fx
            .recover_addresses(&self.tx.unsigned, &self.tx.auth.spend)
            .map_err(ExecutorError::RecoverAddresses)?;
        let owner = get_owner(&*self.state, &member)?;
        verify_addrs_owner(&signers, &owner).map_err(|e| {
            ExecutorError::ConsortiumSignatureMissing {
                address: member,
                reason: e.to_string(),
            }
        })?;

        let config = &self.backend.config;
        let weight = body.validator.weight;
        let duration = body.validator.duration();
        if weight < config.min_validator_stake {
            return Err(ExecutorError::WeightTooSmall {
                weight,
                min: config.min_validator_stake,
            });
        }
        if weight > config.max_validator_stake {
            return Err(ExecutorError::WeightTooLarge {
                weight,
                max: config.max_validator_stake,
            });
        }
        if duration < config.min_stake_duration {
            return Err(ExecutorError::StakeTooShort {
                duration,
                min: config.min_stake_duration,
            });
        }
        if duration > config.max_stake_duration {
            return Err(ExecutorError::StakeTooLong {
                duration,
                max: config.max_stake_duration,
            });
        }

        if self.backend.bootstrapped {
            let now = self.state.timestamp();
            let start = body.validator.start_time();
            if now >= start {
                return Err(ExecutorError::TimestampNotBeforeStartTime { now, start });
            }
            if get_validator(&*self.state, &PRIMARY_NETWORK_ID, &node_id)?.is_some() {
                return Err(ExecutorError::ValidatorExists { node_id });
            }

            self.backend.flow_checker.verify_lock(
                &self.tx.unsigned,
                &*self.state,
                ins,
                outs,
                &self.tx.auth.spend,
                config.add_primary_network_validator_fee,
                self.backend.ctx.fee_asset_id,
                LockState::Bonded,
            )?;

            // Horizon is checked last.
            let max = now.saturating_add_secs(config.max_future_start_time);
            if start > max {
                return Err(ExecutorError::FutureStakeTime { start, max });
            }
        }

        let tx_id = self.tx.id();
        self.state
            .put_pending_validator(Staker::primary_validator(tx_id, &body.validator))?;
        consume(&mut *self.state, ins)?;
        produce_locked(&mut *self.state, tx_id, outs, LockState::Bonded)?;
        Ok(())
    }
}
