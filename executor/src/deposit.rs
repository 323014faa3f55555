//! Opening and unlocking deposits.

use crate::{ExecutorError, StandardTxExecutor};
use keystone_transactions::deposit::{DepositTx, UnlockDepositTx};
use keystone_transactions::locked::verify_lock_mode;
use keystone_transactions::{syntactic_verify, BaseTx, LockModeMismatch};
use keystone_types::error::add_u64;
use keystone_types::{Deposit, LockState, PRIMARY_NETWORK_ID};
use keystone_utxo::{consume, produce, produce_locked};
use tracing::debug;

impl StandardTxExecutor<'_> {
    /// Common entry checks of both deposit kinds.
    fn verify_deposit_kind(&self, base: &BaseTx) -> Result<(), ExecutorError> {
        if !self.lock_mode() {
            return Err(LockModeMismatch {
                lock_mode_bond_deposit: false,
            }
            .into());
        }
        verify_lock_mode(&base.ins, &base.outs, true)?;
        syntactic_verify(self.tx, &self.backend.ctx)?;
        Ok(())
    }

    pub(crate) fn deposit(&mut self, body: &DepositTx) -> Result<(), ExecutorError> {
        self.verify_deposit_kind(&body.base)?;

        let amount = body.deposit_amount()?;
        let offer_id = body.deposit_offer_id;
        let offer = self
            .state
            .get_deposit_offer(&offer_id)?
            .ok_or(ExecutorError::DepositOfferNotFound(offer_id))?;
        let now = self.state.timestamp();

        if offer.is_locked() {
            return Err(ExecutorError::DepositOfferInactive { offer_id });
        }
        if offer.start_time() > now {
            return Err(ExecutorError::DepositOfferNotActiveYet {
                offer_id,
                start: offer.start_time(),
                now,
            });
        }
        if now >= offer.end_time() {
            return Err(ExecutorError::DepositOfferInactive { offer_id });
        }
        if body.deposit_duration < offer.min_duration {
            return Err(ExecutorError::DepositDurationTooSmall {
                duration: body.deposit_duration,
                min: offer.min_duration,
            });
        }
        if body.deposit_duration > offer.max_duration {
            return Err(ExecutorError::DepositDurationTooBig {
                duration: body.deposit_duration,
                max: offer.max_duration,
            });
        }
        if amount < offer.min_amount {
            return Err(ExecutorError::DepositTooSmall {
                amount,
                min: offer.min_amount,
            });
        }

        let config = &self.backend.config;
        self.backend.flow_checker.verify_lock(
            &self.tx.unsigned,
            &*self.state,
            &body.base.ins,
            &body.base.outs,
            &self.tx.auth.spend,
            config.tx_fee,
            self.backend.ctx.fee_asset_id,
            LockState::Deposited,
        )?;

        let deposit = Deposit {
            deposit_offer_id: offer_id,
            duration: body.deposit_duration,
            amount,
            start: now.as_secs(),
            unlocked_amount: 0,
            claimed_reward_amount: 0,
        };
        let reward = deposit.total_reward(&offer);
        let supply = self.state.get_current_supply(&PRIMARY_NETWORK_ID)?;
        let new_supply = add_u64(supply, reward)
            .ok()
            .filter(|s| *s <= config.supply_cap)
            .ok_or(ExecutorError::SupplyOverflow {
                supply,
                reward,
                cap: config.supply_cap,
            })?;

        let tx_id = self.tx.id();
        self.state
            .set_current_supply(PRIMARY_NETWORK_ID, new_supply)?;
        self.state.update_deposit(tx_id, Some(deposit))?;
        consume(&mut *self.state, &body.base.ins)?;
        produce_locked(&mut *self.state, tx_id, &body.base.outs, LockState::Deposited)?;

        debug!(%tx_id, amount, reward, new_supply, "deposit opened");
        Ok(())
    }

    pub(crate) fn unlock_deposit(&mut self, body: &UnlockDepositTx) -> Result<(), ExecutorError> {
        self.verify_deposit_kind(&body.base)?;

        let unlocked = self.backend.flow_checker.verify_unlock_deposit(
            &*self.state,
            &self.tx.unsigned,
            &body.base.ins,
            &body.base.outs,
            &self.tx.auth.spend,
            self.backend.config.tx_fee,
            self.backend.ctx.fee_asset_id,
        )?;

        let mut updates = Vec::with_capacity(unlocked.len());
        for (deposit_tx_id, newly_unlocked) in unlocked {
            let deposit = self
                .state
                .get_deposit(&deposit_tx_id)?
                .ok_or(ExecutorError::DepositNotFound(deposit_tx_id))?;
            let unlocked_amount = add_u64(deposit.unlocked_amount, newly_unlocked)?;
            let offer = self
                .state
                .get_deposit_offer(&deposit.deposit_offer_id)?
                .ok_or(ExecutorError::DepositOfferNotFound(deposit.deposit_offer_id))?;

            let updated = Deposit {
                unlocked_amount,
                ..deposit
            };
            // Kept until both principal and reward are fully paid out.
            let retained = (!updated.is_fully_unlocked()
                || updated.claimed_reward_amount < updated.total_reward(&offer))
            .then_some(updated);
            updates.push((deposit_tx_id, retained));
        }

        for (deposit_tx_id, retained) in updates {
            if retained.is_none() {
                debug!(%deposit_tx_id, "deposit fully unlocked and claimed");
            }
            self.state.update_deposit(deposit_tx_id, retained)?;
        }
        consume(&mut *self.state, &body.base.ins)?;
        produce(&mut *self.state, self.tx.id(), &body.base.outs)?;
        Ok(())
    }
}
