//! Setting and clearing address capability bits.

use crate::{ExecutorError, StandardTxExecutor};
use keystone_transactions::consortium::AddAddressStateTx;
use keystone_transactions::{syntactic_verify, TxError};
use keystone_types::AddressState;
use keystone_utxo::{consume, produce};
use std::collections::BTreeMap;

/// Whether holders of `roles` may toggle `bit`.
///
/// Admins may toggle anything. KYC statuses need the KYC role and the
/// registered-node status needs the validator role. Roles can only be
/// granted by admins.
pub fn verify_access(roles: AddressState, bit: AddressState) -> bool {
    if roles.contains(AddressState::ROLE_ADMIN) {
        true
    } else if AddressState::KYC_BITS.intersects(bit) {
        roles.contains(AddressState::ROLE_KYC)
    } else if AddressState::REGISTERED_NODE.intersects(bit) {
        roles.contains(AddressState::ROLE_VALIDATOR)
    } else {
        !AddressState::ROLE_BITS.intersects(bit)
    }
}

impl StandardTxExecutor<'_> {
    pub(crate) fn add_address_state(
        &mut self,
        body: &AddAddressStateTx,
    ) -> Result<(), ExecutorError> {
        syntactic_verify(self.tx, &self.backend.ctx)?;

        let signers = self
            .backend
            .fx
            .recover_addresses(&self.tx.unsigned, &self.tx.auth.spend)
            .map_err(ExecutorError::RecoverAddresses)?;
        if signers.is_empty() {
            return Err(ExecutorError::WrongNumberOfCredentials { got: 0 });
        }

        let mut roles = AddressState::EMPTY;
        for signer in &signers {
            roles = roles | self.state.get_address_states(signer)?;
        }

        let bit = AddressState::bit(body.state).ok_or(TxError::InvalidAddressState(body.state))?;
        if !verify_access(roles, bit) {
            return Err(ExecutorError::InvalidRoles {
                roles,
                bit: body.state,
            });
        }

        let states = self.state.get_address_states(&body.address)?;
        let new_states = if body.remove {
            states.without(bit)
        } else {
            states.with(bit)
        };

        let fees = BTreeMap::from([(self.backend.ctx.fee_asset_id, self.backend.config.tx_fee)]);
        self.backend.flow_checker.verify_spend(
            &self.tx.unsigned,
            &*self.state,
            &body.base.ins,
            &body.base.outs,
            &self.tx.auth.spend,
            &fees,
        )?;

        consume(&mut *self.state, &body.base.ins)?;
        produce(&mut *self.state, self.tx.id(), &body.base.outs)?;
        if new_states != states {
            self.state.set_address_states(body.address, new_states)?;
        }
        Ok(())
    }
}
