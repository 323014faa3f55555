//! Binding validator nodes to consortium members.

use crate::signatures::{get_owner, verify_node_signature};
use crate::{ExecutorError, StandardTxExecutor};
use keystone_transactions::consortium::RegisterNodeTx;
use keystone_transactions::syntactic_verify;
use keystone_types::{AddressState, LockState};
use keystone_utxo::{consume, produce_locked};
use tracing::debug;

impl StandardTxExecutor<'_> {
    /// Register, swap or relinquish the node of a consortium member.
    ///
    /// The flow check locks the registration stake as `Bonded`, so the
    /// outputs are produced with that lock bound to this transaction.
    pub(crate) fn register_node(&mut self, body: &RegisterNodeTx) -> Result<(), ExecutorError> {
        syntactic_verify(self.tx, &self.backend.ctx)?;

        let member = body.consortium_member_address;
        let states = self.state.get_address_states(&member)?;
        if !states.contains(AddressState::CONSORTIUM) {
            return Err(ExecutorError::NotConsortiumMember(format!(
                "address {member} lacks consortium status"
            )));
        }

        let relinquishing = !body.old_node_id.is_empty();
        let claiming = !body.new_node_id.is_empty();
        if !relinquishing && claiming && states.contains(AddressState::REGISTERED_NODE) {
            return Err(ExecutorError::ConsortiumMemberHasNode { address: member });
        }

        let owner = get_owner(&*self.state, &member)?;
        let member_cred =
            self.tx
                .auth
                .member
                .as_ref()
                .ok_or_else(|| ExecutorError::ConsortiumSignatureMissing {
                    address: member,
                    reason: "no consortium member credential".into(),
                })?;
        self.backend
            .fx
            .verify_permission(
                &self.tx.unsigned,
                &body.consortium_member_auth,
                member_cred,
                &owner,
                self.state.timestamp(),
            )
            .map_err(|e| ExecutorError::ConsortiumSignatureMissing {
                address: member,
                reason: e.to_string(),
            })?;

        if relinquishing {
            let old_owner = self.state.get_node_consortium_member(&body.old_node_id)?;
            if old_owner != Some(member) {
                return Err(ExecutorError::NotNodeOwner {
                    node_id: body.old_node_id,
                });
            }
        }

        if claiming {
            verify_node_signature(
                self.backend,
                self.tx,
                body.new_node_id,
                self.tx.auth.node.as_ref(),
                self.state.timestamp(),
            )?;
        }

        self.backend.flow_checker.verify_lock(
            &self.tx.unsigned,
            &*self.state,
            &body.base.ins,
            &body.base.outs,
            &self.tx.auth.spend,
            self.backend.config.tx_fee,
            self.backend.ctx.fee_asset_id,
            LockState::Bonded,
        )?;

        let tx_id = self.tx.id();
        consume(&mut *self.state, &body.base.ins)?;
        produce_locked(&mut *self.state, tx_id, &body.base.outs, LockState::Bonded)?;

        if relinquishing {
            self.state
                .set_node_consortium_member(body.old_node_id, None)?;
        }
        if claiming {
            self.state
                .set_node_consortium_member(body.new_node_id, Some(member))?;
        }

        // A swap keeps the registered-node bit as it was.
        let new_states = match (relinquishing, claiming) {
            (false, true) => states.with(AddressState::REGISTERED_NODE),
            (_, false) => states.without(AddressState::REGISTERED_NODE),
            (true, true) => states,
        };
        if new_states != states {
            self.state.set_address_states(member, new_states)?;
        }

        debug!(
            %tx_id,
            %member,
            old_node = %body.old_node_id,
            new_node = %body.new_node_id,
            "node registration updated"
        );
        Ok(())
    }
}
