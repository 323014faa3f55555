//! Standard (single-state) execution and lock-mode dispatch.
//!
//! Every kind except reward settlement runs here. Kinds with no bond/deposit
//! specific rules are screened for foreign lock tags and handed to the base
//! executor; the rest are handled in their own modules.

use crate::signatures::verify_node_signature;
use crate::{Backend, ExecutorError};
use keystone_crypto::Signature;
use keystone_store::ChainState;
use keystone_transactions::chain::ExportTx;
use keystone_transactions::locked::{verify_lock_mode, verify_no_locks};
use keystone_transactions::staking::{
    AddDelegatorTx, AddPermissionlessDelegatorTx, AddPermissionlessValidatorTx,
    AddSubnetValidatorTx,
};
use keystone_transactions::{BaseTx, Credential, CredentialSig, Tx, UnsignedTx};
use keystone_types::PRIMARY_NETWORK_ID;
use tracing::debug;

/// Executes one transaction against one state view.
///
/// Nothing is written unless every check passes.
pub struct StandardTxExecutor<'a> {
    pub backend: &'a Backend,
    pub state: &'a mut dyn ChainState,
    pub tx: &'a Tx,
}

impl<'a> StandardTxExecutor<'a> {
    pub fn new(backend: &'a Backend, state: &'a mut dyn ChainState, tx: &'a Tx) -> Self {
        Self { backend, state, tx }
    }

    pub fn execute(&mut self) -> Result<(), ExecutorError> {
        let tx = self.tx;
        let backend = self.backend;
        let base = backend.base.as_ref();
        match &tx.unsigned {
            UnsignedTx::AddValidator(variant) => self.add_validator(variant)?,
            UnsignedTx::AddSubnetValidator(body) => self.add_subnet_validator(body)?,
            UnsignedTx::AddDelegator(body) => self.add_delegator(body)?,
            UnsignedTx::AddPermissionlessValidator(body) => {
                self.add_permissionless_validator(body)?
            }
            UnsignedTx::AddPermissionlessDelegator(body) => {
                self.add_permissionless_delegator(body)?
            }
            UnsignedTx::RemoveSubnetValidator(body) => {
                self.verify_no_locks(&body.base)?;
                base.remove_subnet_validator(backend, &mut *self.state, tx, body)?
            }
            UnsignedTx::TransformSubnet(body) => {
                self.verify_no_locks(&body.base)?;
                base.transform_subnet(backend, &mut *self.state, tx, body)?
            }
            UnsignedTx::CreateChain(body) => {
                self.verify_no_locks(&body.base)?;
                base.create_chain(backend, &mut *self.state, tx, body)?
            }
            UnsignedTx::CreateSubnet(body) => {
                self.verify_no_locks(&body.base)?;
                base.create_subnet(backend, &mut *self.state, tx, body)?
            }
            UnsignedTx::Import(body) => {
                self.verify_no_locks(&body.base)?;
                base.import(backend, &mut *self.state, tx, body)?
            }
            UnsignedTx::Export(body) => self.export(body)?,
            UnsignedTx::Deposit(body) => self.deposit(body)?,
            UnsignedTx::UnlockDeposit(body) => self.unlock_deposit(body)?,
            UnsignedTx::RegisterNode(body) => self.register_node(body)?,
            UnsignedTx::AddAddressState(body) => self.add_address_state(body)?,
            UnsignedTx::RewardValidator(_) => {
                return Err(ExecutorError::WrongTxType {
                    kind: tx.unsigned.kind(),
                })
            }
        }

        debug!(tx_id = %tx.id(), kind = tx.unsigned.kind(), "transaction accepted");
        Ok(())
    }

    pub(crate) fn lock_mode(&self) -> bool {
        self.state.chain_config().lock_mode_bond_deposit
    }

    fn verify_no_locks(&self, base: &BaseTx) -> Result<(), ExecutorError> {
        Ok(verify_no_locks(&base.ins, &base.outs)?)
    }

    /// Reject kinds that only exist outside lock mode, then check lock tags.
    fn verify_legacy_only(&self, base: &BaseTx) -> Result<(), ExecutorError> {
        if self.lock_mode() {
            return Err(ExecutorError::WrongTxType {
                kind: self.tx.unsigned.kind(),
            });
        }
        Ok(verify_lock_mode(&base.ins, &base.outs, false)?)
    }

    fn add_subnet_validator(&mut self, body: &AddSubnetValidatorTx) -> Result<(), ExecutorError> {
        self.verify_no_locks(&body.base)?;
        if self.state.chain_config().verify_node_signature {
            verify_node_signature(
                self.backend,
                self.tx,
                body.validator.validator.node_id,
                self.tx.auth.node.as_ref(),
                self.state.timestamp(),
            )?;
        }
        self.backend
            .base
            .add_subnet_validator(self.backend, &mut *self.state, self.tx, body)
    }

    fn add_delegator(&mut self, body: &AddDelegatorTx) -> Result<(), ExecutorError> {
        self.verify_legacy_only(&body.base)?;
        self.backend
            .base
            .add_delegator(self.backend, &mut *self.state, self.tx, body)
    }

    fn add_permissionless_validator(
        &mut self,
        body: &AddPermissionlessValidatorTx,
    ) -> Result<(), ExecutorError> {
        self.verify_legacy_only(&body.base)?;

        // The signer's proof of possession doubles as the node's signature.
        if body.subnet == PRIMARY_NETWORK_ID {
            if let Some(signer) = &body.signer {
                let node_id = body.validator.node_id;
                let signature = Signature::from_prefix(&signer.proof_of_possession).ok_or_else(
                    || ExecutorError::NodeSignatureMissing {
                        node_id,
                        reason: "proof of possession is shorter than a signature".into(),
                    },
                )?;
                let cred = Credential {
                    sigs: vec![CredentialSig {
                        public_key: signer.public_key,
                        signature,
                    }],
                };
                verify_node_signature(
                    self.backend,
                    self.tx,
                    node_id,
                    Some(&cred),
                    self.state.timestamp(),
                )?;
            }
        }

        self.backend
            .base
            .add_permissionless_validator(self.backend, &mut *self.state, self.tx, body)
    }

    fn add_permissionless_delegator(
        &mut self,
        body: &AddPermissionlessDelegatorTx,
    ) -> Result<(), ExecutorError> {
        self.verify_legacy_only(&body.base)?;
        self.backend
            .base
            .add_permissionless_delegator(self.backend, &mut *self.state, self.tx, body)
    }

    fn export(&mut self, body: &ExportTx) -> Result<(), ExecutorError> {
        self.verify_no_locks(&body.base)?;
        verify_no_locks(&[], &body.exported_outputs)?;
        self.backend
            .base
            .export(self.backend, &mut *self.state, self.tx, body)
    }
}
