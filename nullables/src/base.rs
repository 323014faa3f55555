//! Nullable base executor that records delegations.

use crate::CallLog;
use keystone_executor::{Backend, BaseExecutor, ExecutorError};
use keystone_store::ChainState;
use keystone_transactions::chain::{CreateChainTx, CreateSubnetTx, ExportTx, ImportTx};
use keystone_transactions::staking::{
    AddDelegatorTx, AddPermissionlessDelegatorTx, AddPermissionlessValidatorTx,
    AddSubnetValidatorTx, AddValidatorTx, RemoveSubnetValidatorTx, RewardValidatorTx,
    TransformSubnetTx,
};
use keystone_transactions::Tx;
use keystone_types::TxId;

/// One delegated call: the kind and the id of the transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delegation {
    pub kind: &'static str,
    pub tx_id: TxId,
    /// Spend credentials the base executor was handed.
    pub spend_credentials: usize,
}

/// Accepts every delegated transaction without touching state.
#[derive(Debug, Default)]
pub struct RecordingBaseExecutor {
    calls: CallLog<Delegation>,
}

impl RecordingBaseExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle on the delegations made after the executor is boxed.
    pub fn calls(&self) -> CallLog<Delegation> {
        self.calls.clone()
    }

    fn record(&self, kind: &'static str, tx: &Tx) -> Result<(), ExecutorError> {
        self.calls.record(Delegation {
            kind,
            tx_id: tx.id(),
            spend_credentials: tx.auth.spend.len(),
        });
        Ok(())
    }
}

impl BaseExecutor for RecordingBaseExecutor {
    fn add_validator(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &AddValidatorTx,
    ) -> Result<(), ExecutorError> {
        self.record("add_validator", tx)
    }

    fn add_subnet_validator(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &AddSubnetValidatorTx,
    ) -> Result<(), ExecutorError> {
        self.record("add_subnet_validator", tx)
    }

    fn add_delegator(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &AddDelegatorTx,
    ) -> Result<(), ExecutorError> {
        self.record("add_delegator", tx)
    }

    fn add_permissionless_validator(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &AddPermissionlessValidatorTx,
    ) -> Result<(), ExecutorError> {
        self.record("add_permissionless_validator", tx)
    }

    fn add_permissionless_delegator(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &AddPermissionlessDelegatorTx,
    ) -> Result<(), ExecutorError> {
        self.record("add_permissionless_delegator", tx)
    }

    fn remove_subnet_validator(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &RemoveSubnetValidatorTx,
    ) -> Result<(), ExecutorError> {
        self.record("remove_subnet_validator", tx)
    }

    fn transform_subnet(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &TransformSubnetTx,
    ) -> Result<(), ExecutorError> {
        self.record("transform_subnet", tx)
    }

    fn create_chain(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &CreateChainTx,
    ) -> Result<(), ExecutorError> {
        self.record("create_chain", tx)
    }

    fn create_subnet(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &CreateSubnetTx,
    ) -> Result<(), ExecutorError> {
        self.record("create_subnet", tx)
    }

    fn import(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &ImportTx,
    ) -> Result<(), ExecutorError> {
        self.record("import", tx)
    }

    fn export(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &ExportTx,
    ) -> Result<(), ExecutorError> {
        self.record("export", tx)
    }

    fn reward_validator(
        &self,
        _: &Backend,
        _: &mut dyn ChainState,
        _: &mut dyn ChainState,
        tx: &Tx,
        _: &RewardValidatorTx,
    ) -> Result<(), ExecutorError> {
        self.record("reward_validator", tx)
    }
}
