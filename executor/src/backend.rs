//! Collaborators shared by every handler.

use crate::{Config, ExecutorError};
use keystone_store::ChainState;
use keystone_transactions::chain::{CreateChainTx, CreateSubnetTx, ExportTx, ImportTx};
use keystone_transactions::staking::{
    AddDelegatorTx, AddPermissionlessDelegatorTx, AddPermissionlessValidatorTx,
    AddSubnetValidatorTx, AddValidatorTx, RemoveSubnetValidatorTx, RewardValidatorTx,
    TransformSubnetTx,
};
use keystone_transactions::{ChainContext, Fx, Tx};
use keystone_utxo::FlowChecker;

/// Everything a handler needs besides the state view and the transaction.
pub struct Backend {
    pub config: Config,
    pub ctx: ChainContext,
    /// Whether the node has caught up with the network. Time-relative
    /// staking checks only apply once it has.
    pub bootstrapped: bool,
    pub fx: Box<dyn Fx>,
    pub flow_checker: Box<dyn FlowChecker>,
    /// Executor for the legacy staking model and for kinds that have no
    /// bond/deposit specific rules.
    pub base: Box<dyn BaseExecutor>,
}

/// Legacy validation and mutation, one operation per delegated kind.
///
/// Implementations read spend credentials from `tx.auth.spend`; the node and
/// member slots are consumed before delegation.
pub trait BaseExecutor {
    fn add_validator(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &AddValidatorTx,
    ) -> Result<(), ExecutorError>;

    fn add_subnet_validator(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &AddSubnetValidatorTx,
    ) -> Result<(), ExecutorError>;

    fn add_delegator(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &AddDelegatorTx,
    ) -> Result<(), ExecutorError>;

    fn add_permissionless_validator(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &AddPermissionlessValidatorTx,
    ) -> Result<(), ExecutorError>;

    fn add_permissionless_delegator(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &AddPermissionlessDelegatorTx,
    ) -> Result<(), ExecutorError>;

    fn remove_subnet_validator(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &RemoveSubnetValidatorTx,
    ) -> Result<(), ExecutorError>;

    fn transform_subnet(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &TransformSubnetTx,
    ) -> Result<(), ExecutorError>;

    fn create_chain(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &CreateChainTx,
    ) -> Result<(), ExecutorError>;

    fn create_subnet(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &CreateSubnetTx,
    ) -> Result<(), ExecutorError>;

    fn import(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &ImportTx,
    ) -> Result<(), ExecutorError>;

    fn export(
        &self,
        backend: &Backend,
        state: &mut dyn ChainState,
        tx: &Tx,
        body: &ExportTx,
    ) -> Result<(), ExecutorError>;

    /// Legacy reward settlement over both proposal branches.
    fn reward_validator(
        &self,
        backend: &Backend,
        on_commit: &mut dyn ChainState,
        on_abort: &mut dyn ChainState,
        tx: &Tx,
        body: &RewardValidatorTx,
    ) -> Result<(), ExecutorError>;
}
