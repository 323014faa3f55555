//! The state view transactions execute against.

use crate::{MultisigAlias, Staker, StoreError, Utxo};
use keystone_transactions::{Tx, UtxoId};
use keystone_types::{
    Address, AddressState, ChainConfig, Deposit, DepositOffer, NodeId, OfferId, SubnetId,
    Timestamp, TxId,
};

/// A mutable view of chain state at one agreed timestamp.
///
/// Proposal execution works on two independent views, one per branch.
/// Implementations buffer writes; nothing here is durable.
pub trait ChainState {
    fn chain_config(&self) -> ChainConfig;
    fn timestamp(&self) -> Timestamp;
    fn get_tx(&self, tx_id: &TxId) -> Result<Option<Tx>, StoreError>;

    // ── UTXOs ───────────────────────────────────────────────────────────

    fn get_utxo(&self, id: &UtxoId) -> Result<Option<Utxo>, StoreError>;
    fn add_utxo(&mut self, utxo: Utxo) -> Result<(), StoreError>;
    fn delete_utxo(&mut self, id: &UtxoId) -> Result<(), StoreError>;

    // ── Stakers ─────────────────────────────────────────────────────────

    fn get_current_validator(
        &self,
        subnet_id: &SubnetId,
        node_id: &NodeId,
    ) -> Result<Option<Staker>, StoreError>;
    fn get_pending_validator(
        &self,
        subnet_id: &SubnetId,
        node_id: &NodeId,
    ) -> Result<Option<Staker>, StoreError>;
    fn put_pending_validator(&mut self, staker: Staker) -> Result<(), StoreError>;
    fn delete_current_validator(&mut self, staker: &Staker) -> Result<(), StoreError>;

    /// Current stakers, earliest ending first (see [`Staker`]'s ordering).
    fn current_stakers(&self) -> Result<Box<dyn Iterator<Item = Staker> + '_>, StoreError>;

    // ── Deposits ────────────────────────────────────────────────────────

    fn get_deposit_offer(&self, id: &OfferId) -> Result<Option<DepositOffer>, StoreError>;
    fn get_deposit(&self, deposit_tx_id: &TxId) -> Result<Option<Deposit>, StoreError>;
    /// Insert, replace or (with `None`) remove a deposit.
    fn update_deposit(
        &mut self,
        deposit_tx_id: TxId,
        deposit: Option<Deposit>,
    ) -> Result<(), StoreError>;
    fn get_current_supply(&self, subnet_id: &SubnetId) -> Result<u64, StoreError>;
    fn set_current_supply(&mut self, subnet_id: SubnetId, supply: u64) -> Result<(), StoreError>;

    // ── Consortium ──────────────────────────────────────────────────────

    /// Capability mask of `address`; empty if never set.
    fn get_address_states(&self, address: &Address) -> Result<AddressState, StoreError>;
    fn set_address_states(
        &mut self,
        address: Address,
        states: AddressState,
    ) -> Result<(), StoreError>;
    fn get_node_consortium_member(&self, node_id: &NodeId) -> Result<Option<Address>, StoreError>;
    /// Bind `node_id` to `member`, or unbind it with `None`.
    fn set_node_consortium_member(
        &mut self,
        node_id: NodeId,
        member: Option<Address>,
    ) -> Result<(), StoreError>;
    fn get_multisig_alias(&self, address: &Address) -> Result<Option<MultisigAlias>, StoreError>;
}
