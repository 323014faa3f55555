//! Nullable chain state: an in-memory [`ChainState`] for testing.

use keystone_store::{ChainState, MultisigAlias, Staker, StoreError, Utxo};
use keystone_transactions::{Tx, UtxoId};
use keystone_types::{
    Address, AddressState, ChainConfig, Deposit, DepositOffer, NodeId, OfferId, SubnetId,
    Timestamp, TxId,
};
use std::collections::BTreeMap;

/// An in-memory state view.
///
/// Time only advances when you tell it to. Every mutation through
/// [`ChainState`] is appended to a write log, which equality ignores.
#[derive(Clone, Debug, Default)]
pub struct NullState {
    config: ChainConfig,
    timestamp: Timestamp,
    txs: BTreeMap<TxId, Tx>,
    utxos: BTreeMap<UtxoId, Utxo>,
    current: BTreeMap<(SubnetId, NodeId), Staker>,
    pending: BTreeMap<(SubnetId, NodeId), Staker>,
    offers: BTreeMap<OfferId, DepositOffer>,
    deposits: BTreeMap<TxId, Deposit>,
    supply: BTreeMap<SubnetId, u64>,
    address_states: BTreeMap<Address, AddressState>,
    node_members: BTreeMap<NodeId, Address>,
    aliases: BTreeMap<Address, MultisigAlias>,
    writes: Vec<&'static str>,
}

impl NullState {
    pub fn new(config: ChainConfig, timestamp: Timestamp) -> Self {
        Self {
            config,
            timestamp,
            ..Self::default()
        }
    }

    // ── Clock ───────────────────────────────────────────────────────────

    /// Advance chain time by a number of seconds.
    pub fn advance(&mut self, secs: u64) {
        self.timestamp = self.timestamp.saturating_add_secs(secs);
    }

    pub fn set_config(&mut self, config: ChainConfig) {
        self.config = config;
    }

    // ── Seeding (not logged) ────────────────────────────────────────────

    pub fn insert_tx(&mut self, tx: Tx) {
        self.txs.insert(tx.id(), tx);
    }

    pub fn insert_utxo(&mut self, utxo: Utxo) {
        self.utxos.insert(utxo.id, utxo);
    }

    pub fn insert_current_staker(&mut self, staker: Staker) {
        self.current
            .insert((staker.subnet_id, staker.node_id), staker);
    }

    pub fn insert_deposit_offer(&mut self, offer: DepositOffer) {
        self.offers.insert(offer.id, offer);
    }

    pub fn insert_deposit(&mut self, deposit_tx_id: TxId, deposit: Deposit) {
        self.deposits.insert(deposit_tx_id, deposit);
    }

    pub fn insert_supply(&mut self, subnet_id: SubnetId, supply: u64) {
        self.supply.insert(subnet_id, supply);
    }

    pub fn insert_address_states(&mut self, address: Address, states: AddressState) {
        self.address_states.insert(address, states);
    }

    pub fn insert_node_member(&mut self, node_id: NodeId, member: Address) {
        self.node_members.insert(node_id, member);
    }

    pub fn insert_alias(&mut self, alias: MultisigAlias) {
        self.aliases.insert(alias.id, alias);
    }

    // ── Inspection ──────────────────────────────────────────────────────

    pub fn utxos(&self) -> impl Iterator<Item = &Utxo> {
        self.utxos.values()
    }

    pub fn pending_stakers(&self) -> impl Iterator<Item = &Staker> {
        self.pending.values()
    }

    /// Names of the mutating [`ChainState`] calls made so far, in order.
    pub fn writes(&self) -> &[&'static str] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    fn log(&mut self, op: &'static str) {
        self.writes.push(op);
    }
}

impl PartialEq for NullState {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.timestamp == other.timestamp
            && self.txs == other.txs
            && self.utxos == other.utxos
            && self.current == other.current
            && self.pending == other.pending
            && self.offers == other.offers
            && self.deposits == other.deposits
            && self.supply == other.supply
            && self.address_states == other.address_states
            && self.node_members == other.node_members
            && self.aliases == other.aliases
    }
}

impl ChainState for NullState {
    fn chain_config(&self) -> ChainConfig {
        self.config
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn get_tx(&self, tx_id: &TxId) -> Result<Option<Tx>, StoreError> {
        Ok(self.txs.get(tx_id).cloned())
    }

    fn get_utxo(&self, id: &UtxoId) -> Result<Option<Utxo>, StoreError> {
        Ok(self.utxos.get(id).cloned())
    }

    fn add_utxo(&mut self, utxo: Utxo) -> Result<(), StoreError> {
        self.log("add_utxo");
        self.utxos.insert(utxo.id, utxo);
        Ok(())
    }

    fn delete_utxo(&mut self, id: &UtxoId) -> Result<(), StoreError> {
        self.log("delete_utxo");
        self.utxos.remove(id);
        Ok(())
    }

    fn get_current_validator(
        &self,
        subnet_id: &SubnetId,
        node_id: &NodeId,
    ) -> Result<Option<Staker>, StoreError> {
        Ok(self.current.get(&(*subnet_id, *node_id)).cloned())
    }

    fn get_pending_validator(
        &self,
        subnet_id: &SubnetId,
        node_id: &NodeId,
    ) -> Result<Option<Staker>, StoreError> {
        Ok(self.pending.get(&(*subnet_id, *node_id)).cloned())
    }

    fn put_pending_validator(&mut self, staker: Staker) -> Result<(), StoreError> {
        self.log("put_pending_validator");
        let key = (staker.subnet_id, staker.node_id);
        if self.pending.contains_key(&key) {
            return Err(StoreError::Duplicate(format!(
                "pending validator {}",
                staker.node_id
            )));
        }
        self.pending.insert(key, staker);
        Ok(())
    }

    fn delete_current_validator(&mut self, staker: &Staker) -> Result<(), StoreError> {
        self.log("delete_current_validator");
        self.current
            .remove(&(staker.subnet_id, staker.node_id))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("current validator {}", staker.node_id)))
    }

    fn current_stakers(&self) -> Result<Box<dyn Iterator<Item = Staker> + '_>, StoreError> {
        let mut stakers: Vec<Staker> = self.current.values().cloned().collect();
        stakers.sort();
        Ok(Box::new(stakers.into_iter()))
    }

    fn get_deposit_offer(&self, id: &OfferId) -> Result<Option<DepositOffer>, StoreError> {
        Ok(self.offers.get(id).cloned())
    }

    fn get_deposit(&self, deposit_tx_id: &TxId) -> Result<Option<Deposit>, StoreError> {
        Ok(self.deposits.get(deposit_tx_id).cloned())
    }

    fn update_deposit(
        &mut self,
        deposit_tx_id: TxId,
        deposit: Option<Deposit>,
    ) -> Result<(), StoreError> {
        self.log("update_deposit");
        match deposit {
            Some(deposit) => self.deposits.insert(deposit_tx_id, deposit),
            None => self.deposits.remove(&deposit_tx_id),
        };
        Ok(())
    }

    fn get_current_supply(&self, subnet_id: &SubnetId) -> Result<u64, StoreError> {
        self.supply
            .get(subnet_id)
            .copied()
            .ok_or_else(|| StoreError::NotFound(format!("supply of subnet {subnet_id}")))
    }

    fn set_current_supply(&mut self, subnet_id: SubnetId, supply: u64) -> Result<(), StoreError> {
        self.log("set_current_supply");
        self.supply.insert(subnet_id, supply);
        Ok(())
    }

    fn get_address_states(&self, address: &Address) -> Result<AddressState, StoreError> {
        Ok(self.address_states.get(address).copied().unwrap_or_default())
    }

    fn set_address_states(
        &mut self,
        address: Address,
        states: AddressState,
    ) -> Result<(), StoreError> {
        self.log("set_address_states");
        self.address_states.insert(address, states);
        Ok(())
    }

    fn get_node_consortium_member(&self, node_id: &NodeId) -> Result<Option<Address>, StoreError> {
        Ok(self.node_members.get(node_id).copied())
    }

    fn set_node_consortium_member(
        &mut self,
        node_id: NodeId,
        member: Option<Address>,
    ) -> Result<(), StoreError> {
        self.log("set_node_consortium_member");
        match member {
            Some(member) => self.node_members.insert(node_id, member),
            None => self.node_members.remove(&node_id),
        };
        Ok(())
    }

    fn get_multisig_alias(&self, address: &Address) -> Result<Option<MultisigAlias>, StoreError> {
        Ok(self.aliases.get(address).cloned())
    }
}
