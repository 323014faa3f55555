//! Staker records and their removal order.

use keystone_transactions::staking::Validator;
use keystone_types::{NodeId, SubnetId, Timestamp, TxId, PRIMARY_NETWORK_ID};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Removal priority among stakers ending at the same time. Lower values are
/// removed first, so primary-network validators go last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    SubnetDelegator,
    SubnetValidator,
    PrimaryDelegator,
    PrimaryValidator,
}

/// A validator or delegator in the pending or current set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staker {
    /// The transaction that created this staker.
    pub tx_id: TxId,
    pub node_id: NodeId,
    pub subnet_id: SubnetId,
    pub weight: u64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub priority: Priority,
}

impl Staker {
    /// A primary-network validator created by `tx_id`.
    pub fn primary_validator(tx_id: TxId, validator: &Validator) -> Self {
        Self {
            tx_id,
            node_id: validator.node_id,
            subnet_id: PRIMARY_NETWORK_ID,
            weight: validator.weight,
            start_time: validator.start_time(),
            end_time: validator.end_time(),
            priority: Priority::PrimaryValidator,
        }
    }

    pub fn is_primary_validator(&self) -> bool {
        self.priority == Priority::PrimaryValidator
    }
}

impl Ord for Staker {
    /// Earliest ending first, ties broken by priority then tx id.
    fn cmp(&self, other: &Self) -> Ordering {
        self.end_time
            .cmp(&other.end_time)
            .then(self.priority.cmp(&other.priority))
            .then(self.tx_id.cmp(&other.tx_id))
    }
}

impl PartialOrd for Staker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
