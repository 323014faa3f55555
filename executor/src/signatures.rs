//! Node-ownership proofs and owner-threshold checks.

use crate::{Backend, ExecutorError};
use keystone_store::{ChainState, Staker, StoreError};
use keystone_transactions::{Auth, Credential, OutputOwners, Tx};
use keystone_types::{Address, NodeId, SubnetId, Timestamp};
use std::collections::BTreeSet;
use thiserror::Error;

/// Too few owner addresses signed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{matched} of {threshold} required owner signatures")]
pub struct ThresholdNotMet {
    pub matched: u32,
    pub threshold: u32,
}

/// Check that `cred` proves control of the key behind `node_id` at chain
/// time `now`.
///
/// A node id reads as the address of the node's key, so this is a
/// threshold-1 permission check against that address.
pub fn verify_node_signature(
    backend: &Backend,
    tx: &Tx,
    node_id: NodeId,
    cred: Option<&Credential>,
    now: Timestamp,
) -> Result<(), ExecutorError> {
    let cred = cred.ok_or_else(|| ExecutorError::NodeSignatureMissing {
        node_id,
        reason: "no node credential".into(),
    })?;
    let owners = OutputOwners::single(Address::from(node_id));
    backend
        .fx
        .verify_permission(&tx.unsigned, &Auth::first(), cred, &owners, now)
        .map_err(|e| ExecutorError::NodeSignatureMissing {
            node_id,
            reason: e.to_string(),
        })
}

/// Check that `signers` cover `owners`' threshold.
///
/// A zero threshold is never met.
pub fn verify_addrs_owner(
    signers: &BTreeSet<Address>,
    owners: &OutputOwners,
) -> Result<(), ThresholdNotMet> {
    let mut matched = 0u32;
    for addr in &owners.addrs {
        if signers.contains(addr) {
            matched += 1;
            if matched == owners.threshold {
                return Ok(());
            }
        }
    }
    Err(ThresholdNotMet {
        matched,
        threshold: owners.threshold,
    })
}

/// Owner set of `address`: its multisig alias if it has one, otherwise the
/// address alone.
pub fn get_owner(state: &dyn ChainState, address: &Address) -> Result<OutputOwners, StoreError> {
    Ok(state
        .get_multisig_alias(address)?
        .map_or_else(|| OutputOwners::single(*address), |alias| alias.owners))
}

/// The current, or failing that the pending, validator for `node_id`.
pub fn get_validator(
    state: &dyn ChainState,
    subnet_id: &SubnetId,
    node_id: &NodeId,
) -> Result<Option<Staker>, StoreError> {
    match state.get_current_validator(subnet_id, node_id)? {
        Some(staker) => Ok(Some(staker)),
        None => state.get_pending_validator(subnet_id, node_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::new([b; 20])
    }

    fn owners(threshold: u32, addrs: &[u8]) -> OutputOwners {
        OutputOwners {
            locktime: 0,
            threshold,
            addrs: addrs.iter().map(|b| addr(*b)).collect(),
        }
    }

    #[test]
    fn threshold_met_by_subset() {
        let signers: BTreeSet<_> = [addr(1), addr(3), addr(9)].into();
        assert!(verify_addrs_owner(&signers, &owners(2, &[1, 2, 3])).is_ok());
    }

    #[test]
    fn threshold_not_met() {
        let signers: BTreeSet<_> = [addr(1)].into();
        assert_eq!(
            verify_addrs_owner(&signers, &owners(2, &[1, 2, 3])),
            Err(ThresholdNotMet {
                matched: 1,
                threshold: 2
            })
        );
    }

    #[test]
    fn zero_threshold_never_met() {
        let signers: BTreeSet<_> = [addr(1)].into();
        assert!(verify_addrs_owner(&signers, &owners(0, &[1])).is_err());
    }
}
