//! Stateless self-consistency checks.
//!
//! Everything here depends only on the transaction and the chain context.
//! Balance, ownership and lock-state checks need state and are done by the
//! executor and its collaborators.

use crate::components::{Auth, BaseTx, OutputOwners};
use crate::error::TxError;
use crate::{Tx, UnsignedTx};
use keystone_types::{AddressState, AssetId, ChainId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum memo size in bytes.
pub const MAX_MEMO_SIZE: usize = 256;

/// Identity of the chain transactions are executed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainContext {
    pub network_id: u32,
    pub chain_id: ChainId,
    /// Asset fees are paid in.
    pub fee_asset_id: AssetId,
}

/// Verify that a transaction is well formed for `ctx`.
pub fn syntactic_verify(tx: &Tx, ctx: &ChainContext) -> Result<(), TxError> {
    if let Some(base) = tx.unsigned.base() {
        verify_base(base, ctx)?;
    }

    match &tx.unsigned {
        UnsignedTx::AddValidator(variant) => {
            let (validator, rewards_owner) = match variant {
                crate::LockModeVariant::Legacy(tx) => (&tx.validator, &tx.rewards_owner),
                crate::LockModeVariant::Bonded(tx) => (&tx.validator, &tx.rewards_owner),
            };
            if validator.node_id.is_empty() {
                return Err(TxError::EmptyNodeId);
            }
            if validator.weight == 0 {
                return Err(TxError::ZeroWeight);
            }
            if validator.end <= validator.start {
                return Err(TxError::InvalidStakePeriod);
            }
            verify_owners(rewards_owner)?;
        }
        UnsignedTx::Deposit(deposit) => {
            if deposit.deposit_duration == 0 {
                return Err(TxError::ZeroDepositDuration);
            }
            verify_owners(&deposit.rewards_owner)?;
        }
        UnsignedTx::RegisterNode(register) => {
            if register.consortium_member_address.is_empty() {
                return Err(TxError::EmptyConsortiumMemberAddress);
            }
            if register.old_node_id.is_empty() && register.new_node_id.is_empty() {
                return Err(TxError::NoNodeIds);
            }
            if register.old_node_id == register.new_node_id {
                return Err(TxError::SameNodeIds);
            }
            verify_auth(&register.consortium_member_auth)?;
        }
        UnsignedTx::AddAddressState(add) => {
            if add.address.is_empty() {
                return Err(TxError::EmptyAddress);
            }
            let defined = AddressState::bit(add.state)
                .is_some_and(|bit| AddressState::VALID_BITS.contains(bit));
            if !defined {
                return Err(TxError::InvalidAddressState(add.state));
            }
        }
        _ => {}
    }

    Ok(())
}

fn verify_base(base: &BaseTx, ctx: &ChainContext) -> Result<(), TxError> {
    if base.network_id != ctx.network_id {
        return Err(TxError::WrongNetworkId {
            expected: ctx.network_id,
            actual: base.network_id,
        });
    }
    if base.blockchain_id != ctx.chain_id {
        return Err(TxError::WrongChainId {
            expected: ctx.chain_id.to_string(),
            actual: base.blockchain_id.to_string(),
        });
    }
    if base.memo.len() > MAX_MEMO_SIZE {
        return Err(TxError::MemoTooLarge {
            len: base.memo.len(),
            max: MAX_MEMO_SIZE,
        });
    }

    let mut spent = BTreeSet::new();
    for (index, input) in base.ins.iter().enumerate() {
        if input.amount == 0 {
            return Err(TxError::ZeroAmountInput { index });
        }
        if !spent.insert(input.utxo_id) {
            return Err(TxError::DuplicateInput { index });
        }
        verify_auth(&input.auth)?;
    }

    for (index, output) in base.outs.iter().enumerate() {
        if output.amount == 0 {
            return Err(TxError::ZeroAmountOutput { index });
        }
        verify_owners(&output.owners)?;
    }

    Ok(())
}

fn verify_auth(auth: &Auth) -> Result<(), TxError> {
    if auth.sig_indices.windows(2).all(|w| w[0] < w[1]) {
        Ok(())
    } else {
        Err(TxError::UnsortedSigIndices)
    }
}

fn verify_owners(owners: &OutputOwners) -> Result<(), TxError> {
    if !owners.is_sorted_and_unique() {
        return Err(TxError::InvalidOwners {
            reason: "addresses must be sorted and unique".into(),
        });
    }
    let threshold = owners.threshold as usize;
    if threshold > owners.addrs.len() {
        return Err(TxError::InvalidOwners {
            reason: format!(
                "threshold {} exceeds {} addresses",
                threshold,
                owners.addrs.len()
            ),
        });
    }
    if threshold == 0 && !owners.addrs.is_empty() {
        return Err(TxError::InvalidOwners {
            reason: "zero threshold with non-empty addresses".into(),
        });
    }
    Ok(())
}
