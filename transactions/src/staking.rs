//! Staking payloads: validators, delegators, subnet validators and reward
//! settlement.

use crate::components::{Auth, BaseTx, OutputOwners, TransferableInput, TransferableOutput};
use keystone_crypto::PublicKey;
use keystone_types::{AssetId, NodeId, SubnetId, Timestamp, TxId};
use serde::{Deserialize, Serialize};

/// Who validates, for how long, with how much weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub node_id: NodeId,
    pub start: u64,
    pub end: u64,
    pub weight: u64,
}

impl Validator {
    pub fn start_time(&self) -> Timestamp {
        Timestamp::new(self.start)
    }

    pub fn end_time(&self) -> Timestamp {
        Timestamp::new(self.end)
    }

    /// Staking period in seconds (zero when `end <= start`).
    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetValidator {
    pub validator: Validator,
    pub subnet: SubnetId,
}

/// Legacy primary-network validator: stake moved into separate stake outputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddValidatorTx {
    pub base: BaseTx,
    pub validator: Validator,
    pub stake_outs: Vec<TransferableOutput>,
    pub rewards_owner: OutputOwners,
    pub delegation_shares: u32,
}

/// Bond-mode primary-network validator: stake stays in `base.outs`, bonded
/// to this transaction. Only a consortium member's node may be added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondedAddValidatorTx {
    pub base: BaseTx,
    pub validator: Validator,
    pub rewards_owner: OutputOwners,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSubnetValidatorTx {
    pub base: BaseTx,
    pub validator: SubnetValidator,
    pub subnet_auth: Auth,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDelegatorTx {
    pub base: BaseTx,
    pub validator: Validator,
    pub stake_outs: Vec<TransferableOutput>,
    pub rewards_owner: OutputOwners,
}

/// Key registration of a permissionless validator.
///
/// The first 64 bytes of `proof_of_possession` double as the node's
/// signature over the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub public_key: PublicKey,
    pub proof_of_possession: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPermissionlessValidatorTx {
    pub base: BaseTx,
    pub validator: Validator,
    pub subnet: SubnetId,
    pub signer: Option<Signer>,
    pub stake_outs: Vec<TransferableOutput>,
    pub validator_rewards_owner: OutputOwners,
    pub delegator_rewards_owner: OutputOwners,
    pub delegation_shares: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPermissionlessDelegatorTx {
    pub base: BaseTx,
    pub validator: Validator,
    pub subnet: SubnetId,
    pub stake_outs: Vec<TransferableOutput>,
    pub rewards_owner: OutputOwners,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveSubnetValidatorTx {
    pub base: BaseTx,
    pub node_id: NodeId,
    pub subnet: SubnetId,
    pub subnet_auth: Auth,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSubnetTx {
    pub base: BaseTx,
    pub subnet: SubnetId,
    pub asset_id: AssetId,
    pub initial_supply: u64,
    pub maximum_supply: u64,
    pub min_validator_stake: u64,
    pub max_validator_stake: u64,
    pub subnet_auth: Auth,
}

/// System transaction removing the staker created by `tx_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardValidatorTx {
    pub tx_id: TxId,
}

/// Bond-mode reward settlement: also releases the staker's bond.
///
/// `ins` and `outs` are fully determined by chain state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondedRewardValidatorTx {
    pub reward: RewardValidatorTx,
    pub ins: Vec<TransferableInput>,
    pub outs: Vec<TransferableOutput>,
}
