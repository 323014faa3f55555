//! Keystone transaction types.
//!
//! Staking kinds:
//! - **AddValidator**: legacy or bond-mode primary-network validator
//! - **AddSubnetValidator**, **RemoveSubnetValidator**, **TransformSubnet**
//! - **AddDelegator**, **AddPermissionlessValidator**, **AddPermissionlessDelegator**
//! - **RewardValidator**: system proposal removing an expired staker
//!
//! Bond/deposit kinds:
//! - **Deposit** / **UnlockDeposit**: lock value under a deposit offer and release it
//! - **RegisterNode**: bind a validator node to a consortium member
//! - **AddAddressState**: toggle one capability bit of an address
//!
//! Chain kinds: **CreateChain**, **CreateSubnet**, **Import**, **Export**.

pub mod chain;
pub mod components;
pub mod consortium;
pub mod deposit;
pub mod error;
pub mod fx;
pub mod locked;
pub mod staking;
pub mod validation;
pub mod variant;

pub use components::{
    Auth, Authorization, BaseTx, Credential, CredentialSig, Lock, OutputOwners,
    TransferableInput, TransferableOutput, UtxoId,
};
pub use error::{LockError, LockModeMismatch, TxError};
pub use fx::{Ed25519Fx, Fx, FxError};
pub use validation::{syntactic_verify, ChainContext};
pub use variant::LockModeVariant;

use chain::{CreateChainTx, CreateSubnetTx, ExportTx, ImportTx};
use consortium::{AddAddressStateTx, RegisterNodeTx};
use deposit::{DepositTx, UnlockDepositTx};
use keystone_crypto::{blake2b_256, blake2b_256_multi};
use keystone_types::TxId;
use serde::{Deserialize, Serialize};
use staking::{
    AddDelegatorTx, AddPermissionlessDelegatorTx, AddPermissionlessValidatorTx,
    AddSubnetValidatorTx, AddValidatorTx, BondedAddValidatorTx, BondedRewardValidatorTx,
    RemoveSubnetValidatorTx, RewardValidatorTx, TransformSubnetTx,
};

pub type AddValidatorVariant = LockModeVariant<AddValidatorTx, BondedAddValidatorTx>;
pub type RewardValidatorVariant = LockModeVariant<RewardValidatorTx, BondedRewardValidatorTx>;

/// The unsigned payload of a transaction, one variant per operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsignedTx {
    AddValidator(AddValidatorVariant),
    AddSubnetValidator(AddSubnetValidatorTx),
    AddDelegator(AddDelegatorTx),
    AddPermissionlessValidator(AddPermissionlessValidatorTx),
    AddPermissionlessDelegator(AddPermissionlessDelegatorTx),
    RemoveSubnetValidator(RemoveSubnetValidatorTx),
    TransformSubnet(TransformSubnetTx),
    CreateChain(CreateChainTx),
    CreateSubnet(CreateSubnetTx),
    Import(ImportTx),
    Export(ExportTx),
    RewardValidator(RewardValidatorVariant),
    Deposit(DepositTx),
    UnlockDeposit(UnlockDepositTx),
    RegisterNode(RegisterNodeTx),
    AddAddressState(AddAddressStateTx),
}

impl UnsignedTx {
    /// Short kind name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddValidator(_) => "add_validator",
            Self::AddSubnetValidator(_) => "add_subnet_validator",
            Self::AddDelegator(_) => "add_delegator",
            Self::AddPermissionlessValidator(_) => "add_permissionless_validator",
            Self::AddPermissionlessDelegator(_) => "add_permissionless_delegator",
            Self::RemoveSubnetValidator(_) => "remove_subnet_validator",
            Self::TransformSubnet(_) => "transform_subnet",
            Self::CreateChain(_) => "create_chain",
            Self::CreateSubnet(_) => "create_subnet",
            Self::Import(_) => "import",
            Self::Export(_) => "export",
            Self::RewardValidator(_) => "reward_validator",
            Self::Deposit(_) => "deposit",
            Self::UnlockDeposit(_) => "unlock_deposit",
            Self::RegisterNode(_) => "register_node",
            Self::AddAddressState(_) => "add_address_state",
        }
    }

    /// The common user-transaction fields. System transactions have none.
    pub fn base(&self) -> Option<&BaseTx> {
        match self {
            Self::AddValidator(LockModeVariant::Legacy(tx)) => Some(&tx.base),
            Self::AddValidator(LockModeVariant::Bonded(tx)) => Some(&tx.base),
            Self::AddSubnetValidator(tx) => Some(&tx.base),
            Self::AddDelegator(tx) => Some(&tx.base),
            Self::AddPermissionlessValidator(tx) => Some(&tx.base),
            Self::AddPermissionlessDelegator(tx) => Some(&tx.base),
            Self::RemoveSubnetValidator(tx) => Some(&tx.base),
            Self::TransformSubnet(tx) => Some(&tx.base),
            Self::CreateChain(tx) => Some(&tx.base),
            Self::CreateSubnet(tx) => Some(&tx.base),
            Self::Import(tx) => Some(&tx.base),
            Self::Export(tx) => Some(&tx.base),
            Self::RewardValidator(_) => None,
            Self::Deposit(tx) => Some(&tx.base),
            Self::UnlockDeposit(tx) => Some(&tx.base),
            Self::RegisterNode(tx) => Some(&tx.base),
            Self::AddAddressState(tx) => Some(&tx.base),
        }
    }

    /// Whether a staker created by this payload is a validator (as opposed
    /// to a delegator or a subnet validator without rewards).
    pub fn is_validator_tx(&self) -> bool {
        matches!(
            self,
            Self::AddValidator(_) | Self::AddPermissionlessValidator(_)
        )
    }

    /// Canonical bytes of the payload.
    pub fn bytes(&self) -> Result<Vec<u8>, TxError> {
        Ok(bincode::serialize(self)?)
    }

    /// Hash every credential signs.
    ///
    /// A permissionless validator's proof-of-possession bytes are blanked
    /// first: they carry the node's signature and cannot cover themselves.
    pub fn signing_hash(&self) -> Result<[u8; 32], TxError> {
        match self {
            Self::AddPermissionlessValidator(tx) if tx.signer.is_some() => {
                let mut blanked = tx.clone();
                if let Some(signer) = blanked.signer.as_mut() {
                    signer.proof_of_possession.clear();
                }
                Ok(blake2b_256(&Self::AddPermissionlessValidator(blanked).bytes()?))
            }
            _ => Ok(blake2b_256(&self.bytes()?)),
        }
    }
}

/// A signed transaction. Its id is computed once on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tx {
    pub unsigned: UnsignedTx,
    pub auth: Authorization,
    id: TxId,
}

impl Tx {
    pub fn new(unsigned: UnsignedTx, auth: Authorization) -> Result<Self, TxError> {
        let unsigned_bytes = unsigned.bytes()?;
        let auth_bytes = bincode::serialize(&auth)?;
        let id = TxId::new(blake2b_256_multi(&[&unsigned_bytes, &auth_bytes]));
        Ok(Self { unsigned, auth, id })
    }

    pub fn id(&self) -> TxId {
        self.id
    }
}
