//! Building blocks shared by every transaction payload: inputs, outputs,
//! owner sets, authorization descriptors and credentials.

use keystone_crypto::{sign_message, KeyPair, PublicKey, Signature};
use keystone_types::{Address, AssetId, ChainId, LockIds, TxId};
use serde::{Deserialize, Serialize};

/// Reference to an output of a previous transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtxoId {
    pub tx_id: TxId,
    pub output_index: u32,
}

/// Lock tag of an input or output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lock {
    #[default]
    Unlocked,
    /// Bond and/or deposit lock. Only legal in bond/deposit lock mode.
    Ids(LockIds),
    /// Legacy time-locked stake. Only legal outside lock mode.
    Stakeable { locktime: u64 },
}

impl Lock {
    /// Bond/deposit lock ids, if any.
    pub fn lock_ids(&self) -> Option<&LockIds> {
        match self {
            Lock::Ids(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn is_bond_deposit_lock(&self) -> bool {
        matches!(self, Lock::Ids(_))
    }

    pub fn is_stakeable_lock(&self) -> bool {
        matches!(self, Lock::Stakeable { .. })
    }
}

/// Threshold ownership of an output or an identity.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputOwners {
    pub locktime: u64,
    pub threshold: u32,
    /// Sorted, unique.
    pub addrs: Vec<Address>,
}

impl OutputOwners {
    /// Threshold-1 ownership by a single address.
    pub fn single(address: Address) -> Self {
        Self {
            locktime: 0,
            threshold: 1,
            addrs: vec![address],
        }
    }

    pub fn is_sorted_and_unique(&self) -> bool {
        self.addrs.windows(2).all(|w| w[0] < w[1])
    }
}

/// Which owner addresses a credential signs for, by index into
/// [`OutputOwners::addrs`].
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Auth {
    pub sig_indices: Vec<u32>,
}

impl Auth {
    pub fn new(sig_indices: Vec<u32>) -> Self {
        Self { sig_indices }
    }

    /// The descriptor of a single-owner check: signature 0 against owner 0.
    pub fn first() -> Self {
        Self {
            sig_indices: vec![0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferableInput {
    pub utxo_id: UtxoId,
    pub asset_id: AssetId,
    pub amount: u64,
    pub auth: Auth,
    #[serde(default)]
    pub lock: Lock,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferableOutput {
    pub asset_id: AssetId,
    pub amount: u64,
    pub owners: OutputOwners,
    #[serde(default)]
    pub lock: Lock,
}

/// Fields every user transaction carries.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseTx {
    pub network_id: u32,
    pub blockchain_id: ChainId,
    pub ins: Vec<TransferableInput>,
    pub outs: Vec<TransferableOutput>,
    #[serde(default)]
    pub memo: Vec<u8>,
}

/// One signature together with the key that made it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSig {
    pub public_key: PublicKey,
    pub signature: Signature,
}

/// Signatures proving ownership for one authorization slot.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credential {
    pub sigs: Vec<CredentialSig>,
}

impl Credential {
    /// Sign `signing_hash` with each key, in order.
    pub fn sign(signing_hash: &[u8; 32], keys: &[&KeyPair]) -> Self {
        let sigs = keys
            .iter()
            .map(|kp| CredentialSig {
                public_key: kp.public,
                signature: sign_message(signing_hash, &kp.private),
            })
            .collect();
        Self { sigs }
    }
}

/// Credentials of a transaction, by the role each one plays.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Authorization {
    /// Spend credentials, one per input in input order.
    pub spend: Vec<Credential>,
    /// Proof that the sender controls the node the transaction acts on.
    pub node: Option<Credential>,
    /// Proof that the sender controls the consortium member address.
    pub member: Option<Credential>,
}

impl Authorization {
    pub fn spend_only(spend: Vec<Credential>) -> Self {
        Self {
            spend,
            node: None,
            member: None,
        }
    }

    /// Total number of credentials across all slots.
    pub fn len(&self) -> usize {
        self.spend.len() + usize::from(self.node.is_some()) + usize::from(self.member.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
