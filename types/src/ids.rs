//! Fixed-size identifiers.
//!
//! Long ids (32 bytes) name transactions, subnets, assets and deposit offers.
//! Short ids (20 bytes) name addresses and validator nodes. A node id is
//! derived from the node's public key exactly like an address, so every node
//! id can be read as the address that owns it.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! fixed_id {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;
            pub const EMPTY: Self = Self([0u8; $len]);

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0 == [0u8; $len]
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }
    };
}

fixed_id!(
    /// Content hash of a signed transaction.
    TxId,
    32
);
fixed_id!(
    /// Identifier of a subnet. The primary network is [`PRIMARY_NETWORK_ID`].
    SubnetId,
    32
);
fixed_id!(
    /// Identifier of a blockchain.
    ChainId,
    32
);
fixed_id!(
    /// Identifier of a fungible asset.
    AssetId,
    32
);
fixed_id!(
    /// Identifier of a deposit offer.
    OfferId,
    32
);
fixed_id!(
    /// A short address, the 160-bit hash of a public key.
    Address,
    20
);
fixed_id!(
    /// A validator node identity.
    NodeId,
    20
);

/// The primary network is the subnet with the empty id.
pub const PRIMARY_NETWORK_ID: SubnetId = SubnetId::EMPTY;

impl TxId {
    /// Placeholder used inside lock ids of outputs to reference the
    /// transaction that produces them. Replaced with the real id on produce.
    pub const THIS_TX: Self = Self([
        b't', b'h', b'i', b's', b' ', b't', b'x', b' ', b'i', b'd', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]);
}

impl From<NodeId> for Address {
    fn from(node_id: NodeId) -> Self {
        Self(node_id.0)
    }
}

impl From<Address> for NodeId {
    fn from(address: Address) -> Self {
        Self(address.0)
    }
}
