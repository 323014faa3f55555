//! Short address derivation.
//!
//! `address = Blake2b-160(ed25519_public_key)`. Node ids are derived the
//! same way from the node's staking key.

use crate::hash::blake2b_160;
use crate::keys::PublicKey;
use keystone_types::{Address, NodeId};

/// Derive the short address controlled by `public_key`.
pub fn derive_address(public_key: &PublicKey) -> Address {
    Address::new(blake2b_160(public_key.as_bytes()))
}

/// Derive the node id of a node whose staking key is `public_key`.
pub fn derive_node_id(public_key: &PublicKey) -> NodeId {
    NodeId::from(derive_address(public_key))
}
