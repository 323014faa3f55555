//! Consortium and address-capability payloads.

use crate::components::{Auth, BaseTx};
use keystone_types::{Address, NodeId};
use serde::{Deserialize, Serialize};

/// Binds, unbinds or swaps the validator node of a consortium member.
///
/// An empty `old_node_id` registers a first node, an empty `new_node_id`
/// relinquishes the current one, both set swap them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterNodeTx {
    pub base: BaseTx,
    pub old_node_id: NodeId,
    pub new_node_id: NodeId,
    pub consortium_member_auth: Auth,
    pub consortium_member_address: Address,
}

/// Sets or clears one bit of an address's capability mask.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAddressStateTx {
    pub base: BaseTx,
    pub address: Address,
    /// Bit index into the address state mask.
    pub state: u8,
    pub remove: bool,
}
