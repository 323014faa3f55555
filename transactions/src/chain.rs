//! Payloads that create chains and subnets or move value across chains.
//!
//! None of these ever carries bond or deposit locks.

use crate::components::{Auth, BaseTx, OutputOwners, TransferableInput, TransferableOutput};
use keystone_types::{ChainId, SubnetId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChainTx {
    pub base: BaseTx,
    pub subnet: SubnetId,
    pub chain_name: String,
    pub vm_id: [u8; 32],
    pub genesis_data: Vec<u8>,
    pub subnet_auth: Auth,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubnetTx {
    pub base: BaseTx,
    pub owner: OutputOwners,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTx {
    pub base: BaseTx,
    pub source_chain: ChainId,
    pub imported_inputs: Vec<TransferableInput>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTx {
    pub base: BaseTx,
    pub destination_chain: ChainId,
    pub exported_outputs: Vec<TransferableOutput>,
}
