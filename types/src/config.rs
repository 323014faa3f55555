//! Chain-wide configuration flags stored in state.

use serde::{Deserialize, Serialize};

/// Flags fixed at genesis that select the staking economics of the chain.
///
/// Execution reads these from the state view and never writes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Bond/deposit lock mode instead of legacy direct staking.
    pub lock_mode_bond_deposit: bool,
    /// Require a node-ownership signature on subnet validator additions.
    pub verify_node_signature: bool,
}
