//! Abstract chain state for the Keystone executor.
//!
//! Every backend (persistent, diff layer, in-memory for testing) implements
//! [`ChainState`]. The executor depends only on the trait.

pub mod error;
pub mod staker;
pub mod state;
pub mod utxo;

pub use error::StoreError;
pub use staker::{Priority, Staker};
pub use state::ChainState;
pub use utxo::{MultisigAlias, Utxo};
