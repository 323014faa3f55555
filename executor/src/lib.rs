//! Keystone transaction executor.
//!
//! Validates transactions against a [`ChainState`](keystone_store::ChainState)
//! view and applies them. With the chain's bond/deposit lock mode on, staking
//! value stays in place as bonded or deposited UTXOs; with it off, staking
//! kinds fall back to the legacy [`BaseExecutor`].
//!
//! - [`StandardTxExecutor`]: every kind except reward settlement
//! - [`ProposalTxExecutor`]: reward settlement over commit and abort branches
//!
//! A handler writes nothing until all of its checks have passed.

pub mod address_state;
pub mod backend;
pub mod config;
pub mod deposit;
pub mod error;
pub mod register_node;
pub mod reward;
pub mod signatures;
pub mod staking;
pub mod standard;

pub use backend::{Backend, BaseExecutor};
pub use config::Config;
pub use error::{ConfigError, ExecutorError};
pub use reward::ProposalTxExecutor;
pub use standard::StandardTxExecutor;
