//! Fundamental types for the Keystone chain.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! identifiers, timestamps, lock states, address-state bitmasks, deposit offers
//! and deposits, and the chain-wide configuration flags.

pub mod address_state;
pub mod config;
pub mod deposit;
pub mod error;
pub mod ids;
pub mod lock;
pub mod time;

pub use address_state::AddressState;
pub use config::ChainConfig;
pub use deposit::{Deposit, DepositOffer, OfferFlags};
pub use error::ArithmeticError;
pub use ids::{Address, AssetId, ChainId, NodeId, OfferId, SubnetId, TxId, PRIMARY_NETWORK_ID};
pub use lock::{LockIds, LockState};
pub use time::Timestamp;
