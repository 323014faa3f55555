//! UTXO flow for the Keystone executor.
//!
//! [`FlowChecker`] is the balance and lock-transition verifier the executor
//! consults before mutating state; [`consume`], [`produce`] and
//! [`produce_locked`] apply a verified transaction's inputs and outputs.

pub mod error;
pub mod flow;
pub mod produce;

pub use error::FlowError;
pub use flow::{FlowChecker, Unlocked};
pub use produce::{consume, produce, produce_locked};
