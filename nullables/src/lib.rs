//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator of the executor (state, flow checking, the base
//! executor) is abstracted behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record what was asked of them
//!
//! Usage: swap real implementations for nullables in tests.

pub mod base;
pub mod call_log;
pub mod flow;
pub mod state;

pub use base::{Delegation, RecordingBaseExecutor};
pub use call_log::CallLog;
pub use flow::{FlowCall, NullFlowChecker};
pub use state::NullState;
