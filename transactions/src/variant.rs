//! Legacy / bond-mode payload variants.
//!
//! Kinds that exist in both staking models carry a [`LockModeVariant`]. The
//! chain's lock mode and the variant tag are checked together before any
//! handler logic runs.

use crate::error::LockModeMismatch;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockModeVariant<L, B> {
    Legacy(L),
    Bonded(B),
}

impl<L, B> LockModeVariant<L, B> {
    pub fn is_bonded(&self) -> bool {
        matches!(self, LockModeVariant::Bonded(_))
    }

    /// Borrow the variant that matches `lock_mode_bond_deposit`, or fail if
    /// the payload was built for the other mode.
    pub fn resolve(
        &self,
        lock_mode_bond_deposit: bool,
    ) -> Result<LockModeVariant<&L, &B>, LockModeMismatch> {
        match (self, lock_mode_bond_deposit) {
            (LockModeVariant::Legacy(tx), false) => Ok(LockModeVariant::Legacy(tx)),
            (LockModeVariant::Bonded(tx), true) => Ok(LockModeVariant::Bonded(tx)),
            _ => Err(LockModeMismatch {
                lock_mode_bond_deposit,
            }),
        }
    }
}
