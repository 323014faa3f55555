//! Lock-tag checks on inputs and outputs.

use crate::components::{TransferableInput, TransferableOutput};
use crate::error::LockError;

/// Reject any bond/deposit-locked input or output.
///
/// Guards operations that have nothing to do with locking against smuggling
/// locked value through them.
pub fn verify_no_locks(
    ins: &[TransferableInput],
    outs: &[TransferableOutput],
) -> Result<(), LockError> {
    if let Some(index) = ins.iter().position(|i| i.lock.is_bond_deposit_lock()) {
        return Err(LockError::LockedInput { index });
    }
    if let Some(index) = outs.iter().position(|o| o.lock.is_bond_deposit_lock()) {
        return Err(LockError::LockedOutput { index });
    }
    Ok(())
}

/// Reject lock tags that belong to the other staking model.
///
/// Outside lock mode bond/deposit locks are illegal; in lock mode legacy
/// stakeable time locks are.
pub fn verify_lock_mode(
    ins: &[TransferableInput],
    outs: &[TransferableOutput],
    lock_mode_bond_deposit: bool,
) -> Result<(), LockError> {
    let wrong_in = |i: &TransferableInput| {
        if lock_mode_bond_deposit {
            i.lock.is_stakeable_lock()
        } else {
            i.lock.is_bond_deposit_lock()
        }
    };
    let wrong_out = |o: &TransferableOutput| {
        if lock_mode_bond_deposit {
            o.lock.is_stakeable_lock()
        } else {
            o.lock.is_bond_deposit_lock()
        }
    };
    if let Some(index) = ins.iter().position(wrong_in) {
        return Err(LockError::WrongInputType { index });
    }
    if let Some(index) = outs.iter().position(wrong_out) {
        return Err(LockError::WrongOutputType { index });
    }
    Ok(())
}
