//! Permission verification over Ed25519 credentials.

use crate::components::{Auth, Credential, OutputOwners};
use crate::error::TxError;
use crate::UnsignedTx;
use keystone_crypto::{derive_address, verify_signature};
use keystone_types::{Address, Timestamp};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("owner threshold {threshold} needs exactly that many signature indices, got {got}")]
    WrongSigCount { threshold: u32, got: usize },

    #[error("credential has {sigs} signatures for {indices} signature indices")]
    CredentialMismatch { sigs: usize, indices: usize },

    #[error("owners are time-locked until {locktime}, chain time is {now}")]
    Timelocked { locktime: u64, now: Timestamp },

    #[error("signature index {0} out of owner bounds")]
    IndexOutOfBounds(u32),

    #[error("signature indices must be strictly increasing")]
    UnsortedIndices,

    #[error("signature {0} was made by a key that does not own the indexed address")]
    WrongSigner(usize),

    #[error("signature {0} does not verify")]
    InvalidSignature(usize),

    #[error(transparent)]
    Tx(#[from] TxError),
}

/// Verifies that credentials satisfy owner sets, and recovers signer
/// addresses from credentials.
pub trait Fx {
    /// Check that `cred`, indexed by `auth`, meets `owners`' threshold over
    /// `tx` at chain time `now`. Owners locked past `now` cannot sign.
    fn verify_permission(
        &self,
        tx: &UnsignedTx,
        auth: &Auth,
        cred: &Credential,
        owners: &OutputOwners,
        now: Timestamp,
    ) -> Result<(), FxError>;

    /// Addresses of every key that validly signed `tx` in `creds`.
    fn recover_addresses(
        &self,
        tx: &UnsignedTx,
        creds: &[Credential],
    ) -> Result<BTreeSet<Address>, FxError>;
}

/// `Fx` for Ed25519 keys with Blake2b-160 addresses.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Fx;

impl Fx for Ed25519Fx {
    fn verify_permission(
        &self,
        tx: &UnsignedTx,
        auth: &Auth,
        cred: &Credential,
        owners: &OutputOwners,
        now: Timestamp,
    ) -> Result<(), FxError> {
        if owners.locktime > now.as_secs() {
            return Err(FxError::Timelocked {
                locktime: owners.locktime,
                now,
            });
        }
        let indices = &auth.sig_indices;
        if indices.len() != owners.threshold as usize {
            return Err(FxError::WrongSigCount {
                threshold: owners.threshold,
                got: indices.len(),
            });
        }
        if cred.sigs.len() != indices.len() {
            return Err(FxError::CredentialMismatch {
                sigs: cred.sigs.len(),
                indices: indices.len(),
            });
        }
        if !indices.windows(2).all(|w| w[0] < w[1]) {
            return Err(FxError::UnsortedIndices);
        }

        let hash = tx.signing_hash()?;
        for (i, (index, sig)) in indices.iter().zip(&cred.sigs).enumerate() {
            let owner = owners
                .addrs
                .get(*index as usize)
                .ok_or(FxError::IndexOutOfBounds(*index))?;
            if derive_address(&sig.public_key) != *owner {
                return Err(FxError::WrongSigner(i));
            }
            if !verify_signature(&hash, &sig.signature, &sig.public_key) {
                return Err(FxError::InvalidSignature(i));
            }
        }
        Ok(())
    }

    fn recover_addresses(
        &self,
        tx: &UnsignedTx,
        creds: &[Credential],
    ) -> Result<BTreeSet<Address>, FxError> {
        let hash = tx.signing_hash()?;
        let mut signers = BTreeSet::new();
        for cred in creds {
            for (i, sig) in cred.sigs.iter().enumerate() {
                if !verify_signature(&hash, &sig.signature, &sig.public_key) {
                    return Err(FxError::InvalidSignature(i));
                }
                signers.insert(derive_address(&sig.public_key));
            }
        }
        Ok(signers)
    }
}
