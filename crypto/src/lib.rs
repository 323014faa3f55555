//! Cryptographic primitives for the Keystone chain.
//!
//! - **Ed25519** for signing and signature verification
//! - **Blake2b-256** for transaction ids and signing hashes
//! - **Blake2b-160** short addresses derived from public keys; node ids use
//!   the same derivation, so a node id is the address of its own key

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{derive_address, derive_node_id};
pub use hash::{blake2b_160, blake2b_256, blake2b_256_multi};
pub use keys::{keypair_from_seed, public_from_private, KeyPair, PrivateKey, PublicKey, Signature};
pub use sign::{sign_message, verify_signature};
