//! Per-address capability bitmask.
//!
//! The low 32 bits are roles (what an address may do to other addresses),
//! the high bits are statuses (what an address is). Roles are only ever
//! granted by an admin.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Capability bitmask of a single address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AddressState(u64);

impl AddressState {
    // ── Bit indices ─────────────────────────────────────────────────────
    pub const ROLE_ADMIN_INDEX: u8 = 0;
    pub const ROLE_KYC_INDEX: u8 = 1;
    pub const ROLE_VALIDATOR_INDEX: u8 = 2;
    pub const KYC_VERIFIED_INDEX: u8 = 32;
    pub const KYC_EXPIRED_INDEX: u8 = 33;
    pub const CONSORTIUM_INDEX: u8 = 38;
    pub const REGISTERED_NODE_INDEX: u8 = 39;

    // ── Single bits ─────────────────────────────────────────────────────
    pub const EMPTY: Self = Self(0);
    pub const ROLE_ADMIN: Self = Self(1 << Self::ROLE_ADMIN_INDEX);
    pub const ROLE_KYC: Self = Self(1 << Self::ROLE_KYC_INDEX);
    pub const ROLE_VALIDATOR: Self = Self(1 << Self::ROLE_VALIDATOR_INDEX);
    pub const KYC_VERIFIED: Self = Self(1 << Self::KYC_VERIFIED_INDEX);
    pub const KYC_EXPIRED: Self = Self(1 << Self::KYC_EXPIRED_INDEX);
    pub const CONSORTIUM: Self = Self(1 << Self::CONSORTIUM_INDEX);
    pub const REGISTERED_NODE: Self = Self(1 << Self::REGISTERED_NODE_INDEX);

    // ── Groups ──────────────────────────────────────────────────────────
    /// Every role bit, defined or reserved.
    pub const ROLE_BITS: Self = Self(0x0000_0000_ffff_ffff);
    pub const KYC_BITS: Self = Self(Self::KYC_VERIFIED.0 | Self::KYC_EXPIRED.0);
    /// Bits that may be toggled by an address-state transaction.
    pub const VALID_BITS: Self = Self(
        Self::ROLE_ADMIN.0
            | Self::ROLE_KYC.0
            | Self::ROLE_VALIDATOR.0
            | Self::KYC_BITS.0
            | Self::CONSORTIUM.0
            | Self::REGISTERED_NODE.0,
    );

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// The single-bit mask for `index`, or `None` if the index is out of range.
    pub fn bit(index: u8) -> Option<Self> {
        1u64.checked_shl(u32::from(index)).map(Self)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set in `self`.
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any bit of `other` is set in `self`.
    pub fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for AddressState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for AddressState {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for AddressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
