//! Deposit offers and deposits.
//!
//! An offer is a fixed set of terms published on chain. A deposit is opened
//! against an offer and accrues a reward that is fully determined at creation:
//!
//! `reward = amount × duration × interest_rate_nominator / (1_000_000 × SECONDS_PER_YEAR)`

use crate::{OfferId, Timestamp};
use serde::{Deserialize, Serialize};

/// Seconds in a 365-day year, the period the interest rate refers to.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Fixed-point denominator of the interest rate nominator (1_000_000 = 100%).
pub const INTEREST_RATE_PRECISION: u64 = 1_000_000;

/// Flag bits of a deposit offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OfferFlags(u64);

impl OfferFlags {
    pub const NONE: Self = Self(0);
    /// Offer is switched off; no new deposits may be opened against it.
    pub const LOCKED: Self = Self(1);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

/// Immutable deposit terms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositOffer {
    pub id: OfferId,
    pub flags: OfferFlags,
    /// Annual interest in millionths.
    pub interest_rate_nominator: u64,
    /// First second at which deposits may be opened.
    pub start: u64,
    /// First second at which deposits may no longer be opened.
    pub end: u64,
    pub min_amount: u64,
    pub min_duration: u32,
    pub max_duration: u32,
    /// Length of the final period during which the principal unlocks
    /// linearly. Only the flow checker reads it, when it derives how much of
    /// a deposit an unlock may release.
    pub unlock_period_duration: u32,
    #[serde(default)]
    pub memo: Vec<u8>,
}

impl DepositOffer {
    pub fn start_time(&self) -> Timestamp {
        Timestamp::new(self.start)
    }

    pub fn end_time(&self) -> Timestamp {
        Timestamp::new(self.end)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(OfferFlags::LOCKED)
    }
}

/// A deposit opened against an offer, keyed in state by its creating tx id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub deposit_offer_id: OfferId,
    pub duration: u32,
    pub amount: u64,
    /// Chain time at creation, in Unix seconds.
    pub start: u64,
    pub unlocked_amount: u64,
    pub claimed_reward_amount: u64,
}

impl Deposit {
    pub fn is_fully_unlocked(&self) -> bool {
        self.unlocked_amount >= self.amount
    }

    /// Total reward this deposit earns over its whole duration.
    ///
    /// Saturates at `u64::MAX` when the exact value does not fit, which any
    /// supply cap rejects.
    pub fn total_reward(&self, offer: &DepositOffer) -> u64 {
        let denominator = u128::from(INTEREST_RATE_PRECISION) * u128::from(SECONDS_PER_YEAR);
        u128::from(self.amount)
            .checked_mul(u128::from(self.duration))
            .and_then(|v| v.checked_mul(u128::from(offer.interest_rate_nominator)))
            .map(|v| v / denominator)
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(u64::MAX)
    }
}
