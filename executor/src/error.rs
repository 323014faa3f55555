use keystone_store::StoreError;
use keystone_transactions::{FxError, LockError, LockModeMismatch, TxError};
use keystone_types::{Address, AddressState, ArithmeticError, NodeId, OfferId, Timestamp, TxId};
use keystone_utxo::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    // ── Shape ───────────────────────────────────────────────────────────
    #[error("wrong lock mode: {0}")]
    WrongLockMode(#[from] LockModeMismatch),

    #[error("{kind} transactions are not accepted here")]
    WrongTxType { kind: &'static str },

    #[error("invalid transaction: {0}")]
    Tx(#[from] TxError),

    #[error("lock check failed: {0}")]
    Lock(#[from] LockError),

    // ── Authorization ───────────────────────────────────────────────────
    #[error("node {node_id} signature missing: {reason}")]
    NodeSignatureMissing { node_id: NodeId, reason: String },

    #[error("consortium member {address} signature missing: {reason}")]
    ConsortiumSignatureMissing { address: Address, reason: String },

    #[error("cannot recover addresses from credentials: {0}")]
    RecoverAddresses(#[source] FxError),

    #[error("wrong number of credentials: {got}")]
    WrongNumberOfCredentials { got: usize },

    #[error("roles {roles} may not change address state bit {bit}")]
    InvalidRoles { roles: AddressState, bit: u8 },

    #[error("not a consortium member: {0}")]
    NotConsortiumMember(String),

    #[error("consortium member {address} already has a registered node")]
    ConsortiumMemberHasNode { address: Address },

    #[error("node {node_id} is registered for another consortium member")]
    NotNodeOwner { node_id: NodeId },

    // ── Staking ─────────────────────────────────────────────────────────
    #[error("weight {weight} is below the minimum {min}")]
    WeightTooSmall { weight: u64, min: u64 },

    #[error("weight {weight} is above the maximum {max}")]
    WeightTooLarge { weight: u64, max: u64 },

    #[error("staking duration {duration}s is below the minimum {min}s")]
    StakeTooShort { duration: u64, min: u64 },

    #[error("staking duration {duration}s is above the maximum {max}s")]
    StakeTooLong { duration: u64, max: u64 },

    #[error("chain time {now} is not before start time {start}")]
    TimestampNotBeforeStartTime { now: Timestamp, start: Timestamp },

    #[error("node {node_id} is already a primary network validator")]
    ValidatorExists { node_id: NodeId },

    #[error("start time {start} is later than {max}")]
    FutureStakeTime { start: Timestamp, max: Timestamp },

    #[error("flow check failed: {0}")]
    FlowCheckFailed(#[from] FlowError),

    // ── Reward settlement ───────────────────────────────────────────────
    #[error("empty staker transaction id")]
    InvalidId,

    #[error("transaction body does not match the one derived from state")]
    InvalidSystemTxBody,

    #[error("no current staker to remove")]
    StakerNotFound,

    #[error("attempting to remove {requested} but the next staker is {next}")]
    RemoveWrongValidator { requested: TxId, next: TxId },

    #[error("removing {tx_id} at {now}, but its end time is {end}")]
    RemoveValidatorTooEarly {
        tx_id: TxId,
        now: Timestamp,
        end: Timestamp,
    },

    #[error("staker {node_id} is not a current primary network validator")]
    PrimaryValidatorMissing { node_id: NodeId },

    #[error("staker {tx_id} was not created by a validator transaction")]
    ShouldBePermissionlessStaker { tx_id: TxId },

    #[error("transaction {0} not found")]
    TxNotFound(TxId),

    // ── Deposits ────────────────────────────────────────────────────────
    #[error("deposit offer {0} not found")]
    DepositOfferNotFound(OfferId),

    #[error("deposit {0} not found")]
    DepositNotFound(TxId),

    #[error("deposit offer {offer_id} is inactive")]
    DepositOfferInactive { offer_id: OfferId },

    #[error("deposit offer {offer_id} starts at {start}, chain time is {now}")]
    DepositOfferNotActiveYet {
        offer_id: OfferId,
        start: Timestamp,
        now: Timestamp,
    },

    #[error("deposit duration {duration}s is below the offer minimum {min}s")]
    DepositDurationTooSmall { duration: u32, min: u32 },

    #[error("deposit duration {duration}s is above the offer maximum {max}s")]
    DepositDurationTooBig { duration: u32, max: u32 },

    #[error("deposit amount {amount} is below the offer minimum {min}")]
    DepositTooSmall { amount: u64, min: u64 },

    #[error("supply {supply} plus reward {reward} exceeds the cap {cap}")]
    SupplyOverflow { supply: u64, reward: u64, cap: u64 },

    #[error(transparent)]
    Overflow(#[from] ArithmeticError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Read(String),

    #[error("cannot parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
