use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("wrong network id: expected {expected}, got {actual}")]
    WrongNetworkId { expected: u32, actual: u32 },

    #[error("wrong blockchain id: expected {expected}, got {actual}")]
    WrongChainId { expected: String, actual: String },

    #[error("memo is {len} bytes, maximum is {max}")]
    MemoTooLarge { len: usize, max: usize },

    #[error("output {index} has zero amount")]
    ZeroAmountOutput { index: usize },

    #[error("input {index} has zero amount")]
    ZeroAmountInput { index: usize },

    #[error("input {index} spends an already spent utxo")]
    DuplicateInput { index: usize },

    #[error("signature indices must be strictly increasing")]
    UnsortedSigIndices,

    #[error("invalid owners: {reason}")]
    InvalidOwners { reason: String },

    #[error("validator weight must be non-zero")]
    ZeroWeight,

    #[error("staking period must end after it starts")]
    InvalidStakePeriod,

    #[error("node id must not be empty")]
    EmptyNodeId,

    #[error("deposit duration must be non-zero")]
    ZeroDepositDuration,

    #[error("consortium member address must not be empty")]
    EmptyConsortiumMemberAddress,

    #[error("old and new node ids must not both be empty")]
    NoNodeIds,

    #[error("old and new node ids must differ")]
    SameNodeIds,

    #[error("address must not be empty")]
    EmptyAddress,

    #[error("address state bit {0} cannot be set by transaction")]
    InvalidAddressState(u8),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for TxError {
    fn from(e: bincode::Error) -> Self {
        TxError::Serialization(e.to_string())
    }
}

/// Inputs or outputs carry lock tags the operation does not allow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LockError {
    #[error("input {index} is bond/deposit locked")]
    LockedInput { index: usize },

    #[error("output {index} is bond/deposit locked")]
    LockedOutput { index: usize },

    #[error("input {index} has a lock type not allowed in this lock mode")]
    WrongInputType { index: usize },

    #[error("output {index} has a lock type not allowed in this lock mode")]
    WrongOutputType { index: usize },
}

/// The payload variant does not match the chain's lock mode.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("payload variant does not match lock mode (bond/deposit mode: {lock_mode_bond_deposit})")]
pub struct LockModeMismatch {
    pub lock_mode_bond_deposit: bool,
}
