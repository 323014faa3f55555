//! Fixtures shared by the executor integration tests.

#![allow(dead_code)]

use keystone_crypto::{derive_address, derive_node_id, keypair_from_seed, KeyPair};
use keystone_executor::{Backend, Config, ExecutorError, ProposalTxExecutor, StandardTxExecutor};
use keystone_nullables::{
    CallLog, Delegation, FlowCall, NullFlowChecker, NullState, RecordingBaseExecutor,
};
use keystone_store::Utxo;
use keystone_transactions::staking::{AddValidatorTx, BondedAddValidatorTx, Validator};
use keystone_transactions::{
    Auth, Authorization, BaseTx, ChainContext, Credential, Ed25519Fx, Lock, LockModeVariant,
    OutputOwners, TransferableInput, TransferableOutput, Tx, UnsignedTx, UtxoId,
};
use keystone_types::{
    Address, AssetId, ChainConfig, ChainId, LockIds, LockState, NodeId, Timestamp, TxId,
    PRIMARY_NETWORK_ID,
};

pub const NETWORK_ID: u32 = 7;
pub const CHAIN_ID: ChainId = ChainId::new([0xC0; 32]);
pub const FEE_ASSET: AssetId = AssetId::new([0xFE; 32]);
pub const NOW: u64 = 1_700_000_000;
pub const DAY: u64 = 24 * 60 * 60;

pub fn ctx() -> ChainContext {
    ChainContext {
        network_id: NETWORK_ID,
        chain_id: CHAIN_ID,
        fee_asset_id: FEE_ASSET,
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

pub fn key(seed: u8) -> KeyPair {
    keypair_from_seed(&[seed; 32])
}

pub fn address(kp: &KeyPair) -> Address {
    derive_address(&kp.public)
}

pub fn node_id(kp: &KeyPair) -> NodeId {
    derive_node_id(&kp.public)
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// A backend wired to nullables, plus handles on what they recorded.
pub struct Harness {
    pub backend: Backend,
    pub flow: CallLog<FlowCall>,
    pub delegations: CallLog<Delegation>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(Config::default(), NullFlowChecker::new())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with(config, NullFlowChecker::new())
    }

    pub fn with_flow(flow: NullFlowChecker) -> Self {
        Self::with(Config::default(), flow)
    }

    pub fn with(config: Config, flow: NullFlowChecker) -> Self {
        let base = RecordingBaseExecutor::new();
        let delegations = base.calls();
        let flow_calls = flow.calls();
        Self {
            backend: Backend {
                config,
                ctx: ctx(),
                bootstrapped: true,
                fx: Box::new(Ed25519Fx),
                flow_checker: Box::new(flow),
                base: Box::new(base),
            },
            flow: flow_calls,
            delegations,
        }
    }

    pub fn execute(&self, state: &mut NullState, tx: &Tx) -> Result<(), ExecutorError> {
        StandardTxExecutor::new(&self.backend, state, tx).execute()
    }

    pub fn execute_proposal(
        &self,
        on_commit: &mut NullState,
        on_abort: &mut NullState,
        tx: &Tx,
    ) -> Result<(), ExecutorError> {
        ProposalTxExecutor::new(&self.backend, on_commit, on_abort, tx).execute()
    }

    pub fn delegated_kinds(&self) -> Vec<&'static str> {
        self.delegations.entries().iter().map(|d| d.kind).collect()
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub fn lock_mode_state() -> NullState {
    let config = ChainConfig {
        lock_mode_bond_deposit: true,
        verify_node_signature: true,
    };
    let mut state = NullState::new(config, Timestamp::new(NOW));
    state.insert_supply(PRIMARY_NETWORK_ID, 0);
    state
}

pub fn legacy_state() -> NullState {
    let mut state = NullState::new(ChainConfig::default(), Timestamp::new(NOW));
    state.insert_supply(PRIMARY_NETWORK_ID, 0);
    state
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

pub fn base_tx(ins: Vec<TransferableInput>, outs: Vec<TransferableOutput>) -> BaseTx {
    BaseTx {
        network_id: NETWORK_ID,
        blockchain_id: CHAIN_ID,
        ins,
        outs,
        memo: Vec::new(),
    }
}

pub fn utxo_id(seed: u8, index: u32) -> UtxoId {
    UtxoId {
        tx_id: TxId::new([seed; 32]),
        output_index: index,
    }
}

pub fn input(id: UtxoId, amount: u64, lock: Lock) -> TransferableInput {
    TransferableInput {
        utxo_id: id,
        asset_id: FEE_ASSET,
        amount,
        auth: Auth::first(),
        lock,
    }
}

pub fn output(owner: Address, amount: u64, lock: Lock) -> TransferableOutput {
    TransferableOutput {
        asset_id: FEE_ASSET,
        amount,
        owners: OutputOwners::single(owner),
        lock,
    }
}

/// A UTXO matching `input`, owned by `owner`.
pub fn utxo_for(input: &TransferableInput, owner: Address) -> Utxo {
    Utxo {
        id: input.utxo_id,
        asset_id: input.asset_id,
        amount: input.amount,
        owners: OutputOwners::single(owner),
        lock: input.lock,
    }
}

pub fn new_lock(state: LockState) -> Lock {
    Lock::Ids(LockIds::this_tx(state))
}

/// Sign `unsigned` with one spend credential per key plus the optional node
/// and member credentials.
pub fn sign(
    unsigned: UnsignedTx,
    spend: &[&KeyPair],
    node: Option<&KeyPair>,
    member: Option<&KeyPair>,
) -> Tx {
    let hash = unsigned.signing_hash().unwrap();
    let auth = Authorization {
        spend: spend
            .iter()
            .map(|kp| Credential::sign(&hash, &[*kp]))
            .collect(),
        node: node.map(|kp| Credential::sign(&hash, &[kp])),
        member: member.map(|kp| Credential::sign(&hash, &[kp])),
    };
    Tx::new(unsigned, auth).unwrap()
}

pub fn unsigned(unsigned: UnsignedTx) -> Tx {
    Tx::new(unsigned, Authorization::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A 30-day validator starting at `start`.
pub fn validator(node_id: NodeId, start: u64, weight: u64) -> Validator {
    Validator {
        node_id,
        start,
        end: start + 30 * DAY,
        weight,
    }
}

pub fn legacy_add_validator(validator: Validator, owner: Address) -> UnsignedTx {
    UnsignedTx::AddValidator(LockModeVariant::Legacy(AddValidatorTx {
        base: base_tx(Vec::new(), Vec::new()),
        validator,
        stake_outs: Vec::new(),
        rewards_owner: OutputOwners::single(owner),
        delegation_shares: 0,
    }))
}

/// Bonds `validator.weight` from one unlocked input owned by `owner`.
pub fn bonded_add_validator(validator: Validator, owner: Address) -> UnsignedTx {
    let spend = input(utxo_id(0x10, 0), validator.weight, Lock::Unlocked);
    let bonded = output(owner, validator.weight, new_lock(LockState::Bonded));
    UnsignedTx::AddValidator(LockModeVariant::Bonded(BondedAddValidatorTx {
        base: base_tx(vec![spend], vec![bonded]),
        validator,
        rewards_owner: OutputOwners::single(owner),
    }))
}
