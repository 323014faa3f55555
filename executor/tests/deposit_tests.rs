//! Opening deposits against offers and unlocking them again.

mod common;

use common::*;
use keystone_executor::{Config, ExecutorError};
use keystone_nullables::{FlowCall, NullFlowChecker, NullState};
use keystone_store::ChainState;
use keystone_transactions::deposit::{DepositTx, UnlockDepositTx};
use keystone_transactions::{Lock, LockError, OutputOwners, UnsignedTx, UtxoId};
use keystone_types::{
    Address, Deposit, DepositOffer, LockIds, LockState, OfferFlags, OfferId, TxId,
    PRIMARY_NETWORK_ID,
};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OFFER: OfferId = OfferId::new([0x0F; 32]);
const DEPOSIT_TX: TxId = TxId::new([0xD0; 32]);
const MIN_DURATION: u32 = 30 * DAY as u32;
const MAX_DURATION: u32 = 365 * DAY as u32;

/// Ten percent a year, open from shortly before now.
fn offer() -> DepositOffer {
    DepositOffer {
        id: OFFER,
        flags: OfferFlags::NONE,
        interest_rate_nominator: 100_000,
        start: NOW - 1_000,
        end: NOW + 1_000,
        min_amount: 100,
        min_duration: MIN_DURATION,
        max_duration: MAX_DURATION,
        unlock_period_duration: 0,
        memo: Vec::new(),
    }
}

fn state_with(offer: DepositOffer) -> NullState {
    let mut state = lock_mode_state();
    state.insert_deposit_offer(offer);
    state
}

fn owner() -> Address {
    address(&key(1))
}

fn deposit_payload(amount: u64, duration: u32) -> UnsignedTx {
    let spend = input(utxo_id(0x20, 0), amount, Lock::Unlocked);
    let locked = output(owner(), amount, new_lock(LockState::Deposited));
    UnsignedTx::Deposit(DepositTx {
        base: base_tx(vec![spend], vec![locked]),
        deposit_offer_id: OFFER,
        deposit_duration: duration,
        rewards_owner: OutputOwners::single(owner()),
    })
}

fn open(
    h: &Harness,
    state: &mut NullState,
    amount: u64,
    duration: u32,
) -> Result<TxId, ExecutorError> {
    let tx = sign(deposit_payload(amount, duration), &[&key(1)], None, None);
    h.execute(state, &tx)?;
    Ok(tx.id())
}

/// Reward a deposit of `amount` for `duration` earns under [`offer`].
fn reward_of(amount: u64, duration: u32) -> u64 {
    Deposit {
        deposit_offer_id: OFFER,
        duration,
        amount,
        start: NOW,
        unlocked_amount: 0,
        claimed_reward_amount: 0,
    }
    .total_reward(&offer())
}

// ---------------------------------------------------------------------------
// 1. Opening a deposit
// ---------------------------------------------------------------------------

#[test]
fn deposit_locks_value_and_records_deposit() {
    let h = Harness::new();
    let mut state = state_with(offer());
    let spent = input(utxo_id(0x20, 0), 100, Lock::Unlocked);
    state.insert_utxo(utxo_for(&spent, owner()));

    let tx_id = open(&h, &mut state, 100, MIN_DURATION).unwrap();

    let utxos: Vec<_> = state.utxos().cloned().collect();
    assert_eq!(utxos.len(), 1);
    let locked = &utxos[0];
    assert_eq!(
        locked.id,
        UtxoId {
            tx_id,
            output_index: 0
        }
    );
    assert_eq!(locked.amount, 100);
    assert_eq!(locked.lock_state(), LockState::Deposited);
    assert_eq!(
        locked.lock,
        Lock::Ids(LockIds {
            deposit_tx_id: tx_id,
            bond_tx_id: TxId::EMPTY,
        })
    );

    assert_eq!(
        state.get_deposit(&tx_id).unwrap(),
        Some(Deposit {
            deposit_offer_id: OFFER,
            duration: MIN_DURATION,
            amount: 100,
            start: NOW,
            unlocked_amount: 0,
            claimed_reward_amount: 0,
        })
    );

    assert_eq!(
        h.flow.entries(),
        vec![FlowCall::VerifyLock {
            fee: Config::default().tx_fee,
            fee_asset: FEE_ASSET,
            lock_state: LockState::Deposited,
            credentials: 1,
        }]
    );
}

#[test]
fn deposit_reward_is_added_to_supply() {
    let h = Harness::new();
    let mut state = state_with(offer());
    state.insert_supply(PRIMARY_NETWORK_ID, 5_000);
    let amount = 1_000_000_000_000;

    open(&h, &mut state, amount, MAX_DURATION).unwrap();

    let reward = reward_of(amount, MAX_DURATION);
    assert!(reward > 0);
    assert_eq!(
        state.get_current_supply(&PRIMARY_NETWORK_ID).unwrap(),
        5_000 + reward
    );
}

#[test]
fn supply_cap_is_inclusive() {
    let amount = 1_000_000_000_000;
    let reward = reward_of(amount, MIN_DURATION);

    let h = Harness::with_config(Config {
        supply_cap: 1_000 + reward,
        ..Config::default()
    });
    let mut state = state_with(offer());
    state.insert_supply(PRIMARY_NETWORK_ID, 1_000);
    open(&h, &mut state, amount, MIN_DURATION).unwrap();
    assert_eq!(
        state.get_current_supply(&PRIMARY_NETWORK_ID).unwrap(),
        1_000 + reward
    );

    let h = Harness::with_config(Config {
        supply_cap: 1_000 + reward - 1,
        ..Config::default()
    });
    let mut state = state_with(offer());
    state.insert_supply(PRIMARY_NETWORK_ID, 1_000);
    let before = state.clone();
    let err = open(&h, &mut state, amount, MIN_DURATION).unwrap_err();
    assert!(matches!(err, ExecutorError::SupplyOverflow { supply: 1_000, .. }));
    assert_eq!(state, before);
    assert!(state.writes().is_empty());
}

// ---------------------------------------------------------------------------
// 2. Offer terms
// ---------------------------------------------------------------------------

#[test]
fn amount_below_offer_minimum_is_rejected() {
    let h = Harness::new();
    let mut state = state_with(offer());
    let err = open(&h, &mut state, 99, MIN_DURATION).unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::DepositTooSmall {
            amount: 99,
            min: 100
        }
    ));
    assert!(state.writes().is_empty());
    assert!(h.flow.is_empty());
}

#[test]
fn duration_bounds_are_inclusive() {
    let h = Harness::new();
    let mut state = state_with(offer());

    let err = open(&h, &mut state, 100, MIN_DURATION - 1).unwrap_err();
    assert!(matches!(err, ExecutorError::DepositDurationTooSmall { .. }));
    let err = open(&h, &mut state, 100, MAX_DURATION + 1).unwrap_err();
    assert!(matches!(err, ExecutorError::DepositDurationTooBig { .. }));
    assert!(state.writes().is_empty());

    open(&h, &mut state, 100, MAX_DURATION).unwrap();
}

#[test]
fn unknown_offer_is_rejected() {
    let h = Harness::new();
    let mut state = lock_mode_state();
    let err = open(&h, &mut state, 100, MIN_DURATION).unwrap_err();
    assert!(matches!(err, ExecutorError::DepositOfferNotFound(id) if id == OFFER));
}

#[test]
fn locked_offer_is_inactive() {
    let h = Harness::new();
    let mut state = state_with(DepositOffer {
        flags: OfferFlags::LOCKED,
        ..offer()
    });
    let err = open(&h, &mut state, 100, MIN_DURATION).unwrap_err();
    assert!(matches!(err, ExecutorError::DepositOfferInactive { .. }));
}

#[test]
fn offer_window_is_half_open() {
    let h = Harness::new();

    let mut state = state_with(DepositOffer {
        start: NOW + 1,
        ..offer()
    });
    let err = open(&h, &mut state, 100, MIN_DURATION).unwrap_err();
    assert!(matches!(err, ExecutorError::DepositOfferNotActiveYet { .. }));

    let mut state = state_with(DepositOffer {
        start: NOW,
        ..offer()
    });
    open(&h, &mut state, 100, MIN_DURATION).unwrap();

    let mut state = state_with(DepositOffer {
        end: NOW,
        ..offer()
    });
    let err = open(&h, &mut state, 100, MIN_DURATION).unwrap_err();
    assert!(matches!(err, ExecutorError::DepositOfferInactive { .. }));

    let mut state = state_with(DepositOffer {
        end: NOW + 1,
        ..offer()
    });
    open(&h, &mut state, 100, MIN_DURATION).unwrap();
}

#[test]
fn stakeable_inputs_are_rejected_in_lock_mode() {
    let h = Harness::new();
    let mut state = state_with(offer());
    let mut payload = deposit_payload(100, MIN_DURATION);
    if let UnsignedTx::Deposit(body) = &mut payload {
        body.base.ins[0].lock = Lock::Stakeable { locktime: NOW + 10 };
    }

    let err = h.execute(&mut state, &unsigned(payload)).unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::Lock(LockError::WrongInputType { index: 0 })
    ));
}

#[test]
fn failed_flow_check_writes_nothing() {
    let h = Harness::with_flow(NullFlowChecker::new().failing("fee not covered"));
    let mut state = state_with(offer());
    let before = state.clone();

    let err = open(&h, &mut state, 100, MIN_DURATION).unwrap_err();
    assert!(matches!(err, ExecutorError::FlowCheckFailed(_)));
    assert_eq!(state, before);
    assert!(state.writes().is_empty());
}

// ---------------------------------------------------------------------------
// 3. Unlocking
// ---------------------------------------------------------------------------

fn existing_deposit(amount: u64, unlocked: u64, claimed: u64) -> Deposit {
    Deposit {
        deposit_offer_id: OFFER,
        duration: MIN_DURATION,
        amount,
        start: NOW - u64::from(MIN_DURATION),
        unlocked_amount: unlocked,
        claimed_reward_amount: claimed,
    }
}

fn unlock_payload(seed: u8, amount: u64) -> UnsignedTx {
    let deposited = Lock::Ids(LockIds {
        deposit_tx_id: DEPOSIT_TX,
        bond_tx_id: TxId::EMPTY,
    });
    UnsignedTx::UnlockDeposit(UnlockDepositTx {
        base: base_tx(
            vec![input(utxo_id(seed, 0), amount, deposited)],
            vec![output(owner(), amount, Lock::Unlocked)],
        ),
    })
}

fn unlocking(amounts: &[(TxId, u64)]) -> Harness {
    Harness::with_flow(
        NullFlowChecker::new().with_unlocked_amounts(amounts.iter().copied().collect()),
    )
}

#[test]
fn partial_unlock_keeps_deposit() {
    let h = unlocking(&[(DEPOSIT_TX, 400)]);
    let mut state = state_with(offer());
    state.insert_deposit(DEPOSIT_TX, existing_deposit(1_000, 0, 0));
    let tx = sign(unlock_payload(0x30, 400), &[&key(1)], None, None);

    h.execute(&mut state, &tx).unwrap();

    assert_eq!(
        state.get_deposit(&DEPOSIT_TX).unwrap(),
        Some(existing_deposit(1_000, 400, 0))
    );
    let produced = state
        .get_utxo(&UtxoId {
            tx_id: tx.id(),
            output_index: 0,
        })
        .unwrap()
        .expect("unlocked output produced");
    assert_eq!(produced.lock, Lock::Unlocked);
    assert_eq!(
        h.flow.entries(),
        vec![FlowCall::VerifyUnlockDeposit {
            fee: Config::default().tx_fee,
            credentials: 1,
        }]
    );
}

#[test]
fn fully_unlocked_and_claimed_deposit_is_removed() {
    let claimed = reward_of(1_000, MIN_DURATION);
    let h = unlocking(&[(DEPOSIT_TX, 600)]);
    let mut state = state_with(offer());
    state.insert_deposit(DEPOSIT_TX, existing_deposit(1_000, 400, claimed));

    h.execute(&mut state, &sign(unlock_payload(0x30, 600), &[&key(1)], None, None))
        .unwrap();

    assert_eq!(state.get_deposit(&DEPOSIT_TX).unwrap(), None);
}

#[test]
fn unclaimed_reward_keeps_fully_unlocked_deposit() {
    let amount = 1_000_000_000_000;
    assert!(reward_of(amount, MIN_DURATION) > 0);
    let h = unlocking(&[(DEPOSIT_TX, amount)]);
    let mut state = state_with(offer());
    state.insert_deposit(DEPOSIT_TX, existing_deposit(amount, 0, 0));

    h.execute(&mut state, &sign(unlock_payload(0x30, amount), &[&key(1)], None, None))
        .unwrap();

    let kept = state.get_deposit(&DEPOSIT_TX).unwrap().expect("kept");
    assert!(kept.is_fully_unlocked());
    assert_eq!(kept.duration, MIN_DURATION);
}

#[test]
fn repeated_full_unlock_only_moves_spent_value() {
    let claimed = reward_of(1_000, MIN_DURATION);
    let mut state = state_with(offer());
    state.insert_deposit(DEPOSIT_TX, existing_deposit(1_000, 1_000, claimed));

    let h = unlocking(&[(DEPOSIT_TX, 0)]);
    h.execute(&mut state, &sign(unlock_payload(0x30, 10), &[&key(1)], None, None))
        .unwrap();
    assert_eq!(state.get_deposit(&DEPOSIT_TX).unwrap(), None);

    state.clear_writes();
    let h = unlocking(&[]);
    h.execute(&mut state, &sign(unlock_payload(0x31, 10), &[&key(1)], None, None))
        .unwrap();
    assert_eq!(state.get_deposit(&DEPOSIT_TX).unwrap(), None);
    assert_eq!(state.writes(), &["delete_utxo", "add_utxo"]);
}

#[test]
fn unknown_deposit_aborts_before_any_write() {
    let known = TxId::new([0x01; 32]);
    let unknown = TxId::new([0xEE; 32]);
    let h = unlocking(&[(known, 10), (unknown, 5)]);
    let mut state = state_with(offer());
    state.insert_deposit(known, existing_deposit(1_000, 0, 0));
    let before = state.clone();

    let err = h
        .execute(&mut state, &sign(unlock_payload(0x30, 15), &[&key(1)], None, None))
        .unwrap_err();

    assert!(matches!(err, ExecutorError::DepositNotFound(id) if id == unknown));
    assert_eq!(state, before);
    assert!(state.writes().is_empty());
}

#[test]
fn unlocked_amount_overflow_is_rejected() {
    let h = unlocking(&[(DEPOSIT_TX, 1)]);
    let mut state = state_with(offer());
    state.insert_deposit(DEPOSIT_TX, existing_deposit(u64::MAX, u64::MAX, 0));
    let before = state.clone();

    let err = h
        .execute(&mut state, &sign(unlock_payload(0x30, 1), &[&key(1)], None, None))
        .unwrap_err();

    assert!(matches!(err, ExecutorError::Overflow(_)));
    assert_eq!(state, before);
}

#[test]
fn unlock_amounts_come_from_flow_checker() {
    let amounts: BTreeMap<TxId, u64> = BTreeMap::from([(DEPOSIT_TX, 250)]);
    let h = Harness::with_flow(NullFlowChecker::new().with_unlocked_amounts(amounts));
    let mut state = state_with(offer());
    state.insert_deposit(DEPOSIT_TX, existing_deposit(1_000, 500, 0));

    h.execute(&mut state, &sign(unlock_payload(0x30, 250), &[&key(1)], None, None))
        .unwrap();

    assert_eq!(
        state.get_deposit(&DEPOSIT_TX).unwrap().map(|d| d.unlocked_amount),
        Some(750)
    );
}
