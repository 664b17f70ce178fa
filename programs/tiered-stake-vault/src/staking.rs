//! Staking flow rules shared by the instruction handlers.
//!
//! Everything here works on already-loaded account state and an explicit
//! `now`, leaving token CPIs, account closing and event emission to
//! `processor`. Handlers call these in the order:
//!
//! - deposit: [`validate_deposit`] → [`lock_deposit`] → asset pull-in →
//!   `DepositLedger::credit`
//! - withdraw: [`prepare_withdraw`] → `DepositLedger::debit` → asset push-out
//! - emergency unlock: [`emergency_unlock`] per stake account

use crate::error::StakeErrorCode;
use crate::state::{PauseFlags, StakeConfig, UserStake};
use anchor_lang::prelude::*;

pub fn validate_deposit(
    config: &StakeConfig,
    flags: &PauseFlags,
    amount: u64,
    duration: i64,
) -> Result<()> {
    require!(!flags.is_staking_paused(), StakeErrorCode::Paused);
    require!(
        amount <= config.max_deposit,
        StakeErrorCode::ExceededMaxDeposit
    );
    require!(
        amount >= config.min_stake,
        StakeErrorCode::DepositAmountTooSmall
    );
    if config.max_stake_supply != 0 {
        let new_total = config
            .total_deposited
            .checked_add(amount)
            .ok_or(StakeErrorCode::DepositOverBond)?;
        require!(
            new_total <= config.max_stake_supply,
            StakeErrorCode::DepositOverBond
        );
    }
    require!(
        config.durations.is_accepted(duration),
        StakeErrorCode::InvalidDuration
    );
    Ok(())
}

/// Records the lock side of a deposit and starts the cooldown. Returns the
/// account's locked total afterwards.
pub fn lock_deposit(
    stake: &mut UserStake,
    config: &StakeConfig,
    amount: u64,
    duration: i64,
    now: i64,
) -> Result<u64> {
    stake
        .locks
        .insert(&config.durations, amount, duration, now)?;
    stake.locks.consolidate(now)?;
    stake.cooldown.stamp(now);
    Ok(stake.locks.cached_locked)
}

pub fn withdrawable_balance(stake: &UserStake, now: i64) -> u64 {
    stake
        .max_withdrawable()
        .saturating_sub(stake.locks.locked_balance(now))
}

/// Checks a withdrawal and sweeps matured locks so they are withdrawable in
/// the same call. Returns the new locked total if the sweep removed entries.
pub fn prepare_withdraw(
    stake: &mut UserStake,
    config: &StakeConfig,
    flags: &PauseFlags,
    amount: u64,
    now: i64,
) -> Result<Option<u64>> {
    let status = stake.cooldown.status(&stake.owner, config.cooldown, now)?;
    require!(!status.in_cooldown, StakeErrorCode::Cooldown);
    require!(!flags.is_staking_paused(), StakeErrorCode::Paused);

    let lock_update = stake.locks.consolidate(now)?;
    require!(
        amount <= withdrawable_balance(stake, now),
        StakeErrorCode::InsufficientWithdrawableBalance
    );
    Ok(lock_update)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmergencyUnlockOutcome {
    /// New locked total if consolidation removed matured entries.
    pub lock_update: Option<u64>,
    /// Amount released, or `None` when the lock was too small and the
    /// account was skipped.
    pub unlocked: Option<u64>,
}

pub fn emergency_unlock(stake: &mut UserStake, amount: u64, now: i64) -> Result<EmergencyUnlockOutcome> {
    let lock_update = stake.locks.consolidate(now)?;
    if stake.locks.locked_balance(now) < amount {
        return Ok(EmergencyUnlockOutcome {
            lock_update,
            unlocked: None,
        });
    }
    let unlocked = stake.locks.early_unlock(amount, now)?;
    Ok(EmergencyUnlockOutcome {
        lock_update,
        unlocked: Some(unlocked),
    })
}
