pub mod account_structs;
pub mod admin;
/// # tiered stake vault - Time-Locked Staking System
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - The program upgrade authority initializes the vault with the staked
///      mint, the custody token account, cooldown, minimum stake and supply cap
///    - Four lock tiers are accepted out of the box: 60, 91, 182 and 365 days
///    - An admin and a staking operator are named; pausers and unpausers are
///      added by the admin afterwards
///
/// 2. Staking Flow:
///    a. Deposit Phase:
///       - User deposits tokens choosing one of the accepted durations
///       - Each deposit becomes its own lock entry that matures independently
///       - The deposit restarts the account's withdrawal cooldown
///
///    b. Lock Phase:
///       - Locked entries cannot be withdrawn
///       - Matured entries are swept lazily on the next deposit, withdrawal or
///         emergency unlock touching the account
///
/// 3. Withdrawal Flow:
///    - Allowed once the cooldown has elapsed and staking is not paused
///    - Only the deposited balance minus what is still locked can leave
///    - The stake account is closed once nothing is deposited or locked
///
/// 4. Administrative Functions:
///    - Admin tunes cooldown, minimum stake, supply cap and per-call maximum
///    - Staking operators manage accepted durations and can release locks
///      early in batches
///    - Pausers halt staking, allocation and claims; unpausers resume them
///
/// Custody is held by the vault authority PDA, and every state-changing
/// staking entry point is guarded against reentrant calls.
pub mod cooldown;
pub mod deposit_ledger;
pub mod durations;
pub mod error;
pub mod events;
mod guard;
pub mod lock_ledger;
pub mod processor;
pub mod staking;
pub mod state;


use account_structs::*;
use anchor_lang::prelude::*;
use cooldown::CooldownStatus;
use lock_ledger::LockSnapshot;
use state::{InitializeParams, PauseFlag, PauseStatus, Role};

declare_id!("BJXjYC32mqJBQjWxLy9tXvwRxj8mvxyMYsKaPEE1AnQP");

#[program]
pub mod tiered_stake_vault {
    use super::*;

    /// Creates the config, role and pause-flag accounts and hands custody of
    /// the vault token account to the vault authority PDA. Only the program
    /// upgrade authority may call this.
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        processor::initialize(ctx, params)
    }

    /// Stakes `amount` under a new lock entry of `duration` seconds:
    /// - Rejected while staking is paused, above the per-call maximum, below
    ///   the minimum stake, over the supply cap, or for an unknown duration
    /// - Transfers tokens into the vault and restarts the cooldown
    pub fn deposit(ctx: Context<Deposit>, amount: u64, duration: i64) -> Result<()> {
        processor::deposit(ctx, amount, duration)
    }

    /// Withdraws unlocked tokens to `receiver_token_account`:
    /// - Rejected during the cooldown or while staking is paused
    /// - Matured lock entries are swept first, so they count as unlocked
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        processor::withdraw(ctx, amount)
    }

    /// Releases locks early for the stake accounts passed as remaining
    /// accounts, one amount per account. Accounts whose current lock is below
    /// the requested amount are skipped.
    pub fn emergency_unlock<'info>(
        ctx: Context<'_, '_, 'info, 'info, EmergencyUnlock<'info>>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        processor::emergency_unlock(ctx, amounts)
    }

    /// Plain vault deposit without a lock duration. Always rejected.
    pub fn deposit_unlocked(ctx: Context<Disallowed>, amount: u64) -> Result<()> {
        processor::deposit_unlocked(ctx, amount)
    }

    /// Plain vault withdrawal. Always rejected.
    pub fn withdraw_unlocked(ctx: Context<Disallowed>, amount: u64) -> Result<()> {
        processor::withdraw_unlocked(ctx, amount)
    }

    pub fn set_cooldown(ctx: Context<UpdateConfig>, cooldown: i64) -> Result<()> {
        processor::set_cooldown(ctx, cooldown)
    }

    pub fn set_min_stake(ctx: Context<UpdateConfig>, min_stake: u64) -> Result<()> {
        processor::set_min_stake(ctx, min_stake)
    }

    /// 0 removes the cap.
    pub fn set_max_stake_supply(ctx: Context<UpdateConfig>, max_stake_supply: u64) -> Result<()> {
        processor::set_max_stake_supply(ctx, max_stake_supply)
    }

    pub fn set_max_deposit(ctx: Context<UpdateConfig>, max_deposit: u64) -> Result<()> {
        processor::set_max_deposit(ctx, max_deposit)
    }

    pub fn add_duration(ctx: Context<UpdateConfig>, duration: i64) -> Result<bool> {
        processor::add_duration(ctx, duration)
    }

    /// Existing lock entries with this duration keep maturing normally.
    pub fn remove_duration(ctx: Context<UpdateConfig>, duration: i64) -> Result<bool> {
        processor::remove_duration(ctx, duration)
    }

    pub fn update_role_members(
        ctx: Context<UpdateRoles>,
        role: Role,
        members: Vec<Pubkey>,
    ) -> Result<()> {
        processor::update_role_members(ctx, role, members)
    }

    pub fn transfer_admin(ctx: Context<UpdateRoles>, new_admin: Pubkey) -> Result<()> {
        processor::transfer_admin(ctx, new_admin)
    }

    pub fn pause_all(ctx: Context<UpdatePauseFlags>) -> Result<()> {
        processor::pause_all(ctx)
    }

    pub fn unpause_all(ctx: Context<UpdatePauseFlags>) -> Result<()> {
        processor::unpause_all(ctx)
    }

    /// Setting a flag needs the pauser role, clearing it the unpauser role.
    pub fn set_pause_flag(ctx: Context<UpdatePauseFlags>, flag: PauseFlag, value: bool) -> Result<()> {
        processor::set_pause_flag(ctx, flag, value)
    }

    pub fn locked_balance(ctx: Context<ViewStake>, owner: Pubkey) -> Result<u64> {
        processor::locked_balance(ctx, owner)
    }

    pub fn lock_entries(ctx: Context<ViewStake>, owner: Pubkey) -> Result<LockSnapshot> {
        processor::lock_entries(ctx, owner)
    }

    pub fn max_withdrawable(ctx: Context<ViewStake>, owner: Pubkey) -> Result<u64> {
        processor::max_withdrawable(ctx, owner)
    }

    pub fn withdrawable_balance(ctx: Context<ViewStake>, owner: Pubkey) -> Result<u64> {
        processor::withdrawable_balance(ctx, owner)
    }

    pub fn cooldown_status(ctx: Context<ViewStake>, owner: Pubkey) -> Result<CooldownStatus> {
        processor::cooldown_status(ctx, owner)
    }

    pub fn accepted_durations(ctx: Context<ViewConfig>) -> Result<Vec<i64>> {
        processor::accepted_durations(ctx)
    }

    pub fn pause_status(ctx: Context<ViewConfig>) -> Result<PauseStatus> {
        processor::pause_status(ctx)
    }
}
