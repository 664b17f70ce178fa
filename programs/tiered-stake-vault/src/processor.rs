use crate::account_structs::*;
use crate::admin;
use crate::cooldown::CooldownStatus;
use crate::deposit_ledger::DepositLedger;
use crate::durations::DurationRegistry;
use crate::error::*;
use crate::events::*;
use crate::guard::{
    enter_non_reentrant, leave_non_reentrant, require_role, validate_program_update_authority,
};
use crate::lock_ledger::LockSnapshot;
use crate::staking;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, Transfer};

pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;
    require!(
        params.admin != Pubkey::default(),
        StakeErrorCode::ZeroAddress
    );
    require!(
        params.operator != Pubkey::default(),
        StakeErrorCode::ZeroAddress
    );
    require!(params.cooldown >= 0, StakeErrorCode::InvalidCooldown);

    let config = &mut ctx.accounts.config;
    config.vault = ctx.accounts.vault_mint.key();
    config.vault_token_account = ctx.accounts.vault_token_account.key();
    config.pause_flags = ctx.accounts.pause_flags.key();
    config.allocator = params.allocator;
    config.cooldown = params.cooldown;
    config.min_stake = params.min_stake;
    config.max_stake_supply = params.max_stake_supply;
    config.max_deposit = u64::MAX;
    config.total_deposited = 0;
    config.durations = DurationRegistry::seeded();
    config.entered = false;
    config.bump = ctx.bumps.config;

    let access_control = &mut ctx.accounts.access_control;
    access_control.admin = params.admin;
    access_control.operators = vec![params.operator];
    access_control.pausers = vec![];
    access_control.unpausers = vec![];
    access_control.bump = ctx.bumps.access_control;

    let pause_flags = &mut ctx.accounts.pause_flags;
    pause_flags.staking = false;
    pause_flags.allocation = false;
    pause_flags.claim = false;
    pause_flags.bump = ctx.bumps.pause_flags;

    // Hand custody of the vault token account to the vault authority PDA so
    // only this program can move staked tokens.
    if ctx.accounts.vault_token_account.owner == ctx.accounts.signer.key() {
        token::set_authority(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                token::SetAuthority {
                    account_or_mint: ctx.accounts.vault_token_account.to_account_info(),
                    current_authority: ctx.accounts.signer.to_account_info(),
                },
            ),
            AuthorityType::AccountOwner,
            Some(ctx.accounts.vault_authority.key()),
        )?;
    }

    msg!(
        "Stake vault initialized for mint {} with {} accepted durations",
        config.vault,
        config.durations.list().len()
    );
    Ok(())
}

pub fn deposit(ctx: Context<Deposit>, amount: u64, duration: i64) -> Result<()> {
    enter_non_reentrant(&mut ctx.accounts.config)?;
    ctx.accounts.config.exit(&crate::ID)?;

    let now = Clock::get()?.unix_timestamp;
    staking::validate_deposit(
        &ctx.accounts.config,
        &ctx.accounts.pause_flags,
        amount,
        duration,
    )?;

    let owner = ctx.accounts.signer.key();
    let user_stake = &mut ctx.accounts.user_stake;
    if user_stake.owner == Pubkey::default() {
        user_stake.owner = owner;
        user_stake.bump = ctx.bumps.user_stake;
    }
    let locked = staking::lock_deposit(user_stake, &ctx.accounts.config, amount, duration, now)?;

    let cpi_accounts = Transfer {
        from: ctx.accounts.user_vault_token_account.to_account_info(),
        to: ctx.accounts.vault_token_account.to_account_info(),
        authority: ctx.accounts.signer.to_account_info(),
    };
    token::transfer(
        CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts),
        amount,
    )
    .map_err(|_| error!(StakeErrorCode::TransferFailed))?;

    let config = &mut ctx.accounts.config;
    DepositLedger::new(&mut ctx.accounts.user_stake.deposited, &mut config.total_deposited)
        .credit(amount)?;
    leave_non_reentrant(config);

    emit!(DepositEvent {
        user: owner,
        amount,
    });
    emit!(UserLockUpdated {
        user: owner,
        locked,
    });
    emit!(DepositWithDuration {
        user: owner,
        timestamp: now,
        amount,
        duration,
    });

    Ok(())
}

pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    enter_non_reentrant(&mut ctx.accounts.config)?;
    ctx.accounts.config.exit(&crate::ID)?;

    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.signer.key();
    let lock_update = staking::prepare_withdraw(
        &mut ctx.accounts.user_stake,
        &ctx.accounts.config,
        &ctx.accounts.pause_flags,
        amount,
        now,
    )?;
    if let Some(locked) = lock_update {
        emit!(UserLockUpdated {
            user: owner,
            locked,
        });
    }

    DepositLedger::new(
        &mut ctx.accounts.user_stake.deposited,
        &mut ctx.accounts.config.total_deposited,
    )
    .debit(amount)?;

    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, &[ctx.bumps.vault_authority]];
    let signer = &[&seeds[..]];
    let transfer_accounts = Transfer {
        from: ctx.accounts.vault_token_account.to_account_info(),
        to: ctx.accounts.receiver_token_account.to_account_info(),
        authority: ctx.accounts.vault_authority.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_accounts,
            signer,
        ),
        amount,
    )
    .map_err(|_| error!(StakeErrorCode::TransferFailed))?;

    leave_non_reentrant(&mut ctx.accounts.config);

    emit!(WithdrawEvent {
        user: owner,
        receiver: ctx.accounts.receiver_token_account.key(),
        amount,
    });

    if ctx.accounts.user_stake.is_spent() {
        ctx.accounts
            .user_stake
            .close(ctx.accounts.signer.to_account_info())?;
        msg!("Stake account for {} closed", owner);
    }

    Ok(())
}

pub fn emergency_unlock<'info>(
    ctx: Context<'_, '_, 'info, 'info, EmergencyUnlock<'info>>,
    amounts: Vec<u64>,
) -> Result<()> {
    require_role(
        &ctx.accounts.access_control,
        Role::StakingOperator,
        &ctx.accounts.signer.key(),
    )?;
    require!(
        ctx.remaining_accounts.len() == amounts.len(),
        StakeErrorCode::LengthMismatch
    );

    let now = Clock::get()?.unix_timestamp;
    for (info, amount) in ctx.remaining_accounts.iter().zip(amounts) {
        require!(info.is_writable, StakeErrorCode::InvalidStakeAccount);
        let mut user_stake = Account::<UserStake>::try_from(info)?;
        let expected = Pubkey::create_program_address(
            &[STAKE_SEED, user_stake.owner.as_ref(), &[user_stake.bump]],
            &crate::ID,
        )
        .map_err(|_| StakeErrorCode::InvalidStakeAccount)?;
        require_keys_eq!(info.key(), expected, StakeErrorCode::InvalidStakeAccount);

        let user = user_stake.owner;
        let outcome = staking::emergency_unlock(&mut user_stake, amount, now)?;
        if let Some(locked) = outcome.lock_update {
            emit!(UserLockUpdated { user, locked });
        }
        match outcome.unlocked {
            Some(unlocked) => emit!(UserUnlocked {
                user,
                requested: amount,
                unlocked,
            }),
            None => msg!(
                "Skipping emergency unlock of {} for {}: lock too small",
                amount,
                user
            ),
        }
        user_stake.exit(&crate::ID)?;
    }

    Ok(())
}

pub fn deposit_unlocked(_ctx: Context<Disallowed>, _amount: u64) -> Result<()> {
    err!(StakeErrorCode::NotAllowed)
}

pub fn withdraw_unlocked(_ctx: Context<Disallowed>, _amount: u64) -> Result<()> {
    err!(StakeErrorCode::NotAllowed)
}

fn emit_config_changed(event: ConfigChanged) {
    msg!(
        "Config {} changed to 0x{}",
        event.field,
        hex::encode(&event.value)
    );
    emit!(event);
}

pub fn set_cooldown(ctx: Context<UpdateConfig>, cooldown: i64) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let event = admin::set_cooldown(
        &ctx.accounts.access_control,
        &signer,
        &mut ctx.accounts.config,
        cooldown,
    )?;
    emit_config_changed(event);
    Ok(())
}

pub fn set_min_stake(ctx: Context<UpdateConfig>, min_stake: u64) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let event = admin::set_min_stake(
        &ctx.accounts.access_control,
        &signer,
        &mut ctx.accounts.config,
        min_stake,
    )?;
    emit_config_changed(event);
    Ok(())
}

pub fn set_max_stake_supply(ctx: Context<UpdateConfig>, max_stake_supply: u64) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let event = admin::set_max_stake_supply(
        &ctx.accounts.access_control,
        &signer,
        &mut ctx.accounts.config,
        max_stake_supply,
    )?;
    emit_config_changed(event);
    Ok(())
}

pub fn set_max_deposit(ctx: Context<UpdateConfig>, max_deposit: u64) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let event = admin::set_max_deposit(
        &ctx.accounts.access_control,
        &signer,
        &mut ctx.accounts.config,
        max_deposit,
    )?;
    emit_config_changed(event);
    Ok(())
}

pub fn add_duration(ctx: Context<UpdateConfig>, duration: i64) -> Result<bool> {
    let signer = ctx.accounts.signer.key();
    let (added, event) = admin::add_duration(
        &ctx.accounts.access_control,
        &signer,
        &mut ctx.accounts.config,
        duration,
    )?;
    emit_config_changed(event);
    Ok(added)
}

pub fn remove_duration(ctx: Context<UpdateConfig>, duration: i64) -> Result<bool> {
    let signer = ctx.accounts.signer.key();
    let (removed, event) = admin::remove_duration(
        &ctx.accounts.access_control,
        &signer,
        &mut ctx.accounts.config,
        duration,
    )?;
    emit_config_changed(event);
    Ok(removed)
}

pub fn update_role_members(
    ctx: Context<UpdateRoles>,
    role: Role,
    members: Vec<Pubkey>,
) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let count = members.len();
    admin::replace_role_members(&mut ctx.accounts.access_control, &signer, role, members)?;
    msg!("Role {:?} updated. New count: {}", role, count);
    Ok(())
}

pub fn transfer_admin(ctx: Context<UpdateRoles>, new_admin: Pubkey) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    admin::transfer_admin(&mut ctx.accounts.access_control, &signer, new_admin)?;
    msg!("Admin transferred to {}", new_admin);
    Ok(())
}

fn write_pause_flags(ctx: Context<UpdatePauseFlags>, targets: &[PauseFlag], value: bool) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let events = admin::write_pause_flags(
        &ctx.accounts.access_control,
        &signer,
        &mut ctx.accounts.pause_flags,
        targets,
        value,
    )?;
    for event in events {
        emit!(event);
    }
    Ok(())
}

pub fn pause_all(ctx: Context<UpdatePauseFlags>) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    write_pause_flags(ctx, &PauseFlag::ALL, true)?;
    msg!("Protocol paused by {}", signer);
    Ok(())
}

pub fn unpause_all(ctx: Context<UpdatePauseFlags>) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    write_pause_flags(ctx, &PauseFlag::ALL, false)?;
    msg!("Protocol unpaused by {}", signer);
    Ok(())
}

pub fn set_pause_flag(ctx: Context<UpdatePauseFlags>, flag: PauseFlag, value: bool) -> Result<()> {
    write_pause_flags(ctx, &[flag], value)
}

fn load_stake<'a>(ctx: &'a Context<ViewStake>, owner: &Pubkey) -> Result<Option<&'a UserStake>> {
    require!(*owner != Pubkey::default(), StakeErrorCode::ZeroAddress);
    let Some(user_stake) = ctx.accounts.user_stake.as_ref() else {
        return Ok(None);
    };
    let (expected, _) = Pubkey::find_program_address(&[STAKE_SEED, owner.as_ref()], &crate::ID);
    require_keys_eq!(user_stake.key(), expected, StakeErrorCode::InvalidStakeAccount);
    Ok(Some(&**user_stake))
}

pub fn locked_balance(ctx: Context<ViewStake>, owner: Pubkey) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(load_stake(&ctx, &owner)?
        .map(|stake| stake.locks.locked_balance(now))
        .unwrap_or(0))
}

pub fn lock_entries(ctx: Context<ViewStake>, owner: Pubkey) -> Result<LockSnapshot> {
    Ok(load_stake(&ctx, &owner)?
        .map(|stake| stake.locks.snapshot())
        .unwrap_or_default())
}

pub fn max_withdrawable(ctx: Context<ViewStake>, owner: Pubkey) -> Result<u64> {
    Ok(load_stake(&ctx, &owner)?
        .map(UserStake::max_withdrawable)
        .unwrap_or(0))
}

pub fn withdrawable_balance(ctx: Context<ViewStake>, owner: Pubkey) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(load_stake(&ctx, &owner)?
        .map(|stake| staking::withdrawable_balance(stake, now))
        .unwrap_or(0))
}

pub fn cooldown_status(ctx: Context<ViewStake>, owner: Pubkey) -> Result<CooldownStatus> {
    let now = Clock::get()?.unix_timestamp;
    match load_stake(&ctx, &owner)? {
        Some(stake) => stake
            .cooldown
            .status(&owner, ctx.accounts.config.cooldown, now),
        None => Ok(CooldownStatus::default()),
    }
}

pub fn accepted_durations(ctx: Context<ViewConfig>) -> Result<Vec<i64>> {
    Ok(ctx.accounts.config.durations.list().to_vec())
}

pub fn pause_status(ctx: Context<ViewConfig>) -> Result<PauseStatus> {
    let flags = &ctx.accounts.pause_flags;
    Ok(PauseStatus {
        staking: flags.is_staking_paused(),
        allocation: flags.is_allocation_paused(),
        claim: flags.is_claim_paused(),
    })
}
