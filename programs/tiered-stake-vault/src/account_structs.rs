use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use anchor_lang::solana_program::bpf_loader_upgradeable::{self};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = signer,
        space = StakeConfig::LEN,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, StakeConfig>,

    #[account(
        init,
        payer = signer,
        space = AccessControl::LEN,
        seeds = [ACCESS_CONTROL_SEED],
        bump
    )]
    pub access_control: Account<'info, AccessControl>,

    #[account(
        init,
        payer = signer,
        space = PauseFlags::LEN,
        seeds = [PAUSE_FLAGS_SEED],
        bump
    )]
    pub pause_flags: Account<'info, PauseFlags>,

    /// CHECK: PDA that owns the vault token account, validated by seeds constraint.
    /// Only this program can sign for it, so only this program can move
    /// staked tokens out of custody.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// The vault token account that should be owned by vault_authority
    #[account(
        mut,
        constraint = vault_token_account.mint == vault_mint.key() @ StakeErrorCode::InvalidMint,
        constraint = (vault_token_account.owner == signer.key() || vault_token_account.owner == vault_authority.key()) @ StakeErrorCode::InvalidVaultAuthority
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub vault_mint: Account<'info, Mint>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ StakeErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,
}

// Helper function to derive the program data address
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, StakeConfig>,

    #[account(
        seeds = [PAUSE_FLAGS_SEED],
        bump = pause_flags.bump,
        constraint = pause_flags.key() == config.pause_flags
    )]
    pub pause_flags: Account<'info, PauseFlags>,

    #[account(
        init_if_needed,
        payer = signer,
        space = UserStake::LEN,
        seeds = [STAKE_SEED, signer.key().as_ref()],
        bump
    )]
    pub user_stake: Account<'info, UserStake>,

    #[account(
        mut,
        token::mint = config.vault,
        constraint = vault_token_account.key() == config.vault_token_account @ StakeErrorCode::InvalidVaultAuthority,
        constraint = vault_token_account.owner == vault_authority.key() @ StakeErrorCode::InvalidVaultAuthority
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// CHECK: This is a PDA that acts as vault authority, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        token::mint = config.vault,
        constraint = user_vault_token_account.mint == config.vault @ StakeErrorCode::InvalidVaultMint,
        constraint = user_vault_token_account.owner == signer.key()
    )]
    pub user_vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, StakeConfig>,

    #[account(
        seeds = [PAUSE_FLAGS_SEED],
        bump = pause_flags.bump,
        constraint = pause_flags.key() == config.pause_flags
    )]
    pub pause_flags: Account<'info, PauseFlags>,

    #[account(
        mut,
        seeds = [STAKE_SEED, signer.key().as_ref()],
        bump = user_stake.bump
    )]
    pub user_stake: Account<'info, UserStake>,

    #[account(
        mut,
        token::mint = config.vault,
        constraint = vault_token_account.key() == config.vault_token_account @ StakeErrorCode::InvalidVaultAuthority
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// CHECK: This is a PDA vault authority, validated by seeds and token account owner constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump,
        constraint = vault_authority.key() == vault_token_account.owner @ StakeErrorCode::InvalidVaultAuthority
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub signer: Signer<'info>,

    /// Any token account of the staked mint; it need not belong to the signer.
    #[account(
        mut,
        token::mint = config.vault,
        constraint = receiver_token_account.mint == config.vault @ StakeErrorCode::InvalidVaultMint
    )]
    pub receiver_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Stake accounts to unlock are passed as remaining accounts, one per amount.
#[derive(Accounts)]
pub struct EmergencyUnlock<'info> {
    #[account(
        seeds = [ACCESS_CONTROL_SEED],
        bump = access_control.bump
    )]
    pub access_control: Account<'info, AccessControl>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct Disallowed<'info> {
    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, StakeConfig>,

    #[account(
        seeds = [ACCESS_CONTROL_SEED],
        bump = access_control.bump
    )]
    pub access_control: Account<'info, AccessControl>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdateRoles<'info> {
    #[account(
        mut,
        seeds = [ACCESS_CONTROL_SEED],
        bump = access_control.bump
    )]
    pub access_control: Account<'info, AccessControl>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdatePauseFlags<'info> {
    #[account(
        mut,
        seeds = [PAUSE_FLAGS_SEED],
        bump = pause_flags.bump
    )]
    pub pause_flags: Account<'info, PauseFlags>,

    #[account(
        seeds = [ACCESS_CONTROL_SEED],
        bump = access_control.bump
    )]
    pub access_control: Account<'info, AccessControl>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct ViewConfig<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, StakeConfig>,

    #[account(
        seeds = [PAUSE_FLAGS_SEED],
        bump = pause_flags.bump
    )]
    pub pause_flags: Account<'info, PauseFlags>,
}

#[derive(Accounts)]
pub struct ViewStake<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, StakeConfig>,

    /// Absent for accounts that never deposited (or were closed).
    pub user_stake: Option<Account<'info, UserStake>>,
}
