use crate::cooldown::CooldownTracker;
use crate::durations::DurationRegistry;
use crate::lock_ledger::LockLedger;
use anchor_lang::prelude::*;

pub const MAX_ROLE_MEMBERS: usize = 5;

pub const CONFIG_SEED: &[u8] = b"config";
pub const ACCESS_CONTROL_SEED: &[u8] = b"access_control";
pub const PAUSE_FLAGS_SEED: &[u8] = b"pause_flags";
pub const STAKE_SEED: &[u8] = b"stake";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

#[account]
pub struct StakeConfig {
    pub vault: Pubkey,               // asset mint users stake
    pub vault_token_account: Pubkey, // custody account owned by the vault authority PDA
    pub pause_flags: Pubkey,
    pub allocator: Pubkey, // reserved
    pub cooldown: i64,
    pub min_stake: u64,
    pub max_stake_supply: u64, // 0 = uncapped
    pub max_deposit: u64,      // per call
    pub total_deposited: u64,
    pub durations: DurationRegistry,
    pub entered: bool,
    pub bump: u8,
}

impl StakeConfig {
    pub const LEN: usize = 8 + 32 * 4 + 8 * 5 + DurationRegistry::LEN + 1 + 1;
}

#[account]
pub struct UserStake {
    pub owner: Pubkey,
    pub deposited: u64,
    pub locks: LockLedger,
    pub cooldown: CooldownTracker,
    pub bump: u8,
}

impl UserStake {
    pub const LEN: usize = 8 + 32 + 8 + LockLedger::LEN + CooldownTracker::LEN + 1;

    /// Nothing deposited and nothing locked: the account can be closed.
    /// Zero-amount lock entries left over at that point are dropped with it.
    pub fn is_spent(&self) -> bool {
        self.deposited == 0 && self.locks.cached_locked == 0
    }

    /// Raw deposited balance, lock-unaware.
    pub fn max_withdrawable(&self) -> u64 {
        self.deposited
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    StakingOperator,
    Pauser,
    Unpauser,
}

#[account]
pub struct AccessControl {
    pub admin: Pubkey,
    pub operators: Vec<Pubkey>,
    pub pausers: Vec<Pubkey>,
    pub unpausers: Vec<Pubkey>,
    pub bump: u8,
}

impl AccessControl {
    pub const LEN: usize = 8 + 32 + 3 * (4 + 32 * MAX_ROLE_MEMBERS) + 1; // max of 5 per role

    pub fn has_role(&self, role: Role, key: &Pubkey) -> bool {
        match role {
            Role::Admin => self.admin == *key,
            Role::StakingOperator => self.operators.contains(key),
            Role::Pauser => self.pausers.contains(key),
            Role::Unpauser => self.unpausers.contains(key),
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseFlag {
    Staking,
    Allocation,
    Claim,
}

impl PauseFlag {
    pub const ALL: [PauseFlag; 3] = [PauseFlag::Staking, PauseFlag::Allocation, PauseFlag::Claim];

    pub fn selector(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PauseFlag::Staking => "staking",
            PauseFlag::Allocation => "allocation",
            PauseFlag::Claim => "claim",
        }
    }
}

#[account]
pub struct PauseFlags {
    pub staking: bool,
    pub allocation: bool,
    pub claim: bool,
    pub bump: u8,
}

impl PauseFlags {
    pub const LEN: usize = 8 + 1 + 1 + 1 + 1;

    pub fn is_staking_paused(&self) -> bool {
        self.staking
    }

    pub fn is_allocation_paused(&self) -> bool {
        self.allocation
    }

    pub fn is_claim_paused(&self) -> bool {
        self.claim
    }

    pub fn set(&mut self, flag: PauseFlag, value: bool) {
        match flag {
            PauseFlag::Staking => self.staking = value,
            PauseFlag::Allocation => self.allocation = value,
            PauseFlag::Claim => self.claim = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigField {
    Cooldown,
    MinStake,
    MaxStakeSupply,
    MaxDeposit,
    DurationAdded,
    DurationRemoved,
}

impl ConfigField {
    pub fn selector(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigField::Cooldown => "cooldown",
            ConfigField::MinStake => "minStake",
            ConfigField::MaxStakeSupply => "maxStakeSupply",
            ConfigField::MaxDeposit => "maxDeposit",
            ConfigField::DurationAdded => "durationAdded",
            ConfigField::DurationRemoved => "durationRemoved",
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeParams {
    pub admin: Pubkey,
    pub operator: Pubkey,
    pub cooldown: i64,
    pub min_stake: u64,
    pub max_stake_supply: u64,
    pub allocator: Pubkey,
}

/// Returned by the `pause_status` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PauseStatus {
    pub staking: bool,
    pub allocation: bool,
    pub claim: bool,
}
