use anchor_lang::prelude::*;

#[error_code]
pub enum StakeErrorCode {
    #[msg("Caller does not hold the required role")]
    Unauthorized = 1,
    #[msg("Lock duration is not accepted")]
    InvalidDuration = 2,
    #[msg("Deposit amount is below the minimum stake")]
    DepositAmountTooSmall = 3,
    #[msg("Deposit amount exceeds the per-call maximum")]
    ExceededMaxDeposit = 4,
    #[msg("Deposit would exceed the maximum stake supply")]
    DepositOverBond = 5,
    #[msg("Withdrawal exceeds the deposited balance")]
    ExceededWithdrawal = 6,
    #[msg("Withdrawal exceeds the unlocked balance")]
    InsufficientWithdrawableBalance = 7,
    #[msg("Account is in its deposit cooldown")]
    Cooldown = 8,
    #[msg("Staking is paused")]
    Paused = 9,
    #[msg("Zero address")]
    ZeroAddress = 10,
    #[msg("Accounts and amounts differ in length")]
    LengthMismatch = 11,
    #[msg("Operation is not allowed")]
    NotAllowed = 12,
    #[msg("Token transfer failed")]
    TransferFailed = 13,
    #[msg("Reentrant call")]
    Reentrancy = 14,
    #[msg("Math overflow")]
    MathOverflow = 15,

    #[msg("Cooldown must not be negative")]
    InvalidCooldown = 16,
    #[msg("Too many accepted durations")]
    TooManyDurations = 17,
    #[msg("Too many lock entries for this account")]
    TooManyLockEntries = 18,
    #[msg("Too many role members.")]
    TooManyAdministrators = 19,

    #[msg("Invalid mint provided")]
    InvalidMint = 20,
    #[msg("Invalid vault mint provided")]
    InvalidVaultMint = 21,
    #[msg("Invalid vault authority")]
    InvalidVaultAuthority = 22,
    #[msg("Invalid stake account")]
    InvalidStakeAccount = 23,
    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData = 24,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority = 25,
    #[msg("Signer is not the upgrade authority.")]
    InvalidUpgradeAuthority = 26,
}
