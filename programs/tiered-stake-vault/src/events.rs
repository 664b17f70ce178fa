use anchor_lang::prelude::*;

#[event]
pub struct DepositEvent {
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct WithdrawEvent {
    pub user: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DepositWithDuration {
    pub user: Pubkey,
    pub timestamp: i64,
    pub amount: u64,
    pub duration: i64,
}

#[event]
pub struct UserLockUpdated {
    pub user: Pubkey,
    pub locked: u64,
}

#[event]
pub struct UserUnlocked {
    pub user: Pubkey,
    pub requested: u64,
    pub unlocked: u64,
}

#[event]
pub struct ConfigChanged {
    pub selector: u8,
    pub field: String,
    pub value: Vec<u8>, // little-endian encoding of the new value
}

#[event]
pub struct FlagUpdated {
    pub selector: u8,
    pub value: bool,
    pub flag: String,
}
