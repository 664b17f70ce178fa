use crate::error::StakeErrorCode;
use crate::state::{AccessControl, Role, StakeConfig};
use anchor_lang::prelude::*;

#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::UpgradeableLoaderState;

pub fn validate_program_update_authority(
    program_data_account: &UncheckedAccount,
    authority: &Signer,
) -> Result<()> {
    let program_data = program_data_account
        .try_borrow_data()
        .map_err(|_| StakeErrorCode::InvalidProgramData)?;

    let loader_state = bincode::deserialize::<UpgradeableLoaderState>(&program_data)
        .map_err(|_| StakeErrorCode::InvalidProgramData)?;

    match loader_state {
        UpgradeableLoaderState::ProgramData {
            slot: _,
            upgrade_authority_address,
        } => match upgrade_authority_address {
            Some(update_authority) => {
                require!(
                    authority.key() == update_authority,
                    StakeErrorCode::InvalidUpgradeAuthority
                );
            }
            None => return err!(StakeErrorCode::NoUpgradeAuthority),
        },
        _ => return err!(StakeErrorCode::InvalidProgramData),
    }

    Ok(())
}

pub fn require_role(access_control: &AccessControl, role: Role, signer: &Pubkey) -> Result<()> {
    require!(
        access_control.has_role(role, signer),
        StakeErrorCode::Unauthorized
    );
    Ok(())
}

/// Marks the config as inside a state-mutating entry point. The caller must
/// persist the account before making any CPI so a reentrant call sees the flag.
pub fn enter_non_reentrant(config: &mut StakeConfig) -> Result<()> {
    require!(!config.entered, StakeErrorCode::Reentrancy);
    config.entered = true;
    Ok(())
}

pub fn leave_non_reentrant(config: &mut StakeConfig) {
    config.entered = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::durations::DurationRegistry;

    fn config() -> StakeConfig {
        StakeConfig {
            vault: Pubkey::new_unique(),
            vault_token_account: Pubkey::new_unique(),
            pause_flags: Pubkey::new_unique(),
            allocator: Pubkey::default(),
            cooldown: 0,
            min_stake: 0,
            max_stake_supply: 0,
            max_deposit: u64::MAX,
            total_deposited: 0,
            durations: DurationRegistry::seeded(),
            entered: false,
            bump: 255,
        }
    }

    #[test]
    fn nested_entry_is_rejected() {
        let mut config = config();
        enter_non_reentrant(&mut config).unwrap();
        assert_eq!(
            enter_non_reentrant(&mut config).unwrap_err(),
            StakeErrorCode::Reentrancy.into()
        );
        leave_non_reentrant(&mut config);
        enter_non_reentrant(&mut config).unwrap();
    }

    #[test]
    fn missing_role_is_unauthorized() {
        let operator = Pubkey::new_unique();
        let acl = AccessControl {
            admin: Pubkey::new_unique(),
            operators: vec![operator],
            pausers: vec![],
            unpausers: vec![],
            bump: 255,
        };
        require_role(&acl, Role::StakingOperator, &operator).unwrap();
        assert_eq!(
            require_role(&acl, Role::Admin, &operator).unwrap_err(),
            StakeErrorCode::Unauthorized.into()
        );
    }
}
