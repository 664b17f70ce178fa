//! Role, pause and config rules behind the administrative instructions.
//!
//! Each helper checks the caller's role against `AccessControl`, applies the
//! write and hands back the notification for `processor` to emit. Every
//! successful write produces its notification, changed value or not.

use crate::error::StakeErrorCode;
use crate::events::{ConfigChanged, FlagUpdated};
use crate::guard::require_role;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn config_changed(field: ConfigField, value: Vec<u8>) -> ConfigChanged {
    ConfigChanged {
        selector: field.selector(),
        field: field.name().to_string(),
        value,
    }
}

pub fn set_cooldown(
    access_control: &AccessControl,
    signer: &Pubkey,
    config: &mut StakeConfig,
    cooldown: i64,
) -> Result<ConfigChanged> {
    require_role(access_control, Role::Admin, signer)?;
    require!(cooldown >= 0, StakeErrorCode::InvalidCooldown);
    config.cooldown = cooldown;
    Ok(config_changed(
        ConfigField::Cooldown,
        cooldown.to_le_bytes().to_vec(),
    ))
}

pub fn set_min_stake(
    access_control: &AccessControl,
    signer: &Pubkey,
    config: &mut StakeConfig,
    min_stake: u64,
) -> Result<ConfigChanged> {
    require_role(access_control, Role::Admin, signer)?;
    config.min_stake = min_stake;
    Ok(config_changed(
        ConfigField::MinStake,
        min_stake.to_le_bytes().to_vec(),
    ))
}

/// 0 removes the cap.
pub fn set_max_stake_supply(
    access_control: &AccessControl,
    signer: &Pubkey,
    config: &mut StakeConfig,
    max_stake_supply: u64,
) -> Result<ConfigChanged> {
    require_role(access_control, Role::Admin, signer)?;
    config.max_stake_supply = max_stake_supply;
    Ok(config_changed(
        ConfigField::MaxStakeSupply,
        max_stake_supply.to_le_bytes().to_vec(),
    ))
}

pub fn set_max_deposit(
    access_control: &AccessControl,
    signer: &Pubkey,
    config: &mut StakeConfig,
    max_deposit: u64,
) -> Result<ConfigChanged> {
    require_role(access_control, Role::Admin, signer)?;
    config.max_deposit = max_deposit;
    Ok(config_changed(
        ConfigField::MaxDeposit,
        max_deposit.to_le_bytes().to_vec(),
    ))
}

/// Returns whether the duration was new, plus the notification.
pub fn add_duration(
    access_control: &AccessControl,
    signer: &Pubkey,
    config: &mut StakeConfig,
    duration: i64,
) -> Result<(bool, ConfigChanged)> {
    require_role(access_control, Role::StakingOperator, signer)?;
    let added = config.durations.add(duration)?;
    Ok((
        added,
        config_changed(ConfigField::DurationAdded, duration.to_le_bytes().to_vec()),
    ))
}

/// Returns whether the duration was accepted before, plus the notification.
pub fn remove_duration(
    access_control: &AccessControl,
    signer: &Pubkey,
    config: &mut StakeConfig,
    duration: i64,
) -> Result<(bool, ConfigChanged)> {
    require_role(access_control, Role::StakingOperator, signer)?;
    let removed = config.durations.remove(duration);
    Ok((
        removed,
        config_changed(
            ConfigField::DurationRemoved,
            duration.to_le_bytes().to_vec(),
        ),
    ))
}

pub fn replace_role_members(
    access_control: &mut AccessControl,
    signer: &Pubkey,
    role: Role,
    members: Vec<Pubkey>,
) -> Result<()> {
    require_role(access_control, Role::Admin, signer)?;
    require!(
        members.len() <= MAX_ROLE_MEMBERS,
        StakeErrorCode::TooManyAdministrators
    );
    require!(
        !members.contains(&Pubkey::default()),
        StakeErrorCode::ZeroAddress
    );

    match role {
        // The admin key only changes through `transfer_admin`.
        Role::Admin => return err!(StakeErrorCode::NotAllowed),
        Role::StakingOperator => access_control.operators = members,
        Role::Pauser => access_control.pausers = members,
        Role::Unpauser => access_control.unpausers = members,
    }
    Ok(())
}

pub fn transfer_admin(
    access_control: &mut AccessControl,
    signer: &Pubkey,
    new_admin: Pubkey,
) -> Result<()> {
    require_role(access_control, Role::Admin, signer)?;
    require!(new_admin != Pubkey::default(), StakeErrorCode::ZeroAddress);
    access_control.admin = new_admin;
    Ok(())
}

/// Setting a flag needs the pauser role, clearing it the unpauser role.
pub fn pause_role(value: bool) -> Role {
    if value {
        Role::Pauser
    } else {
        Role::Unpauser
    }
}

pub fn write_pause_flags(
    access_control: &AccessControl,
    signer: &Pubkey,
    flags: &mut PauseFlags,
    targets: &[PauseFlag],
    value: bool,
) -> Result<Vec<FlagUpdated>> {
    require_role(access_control, pause_role(value), signer)?;
    Ok(targets
        .iter()
        .map(|&flag| {
            flags.set(flag, value);
            FlagUpdated {
                selector: flag.selector(),
                value,
                flag: flag.name().to_string(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::durations::{DurationRegistry, DAY};

    struct Keys {
        admin: Pubkey,
        operator: Pubkey,
        pauser: Pubkey,
        unpauser: Pubkey,
    }

    fn setup() -> (Keys, AccessControl, StakeConfig, PauseFlags) {
        let keys = Keys {
            admin: Pubkey::new_unique(),
            operator: Pubkey::new_unique(),
            pauser: Pubkey::new_unique(),
            unpauser: Pubkey::new_unique(),
        };
        let acl = AccessControl {
            admin: keys.admin,
            operators: vec![keys.operator],
            pausers: vec![keys.pauser],
            unpausers: vec![keys.unpauser],
            bump: 255,
        };
        let config = StakeConfig {
            vault: Pubkey::new_unique(),
            vault_token_account: Pubkey::new_unique(),
            pause_flags: Pubkey::new_unique(),
            allocator: Pubkey::default(),
            cooldown: DAY,
            min_stake: 0,
            max_stake_supply: 0,
            max_deposit: u64::MAX,
            total_deposited: 0,
            durations: DurationRegistry::seeded(),
            entered: false,
            bump: 255,
        };
        let flags = PauseFlags {
            staking: false,
            allocation: false,
            claim: false,
            bump: 255,
        };
        (keys, acl, config, flags)
    }

    fn assert_err<T>(result: Result<T>, expected: StakeErrorCode) {
        match result {
            Ok(_) => panic!("expected {:?}", expected),
            Err(err) => assert_eq!(err, expected.into()),
        }
    }

    #[test]
    fn cooldown_change_carries_little_endian_value() {
        let (keys, acl, mut config, _) = setup();
        let event = set_cooldown(&acl, &keys.admin, &mut config, 3_600).unwrap();
        assert_eq!(config.cooldown, 3_600);
        assert_eq!(event.selector, 0);
        assert_eq!(event.field, "cooldown");
        assert_eq!(event.value, vec![0x10, 0x0e, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn negative_cooldown_is_rejected() {
        let (keys, acl, mut config, _) = setup();
        assert_err(
            set_cooldown(&acl, &keys.admin, &mut config, -1),
            StakeErrorCode::InvalidCooldown,
        );
        assert_eq!(config.cooldown, DAY);
        set_cooldown(&acl, &keys.admin, &mut config, 0).unwrap();
    }

    #[test]
    fn config_setters_need_admin() {
        let (keys, acl, mut config, _) = setup();
        assert_err(
            set_min_stake(&acl, &keys.operator, &mut config, 10),
            StakeErrorCode::Unauthorized,
        );
        assert_err(
            set_max_deposit(&acl, &keys.pauser, &mut config, 10),
            StakeErrorCode::Unauthorized,
        );

        let event = set_max_stake_supply(&acl, &keys.admin, &mut config, 1 << 40).unwrap();
        assert_eq!(config.max_stake_supply, 1 << 40);
        assert_eq!(event.field, "maxStakeSupply");
        assert_eq!(event.value, (1u64 << 40).to_le_bytes().to_vec());
    }

    #[test]
    fn duration_setters_need_operator_and_always_notify() {
        let (keys, acl, mut config, _) = setup();
        assert_err(
            add_duration(&acl, &keys.admin, &mut config, 7 * DAY),
            StakeErrorCode::Unauthorized,
        );

        let (added, event) = add_duration(&acl, &keys.operator, &mut config, 7 * DAY).unwrap();
        assert!(added);
        assert_eq!(event.field, "durationAdded");
        assert_eq!(event.value, (7 * DAY).to_le_bytes().to_vec());

        let (added, event) = add_duration(&acl, &keys.operator, &mut config, 7 * DAY).unwrap();
        assert!(!added);
        assert_eq!(event.selector, ConfigField::DurationAdded.selector());

        let (removed, event) =
            remove_duration(&acl, &keys.operator, &mut config, 30 * DAY).unwrap();
        assert!(!removed);
        assert_eq!(event.field, "durationRemoved");
        assert!(config.durations.is_accepted(7 * DAY));
    }

    #[test]
    fn admin_role_cannot_be_replaced_through_member_updates() {
        let (keys, mut acl, _, _) = setup();
        let other = Pubkey::new_unique();
        assert_err(
            replace_role_members(&mut acl, &keys.admin, Role::Admin, vec![other]),
            StakeErrorCode::NotAllowed,
        );
        assert_eq!(acl.admin, keys.admin);

        replace_role_members(&mut acl, &keys.admin, Role::Pauser, vec![other]).unwrap();
        assert_eq!(acl.pausers, vec![other]);
    }

    #[test]
    fn role_member_updates_are_bounded_and_admin_only() {
        let (keys, mut acl, _, _) = setup();
        assert_err(
            replace_role_members(&mut acl, &keys.operator, Role::StakingOperator, vec![]),
            StakeErrorCode::Unauthorized,
        );
        let too_many: Vec<Pubkey> = (0..=MAX_ROLE_MEMBERS).map(|_| Pubkey::new_unique()).collect();
        assert_err(
            replace_role_members(&mut acl, &keys.admin, Role::Unpauser, too_many),
            StakeErrorCode::TooManyAdministrators,
        );
        assert_err(
            replace_role_members(
                &mut acl,
                &keys.admin,
                Role::Unpauser,
                vec![Pubkey::default()],
            ),
            StakeErrorCode::ZeroAddress,
        );
        assert_eq!(acl.unpausers, vec![keys.unpauser]);
    }

    #[test]
    fn admin_transfer_rejects_zero_address() {
        let (keys, mut acl, _, _) = setup();
        assert_err(
            transfer_admin(&mut acl, &keys.admin, Pubkey::default()),
            StakeErrorCode::ZeroAddress,
        );
        let next = Pubkey::new_unique();
        transfer_admin(&mut acl, &keys.admin, next).unwrap();
        assert!(acl.has_role(Role::Admin, &next));
        assert_err(
            transfer_admin(&mut acl, &keys.admin, keys.admin),
            StakeErrorCode::Unauthorized,
        );
    }

    #[test]
    fn pausing_needs_pauser_not_admin() {
        let (keys, acl, _, mut flags) = setup();
        assert_err(
            write_pause_flags(&acl, &keys.admin, &mut flags, &PauseFlag::ALL, true),
            StakeErrorCode::Unauthorized,
        );
        assert_err(
            write_pause_flags(&acl, &keys.unpauser, &mut flags, &PauseFlag::ALL, true),
            StakeErrorCode::Unauthorized,
        );

        let events = write_pause_flags(&acl, &keys.pauser, &mut flags, &PauseFlag::ALL, true).unwrap();
        assert_eq!(events.len(), 3);
        assert!(flags.is_staking_paused() && flags.is_allocation_paused() && flags.is_claim_paused());
    }

    #[test]
    fn clearing_a_flag_needs_unpauser() {
        let (keys, acl, _, mut flags) = setup();
        write_pause_flags(&acl, &keys.pauser, &mut flags, &[PauseFlag::Claim], true).unwrap();
        assert_err(
            write_pause_flags(&acl, &keys.pauser, &mut flags, &[PauseFlag::Claim], false),
            StakeErrorCode::Unauthorized,
        );
        assert!(flags.is_claim_paused());

        let events =
            write_pause_flags(&acl, &keys.unpauser, &mut flags, &[PauseFlag::Claim], false)
                .unwrap();
        assert!(!flags.is_claim_paused());
        assert_eq!(events[0].flag, "claim");
        assert_eq!(events[0].selector, 2);
        assert!(!events[0].value);
    }

    #[test]
    fn rewriting_a_flag_still_notifies() {
        let (keys, acl, _, mut flags) = setup();
        write_pause_flags(&acl, &keys.pauser, &mut flags, &PauseFlag::ALL, true).unwrap();
        let events = write_pause_flags(&acl, &keys.pauser, &mut flags, &PauseFlag::ALL, true).unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.flag.as_str()).collect();
        assert_eq!(names, vec!["staking", "allocation", "claim"]);
        assert!(events.iter().all(|e| e.value));
    }
}
