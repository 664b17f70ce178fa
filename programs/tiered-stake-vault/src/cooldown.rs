use crate::error::StakeErrorCode;
use anchor_lang::prelude::*;

/// Timestamp of an account's most recent deposit. Zero means never stamped.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CooldownTracker {
    pub last_deposit: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CooldownStatus {
    pub in_cooldown: bool,
    pub remaining: i64,
}

impl CooldownTracker {
    pub const LEN: usize = 8;

    pub fn stamp(&mut self, now: i64) {
        self.last_deposit = now;
    }

    pub fn status(&self, owner: &Pubkey, window: i64, now: i64) -> Result<CooldownStatus> {
        require!(*owner != Pubkey::default(), StakeErrorCode::ZeroAddress);

        if self.last_deposit == 0 {
            return Ok(CooldownStatus::default());
        }
        // Clock went backwards; treat as still cooling down.
        if now < self.last_deposit {
            return Ok(CooldownStatus {
                in_cooldown: true,
                remaining: 0,
            });
        }

        let elapsed = now - self.last_deposit;
        if elapsed >= window {
            return Ok(CooldownStatus::default());
        }
        Ok(CooldownStatus {
            in_cooldown: true,
            remaining: window - elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: i64 = 7 * 24 * 60 * 60;
    const T: i64 = 1_700_000_000;

    fn owner() -> Pubkey {
        Pubkey::new_unique()
    }

    #[test]
    fn never_stamped_is_not_cooling_down() {
        let tracker = CooldownTracker::default();
        assert_eq!(
            tracker.status(&owner(), W, T).unwrap(),
            CooldownStatus::default()
        );
    }

    #[test]
    fn zero_address_is_rejected() {
        let tracker = CooldownTracker::default();
        let err = tracker.status(&Pubkey::default(), W, T).unwrap_err();
        assert_eq!(err, StakeErrorCode::ZeroAddress.into());
    }

    #[test]
    fn window_boundaries() {
        let owner = owner();
        let mut tracker = CooldownTracker::default();
        tracker.stamp(T);

        let at = |now| tracker.status(&owner, W, now).unwrap();
        assert_eq!(
            at(T),
            CooldownStatus {
                in_cooldown: true,
                remaining: W
            }
        );
        assert_eq!(
            at(T + W - 1),
            CooldownStatus {
                in_cooldown: true,
                remaining: 1
            }
        );
        assert_eq!(at(T + W), CooldownStatus::default());
        assert_eq!(at(T + 10 * W), CooldownStatus::default());
    }

    #[test]
    fn clock_behind_stamp_is_clamped() {
        let owner = owner();
        let mut tracker = CooldownTracker::default();
        tracker.stamp(T);
        assert_eq!(
            tracker.status(&owner, W, T - 5).unwrap(),
            CooldownStatus {
                in_cooldown: true,
                remaining: 0
            }
        );
    }

    #[test]
    fn restamp_restarts_the_window() {
        let owner = owner();
        let mut tracker = CooldownTracker::default();
        tracker.stamp(T);
        tracker.stamp(T + W - 1);
        let status = tracker.status(&owner, W, T + W).unwrap();
        assert!(status.in_cooldown);
        assert_eq!(status.remaining, W - 1);
    }

    #[test]
    fn zero_window_never_cools_down() {
        let owner = owner();
        let mut tracker = CooldownTracker::default();
        tracker.stamp(T);
        assert!(!tracker.status(&owner, 0, T).unwrap().in_cooldown);
    }
}
