use crate::error::StakeErrorCode;
use anchor_lang::prelude::*;

pub const DAY: i64 = 24 * 60 * 60;
pub const MAX_DURATIONS: usize = 16;

/// Lock durations offered at initialization: 60, 91, 182 and 365 days.
pub const DEFAULT_DURATIONS: [i64; 4] = [60 * DAY, 91 * DAY, 182 * DAY, 365 * DAY];

/// Set of lock durations (seconds) a new deposit may choose from.
///
/// Membership only gates new locks. Entries created under a duration that is
/// later removed keep maturing on their own schedule.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DurationRegistry {
    pub durations: Vec<i64>,
}

impl DurationRegistry {
    pub const LEN: usize = 4 + 8 * MAX_DURATIONS;

    pub fn seeded() -> Self {
        Self {
            durations: DEFAULT_DURATIONS.to_vec(),
        }
    }

    pub fn is_accepted(&self, duration: i64) -> bool {
        self.durations.contains(&duration)
    }

    /// Returns `false` when the duration was already accepted.
    pub fn add(&mut self, duration: i64) -> Result<bool> {
        require!(duration > 0, StakeErrorCode::InvalidDuration);
        if self.is_accepted(duration) {
            return Ok(false);
        }
        require!(
            self.durations.len() < MAX_DURATIONS,
            StakeErrorCode::TooManyDurations
        );
        self.durations.push(duration);
        Ok(true)
    }

    pub fn remove(&mut self, duration: i64) -> bool {
        match self.durations.iter().position(|d| *d == duration) {
            Some(index) => {
                self.durations.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> &[i64] {
        &self.durations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_registry_accepts_the_four_tiers() {
        let registry = DurationRegistry::seeded();
        for days in [60, 91, 182, 365] {
            assert!(registry.is_accepted(days * DAY), "{} days", days);
        }
        assert!(!registry.is_accepted(30 * DAY));
        assert_eq!(registry.list().len(), 4);
    }

    #[test]
    fn add_reports_new_insertions_only() {
        let mut registry = DurationRegistry::seeded();
        assert_eq!(registry.add(30 * DAY).unwrap(), true);
        assert_eq!(registry.add(30 * DAY).unwrap(), false);
        assert_eq!(registry.list().len(), 5);
    }

    #[test]
    fn add_rejects_non_positive_durations() {
        let mut registry = DurationRegistry::default();
        assert_eq!(
            registry.add(0).unwrap_err(),
            StakeErrorCode::InvalidDuration.into()
        );
        assert_eq!(
            registry.add(-DAY).unwrap_err(),
            StakeErrorCode::InvalidDuration.into()
        );
    }

    #[test]
    fn add_is_bounded() {
        let mut registry = DurationRegistry::default();
        for i in 1..=MAX_DURATIONS as i64 {
            assert!(registry.add(i).unwrap());
        }
        assert_eq!(
            registry.add(1_000).unwrap_err(),
            StakeErrorCode::TooManyDurations.into()
        );
        // Re-adding an existing value is not an insertion, so it is fine when full.
        assert_eq!(registry.add(1).unwrap(), false);
    }

    #[test]
    fn remove_reports_membership() {
        let mut registry = DurationRegistry::seeded();
        assert!(registry.remove(91 * DAY));
        assert!(!registry.remove(91 * DAY));
        assert!(!registry.is_accepted(91 * DAY));
        assert_eq!(registry.list().len(), 3);
    }
}
