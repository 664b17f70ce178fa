//! Per-account lock accounting.
//!
//! Every stake creates one [`LockEntry`] with its own start time and duration
//! so tranches mature independently. The ledger keeps a cached total of the
//! entries it holds; matured entries stay in the list (and in the cached
//! total) until [`LockLedger::consolidate`] sweeps them, while
//! [`LockLedger::locked_balance`] reports what is effectively locked at a
//! given instant regardless of whether that sweep has run.
//!
//! Entries are removed with order-preserving operations, so storage order is
//! always insertion order.

use crate::durations::DurationRegistry;
use crate::error::StakeErrorCode;
use anchor_lang::prelude::*;

pub const MAX_LOCK_ENTRIES: usize = 32;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockEntry {
    pub start: i64,
    pub amount: u64,
    pub duration: i64,
}

impl LockEntry {
    pub const LEN: usize = 8 + 8 + 8;

    pub fn matures_at(&self) -> i64 {
        self.start.saturating_add(self.duration)
    }

    pub fn is_matured(&self, now: i64) -> bool {
        self.matures_at() <= now
    }
}

/// Parallel-array view of a ledger, in storage order.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LockSnapshot {
    pub starts: Vec<i64>,
    pub amounts: Vec<u64>,
    pub durations: Vec<i64>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LockLedger {
    pub entries: Vec<LockEntry>,
    pub cached_locked: u64,
}

impl LockLedger {
    pub const LEN: usize = 4 + LockEntry::LEN * MAX_LOCK_ENTRIES + 8;

    pub fn insert(
        &mut self,
        registry: &DurationRegistry,
        amount: u64,
        duration: i64,
        now: i64,
    ) -> Result<()> {
        require!(
            registry.is_accepted(duration),
            StakeErrorCode::InvalidDuration
        );
        require!(
            self.entries.len() < MAX_LOCK_ENTRIES,
            StakeErrorCode::TooManyLockEntries
        );

        self.cached_locked = self
            .cached_locked
            .checked_add(amount)
            .ok_or(StakeErrorCode::MathOverflow)?;
        self.entries.push(LockEntry {
            start: now,
            amount,
            duration,
        });
        Ok(())
    }

    /// Sweeps matured entries out of the ledger.
    ///
    /// Returns the new cached total when at least one entry was removed, and
    /// `None` when nothing changed (including the empty ledger). Callers emit
    /// a lock update only for `Some`, so a repeated call at the same instant
    /// is silent.
    pub fn consolidate(&mut self, now: i64) -> Result<Option<u64>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let before = self.entries.len();
        let mut matured: u64 = 0;
        for entry in self.entries.iter().filter(|entry| entry.is_matured(now)) {
            matured = matured
                .checked_add(entry.amount)
                .ok_or(StakeErrorCode::MathOverflow)?;
        }
        self.entries.retain(|entry| !entry.is_matured(now));

        if self.entries.len() == before {
            return Ok(None);
        }

        self.cached_locked = self
            .cached_locked
            .checked_sub(matured)
            .ok_or(StakeErrorCode::MathOverflow)?;
        Ok(Some(self.cached_locked))
    }

    /// Removes whole still-locked entries, newest first, until at least
    /// `amount` has been released. Matured entries are left for
    /// [`Self::consolidate`]. Returns the amount actually released, which can
    /// be above `amount` (entries are never split) or below it (not enough
    /// locked).
    pub fn early_unlock(&mut self, amount: u64, now: i64) -> Result<u64> {
        let mut unlocked: u64 = 0;
        let mut index = self.entries.len();
        while index > 0 && unlocked < amount {
            index -= 1;
            if self.entries[index].is_matured(now) {
                continue;
            }
            let entry = self.entries.remove(index);
            unlocked = unlocked
                .checked_add(entry.amount)
                .ok_or(StakeErrorCode::MathOverflow)?;
        }

        self.cached_locked = self
            .cached_locked
            .checked_sub(unlocked)
            .ok_or(StakeErrorCode::MathOverflow)?;
        Ok(unlocked)
    }

    /// Amount still locked at `now`, ignoring entries that have matured but
    /// not been consolidated yet.
    pub fn locked_balance(&self, now: i64) -> u64 {
        self.entries
            .iter()
            .filter(|entry| !entry.is_matured(now))
            .fold(0u64, |sum, entry| sum.saturating_add(entry.amount))
    }

    pub fn snapshot(&self) -> LockSnapshot {
        LockSnapshot {
            starts: self.entries.iter().map(|e| e.start).collect(),
            amounts: self.entries.iter().map(|e| e.amount).collect(),
            durations: self.entries.iter().map(|e| e.duration).collect(),
        }
    }
}
