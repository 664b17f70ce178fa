use crate::error::StakeErrorCode;
use anchor_lang::prelude::*;

/// Pooled deposit book: one account's balance paired with the program-wide
/// total. Both sides always move together, so the total stays equal to the
/// sum of all balances.
///
/// Token movement is not done here. Handlers pull the asset in before
/// `credit` and push it out after `debit`.
pub struct DepositLedger<'a> {
    balance: &'a mut u64,
    total: &'a mut u64,
}

impl<'a> DepositLedger<'a> {
    pub fn new(balance: &'a mut u64, total: &'a mut u64) -> Self {
        Self { balance, total }
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(StakeErrorCode::MathOverflow)?;
        let total = self
            .total
            .checked_add(amount)
            .ok_or(StakeErrorCode::MathOverflow)?;
        *self.balance = balance;
        *self.total = total;
        Ok(())
    }

    /// Returns `true` when the balance is exactly zero afterwards.
    pub fn debit(&mut self, amount: u64) -> Result<bool> {
        require!(amount <= *self.balance, StakeErrorCode::ExceededWithdrawal);
        let total = self
            .total
            .checked_sub(amount)
            .ok_or(StakeErrorCode::MathOverflow)?;
        *self.balance -= amount;
        *self.total = total;
        Ok(*self.balance == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_moves_balance_and_total() {
        let (mut alice, mut bob, mut total) = (0u64, 0u64, 0u64);
        DepositLedger::new(&mut alice, &mut total).credit(100).unwrap();
        DepositLedger::new(&mut bob, &mut total).credit(50).unwrap();
        DepositLedger::new(&mut alice, &mut total).credit(25).unwrap();
        assert_eq!((alice, bob, total), (125, 50, 175));
    }

    #[test]
    fn credit_overflow_leaves_state_untouched() {
        let (mut balance, mut total) = (u64::MAX, u64::MAX);
        let err = DepositLedger::new(&mut balance, &mut total)
            .credit(1)
            .unwrap_err();
        assert_eq!(err, StakeErrorCode::MathOverflow.into());
        assert_eq!((balance, total), (u64::MAX, u64::MAX));
    }

    #[test]
    fn debit_reports_spent_balance() {
        let (mut balance, mut total) = (100u64, 300u64);
        let mut ledger = DepositLedger::new(&mut balance, &mut total);
        assert!(!ledger.debit(40).unwrap());
        assert!(ledger.debit(60).unwrap());
        assert_eq!((balance, total), (0, 200));
    }

    #[test]
    fn debit_beyond_balance_fails() {
        let (mut balance, mut total) = (100u64, 300u64);
        let err = DepositLedger::new(&mut balance, &mut total)
            .debit(101)
            .unwrap_err();
        assert_eq!(err, StakeErrorCode::ExceededWithdrawal.into());
        assert_eq!((balance, total), (100, 300));
    }
}
