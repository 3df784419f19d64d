use rust_decimal::Decimal;
use tracing::info;

use crate::account::{AccountId, Accounts};

use super::{TransactionError, TransactionKind, TransactionState};

#[derive(Debug, Clone)]
pub struct Deposit {
    account: AccountId,
    amount: Decimal,
    pub(super) state: TransactionState,
}

impl Deposit {
    pub fn new(account: AccountId, amount: Decimal) -> Self {
        Self {
            account,
            amount,
            state: TransactionState::default(),
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn succeeded(&self) -> bool {
        self.state.succeeded
    }

    pub fn execute(&mut self, accounts: &mut Accounts) -> Result<(), TransactionError> {
        self.state.begin_execute(TransactionKind::Deposit)?;

        if self.amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount);
        }
        let account = accounts.get_mut(self.account)?;
        let balance = account
            .balance()
            .checked_add(self.amount)
            .ok_or(TransactionError::Overflow)?;
        account.set_balance(balance);
        self.state.finish_execute();
        info!(
            account = account.name(),
            amount = %self.amount,
            balance = %balance,
            "Deposit successful"
        );
        Ok(())
    }

    /// Debits the amount back, the balance is allowed to go negative.
    pub fn rollback(&mut self, accounts: &mut Accounts) -> Result<(), TransactionError> {
        self.state.check_rollback(TransactionKind::Deposit)?;

        let account = accounts.get_mut(self.account)?;
        let balance = account
            .balance()
            .checked_sub(self.amount)
            .ok_or(TransactionError::Overflow)?;
        account.set_balance(balance);
        self.state.finish_rollback();
        info!(
            account = account.name(),
            amount = %self.amount,
            balance = %balance,
            "Deposit reversed"
        );
        Ok(())
    }

    pub fn describe(&self, accounts: &Accounts) -> String {
        format!(
            "Deposit of {:.2} into the account of {}",
            self.amount,
            accounts.display_name(self.account)
        )
    }
}
