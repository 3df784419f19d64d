use rust_decimal::Decimal;
use tracing::info;

use crate::account::{AccountId, Accounts};

use super::{TransactionError, TransactionKind, TransactionState};

#[derive(Debug, Clone)]
pub struct Withdraw {
    account: AccountId,
    amount: Decimal,
    pub(super) state: TransactionState,
}

impl Withdraw {
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
        self.state.begin_execute(TransactionKind::Withdraw)?;

        let account = accounts.get_mut(self.account)?;
        let balance = account
            .balance()
            .checked_sub(self.amount)
            .ok_or(TransactionError::Overflow)?;
        if balance < Decimal::ZERO {
            return Err(TransactionError::InsufficientFunds);
        }
        account.set_balance(balance);
        self.state.finish_execute();
        info!(
            account = account.name(),
            amount = %self.amount,
            balance = %balance,
            "Withdrawal successful"
        );
        Ok(())
    }

    /// Credits the amount back without looking at the current balance.
    pub fn rollback(&mut self, accounts: &mut Accounts) -> Result<(), TransactionError> {
        self.state.check_rollback(TransactionKind::Withdraw)?;

        let account = accounts.get_mut(self.account)?;
        let balance = account
            .balance()
            .checked_add(self.amount)
            .ok_or(TransactionError::Overflow)?;
        account.set_balance(balance);
        self.state.finish_rollback();
        info!(
            account = account.name(),
            amount = %self.amount,
            balance = %balance,
            "Withdrawal reversed"
        );
        Ok(())
    }

    pub fn describe(&self, accounts: &Accounts) -> String {
        format!(
            "Withdrawal of {:.2} from the account of {}",
            self.amount,
            accounts.display_name(self.account)
        )
    }
}
