use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::account::{AccountId, Accounts};

use super::{Deposit, TransactionError, TransactionKind, TransactionState, Withdraw};

/// Moves funds by composing a [`Withdraw`] from the source and a [`Deposit`]
/// into the destination. Failures of either leg are recorded and logged here
/// instead of being returned, callers inspect [`Transfer::succeeded`] and
/// [`Transfer::last_error`].
///
/// The legs run withdraw first, deposit second, and a failed deposit does not
/// undo the withdrawal. With a shared amount the deposit can only fail when
/// the amount is not positive, in which case the withdrawal moved nothing
/// (zero) or credited the source (negative). For a positive amount between
/// two accounts of the same table a successful withdrawal is always followed
/// by a successful deposit.
#[derive(Debug, Clone)]
pub struct Transfer {
    from: AccountId,
    to: AccountId,
    amount: Decimal,
    withdraw: Withdraw,
    deposit: Deposit,
    last_error: Option<TransactionError>,
    pub(super) state: TransactionState,
}

impl Transfer {
    pub fn new(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self {
            from,
            to,
            amount,
            withdraw: Withdraw::new(from, amount),
            deposit: Deposit::new(to, amount),
            last_error: None,
            state: TransactionState::default(),
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn succeeded(&self) -> bool {
        self.withdraw.succeeded() && self.deposit.succeeded()
    }

    /// Failure of the latest execute or rollback attempt of either leg.
    pub fn last_error(&self) -> Option<&TransactionError> {
        self.last_error.as_ref()
    }

    pub fn execute(&mut self, accounts: &mut Accounts) -> Result<(), TransactionError> {
        self.state.begin_execute(TransactionKind::Transfer)?;

        let result = self
            .withdraw
            .execute(accounts)
            .and_then(|_| self.deposit.execute(accounts));
        match result {
            Ok(()) => {
                self.state.finish_execute();
                info!(
                    from = %accounts.display_name(self.from),
                    to = %accounts.display_name(self.to),
                    amount = %self.amount,
                    "Transfer successful"
                );
            }
            Err(err) => {
                warn!(
                    from = %accounts.display_name(self.from),
                    to = %accounts.display_name(self.to),
                    amount = %self.amount,
                    %err,
                    "Transfer failed to complete"
                );
                self.last_error = Some(err);
            }
        }
        Ok(())
    }

    /// Undoes the legs in reverse order, deposit first. Only a transfer that
    /// was never executed or is already reversed is rejected, a leg that
    /// cannot be rolled back is recorded like an execution failure.
    pub fn rollback(&mut self, accounts: &mut Accounts) -> Result<(), TransactionError> {
        self.state.check_attempted(TransactionKind::Transfer)?;

        let result = self
            .deposit
            .rollback(accounts)
            .and_then(|_| self.withdraw.rollback(accounts));
        match result {
            Ok(()) => {
                self.state.finish_rollback();
                info!(
                    from = %accounts.display_name(self.from),
                    to = %accounts.display_name(self.to),
                    amount = %self.amount,
                    "Transfer reversed"
                );
            }
            Err(err) => {
                warn!(%err, "Transfer rollback failed to complete");
                self.last_error = Some(err);
            }
        }
        Ok(())
    }

    pub fn describe(&self, accounts: &Accounts) -> String {
        format!(
            "Transfer of {:.2} from the account of {} to the account of {}",
            self.amount,
            accounts.display_name(self.from),
            accounts.display_name(self.to)
        )
    }
}
