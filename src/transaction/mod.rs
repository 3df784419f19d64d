use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{AccountError, AccountId, Accounts};

pub use deposit::Deposit;
pub use transfer::Transfer;
pub use withdraw::Withdraw;

mod deposit;
mod transfer;
mod withdraw;

pub type TransactionId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Withdraw,
    Deposit,
    Transfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionKind::Withdraw => "Withdrawal",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Transfer => "Transfer",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Account does not have enough funds for withdrawal")]
    InsufficientFunds,
    #[error("Invalid amount to deposit, amount should be more than zero")]
    InvalidAmount,
    #[error("{kind} has not been finalised")]
    NotFinalised { kind: TransactionKind },
    #[error("{kind} has already been reversed")]
    AlreadyReversed { kind: TransactionKind },
    #[error("{kind} has already been executed")]
    AlreadyExecuted { kind: TransactionKind },
    #[error("Balance is out of the representable range")]
    Overflow,
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Lifecycle flags shared by every transaction kind.
///
/// ```text
/// PENDING --execute--> EXECUTED(success | fail)
/// EXECUTED(success) --rollback--> REVERSED
/// ```
///
/// `executed` flips at the start of the first `execute` call, before the
/// effect is attempted, so a failed attempt is still remembered.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionState {
    executed: bool,
    succeeded: bool,
    reversed: bool,
    timestamp: Option<DateTime<Utc>>,
}

impl TransactionState {
    fn begin_execute(&mut self, kind: TransactionKind) -> Result<(), TransactionError> {
        if self.executed {
            return Err(TransactionError::AlreadyExecuted { kind });
        }
        self.executed = true;
        Ok(())
    }

    fn finish_execute(&mut self) {
        self.succeeded = true;
        self.timestamp = Some(Utc::now());
    }

    fn check_rollback(&self, kind: TransactionKind) -> Result<(), TransactionError> {
        if self.reversed {
            Err(TransactionError::AlreadyReversed { kind })
        } else if !(self.executed && self.succeeded) {
            Err(TransactionError::NotFinalised { kind })
        } else {
            Ok(())
        }
    }

    /// Weaker rollback gate: an executed but failed attempt passes.
    fn check_attempted(&self, kind: TransactionKind) -> Result<(), TransactionError> {
        if self.reversed {
            Err(TransactionError::AlreadyReversed { kind })
        } else if !self.executed {
            Err(TransactionError::NotFinalised { kind })
        } else {
            Ok(())
        }
    }

    fn finish_rollback(&mut self) {
        self.reversed = true;
        self.timestamp = Some(Utc::now());
    }
}

/// Closed set of transaction kinds. Every operation dispatches with a single
/// `match`, so adding a kind is a compile error until it is handled everywhere.
#[derive(Debug, Clone)]
pub enum Transaction {
    Withdraw(Withdraw),
    Deposit(Deposit),
    Transfer(Transfer),
}

impl Transaction {
    pub fn withdraw(account: AccountId, amount: Decimal) -> Self {
        Self::Withdraw(Withdraw::new(account, amount))
    }

    pub fn deposit(account: AccountId, amount: Decimal) -> Self {
        Self::Deposit(Deposit::new(account, amount))
    }

    pub fn transfer(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self::Transfer(Transfer::new(from, to, amount))
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Withdraw(_) => TransactionKind::Withdraw,
            Transaction::Deposit(_) => TransactionKind::Deposit,
            Transaction::Transfer(_) => TransactionKind::Transfer,
        }
    }

    /// Withdrawals and deposits return their failure. A transfer absorbs
    /// failures of its legs and only returns its own precondition errors.
    pub fn execute(&mut self, accounts: &mut Accounts) -> Result<(), TransactionError> {
        match self {
            Transaction::Withdraw(tx) => tx.execute(accounts),
            Transaction::Deposit(tx) => tx.execute(accounts),
            Transaction::Transfer(tx) => tx.execute(accounts),
        }
    }

    pub fn rollback(&mut self, accounts: &mut Accounts) -> Result<(), TransactionError> {
        match self {
            Transaction::Withdraw(tx) => tx.rollback(accounts),
            Transaction::Deposit(tx) => tx.rollback(accounts),
            Transaction::Transfer(tx) => tx.rollback(accounts),
        }
    }

    pub fn describe(&self, accounts: &Accounts) -> String {
        match self {
            Transaction::Withdraw(tx) => tx.describe(accounts),
            Transaction::Deposit(tx) => tx.describe(accounts),
            Transaction::Transfer(tx) => tx.describe(accounts),
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Withdraw(tx) => tx.amount(),
            Transaction::Deposit(tx) => tx.amount(),
            Transaction::Transfer(tx) => tx.amount(),
        }
    }

    pub fn executed(&self) -> bool {
        self.state().executed
    }

    pub fn succeeded(&self) -> bool {
        match self {
            Transaction::Withdraw(tx) => tx.succeeded(),
            Transaction::Deposit(tx) => tx.succeeded(),
            Transaction::Transfer(tx) => tx.succeeded(),
        }
    }

    pub fn reversed(&self) -> bool {
        self.state().reversed
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.state().timestamp
    }

    fn state(&self) -> &TransactionState {
        match self {
            Transaction::Withdraw(tx) => &tx.state,
            Transaction::Deposit(tx) => &tx.state,
            Transaction::Transfer(tx) => &tx.state,
        }
    }
}

impl From<Withdraw> for Transaction {
    fn from(tx: Withdraw) -> Self {
        Self::Withdraw(tx)
    }
}

impl From<Deposit> for Transaction {
    fn from(tx: Deposit) -> Self {
        Self::Deposit(tx)
    }
}

impl From<Transfer> for Transaction {
    fn from(tx: Transfer) -> Self {
        Self::Transfer(tx)
    }
}
