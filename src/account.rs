use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Key of an account inside [`Accounts`].
pub type AccountId = usize;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account #{0} does not exist")]
    NotFound(AccountId),
}

/// Passive balance holder. Transactions are responsible for keeping the
/// balance meaningful, so the setter does no validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    balance: Decimal,
}

impl Account {
    pub fn new(balance: Decimal, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }

    pub fn describe(&self) -> String {
        format!("Account `{}` with balance {:.2}", self.name, self.balance)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Single ownership point for every account. Transactions keep an
/// [`AccountId`] and borrow the table only while they execute or roll back.
#[derive(Debug, Default)]
pub struct Accounts {
    accounts: Vec<Account>,
}

impl Accounts {
    pub fn open(&mut self, account: Account) -> AccountId {
        self.accounts.push(account);
        self.accounts.len() - 1
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Result<&mut Account, AccountError> {
        self.accounts.get_mut(id).ok_or(AccountError::NotFound(id))
    }

    /// Name used in human readable output, falls back to the raw key.
    pub fn display_name(&self, id: AccountId) -> String {
        match self.get(id) {
            Some(acc) => acc.name().to_string(),
            None => format!("#{id}"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AccountId, &Account)> {
        self.accounts.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
