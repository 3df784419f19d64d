use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::AccountId,
    transaction::{Transaction, TransactionId},
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Open,
    Deposit,
    Withdrawal,
    Transfer,
    Rollback,
}

/// One row of a ledger script, fields not used by the `kind` are left empty.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRecord {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub tx: Option<TransactionId>,
    pub account: Option<String>,
    pub to: Option<String>,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Error)]
pub enum LedgerCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: CommandKind },
    #[error("Account is required for {kind:?}")]
    AccountRequired { kind: CommandKind },
    #[error("Transaction id is required for {kind:?}")]
    TransactionIdRequired { kind: CommandKind },
    #[error("Account `{name}` does not exist")]
    UnknownAccount { name: String },
    #[error("Account `{name}` already exists")]
    DuplicateAccount { name: String },
    #[error("Transaction {tx_id} already exists")]
    DuplicateTransaction { tx_id: TransactionId },
    #[error("There should be an existing transaction {tx_id} for rollback")]
    ExistingTxRequired { tx_id: TransactionId },
}

#[derive(Debug)]
pub enum LedgerCommand {
    OpenAccount {
        name: String,
        balance: Decimal,
    },
    Execute {
        tx_id: TransactionId,
        transaction: Transaction,
    },
    Rollback {
        tx_id: TransactionId,
    },
}

impl LedgerCommand {
    /// Resolves account names to keys and checks the transaction id against
    /// the ones already recorded.
    pub fn parse_command(
        record: CommandRecord,
        account_names: &HashMap<String, AccountId>,
        transactions: &HashMap<TransactionId, Transaction>,
    ) -> Result<Self, LedgerCommandError> {
        let kind = record.kind;
        match kind {
            CommandKind::Open => {
                let name = record
                    .account
                    .ok_or(LedgerCommandError::AccountRequired { kind })?;
                if account_names.contains_key(&name) {
                    return Err(LedgerCommandError::DuplicateAccount { name });
                }
                let balance = record
                    .amount
                    .ok_or(LedgerCommandError::AmountRequired { kind })?;
                Ok(Self::OpenAccount { name, balance })
            }
            CommandKind::Deposit | CommandKind::Withdrawal | CommandKind::Transfer => {
                let tx_id = Self::new_tx_id(&record, transactions)?;
                let account = Self::resolve(record.account.as_deref(), kind, account_names)?;
                let amount = record
                    .amount
                    .ok_or(LedgerCommandError::AmountRequired { kind })?;
                let transaction = match kind {
                    CommandKind::Deposit => Transaction::deposit(account, amount),
                    CommandKind::Withdrawal => Transaction::withdraw(account, amount),
                    _ => {
                        let to = Self::resolve(record.to.as_deref(), kind, account_names)?;
                        Transaction::transfer(account, to, amount)
                    }
                };
                Ok(Self::Execute { tx_id, transaction })
            }
            CommandKind::Rollback => {
                let tx_id = record
                    .tx
                    .ok_or(LedgerCommandError::TransactionIdRequired { kind })?;
                if !transactions.contains_key(&tx_id) {
                    return Err(LedgerCommandError::ExistingTxRequired { tx_id });
                }
                Ok(Self::Rollback { tx_id })
            }
        }
    }

    fn new_tx_id(
        record: &CommandRecord,
        transactions: &HashMap<TransactionId, Transaction>,
    ) -> Result<TransactionId, LedgerCommandError> {
        let tx_id = record
            .tx
            .ok_or(LedgerCommandError::TransactionIdRequired { kind: record.kind })?;
        if transactions.contains_key(&tx_id) {
            Err(LedgerCommandError::DuplicateTransaction { tx_id })
        } else {
            Ok(tx_id)
        }
    }

    fn resolve(
        name: Option<&str>,
        kind: CommandKind,
        account_names: &HashMap<String, AccountId>,
    ) -> Result<AccountId, LedgerCommandError> {
        let name = name.ok_or(LedgerCommandError::AccountRequired { kind })?;
        account_names
            .get(name)
            .copied()
            .ok_or_else(|| LedgerCommandError::UnknownAccount {
                name: name.to_string(),
            })
    }
}
