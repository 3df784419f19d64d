use std::collections::HashMap;

use tracing::info;

use crate::{
    account::{Account, AccountId, Accounts},
    command::{CommandRecord, LedgerCommand, LedgerCommandError},
    transaction::{Transaction, TransactionId},
};

use super::{LedgerProcessError, LedgerProcessor};

#[derive(Default)]
pub struct InMemoryLedgerProcessor {
    account_names: HashMap<String, AccountId>,
    transactions: HashMap<TransactionId, Transaction>,
    pub accounts: Accounts,
}

impl InMemoryLedgerProcessor {
    pub fn transaction(&self, tx_id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(&tx_id)
    }
}

impl LedgerProcessor for InMemoryLedgerProcessor {
    fn process_command(&mut self, record: CommandRecord) -> Result<(), LedgerProcessError> {
        let cmd = LedgerCommand::parse_command(record, &self.account_names, &self.transactions)?;
        match cmd {
            LedgerCommand::OpenAccount { name, balance } => {
                let id = self.accounts.open(Account::new(balance, name.clone()));
                info!(account = %name, %balance, "Account opened");
                self.account_names.insert(name, id);
            }
            LedgerCommand::Execute {
                tx_id,
                mut transaction,
            } => {
                info!(tx_id, "{}", transaction.describe(&self.accounts));
                let result = transaction.execute(&mut self.accounts);
                // keep failed attempts too, a later rollback must see them
                self.transactions.insert(tx_id, transaction);
                result?;
            }
            LedgerCommand::Rollback { tx_id } => {
                let transaction = self
                    .transactions
                    .get_mut(&tx_id)
                    .ok_or(LedgerCommandError::ExistingTxRequired { tx_id })?;
                info!(tx_id, "Rollback of {}", transaction.describe(&self.accounts));
                transaction.rollback(&mut self.accounts)?;
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::{Decimal, prelude::FromPrimitive};

    use crate::{command::CommandKind, transaction::TransactionError};

    use super::*;

    fn record(
        kind: CommandKind,
        tx: Option<TransactionId>,
        account: &str,
        to: Option<&str>,
        amount: Option<u32>,
    ) -> CommandRecord {
        CommandRecord {
            kind,
            tx,
            account: Some(account.to_string()),
            to: to.map(ToOwned::to_owned),
            amount: amount.map(|v| Decimal::from_u32(v).unwrap()),
        }
    }

    fn rollback(tx_id: TransactionId) -> CommandRecord {
        CommandRecord {
            kind: CommandKind::Rollback,
            tx: Some(tx_id),
            account: None,
            to: None,
            amount: None,
        }
    }

    fn balance(processor: &InMemoryLedgerProcessor, name: &str) -> Decimal {
        let id = processor.account_names[name];
        processor.accounts.get(id).unwrap().balance()
    }

    fn processor() -> InMemoryLedgerProcessor {
        let mut processor = InMemoryLedgerProcessor::default();
        processor
            .process_command(record(CommandKind::Open, None, "alice", None, Some(100)))
            .unwrap();
        processor
            .process_command(record(CommandKind::Open, None, "bob", None, Some(50)))
            .unwrap();
        processor
    }

    #[test]
    fn process_some_commands() {
        let mut processor = processor();
        assert_eq!(processor.accounts.len(), 2);

        processor
            .process_command(record(
                CommandKind::Transfer,
                Some(1),
                "alice",
                Some("bob"),
                Some(30),
            ))
            .unwrap();
        processor
            .process_command(record(CommandKind::Deposit, Some(2), "bob", None, Some(5)))
            .unwrap();
        assert_eq!(balance(&processor, "alice"), Decimal::from_u32(70).unwrap());
        assert_eq!(balance(&processor, "bob"), Decimal::from_u32(85).unwrap());
        assert_eq!(processor.transactions.len(), 2);

        processor.process_command(rollback(1)).unwrap();
        assert_eq!(balance(&processor, "alice"), Decimal::from_u32(100).unwrap());
        assert_eq!(balance(&processor, "bob"), Decimal::from_u32(55).unwrap());
        assert!(processor.transaction(1).unwrap().reversed());

        let err = processor.process_command(rollback(1)).unwrap_err();
        assert!(matches!(
            err,
            LedgerProcessError::TransactionErr(TransactionError::AlreadyReversed { .. })
        ));
    }

    #[test]
    fn failed_transactions_are_recorded() {
        let mut processor = processor();

        let err = processor
            .process_command(record(
                CommandKind::Withdrawal,
                Some(1),
                "bob",
                None,
                Some(60),
            ))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerProcessError::TransactionErr(TransactionError::InsufficientFunds)
        ));
        let tx = processor.transaction(1).unwrap();
        assert!(tx.executed());
        assert!(!tx.succeeded());

        // id is taken even though the withdrawal failed
        let err = processor
            .process_command(record(CommandKind::Deposit, Some(1), "bob", None, Some(1)))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerProcessError::CommandErr(LedgerCommandError::DuplicateTransaction { tx_id: 1 })
        ));

        let err = processor.process_command(rollback(1)).unwrap_err();
        assert!(matches!(
            err,
            LedgerProcessError::TransactionErr(TransactionError::NotFinalised { .. })
        ));
        assert_eq!(balance(&processor, "bob"), Decimal::from_u32(50).unwrap());
    }

    #[test]
    fn failed_transfer_is_not_an_error() {
        let mut processor = processor();

        processor
            .process_command(record(
                CommandKind::Transfer,
                Some(1),
                "bob",
                Some("alice"),
                Some(80),
            ))
            .unwrap();
        assert!(!processor.transaction(1).unwrap().succeeded());
        assert_eq!(balance(&processor, "alice"), Decimal::from_u32(100).unwrap());
        assert_eq!(balance(&processor, "bob"), Decimal::from_u32(50).unwrap());

        // the failing leg rollback stays inside the transfer
        processor.process_command(rollback(1)).unwrap();
        assert!(!processor.transaction(1).unwrap().reversed());
        assert_eq!(balance(&processor, "bob"), Decimal::from_u32(50).unwrap());
    }

    #[test]
    fn rollback_of_unknown_transaction() {
        let mut processor = processor();
        let err = processor.process_command(rollback(42)).unwrap_err();
        assert!(matches!(
            err,
            LedgerProcessError::CommandErr(LedgerCommandError::ExistingTxRequired { tx_id: 42 })
        ));
    }
}
