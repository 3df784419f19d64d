use thiserror::Error;

use crate::{
    command::{CommandRecord, LedgerCommandError},
    transaction::TransactionError,
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum LedgerProcessError {
    #[error("Malformed command: {0}")]
    ParseErr(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] LedgerCommandError),
    #[error(transparent)]
    TransactionErr(#[from] TransactionError),
}

pub trait LedgerProcessor {
    fn process_command(&mut self, record: CommandRecord) -> Result<(), LedgerProcessError>;
}
