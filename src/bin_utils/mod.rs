//! Bootstraps [`crate::processor`] from a CSV ledger script and writes the
//! resulting balances as CSV. Kept inside the library so the integration test
//! can drive it the same way the binary does.

use std::io::{Read, Write};

use crate::processor::{
    LedgerProcessError, LedgerProcessor, in_memory_processor::InMemoryLedgerProcessor,
};
use anyhow::Result;
use csv_parser::CsvCommandParser;
use csv_printer::{AccountRow, print_accounts};
pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, LedgerProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvCommandParser::new(self.input);

        let mut processor = InMemoryLedgerProcessor::default();

        for (line, row) in parser {
            let result = row
                .map_err(LedgerProcessError::from)
                .and_then(|record| processor.process_command(record));
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        print_accounts(
            self.output,
            processor.accounts.iter().map(|(_, acc)| AccountRow {
                name: acc.name(),
                balance: acc.balance(),
            }),
        )
    }
}
