use std::fs::File;

use anyhow::{Context, Result};
use mini_ledger::{bin_utils::Service, processor::LedgerProcessError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| {
            match err {
                LedgerProcessError::ParseErr(_) | LedgerProcessError::CommandErr(_) => {
                    eprintln!("Error at line {line}: {err}")
                }
                LedgerProcessError::TransactionErr(err) => {
                    // rejected by the ledger rules, not a malformed script
                    debug!(line, %err, "Transaction rejected")
                }
            }
        }),
    };
    service.run()
}
