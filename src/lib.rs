/// Accounts and the table that owns them.
pub mod account;

/// Withdraw, deposit and transfer transactions with execute/rollback
/// semantics. Transactions refer to accounts by [`account::AccountId`].
pub mod transaction;

/// Ledger script commands, parsed and validated against the current ledger
/// before anything is executed.
pub mod command;

/// Command processor interface, plus "in memory" implementation.
pub mod processor;

/// CSV front end used by the binary and by the integration test.
pub mod bin_utils;
