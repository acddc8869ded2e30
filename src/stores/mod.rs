//! Storage layer for the banking engine. Provides storage for:
//! - Accounts and their balances ([`AccountsStore`])
//! - The append-only transaction ledger ([`TransactionsStore`])
//! - Seeded exchange rates ([`RateTable`])
//!
//! Current implementation is optimized for synchronous, direct memory
//! access. Each store owns its data and exposes validated accessors only.

mod accounts;
mod rates;
mod transactions;

pub use accounts::{Account, AccountsStore};
pub use rates::{ExchangeRate, RateTable};
pub use transactions::{Transaction, TransactionStatus, TransactionsStore};
