mod csv_utils;
mod dto;
mod engine;
mod error;
mod limits;
mod runner;
mod stores;

pub use dto::{
    AccountBalance, AccountId, AccountRow, AccountSeed, Currency, Operation, OperationKind,
    RateSeed, Receipt, TransactionId, UserId,
};
pub use engine::Engine;
pub use error::Error;
pub use limits::Limits;
pub use runner::{run, run_async};
pub use stores::{
    Account, AccountsStore, ExchangeRate, RateTable, Transaction, TransactionStatus,
    TransactionsStore,
};
