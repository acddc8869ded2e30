//! The runner is responsible for seeding an engine from the account and rate
//! CSV files, replaying the operations file against it, and writing the
//! resulting account balances to a writer.
//!
//! This module provides both a synchronous and an asynchronous runner
//! implementation.

mod async_runner;
mod sync_runner;

use std::error::Error;
use std::path::Path;

use crate::{
    csv_utils::read_csv,
    dto::{AccountSeed, RateSeed},
    Engine,
};

pub use async_runner::run as run_async;
pub use sync_runner::run;

/// Builds an engine seeded with the accounts and exchange rates from the
/// given CSV files.
fn seed_engine<P>(accounts_path: P, rates_path: P) -> Result<Engine, Box<dyn Error + Send + Sync>>
where
    P: AsRef<Path>,
{
    let mut engine = Engine::new();

    for seed in read_csv::<AccountSeed, _>(accounts_path)? {
        engine.add_account(seed?.into())?;
    }
    for seed in read_csv::<RateSeed, _>(rates_path)? {
        let seed = seed?;
        engine.set_rate(seed.from, seed.to, seed.rate);
    }

    Ok(engine)
}
